//! In-memory presentation model.
//!
//! A `Presentation` is built for one request, filled by the slide assembler
//! and handed to a serializer. Slides keep the placeholders of their layout,
//! so a slide with nothing set still renders the layout's empty title.

use crate::error::{Error, Result};
use crate::types::{Bounds, Rgb};

/// English Metric Units, 914400 per inch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Emu(pub i64);

/// First slide id handed out; PowerPoint reserves lower values.
const FIRST_SLIDE_ID: u32 = 256;

/// Shape ids within a slide: 1 is the group, then the layout placeholders.
const GROUP_SHAPE_ID: u32 = 1;
const TITLE_SHAPE_ID: u32 = 2;
const BODY_SHAPE_ID: u32 = 3;

/// The slide layouts shipped in the generated package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideLayout {
    /// A title placeholder only.
    TitleOnly,
    /// A title placeholder plus a body placeholder at index 1.
    TitleAndContent,
}

impl SlideLayout {
    /// Every layout, in package order.
    pub const ALL: [SlideLayout; 2] = [SlideLayout::TitleOnly, SlideLayout::TitleAndContent];

    /// Display name stored in the layout part.
    pub fn name(self) -> &'static str {
        match self {
            SlideLayout::TitleOnly => "Title Only",
            SlideLayout::TitleAndContent => "Title and Content",
        }
    }

    /// 1-based part number (`slideLayoutN.xml`).
    pub fn part_number(self) -> usize {
        match self {
            SlideLayout::TitleOnly => 1,
            SlideLayout::TitleAndContent => 2,
        }
    }

    /// Placeholder index of the body, if the layout has one.
    pub fn body_placeholder(self) -> Option<u32> {
        match self {
            SlideLayout::TitleOnly => None,
            SlideLayout::TitleAndContent => Some(1),
        }
    }
}

/// A presentation under construction.
#[derive(Debug, Clone)]
pub struct Presentation {
    slides: Vec<Slide>,
    slide_width: Emu,
    slide_height: Emu,
}

impl Presentation {
    /// Create an empty 10in x 7.5in presentation.
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: Emu(9_144_000),
            slide_height: Emu(6_858_000),
        }
    }

    /// Append a slide using `layout` and return it for editing.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        let id = FIRST_SLIDE_ID + self.slides.len() as u32;
        self.slides.push(Slide::new(id, layout));
        let index = self.slides.len() - 1;
        &mut self.slides[index]
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

/// A single slide.
#[derive(Debug, Clone)]
pub struct Slide {
    id: u32,
    layout: SlideLayout,
    title: Option<String>,
    body: Option<String>,
    background: Option<Rgb>,
    shapes: Vec<Shape>,
}

impl Slide {
    fn new(id: u32, layout: SlideLayout) -> Self {
        Self {
            id,
            layout,
            title: None,
            body: None,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    /// Set the title placeholder text.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the body placeholder text.
    ///
    /// Fails when the slide's layout has no body placeholder.
    pub fn set_body_text(&mut self, text: &str) -> Result<()> {
        if self.layout.body_placeholder().is_none() {
            return Err(Error::MissingPlaceholder {
                layout: self.layout.name(),
                idx: 1,
            });
        }
        self.body = Some(text.to_string());
        Ok(())
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Fill the slide background with a solid color.
    pub fn set_background(&mut self, color: Rgb) {
        self.background = Some(color);
    }

    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    /// Add a rectangle auto-shape and return it.
    pub fn add_rectangle(&mut self, bounds: Bounds) -> &Shape {
        let id = self.next_shape_id();
        self.shapes.push(Shape {
            id,
            name: format!("Rectangle {}", id - 1),
            bounds,
        });
        let index = self.shapes.len() - 1;
        &self.shapes[index]
    }

    /// Shapes added on top of the layout placeholders, in z-order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Id of the group shape that holds everything on the slide.
    pub fn group_shape_id(&self) -> u32 {
        GROUP_SHAPE_ID
    }

    /// Id of the title placeholder shape.
    pub fn title_shape_id(&self) -> u32 {
        TITLE_SHAPE_ID
    }

    /// Id of the body placeholder shape, if the layout has a body.
    pub fn body_shape_id(&self) -> Option<u32> {
        self.layout.body_placeholder().map(|_| BODY_SHAPE_ID)
    }

    fn next_shape_id(&self) -> u32 {
        let placeholders = match self.body_shape_id() {
            Some(id) => id,
            None => TITLE_SHAPE_ID,
        };
        placeholders + self.shapes.len() as u32 + 1
    }
}

/// A rectangle reserved on a slide. Carries position and size only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: u32,
    name: String,
    bounds: Bounds,
}

impl Shape {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

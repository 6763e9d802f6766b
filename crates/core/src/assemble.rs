//! Slide assembly: descriptors in, presentation out.

use crate::document::{Presentation, SlideLayout};
use crate::error::Result;
use crate::types::SlideDescriptor;

impl SlideLayout {
    /// Layout for a descriptor: content layout when `content` is present.
    pub fn for_descriptor(descriptor: &SlideDescriptor) -> Self {
        if descriptor.has_content() {
            SlideLayout::TitleAndContent
        } else {
            SlideLayout::TitleOnly
        }
    }
}

/// Build a presentation with one slide per descriptor, in order.
pub fn assemble(descriptors: &[SlideDescriptor]) -> Result<Presentation> {
    let mut presentation = Presentation::new();

    for descriptor in descriptors {
        let layout = SlideLayout::for_descriptor(descriptor);
        let slide = presentation.add_slide(layout);

        if let Some(title) = &descriptor.title {
            slide.set_title(title);
        }

        if let Some(color) = descriptor.background_color {
            slide.set_background(color);
        }

        if let Some(content) = &descriptor.content {
            slide.set_body_text(content)?;
        }

        for region in descriptor.regions() {
            slide.add_rectangle(region.bounds());
        }

        log::debug!(
            "Assembled slide {} ({}, {} regions)",
            presentation.slide_count(),
            layout.name(),
            descriptor.regions().len()
        );
    }

    Ok(presentation)
}

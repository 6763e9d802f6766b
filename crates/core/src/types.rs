//! Request-side types describing the slides to build.

use serde::Deserialize;

use crate::document::Emu;

/// Default left offset of a region, in the region's unit.
pub const DEFAULT_REGION_LEFT: f64 = 5.0;
/// Default top offset of a region, in the region's unit.
pub const DEFAULT_REGION_TOP: f64 = 2.0;
/// Default region width, in the region's unit.
pub const DEFAULT_REGION_WIDTH: f64 = 3.0;
/// Default region height, in the region's unit.
pub const DEFAULT_REGION_HEIGHT: f64 = 3.0;

/// One slide as described by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlideDescriptor {
    /// Title text, set verbatim.
    #[serde(default)]
    pub title: Option<String>,

    /// Body text. Its presence selects the content layout.
    #[serde(default)]
    pub content: Option<String>,

    /// Solid background fill.
    #[serde(default, rename = "bg_color")]
    pub background_color: Option<Rgb>,

    /// Rectangles reserved on the slide, in order.
    #[serde(default, rename = "image_placeholders")]
    pub image_regions: Option<Vec<Region>>,
}

impl SlideDescriptor {
    /// Whether the descriptor carries a `content` field.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Regions to reserve, empty when none were given.
    pub fn regions(&self) -> &[Region] {
        self.image_regions.as_deref().unwrap_or_default()
    }
}

/// An RGB color given as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Hex form used by DrawingML (`RRGGBB`, upper case).
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Unit in which a region's numbers are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    #[serde(alias = "inches")]
    In,
    Cm,
    Mm,
    Pt,
    Emu,
}

impl LengthUnit {
    /// EMUs in one unit.
    pub fn emu_per_unit(self) -> f64 {
        match self {
            LengthUnit::In => 914_400.0,
            LengthUnit::Cm => 360_000.0,
            LengthUnit::Mm => 36_000.0,
            LengthUnit::Pt => 12_700.0,
            LengthUnit::Emu => 1.0,
        }
    }

    /// Convert a length to EMU, truncating toward zero.
    pub fn to_emu(self, value: f64) -> Emu {
        Emu((value * self.emu_per_unit()) as i64)
    }
}

/// A rectangle placeholder on a slide. Missing numbers fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub unit: Option<LengthUnit>,
}

/// A region resolved to absolute EMU coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Region {
    /// Apply defaults and convert to EMU.
    pub fn bounds(&self) -> Bounds {
        let unit = self.unit.unwrap_or_default();
        Bounds {
            left: unit.to_emu(self.left.unwrap_or(DEFAULT_REGION_LEFT)),
            top: unit.to_emu(self.top.unwrap_or(DEFAULT_REGION_TOP)),
            width: unit.to_emu(self.width.unwrap_or(DEFAULT_REGION_WIDTH)),
            height: unit.to_emu(self.height.unwrap_or(DEFAULT_REGION_HEIGHT)),
        }
    }
}

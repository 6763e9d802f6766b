//! Core domain types and slide assembly for pptgen.
//!
//! Turns JSON slide descriptors into an in-memory presentation that the
//! `pptgen-pptx` crate serializes.

pub mod assemble;
pub mod document;
pub mod error;
pub mod types;

pub use assemble::assemble;
pub use document::{Emu, Presentation, Shape, Slide, SlideLayout};
pub use error::{Error, Result};
pub use types::{Bounds, LengthUnit, Region, Rgb, SlideDescriptor};

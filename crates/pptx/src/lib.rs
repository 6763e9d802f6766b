//! PPTX (Office Open XML) writer backend for pptgen.
//!
//! Serializes a `pptgen_core::Presentation` into a .pptx ZIP package with a
//! single slide master, one layout per `SlideLayout`, and a default theme.

mod template;
pub mod writer;

#[cfg(test)]
mod readback;

pub use writer::PptxWriter;

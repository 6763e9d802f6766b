//! PPTX package writer.

use crate::template;
use pptgen_core::{Error, Presentation, Result, Slide, SlideLayout};
use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writer for PPTX (Office Open XML) files.
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Use a different compression method for the package parts.
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    /// Write `presentation` as a PPTX package and return the inner writer.
    pub fn write<W: Write + Seek>(&self, presentation: &Presentation, writer: W) -> Result<W> {
        let parts = self.parts(presentation)?;

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(self.compression);

        for (path, content) in &parts {
            zip.start_file(path.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
            zip.write_all(content.as_bytes())?;
        }

        let writer = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;

        log::debug!(
            "Wrote PPTX package with {} slides ({} parts)",
            presentation.slide_count(),
            parts.len()
        );

        Ok(writer)
    }

    /// Serialize `presentation` into memory.
    pub fn to_bytes(&self, presentation: &Presentation) -> Result<Vec<u8>> {
        let cursor = self.write(presentation, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Serialize `presentation` to a file at `path`.
    pub fn save<P: AsRef<Path>>(&self, presentation: &Presentation, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = self.write(presentation, BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }

    /// Every part of the package, in archive order.
    fn parts(&self, presentation: &Presentation) -> Result<Vec<(String, String)>> {
        let slides = presentation.slides();
        let slide_ids: Vec<u32> = slides.iter().map(|s| s.id()).collect();

        let mut parts = vec![
            (
                "[Content_Types].xml".to_string(),
                template::content_types_xml(slides.len())?,
            ),
            ("_rels/.rels".to_string(), template::root_rels_xml()),
            (
                "docProps/core.xml".to_string(),
                template::core_props_xml(),
            ),
            (
                "docProps/app.xml".to_string(),
                template::app_props_xml(slides.len()),
            ),
            (
                "ppt/presentation.xml".to_string(),
                template::presentation_xml(
                    &slide_ids,
                    presentation.slide_width().0,
                    presentation.slide_height().0,
                )?,
            ),
            (
                "ppt/_rels/presentation.xml.rels".to_string(),
                template::presentation_rels_xml(slides.len())?,
            ),
            (
                template::SLIDE_MASTER_PATH.to_string(),
                template::slide_master_xml(),
            ),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
                template::master_rels_xml(),
            ),
        ];

        for layout in SlideLayout::ALL {
            parts.push((
                template::layout_path(layout),
                template::slide_layout_xml(layout),
            ));
            parts.push((
                template::layout_rels_path(layout),
                template::layout_rels_xml(),
            ));
        }

        parts.push((template::THEME_PATH.to_string(), template::theme_xml()));
        parts.push(("ppt/presProps.xml".to_string(), template::pres_props_xml()));
        parts.push(("ppt/viewProps.xml".to_string(), template::view_props_xml()));
        parts.push((
            "ppt/tableStyles.xml".to_string(),
            template::table_styles_xml(),
        ));

        for (index, slide) in slides.iter().enumerate() {
            parts.push((template::slide_path(index), slide_xml(slide)?));
            parts.push((
                template::slide_rels_path(index),
                template::slide_rels_xml(slide.layout()),
            ));
        }

        Ok(parts)
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn xml_err(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// Generate the XML of a single slide.
pub(crate) fn slide_xml(slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(template::XML_DECLARATION);
    write!(xml, "<p:sld {}>", template::NS_PRESENTATION).map_err(xml_err)?;
    xml.push_str("<p:cSld>");

    // Background must precede the shape tree.
    if let Some(color) = slide.background() {
        write!(
            xml,
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            color.to_hex()
        )
        .map_err(xml_err)?;
    }

    xml.push_str("<p:spTree>");
    xml.push_str(template::GROUP_SHAPE_PROPERTIES);

    write_placeholder(
        &mut xml,
        slide.title_shape_id(),
        "Title 1",
        r#"<p:ph type="title"/>"#,
        slide.title(),
    )?;

    if let (Some(shape_id), Some(idx)) = (slide.body_shape_id(), slide.layout().body_placeholder())
    {
        write_placeholder(
            &mut xml,
            shape_id,
            &format!("Content Placeholder {}", shape_id - 1),
            &format!(r#"<p:ph idx="{}"/>"#, idx),
            slide.body_text(),
        )?;
    }

    for shape in slide.shapes() {
        let bounds = shape.bounds();
        xml.push_str("<p:sp><p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}"/>"#,
            shape.id(),
            escape(shape.name())
        )
        .map_err(xml_err)?;
        xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr>");
        xml.push_str("<p:spPr><a:xfrm>");
        write!(
            xml,
            r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
            bounds.left.0, bounds.top.0, bounds.width.0, bounds.height.0
        )
        .map_err(xml_err)?;
        xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
        xml.push_str("<p:style>");
        xml.push_str(r#"<a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef>"#);
        xml.push_str(r#"<a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef>"#);
        xml.push_str(r#"<a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef>"#);
        xml.push_str(r#"<a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef>"#);
        xml.push_str("</p:style>");
        xml.push_str(r#"<p:txBody><a:bodyPr rtlCol="0" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/></a:p></p:txBody>"#);
        xml.push_str("</p:sp>");
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sld>");
    Ok(xml)
}

/// Write a layout placeholder, empty when `text` is `None`.
fn write_placeholder(
    xml: &mut String,
    shape_id: u32,
    name: &str,
    ph: &str,
    text: Option<&str>,
) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, escape(name)).map_err(xml_err)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    write!(xml, "<p:nvPr>{}</p:nvPr>", ph).map_err(xml_err)?;
    xml.push_str("</p:nvSpPr><p:spPr/>");
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");

    match text {
        Some(text) => {
            // One paragraph per line, like a text frame assignment.
            for line in text.split('\n') {
                xml.push_str("<a:p>");
                if !line.is_empty() {
                    write!(
                        xml,
                        r#"<a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r>"#,
                        escape_text(line)
                    )
                    .map_err(xml_err)?;
                }
                xml.push_str("</a:p>");
            }
        }
        None => xml.push_str("<a:p/>"),
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

/// Escape run text. Control characters XML 1.0 cannot carry are written in
/// the OOXML `_xHHHH_` form.
fn escape_text(text: &str) -> String {
    let escaped = escape(text);
    if !escaped.chars().any(is_forbidden_control) {
        return escaped.into_owned();
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    for c in escaped.chars() {
        if is_forbidden_control(c) {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

fn is_forbidden_control(c: char) -> bool {
    (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r')
}

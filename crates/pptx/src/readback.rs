//! Reads generated packages back for assertions in tests.

use pptgen_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// What a test can observe about one slide in a package.
#[derive(Debug, Default)]
pub(crate) struct PackageSlide {
    /// File name of the layout the slide points at.
    pub layout_part: String,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Placeholder kinds present on the slide ("title", "body").
    pub placeholders: Vec<String>,
    /// Background fill as `RRGGBB`.
    pub background: Option<String>,
    /// Rectangle shapes as (x, y, cx, cy) in EMU.
    pub rectangles: Vec<(i64, i64, i64, i64)>,
}

#[derive(Debug, Default)]
struct ShapeState {
    placeholder: Option<String>,
    rect: bool,
    offset: (i64, i64),
    extent: (i64, i64),
    paragraphs: Vec<String>,
}

/// Read every slide of a package, in presentation order.
pub(crate) fn read_slides<R: Read + Seek>(reader: R) -> Result<Vec<PackageSlide>> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

    let mut slides = Vec::new();
    for slide_path in slide_order(&mut archive)? {
        let xml = read_part(&mut archive, &slide_path)?;
        let mut slide = parse_slide(&xml)?;

        let rels_path = slide_path.replace("ppt/slides/", "ppt/slides/_rels/") + ".rels";
        let rels = read_part(&mut archive, &rels_path)?;
        slide.layout_part = relationship_targets(&rels)?
            .into_iter()
            .find(|(kind, _)| kind.ends_with("/slideLayout"))
            .and_then(|(_, target)| target.rsplit('/').next().map(str::to_string))
            .unwrap_or_default();

        slides.push(slide);
    }
    Ok(slides)
}

/// Slide part paths ordered by their relationship id.
fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
    let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;

    let mut slides: Vec<(usize, String)> = Vec::new();
    let mut reader = Reader::from_str(&rels);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let id = attribute(e, b"Id").unwrap_or_default();
                let kind = attribute(e, b"Type").unwrap_or_default();
                let target = attribute(e, b"Target").unwrap_or_default();
                if kind.ends_with("/slide") {
                    let order = extract_number(&id).unwrap_or(usize::MAX);
                    slides.push((order, format!("ppt/{}", target)));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing relationships: {}", e))),
            _ => {}
        }
    }

    slides.sort();
    Ok(slides.into_iter().map(|(_, path)| path).collect())
}

/// (Type, Target) of each relationship in a .rels part.
fn relationship_targets(xml: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                out.push((
                    attribute(e, b"Type").unwrap_or_default(),
                    attribute(e, b"Target").unwrap_or_default(),
                ));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e.to_string())),
            _ => {}
        }
    }
    Ok(out)
}

fn parse_slide(xml: &str) -> Result<PackageSlide> {
    let mut slide = PackageSlide::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut shape: Option<ShapeState> = None;
    let mut in_background = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => shape = Some(ShapeState::default()),
                b"bg" => in_background = true,
                b"p" => {
                    if let Some(ref mut s) = shape {
                        s.paragraphs.push(String::new());
                    }
                }
                b"t" => in_text = true,
                b"prstGeom" => {
                    if let Some(ref mut s) = shape {
                        s.rect = attribute(e, b"prst").as_deref() == Some("rect");
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"ph" => {
                    if let Some(ref mut s) = shape {
                        let kind = match attribute(e, b"type").as_deref() {
                            Some("title") | Some("ctrTitle") => "title",
                            _ => "body",
                        };
                        s.placeholder = Some(kind.to_string());
                    }
                }
                b"off" => {
                    if let Some(ref mut s) = shape {
                        s.offset = (int_attribute(e, b"x"), int_attribute(e, b"y"));
                    }
                }
                b"ext" => {
                    if let Some(ref mut s) = shape {
                        s.extent = (int_attribute(e, b"cx"), int_attribute(e, b"cy"));
                    }
                }
                b"p" => {
                    if let Some(ref mut s) = shape {
                        s.paragraphs.push(String::new());
                    }
                }
                b"srgbClr" if in_background => {
                    slide.background = attribute(e, b"val");
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlError(err.to_string()))?;
                if let Some(paragraph) = shape.as_mut().and_then(|s| s.paragraphs.last_mut()) {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(s) = shape.take() {
                        finish_shape(&mut slide, s);
                    }
                }
                b"bg" => in_background = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e.to_string())),
            _ => {}
        }
    }

    Ok(slide)
}

fn finish_shape(slide: &mut PackageSlide, shape: ShapeState) {
    let text = shape.paragraphs.join("\n");
    let text = if text.is_empty() { None } else { Some(text) };

    match shape.placeholder.as_deref() {
        Some(kind) => {
            slide.placeholders.push(kind.to_string());
            if kind == "title" {
                slide.title = text;
            } else {
                slide.body = text;
            }
        }
        None if shape.rect => slide.rectangles.push((
            shape.offset.0,
            shape.offset.1,
            shape.extent.0,
            shape.extent.1,
        )),
        None => {}
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;
    Ok(content)
}

fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn int_attribute(e: &BytesStart, key: &[u8]) -> i64 {
    attribute(e, key).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Trailing number of a string like "rId7".
fn extract_number(s: &str) -> Option<usize> {
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.chars().rev().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("rId1"), Some(1));
        assert_eq!(extract_number("rId12"), Some(12));
        assert_eq!(extract_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }
}

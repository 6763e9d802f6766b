//! Fixed package parts and the small amount of package-level XML that
//! depends on the slide count.
//!
//! The master, layouts and theme are the bare minimum PowerPoint accepts:
//! one master with title and body placeholders, a "Title Only" and a
//! "Title and Content" layout, and an Office-style theme.

use pptgen_core::{Error, Result, SlideLayout};
use std::fmt::Write as FmtWrite;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const NS_PRESENTATION: &str =
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

pub(crate) const SLIDE_MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub(crate) const THEME_PATH: &str = "ppt/theme/theme1.xml";

/// Empty group shape header every shape tree starts with.
pub(crate) const GROUP_SHAPE_PROPERTIES: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

/// Relationship id of slide `index` (0-based) in `presentation.xml.rels`.
pub(crate) fn slide_rel_id(index: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + 1 + index)
}

pub(crate) fn slide_path(index: usize) -> String {
    format!("ppt/slides/slide{}.xml", index + 1)
}

pub(crate) fn slide_rels_path(index: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", index + 1)
}

pub(crate) fn layout_path(layout: SlideLayout) -> String {
    format!("ppt/slideLayouts/slideLayout{}.xml", layout.part_number())
}

pub(crate) fn layout_rels_path(layout: SlideLayout) -> String {
    format!(
        "ppt/slideLayouts/_rels/slideLayout{}.xml.rels",
        layout.part_number()
    )
}

fn xml_err(e: std::fmt::Error) -> Error {
    Error::XmlError(e.to_string())
}

/// `[Content_Types].xml` for a package with `slide_count` slides.
pub(crate) fn content_types_xml(slide_count: usize) -> Result<String> {
    const PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";

    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut overrides: Vec<(String, String)> = vec![
        ("/ppt/presentation.xml".into(), format!("{PML}.presentation.main+xml")),
        (format!("/{SLIDE_MASTER_PATH}"), format!("{PML}.slideMaster+xml")),
        (format!("/{THEME_PATH}"), "application/vnd.openxmlformats-officedocument.theme+xml".into()),
        ("/ppt/presProps.xml".into(), format!("{PML}.presProps+xml")),
        ("/ppt/viewProps.xml".into(), format!("{PML}.viewProps+xml")),
        ("/ppt/tableStyles.xml".into(), format!("{PML}.tableStyles+xml")),
        ("/docProps/core.xml".into(), "application/vnd.openxmlformats-package.core-properties+xml".into()),
        ("/docProps/app.xml".into(), "application/vnd.openxmlformats-officedocument.extended-properties+xml".into()),
    ];
    for layout in SlideLayout::ALL {
        overrides.push((format!("/{}", layout_path(layout)), format!("{PML}.slideLayout+xml")));
    }
    for index in 0..slide_count {
        overrides.push((format!("/{}", slide_path(index)), format!("{PML}.slide+xml")));
    }

    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="{part}" ContentType="{content_type}"/>"#
        )
        .map_err(xml_err)?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

/// `_rels/.rels`.
pub(crate) fn root_rels_xml() -> String {
    let mut xml = String::with_capacity(640);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#));
    xml.push_str(&format!(
        r#"<Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/>"#
    ));
    xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
    xml.push_str(&format!(
        r#"<Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/>"#
    ));
    xml.push_str("</Relationships>");
    xml
}

/// `ppt/presentation.xml`, listing slides in order.
pub(crate) fn presentation_xml(slide_ids: &[u32], width: i64, height: i64) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_ids.len() * 48);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<p:presentation {NS_PRESENTATION} saveSubsetFonts="1">"#).map_err(xml_err)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if !slide_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (index, id) in slide_ids.iter().enumerate() {
            write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, id, slide_rel_id(index))
                .map_err(xml_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(xml, r#"<p:sldSz cx="{width}" cy="{height}"/>"#).map_err(xml_err)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("<p:defaultTextStyle>");
    xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
    xml.push_str("</p:defaultTextStyle>");
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// `ppt/_rels/presentation.xml.rels`.
pub(crate) fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 140);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#).map_err(xml_err)?;

    let fixed = [
        ("slideMaster", "slideMasters/slideMaster1.xml"),
        ("theme", "theme/theme1.xml"),
        ("presProps", "presProps.xml"),
        ("viewProps", "viewProps.xml"),
        ("tableStyles", "tableStyles.xml"),
    ];
    for (index, (kind, target)) in fixed.iter().enumerate() {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{REL_BASE}/{kind}" Target="{target}"/>"#,
            index + 1
        )
        .map_err(xml_err)?;
    }

    for index in 0..slide_count {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{REL_BASE}/slide" Target="slides/slide{}.xml"/>"#,
            slide_rel_id(index),
            index + 1
        )
        .map_err(xml_err)?;
    }

    xml.push_str("</Relationships>");
    Ok(xml)
}

/// Relationships of a slide: just its layout.
pub(crate) fn slide_rels_xml(layout: SlideLayout) -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{NS_RELATIONSHIPS}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/></Relationships>"#,
        layout.part_number()
    )
}

/// Relationships of a layout: its master.
pub(crate) fn layout_rels_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="{NS_RELATIONSHIPS}"><Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

/// Relationships of the master: every layout, then the theme.
pub(crate) fn master_rels_xml() -> String {
    let mut xml = String::with_capacity(640);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Relationships xmlns="{NS_RELATIONSHIPS}">"#));
    for layout in SlideLayout::ALL {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout{n}.xml"/>"#,
            n = layout.part_number()
        ));
    }
    xml.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="{REL_BASE}/theme" Target="../theme/theme1.xml"/>"#,
        SlideLayout::ALL.len() + 1
    ));
    xml.push_str("</Relationships>");
    xml
}

/// `ppt/slideMasters/slideMaster1.xml`.
pub(crate) fn slide_master_xml() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!("<p:sldMaster {NS_PRESENTATION}>"));
    xml.push_str("<p:cSld>");
    xml.push_str(r#"<p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title Placeholder 1"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#);
    xml.push_str(r#"<p:spPr><a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm>"#);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0" anchor="ctr"><a:normAutofit/></a:bodyPr>"#);
    xml.push_str(r#"<a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p></p:txBody></p:sp>"#);

    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Text Placeholder 2"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr>"#);
    xml.push_str(r#"<p:spPr><a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm>"#);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"><a:normAutofit/></a:bodyPr>"#);
    xml.push_str(r#"<a:lstStyle/><a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p></p:txBody></p:sp>"#);

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#);

    xml.push_str("<p:sldLayoutIdLst>");
    for (offset, layout) in SlideLayout::ALL.iter().enumerate() {
        xml.push_str(&format!(
            r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
            2_147_483_649u32 + offset as u32,
            layout.part_number()
        ));
    }
    xml.push_str("</p:sldLayoutIdLst>");

    xml.push_str("<p:txStyles>");
    xml.push_str(r#"<p:titleStyle><a:lvl1pPr algn="ctr" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="0"/></a:spcBef><a:buNone/>"#);
    xml.push_str(r#"<a:defRPr sz="4400" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/><a:ea typeface="+mj-ea"/><a:cs typeface="+mj-cs"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#);
    xml.push_str(r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1"><a:spcBef><a:spcPct val="20000"/></a:spcBef>"#);
    xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="3200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#);
    xml.push_str(r#"<p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>"#);
    xml.push_str("</p:txStyles>");

    xml.push_str("</p:sldMaster>");
    xml
}

/// `ppt/slideLayouts/slideLayoutN.xml` for `layout`.
pub(crate) fn slide_layout_xml(layout: SlideLayout) -> String {
    let layout_type = match layout {
        SlideLayout::TitleOnly => "titleOnly",
        SlideLayout::TitleAndContent => "obj",
    };

    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<p:sldLayout {NS_PRESENTATION} type="{layout_type}" preserve="1">"#
    ));
    xml.push_str(&format!(r#"<p:cSld name="{}"><p:spTree>"#, layout.name()));
    xml.push_str(GROUP_SHAPE_PROPERTIES);

    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>"#);
    xml.push_str(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master title style</a:t></a:r></a:p></p:txBody></p:sp>"#);

    if let Some(idx) = layout.body_placeholder() {
        xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        xml.push_str(&format!(r#"<p:nvPr><p:ph idx="{idx}"/></p:nvPr></p:nvSpPr><p:spPr/>"#));
        xml.push_str(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p></p:txBody></p:sp>"#);
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sldLayout>");
    xml
}

/// `ppt/theme/theme1.xml`.
pub(crate) fn theme_xml() -> String {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#);

    xml.push_str(r#"<a:clrScheme name="Office">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    for (slot, rgb) in [
        ("dk2", "1F497D"),
        ("lt2", "EEECE1"),
        ("accent1", "4F81BD"),
        ("accent2", "C0504D"),
        ("accent3", "9BBB59"),
        ("accent4", "8064A2"),
        ("accent5", "4BACC6"),
        ("accent6", "F79646"),
        ("hlink", "0000FF"),
        ("folHlink", "800080"),
    ] {
        xml.push_str(&format!(r#"<a:{slot}><a:srgbClr val="{rgb}"/></a:{slot}>"#));
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(r#"<a:fontScheme name="Office">"#);
    xml.push_str(r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#);
    xml.push_str(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#);
    xml.push_str("</a:fontScheme>");

    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="50000"/></a:schemeClr></a:solidFill>"#);
    xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"><a:shade val="95000"/></a:schemeClr></a:solidFill>"#);
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [9525, 25400, 38100] {
        xml.push_str(&format!(
            r#"<a:ln w="{width}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"><a:shade val="95000"/></a:schemeClr></a:solidFill><a:prstDash val="solid"/></a:ln>"#
        ));
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
    xml
}

pub(crate) fn pres_props_xml() -> String {
    format!("{XML_DECLARATION}<p:presentationPr {NS_PRESENTATION}/>")
}

pub(crate) fn view_props_xml() -> String {
    format!("{XML_DECLARATION}<p:viewPr {NS_PRESENTATION}/>")
}

pub(crate) fn table_styles_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<a:tblStyleLst xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(crate) fn core_props_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>PowerPoint Presentation</dc:title><dc:creator>pptgen</dc:creator><cp:revision>1</cp:revision></cp:coreProperties>"#
    )
}

pub(crate) fn app_props_xml(slide_count: usize) -> String {
    format!(
        r#"{XML_DECLARATION}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>pptgen</Application><Slides>{slide_count}</Slides></Properties>"#
    )
}

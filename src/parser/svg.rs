//! Extraction of path data from SVG documents

use crate::error::ConvertError;

/// The attributes of the first `<path>` element in an SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgPath {
    /// Content of the `d` attribute
    pub data: String,
    /// Content of the `transform` attribute, if present
    pub transform: Option<String>,
}

/// Find the first `<path>` in document order and read its `d` and
/// `transform` attributes.
pub fn extract_path(svg: &str) -> Result<SvgPath, ConvertError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(svg, options)?;

    let path = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "path")
        .ok_or(ConvertError::NoPathElement)?;

    let data = path
        .attribute("d")
        .filter(|d| !d.is_empty())
        .ok_or(ConvertError::MissingPathData)?;

    Ok(SvgPath {
        data: data.to_string(),
        transform: path.attribute("transform").map(str::to_string),
    })
}

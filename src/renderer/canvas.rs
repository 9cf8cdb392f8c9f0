//! Project export for canvas editor shapes
//!
//! The editor hands over simple shapes in canvas pixels (y axis pointing
//! down). Each supported shape becomes one `<Shape>` element with direct
//! attributes; no vertex geometry is generated.

use std::path::Path;

use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{CanvasSettings, ConvertConfig};
use crate::geometry::{format_number, Affine};

use super::backup_path::xform_element;
use super::project::{project_root, write_project};
use super::xml::XmlElement;

/// 1x1 transparent PNG used when no thumbnail is supplied
pub const DEFAULT_THUMBNAIL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Font description for text shapes: family, point size, pixel size,
/// style hint, weight, italic flag, then four unused flags
fn font_descriptor(family: &str, style: &str) -> String {
    let style = style.to_ascii_lowercase();
    let weight = if style.contains("bold") { 75 } else { 50 };
    let italic = if style.contains("italic") || style.contains("oblique") {
        1
    } else {
        0
    };
    format!("{},-1,100,5,{},{},0,0,0,0", family, weight, italic)
}

/// Errors that can occur when loading a shape list
#[derive(Error, Debug)]
pub enum ShapesError {
    #[error("Failed to read shapes file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse shapes TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("shape '{id}' ({kind}) is missing '{field}'")]
    MissingField {
        id: String,
        kind: &'static str,
        field: &'static str,
    },
}

/// Placement shared by every canvas shape
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeBase {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Clockwise degrees on the canvas
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub cut_index: u32,
}

/// Type-specific shape fields
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect {
        width: f64,
        height: f64,
    },
    Circle {
        radius: f64,
    },
    Text {
        text: String,
        font_size: f64,
        font_family: String,
        font_style: String,
    },
    /// Accepted for completeness; not exported
    Polygon {
        sides: u32,
        radius: f64,
    },
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect { .. } => "Rect",
            ShapeKind::Circle { .. } => "Circle",
            ShapeKind::Text { .. } => "Text",
            ShapeKind::Polygon { .. } => "Polygon",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasShape {
    pub base: ShapeBase,
    pub kind: ShapeKind,
}

/// TOML structure for deserializing shape lists
#[derive(Deserialize)]
struct TomlShapes {
    #[serde(default)]
    shape: Vec<TomlShape>,
}

#[derive(Deserialize, Clone, Copy)]
enum TomlShapeType {
    #[serde(alias = "rect")]
    Rect,
    #[serde(alias = "circle")]
    Circle,
    #[serde(alias = "text")]
    Text,
    #[serde(alias = "polygon")]
    Polygon,
}

#[derive(Deserialize)]
struct TomlShape {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: TomlShapeType,
    x: f64,
    y: f64,
    rotation: Option<f64>,
    scale_x: Option<f64>,
    scale_y: Option<f64>,
    cut_index: Option<u32>,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    sides: Option<u32>,
    text: Option<String>,
    font_size: Option<f64>,
    font_family: Option<String>,
    font_style: Option<String>,
}

impl TomlShape {
    fn into_shape(self) -> Result<CanvasShape, ShapesError> {
        let id = self.id;
        let require = |value: Option<f64>, kind: &'static str, field: &'static str| {
            value.ok_or_else(|| ShapesError::MissingField {
                id: id.clone(),
                kind,
                field,
            })
        };

        let kind = match self.kind {
            TomlShapeType::Rect => ShapeKind::Rect {
                width: require(self.width, "Rect", "width")?,
                height: require(self.height, "Rect", "height")?,
            },
            TomlShapeType::Circle => ShapeKind::Circle {
                radius: require(self.radius, "Circle", "radius")?,
            },
            TomlShapeType::Text => ShapeKind::Text {
                text: self.text.unwrap_or_default(),
                font_size: self.font_size.unwrap_or(30.0),
                font_family: self.font_family.unwrap_or_else(|| "Arial".to_string()),
                font_style: self.font_style.unwrap_or_else(|| "normal".to_string()),
            },
            TomlShapeType::Polygon => ShapeKind::Polygon {
                sides: self.sides.unwrap_or(3),
                radius: require(self.radius, "Polygon", "radius")?,
            },
        };

        Ok(CanvasShape {
            base: ShapeBase {
                id,
                x: self.x,
                y: self.y,
                rotation: self.rotation.unwrap_or(0.0),
                scale_x: self.scale_x.unwrap_or(1.0),
                scale_y: self.scale_y.unwrap_or(1.0),
                cut_index: self.cut_index.unwrap_or(0),
            },
            kind,
        })
    }
}

/// Load a shape list from a TOML file of `[[shape]]` tables
pub fn shapes_from_file(path: &Path) -> Result<Vec<CanvasShape>, ShapesError> {
    let content = std::fs::read_to_string(path)?;
    shapes_from_str(&content)
}

/// Load a shape list from TOML text
pub fn shapes_from_str(content: &str) -> Result<Vec<CanvasShape>, ShapesError> {
    let parsed: TomlShapes = toml::from_str(content)?;
    parsed.shape.into_iter().map(TomlShape::into_shape).collect()
}

/// Encode PNG bytes as a data URI for the project thumbnail
pub fn thumbnail_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Shape centre and size in project units
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    cx: f64,
    cy: f64,
    width: f64,
    height: f64,
}

/// Convert canvas pixels to project units, flipping the y axis.
///
/// Rects and circles are placed by their centre; text keeps its anchor.
fn place(shape: &CanvasShape, canvas: &CanvasSettings) -> Placement {
    let base = &shape.base;
    let k = canvas.scale;
    let centred = |w: f64, h: f64| Placement {
        cx: (base.x + w * base.scale_x / 2.0) / k,
        cy: (canvas.height - (base.y + h * base.scale_y / 2.0)) / k,
        width: w / k,
        height: h / k,
    };

    match &shape.kind {
        ShapeKind::Rect { width, height } => centred(*width, *height),
        ShapeKind::Circle { radius } | ShapeKind::Polygon { radius, .. } => {
            centred(*radius, *radius)
        }
        ShapeKind::Text { font_size, .. } => Placement {
            cx: base.x / k,
            cy: (canvas.height - base.y) / k,
            width: 0.0,
            height: font_size / k,
        },
    }
}

/// Build the `<Shape>` element for one canvas shape, or `None` when the
/// shape type has no direct project representation
pub fn shape_element(shape: &CanvasShape, canvas: &CanvasSettings) -> Option<XmlElement> {
    let base = &shape.base;
    let p = place(shape, canvas);
    let cut_index = base.cut_index.to_string();

    let element = match &shape.kind {
        ShapeKind::Rect { .. } => XmlElement::new("Shape")
            .with_attr("Type", "Rect")
            .with_attr("CutIndex", cut_index)
            .with_attr("W", format_number(p.width))
            .with_attr("H", format_number(p.height))
            .with_attr("Rad", "0"),
        ShapeKind::Circle { .. } => XmlElement::new("Shape")
            .with_attr("Type", "Ellipse")
            .with_attr("CutIndex", cut_index)
            .with_attr("Rx", format_number(p.width))
            .with_attr("Ry", format_number(p.height)),
        ShapeKind::Text {
            text,
            font_family,
            font_style,
            ..
        } => XmlElement::new("Shape")
            .with_attr("Type", "Text")
            .with_attr("CutIndex", cut_index)
            .with_attr("Font", font_descriptor(font_family, font_style))
            .with_attr("Str", text.as_str())
            .with_attr("H", format_number(p.height))
            .with_attr("LS", "0")
            .with_attr("LnS", "0")
            .with_attr("Ah", "0")
            .with_attr("Av", "0")
            .with_attr("Weld", "0"),
        ShapeKind::Polygon { .. } => return None,
    };

    // Canvas rotation is clockwise with y down; the project frame is y up
    let xform = Affine::from_scale_rotation_translation(
        base.scale_x,
        base.scale_y,
        -base.rotation,
        p.cx,
        p.cy,
    );

    Some(
        element
            .with_attr("HasBackupPath", "0")
            .with_child(xform_element(&xform)),
    )
}

/// Build a complete project document for a list of canvas shapes.
///
/// `thumbnail` is a data URI; [`DEFAULT_THUMBNAIL`] is used when absent.
/// Shapes without a project representation are skipped with a warning.
pub fn export_canvas(
    shapes: &[CanvasShape],
    thumbnail: Option<&str>,
    config: &ConvertConfig,
) -> String {
    let mut project = project_root(config)
        .with_child(
            XmlElement::new("Thumbnail").with_attr("Source", thumbnail.unwrap_or(DEFAULT_THUMBNAIL)),
        )
        .with_child(XmlElement::new("VariableText"))
        .with_child(XmlElement::new("UIPrefs"))
        .with_child(XmlElement::new("CutSettings"));

    let mut exported = 0;
    for shape in shapes {
        match shape_element(shape, &config.canvas) {
            Some(element) => {
                project.push_child(element);
                exported += 1;
            }
            None => log::warn!(
                "skipping shape '{}': {} shapes are not exported",
                shape.base.id,
                shape.kind.name()
            ),
        }
    }

    project.push_child(
        XmlElement::new("Notes")
            .with_attr("ShowOnLoad", "0")
            .with_attr("Notes", ""),
    );

    log::info!(
        "exported {} of {} canvas shape(s)",
        exported,
        shapes.len()
    );
    write_project(&project, config.output.pretty_print)
}

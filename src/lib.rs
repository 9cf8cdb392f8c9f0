//! svg-lbrn - SVG path to LightBurn geometry conversion
//!
//! This library parses the first `<path>` of an SVG document, rebuilds it as
//! LightBurn vertex/edge geometry, and writes it as a `BackupPath` fragment
//! or merges it into a `.lbrn` project.
//!
//! # Example
//!
//! ```rust
//! use svg_lbrn::svg_to_backup_path;
//!
//! let xml = svg_to_backup_path(r#"<svg><path d="M0,0 L10,0"/></svg>"#, 0).unwrap();
//! assert!(xml.contains("<BackupPath"));
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod renderer;

use std::path::Path;

pub use config::{ConfigError, ConvertConfig};
pub use error::ConvertError;
pub use geometry::{
    apply_transform, build_connections, build_vertices, Affine, Closure, Connection,
    ConnectionKind, Point, Vertex, VertexPath,
};
pub use parser::{extract_path, parse_transform, tokenize, PathCommand};
pub use renderer::{export_canvas, CanvasShape, ShapesError, XmlElement};

use renderer::project;

/// Geometry produced from one SVG path
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Matrix parsed from the path's `transform` attribute
    pub transform: Affine,
    /// Vertices with the transform already applied
    pub path: VertexPath,
    pub connections: Vec<Connection>,
}

impl Conversion {
    /// The `<BackupPath>` element for this geometry
    pub fn to_element(&self, cut_index: u32) -> XmlElement {
        renderer::backup_path_element(&self.path, &self.connections, &self.transform, cut_index)
    }
}

/// Convert raw path data and an optional transform attribute.
///
/// Never fails: unsupported commands and transforms degrade to no-ops and
/// the identity matrix.
pub fn convert_path(data: &str, transform: Option<&str>) -> Conversion {
    let transform = parse_transform(transform);
    if !transform.is_identity() {
        log::debug!("applying transform {}", transform);
    }
    let commands = tokenize(data);
    let path = build_vertices(&commands).transformed(&transform);
    let connections = build_connections(&path);

    log::debug!(
        "converted {} command(s) into {} vertices and {} connections ({:?})",
        commands.len(),
        path.len(),
        connections.len(),
        path.closure
    );

    Conversion {
        transform,
        path,
        connections,
    }
}

/// Convert the first `<path>` of an SVG document
pub fn convert_svg(svg: &str) -> Result<Conversion, ConvertError> {
    let svg_path = parser::extract_path(svg)?;
    Ok(convert_path(&svg_path.data, svg_path.transform.as_deref()))
}

/// Render SVG content as a `BackupPath` fragment with default configuration
pub fn svg_to_backup_path(svg: &str, cut_index: u32) -> Result<String, ConvertError> {
    svg_to_backup_path_with_config(svg, cut_index, &ConvertConfig::default())
}

/// Render SVG content as a `BackupPath` fragment
///
/// # Example
///
/// ```rust
/// use svg_lbrn::{svg_to_backup_path_with_config, ConvertConfig};
///
/// let config = ConvertConfig::new().with_pretty_print(false);
/// let xml = svg_to_backup_path_with_config(
///     r#"<svg><path d="M0,0 C1,1,2,2,3,3"/></svg>"#,
///     1,
///     &config,
/// )
/// .unwrap();
/// assert!(xml.starts_with(r#"<BackupPath Type="Path" CutIndex="1">"#));
/// assert!(xml.contains(r#"<P T="B" p0="0" p1="1"/>"#));
/// ```
pub fn svg_to_backup_path_with_config(
    svg: &str,
    cut_index: u32,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let conversion = convert_svg(svg)?;
    Ok(conversion
        .to_element(cut_index)
        .to_xml(config.output.pretty_print))
}

/// Read an SVG file and render its first path as a `BackupPath` fragment
pub fn svg_file_to_backup_path(
    svg_file: &Path,
    cut_index: u32,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let svg = std::fs::read_to_string(svg_file).map_err(|e| ConvertError::io(svg_file, e))?;
    svg_to_backup_path_with_config(&svg, cut_index, config)
}

/// Merge the first path of `svg` into a project document.
///
/// `existing` is the current project text; a new project is scaffolded when
/// it is `None`. Returns the complete serialized project.
pub fn merge_into_document(
    existing: Option<&str>,
    svg: &str,
    cut_index: u32,
    config: &ConvertConfig,
) -> Result<String, ConvertError> {
    let conversion = convert_svg(svg)?;

    let mut document = match existing {
        Some(text) => {
            let mut document = project::load_project(text)?;
            if project::ensure_cut_setting(&mut document, cut_index, &config.cut_setting) {
                log::info!("added cut setting for index {}", cut_index);
            }
            document
        }
        None => project::scaffold_project(cut_index, config),
    };

    project::merge_backup_path(
        &mut document,
        conversion.to_element(cut_index),
        &conversion.transform,
        cut_index,
    );

    Ok(project::write_project(&document, config.output.pretty_print))
}

/// Merge the first path of an SVG file into a project file, creating the
/// project when it does not exist.
///
/// The target file is only written once the whole document has been
/// assembled. Concurrent merges into the same file must be serialized by
/// the caller.
pub fn merge_into_project(
    svg_file: &Path,
    lbrn_file: &Path,
    cut_index: u32,
    config: &ConvertConfig,
) -> Result<(), ConvertError> {
    let svg = std::fs::read_to_string(svg_file).map_err(|e| ConvertError::io(svg_file, e))?;

    let existing = if lbrn_file.exists() {
        let text =
            std::fs::read_to_string(lbrn_file).map_err(|e| ConvertError::io(lbrn_file, e))?;
        Some(text)
    } else {
        log::info!("creating new project {}", lbrn_file.display());
        None
    };

    let output = merge_into_document(existing.as_deref(), &svg, cut_index, config)?;
    std::fs::write(lbrn_file, output).map_err(|e| ConvertError::io(lbrn_file, e))?;
    Ok(())
}

/// [`merge_into_project`] reporting failure as `false`.
///
/// Errors are logged rather than returned.
pub fn update_project_file(
    svg_file: &Path,
    lbrn_file: &Path,
    cut_index: u32,
    config: &ConvertConfig,
) -> bool {
    match merge_into_project(svg_file, lbrn_file, cut_index, config) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Error updating LBRN file: {}", e);
            false
        }
    }
}

//! LightBurn project documents: scaffolding and merging of path fragments

use crate::config::{ConvertConfig, CutSettingDefaults};
use crate::error::ConvertError;
use crate::geometry::{format_number, Affine};

use super::backup_path::xform_element;
use super::xml::{parse_document, XmlElement, XML_DECLARATION};

/// Root element name of a project document
pub const PROJECT_ROOT: &str = "LightBurnProject";

/// Create an empty project with a single cut setting for `cut_index`
pub fn scaffold_project(cut_index: u32, config: &ConvertConfig) -> XmlElement {
    project_root(config).with_child(cut_setting(cut_index, &config.cut_setting))
}

/// The project root element with placeholder machine attributes
pub fn project_root(config: &ConvertConfig) -> XmlElement {
    XmlElement::new(PROJECT_ROOT)
        .with_attr("AppVersion", config.project.app_version.as_str())
        .with_attr("DeviceName", config.project.device_name.as_str())
        .with_attr("FormatVersion", "0")
        .with_attr("MaterialHeight", "0")
        .with_attr("MirrorX", "False")
        .with_attr("MirrorY", "False")
}

/// A `CutSetting` block named `C<NN>` after its index
pub fn cut_setting(cut_index: u32, defaults: &CutSettingDefaults) -> XmlElement {
    let value = |name: &str, v: String| XmlElement::new(name).with_attr("Value", v);

    XmlElement::new("CutSetting")
        .with_attr("type", "Cut")
        .with_child(value("index", cut_index.to_string()))
        .with_child(value("name", format!("C{:02}", cut_index)))
        .with_child(value("maxPower", format_number(defaults.max_power)))
        .with_child(value("maxPower2", format_number(defaults.max_power2)))
        .with_child(value("speed", format_number(defaults.speed)))
        .with_child(value("priority", defaults.priority.to_string()))
}

/// Load a project from text, checking the root element
pub fn load_project(text: &str) -> Result<XmlElement, ConvertError> {
    let root = parse_document(text)?;
    if root.name != PROJECT_ROOT {
        return Err(ConvertError::InvalidProject(format!(
            "expected root element <{}>, found <{}>",
            PROJECT_ROOT, root.name
        )));
    }
    Ok(root)
}

/// Make sure the project defines a cut setting for `cut_index`.
///
/// A missing setting is inserted before the first `Shape`, or appended when
/// the project has no shapes. Returns whether a setting was created.
pub fn ensure_cut_setting(
    project: &mut XmlElement,
    cut_index: u32,
    defaults: &CutSettingDefaults,
) -> bool {
    let exists = project.elements().any(|e| {
        e.name == "CutSetting"
            && e.child("index")
                .and_then(|i| i.attr("Value"))
                .and_then(|v| v.trim().parse::<u32>().ok())
                == Some(cut_index)
    });
    if exists {
        return false;
    }

    let setting = cut_setting(cut_index, defaults);
    match project.child_position("Shape") {
        Some(index) => project.insert_child(index, setting),
        None => project.push_child(setting),
    }
    true
}

/// Embed a `BackupPath` fragment into the project.
///
/// The target is the first `Shape` flagged `HasBackupPath="1"` anywhere in
/// the document; one is appended to the root when none exists. Previous
/// `BackupPath` children of that shape are replaced, and the shape's own
/// `XForm` is set to `transform` so both copies agree.
pub fn merge_backup_path(
    project: &mut XmlElement,
    fragment: XmlElement,
    transform: &Affine,
    cut_index: u32,
) {
    let has_backup = |e: &XmlElement| e.name == "Shape" && e.attr("HasBackupPath") == Some("1");

    if project.find(&has_backup).is_none() {
        log::debug!("creating shape for cut index {}", cut_index);
        project.push_child(
            XmlElement::new("Shape")
                .with_attr("Type", "Path")
                .with_attr("CutIndex", cut_index.to_string())
                .with_attr("HasBackupPath", "1"),
        );
    }

    let Some(shape) = project.find_mut(&has_backup) else {
        return;
    };

    let removed = shape.remove_children("BackupPath");
    if removed > 0 {
        log::debug!("replacing {} existing BackupPath element(s)", removed);
    }
    shape.push_child(fragment);

    match shape.child_mut("XForm") {
        Some(xform) => xform.set_text(transform.to_string()),
        None => shape.insert_child(0, xform_element(transform)),
    }
}

/// Serialize a project with the XML declaration header
pub fn write_project(project: &XmlElement, pretty: bool) -> String {
    format!("{}\n{}\n", XML_DECLARATION, project.to_xml(pretty))
}

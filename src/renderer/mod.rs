//! LightBurn output generation
//!
//! This module turns converted geometry into `BackupPath` fragments, merges
//! fragments into project documents, and exports canvas shapes as
//! projects.

pub mod backup_path;
pub mod canvas;
pub mod project;
pub mod xml;

pub use backup_path::backup_path_element;
pub use canvas::{export_canvas, CanvasShape, ShapeBase, ShapeKind, ShapesError};
pub use xml::{XmlElement, XmlNode};

//! Geometry stages of the conversion: vertices, transforms, and edges

mod connections;
mod transform;
pub mod types;
mod vertices;

pub use connections::build_connections;
pub use transform::apply_transform;
pub use types::{
    format_number, Affine, Closure, Connection, ConnectionKind, Point, Vertex, VertexPath,
};
pub use vertices::{build_vertices, close_path, step, PenState, Segment};

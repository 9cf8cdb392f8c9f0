//! `BackupPath` fragment generation

use crate::geometry::{format_number, Affine, Connection, Vertex, VertexPath};

use super::xml::XmlElement;

/// Build the `<BackupPath>` element for a transformed vertex path.
///
/// Children are the `XForm`, then one `V` per vertex, then one `P` per
/// connection, each in sequence order.
pub fn backup_path_element(
    path: &VertexPath,
    connections: &[Connection],
    transform: &Affine,
    cut_index: u32,
) -> XmlElement {
    let mut element = XmlElement::new("BackupPath")
        .with_attr("Type", "Path")
        .with_attr("CutIndex", cut_index.to_string())
        .with_child(xform_element(transform));

    for vertex in &path.vertices {
        element.push_child(vertex_element(vertex));
    }

    for connection in connections {
        element.push_child(
            XmlElement::new("P")
                .with_attr("T", connection.kind.tag())
                .with_attr("p0", connection.p0.to_string())
                .with_attr("p1", connection.p1.to_string()),
        );
    }

    element
}

/// `<XForm>a b c d e f</XForm>`
pub fn xform_element(transform: &Affine) -> XmlElement {
    XmlElement::new("XForm").with_text(transform.to_string())
}

fn vertex_element(vertex: &Vertex) -> XmlElement {
    let mut element = XmlElement::new("V")
        .with_attr("vx", format_number(vertex.x))
        .with_attr("vy", format_number(vertex.y));

    if let Some(c0) = vertex.c0 {
        element.set_attr("c0x", format_number(c0.x));
        element.set_attr("c0y", format_number(c0.y));
    }
    if let Some(c1) = vertex.c1 {
        element.set_attr("c1x", format_number(c1.x));
        element.set_attr("c1y", format_number(c1.y));
    }

    element
}

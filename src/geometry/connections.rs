//! Edge derivation between consecutive vertices

use super::types::{Closure, Connection, ConnectionKind, Vertex, VertexPath};

/// Derive the edge list for a vertex path.
///
/// Consecutive vertices are always joined. An explicitly closed path also
/// gets one wraparound edge from the last vertex back to the first.
pub fn build_connections(path: &VertexPath) -> Vec<Connection> {
    let vertices = &path.vertices;
    let mut connections: Vec<Connection> = vertices
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Connection::new(classify(&pair[0], &pair[1]), i, i + 1))
        .collect();

    if path.closure == Closure::Explicit {
        if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
            let last_index = vertices.len() - 1;
            connections.push(Connection::new(classify(last, first), last_index, 0));
        }
    }

    connections
}

/// Bezier when the leaving vertex has an outgoing control point or the
/// arriving vertex has an incoming one
fn classify(from: &Vertex, to: &Vertex) -> ConnectionKind {
    if from.c0.is_some() || to.c1.is_some() {
        ConnectionKind::Bezier
    } else {
        ConnectionKind::Line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_vertices;
    use crate::geometry::types::Point;
    use crate::parser::tokenize;
    use pretty_assertions::assert_eq;

    use ConnectionKind::{Bezier, Line};

    fn edges(d: &str) -> Vec<(usize, usize, ConnectionKind)> {
        build_connections(&build_vertices(&tokenize(d)))
            .into_iter()
            .map(|c| (c.p0, c.p1, c.kind))
            .collect()
    }

    #[test]
    fn test_open_segment() {
        assert_eq!(edges("M0,0 L10,0"), vec![(0, 1, Line)]);
    }

    #[test]
    fn test_forced_closure_has_no_wraparound() {
        assert_eq!(
            edges("M0,0 L10,0 L10,10 L0,10"),
            vec![(0, 1, Line), (1, 2, Line), (2, 3, Line), (3, 4, Line)]
        );
    }

    #[test]
    fn test_explicit_close_adds_one_wraparound() {
        assert_eq!(
            edges("M0,0 L10,0 L10,10 Z"),
            vec![(0, 1, Line), (1, 2, Line), (2, 0, Line)]
        );
    }

    #[test]
    fn test_closed_segment_is_not_doubled() {
        assert_eq!(edges("M0 0 L10 0 Z"), vec![(0, 1, Line)]);
    }

    #[test]
    fn test_inner_close_adds_no_subpath_edge() {
        assert_eq!(
            edges("M0 0 L10 0 L10 10 Z M20 0 L30 0"),
            vec![(0, 1, Line), (1, 2, Line), (2, 3, Line), (3, 4, Line), (4, 5, Line)]
        );
    }

    #[test]
    fn test_bezier_classification() {
        assert_eq!(edges("M0,0 C1,1,2,2,3,3"), vec![(0, 1, Bezier)]);
    }

    #[test]
    fn test_mixed_path() {
        assert_eq!(
            edges("M0 0 L10 0 C12 0 14 2 14 4 L0 4"),
            vec![(0, 1, Line), (1, 2, Bezier), (2, 3, Line), (3, 4, Line)]
        );
    }

    #[test]
    fn test_wraparound_classified_from_endpoints() {
        let path = VertexPath {
            vertices: vec![
                Vertex {
                    x: 0.0,
                    y: 0.0,
                    c0: None,
                    c1: Some(Point::new(-1.0, 1.0)),
                },
                Vertex::plain(5.0, 0.0),
                Vertex::plain(5.0, 5.0),
            ],
            closure: Closure::Explicit,
        };
        let connections = build_connections(&path);
        assert_eq!(connections[2], Connection::new(Bezier, 2, 0));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(edges("").is_empty());
        assert!(edges("M1 1").is_empty());
    }
}

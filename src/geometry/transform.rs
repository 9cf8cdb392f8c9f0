//! Application of affine transforms to vertex sequences

use super::types::{Affine, Vertex, VertexPath};

/// Map every point and every present control point through `matrix`.
///
/// Vertices are neither added nor dropped; absent control points stay
/// absent.
pub fn apply_transform(vertices: &[Vertex], matrix: &Affine) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let p = matrix.apply(v.point());
            Vertex {
                x: p.x,
                y: p.y,
                c0: v.c0.map(|c| matrix.apply(c)),
                c1: v.c1.map(|c| matrix.apply(c)),
            }
        })
        .collect()
}

impl VertexPath {
    /// A copy of this path with `matrix` applied; the closure is preserved
    pub fn transformed(&self, matrix: &Affine) -> VertexPath {
        VertexPath {
            vertices: apply_transform(&self.vertices, matrix),
            closure: self.closure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::types::{Closure, Point};

    fn sample() -> Vec<Vertex> {
        vec![
            Vertex {
                x: 0.0,
                y: 0.0,
                c0: Some(Point::new(1.0, 1.0)),
                c1: None,
            },
            Vertex {
                x: 3.5,
                y: -2.25,
                c0: None,
                c1: Some(Point::new(2.0, 2.0)),
            },
            Vertex::plain(10.0, 0.0),
        ]
    }

    #[test]
    fn test_identity_is_noop() {
        let vertices = sample();
        assert_eq!(apply_transform(&vertices, &Affine::IDENTITY), vertices);
    }

    #[test]
    fn test_scale_and_translate() {
        let m = Affine::new(2.0, 0.0, 0.0, 2.0, 10.0, 5.0);
        let out = apply_transform(&sample(), &m);
        assert_eq!(out[0].point(), Point::new(10.0, 5.0));
        assert_eq!(out[0].c0, Some(Point::new(12.0, 7.0)));
        assert_eq!(out[1].point(), Point::new(17.0, 0.5));
        assert_eq!(out[1].c1, Some(Point::new(14.0, 9.0)));
        assert_eq!(out[2].c0, None);
        assert_eq!(out[2].c1, None);
    }

    #[test]
    fn test_length_preserved() {
        let m = Affine::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0);
        assert_eq!(apply_transform(&sample(), &m).len(), 3);
        assert!(apply_transform(&[], &m).is_empty());
    }

    #[test]
    fn test_transformed_keeps_closure() {
        let path = VertexPath {
            vertices: sample(),
            closure: Closure::Explicit,
        };
        let moved = path.transformed(&Affine::new(1.0, 0.0, 0.0, 1.0, 1.0, 1.0));
        assert_eq!(moved.closure, Closure::Explicit);
        assert_eq!(moved.vertices[2].point(), Point::new(11.0, 1.0));
    }
}

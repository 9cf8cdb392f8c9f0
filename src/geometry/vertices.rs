//! Conversion of path commands into an ordered vertex sequence
//!
//! Commands are folded through an explicit [`PenState`]. Each drawing step
//! yields [`Segment`]s: an endpoint, the incoming control point at that
//! endpoint, and the outgoing control point that belongs to the vertex the
//! segment leaves from. Outgoing control points are attached by index when
//! the segments are finalized into [`Vertex`] values, so no vertex is
//! revisited after it has been produced.

use crate::parser::PathCommand;

use super::types::{Closure, Point, Vertex, VertexPath};

/// Cumulative path state threaded through the command fold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PenState {
    /// Current point; relative coordinates resolve against it
    pub current: Point,
    /// Start of the current subpath, restored by a close command
    pub subpath_start: Point,
}

/// One vertex-producing step of the fold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub end: Point,
    /// Control point at `end` for the curve arriving there
    pub arriving: Option<Point>,
    /// Control point at the previous vertex for the curve leaving it
    pub leaving: Option<Point>,
}

impl Segment {
    fn line(end: Point) -> Self {
        Self {
            end,
            arriving: None,
            leaving: None,
        }
    }
}

/// Build the vertex sequence for a command list, starting from `(0, 0)`.
///
/// Only `M`, `L`, `H`, `V`, `C` and `Z` (either case) contribute geometry.
/// See [`close_path`] for how the closure is decided.
pub fn build_vertices(commands: &[PathCommand]) -> VertexPath {
    let (_, segments) = commands.iter().fold(
        (PenState::default(), Vec::new()),
        |(state, mut segments), cmd| {
            let (next, produced) = step(state, cmd);
            segments.extend(produced);
            (next, segments)
        },
    );

    let vertices = finalize(&segments);
    let closed_by_command = commands.last().is_some_and(PathCommand::is_close);
    close_path(vertices, closed_by_command)
}

/// Apply one command to the pen state.
///
/// Parameter lists holding several groups (`L 1 2 3 4`) are split into one
/// step per group. A trailing incomplete group is ignored.
pub fn step(state: PenState, cmd: &PathCommand) -> (PenState, Vec<Segment>) {
    let relative = cmd.is_relative();
    let mut state = state;
    let mut segments = Vec::new();

    // Commands that are not converted still move the pen to their endpoint
    let (arity, draws) = match cmd.command.to_ascii_uppercase() {
        'M' | 'L' => (2, true),
        'H' | 'V' => (1, true),
        'C' => (6, true),
        'S' | 'Q' => (4, false),
        'T' => (2, false),
        'A' => (7, false),
        'Z' => {
            state.current = state.subpath_start;
            return (state, segments);
        }
        other => {
            log::debug!("ignoring unknown path command '{}'", other);
            return (state, segments);
        }
    };
    if !draws {
        log::debug!(
            "'{}' is not converted, only advancing the current point",
            cmd.command
        );
    }

    let groups = cmd.params.chunks_exact(arity);
    if !groups.remainder().is_empty() {
        log::warn!(
            "'{}' has {} parameters, ignoring trailing {}",
            cmd.command,
            cmd.params.len(),
            groups.remainder().len()
        );
    }

    let resolve = |origin: Point, x: f64, y: f64| {
        if relative {
            origin.offset(x, y)
        } else {
            Point::new(x, y)
        }
    };

    for (i, group) in groups.enumerate() {
        if !draws {
            state.current = resolve(state.current, group[arity - 2], group[arity - 1]);
            continue;
        }

        let segment = match (cmd.command.to_ascii_uppercase(), group) {
            ('M', &[x, y]) => {
                let p = resolve(state.current, x, y);
                // Pairs after the first are implicit line-tos
                if i == 0 {
                    state.subpath_start = p;
                }
                Segment::line(p)
            }
            ('L', &[x, y]) => Segment::line(resolve(state.current, x, y)),
            ('H', &[x]) => {
                let x = if relative { state.current.x + x } else { x };
                Segment::line(Point::new(x, state.current.y))
            }
            ('V', &[y]) => {
                let y = if relative { state.current.y + y } else { y };
                Segment::line(Point::new(state.current.x, y))
            }
            ('C', &[x1, y1, x2, y2, x, y]) => {
                let origin = state.current;
                Segment {
                    end: resolve(origin, x, y),
                    arriving: Some(resolve(origin, x2, y2)),
                    leaving: Some(resolve(origin, x1, y1)),
                }
            }
            _ => continue,
        };
        state.current = segment.end;
        segments.push(segment);
    }

    (state, segments)
}

/// Turn segments into vertices. The outgoing control point of vertex `i`
/// is the `leaving` point of segment `i + 1`; a `leaving` point on the first
/// segment has no vertex to attach to and is dropped.
fn finalize(segments: &[Segment]) -> Vec<Vertex> {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| Vertex {
            x: seg.end.x,
            y: seg.end.y,
            c0: segments.get(i + 1).and_then(|next| next.leaving),
            c1: seg.arriving,
        })
        .collect()
}

/// Decide how the vertex sequence closes.
///
/// - fewer than two vertices: open
/// - ended by a close command on meeting endpoints: coincident
/// - two vertices: open, a single segment even after a close command
/// - ended by a close command: explicit (a wraparound edge is needed)
/// - otherwise: coincident, appending a copy of the first point when the
///   endpoints differ
pub fn close_path(mut vertices: Vec<Vertex>, closed_by_command: bool) -> VertexPath {
    let ends = match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() >= 2 => Some((first.point(), last.point())),
        _ => None,
    };

    let closure = match ends {
        None => Closure::Open,
        Some((first, last)) => {
            let meets = first.coincides(&last);
            if closed_by_command && meets {
                Closure::Coincident
            } else if vertices.len() < 3 {
                Closure::Open
            } else if closed_by_command {
                Closure::Explicit
            } else if meets {
                Closure::Coincident
            } else {
                vertices.push(Vertex::plain(first.x, first.y));
                Closure::Coincident
            }
        }
    };

    VertexPath { vertices, closure }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use pretty_assertions::assert_eq;

    fn build(d: &str) -> VertexPath {
        build_vertices(&tokenize(d))
    }

    fn points(path: &VertexPath) -> Vec<(f64, f64)> {
        path.vertices.iter().map(|v| (v.x, v.y)).collect()
    }

    #[test]
    fn test_two_vertices_stay_open() {
        let path = build("M0,0 L10,0");
        assert_eq!(points(&path), vec![(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(path.closure, Closure::Open);
    }

    #[test]
    fn test_forced_closure() {
        let path = build("M0,0 L10,0 L10,10 L0,10");
        assert_eq!(
            points(&path),
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]
        );
        assert_eq!(path.closure, Closure::Coincident);
        assert_eq!(path.vertices[4], Vertex::plain(0.0, 0.0));
    }

    #[test]
    fn test_already_closed_not_duplicated() {
        let path = build("M0,0 L10,0 L10,10 L0,0");
        assert_eq!(path.len(), 4);
        assert_eq!(path.closure, Closure::Coincident);
    }

    #[test]
    fn test_explicit_close() {
        let path = build("M0,0 L10,0 L10,10 Z");
        assert_eq!(path.len(), 3);
        assert_eq!(path.closure, Closure::Explicit);
    }

    #[test]
    fn test_close_on_coincident_endpoints() {
        let path = build("M0,0 L10,0 L10,10 L0,0 Z");
        assert_eq!(path.len(), 4);
        assert_eq!(path.closure, Closure::Coincident);
    }

    #[test]
    fn test_cubic_control_points() {
        let path = build("M0,0 C1,1,2,2,3,3");
        assert_eq!(path.len(), 2);
        assert_eq!(path.vertices[0].c0, Some(Point::new(1.0, 1.0)));
        assert_eq!(path.vertices[0].c1, None);
        assert_eq!(path.vertices[1].point(), Point::new(3.0, 3.0));
        assert_eq!(path.vertices[1].c1, Some(Point::new(2.0, 2.0)));
        assert_eq!(path.vertices[1].c0, None);
        assert_eq!(path.closure, Closure::Open);
    }

    #[test]
    fn test_cubic_without_previous_vertex() {
        let path = build("C1,1,2,2,3,3");
        assert_eq!(path.len(), 1);
        assert_eq!(path.vertices[0].c0, None);
        assert_eq!(path.vertices[0].c1, Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_repeated_line_groups() {
        let path = build("M0 0 L10 0 10 10");
        assert_eq!(path.len(), 4);
        assert_eq!(path.vertices[2].point(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_move_with_implicit_lines() {
        let path = build("M0 0 5 0");
        assert_eq!(points(&path), vec![(0.0, 0.0), (5.0, 0.0)]);
    }

    #[test]
    fn test_trailing_incomplete_group_ignored() {
        let path = build("M0 0 L10 0 7");
        assert_eq!(points(&path), vec![(0.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_relative_commands() {
        let path = build("m5 5 l10 0 c0 5 10 5 10 10 z");
        assert_eq!(path.vertices[0].point(), Point::new(5.0, 5.0));
        assert_eq!(path.vertices[1].point(), Point::new(15.0, 5.0));
        assert_eq!(path.vertices[1].c0, Some(Point::new(15.0, 10.0)));
        assert_eq!(path.vertices[2].c1, Some(Point::new(25.0, 10.0)));
        assert_eq!(path.vertices[2].point(), Point::new(25.0, 15.0));
        assert_eq!(path.closure, Closure::Explicit);
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let path = build("M1 1 H5 V4 h-2 v-1");
        assert_eq!(
            points(&path),
            vec![(1.0, 1.0), (5.0, 1.0), (5.0, 4.0), (3.0, 4.0), (3.0, 3.0), (1.0, 1.0)]
        );
    }

    #[test]
    fn test_close_restores_subpath_start() {
        let path = build("M2 2 L4 2 z l1 1");
        // After z the pen is back at (2, 2)
        assert_eq!(path.vertices[2].point(), Point::new(3.0, 3.0));
    }

    #[test]
    fn test_unsupported_commands_ignored() {
        let path = build("M0 0 Q5 5 10 0 A1 1 0 0 1 3 3 L10 0");
        assert_eq!(points(&path), vec![(0.0, 0.0), (10.0, 0.0)]);
    }

    #[test]
    fn test_unsupported_commands_advance_current_point() {
        let path = build("M0 0 Q5 5 10 0 l5 0 l0 5");
        assert_eq!(
            points(&path),
            vec![(0.0, 0.0), (15.0, 0.0), (15.0, 5.0), (0.0, 0.0)]
        );

        let path = build("M1 1 q1 1 2 2 t3 3 a1 1 0 0 1 4 4 s1 1 5 5 l1 0");
        assert_eq!(points(&path), vec![(1.0, 1.0), (16.0, 15.0)]);
    }

    #[test]
    fn test_unsupported_incomplete_group_keeps_position() {
        let path = build("M2 2 Q1 1 9 l1 0");
        assert_eq!(points(&path), vec![(2.0, 2.0), (3.0, 2.0)]);
    }

    #[test]
    fn test_two_vertices_with_close_stay_open() {
        let path = build("M0 0 L10 0 Z");
        assert_eq!(path.len(), 2);
        assert_eq!(path.closure, Closure::Open);
    }

    #[test]
    fn test_inner_close_only_moves_pen() {
        // The first subpath gets no closing vertex of its own
        let path = build("M0 0 L10 0 L10 10 Z M20 0 L30 0");
        assert_eq!(
            points(&path),
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (20.0, 0.0),
                (30.0, 0.0),
                (0.0, 0.0)
            ]
        );
        assert_eq!(path.closure, Closure::Coincident);
    }

    #[test]
    fn test_closure_tolerance() {
        let within = build("M0 0 L10 0 L10 10 L0.0000005 0");
        assert_eq!(within.len(), 4);
        assert_eq!(within.closure, Closure::Coincident);

        let outside = build("M0 0 L10 0 L10 10 L0.00001 0");
        assert_eq!(outside.len(), 5);
        assert_eq!(outside.closure, Closure::Coincident);
        assert_eq!(outside.vertices[4], Vertex::plain(0.0, 0.0));

        let closed = build("M0 0 L10 0 L10 10 L0.0000005 0 Z");
        assert_eq!(closed.len(), 4);
        assert_eq!(closed.closure, Closure::Coincident);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(build("").closure, Closure::Open);
        assert!(build("").is_empty());
        let single = build("M3 4");
        assert_eq!(single.len(), 1);
        assert_eq!(single.closure, Closure::Open);
    }

    #[test]
    fn test_step_is_pure() {
        let state = PenState::default();
        let cmd = PathCommand::new('l', vec![1.0, 2.0]);
        let (next, segments) = step(state, &cmd);
        assert_eq!(state, PenState::default());
        assert_eq!(next.current, Point::new(1.0, 2.0));
        assert_eq!(segments, vec![Segment::line(Point::new(1.0, 2.0))]);
    }
}

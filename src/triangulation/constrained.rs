// SPDX-License-Identifier: MIT
//
// Copyright (c) 2026 the robust2d developers
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Constrained edge insertion.
//!
//! Given a Delaunay triangulation and a constraint edge `(a, b)`, mutate
//! the graph so that the edge (or the chain of sub-edges through vertices
//! lying exactly on the segment) is present, and report that chain.
//!
//! One insertion is a loop over sub-edges. For each sub-edge the link
//! edges of the working origin are scanned: either the target edge already
//! exists, or a link vertex sits exactly on the segment (coincident case,
//! the constraint splits there), or exactly one link edge straddles the
//! segment and the crossed triangle strip is removed and re-triangulated.
//! Two constraint edges crossing at an interior point of both are
//! unsupported; inserting the second observes a triangulation already
//! perturbed by the first and the result is unspecified.
//!
//! Strip removal and re-triangulation are atomic: both replacement fans
//! are computed before the first triangle is removed, so a failed
//! insertion never leaves a half-mutated graph.

use std::ops::{Add, Mul, Sub};

use ahash::AHashSet;

use crate::GeometryError;
use crate::kernel::predicates::to_line;
use crate::numeric::scalar::ComputeScalar;
use crate::triangulation::delaunay::Delaunay2;
use crate::triangulation::graph::{EdgeKey, TriangleGraph};
use crate::triangulation::retriangulate::retriangulate;

/// Diagnostic for a failed straddling-edge search, keyed by whether the
/// active compute type is exact.
fn cdt_message(exact: bool) -> &'static str {
    if exact {
        "constraint insertion failed despite exact arithmetic; the \
         triangulation is corrupt (possibly from a crossing constraint edge)"
    } else {
        "constraint insertion failed: the floating-point compute type lost \
         a sidedness decision; rebuild with a dyadic or rational compute type"
    }
}

#[derive(Clone, Debug)]
pub struct ConstrainedDelaunay2<T: ComputeScalar> {
    del: Delaunay2<T>,
    inserted: AHashSet<EdgeKey>,
}

impl<T> ConstrainedDelaunay2<T>
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T> + Add<&'a T, Output = T>,
{
    pub fn new(input: &[[f64; 2]]) -> Result<Self, GeometryError> {
        Ok(ConstrainedDelaunay2 {
            del: Delaunay2::new(input)?,
            inserted: AHashSet::default(),
        })
    }

    pub fn from_delaunay(del: Delaunay2<T>) -> Self {
        ConstrainedDelaunay2 {
            del,
            inserted: AHashSet::default(),
        }
    }

    pub fn delaunay(&self) -> &Delaunay2<T> {
        &self.del
    }

    pub fn graph(&self) -> &TriangleGraph {
        self.del.graph()
    }

    /// Undirected sub-edges recorded by every successful [`insert`] so far.
    ///
    /// [`insert`]: ConstrainedDelaunay2::insert
    pub fn inserted_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.inserted.iter().map(|e| (e.0, e.1))
    }

    pub fn is_inserted(&self, a: usize, b: usize) -> bool {
        self.inserted.contains(&EdgeKey::new(a, b))
    }

    /// Insert the constraint edge `(a, b)`. On success the returned chain
    /// starts at `a`, ends at `b`, and every consecutive pair is an edge of
    /// the updated triangulation; interior entries are vertices that lie
    /// exactly on the segment. Validation failures and precision failures
    /// surface before the graph is touched.
    pub fn insert(&mut self, edge: [usize; 2]) -> Result<Vec<usize>, GeometryError> {
        let [a, b] = edge;
        let n = self.del.num_points();
        if a == b {
            return Err(GeometryError::InvalidEdge {
                v0: a,
                v1: b,
                reason: "endpoints coincide",
            });
        }
        if a >= n || b >= n {
            return Err(GeometryError::InvalidEdge {
                v0: a,
                v1: b,
                reason: "vertex index out of range",
            });
        }
        for v in [a, b] {
            if self.del.graph().incident_triangles(v).is_empty() {
                return Err(GeometryError::InvalidEdge {
                    v0: a,
                    v1: b,
                    reason: "endpoint is not a vertex of the triangulation",
                });
            }
        }

        tracing::debug!(a, b, "inserting constraint edge");
        let mut chain = vec![a];
        let mut v0 = a;
        // each round consumes at least one vertex of the segment
        for _ in 0..n {
            let next = self.process_sub_edge(v0, b)?;
            chain.push(next);
            self.inserted.insert(EdgeKey::new(v0, next));
            tracing::trace!(from = v0, to = next, "sub-edge recorded");
            if next == b {
                return Ok(chain);
            }
            v0 = next;
        }
        unreachable!("constraint edge consumed more sub-edges than vertices");
    }

    /// Advance the constraint `(v0, v1)` by one sub-edge, mutating the
    /// graph if a triangle strip has to be re-triangulated. Returns the
    /// vertex up to which the constraint is now realized.
    fn process_sub_edge(&mut self, v0: usize, v1: usize) -> Result<usize, GeometryError> {
        if self.del.graph().edge_exists(v0, v1) {
            return Ok(v1);
        }

        // Scan the link of v0. Its link edges form a closed fan around v0,
        // so the segment toward v1 either leaves through exactly one
        // straddling edge or runs along a collinear link vertex.
        let mut start = None;
        for (tid, (wa, wb)) in self.del.graph().link_edges(v0) {
            let sa = self.side(wa, v0, v1);
            let sb = self.side(wb, v0, v1);
            if sa == 0 && self.points_toward(v0, v1, wa) {
                tracing::trace!(v0, v1, via = wa, "coincident link vertex");
                return Ok(wa);
            }
            if sb == 0 && self.points_toward(v0, v1, wb) {
                tracing::trace!(v0, v1, via = wb, "coincident link vertex");
                return Ok(wb);
            }
            if sa < 0 && sb > 0 {
                start = Some((tid, wa, wb));
                break;
            }
        }
        let (start_tri, w_right, w_left) = start.ok_or(GeometryError::PrecisionFailure(
            cdt_message(T::EXACT),
        ))?;

        // Walk the triangle strip crossed by the segment, collecting the
        // two polygon chains flanking it.
        let graph = self.del.graph();
        let mut strip = vec![start_tri];
        let mut right = vec![v0, w_right];
        let mut left = vec![v0, w_left];
        let (mut vr, mut vl) = (w_right, w_left);
        let mut cur = start_tri;
        let v_end;
        let cap = graph.triangle_count();
        let mut steps = 0usize;
        loop {
            steps += 1;
            if steps > cap {
                return Err(GeometryError::PrecisionFailure(cdt_message(T::EXACT)));
            }
            let next = graph
                .adjacent_across_edge(cur, vr, vl)
                .ok_or(GeometryError::PrecisionFailure(cdt_message(T::EXACT)))?;
            if strip.contains(&next) {
                // only reachable when an inexact predicate sent the walk in
                // a circle
                return Err(GeometryError::PrecisionFailure(cdt_message(T::EXACT)));
            }
            let w = graph
                .opposite_vertex(next, vr, vl)
                .expect("adjacent triangle does not contain the shared edge");
            strip.push(next);
            if w == v1 {
                v_end = v1;
                break;
            }
            match self.side(w, v0, v1) {
                s if s > 0 => {
                    left.push(w);
                    vl = w;
                }
                s if s < 0 => {
                    right.push(w);
                    vr = w;
                }
                _ => {
                    // interior vertex exactly on the segment: the strip
                    // ends here and the caller continues from it
                    v_end = w;
                    break;
                }
            }
            cur = next;
        }
        right.push(v_end);
        left.push(v_end);
        // the left chain is collected clockwise; re-triangulation expects
        // counterclockwise boundary order
        left.reverse();

        tracing::trace!(
            v0,
            v1,
            v_end,
            strip_len = strip.len(),
            "re-triangulating constraint corridor"
        );

        // Both replacement fans are pure functions of the points; compute
        // them before any removal so this step is atomic.
        let points = self.del.points();
        let right_tris = retriangulate(&right, points);
        let left_tris = retriangulate(&left, points);

        let graph = self.del.graph_mut();
        for id in strip {
            graph.remove_by_id(id);
        }
        for t in right_tris.into_iter().chain(left_tris) {
            graph.insert_triangle(t.0, t.1, t.2);
        }
        Ok(v_end)
    }

    fn side(&self, test: usize, v0: usize, v1: usize) -> i8 {
        to_line(self.del.point(test), self.del.point(v0), self.del.point(v1))
    }

    /// Whether `w` lies in the forward half-plane of the ray `v0 -> v1`
    /// (positive dot product with the ray direction).
    fn points_toward(&self, v0: usize, v1: usize, w: usize) -> bool {
        let o = self.del.point(v0);
        let d = self.del.point(v1);
        let t = self.del.point(w);
        let dot = &(&(&d.x - &o.x) * &(&t.x - &o.x)) + &(&(&d.y - &o.y) * &(&t.y - &o.y));
        dot.sign() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::DyadicFlex;

    #[test]
    fn diagonal_swap_in_a_square() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        // whichever diagonal Delaunay picked, force the other one
        let want = if cdt.graph().edge_exists(0, 2) {
            [1, 3]
        } else {
            [0, 2]
        };
        let chain = cdt.insert(want).unwrap();
        assert_eq!(chain, vec![want[0], want[1]]);
        assert!(cdt.graph().edge_exists(want[0], want[1]));
        assert!(cdt.is_inserted(want[1], want[0]));
        assert_eq!(cdt.graph().triangle_count(), 2);
    }

    #[test]
    fn existing_edge_is_a_no_op() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        let chain = cdt.insert([0, 1]).unwrap();
        assert_eq!(chain, vec![0, 1]);
        assert_eq!(cdt.graph().triangle_count(), 2);
    }

    #[test]
    fn collinear_interior_vertex_splits_the_constraint() {
        // vertex 2 lies exactly on the segment from 0 to 4
        let pts = [[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [2.0, -2.0], [4.0, 0.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        let chain = cdt.insert([0, 4]).unwrap();
        assert_eq!(chain, vec![0, 2, 4]);
        assert!(cdt.graph().edge_exists(0, 2));
        assert!(cdt.graph().edge_exists(2, 4));
        assert!(cdt.is_inserted(0, 2));
        assert!(cdt.is_inserted(2, 4));
    }

    #[test]
    fn invalid_edges_are_rejected() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        assert!(matches!(
            cdt.insert([1, 1]),
            Err(GeometryError::InvalidEdge { .. })
        ));
        assert!(matches!(
            cdt.insert([0, 9]),
            Err(GeometryError::InvalidEdge { .. })
        ));
    }

    #[test]
    fn stranded_strip_walk_is_a_precision_failure() {
        // rectangle fanned around an interior vertex; deleting the
        // triangle the walk must enter strands the constraint mid-strip
        let pts = [[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 3.0], [2.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        assert!(cdt.del.graph_mut().remove_triangle(2, 3, 4));
        match cdt.insert([0, 2]) {
            Err(GeometryError::PrecisionFailure(msg)) => {
                assert!(msg.contains("exact arithmetic"), "unexpected diagnostic: {msg}");
            }
            other => panic!("expected a precision failure, got {other:?}"),
        }
    }

    #[test]
    fn inexact_compute_types_get_the_rebuild_diagnostic() {
        use crate::numeric::NativeF64;
        let pts = [[0.0, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 3.0], [2.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<NativeF64>::new(&pts).unwrap();
        assert!(cdt.del.graph_mut().remove_triangle(2, 3, 4));
        match cdt.insert([0, 2]) {
            Err(GeometryError::PrecisionFailure(msg)) => {
                assert!(msg.contains("floating-point"), "unexpected diagnostic: {msg}");
            }
            other => panic!("expected a precision failure, got {other:?}"),
        }
    }

    #[test]
    fn insertion_is_idempotent() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        let want = if cdt.graph().edge_exists(0, 2) {
            [1, 3]
        } else {
            [0, 2]
        };
        let first = cdt.insert(want).unwrap();
        let second = cdt.insert(want).unwrap();
        assert_eq!(first, second);
    }
}

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

//! Incremental Delaunay triangulation (Bowyer-Watson).
//!
//! Input coordinates are native doubles; they are converted exactly into
//! the chosen compute type once, and every sidedness and incircle decision
//! from then on goes through the exact predicates. The hull is closed
//! during construction by three scaffold vertices on rays to infinity
//! rather than by a finite bounding triangle, so hull triangles survive
//! no matter how large their circumcircles are. With an exact compute
//! type the construction is deterministic and correct; with [`NativeF64`]
//! it inherits the usual floating-point failure modes.
//!
//! [`NativeF64`]: crate::numeric::scalar::NativeF64

use std::ops::{Add, Mul, Sub};

use ahash::AHashMap;

use crate::GeometryError;
use crate::geometry::Point2;
use crate::kernel::predicates::{to_circumcircle, to_line};
use crate::numeric::scalar::ComputeScalar;
use crate::triangulation::graph::{EdgeKey, Triangle, TriangleGraph};

/// Construction-time hull closure: three phantom vertices on rays from
/// the origin whose directions positively span the plane. They carry no
/// coordinates; every test involving them evaluates the limit of the ray
/// parameter going to infinity, term by term. The directions must be
/// pairwise non-parallel and of equal length.
struct Scaffold<T: ComputeScalar> {
    s0: usize,
    dirs: [Point2<T>; 3],
}

impl<T: ComputeScalar> Scaffold<T> {
    fn new(s0: usize) -> Self {
        Scaffold {
            s0,
            dirs: [
                Point2::from_f64s(0.0, 5.0),
                Point2::from_f64s(-4.0, -3.0),
                Point2::from_f64s(4.0, -3.0),
            ],
        }
    }

    fn is_scaffold(&self, v: usize) -> bool {
        v >= self.s0
    }

    fn dir(&self, v: usize) -> &Point2<T> {
        &self.dirs[v - self.s0]
    }
}

#[derive(Clone, Debug)]
pub struct Delaunay2<T: ComputeScalar> {
    points: Vec<Point2<T>>,
    graph: TriangleGraph,
}

impl<T> Delaunay2<T>
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T> + Add<&'a T, Output = T>,
{
    /// Triangulate `input`. Duplicate points are ignored (they stay as
    /// isolated vertices). Fails with [`GeometryError::InsufficientInput`]
    /// when fewer than three points are given or all points are collinear.
    pub fn new(input: &[[f64; 2]]) -> Result<Self, GeometryError> {
        if input.len() < 3 {
            return Err(GeometryError::InsufficientInput(
                "triangulation needs at least three points",
            ));
        }
        tracing::debug!(num_points = input.len(), "building Delaunay triangulation");

        let points: Vec<Point2<T>> = input
            .iter()
            .map(|&[x, y]| Point2::from_f64s(x, y))
            .collect();

        let s0 = input.len();
        let sc = Scaffold::new(s0);

        // counterclockwise by direction order
        let mut triangles = vec![Triangle(s0, s0 + 1, s0 + 2)];
        for pid in 0..s0 {
            Self::insert_point(pid, &points, &sc, &mut triangles);
        }

        // Drop the scaffolding
        triangles.retain(|t| t.0 < s0 && t.1 < s0 && t.2 < s0);

        if triangles.is_empty() {
            return Err(GeometryError::InsufficientInput(
                "input points are collinear; no triangulation exists",
            ));
        }

        let mut graph = TriangleGraph::new(s0);
        for t in &triangles {
            graph.insert_triangle(t.0, t.1, t.2);
        }
        tracing::debug!(
            num_triangles = graph.triangle_count(),
            "Delaunay triangulation complete"
        );
        Ok(Delaunay2 { points, graph })
    }

    /// One Bowyer-Watson step: carve the cavity of triangles whose
    /// circumcircle (in the limit, for scaffold triangles) strictly
    /// contains the point, then fan the point to the cavity boundary.
    fn insert_point(
        pid: usize,
        points: &[Point2<T>],
        sc: &Scaffold<T>,
        triangles: &mut Vec<Triangle>,
    ) {
        let p = &points[pid];

        let mut bad = Vec::new();
        for (i, t) in triangles.iter().enumerate() {
            if Self::conflicts(p, *t, points, sc) {
                bad.push(i);
            }
        }
        if bad.is_empty() {
            // duplicate of an existing vertex
            tracing::trace!(pid, "point skipped: no circumcircle contains it");
            return;
        }

        // Boundary edges of the cavity appear in exactly one bad triangle
        let mut edge_count: AHashMap<EdgeKey, u32> = AHashMap::default();
        for &i in &bad {
            let t = triangles[i];
            for e in [
                EdgeKey::new(t.0, t.1),
                EdgeKey::new(t.1, t.2),
                EdgeKey::new(t.2, t.0),
            ] {
                *edge_count.entry(e).or_insert(0) += 1;
            }
        }

        bad.sort_unstable();
        for &i in bad.iter().rev() {
            triangles.swap_remove(i);
        }

        for (e, count) in edge_count {
            if count != 1 {
                continue;
            }
            match Self::orient(p, e.0, e.1, points, sc) {
                1 => triangles.push(Triangle(e.0, e.1, pid)),
                -1 => triangles.push(Triangle(e.0, pid, e.1)),
                _ => {} // point on the boundary edge line: zero-area, skip
            }
        }
    }

    /// Is `p` strictly inside the circumcircle of `t`? Triangles touching
    /// the scaffold take the limit form of the circle: a half plane
    /// through the real edge (one scaffold vertex), a half plane tangent
    /// at the real vertex (two), or the whole plane (three).
    fn conflicts(p: &Point2<T>, t: Triangle, points: &[Point2<T>], sc: &Scaffold<T>) -> bool {
        let mut ns = 0usize;
        let mut real = 0usize;
        let mut scaf = 0usize;
        for v in t.vertices() {
            if sc.is_scaffold(v) {
                ns += 1;
                scaf = v;
            } else {
                real = v;
            }
        }
        match ns {
            0 => {
                let (a, b, c) = (t.0, t.1, t.2);
                // incircle expects counterclockwise order
                let (a, b, c) = if to_line(&points[c], &points[a], &points[b]) >= 0 {
                    (a, b, c)
                } else {
                    (a, c, b)
                };
                to_circumcircle(p, &points[a], &points[b], &points[c]) > 0
            }
            1 => {
                // open half plane on the scaffold side of the real edge,
                // plus the open edge itself
                let (u, v) = if t.0 == scaf {
                    (t.1, t.2)
                } else if t.1 == scaf {
                    (t.2, t.0)
                } else {
                    (t.0, t.1)
                };
                match to_line(p, &points[u], &points[v]) {
                    1 => true,
                    0 => strictly_between(&points[u], &points[v], p),
                    _ => false,
                }
            }
            2 => {
                // open half plane bounded by the tangent through the real
                // vertex, parallel to the chord of the two ray directions
                let (w1, w2) = if t.0 == real {
                    (t.1, t.2)
                } else if t.1 == real {
                    (t.2, t.0)
                } else {
                    (t.0, t.1)
                };
                let (d1, d2) = (sc.dir(w1), sc.dir(w2));
                let u = &points[real];
                let ex = &d1.x - &d2.x;
                let ey = &d1.y - &d2.y;
                let px = &p.x - &u.x;
                let py = &p.y - &u.y;
                Self::cross_sign(&ex, &ey, &px, &py) == 1
            }
            _ => true, // the initial scaffold triangle covers the plane
        }
    }

    /// Orientation of `p` against the directed edge `a -> b`, where either
    /// endpoint may be a scaffold vertex.
    fn orient(p: &Point2<T>, a: usize, b: usize, points: &[Point2<T>], sc: &Scaffold<T>) -> i8 {
        match (sc.is_scaffold(a), sc.is_scaffold(b)) {
            (false, false) => to_line(p, &points[a], &points[b]),
            (false, true) => Self::half_orient(p, &points[a], sc.dir(b)),
            (true, false) => -Self::half_orient(p, &points[b], sc.dir(a)),
            (true, true) => {
                let (d0, d1) = (sc.dir(a), sc.dir(b));
                Self::cross_sign(&d0.x, &d0.y, &d1.x, &d1.y)
            }
        }
    }

    /// Limit orientation of `p` against the edge from the real vertex `a`
    /// toward the scaffold ray with direction `d`.
    fn half_orient(p: &Point2<T>, a: &Point2<T>, d: &Point2<T>) -> i8 {
        let px = &p.x - &a.x;
        let py = &p.y - &a.y;
        let s = Self::cross_sign(&d.x, &d.y, &px, &py);
        if s != 0 {
            return s;
        }
        // `p` is aligned with the ray direction; the ray's anchor at the
        // origin settles the lower-order term
        (&(&a.y * &px) - &(&a.x * &py)).sign()
    }

    fn cross_sign(ax: &T, ay: &T, bx: &T, by: &T) -> i8 {
        (&(ax * by) - &(ay * bx)).sign()
    }

    pub fn points(&self) -> &[Point2<T>] {
        &self.points
    }

    pub fn point(&self, v: usize) -> &Point2<T> {
        &self.points[v]
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn graph(&self) -> &TriangleGraph {
        &self.graph
    }

    pub(crate) fn graph_mut(&mut self) -> &mut TriangleGraph {
        &mut self.graph
    }
}

// `p` lies on the line through `u` and `v`; is it strictly inside the
// segment?
fn strictly_between<T: ComputeScalar>(u: &Point2<T>, v: &Point2<T>, p: &Point2<T>) -> bool {
    if u.x != v.x {
        (u.x < p.x && p.x < v.x) || (v.x < p.x && p.x < u.x)
    } else {
        (u.y < p.y && p.y < v.y) || (v.y < p.y && p.y < u.y)
    }
}

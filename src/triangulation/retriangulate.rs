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

//! Polygon re-triangulation by minimum-pseudo-distance bisection.

use std::ops::{Add, Mul, Sub};

use crate::geometry::Point2;
use crate::kernel::predicates::compute_psd;
use crate::numeric::scalar::ComputeScalar;
use crate::triangulation::graph::Triangle;

/// Triangulate the simple polygon given as a counterclockwise vertex chain
/// whose first and last entries form the closing (base) edge. Pure: the
/// triangle list is computed without touching any graph.
///
/// Each range splits at the interior vertex closest to the base edge under
/// the pseudo-squared distance; the scan uses strict `<`, so the
/// first-encountered (lowest-index) minimizer wins ties. That convention is
/// fixed and deliberate: it makes the output deterministic.
///
/// The work stack is explicit so the call depth stays constant no matter
/// how large the polygon is.
pub(crate) fn retriangulate<T>(polygon: &[usize], points: &[Point2<T>]) -> Vec<Triangle>
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T> + Add<&'a T, Output = T>,
{
    let mut out = Vec::new();
    if polygon.len() < 3 {
        return out;
    }
    let mut stack = vec![(0usize, polygon.len() - 1)];
    while let Some((i0, i1)) = stack.pop() {
        if i1 - i0 < 2 {
            continue;
        }
        let base0 = &points[polygon[i0]];
        let base1 = &points[polygon[i1]];
        let mut isplit = i0 + 1;
        let mut min_psd = compute_psd(base0, base1, &points[polygon[isplit]]);
        for i in (i0 + 2)..i1 {
            let psd = compute_psd(base0, base1, &points[polygon[i]]);
            if psd.cmp_total(&min_psd) == std::cmp::Ordering::Less {
                min_psd = psd;
                isplit = i;
            }
        }
        out.push(Triangle(polygon[i0], polygon[isplit], polygon[i1]));
        stack.push((i0, isplit));
        stack.push((isplit, i1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::DyadicFlex;

    fn pts(coords: &[[f64; 2]]) -> Vec<Point2<DyadicFlex>> {
        coords
            .iter()
            .map(|&[x, y]| Point2::from_f64s(x, y))
            .collect()
    }

    #[test]
    fn triangle_chain_is_a_single_triangle() {
        let points = pts(&[[0.0, 0.0], [1.0, -1.0], [2.0, 0.0]]);
        let tris = retriangulate(&[0, 1, 2], &points);
        assert_eq!(tris, vec![Triangle(0, 1, 2)]);
    }

    #[test]
    fn closest_vertex_to_base_splits_first() {
        // vertex 2 is nearest to the base edge (0, 4)
        let points = pts(&[
            [0.0, 0.0],
            [1.0, -3.0],
            [2.0, -1.0],
            [3.0, -3.0],
            [4.0, 0.0],
        ]);
        let tris = retriangulate(&[0, 1, 2, 3, 4], &points);
        assert_eq!(tris.len(), 3);
        assert_eq!(tris[0], Triangle(0, 2, 4));
    }

    #[test]
    fn ties_pick_the_lowest_index() {
        // vertices 1 and 2 are equidistant from the base edge
        let points = pts(&[[0.0, 0.0], [1.0, -1.0], [2.0, -1.0], [3.0, 0.0]]);
        let tris = retriangulate(&[0, 1, 2, 3], &points);
        assert_eq!(tris[0], Triangle(0, 1, 3));
    }

    #[test]
    fn degenerate_chains_produce_nothing() {
        let points = pts(&[[0.0, 0.0], [1.0, 0.0]]);
        assert!(retriangulate(&[0, 1], &points).is_empty());
        assert!(retriangulate(&[0], &points).is_empty());
    }
}

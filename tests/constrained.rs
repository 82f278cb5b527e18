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

//! End-to-end constrained insertion scenarios.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use robust2d::GeometryError;
use robust2d::kernel::to_line;
use robust2d::numeric::DyadicFlex;
use robust2d::triangulation::ConstrainedDelaunay2;

fn assert_well_formed(cdt: &ConstrainedDelaunay2<DyadicFlex>) {
    let d = cdt.delaunay();
    for t in cdt.graph().triangles() {
        assert_eq!(to_line(d.point(t.2), d.point(t.0), d.point(t.1)), 1, "{t:?}");
    }
    for e in cdt.graph().edges() {
        assert!(cdt.graph().edge_degree(e.0, e.1) <= 2);
    }
    for (a, b) in cdt.inserted_edges() {
        assert!(cdt.graph().edge_exists(a, b), "constraint ({a}, {b}) lost");
    }
}

fn assert_chain(cdt: &ConstrainedDelaunay2<DyadicFlex>, chain: &[usize], a: usize, b: usize) {
    assert_eq!(chain.first(), Some(&a));
    assert_eq!(chain.last(), Some(&b));
    for w in chain.windows(2) {
        assert!(cdt.graph().edge_exists(w[0], w[1]));
        assert!(cdt.is_inserted(w[0], w[1]));
    }
}

#[test]
fn grid_diagonal_splits_at_collinear_vertices() {
    // row-major 3x3 grid; the main diagonal passes exactly through the
    // center vertex
    let mut pts = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            pts.push([i as f64, j as f64]);
        }
    }
    let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
    let chain = cdt.insert([0, 8]).unwrap();
    assert_eq!(chain, vec![0, 4, 8]);
    assert_chain(&cdt, &chain, 0, 8);
    assert_well_formed(&cdt);
}

#[test]
fn long_skinny_corridor_is_retriangulated() {
    // two horizontal rows; the constraint from 0 to 9 crosses every
    // interior edge between the rows
    let mut pts = Vec::new();
    for i in 0..5 {
        pts.push([i as f64, 0.0]);
    }
    for i in 0..5 {
        pts.push([i as f64 + 0.5, 1.0]);
    }
    let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
    let before = cdt.graph().triangle_count();
    let chain = cdt.insert([0, 9]).unwrap();
    assert_eq!(chain, vec![0, 9]);
    assert_chain(&cdt, &chain, 0, 9);
    assert_eq!(cdt.graph().triangle_count(), before);
    assert_well_formed(&cdt);
}

#[test]
fn multiple_disjoint_constraints_coexist() {
    let mut pts = Vec::new();
    for j in 0..4 {
        for i in 0..4 {
            pts.push([i as f64, j as f64]);
        }
    }
    let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
    for edge in [[0usize, 5], [2, 7], [8, 13], [10, 15]] {
        let chain = cdt.insert(edge).unwrap();
        assert_chain(&cdt, &chain, edge[0], edge[1]);
    }
    assert_well_formed(&cdt);
    assert_eq!(cdt.inserted_edges().count(), 4);
}

#[test]
fn random_clouds_accept_single_constraints() {
    for seed in 0..6u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let pts: Vec<[f64; 2]> = (0..30)
            .map(|_| [rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)])
            .collect();
        let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
        let before = cdt.graph().triangle_count();
        let a = rng.random_range(0..30);
        let mut b = rng.random_range(0..30);
        if b == a {
            b = (b + 1) % 30;
        }
        let chain = cdt.insert([a, b]).unwrap();
        // random doubles are never exactly collinear, so no splitting
        assert_eq!(chain, vec![a, b]);
        assert_chain(&cdt, &chain, a, b);
        assert_eq!(cdt.graph().triangle_count(), before);
        assert_well_formed(&cdt);
    }
}

#[test]
fn hull_edge_constraint_is_trivially_present() {
    let pts = [[0.0, 0.0], [4.0, 0.0], [2.0, 3.0], [2.0, 1.0]];
    let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
    let chain = cdt.insert([0, 1]).unwrap();
    assert_eq!(chain, vec![0, 1]);
}

#[test]
fn error_paths_leave_the_graph_untouched() {
    let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
    let before: Vec<_> = {
        let mut v: Vec<_> = cdt.graph().triangles().map(|t| t.sorted()).collect();
        v.sort_unstable();
        v
    };
    for bad in [[2usize, 2], [0, 4], [7, 9]] {
        assert!(matches!(
            cdt.insert(bad),
            Err(GeometryError::InvalidEdge { .. })
        ));
    }
    let after: Vec<_> = {
        let mut v: Vec<_> = cdt.graph().triangles().map(|t| t.sorted()).collect();
        v.sort_unstable();
        v
    };
    assert_eq!(before, after);
    assert_eq!(cdt.inserted_edges().count(), 0);
}

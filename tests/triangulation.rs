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

//! Structural checks of the Delaunay builder on fixed and random inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use robust2d::kernel::{to_circumcircle, to_line};
use robust2d::numeric::DyadicFlex;
use robust2d::triangulation::Delaunay2;

fn random_points(seed: u64, n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)])
        .collect()
}

fn assert_well_formed(d: &Delaunay2<DyadicFlex>) {
    for t in d.graph().triangles() {
        // stored winding is counterclockwise
        assert_eq!(to_line(d.point(t.2), d.point(t.0), d.point(t.1)), 1, "{t:?}");
        // empty circumcircle
        for v in 0..d.num_points() {
            if t.vertices().contains(&v) {
                continue;
            }
            assert!(
                to_circumcircle(d.point(v), d.point(t.0), d.point(t.1), d.point(t.2)) <= 0,
                "vertex {v} inside circumcircle of {t:?}"
            );
        }
    }
    for e in d.graph().edges() {
        assert!(d.graph().edge_degree(e.0, e.1) <= 2);
    }
}

#[test]
fn random_clouds_are_delaunay() {
    for seed in 0..4u64 {
        let pts = random_points(seed, 40);
        let d = Delaunay2::<DyadicFlex>::new(&pts).unwrap();
        assert_well_formed(&d);
    }
}

#[test]
fn triangle_count_matches_euler() {
    // for points in general position: t = 2n - 2 - h, with h hull vertices
    // counted via hull edges (edges bordering exactly one triangle)
    let pts = random_points(7, 60);
    let d = Delaunay2::<DyadicFlex>::new(&pts).unwrap();
    let hull_edges = d
        .graph()
        .edges()
        .filter(|e| d.graph().edge_degree(e.0, e.1) == 1)
        .count();
    let n = d.num_points();
    assert_eq!(d.graph().triangle_count(), 2 * n - 2 - hull_edges);
}

#[test]
fn duplicate_points_stay_isolated() {
    let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
    let d = Delaunay2::<DyadicFlex>::new(&pts).unwrap();
    assert_eq!(d.graph().triangle_count(), 1);
    assert!(d.graph().incident_triangles(3).is_empty());
    assert_eq!(d.num_points(), 4);
}

#[test]
fn cocircular_points_triangulate_cleanly() {
    // four corners of a square are cocircular; either diagonal is valid
    let pts = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 1.0]];
    let d = Delaunay2::<DyadicFlex>::new(&pts).unwrap();
    assert_well_formed(&d);
    assert_eq!(d.graph().triangle_count(), 4);
}

#[test]
fn grid_input_is_handled() {
    let mut pts = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            pts.push([i as f64, j as f64]);
        }
    }
    let d = Delaunay2::<DyadicFlex>::new(&pts).unwrap();
    assert_eq!(d.num_points(), 25);
    // hull is the 4x4 square: 16 hull edges, t = 2*25 - 2 - 16
    assert_eq!(d.graph().triangle_count(), 32);
    for t in d.graph().triangles() {
        assert_eq!(to_line(d.point(t.2), d.point(t.0), d.point(t.1)), 1);
    }
}

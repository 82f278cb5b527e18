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

//! Division-free sidedness predicates.
//!
//! Everything here is built from subtraction, addition and multiplication
//! only, so the predicates are decidable exactly by the dyadic compute type
//! without ever touching rational arithmetic. A zero result is a meaningful
//! "exactly on" classification, never an error.

use std::ops::{Add, Mul, Sub};

use crate::geometry::Point2;
use crate::numeric::scalar::ComputeScalar;

/// Which side of the directed line `v0 -> v1` the point `test` lies on:
/// `+1` left, `-1` right, `0` exactly on the line. Antisymmetric in
/// `(v0, v1)`.
pub fn to_line<T>(test: &Point2<T>, v0: &Point2<T>, v1: &Point2<T>) -> i8
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T>,
{
    let dx1 = &v1.x - &v0.x;
    let dy1 = &v1.y - &v0.y;
    let dxt = &test.x - &v0.x;
    let dyt = &test.y - &v0.y;
    (&(&dx1 * &dyt) - &(&dy1 * &dxt)).sign()
}

/// Position of `test` relative to the circle through the counterclockwise
/// triangle `v0, v1, v2`: `+1` strictly inside, `-1` outside, `0` on the
/// circle. Lifted-paraboloid determinant, expanded in 2x2 cofactors.
pub fn to_circumcircle<T>(test: &Point2<T>, v0: &Point2<T>, v1: &Point2<T>, v2: &Point2<T>) -> i8
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T> + Add<&'a T, Output = T>,
{
    let ax = &v0.x - &test.x;
    let ay = &v0.y - &test.y;
    let bx = &v1.x - &test.x;
    let by = &v1.y - &test.y;
    let cx = &v2.x - &test.x;
    let cy = &v2.y - &test.y;

    let a2 = &(&ax * &ax) + &(&ay * &ay);
    let b2 = &(&bx * &bx) + &(&by * &by);
    let c2 = &(&cx * &cx) + &(&cy * &cy);

    let bxcy = &(&bx * &cy) - &(&cx * &by);
    let axcy = &(&ax * &cy) - &(&cx * &ay);
    let axby = &(&ax * &by) - &(&bx * &ay);

    let det = &(&(&a2 * &bxcy) - &(&b2 * &axcy)) + &(&c2 * &axby);
    det.sign()
}

/// Pseudo-squared distance from `v2` to the segment `v0 -> v1`: the true
/// squared point-to-segment distance scaled by `|v1 - v0|^2`, so values
/// from the three branches rank consistently against each other. Used only
/// for minimization, never as a metric distance.
pub fn compute_psd<T>(v0: &Point2<T>, v1: &Point2<T>, v2: &Point2<T>) -> T
where
    T: ComputeScalar,
    for<'a> &'a T: Sub<&'a T, Output = T> + Mul<&'a T, Output = T> + Add<&'a T, Output = T>,
{
    let d10x = &v1.x - &v0.x;
    let d10y = &v1.y - &v0.y;
    let d20x = &v2.x - &v0.x;
    let d20y = &v2.y - &v0.y;

    let sqrlen10 = &(&d10x * &d10x) + &(&d10y * &d10y);
    let dot1020 = &(&d10x * &d20x) + &(&d10y * &d20y);

    if dot1020.sign() <= 0 {
        // projection falls before v0
        let sqrlen20 = &(&d20x * &d20x) + &(&d20y * &d20y);
        return &sqrlen10 * &sqrlen20;
    }

    let d21x = &v2.x - &v1.x;
    let d21y = &v2.y - &v1.y;
    let dot1021 = &(&d10x * &d21x) + &(&d10y * &d21y);

    if dot1021.sign() >= 0 {
        // projection falls past v1
        let sqrlen21 = &(&d21x * &d21x) + &(&d21y * &d21y);
        return &sqrlen10 * &sqrlen21;
    }

    // interior projection: perpendicular distance, still division-free
    let sqrlen20 = &(&d20x * &d20x) + &(&d20y * &d20y);
    &(&sqrlen10 * &sqrlen20) - &(&dot1020 * &dot1020)
}

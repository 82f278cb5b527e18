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

//! Exact 2D geometric computation.
//!
//! The crate builds Delaunay and constrained Delaunay triangulations on
//! top of division-free exact predicates. All geometric decisions reduce
//! to the sign of a polynomial in the input coordinates, evaluated in a
//! pluggable compute type: dyadic big numbers or big rationals for exact
//! results, or native doubles when speed matters more than certainty.
//!
//! ```
//! use robust2d::numeric::DyadicFlex;
//! use robust2d::triangulation::ConstrainedDelaunay2;
//!
//! let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let mut cdt = ConstrainedDelaunay2::<DyadicFlex>::new(&pts).unwrap();
//! let diagonal = if cdt.graph().edge_exists(0, 2) { [0, 2] } else { [1, 3] };
//! let chain = cdt.insert(diagonal).unwrap();
//! assert_eq!(chain.len(), 2);
//! ```

pub mod geometry;
pub mod kernel;
pub mod numeric;
pub mod triangulation;

use thiserror::Error;

/// Failures surfaced by triangulation construction and constraint
/// insertion. Internal invariant violations (graph corruption, arithmetic
/// preconditions) panic instead; they indicate a bug, not bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The constraint edge itself is malformed.
    #[error("invalid constraint edge ({v0}, {v1}): {reason}")]
    InvalidEdge {
        v0: usize,
        v1: usize,
        reason: &'static str,
    },

    /// The input point set cannot be triangulated.
    #[error("insufficient input: {0}")]
    InsufficientInput(&'static str),

    /// A geometric decision could not be resolved. With an exact compute
    /// type this means the triangulation state is inconsistent; with
    /// native doubles it usually means a predicate sign was lost.
    #[error("precision failure: {0}")]
    PrecisionFailure(&'static str),
}

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

//! The compute-type strategy seam.
//!
//! Every geometric algorithm in this crate is written once against
//! [`ComputeScalar`] and instantiated per triangulation with one of three
//! precision levels:
//!
//! * [`NativeF64`]: native floating point. Fast, but predicates near
//!   degeneracy can misclassify and constraint insertion can fail with a
//!   recoverable precision error.
//! * [`Dyadic`](crate::numeric::dyadic::Dyadic): exact and division-free.
//!   `DyadicFixed<N>` caps the mantissa at `N` words for allocation-free
//!   worst-case sizing; `DyadicFlex` grows without a ceiling.
//! * [`BigRational`](crate::numeric::rational::BigRational): exact with
//!   division, for consumers that need rational outputs such as
//!   barycentric coordinates, at the cost of larger words.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::numeric::dyadic::Dyadic;
use crate::numeric::rational::BigRational;
use crate::numeric::uint32::Blocks;

pub trait ComputeScalar:
    Clone
    + Debug
    + PartialEq
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Whether arithmetic in this type is exact. Drives the diagnostic
    /// chosen when constraint insertion cannot find a straddling edge.
    const EXACT: bool;

    /// Conversion from a native double. Exact for the arbitrary-precision
    /// implementors.
    fn from_f64(value: f64) -> Self;

    /// Nearest native double.
    fn to_f64(&self) -> f64;

    /// -1, 0 or +1.
    fn sign(&self) -> i8;

    /// Total-order comparison.
    fn cmp_total(&self, other: &Self) -> Ordering;
}

/// Native floating point as a compute type.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeF64(pub f64);

impl Add for NativeF64 {
    type Output = NativeF64;
    fn add(self, rhs: NativeF64) -> NativeF64 {
        NativeF64(self.0 + rhs.0)
    }
}

impl<'a, 'b> Add<&'b NativeF64> for &'a NativeF64 {
    type Output = NativeF64;
    fn add(self, rhs: &'b NativeF64) -> NativeF64 {
        NativeF64(self.0 + rhs.0)
    }
}

impl Sub for NativeF64 {
    type Output = NativeF64;
    fn sub(self, rhs: NativeF64) -> NativeF64 {
        NativeF64(self.0 - rhs.0)
    }
}

impl<'a, 'b> Sub<&'b NativeF64> for &'a NativeF64 {
    type Output = NativeF64;
    fn sub(self, rhs: &'b NativeF64) -> NativeF64 {
        NativeF64(self.0 - rhs.0)
    }
}

impl Mul for NativeF64 {
    type Output = NativeF64;
    fn mul(self, rhs: NativeF64) -> NativeF64 {
        NativeF64(self.0 * rhs.0)
    }
}

impl<'a, 'b> Mul<&'b NativeF64> for &'a NativeF64 {
    type Output = NativeF64;
    fn mul(self, rhs: &'b NativeF64) -> NativeF64 {
        NativeF64(self.0 * rhs.0)
    }
}

impl Neg for NativeF64 {
    type Output = NativeF64;
    fn neg(self) -> NativeF64 {
        NativeF64(-self.0)
    }
}

impl PartialOrd for NativeF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // total_cmp keeps -0.0 and NaN deterministic
        Some(self.0.total_cmp(&other.0))
    }
}

impl Zero for NativeF64 {
    fn zero() -> Self {
        NativeF64(0.0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl One for NativeF64 {
    fn one() -> Self {
        NativeF64(1.0)
    }
}

impl ComputeScalar for NativeF64 {
    const EXACT: bool = false;

    fn from_f64(value: f64) -> Self {
        NativeF64(value)
    }

    fn to_f64(&self) -> f64 {
        self.0
    }

    fn sign(&self) -> i8 {
        if self.0 > 0.0 {
            1
        } else if self.0 < 0.0 {
            -1
        } else {
            0
        }
    }

    fn cmp_total(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl<B: Blocks> ComputeScalar for Dyadic<B> {
    const EXACT: bool = true;

    fn from_f64(value: f64) -> Self {
        Dyadic::from_f64(value)
    }

    fn to_f64(&self) -> f64 {
        Dyadic::to_f64(self)
    }

    fn sign(&self) -> i8 {
        Dyadic::sign(self)
    }

    fn cmp_total(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<B: Blocks> ComputeScalar for BigRational<B> {
    const EXACT: bool = true;

    fn from_f64(value: f64) -> Self {
        BigRational::from_f64(value)
    }

    fn to_f64(&self) -> f64 {
        BigRational::to_f64(self)
    }

    fn sign(&self) -> i8 {
        BigRational::sign(self)
    }

    fn cmp_total(&self, other: &Self) -> Ordering {
        self.cmp_ref(other)
    }
}

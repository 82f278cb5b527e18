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

//! Exact rationals over dyadic numerator and denominator.
//!
//! Fractions are never reduced to lowest terms; exactness matters here,
//! size does not. The denominator is kept positive, so comparisons can
//! cross-multiply without flipping the inequality.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::numeric::dyadic::Dyadic;
use crate::numeric::uint32::{Blocks, FixedBlocks};

#[derive(Clone, Debug)]
pub struct BigRational<B: Blocks> {
    num: Dyadic<B>,
    den: Dyadic<B>,
}

pub type BigRationalFlex = BigRational<Vec<u32>>;
pub type BigRationalFixed<const N: usize> = BigRational<FixedBlocks<N>>;

impl<B: Blocks> BigRational<B> {
    /// Build `num / den`; precondition `den != 0`. The sign is normalized
    /// onto the numerator.
    pub fn new(num: Dyadic<B>, den: Dyadic<B>) -> Self {
        assert!(!den.is_zero(), "rational with zero denominator");
        if den.sign() < 0 {
            BigRational {
                num: num.negate(),
                den: den.negate(),
            }
        } else {
            BigRational { num, den }
        }
    }

    pub fn zero() -> Self {
        BigRational {
            num: Dyadic::zero(),
            den: Dyadic::one(),
        }
    }

    pub fn one() -> Self {
        BigRational {
            num: Dyadic::one(),
            den: Dyadic::one(),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        BigRational {
            num: Dyadic::from_f64(value),
            den: Dyadic::one(),
        }
    }

    pub fn numerator(&self) -> &Dyadic<B> {
        &self.num
    }

    pub fn denominator(&self) -> &Dyadic<B> {
        &self.den
    }

    pub fn sign(&self) -> i8 {
        self.num.sign()
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn negate(&self) -> Self {
        BigRational {
            num: self.num.negate(),
            den: self.den.clone(),
        }
    }

    pub fn add_ref(&self, other: &Self) -> Self {
        // a/b + c/d = (ad + cb) / bd
        let num = self
            .num
            .mul_ref(&other.den)
            .add_ref(&other.num.mul_ref(&self.den));
        BigRational {
            num,
            den: self.den.mul_ref(&other.den),
        }
    }

    pub fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&other.negate())
    }

    pub fn mul_ref(&self, other: &Self) -> Self {
        BigRational {
            num: self.num.mul_ref(&other.num),
            den: self.den.mul_ref(&other.den),
        }
    }

    /// Exact division; precondition `other != 0`.
    pub fn div_ref(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "rational division by zero");
        Self::new(
            self.num.mul_ref(&other.den),
            self.den.mul_ref(&other.num),
        )
    }

    /// Cross-multiplied comparison; both denominators are positive so the
    /// inequality direction is preserved.
    pub fn cmp_ref(&self, other: &Self) -> Ordering {
        self.num
            .mul_ref(&other.den)
            .cmp(&other.num.mul_ref(&self.den))
    }

    /// Nearest double. The numerator and denominator are rounded to doubles
    /// independently before the final division, so the result can carry up
    /// to two rounding steps; sign and zero are always faithful.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        self.num.to_f64() / self.den.to_f64()
    }
}

impl<B: Blocks> PartialEq for BigRational<B> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_ref(other) == Ordering::Equal
    }
}

impl<B: Blocks> Eq for BigRational<B> {}

impl<B: Blocks> PartialOrd for BigRational<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_ref(other))
    }
}

impl<B: Blocks> Ord for BigRational<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_ref(other)
    }
}

impl<B: Blocks> Neg for BigRational<B> {
    type Output = BigRational<B>;
    fn neg(self) -> BigRational<B> {
        self.negate()
    }
}

impl<B: Blocks> Add for BigRational<B> {
    type Output = BigRational<B>;
    fn add(self, rhs: BigRational<B>) -> BigRational<B> {
        self.add_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Add<&'b BigRational<B>> for &'a BigRational<B> {
    type Output = BigRational<B>;
    fn add(self, rhs: &'b BigRational<B>) -> BigRational<B> {
        self.add_ref(rhs)
    }
}

impl<B: Blocks> Sub for BigRational<B> {
    type Output = BigRational<B>;
    fn sub(self, rhs: BigRational<B>) -> BigRational<B> {
        self.sub_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Sub<&'b BigRational<B>> for &'a BigRational<B> {
    type Output = BigRational<B>;
    fn sub(self, rhs: &'b BigRational<B>) -> BigRational<B> {
        self.sub_ref(rhs)
    }
}

impl<B: Blocks> Mul for BigRational<B> {
    type Output = BigRational<B>;
    fn mul(self, rhs: BigRational<B>) -> BigRational<B> {
        self.mul_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Mul<&'b BigRational<B>> for &'a BigRational<B> {
    type Output = BigRational<B>;
    fn mul(self, rhs: &'b BigRational<B>) -> BigRational<B> {
        self.mul_ref(rhs)
    }
}

impl<B: Blocks> Div for BigRational<B> {
    type Output = BigRational<B>;
    fn div(self, rhs: BigRational<B>) -> BigRational<B> {
        self.div_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Div<&'b BigRational<B>> for &'a BigRational<B> {
    type Output = BigRational<B>;
    fn div(self, rhs: &'b BigRational<B>) -> BigRational<B> {
        self.div_ref(rhs)
    }
}

impl<B: Blocks> num_traits::Zero for BigRational<B> {
    fn zero() -> Self {
        BigRational::zero()
    }
    fn is_zero(&self) -> bool {
        BigRational::is_zero(self)
    }
}

impl<B: Blocks> num_traits::One for BigRational<B> {
    fn one() -> Self {
        BigRational::one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_times_three_is_one() {
        let third = BigRationalFlex::new(Dyadic::one(), Dyadic::from_i64(3));
        let three = BigRationalFlex::from_f64(3.0);
        assert_eq!(third.mul_ref(&three), BigRationalFlex::one());
    }

    #[test]
    fn division_is_exact_and_unreduced() {
        let a = BigRationalFlex::from_f64(0.1);
        let b = BigRationalFlex::from_f64(0.3);
        let q = a.div_ref(&b);
        // 0.1 and 0.3 are not exact in binary, but the quotient of their
        // exact images times the divisor gives back the dividend exactly
        assert_eq!(q.mul_ref(&b), a);
    }

    #[test]
    fn denominator_sign_is_normalized() {
        let r = BigRationalFlex::new(Dyadic::from_i64(1), Dyadic::from_i64(-2));
        assert_eq!(r.sign(), -1);
        assert_eq!(r.denominator().sign(), 1);
        assert_eq!(r.to_f64(), -0.5);
    }

    #[test]
    fn compare_avoids_division() {
        let a = BigRationalFlex::new(Dyadic::from_i64(1), Dyadic::from_i64(3));
        let b = BigRationalFlex::new(Dyadic::from_i64(2), Dyadic::from_i64(5));
        assert!(a < b);
        assert!(b > a);
    }
}

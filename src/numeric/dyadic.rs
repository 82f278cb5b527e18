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

//! Signed arbitrary-precision dyadic numbers.
//!
//! A `Dyadic` is `sign * mantissa * 2^exponent` with the mantissa kept odd
//! whenever the value is nonzero. Because the representation is canonical
//! (odd mantissa, fixed zero form), structural equality is value equality.
//!
//! Addition, subtraction and multiplication are exact; there is no division
//! operator, by design, so predicate code built on this type can never ask
//! for an operation that would force rounding. Division lives one layer up
//! in [`BigRational`](crate::numeric::rational::BigRational).

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use crate::numeric::uint32::{Blocks, FixedBlocks, UInt32};

#[derive(Clone, Debug)]
pub struct Dyadic<B: Blocks> {
    sign: i8,
    exponent: i32,
    mantissa: UInt32<B>,
}

// Written out because `Blocks` storage is not itself comparable; the
// canonical form makes field equality value equality.
impl<B: Blocks> PartialEq for Dyadic<B> {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign
            && self.exponent == other.exponent
            && self.mantissa == other.mantissa
    }
}

impl<B: Blocks> Eq for Dyadic<B> {}

/// Heap-growing dyadic with no precision ceiling.
pub type DyadicFlex = Dyadic<Vec<u32>>;

/// Fixed-width dyadic with a static capacity of `N` 32-bit words.
pub type DyadicFixed<const N: usize> = Dyadic<FixedBlocks<N>>;

impl<B: Blocks> Dyadic<B> {
    pub fn zero() -> Self {
        Dyadic {
            sign: 0,
            exponent: 0,
            mantissa: UInt32::zero(),
        }
    }

    pub fn one() -> Self {
        Dyadic {
            sign: 1,
            exponent: 0,
            mantissa: UInt32::from_u64(1),
        }
    }

    /// Exact conversion from an IEEE-754 double. The bit pattern is
    /// decomposed into sign, mantissa (implicit leading bit restored for
    /// normals) and exponent, then the mantissa is shifted right to odd.
    /// Precondition: `value` is finite.
    pub fn from_f64(value: f64) -> Self {
        assert!(value.is_finite(), "dyadic conversion requires a finite value");
        let bits = value.to_bits();
        let sign = if bits >> 63 == 1 { -1i8 } else { 1 };
        let exp_field = ((bits >> 52) & 0x7FF) as i32;
        let frac = bits & ((1u64 << 52) - 1);
        let (mant, exponent) = if exp_field == 0 {
            if frac == 0 {
                return Self::zero();
            }
            (frac, -1074) // subnormal
        } else {
            (frac | (1u64 << 52), exp_field - 1075)
        };
        Self::from_parts(sign, UInt32::from_u64(mant), exponent)
    }

    /// Exact conversion from an IEEE-754 single.
    pub fn from_f32(value: f32) -> Self {
        assert!(value.is_finite(), "dyadic conversion requires a finite value");
        let bits = value.to_bits();
        let sign = if bits >> 31 == 1 { -1i8 } else { 1 };
        let exp_field = ((bits >> 23) & 0xFF) as i32;
        let frac = (bits & ((1u32 << 23) - 1)) as u64;
        let (mant, exponent) = if exp_field == 0 {
            if frac == 0 {
                return Self::zero();
            }
            (frac, -149)
        } else {
            (frac | (1u64 << 23), exp_field - 150)
        };
        Self::from_parts(sign, UInt32::from_u64(mant), exponent)
    }

    pub fn from_i64(value: i64) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let sign = if value < 0 { -1i8 } else { 1 };
        Self::from_parts(sign, UInt32::from_u64(value.unsigned_abs()), 0)
    }

    fn from_parts(sign: i8, mantissa: UInt32<B>, exponent: i32) -> Self {
        debug_assert!(sign != 0 && !mantissa.is_zero());
        let (odd, shift) = mantissa.shift_right_to_odd();
        Dyadic {
            sign,
            exponent: exponent + shift as i32,
            mantissa: odd,
        }
    }

    pub fn sign(&self) -> i8 {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn mantissa(&self) -> &UInt32<B> {
        &self.mantissa
    }

    pub fn abs(&self) -> Self {
        let mut r = self.clone();
        r.sign = r.sign.abs();
        r
    }

    pub fn negate(&self) -> Self {
        let mut r = self.clone();
        r.sign = -r.sign;
        r
    }

    /// Position of the most-significant bit: the value's magnitude lies in
    /// `[2^(p-1), 2^p)`.
    fn msb_position(&self) -> i64 {
        debug_assert!(self.sign != 0);
        self.exponent as i64 + self.mantissa.num_bits() as i64
    }

    /// Magnitude comparison of two nonzero values: leading bit positions
    /// first, then left-aligned mantissa windows.
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match self.msb_position().cmp(&other.msb_position()) {
            Ordering::Equal => self.mantissa.cmp_left_aligned(&other.mantissa),
            ord => ord,
        }
    }

    /// Denormalize both mantissas to a common exponent. This is the only
    /// place a mantissa is made even before an ALU call.
    fn align(&self, other: &Self) -> (UInt32<B>, UInt32<B>, i32) {
        let exp = self.exponent.min(other.exponent);
        let m0 = if self.exponent > exp {
            self.mantissa.shift_left((self.exponent - exp) as u32)
        } else {
            self.mantissa.clone()
        };
        let m1 = if other.exponent > exp {
            other.mantissa.shift_left((other.exponent - exp) as u32)
        } else {
            other.mantissa.clone()
        };
        (m0, m1, exp)
    }

    fn normalized(sign: i8, mantissa: UInt32<B>, exponent: i32) -> Self {
        debug_assert!(sign != 0 && !mantissa.is_zero());
        let (odd, shift) = mantissa.shift_right_to_odd();
        Dyadic {
            sign,
            exponent: exponent + shift as i32,
            mantissa: odd,
        }
    }

    pub fn add_ref(&self, other: &Self) -> Self {
        if self.sign == 0 {
            return other.clone();
        }
        if other.sign == 0 {
            return self.clone();
        }
        if self.sign == other.sign {
            let (m0, m1, exp) = self.align(other);
            return Self::normalized(self.sign, m0.add(&m1), exp);
        }
        // Opposite signs: subtract magnitudes, result takes the sign of the
        // larger operand.
        match self.cmp_magnitude(other) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                let (m0, m1, exp) = self.align(other);
                Self::normalized(self.sign, m0.sub(&m1), exp)
            }
            Ordering::Less => {
                let (m0, m1, exp) = self.align(other);
                Self::normalized(other.sign, m1.sub(&m0), exp)
            }
        }
    }

    pub fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&other.negate())
    }

    pub fn mul_ref(&self, other: &Self) -> Self {
        if self.sign == 0 || other.sign == 0 {
            return Self::zero();
        }
        let mantissa = self.mantissa.mul(&other.mantissa);
        // odd * odd stays odd, so no renormalization is needed
        debug_assert!(mantissa.is_odd());
        Dyadic {
            sign: self.sign * other.sign,
            exponent: self.exponent + other.exponent,
            mantissa,
        }
    }

    /// Nearest IEEE-754 double (ties to even), with overflow to infinity
    /// and gradual underflow through the subnormal range.
    pub fn to_f64(&self) -> f64 {
        if self.sign == 0 {
            return 0.0;
        }
        let nb = self.mantissa.num_bits() as i64;
        let p = self.msb_position();
        if p > 1024 {
            return if self.sign > 0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        // Bits the target format can hold at this magnitude.
        let prec = if p >= -1021 { 53 } else { 1074 + p };
        if prec <= 0 {
            // `prec == 0` puts the magnitude in [2^-1075, 2^-1074): above
            // the halfway point it rounds up to the smallest subnormal;
            // exactly halfway (a one-bit mantissa) ties to even, zero.
            if prec == 0 && self.mantissa.num_bits() > 1 {
                return if self.sign > 0 {
                    f64::from_bits(1)
                } else {
                    -f64::from_bits(1)
                };
            }
            return if self.sign > 0 { 0.0 } else { -0.0 };
        }
        if nb <= prec {
            return Self::compose_f64(self.sign, self.mantissa.to_u64(), self.exponent as i64);
        }
        let drop = (nb - prec) as u32;
        let mut t = self.top_bits(prec as u32);
        let mut exp = self.exponent as i64 + drop as i64;
        let guard = self.mantissa.bit(drop - 1);
        // mantissa is odd, so any bit below the guard implies a sticky one
        let sticky = drop >= 2;
        if guard && (sticky || (t & 1) == 1) {
            t += 1;
            if t == 1u64 << prec {
                t >>= 1;
                exp += 1;
                if exp + prec > 1024 {
                    return if self.sign > 0 {
                        f64::INFINITY
                    } else {
                        f64::NEG_INFINITY
                    };
                }
            }
        }
        Self::compose_f64(self.sign, t, exp)
    }

    fn top_bits(&self, keep: u32) -> u64 {
        debug_assert!(keep <= 53 && keep <= self.mantissa.num_bits());
        let drop = self.mantissa.num_bits() - keep;
        let mut t = 0u64;
        for i in 0..keep {
            if self.mantissa.bit(drop + i) {
                t |= 1u64 << i;
            }
        }
        t
    }

    /// Exact `sign * t * 2^e` as a double; `t` has at most 53 significant
    /// bits and the magnitude is within range by construction.
    fn compose_f64(sign: i8, t: u64, e: i64) -> f64 {
        debug_assert!(t != 0);
        let shift = 63 - t.leading_zeros() as i64;
        let biased = e + shift + 1023;
        let bits = if biased >= 1 {
            let frac = (t << (52 - shift)) & ((1u64 << 52) - 1);
            ((biased as u64) << 52) | frac
        } else {
            // subnormal: mantissa field is the value scaled by 2^1074
            let sh = e + 1074;
            debug_assert!((0..52).contains(&(sh + shift)));
            t << sh
        };
        let bits = bits | if sign < 0 { 1u64 << 63 } else { 0 };
        f64::from_bits(bits)
    }
}

impl<B: Blocks> PartialOrd for Dyadic<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B: Blocks> Ord for Dyadic<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {}
            ord => return ord,
        }
        if self.sign == 0 {
            return Ordering::Equal;
        }
        let mag = self.cmp_magnitude(other);
        if self.sign > 0 { mag } else { mag.reverse() }
    }
}

impl<B: Blocks> Neg for Dyadic<B> {
    type Output = Dyadic<B>;
    fn neg(self) -> Dyadic<B> {
        self.negate()
    }
}

impl<B: Blocks> Add for Dyadic<B> {
    type Output = Dyadic<B>;
    fn add(self, rhs: Dyadic<B>) -> Dyadic<B> {
        self.add_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Add<&'b Dyadic<B>> for &'a Dyadic<B> {
    type Output = Dyadic<B>;
    fn add(self, rhs: &'b Dyadic<B>) -> Dyadic<B> {
        self.add_ref(rhs)
    }
}

impl<B: Blocks> Sub for Dyadic<B> {
    type Output = Dyadic<B>;
    fn sub(self, rhs: Dyadic<B>) -> Dyadic<B> {
        self.sub_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Sub<&'b Dyadic<B>> for &'a Dyadic<B> {
    type Output = Dyadic<B>;
    fn sub(self, rhs: &'b Dyadic<B>) -> Dyadic<B> {
        self.sub_ref(rhs)
    }
}

impl<B: Blocks> Mul for Dyadic<B> {
    type Output = Dyadic<B>;
    fn mul(self, rhs: Dyadic<B>) -> Dyadic<B> {
        self.mul_ref(&rhs)
    }
}

impl<'a, 'b, B: Blocks> Mul<&'b Dyadic<B>> for &'a Dyadic<B> {
    type Output = Dyadic<B>;
    fn mul(self, rhs: &'b Dyadic<B>) -> Dyadic<B> {
        self.mul_ref(rhs)
    }
}

impl<B: Blocks> num_traits::Zero for Dyadic<B> {
    fn zero() -> Self {
        Dyadic::zero()
    }
    fn is_zero(&self) -> bool {
        Dyadic::is_zero(self)
    }
}

impl<B: Blocks> num_traits::One for Dyadic<B> {
    fn one() -> Self {
        Dyadic::one()
    }
}

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

//! Unsigned big-integer storage and ALU.
//!
//! `UInt32` is a nonnegative integer stored as little-endian 32-bit blocks
//! plus a bit-length counter. The highest occupied block always has its
//! leading bit inside `num_bits`; bits above `num_bits` are zero. The zero
//! value has `num_bits == 0` and empty storage.
//!
//! Callers (the dyadic layer) establish the odd-mantissa preconditions;
//! violating a precondition here is an implementation defect and fails
//! loudly rather than producing a silently wrong value.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Backing storage for the 32-bit block sequence.
///
/// Two implementations: `Vec<u32>` grows on the heap with no precision
/// ceiling, `FixedBlocks<N>` is an inline array for static worst-case
/// sizing. Exceeding a fixed capacity panics; with correctly pre-computed
/// word growth (see [`add_max_blocks`], [`mul_max_blocks`]) it never fires.
pub trait Blocks: Clone + Debug {
    /// Zero-filled storage for `num_blocks` blocks.
    fn alloc(num_blocks: usize) -> Self;
    fn as_slice(&self) -> &[u32];
    fn as_mut_slice(&mut self) -> &mut [u32];
    fn truncate(&mut self, num_blocks: usize);
}

impl Blocks for Vec<u32> {
    fn alloc(num_blocks: usize) -> Self {
        vec![0; num_blocks]
    }
    fn as_slice(&self) -> &[u32] {
        self
    }
    fn as_mut_slice(&mut self) -> &mut [u32] {
        self
    }
    fn truncate(&mut self, num_blocks: usize) {
        Vec::truncate(self, num_blocks);
    }
}

/// Inline block storage with a compile-time capacity of `N` blocks
/// (`32 * N` bits).
#[derive(Clone, Debug)]
pub struct FixedBlocks<const N: usize> {
    len: usize,
    data: [u32; N],
}

impl<const N: usize> Blocks for FixedBlocks<N> {
    fn alloc(num_blocks: usize) -> Self {
        assert!(
            num_blocks <= N,
            "fixed-width overflow: {} blocks requested, capacity {}",
            num_blocks,
            N
        );
        FixedBlocks {
            len: num_blocks,
            data: [0; N],
        }
    }
    fn as_slice(&self) -> &[u32] {
        &self.data[..self.len]
    }
    fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data[..self.len]
    }
    fn truncate(&mut self, num_blocks: usize) {
        if num_blocks < self.len {
            self.len = num_blocks;
        }
    }
}

/// Worst-case block count of `add` given the operand block counts.
pub const fn add_max_blocks(n0: usize, n1: usize) -> usize {
    let m = if n0 > n1 { n0 } else { n1 };
    m + 1
}

/// Worst-case block count of `mul` given the operand block counts.
pub const fn mul_max_blocks(n0: usize, n1: usize) -> usize {
    n0 + n1
}

#[derive(Clone, Debug)]
pub struct UInt32<B: Blocks> {
    num_bits: u32,
    blocks: B,
}

impl<B: Blocks> UInt32<B> {
    pub fn zero() -> Self {
        UInt32 {
            num_bits: 0,
            blocks: B::alloc(0),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let num_bits = 64 - value.leading_zeros();
        let nb = Self::blocks_for(num_bits);
        let mut blocks = B::alloc(nb);
        let s = blocks.as_mut_slice();
        s[0] = value as u32;
        if nb > 1 {
            s[1] = (value >> 32) as u32;
        }
        UInt32 { num_bits, blocks }
    }

    pub fn is_zero(&self) -> bool {
        self.num_bits == 0
    }

    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    pub fn num_blocks(&self) -> usize {
        Self::blocks_for(self.num_bits)
    }

    pub fn is_odd(&self) -> bool {
        self.num_bits > 0 && (self.blocks.as_slice()[0] & 1) == 1
    }

    pub fn bit(&self, index: u32) -> bool {
        if index >= self.num_bits {
            return false;
        }
        let s = self.blocks.as_slice();
        (s[(index / 32) as usize] >> (index % 32)) & 1 == 1
    }

    /// The value as a `u64`; precondition `num_bits <= 64`.
    pub fn to_u64(&self) -> u64 {
        assert!(self.num_bits <= 64, "value does not fit in 64 bits");
        let s = self.blocks.as_slice();
        let lo = s.first().copied().unwrap_or(0) as u64;
        let hi = s.get(1).copied().unwrap_or(0) as u64;
        lo | (hi << 32)
    }

    const fn blocks_for(bits: u32) -> usize {
        ((bits + 31) / 32) as usize
    }

    fn block(&self, index: usize) -> u32 {
        self.blocks.as_slice().get(index).copied().unwrap_or(0)
    }

    /// 64 bits starting at bit position `lo` (positions outside
    /// `[0, num_bits)` read as zero; `lo` may be negative, padding at the
    /// bottom).
    fn extract64(&self, lo: i64) -> u64 {
        if lo <= -64 {
            return 0;
        }
        if lo < 0 {
            let keep = (64 + lo) as u32;
            let mask = if keep >= 64 { u64::MAX } else { (1u64 << keep) - 1 };
            return (self.extract64(0) & mask) << (-lo) as u32;
        }
        let bi = (lo / 32) as usize;
        let off = (lo % 32) as u32;
        let b0 = self.block(bi) as u64;
        let b1 = self.block(bi + 1) as u64;
        let b2 = self.block(bi + 2) as u64;
        let lo64 = (b0 | (b1 << 32)) >> off;
        if off == 0 { lo64 } else { lo64 | (b2 << (64 - off)) }
    }

    /// 32-bit window `w` steps down from the most-significant bit. Window 0
    /// holds the top 32 bits left-aligned; windows span block boundaries
    /// when `num_bits` is not a multiple of 32.
    fn window_from_top(&self, w: usize) -> u32 {
        let lo = self.num_bits as i64 - 32 * (w as i64 + 1);
        (self.extract64(lo) & 0xFFFF_FFFF) as u32
    }

    /// Plain integer comparison (both operands at the same alignment).
    pub fn cmp_value(&self, other: &UInt32<impl Blocks>) -> Ordering {
        if self.num_bits != other.num_bits {
            return self.num_bits.cmp(&other.num_bits);
        }
        let a = self.blocks.as_slice();
        let b = other.blocks.as_slice();
        for i in (0..a.len()).rev() {
            if a[i] != b[i] {
                return a[i].cmp(&b[i]);
            }
        }
        Ordering::Equal
    }

    /// Mantissa comparison with both operands conceptually left-aligned at
    /// their most-significant bit: 32-bit windows from the top down decide.
    /// Used by the dyadic layer after it has matched the operands' leading
    /// bit positions.
    pub fn cmp_left_aligned(&self, other: &UInt32<impl Blocks>) -> Ordering {
        let wa = Self::blocks_for(self.num_bits);
        let wb = ((other.num_bits() + 31) / 32) as usize;
        let n = wa.max(wb);
        for w in 0..n {
            let x = self.window_from_top(w);
            let y = other.window_from_top(w);
            if x != y {
                return x.cmp(&y);
            }
        }
        Ordering::Equal
    }

    /// Rebuild `num_bits` from the top nonzero block and drop leading-zero
    /// blocks. `filled` is the number of blocks that may hold data.
    fn normalize(mut blocks: B, filled: usize) -> Self {
        let mut top = filled;
        {
            let s = blocks.as_slice();
            while top > 0 && s[top - 1] == 0 {
                top -= 1;
            }
        }
        blocks.truncate(top);
        if top == 0 {
            return UInt32 {
                num_bits: 0,
                blocks,
            };
        }
        let lead = blocks.as_slice()[top - 1].leading_zeros();
        UInt32 {
            num_bits: 32 * top as u32 - lead,
            blocks,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let n = add_max_blocks(self.num_blocks(), other.num_blocks());
        let mut out = B::alloc(n);
        {
            let s = out.as_mut_slice();
            let mut carry = 0u64;
            for i in 0..n {
                let sum = self.block(i) as u64 + other.block(i) as u64 + carry;
                s[i] = sum as u32;
                carry = sum >> 32;
            }
            debug_assert_eq!(carry, 0);
        }
        Self::normalize(out, n)
    }

    /// Difference `self - other`; precondition `self > other`. Implemented
    /// as two's complement of `other` zero-extended to `self`'s block
    /// count, then addition with the top carry discarded.
    pub fn sub(&self, other: &Self) -> Self {
        assert!(
            self.cmp_value(other) == Ordering::Greater,
            "sub precondition violated: minuend must exceed subtrahend"
        );
        let n = self.num_blocks();
        let mut out = B::alloc(n);
        {
            let s = out.as_mut_slice();
            let mut carry = 1u64; // the +1 of the two's complement
            for i in 0..n {
                let sum = self.block(i) as u64 + (!other.block(i)) as u64 + carry;
                s[i] = sum as u32;
                carry = sum >> 32;
            }
        }
        let result = Self::normalize(out, n);
        assert!(
            !result.is_zero(),
            "sub produced zero for strictly ordered operands"
        );
        result
    }

    /// Schoolbook O(n*m) multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let na = self.num_blocks();
        let nb = other.num_blocks();
        let n = mul_max_blocks(na, nb);
        let mut out = B::alloc(n);
        {
            let s = out.as_mut_slice();
            for i in 0..na {
                let ai = self.block(i) as u64;
                let mut carry = 0u64;
                for j in 0..nb {
                    let t = s[i + j] as u64 + ai * other.block(j) as u64 + carry;
                    s[i + j] = t as u32;
                    carry = t >> 32;
                }
                let t = s[i + nb] as u64 + carry;
                s[i + nb] = t as u32;
                debug_assert_eq!(t >> 32, 0);
            }
        }
        Self::normalize(out, n)
    }

    pub fn shift_left(&self, shift: u32) -> Self {
        if self.is_zero() || shift == 0 {
            return self.clone();
        }
        let new_bits = self.num_bits + shift;
        let n = Self::blocks_for(new_bits);
        let block_shift = (shift / 32) as usize;
        let bit_shift = shift % 32;
        let mut out = B::alloc(n);
        {
            let s = out.as_mut_slice();
            for i in (block_shift..n).rev() {
                let src = i - block_shift;
                let hi = (self.block(src) as u64) << bit_shift;
                let lo = if bit_shift == 0 || src == 0 {
                    0
                } else {
                    (self.block(src - 1) as u64) >> (32 - bit_shift)
                };
                s[i] = (hi | lo) as u32;
            }
        }
        let out = Self::normalize(out, n);
        debug_assert_eq!(out.num_bits, new_bits);
        out
    }

    /// Right-shift until the least-significant bit is 1; returns the shifted
    /// value and the shift amount. Precondition: nonzero.
    pub fn shift_right_to_odd(&self) -> (Self, u32) {
        assert!(!self.is_zero(), "shift_right_to_odd on zero");
        let s = self.blocks.as_slice();
        let mut block_idx = 0;
        while s[block_idx] == 0 {
            block_idx += 1;
        }
        let shift = 32 * block_idx as u32 + s[block_idx].trailing_zeros();
        if shift == 0 {
            return (self.clone(), 0);
        }
        let new_bits = self.num_bits - shift;
        let n = Self::blocks_for(new_bits);
        let bit_shift = shift % 32;
        let block_shift = (shift / 32) as usize;
        let mut out = B::alloc(n);
        {
            let d = out.as_mut_slice();
            for i in 0..n {
                let lo = (self.block(i + block_shift) as u64) >> bit_shift;
                let hi = if bit_shift == 0 {
                    0
                } else {
                    (self.block(i + block_shift + 1) as u64) << (32 - bit_shift)
                };
                d[i] = (lo | hi) as u32;
            }
        }
        let out = Self::normalize(out, n);
        debug_assert_eq!(out.num_bits, new_bits);
        debug_assert!(out.is_odd());
        (out, shift)
    }

    /// Add one, then normalize to odd; the returned shift is the amount by
    /// which the incremented value was shifted right.
    pub fn round_up(&self) -> (Self, u32) {
        let one = Self::from_u64(1);
        self.add(&one).shift_right_to_odd()
    }
}

impl<B: Blocks> PartialEq for UInt32<B> {
    fn eq(&self, other: &Self) -> bool {
        self.num_bits == other.num_bits && self.blocks.as_slice() == other.blocks.as_slice()
    }
}

impl<B: Blocks> Eq for UInt32<B> {}

impl<B: Blocks> PartialOrd for UInt32<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<B: Blocks> Ord for UInt32<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
    }
}

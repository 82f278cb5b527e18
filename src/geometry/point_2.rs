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

use crate::numeric::scalar::ComputeScalar;

#[derive(Clone, Debug, PartialEq)]
pub struct Point2<T>
where
    T: ComputeScalar,
{
    pub x: T,
    pub y: T,
}

impl<T> Point2<T>
where
    T: ComputeScalar,
{
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Exact image of a native coordinate pair in the compute type.
    pub fn from_f64s(x: f64, y: f64) -> Self {
        Self {
            x: T::from_f64(x),
            y: T::from_f64(y),
        }
    }

    pub fn to_f64s(&self) -> [f64; 2] {
        [self.x.to_f64(), self.y.to_f64()]
    }
}

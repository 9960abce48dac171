// BSD 2-Clause License
//
// Copyright (c) 2026 The trivalent developers
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are
// met:
//
// 1. Redistributions of source code must retain the above copyright
// notice, this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright
// notice, this list of conditions and the following disclaimer in the
// documentation and/or other materials provided with the distribution.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT
// HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE,
// DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY
// THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
// (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! This module defines the three-valued bitvector trait [TV] and the
//! canonical implementation [Tv64] for values up to 64 bits.
//!
//! A three-valued word is a fixed-width integer in which every bit is
//! either a known 0, a known 1, or unknown. Such words represent
//! register and memory contents during abstract interpretation of
//! lifted machine code, where only some bits of a value may have been
//! determined. The operand layer in [crate::operand] is parametric
//! over this trait, so a consumer with a different representation (a
//! wider word, an interned one) can supply its own.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

pub mod tv64;

pub use tv64::Tv64;

/// Mask selecting the low `len` bits of a 64-bit word. Well-defined
/// for the whole `0..=64` range.
pub fn lo_mask(len: u32) -> u64 {
    let lt64 = ((len < 64) as u64).wrapping_neg();
    (1u64.wrapping_shl(len) & lt64).wrapping_sub(1)
}

/// The contract a three-valued word must satisfy for the operand layer
/// to store it. Widths are fixed at construction; `resize` is the only
/// way to change one. All mask accessors report positions relative to
/// bit 0 and never set bits at or above `len`.
pub trait TV
where
    Self: fmt::Debug + fmt::Display,
    Self: Copy + Clone + PartialEq + Eq + Hash + Send + Sync,
    Self: Serialize + DeserializeOwned,
    Self: 'static,
{
    /// Maximum representable width in bits.
    const MAX_WIDTH: u32;

    /// A fully-known word. `bits` must fit in `len` bits.
    ///
    /// # Panics
    ///
    /// `len` must be at most `MAX_WIDTH` and `bits` must not exceed it.
    fn new(bits: u64, len: u32) -> Self;

    /// A word of `len` bits, none of them determined.
    fn unknown(len: u32) -> Self;

    /// A word with an explicit unknown mask. The known one-bits and the
    /// unknown mask must be disjoint and within the width.
    fn partial(bits: u64, unknown: u64, len: u32) -> Self;

    fn zero_width() -> Self {
        Self::new(0, 0)
    }

    fn zeros(len: u32) -> Self {
        Self::new(0, len)
    }

    fn ones(len: u32) -> Self;

    fn len(self) -> u32;

    fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Mask of positions holding a definite 0 or 1.
    fn known_mask(self) -> u64;

    /// Mask of positions whose value is not determined.
    fn unknown_mask(self) -> u64;

    /// Bits known to be one.
    fn known_ones(self) -> u64;

    /// Bits known to be zero.
    fn known_zeros(self) -> u64;

    /// Whether every bit is determined. A width-0 word holds no value
    /// and reports false.
    fn is_known(self) -> bool;

    /// The represented value, if every bit is known.
    fn get(self) -> Option<u64>;

    /// The represented value interpreted as a two's-complement signed
    /// integer of the word's width, if every bit is known.
    fn get_signed(self) -> Option<i64>;

    /// Change the width. Truncation drops high bits. Zero extension
    /// adds known-zero bits. Sign extension replicates the top bit,
    /// including its unknownness, so a word with an unknown sign bit
    /// grows into unknown high bits.
    fn resize(self, new_len: u32, sign_extend: bool) -> Self;

    /// Parse a word from a string prefixed by `0x`/`#x` (hexadecimal)
    /// or `0b`/`#b` (binary). A `?` digit denotes unknown bits. Width
    /// is determined by the digit count, so leading zeros matter.
    /// Returns `None` if the string is not parseable for any reason.
    fn from_str(s: &str) -> Option<Self>;
}

/// Writes `#x`/`#b` notation with `?` for unknown digits. Hexadecimal
/// is only faithful when every nibble is fully known or fully unknown;
/// anything else falls back to binary.
pub(crate) fn write_tri_bits(f: &mut fmt::Formatter<'_>, bits: u64, unknown: u64, len: u32) -> fmt::Result {
    let hex = len % 4 == 0 && {
        let mut uniform = true;
        for i in 0..(len / 4) {
            let nibble = (unknown >> (i * 4)) & 0xF;
            uniform &= nibble == 0 || nibble == 0xF;
        }
        uniform
    };
    if hex {
        write!(f, "#x")?;
        for i in (0..(len / 4)).rev() {
            if (unknown >> (i * 4)) & 0xF != 0 {
                write!(f, "?")?
            } else {
                write!(f, "{:x}", (bits >> (i * 4)) & 0xF)?
            }
        }
    } else {
        write!(f, "#b")?;
        for i in (0..len).rev() {
            if (unknown >> i) & 1 != 0 {
                write!(f, "?")?
            } else {
                write!(f, "{}", (bits >> i) & 1)?
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lo_mask() {
        assert_eq!(lo_mask(0), 0);
        assert_eq!(lo_mask(1), 1);
        assert_eq!(lo_mask(4), 0xF);
        assert_eq!(lo_mask(8), 0xFF);
        assert_eq!(lo_mask(32), 0xFFFF_FFFF);
        assert_eq!(lo_mask(63), u64::MAX >> 1);
        assert_eq!(lo_mask(64), u64::MAX);
    }
}

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

//! This module defines the three-valued word type [Tv64] for widths up
//! to 64 bits, stored as the known one-bits plus a mask of unknown
//! positions.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use super::{lo_mask, write_tri_bits, TV};
use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tv64 {
    len: u32,
    /// Bits known to be one. Zero at unknown positions.
    bits: u64,
    /// Mask of positions whose value is not determined.
    unknown: u64,
}

impl fmt::Display for Tv64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tri_bits(f, self.bits, self.unknown, self.len)
    }
}

impl Default for Tv64 {
    fn default() -> Self {
        Tv64::zero_width()
    }
}

impl TV for Tv64 {
    const MAX_WIDTH: u32 = 64;

    fn new(bits: u64, len: u32) -> Self {
        assert!(len <= 64 && bits == bits & lo_mask(len));
        Tv64 { len, bits, unknown: 0 }
    }

    fn unknown(len: u32) -> Self {
        assert!(len <= 64);
        Tv64 { len, bits: 0, unknown: lo_mask(len) }
    }

    fn partial(bits: u64, unknown: u64, len: u32) -> Self {
        assert!(len <= 64);
        assert!(bits & unknown == 0);
        assert!(bits | unknown == (bits | unknown) & lo_mask(len));
        Tv64 { len, bits, unknown }
    }

    fn ones(len: u32) -> Self {
        assert!(len <= 64);
        Tv64 { len, bits: lo_mask(len), unknown: 0 }
    }

    fn len(self) -> u32 {
        self.len
    }

    fn known_mask(self) -> u64 {
        lo_mask(self.len) & !self.unknown
    }

    fn unknown_mask(self) -> u64 {
        self.unknown
    }

    fn known_ones(self) -> u64 {
        self.bits
    }

    fn known_zeros(self) -> u64 {
        lo_mask(self.len) & !(self.bits | self.unknown)
    }

    fn is_known(self) -> bool {
        self.len != 0 && self.unknown == 0
    }

    fn get(self) -> Option<u64> {
        if self.is_known() {
            Some(self.bits)
        } else {
            None
        }
    }

    fn get_signed(self) -> Option<i64> {
        if !self.is_known() {
            None
        } else if (self.bits >> (self.len - 1)) & 1 == 1 {
            Some((self.bits | !lo_mask(self.len)) as i64)
        } else {
            Some(self.bits as i64)
        }
    }

    fn resize(self, new_len: u32, sign_extend: bool) -> Self {
        assert!(new_len <= 64);
        if new_len <= self.len {
            Tv64 { len: new_len, bits: self.bits & lo_mask(new_len), unknown: self.unknown & lo_mask(new_len) }
        } else if sign_extend && self.len > 0 {
            let top = 1u64 << (self.len - 1);
            let ext = lo_mask(new_len) & !lo_mask(self.len);
            if self.unknown & top != 0 {
                Tv64 { len: new_len, bits: self.bits, unknown: self.unknown | ext }
            } else if self.bits & top != 0 {
                Tv64 { len: new_len, bits: self.bits | ext, unknown: self.unknown }
            } else {
                Tv64 { len: new_len, ..self }
            }
        } else {
            Tv64 { len: new_len, ..self }
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("#x")) {
            if hex.len() > 16 {
                return None;
            }
            let mut bits = 0u64;
            let mut unknown = 0u64;
            for c in hex.chars() {
                bits <<= 4;
                unknown <<= 4;
                if c == '?' {
                    unknown |= 0xF
                } else {
                    bits |= u64::from(c.to_digit(16)?)
                }
            }
            Some(Tv64 { len: hex.len() as u32 * 4, bits, unknown })
        } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("#b")) {
            if bin.len() > 64 {
                return None;
            }
            let mut bits = 0u64;
            let mut unknown = 0u64;
            for c in bin.chars() {
                bits <<= 1;
                unknown <<= 1;
                match c {
                    '0' => (),
                    '1' => bits |= 1,
                    '?' => unknown |= 1,
                    _ => return None,
                }
            }
            Some(Tv64 { len: bin.len() as u32, bits, unknown })
        } else {
            None
        }
    }
}

macro_rules! try_from_unsigned {
    ($($ty:ty),*) => {$(
        impl TryFrom<Tv64> for $ty {
            type Error = Error;

            fn try_from(word: Tv64) -> Result<Self, Error> {
                let bits = word.get().ok_or(Error::NotKnown)?;
                <$ty>::try_from(bits).map_err(|_| Error::Overflow)
            }
        }
    )*};
}

macro_rules! try_from_signed {
    ($($ty:ty),*) => {$(
        impl TryFrom<Tv64> for $ty {
            type Error = Error;

            fn try_from(word: Tv64) -> Result<Self, Error> {
                let value = word.get_signed().ok_or(Error::NotKnown)?;
                <$ty>::try_from(value).map_err(|_| Error::Overflow)
            }
        }
    )*};
}

try_from_unsigned!(u8, u16, u32, u64);
try_from_signed!(i8, i16, i32, i64);

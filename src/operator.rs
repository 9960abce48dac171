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

//! This module defines [OperatorTag], the closed set of operation
//! identifiers attached to expression nodes. A tag carries no payload
//! and fixes no numeric semantics; what `MultiplyHigh` or `Cast`
//! computes is decided by whatever evaluates the tree. The descriptive
//! methods here exist so consumers can pretty-print and classify nodes
//! without tables of their own.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorTag {
    // Unary.
    BitwiseNot,
    Negate,
    Popcnt,
    Mask,
    BitCount,
    // Binary bitwise.
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    // Shifts and rotates.
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
    // Signed arithmetic.
    Add,
    Subtract,
    Multiply,
    MultiplyHigh,
    Divide,
    Remainder,
    // Unsigned arithmetic.
    Umultiply,
    UmultiplyHigh,
    Udivide,
    Uremainder,
    // Width changes.
    Cast,
    Ucast,
    // Bit test.
    BitTest,
    // Selection.
    ValueIf,
    MaxValue,
    MinValue,
    UmaxValue,
    UminValue,
    // Signed comparison.
    Greater,
    GreaterEq,
    Equal,
    NotEqual,
    LessEq,
    Less,
    // Unsigned comparison.
    Ugreater,
    UgreaterEq,
    UlessEq,
    Uless,
}

impl OperatorTag {
    /// Number of operands a node carrying this tag owns, 1 or 2.
    pub fn operand_count(self) -> usize {
        use OperatorTag::*;
        match self {
            BitwiseNot | Negate | Popcnt | Mask | BitCount => 1,
            _ => 2,
        }
    }

    /// Whether the operation treats its operands as unsigned.
    pub fn is_unsigned(self) -> bool {
        use OperatorTag::*;
        matches!(
            self,
            Umultiply | UmultiplyHigh | Udivide | Uremainder | Ucast | UmaxValue | UminValue | Ugreater | UgreaterEq | UlessEq | Uless
        )
    }

    /// Whether the node produces a boolean-valued (width 1) result.
    pub fn is_comparison(self) -> bool {
        use OperatorTag::*;
        matches!(
            self,
            Greater | GreaterEq | Equal | NotEqual | LessEq | Less | Ugreater | UgreaterEq | UlessEq | Uless
        )
    }

    pub fn symbol(self) -> &'static str {
        use OperatorTag::*;
        match self {
            BitwiseNot => "~",
            Negate => "-",
            Popcnt => "popcnt",
            Mask => "mask",
            BitCount => "bcnt",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            RotateLeft => "rotl",
            RotateRight => "rotr",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            MultiplyHigh => "h*",
            Divide => "/",
            Remainder => "%",
            Umultiply => "u*",
            UmultiplyHigh => "uh*",
            Udivide => "u/",
            Uremainder => "u%",
            Cast => "cast",
            Ucast => "ucast",
            BitTest => "bt",
            ValueIf => "?:",
            MaxValue => "max",
            MinValue => "min",
            UmaxValue => "umax",
            UminValue => "umin",
            Greater => ">",
            GreaterEq => ">=",
            Equal => "==",
            NotEqual => "!=",
            LessEq => "<=",
            Less => "<",
            Ugreater => "u>",
            UgreaterEq => "u>=",
            UlessEq => "u<=",
            Uless => "u<",
        }
    }
}

impl fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

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

//! Drives the operand algebra through a miniature IR expression type,
//! the way a lifter front end would consume it.

use serde::{Deserialize, Serialize};
use trivalent::bitvector::{Tv64, TV};
use trivalent::operand::{self, ExprNode, IntoOperand, Operable};
use trivalent::operator::OperatorTag;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Expr {
    word: Tv64,
    kind: Kind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Kind {
    Value,
    Unary { op: OperatorTag, value: Box<Expr> },
    Binary { op: OperatorTag, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    /// A leaf with no determined bits, standing for a register of the
    /// given width whose content has not been resolved yet.
    fn register(size: u32) -> Self {
        Expr { word: Tv64::unknown(size), kind: Kind::Value }
    }

    fn op(&self) -> Option<OperatorTag> {
        match &self.kind {
            Kind::Value => None,
            Kind::Unary { op, .. } => Some(*op),
            Kind::Binary { op, .. } => Some(*op),
        }
    }
}

impl Operable for Expr {
    type Word = Tv64;

    fn word(&self) -> &Tv64 {
        &self.word
    }

    fn word_mut(&mut self) -> &mut Tv64 {
        &mut self.word
    }

    // Unknown bits are representable here, so the known-only base case
    // is replaced wholesale.
    fn resize(&mut self, new_size: u32, sign_extend: bool) {
        self.word = self.word.resize(new_size, sign_extend);
    }
}

impl ExprNode for Expr {
    fn constant(value: u64, size: u32) -> Self {
        Expr { word: Tv64::new(value, size), kind: Kind::Value }
    }

    fn unary(op: OperatorTag, value: Self) -> Self {
        let size = value.size();
        Expr { word: Tv64::unknown(size), kind: Kind::Unary { op, value: Box::new(value) } }
    }

    fn binary(lhs: Self, op: OperatorTag, rhs: Self) -> Self {
        let size = if op.is_comparison() { 1 } else { lhs.size().max(rhs.size()) };
        Expr { word: Tv64::unknown(size), kind: Kind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) } }
    }
}

trivalent::impl_operand_ops!(Expr);

/// A guest register name, usable in expressions as if it were the
/// expression node it denotes.
#[derive(Copy, Clone, Debug)]
struct Reg {
    size: u32,
}

impl IntoOperand<Expr> for Reg {
    fn into_operand(self) -> Expr {
        Expr::register(self.size)
    }
}

trivalent::impl_operand_ops!(Reg => Expr);

#[test]
fn scenario_builds_tagged_nodes_in_order() {
    let a = Expr::constant(5, 8);
    let b = Expr::constant(3, 8);

    let sum = &a + &b;
    match &sum.kind {
        Kind::Binary { op, lhs, rhs } => {
            assert_eq!(*op, OperatorTag::Add);
            assert_eq!(**lhs, a);
            assert_eq!(**rhs, b);
        }
        other => panic!("expected an add node, got {:?}", other),
    }

    let inverted = !&a;
    match &inverted.kind {
        Kind::Unary { op, value } => {
            assert_eq!(*op, OperatorTag::BitwiseNot);
            assert_eq!(**value, a);
        }
        other => panic!("expected a bitwise not node, got {:?}", other),
    }

    assert_eq!(operand::greater(&a, &b).op(), Some(OperatorTag::Greater));
}

#[test]
fn comparisons_narrow_to_a_single_bit() {
    let a = Expr::constant(5, 32);
    let cmp: Expr = operand::uless(&a, 9u32);
    assert_eq!(cmp.size(), 1);
    let wide: Expr = operand::add(&a, 9u32);
    assert_eq!(wide.size(), 32);
}

#[test]
fn nested_trees_own_their_operands() {
    let lhs = Expr::constant(0xFFFF, 16) ^ 0xAAAAu16;
    let tree = operand::rotate_left(lhs.clone(), 4u8) - Expr::register(16);
    match &tree.kind {
        Kind::Binary { op, lhs: rot, rhs: reg } => {
            assert_eq!(*op, OperatorTag::Subtract);
            assert_eq!(rot.op(), Some(OperatorTag::RotateLeft));
            assert_eq!(reg.op(), None);
            assert!(!reg.is_constant());
            match &rot.kind {
                Kind::Binary { lhs: inner, .. } => assert_eq!(**inner, lhs),
                other => panic!("expected a rotate node, got {:?}", other),
            }
        }
        other => panic!("expected a subtract node, got {:?}", other),
    }
}

#[test]
fn registers_participate_as_aliases() {
    let rax = Reg { size: 64 };

    let incremented = rax + 1u64;
    match &incremented.kind {
        Kind::Binary { op, lhs, rhs } => {
            assert_eq!(*op, OperatorTag::Add);
            assert_eq!(lhs.size(), 64);
            assert!(!lhs.is_constant());
            assert_eq!(rhs.get(), Some(1));
        }
        other => panic!("expected an add node, got {:?}", other),
    }

    let masked = rax & Expr::constant(0xFF, 64);
    assert_eq!(masked.op(), Some(OperatorTag::BitwiseAnd));
    assert_eq!(operand::udivide(2u64, rax).op(), Some(OperatorTag::Udivide));
}

#[test]
fn overridden_resize_handles_unknown_bits() {
    let mut reg = Expr::register(8);
    reg.resize(16, false);
    assert_eq!(reg.size(), 16);
    assert_eq!(reg.unknown_mask(), 0xFF);

    // The sign bit is unknown, so sign extension grows unknown bits.
    let mut partial = Expr { word: Tv64::partial(0b0001, 0b1000, 4), kind: Kind::Value };
    partial.resize(8, true);
    assert_eq!(partial.unknown_mask(), 0xF8);
    assert_eq!(partial.known_ones(), 0b0001);

    let mut constant = Expr::constant(0x80, 8);
    constant.resize(16, true);
    assert_eq!(constant.get(), Some(0xFF80));
}

#[test]
fn trees_round_trip_through_bincode() {
    let tree = (Expr::register(32) + 4u32) * Expr::constant(3, 32);
    let bytes = bincode::serialize(&tree).unwrap();
    assert_eq!(bincode::deserialize::<Expr>(&bytes).unwrap(), tree);
}

#[test]
fn construction_logging_is_flag_gated() {
    trivalent::log::set_flags(trivalent::log::CONSTRUCT);
    let traced = Expr::constant(1, 8) + Expr::constant(2, 8);
    let mut construct_enabled = false;
    trivalent::if_logging!(trivalent::log::CONSTRUCT, {
        construct_enabled = true;
    });
    assert!(construct_enabled);

    trivalent::log::set_flags(0);
    let silent = Expr::constant(1, 8) + Expr::constant(2, 8);
    trivalent::if_logging!(trivalent::log::CONSTRUCT, {
        panic!("logging flags were cleared");
    });
    assert_eq!(traced, silent);
}

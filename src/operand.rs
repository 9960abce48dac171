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

//! The operand algebra. An expression-node type implements [Operable]
//! (a three-valued word plus accessors to it) and [ExprNode] (a
//! constant constructor and the two operator-tagged constructors), and
//! in return every operation in this module builds tagged nodes of it
//! lazily, with no evaluation anywhere on the path.
//!
//! Which operand pairs may combine, and what the result type is, are
//! resolved entirely through [IntoOperand]: `T: IntoOperand<N>` means
//! a `T` may stand as an operand of an operation producing node type
//! `N`. Built-in integers implement it for every node type (they
//! become fully-known constants of their natural width), a node type
//! implements it for itself, and a wrapper type can be declared a
//! transparent alias of a node type by implementing it by hand. Two
//! unrelated node families share no `IntoOperand` target, so mixing
//! them is rejected at compile time, not at run time:
//!
//! ```compile_fail
//! use trivalent::bitvector::{Tv64, TV};
//! use trivalent::operand::{self, ExprNode, Operable};
//! use trivalent::operator::OperatorTag;
//!
//! macro_rules! node_type {
//!     ($name:ident) => {
//!         #[derive(Clone, Debug)]
//!         struct $name(Tv64);
//!         impl Operable for $name {
//!             type Word = Tv64;
//!             fn word(&self) -> &Tv64 { &self.0 }
//!             fn word_mut(&mut self) -> &mut Tv64 { &mut self.0 }
//!         }
//!         impl ExprNode for $name {
//!             fn constant(value: u64, size: u32) -> Self { $name(Tv64::new(value, size)) }
//!             fn unary(_: OperatorTag, value: Self) -> Self { value }
//!             fn binary(lhs: Self, _: OperatorTag, _: Self) -> Self { lhs }
//!         }
//!         trivalent::impl_operand_ops!($name);
//!     };
//! }
//! node_type!(First);
//! node_type!(Second);
//!
//! let a = First::constant(1, 8);
//! let b = Second::constant(2, 8);
//! let _ = operand::add(a, b); // no common node type exists
//! ```
//!
//! The same holds for the infix surface:
//!
//! ```compile_fail
//! use trivalent::bitvector::{Tv64, TV};
//! use trivalent::operand::{ExprNode, Operable};
//! use trivalent::operator::OperatorTag;
//!
//! macro_rules! node_type {
//!     ($name:ident) => {
//!         #[derive(Clone, Debug)]
//!         struct $name(Tv64);
//!         impl Operable for $name {
//!             type Word = Tv64;
//!             fn word(&self) -> &Tv64 { &self.0 }
//!             fn word_mut(&mut self) -> &mut Tv64 { &mut self.0 }
//!         }
//!         impl ExprNode for $name {
//!             fn constant(value: u64, size: u32) -> Self { $name(Tv64::new(value, size)) }
//!             fn unary(_: OperatorTag, value: Self) -> Self { value }
//!             fn binary(lhs: Self, _: OperatorTag, _: Self) -> Self { lhs }
//!         }
//!         trivalent::impl_operand_ops!($name);
//!     };
//! }
//! node_type!(First);
//! node_type!(Second);
//!
//! let a = First::constant(1, 8);
//! let b = Second::constant(2, 8);
//! let _ = a & b; // no common node type exists
//! ```
//!
//! A complete consumer looks like this:
//!
//! ```
//! use trivalent::bitvector::{Tv64, TV};
//! use trivalent::operand::{self, ExprNode, Operable};
//! use trivalent::operator::OperatorTag;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Expr {
//!     word: Tv64,
//!     op: Option<(OperatorTag, Vec<Expr>)>,
//! }
//!
//! impl Operable for Expr {
//!     type Word = Tv64;
//!     fn word(&self) -> &Tv64 { &self.word }
//!     fn word_mut(&mut self) -> &mut Tv64 { &mut self.word }
//! }
//!
//! impl ExprNode for Expr {
//!     fn constant(value: u64, size: u32) -> Self {
//!         Expr { word: Tv64::new(value, size), op: None }
//!     }
//!     fn unary(op: OperatorTag, value: Self) -> Self {
//!         Expr { word: Tv64::unknown(value.size()), op: Some((op, vec![value])) }
//!     }
//!     fn binary(lhs: Self, op: OperatorTag, rhs: Self) -> Self {
//!         let size = lhs.size().max(rhs.size());
//!         Expr { word: Tv64::unknown(size), op: Some((op, vec![lhs, rhs])) }
//!     }
//! }
//!
//! trivalent::impl_operand_ops!(Expr);
//!
//! let a = Expr::constant(5, 8);
//! let b = Expr::constant(3, 8);
//!
//! let sum = &a + &b;
//! assert_eq!(sum.op.as_ref().unwrap().0, OperatorTag::Add);
//!
//! let shifted = 1u64 << a.clone();
//! assert_eq!(shifted.op.as_ref().unwrap().0, OperatorTag::ShiftLeft);
//!
//! let cmp: Expr = operand::greater(a, 3u8);
//! assert_eq!(cmp.op.unwrap().0, OperatorTag::Greater);
//! ```

use crate::bitvector::{lo_mask, TV};
use crate::operator::OperatorTag;

/// Value storage and accessors for an expression-node type. The node
/// owns one three-valued word and hands out access to it; everything
/// else is a pure delegation with no side effects.
pub trait Operable {
    type Word: TV;

    fn word(&self) -> &Self::Word;

    fn word_mut(&mut self) -> &mut Self::Word;

    fn size(&self) -> u32 {
        self.word().len()
    }

    fn known_mask(&self) -> u64 {
        self.word().known_mask()
    }

    fn unknown_mask(&self) -> u64 {
        self.word().unknown_mask()
    }

    fn known_ones(&self) -> u64 {
        self.word().known_ones()
    }

    fn known_zeros(&self) -> u64 {
        self.word().known_zeros()
    }

    fn is_constant(&self) -> bool {
        self.word().is_known()
    }

    /// The stored value, if every bit of it is known.
    fn get(&self) -> Option<u64> {
        self.word().get()
    }

    fn get_signed(&self) -> Option<i64> {
        self.word().get_signed()
    }

    /// Change the stored width. This base case only handles fully-known
    /// words; a node type whose values can carry unknown bits must
    /// override it.
    ///
    /// # Panics
    ///
    /// The word must be fully known.
    fn resize(&mut self, new_size: u32, sign_extend: bool) {
        assert!(self.word().is_known(), "resize of an operand with unknown bits");
        crate::log!(crate::log::RESIZE, format!("resize {} -> {} bits", self.size(), new_size));
        let resized = self.word().resize(new_size, sign_extend);
        *self.word_mut() = resized;
    }
}

/// The construction contract an expression-node type exposes. The
/// operand algebra binds against exactly these three constructors and
/// never retains an operand itself: each one is forwarded by value,
/// exactly once, into the node being built.
pub trait ExprNode: Operable + Sized {
    /// A leaf holding a fully-known constant of the given width.
    fn constant(value: u64, size: u32) -> Self;

    /// A node applying `op` to one owned operand.
    fn unary(op: OperatorTag, value: Self) -> Self;

    /// A node applying `op` to two owned operands, left first.
    fn binary(lhs: Self, op: OperatorTag, rhs: Self) -> Self;
}

/// Built-in integer types usable as constant operands. `BITS` is the
/// natural width the constant takes in an expression; signed sources
/// keep their two's-complement bit pattern at that width.
pub trait Integral: Copy {
    const BITS: u32;

    fn to_bits(self) -> u64;
}

/// `T: IntoOperand<N>` admits `T` as an operand of an operation whose
/// result is the node type `N`, and performs the conversion: identity
/// for `N` itself, a clone for `&N`, a constant node for integers.
/// Implementing it by hand for a wrapper type registers that type as a
/// transparent alias of `N`.
pub trait IntoOperand<N: ExprNode> {
    fn into_operand(self) -> N;
}

macro_rules! impl_integral {
    ($($ty:ty => $bits:expr),* $(,)?) => {$(
        impl Integral for $ty {
            const BITS: u32 = $bits;

            #[inline]
            fn to_bits(self) -> u64 {
                (self as i128 as u64) & lo_mask($bits)
            }
        }

        impl<N: ExprNode> IntoOperand<N> for $ty {
            fn into_operand(self) -> N {
                N::constant(self.to_bits(), <$ty as Integral>::BITS)
            }
        }
    )*};
}

impl_integral! {
    bool => 1,
    u8 => 8,
    u16 => 16,
    u32 => 32,
    u64 => 64,
    i8 => 8,
    i16 => 16,
    i32 => 32,
    i64 => 64,
}

fn construct_unary<N: ExprNode>(op: OperatorTag, value: N) -> N {
    crate::log!(crate::log::CONSTRUCT, format!("construct {} ({} bit)", op, value.size()));
    N::unary(op, value)
}

fn construct_binary<N: ExprNode>(lhs: N, op: OperatorTag, rhs: N) -> N {
    crate::log!(crate::log::CONSTRUCT, format!("construct {} ({} bit, {} bit)", op, lhs.size(), rhs.size()));
    N::binary(lhs, op, rhs)
}

macro_rules! unary_operations {
    ($($(#[$doc:meta])* $name:ident => $tag:ident),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $name<N, T>(value: T) -> N
        where
            N: ExprNode,
            T: IntoOperand<N>,
        {
            construct_unary(OperatorTag::$tag, value.into_operand())
        }
    )*};
}

macro_rules! binary_operations {
    ($($(#[$doc:meta])* $name:ident => $tag:ident),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $name<N, L, R>(lhs: L, rhs: R) -> N
        where
            N: ExprNode,
            L: IntoOperand<N>,
            R: IntoOperand<N>,
        {
            construct_binary(lhs.into_operand(), OperatorTag::$tag, rhs.into_operand())
        }
    )*};
}

unary_operations! {
    bitwise_not => BitwiseNot,
    negate => Negate,
    /// Population count of the operand.
    popcnt => Popcnt,
    mask => Mask,
    /// Width of the operand in bits.
    bit_count => BitCount,
}

binary_operations! {
    bitwise_and => BitwiseAnd,
    bitwise_or => BitwiseOr,
    bitwise_xor => BitwiseXor,
    shift_left => ShiftLeft,
    shift_right => ShiftRight,
    rotate_left => RotateLeft,
    rotate_right => RotateRight,
    add => Add,
    subtract => Subtract,
    multiply => Multiply,
    /// High half of the widened signed product.
    multiply_high => MultiplyHigh,
    divide => Divide,
    remainder => Remainder,
    umultiply => Umultiply,
    umultiply_high => UmultiplyHigh,
    udivide => Udivide,
    uremainder => Uremainder,
    /// Sign-extending width change; the right operand is the new width.
    cast => Cast,
    /// Zero-extending width change; the right operand is the new width.
    ucast => Ucast,
    /// Tests the bit of the left operand indexed by the right.
    bit_test => BitTest,
    /// Selects the right operand when the left (condition) holds.
    value_if => ValueIf,
    max_value => MaxValue,
    min_value => MinValue,
    umax_value => UmaxValue,
    umin_value => UminValue,
    greater => Greater,
    greater_eq => GreaterEq,
    equal => Equal,
    not_equal => NotEqual,
    less_eq => LessEq,
    less => Less,
    ugreater => Ugreater,
    ugreater_eq => UgreaterEq,
    uless_eq => UlessEq,
    uless => Uless,
}

/// Derives the infix operator surface for an expression-node type, or
/// for a registered alias of one.
///
/// `impl_operand_ops!(Node)` implements [IntoOperand] for `Node` and
/// `&Node` (move and clone respectively) and maps the `std::ops`
/// operators onto the construction functions of this module, in both
/// directions: `node + 5u8` as well as `5u8 + node`. Comparisons and
/// the remaining named operators have no `std::ops` counterpart
/// returning `Self` and stay plain functions.
///
/// `impl_operand_ops!(Alias => Node)` derives the same operator
/// surface for a wrapper type that already implements
/// `IntoOperand<Node>`, making it interchangeable with `Node` inside
/// expressions.
#[macro_export]
macro_rules! impl_operand_ops {
    ($node:ty) => {
        impl $crate::operand::IntoOperand<$node> for $node {
            fn into_operand(self) -> $node {
                self
            }
        }

        impl $crate::operand::IntoOperand<$node> for &$node {
            fn into_operand(self) -> $node {
                ::std::clone::Clone::clone(self)
            }
        }

        $crate::impl_operand_ops!($node => $node);
    };

    ($lhs:ty => $node:ty) => {
        $crate::impl_operand_ops!(@node_ops $lhs => $node);
        $crate::impl_operand_ops!(@int_lhs $lhs => $node : u8, u16, u32, u64, i8, i16, i32, i64);
    };

    (@node_ops $lhs:ty => $node:ty) => {
        $crate::impl_operand_ops!(@binary_std $lhs => $node :
            Add add add,
            Sub sub subtract,
            Mul mul multiply,
            Div div divide,
            Rem rem remainder,
            BitAnd bitand bitwise_and,
            BitOr bitor bitwise_or,
            BitXor bitxor bitwise_xor,
            Shl shl shift_left,
            Shr shr shift_right,
        );

        impl ::std::ops::Not for $lhs {
            type Output = $node;
            fn not(self) -> $node {
                $crate::operand::bitwise_not(self)
            }
        }

        impl<'a> ::std::ops::Not for &'a $lhs
        where
            &'a $lhs: $crate::operand::IntoOperand<$node>,
        {
            type Output = $node;
            fn not(self) -> $node {
                $crate::operand::bitwise_not(self)
            }
        }

        impl ::std::ops::Neg for $lhs {
            type Output = $node;
            fn neg(self) -> $node {
                $crate::operand::negate(self)
            }
        }

        impl<'a> ::std::ops::Neg for &'a $lhs
        where
            &'a $lhs: $crate::operand::IntoOperand<$node>,
        {
            type Output = $node;
            fn neg(self) -> $node {
                $crate::operand::negate(self)
            }
        }
    };

    (@binary_std $lhs:ty => $node:ty : $($trait:ident $method:ident $entry:ident),* $(,)?) => {$(
        impl<R: $crate::operand::IntoOperand<$node>> ::std::ops::$trait<R> for $lhs {
            type Output = $node;
            fn $method(self, rhs: R) -> $node {
                $crate::operand::$entry(self, rhs)
            }
        }

        impl<'a, R: $crate::operand::IntoOperand<$node>> ::std::ops::$trait<R> for &'a $lhs
        where
            &'a $lhs: $crate::operand::IntoOperand<$node>,
        {
            type Output = $node;
            fn $method(self, rhs: R) -> $node {
                $crate::operand::$entry(self, rhs)
            }
        }
    )*};

    (@int_lhs $lhs:ty => $node:ty : $($int:ty),*) => {$(
        $crate::impl_operand_ops!(@int_std $int, $lhs => $node :
            Add add add,
            Sub sub subtract,
            Mul mul multiply,
            Div div divide,
            Rem rem remainder,
            BitAnd bitand bitwise_and,
            BitOr bitor bitwise_or,
            BitXor bitxor bitwise_xor,
            Shl shl shift_left,
            Shr shr shift_right,
        );
    )*};

    (@int_std $int:ty, $lhs:ty => $node:ty : $($trait:ident $method:ident $entry:ident),* $(,)?) => {$(
        impl ::std::ops::$trait<$lhs> for $int {
            type Output = $node;
            fn $method(self, rhs: $lhs) -> $node {
                $crate::operand::$entry(self, rhs)
            }
        }

        impl<'a> ::std::ops::$trait<&'a $lhs> for $int
        where
            &'a $lhs: $crate::operand::IntoOperand<$node>,
        {
            type Output = $node;
            fn $method(self, rhs: &'a $lhs) -> $node {
                $crate::operand::$entry(self, rhs)
            }
        }
    )*};
}

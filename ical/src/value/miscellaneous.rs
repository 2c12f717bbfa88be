// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared building blocks for the value grammars.

use std::borrow::Cow;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueExpected {
    /// A calendar date that exists was expected
    Date,
    /// A 32-bit signed integer value was expected
    I32,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::I32 => Self::Label(Cow::Borrowed("i32 out of range")),
        }
    }
}

macro_rules! define_digit_select {
    ($fname:ident : $ty:ty => { $($ch:literal),+ $(,)? }) => {
        #[allow(trivial_numeric_casts, clippy::cast_lossless, clippy::char_lit_as_u8, clippy::cast_possible_wrap)]
        pub(crate) const fn $fname<'src, I, E>() -> impl Parser<'src, I, $ty, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan>,
            E: ParserExtra<'src, I>,
        {
            select! {
                $(
                    $ch => (($ch as u8 - b'0') as $ty),
                )+
            }
        }
    };
}

define_digit_select!(u8_0_1 : u8 => { '0', '1' });
define_digit_select!(u8_0_3 : u8 => { '0', '1', '2', '3' });
define_digit_select!(u8_0_5 : u8 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(u8_0_9 : u8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_0_1 : i8 => { '0', '1' });
define_digit_select!(i8_0_2 : i8 => { '0', '1', '2' });
define_digit_select!(i8_0_9 : i8 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i8_1_2 : i8 => { '1', '2' });
define_digit_select!(i8_1_9 : i8 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(i16_0_9 : i16 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });

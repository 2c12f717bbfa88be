// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integer grammar shared by the numeric rule parts.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::join_errors;
use crate::value::miscellaneous::ValueExpected;

/// Parses a complete string as an RFC 5545 integer.
///
/// # Errors
///
/// Returns the joined parse errors when `src` is not an integer in `i32`.
pub(crate) fn parse_integer(src: &str) -> Result<i32, String> {
    value_integer::<'_, _, extra::Err<Rich<'_, char>>>()
        .then_ignore(end())
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| join_errors(&errs))
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
pub(crate) fn value_integer<'src, I, E>() -> impl Parser<'src, I, i32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .try_map_with(|(sign, digits), e| {
            let mut int_str = String::with_capacity(1 + digits.len());
            if let Some(s) = sign {
                int_str.push(s);
            }
            int_str.push_str(&digits);

            match lexical::parse_partial::<i32, _>(&int_str) {
                Ok((v, n)) if n == int_str.len() => Ok(v),
                Ok((_, n)) => Err(E::Error::expected_found(
                    [ValueExpected::I32],
                    int_str.chars().nth(n).map(Into::into),
                    e.span(),
                )),
                Err(_) => Err(E::Error::expected_found(
                    [ValueExpected::I32],
                    None,
                    e.span(),
                )),
            }
        })
}

/// Sign of an optionally signed number, `true` unless a minus is present.
pub(crate) fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    sign().or_not().map(|c| !matches!(c, Some('-')))
}

const fn sign<'src, I, E>() -> impl Parser<'src, I, char, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
}

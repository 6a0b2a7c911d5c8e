// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    expression::Expression,
    matchresult::{Match, MatchLength},
    source::ElementSource,
};

/// The candidate matches at one position, most preferred first.
pub type Matches<'a, T> = Box<dyn Iterator<Item = Match<'a, T>> + 'a>;

/// The possible lengths of an expression, without duplicates.
pub type MatchLengths<'a> = Box<dyn Iterator<Item = usize> + 'a>;

pub trait MatchProvider<T> {
    /// Enumerates the matches starting at `index`, lazily, in the order
    /// a backtracking engine should try them.
    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a;
}

/// The capability of answering "which lengths could this expression
/// match" without an input, which is what lookbehind relies on.
pub trait LookBackMatchProvider {
    fn supports_look_back(&self) -> bool;

    /// True when no finite set of lengths can be determined, so every
    /// length up to the maximum has to be probed.
    fn any_length(&self) -> bool;

    /// Yields every length `<= max_length` the expression could match.
    ///
    /// Yields nothing when look back is unsupported, and `0..=max_length`
    /// when `any_length` is true.
    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_>;
}

pub(crate) fn no_lengths<'a>() -> MatchLengths<'a> {
    Box::new(std::iter::empty())
}

pub(crate) fn ascending_lengths<'a>(max_length: usize) -> MatchLengths<'a> {
    Box::new(0..=max_length)
}

pub(crate) fn zero_length<'a>() -> MatchLengths<'a> {
    Box::new(std::iter::once(0))
}

/// Turns the result of a single position test into zero or one match.
pub(crate) fn single_match<'a, T: 'a>(
    source: &'a dyn ElementSource<T>,
    index: usize,
    match_length: MatchLength,
) -> Matches<'a, T> {
    if match_length.success {
        Box::new(std::iter::once(Match::matched(
            source,
            index,
            match_length.length,
        )))
    } else {
        Box::new(std::iter::empty())
    }
}

/// Like `single_match`, for lengths reported by code outside of this
/// crate: a range which does not fit in the source gives no match.
pub(crate) fn checked_match<'a, T: 'a>(
    source: &'a dyn ElementSource<T>,
    index: usize,
    match_length: MatchLength,
) -> Matches<'a, T> {
    if !match_length.success {
        return Box::new(std::iter::empty());
    }

    Box::new(Match::new(source, index, match_length.length, true).ok().into_iter())
}

/// The look back of a single element class: always exactly one element.
pub struct ClassLookBack;

impl LookBackMatchProvider for ClassLookBack {
    fn supports_look_back(&self) -> bool {
        true
    }

    fn any_length(&self) -> bool {
        false
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        if max_length >= 1 {
            Box::new(std::iter::once(1))
        } else {
            no_lengths()
        }
    }
}

/// The look back of an expression whose width is unknown.
///
/// `any_length` is true while `supports_look_back` is false: such an
/// expression can never be placed by a lookbehind, which therefore fails.
pub struct NotSupportedLookBack;

impl LookBackMatchProvider for NotSupportedLookBack {
    fn supports_look_back(&self) -> bool {
        false
    }

    fn any_length(&self) -> bool {
        true
    }

    fn get_possible_match_lengths(&self, _max_length: usize) -> MatchLengths<'_> {
        no_lengths()
    }
}

/// Presents any kind of expression as a uniform producer of matches
/// and as a look back provider.
///
/// Composite expressions hold their children through this adapter.
pub struct ExpressionMatchProvider<T> {
    expression: Expression<T>,
}

impl<T> ExpressionMatchProvider<T> {
    pub fn new(expression: Expression<T>) -> Self {
        ExpressionMatchProvider { expression }
    }

    pub fn expression(&self) -> &Expression<T> {
        &self.expression
    }

    pub fn into_expression(self) -> Expression<T> {
        self.expression
    }

    fn look_back(&self) -> &dyn LookBackMatchProvider {
        match &self.expression {
            Expression::Class(_) => &ClassLookBack,
            Expression::List(e) => e,
            Expression::Alternation(e) => e,
            Expression::Repeat(e) => e,
            Expression::LookAhead(e) => e,
            Expression::LookBehind(e) => e,
            Expression::Anchor(e) => e,
            Expression::Custom(e) => e.look_back().unwrap_or(&NotSupportedLookBack),
        }
    }
}

impl<T> From<Expression<T>> for ExpressionMatchProvider<T> {
    fn from(expression: Expression<T>) -> Self {
        ExpressionMatchProvider::new(expression)
    }
}

impl<T> MatchProvider<T> for ExpressionMatchProvider<T> {
    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a,
    {
        match &self.expression {
            Expression::Class(c) => checked_match(source, index, c.is_match_at(source, index)),
            Expression::List(e) => e.get_matches(source, index),
            Expression::Alternation(e) => e.get_matches(source, index),
            Expression::Repeat(e) => e.get_matches(source, index),
            Expression::LookAhead(e) => single_match(source, index, e.is_match_at(source, index)),
            Expression::LookBehind(e) => single_match(source, index, e.is_match_at(source, index)),
            Expression::Anchor(e) => single_match(source, index, e.is_match_at(source, index)),
            Expression::Custom(e) => e.get_matches(source, index),
        }
    }
}

impl<T> LookBackMatchProvider for ExpressionMatchProvider<T> {
    fn supports_look_back(&self) -> bool {
        self.look_back().supports_look_back()
    }

    fn any_length(&self) -> bool {
        self.look_back().any_length()
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        self.look_back().get_possible_match_lengths(max_length)
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use itertools::Itertools;

use crate::{
    expression::Expression,
    matchresult::Match,
    provider::{
        ascending_lengths, no_lengths, zero_length, ExpressionMatchProvider,
        LookBackMatchProvider, MatchLengths, MatchProvider, Matches,
    },
    source::ElementSource,
};

/// Yields every match of the first child, then every match of the
/// second child, and so on.
///
/// An alternation without children matches the empty sequence.
pub struct AlternationExpression<T> {
    expressions: Vec<ExpressionMatchProvider<T>>,
    supports_look_back: bool,
    any_length: bool,
}

impl<T> AlternationExpression<T> {
    pub fn new(expressions: Vec<Expression<T>>) -> Self {
        let expressions: Vec<ExpressionMatchProvider<T>> = expressions
            .into_iter()
            .map(ExpressionMatchProvider::new)
            .collect();

        let supports_look_back = expressions.iter().all(|e| e.supports_look_back());
        let any_length = expressions.iter().any(|e| e.any_length());

        AlternationExpression {
            expressions,
            supports_look_back,
            any_length,
        }
    }

    pub fn expressions(&self) -> &[ExpressionMatchProvider<T>] {
        &self.expressions
    }
}

impl<T> MatchProvider<T> for AlternationExpression<T> {
    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a,
    {
        if self.expressions.is_empty() {
            if !source.is_item_in_range(index) {
                return Box::new(std::iter::empty());
            }
            return Box::new(std::iter::once(Match::matched(source, index, 0)));
        }

        Box::new(
            self.expressions
                .iter()
                .flat_map(move |expression| expression.get_matches(source, index)),
        )
    }
}

impl<T> LookBackMatchProvider for AlternationExpression<T> {
    fn supports_look_back(&self) -> bool {
        self.supports_look_back
    }

    fn any_length(&self) -> bool {
        self.any_length
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        if !self.supports_look_back {
            return no_lengths();
        }

        if self.any_length {
            return ascending_lengths(max_length);
        }

        if self.expressions.is_empty() {
            return zero_length();
        }

        Box::new(
            self.expressions
                .iter()
                .flat_map(move |expression| expression.get_possible_match_lengths(max_length))
                .filter(move |length| *length <= max_length)
                .unique(),
        )
    }
}

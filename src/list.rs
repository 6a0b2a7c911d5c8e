// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::BTreeSet;

use crate::{
    expression::Expression,
    matchresult::Match,
    provider::{
        ascending_lengths, no_lengths, ExpressionMatchProvider, LookBackMatchProvider,
        MatchLengths, MatchProvider, Matches,
    },
    source::ElementSource,
};

/// A sequence: every child must match, each one starting where the
/// previous one ended.
pub struct ListExpression<T> {
    expressions: Vec<ExpressionMatchProvider<T>>,
    supports_look_back: bool,
    any_length: bool,
}

impl<T> ListExpression<T> {
    pub fn new(expressions: Vec<Expression<T>>) -> Self {
        let expressions: Vec<ExpressionMatchProvider<T>> = expressions
            .into_iter()
            .map(ExpressionMatchProvider::new)
            .collect();

        let supports_look_back = expressions.iter().all(|e| e.supports_look_back());
        let any_length = expressions.iter().any(|e| e.any_length());

        ListExpression {
            expressions,
            supports_look_back,
            any_length,
        }
    }

    pub fn expressions(&self) -> &[ExpressionMatchProvider<T>] {
        &self.expressions
    }
}

impl<T> MatchProvider<T> for ListExpression<T> {
    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a,
    {
        if !source.is_item_in_range(index) {
            return Box::new(std::iter::empty());
        }

        if self.expressions.is_empty() {
            return Box::new(std::iter::once(Match::matched(source, index, 0)));
        }

        Box::new(ListMatches {
            expressions: &self.expressions,
            source,
            index,
            stack: vec![self.expressions[0].get_matches(source, index)],
        })
    }
}

/// Depth first enumeration over the children.
///
/// `stack[i]` holds the remaining matches of the i-th child, so a failure
/// of a child resumes the previous child with its next candidate.
struct ListMatches<'a, T> {
    expressions: &'a [ExpressionMatchProvider<T>],
    source: &'a dyn ElementSource<T>,
    index: usize,
    stack: Vec<Matches<'a, T>>,
}

impl<'a, T> Iterator for ListMatches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            let top = self.stack.last_mut()?;

            match top.next() {
                Some(m) => {
                    if depth == self.expressions.len() {
                        return Some(Match::matched(
                            self.source,
                            self.index,
                            m.end() - self.index,
                        ));
                    }

                    let next_matches = self.expressions[depth].get_matches(self.source, m.end());
                    self.stack.push(next_matches);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<T> LookBackMatchProvider for ListExpression<T> {
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

        // sums of one length from each child, each child is asked only for
        // the lengths which still fit
        let mut sums = BTreeSet::from([0usize]);
        for expression in &self.expressions {
            let mut next_sums = BTreeSet::new();
            for sum in sums {
                next_sums.extend(
                    expression
                        .get_possible_match_lengths(max_length - sum)
                        .filter(|length| *length <= max_length - sum)
                        .map(|length| sum + length),
                );
            }

            if next_sums.is_empty() {
                return no_lengths();
            }
            sums = next_sums;
        }

        Box::new(sums.into_iter())
    }
}

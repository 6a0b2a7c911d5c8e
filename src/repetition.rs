// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::BTreeSet;

use crate::{
    error::SeqError,
    expression::Expression,
    matchresult::Match,
    provider::{
        ascending_lengths, no_lengths, zero_length, ExpressionMatchProvider,
        LookBackMatchProvider, MatchLengths, MatchProvider, Matches,
    },
    source::ElementSource,
};

pub const MAXIMUM: usize = usize::MAX;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepetitionType {
    // fewest repetitions first
    Lazy,

    // most repetitions first
    Greedy,
}

/// Repeats one child expression between `min` and `max` times.
///
/// An iteration that matches nothing is only accepted while the number
/// of iterations has not exceeded `min`, so repeating a zero-width child
/// terminates and the empty match is produced once.
pub struct RepeatExpression<T> {
    expression: Box<ExpressionMatchProvider<T>>,
    min: usize,
    max: usize,
    repetition_type: RepetitionType,
}

impl<T> RepeatExpression<T> {
    pub fn new(
        expression: Expression<T>,
        min: usize,
        max: usize,
        repetition_type: RepetitionType,
    ) -> Result<Self, SeqError> {
        if max < min {
            return Err(SeqError::InvalidArgument(format!(
                "the maximum ({}) must be greater than or equal to the minimum ({}).",
                max, min
            )));
        }

        Ok(Self::new_unchecked(expression, min, max, repetition_type))
    }

    pub(crate) fn new_unchecked(
        expression: Expression<T>,
        min: usize,
        max: usize,
        repetition_type: RepetitionType,
    ) -> Self {
        debug_assert!(min <= max);

        RepeatExpression {
            expression: Box::new(ExpressionMatchProvider::new(expression)),
            min,
            max,
            repetition_type,
        }
    }

    pub fn expression(&self) -> &ExpressionMatchProvider<T> {
        &self.expression
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn repetition_type(&self) -> RepetitionType {
        self.repetition_type
    }

    /// Whether an iteration at `depth` (1 based) may match nothing.
    fn accepts(&self, m: &Match<'_, T>, depth: usize) -> bool {
        !m.is_empty() || depth <= self.min
    }

    fn collect_possible_match_lengths(&self, max_length: usize) -> BTreeSet<usize> {
        let mut lengths = BTreeSet::new();
        if self.min == 0 {
            lengths.insert(0);
        }

        // the sums reachable with exactly `count` iterations
        let mut frontier = BTreeSet::from([0usize]);

        // sums already expanded at a count >= min, expanding them again
        // can only reach lengths which are already collected
        let mut expanded = BTreeSet::new();
        let mut count = 0usize;

        while !frontier.is_empty() && count < self.max {
            let mut next = BTreeSet::new();
            for sum in &frontier {
                let remain = max_length - sum;
                next.extend(
                    self.expression
                        .get_possible_match_lengths(remain)
                        .filter(|length| *length <= remain)
                        .map(|length| sum + length),
                );
            }

            count += 1;

            if count < self.min && next == frontier {
                // the sums no longer change, skip the remaining levels
                // below the minimum
                count = self.min;
            }

            if count >= self.min {
                lengths.extend(next.iter().copied());
                next.retain(|sum| !expanded.contains(sum));
                expanded.extend(next.iter().copied());
            }

            frontier = next;
        }

        lengths
    }
}

impl<T> MatchProvider<T> for RepeatExpression<T> {
    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a,
    {
        if !source.is_item_in_range(index) {
            return Box::new(std::iter::empty());
        }

        match self.repetition_type {
            RepetitionType::Lazy => Box::new(LazyRepeatMatches {
                expression: self,
                source,
                index,
                stack: vec![],
                started: false,
            }),
            RepetitionType::Greedy => Box::new(GreedyRepeatMatches {
                expression: self,
                source,
                index,
                stack: vec![],
                ends: vec![],
                state: GreedyState::More,
            }),
        }
    }
}

/// Yields the empty match first (when allowed), then walks the iterations
/// depth first, yielding after each accepted iteration and before trying
/// one more.
struct LazyRepeatMatches<'a, T> {
    expression: &'a RepeatExpression<T>,
    source: &'a dyn ElementSource<T>,
    index: usize,
    stack: Vec<Matches<'a, T>>,
    started: bool,
}

impl<'a, T> Iterator for LazyRepeatMatches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let repeat = self.expression;

        if !self.started {
            self.started = true;

            if repeat.max > 0 {
                self.stack
                    .push(repeat.expression.get_matches(self.source, self.index));
            }

            if repeat.min == 0 {
                return Some(Match::matched(self.source, self.index, 0));
            }
        }

        loop {
            let depth = self.stack.len();
            let top = self.stack.last_mut()?;

            match top.next() {
                Some(m) => {
                    if !repeat.accepts(&m, depth) {
                        continue;
                    }

                    let end = m.end();
                    if depth < repeat.max {
                        self.stack
                            .push(repeat.expression.get_matches(self.source, end));
                    }

                    if depth >= repeat.min {
                        return Some(Match::matched(self.source, self.index, end - self.index));
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum GreedyState {
    // try one more iteration
    More,

    // advance the iteration on the top of the stack
    MoveNext,

    // no more iterations fit, yield the current end and give back
    // the last iteration
    Backtrack,

    // every iteration is given back
    YieldEmpty,

    Complete,
}

/// Pushes as many iterations as possible before yielding, then yields
/// the longest first and gives back one iteration at a time.
///
/// `ends[i]` is the end of the accepted (i+1)-th iteration, `stack[i]`
/// holds the remaining candidates of that iteration.
struct GreedyRepeatMatches<'a, T> {
    expression: &'a RepeatExpression<T>,
    source: &'a dyn ElementSource<T>,
    index: usize,
    stack: Vec<Matches<'a, T>>,
    ends: Vec<usize>,
    state: GreedyState,
}

impl<'a, T> Iterator for GreedyRepeatMatches<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let repeat = self.expression;

        loop {
            match self.state {
                GreedyState::More => {
                    if self.ends.len() < repeat.max {
                        let position = self.ends.last().copied().unwrap_or(self.index);
                        self.stack
                            .push(repeat.expression.get_matches(self.source, position));
                        self.state = GreedyState::MoveNext;
                    } else {
                        self.state = GreedyState::Backtrack;
                    }
                }
                GreedyState::MoveNext => {
                    let depth = self.stack.len();
                    let Some(top) = self.stack.last_mut() else {
                        self.state = GreedyState::YieldEmpty;
                        continue;
                    };

                    match top.next() {
                        Some(m) => {
                            if repeat.accepts(&m, depth) {
                                self.ends.push(m.end());
                                self.state = GreedyState::More;
                            }
                        }
                        None => {
                            self.stack.pop();
                            self.state = if self.ends.is_empty() {
                                GreedyState::YieldEmpty
                            } else {
                                GreedyState::Backtrack
                            };
                        }
                    }
                }
                GreedyState::Backtrack => {
                    let count = self.ends.len();
                    match self.ends.pop() {
                        Some(end) => {
                            self.state = GreedyState::MoveNext;
                            if count >= repeat.min {
                                return Some(Match::matched(
                                    self.source,
                                    self.index,
                                    end - self.index,
                                ));
                            }
                        }
                        None => {
                            self.state = GreedyState::YieldEmpty;
                        }
                    }
                }
                GreedyState::YieldEmpty => {
                    self.state = GreedyState::Complete;
                    if repeat.min == 0 {
                        return Some(Match::matched(self.source, self.index, 0));
                    }
                }
                GreedyState::Complete => {
                    return None;
                }
            }
        }
    }
}

impl<T> LookBackMatchProvider for RepeatExpression<T> {
    fn supports_look_back(&self) -> bool {
        self.expression.supports_look_back()
    }

    fn any_length(&self) -> bool {
        self.expression.any_length()
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        if !self.supports_look_back() {
            return no_lengths();
        }

        if self.any_length() {
            return ascending_lengths(max_length);
        }

        if self.max == 0 {
            return zero_length();
        }

        Box::new(self.collect_possible_match_lengths(max_length).into_iter())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::{
        error::SeqError,
        expression::Expression,
        provider::{LookBackMatchProvider, MatchProvider},
        source::ListSource,
        testutil::ch,
    };

    use super::{RepeatExpression, RepetitionType, MAXIMUM};

    fn lazy(expression: Expression<char>, min: usize, max: usize) -> RepeatExpression<char> {
        RepeatExpression::new(expression, min, max, RepetitionType::Lazy).unwrap()
    }

    fn greedy(expression: Expression<char>, min: usize, max: usize) -> RepeatExpression<char> {
        RepeatExpression::new(expression, min, max, RepetitionType::Greedy).unwrap()
    }

    fn lengths_of(expression: &RepeatExpression<char>, text: &str, index: usize) -> Vec<usize> {
        let source = ListSource::from(text);
        expression
            .get_matches(&source, index)
            .map(|m| m.len())
            .collect()
    }

    fn possible_lengths_of(expression: &RepeatExpression<char>, max_length: usize) -> Vec<usize> {
        expression.get_possible_match_lengths(max_length).collect()
    }

    #[test]
    fn test_new_failed() {
        assert!(matches!(
            RepeatExpression::new(ch('a'), 3, 2, RepetitionType::Lazy),
            Err(SeqError::InvalidArgument(_))
        ));

        let expression = RepeatExpression::new(ch('a'), 2, 2, RepetitionType::Greedy).unwrap();
        assert_eq!(expression.min(), 2);
        assert_eq!(expression.max(), 2);
        assert_eq!(expression.repetition_type(), RepetitionType::Greedy);
    }

    #[test]
    fn test_lazy_star() {
        let expression = lazy(ch('A'), 0, MAXIMUM);

        assert_eq!(lengths_of(&expression, "AAABBB", 0), vec![0, 1, 2, 3]);
        assert_eq!(lengths_of(&expression, "AAABBB", 3), vec![0]);
        assert_eq!(lengths_of(&expression, "AAABBB", 6), vec![0]);
        assert_eq!(lengths_of(&expression, "AAABBB", 7), Vec::<usize>::new());
    }

    #[test]
    fn test_greedy_star() {
        let expression = greedy(ch('A'), 0, MAXIMUM);

        assert_eq!(lengths_of(&expression, "AAABBB", 0), vec![3, 2, 1, 0]);
        assert_eq!(lengths_of(&expression, "AAABBB", 1), vec![2, 1, 0]);
        assert_eq!(lengths_of(&expression, "AAABBB", 3), vec![0]);
        assert_eq!(lengths_of(&expression, "", 0), vec![0]);
    }

    #[test]
    fn test_matches_exhausted() {
        let source = ListSource::from("AAB");

        for expression in [
            lazy(ch('A'), 0, MAXIMUM),
            greedy(ch('A'), 0, MAXIMUM),
            lazy(ch('A'), 1, 2),
            greedy(ch('A'), 1, 2),
            lazy(ch('A'), 0, 0),
            greedy(ch('A'), 0, 0),
            lazy(ch('B'), 1, 1),
            greedy(ch('B'), 1, 1),
        ] {
            let mut matches = expression.get_matches(&source, 0);
            matches.by_ref().for_each(drop);
            for _ in 0..3 {
                assert!(matches.next().is_none());
            }
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(lengths_of(&lazy(ch('A'), 2, 3), "AAAA", 0), vec![2, 3]);
        assert_eq!(lengths_of(&greedy(ch('A'), 2, 3), "AAAA", 0), vec![3, 2]);
        assert_eq!(lengths_of(&lazy(ch('A'), 3, 3), "AAAA", 1), vec![3]);
        assert_eq!(lengths_of(&greedy(ch('A'), 3, 3), "AAAA", 1), vec![3]);

        // the minimum is never reached
        assert_eq!(lengths_of(&lazy(ch('A'), 2, 3), "AB", 0), Vec::<usize>::new());
        assert_eq!(lengths_of(&greedy(ch('A'), 2, 3), "AB", 0), Vec::<usize>::new());

        // zero times
        assert_eq!(lengths_of(&lazy(ch('A'), 0, 0), "AAA", 0), vec![0]);
        assert_eq!(lengths_of(&greedy(ch('A'), 0, 0), "AAA", 0), vec![0]);
    }

    #[test]
    fn test_backtracking_into_child() {
        // ("AB" || 'A'){2}
        let child = || Expression::alternation(vec![Expression::values("AB".chars()), ch('A')]);

        assert_eq!(lengths_of(&greedy(child(), 2, 2), "ABA", 0), vec![3]);
        assert_eq!(lengths_of(&greedy(child(), 1, 2), "ABA", 0), vec![3, 2, 1]);
        assert_eq!(lengths_of(&lazy(child(), 1, 2), "ABA", 0), vec![2, 3, 1]);
    }

    #[test]
    fn test_zero_width_child() {
        let empty = || Expression::<char>::alternation(vec![]);

        // exactly one empty match, and no endless loop
        assert_eq!(lengths_of(&lazy(empty(), 0, MAXIMUM), "AB", 0), vec![0]);
        assert_eq!(lengths_of(&greedy(empty(), 0, MAXIMUM), "AB", 0), vec![0]);
        assert_eq!(lengths_of(&lazy(empty(), 2, 5), "AB", 0), vec![0]);
        assert_eq!(lengths_of(&greedy(empty(), 2, 5), "AB", 0), vec![0]);

        // (A?)*
        assert_eq!(
            lengths_of(&greedy(ch('A').optional(), 0, MAXIMUM), "AA", 0),
            vec![2, 1, 0]
        );
        assert_eq!(
            lengths_of(&lazy(ch('A').optional(), 0, MAXIMUM), "AA", 0),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_possible_match_lengths() {
        assert_eq!(possible_lengths_of(&lazy(Expression::any(), 2, 3), 10), vec![2, 3]);
        assert_eq!(
            possible_lengths_of(&greedy(Expression::any(), 0, MAXIMUM), 4),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(
            possible_lengths_of(&greedy(Expression::values("AB".chars()), 1, 3), 5),
            vec![2, 4]
        );
        assert_eq!(possible_lengths_of(&lazy(ch('A'), 0, 0), 5), vec![0]);
        assert_eq!(possible_lengths_of(&greedy(ch('A'), 3, 3), 2), Vec::<usize>::new());

        // the minimum is far beyond the maximum length
        assert_eq!(
            possible_lengths_of(&greedy(ch('A'), 1000, MAXIMUM), 5),
            Vec::<usize>::new()
        );
        assert_eq!(
            possible_lengths_of(&greedy(ch('A').optional(), 1_000_000, MAXIMUM), 3),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_look_back_flags() {
        let expression = greedy(ch('A'), 0, 3);
        assert!(expression.supports_look_back());
        assert!(!expression.any_length());
    }

    fn child(kind: usize) -> Expression<char> {
        match kind {
            0 => ch('a'),
            1 => Expression::values("ab".chars()),
            2 => ch('a').optional(),
            _ => Expression::alternation(vec![ch('a'), ch('b')]),
        }
    }

    proptest! {
        #[test]
        fn test_lazy_and_greedy_yield_the_same_lengths(
            text in "[ab]{0,6}",
            index in 0usize..7,
            min in 0usize..3,
            extra in 0usize..4,
            kind in 0usize..4,
        ) {
            let max = min + extra;
            let lazy_expression = lazy(child(kind), min, max);
            let greedy_expression = greedy(child(kind), min, max);

            let lazy_lengths = lengths_of(&lazy_expression, &text, index);
            let greedy_lengths = lengths_of(&greedy_expression, &text, index);

            let lazy_set: BTreeSet<usize> = lazy_lengths.iter().copied().collect();
            let greedy_set: BTreeSet<usize> = greedy_lengths.iter().copied().collect();
            prop_assert_eq!(&lazy_set, &greedy_set);

            if min == 0 && index <= text.len() {
                prop_assert_eq!(lazy_lengths.first(), Some(&0));
                prop_assert_eq!(greedy_lengths.last(), Some(&0));
                prop_assert_eq!(lazy_lengths.iter().filter(|l| **l == 0).count(), 1);
            }

            // every actual length is one of the possible lengths
            if index <= text.len() {
                let possible: BTreeSet<usize> = lazy_expression
                    .get_possible_match_lengths(text.len() - index)
                    .collect();
                prop_assert!(lazy_set.is_subset(&possible));
            }
        }
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    expression::Expression,
    matchresult::MatchLength,
    provider::{
        no_lengths, zero_length, ExpressionMatchProvider, LookBackMatchProvider, MatchLengths,
        MatchProvider,
    },
    source::ElementSource,
};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Anchor {
    // the position before the first element
    Start,

    // the position after the last element
    End,
}

impl Anchor {
    pub fn is_match_at<T>(&self, source: &dyn ElementSource<T>, index: usize) -> MatchLength {
        let success = match self {
            Anchor::Start => source.is_at_start(index),
            Anchor::End => source.is_at_end(index),
        };
        MatchLength::empty_match(success)
    }
}

impl LookBackMatchProvider for Anchor {
    fn supports_look_back(&self) -> bool {
        true
    }

    fn any_length(&self) -> bool {
        false
    }

    fn get_possible_match_lengths(&self, _max_length: usize) -> MatchLengths<'_> {
        zero_length()
    }
}

// an assertion is zero-width, it can occupy a position only when the
// asserted expression could match something at all
fn assertion_lengths<T>(
    expression: &ExpressionMatchProvider<T>,
    max_length: usize,
) -> MatchLengths<'_> {
    if !expression.supports_look_back() {
        return no_lengths();
    }

    if expression
        .get_possible_match_lengths(max_length)
        .next()
        .is_some()
    {
        zero_length()
    } else {
        no_lengths()
    }
}

/// Asserts that the first match of the expression at the current
/// position succeeds (or fails, when `negative`), without consuming it.
pub struct LookAheadExpression<T> {
    expression: Box<ExpressionMatchProvider<T>>,
    negative: bool,
}

impl<T> LookAheadExpression<T> {
    pub fn new(expression: Expression<T>, negative: bool) -> Self {
        LookAheadExpression {
            expression: Box::new(ExpressionMatchProvider::new(expression)),
            negative,
        }
    }

    pub fn expression(&self) -> &ExpressionMatchProvider<T> {
        &self.expression
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_match_at(&self, source: &dyn ElementSource<T>, index: usize) -> MatchLength {
        if !source.is_item_in_range(index) {
            return MatchLength::NO_MATCH;
        }

        let found = self.expression.get_matches(source, index).next().is_some();
        MatchLength::empty_match(found ^ self.negative)
    }
}

impl<T> LookBackMatchProvider for LookAheadExpression<T> {
    fn supports_look_back(&self) -> bool {
        self.expression.supports_look_back()
    }

    fn any_length(&self) -> bool {
        false
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        assertion_lengths(&self.expression, max_length)
    }
}

/// Asserts that the expression matches (or does not match, when
/// `negative`) a range ending exactly at the current position.
///
/// The candidate ranges come from the possible match lengths of the
/// expression. When the expression can not tell its lengths, both the
/// positive and the negative assertion fail.
pub struct LookBehindExpression<T> {
    expression: Box<ExpressionMatchProvider<T>>,
    negative: bool,
}

impl<T> LookBehindExpression<T> {
    pub fn new(expression: Expression<T>, negative: bool) -> Self {
        LookBehindExpression {
            expression: Box::new(ExpressionMatchProvider::new(expression)),
            negative,
        }
    }

    pub fn expression(&self) -> &ExpressionMatchProvider<T> {
        &self.expression
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_match_at(&self, source: &dyn ElementSource<T>, index: usize) -> MatchLength {
        if !source.is_item_in_range(index) || !self.expression.supports_look_back() {
            return MatchLength::NO_MATCH;
        }

        let found = self
            .expression
            .get_possible_match_lengths(index)
            .filter(|length| *length <= index)
            .any(|length| {
                self.expression
                    .get_matches(source, index - length)
                    .any(|m| m.len() == length)
            });

        MatchLength::empty_match(found ^ self.negative)
    }
}

impl<T> LookBackMatchProvider for LookBehindExpression<T> {
    fn supports_look_back(&self) -> bool {
        self.expression.supports_look_back()
    }

    fn any_length(&self) -> bool {
        false
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        assertion_lengths(&self.expression, max_length)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        expression::Expression,
        list::ListExpression,
        matchresult::MatchLength,
        provider::{LookBackMatchProvider, MatchProvider},
        source::{ElementSource, ListSource},
        testutil::{ch, LengthsOnly, Opaque},
    };

    use super::{Anchor, LookAheadExpression, LookBehindExpression};

    fn lengths_of(expression: &ListExpression<char>, text: &str, index: usize) -> Vec<usize> {
        let source = ListSource::from(text);
        expression
            .get_matches(&source, index)
            .map(|m| m.len())
            .collect()
    }

    fn digits() -> ListSource<char> {
        ListSource::from("0123456789")
    }

    #[test]
    fn test_anchors() {
        let source: &dyn ElementSource<char> = &ListSource::from("ab");

        assert_eq!(Anchor::Start.is_match_at(source, 0), MatchLength::empty_match(true));
        assert_eq!(Anchor::Start.is_match_at(source, 1), MatchLength::NO_MATCH);
        assert_eq!(Anchor::End.is_match_at(source, 1), MatchLength::NO_MATCH);
        assert_eq!(Anchor::End.is_match_at(source, 2), MatchLength::empty_match(true));
        assert_eq!(Anchor::End.is_match_at(source, 3), MatchLength::NO_MATCH);

        let empty: &dyn ElementSource<char> = &ListSource::<char>::new(vec![]);
        assert!(Anchor::Start.is_match_at(empty, 0).success);
        assert!(Anchor::End.is_match_at(empty, 0).success);

        assert!(Anchor::Start.supports_look_back());
        assert!(!Anchor::End.any_length());
        assert_eq!(
            Anchor::End.get_possible_match_lengths(10).collect::<Vec<_>>(),
            vec![0]
        );
    }

    #[test]
    fn test_look_ahead() {
        let source = ListSource::from("ABC");
        let positive = LookAheadExpression::new(Expression::values("AB".chars()), false);
        let negative = LookAheadExpression::new(Expression::values("AB".chars()), true);

        assert_eq!(positive.is_match_at(&source, 0), MatchLength::empty_match(true));
        assert_eq!(positive.is_match_at(&source, 1), MatchLength::empty_match(false));
        assert_eq!(negative.is_match_at(&source, 0), MatchLength::empty_match(false));
        assert_eq!(negative.is_match_at(&source, 1), MatchLength::empty_match(true));

        // nothing follows the end
        assert!(negative.is_match_at(&source, 3).success);
        assert!(!positive.is_match_at(&source, 3).success);
        assert!(!negative.is_match_at(&source, 4).success);
    }

    #[test]
    fn test_look_ahead_of_empty_alternation() {
        let source = ListSource::from("A");
        let positive = LookAheadExpression::new(Expression::<char>::alternation(vec![]), false);
        let negative = LookAheadExpression::new(Expression::<char>::alternation(vec![]), true);

        // the empty alternative always matches
        assert!(positive.is_match_at(&source, 0).success);
        assert!(positive.is_match_at(&source, 1).success);
        assert!(!negative.is_match_at(&source, 0).success);
    }

    #[test]
    fn test_look_ahead_possible_lengths() {
        let none = LookAheadExpression::new(Expression::custom(LengthsOnly::new(&[])), false);
        assert_eq!(none.get_possible_match_lengths(100).count(), 0);

        let one = LookAheadExpression::new(Expression::custom(LengthsOnly::new(&[1])), false);
        assert_eq!(one.get_possible_match_lengths(100).collect::<Vec<_>>(), vec![0]);

        let many = LookAheadExpression::new(
            Expression::custom(LengthsOnly::new(&[2, 3, 5])),
            true,
        );
        assert_eq!(many.get_possible_match_lengths(100).collect::<Vec<_>>(), vec![0]);
        assert!(many.supports_look_back());
        assert!(!many.any_length());
    }

    #[test]
    fn test_look_behind() {
        let source = ListSource::from("AAABBB");
        let positive = LookBehindExpression::new(ch('A'), false);
        let negative = LookBehindExpression::new(ch('A'), true);

        assert!(!positive.is_match_at(&source, 0).success);
        assert!(positive.is_match_at(&source, 3).success);
        assert!(!positive.is_match_at(&source, 4).success);
        assert!(negative.is_match_at(&source, 0).success);
        assert!(!negative.is_match_at(&source, 3).success);
        assert!(negative.is_match_at(&source, 4).success);
        assert_eq!(positive.is_match_at(&source, 3).length, 0);
    }

    #[test]
    fn test_look_behind_of_repetition() {
        let any = Expression::<char>::any;
        let lazy = LookBehindExpression::new(any().repeat_range_lazy(2, 2).unwrap(), false);
        let greedy = LookBehindExpression::new(any().repeat(2), false);

        assert_eq!(lazy.is_match_at(&digits(), 5), MatchLength::empty_match(true));
        assert_eq!(greedy.is_match_at(&digits(), 1), MatchLength::empty_match(false));
        assert_eq!(greedy.is_match_at(&digits(), 2), MatchLength::empty_match(true));
    }

    #[test]
    fn test_look_behind_on_empty_source() {
        let source = ListSource::<char>::new(vec![]);
        let expression = LookBehindExpression::new(Expression::<char>::any(), false);

        assert!(!expression.is_match_at(&source, 0).success);
    }

    #[test]
    fn test_look_behind_without_look_back_support() {
        let source = ListSource::from("AB");
        let positive = LookBehindExpression::new(Expression::custom(Opaque('A')), false);
        let negative = LookBehindExpression::new(Expression::custom(Opaque('A')), true);

        assert!(!positive.supports_look_back());
        assert!(!positive.is_match_at(&source, 1).success);
        assert!(!negative.is_match_at(&source, 1).success);
        assert!(!negative.is_match_at(&source, 2).success);
    }

    #[test]
    fn test_look_behind_possible_lengths() {
        let none = LookBehindExpression::new(Expression::custom(LengthsOnly::new(&[])), false);
        assert_eq!(none.get_possible_match_lengths(100).count(), 0);

        let one = LookBehindExpression::new(Expression::custom(LengthsOnly::new(&[1])), false);
        assert_eq!(one.get_possible_match_lengths(100).collect::<Vec<_>>(), vec![0]);

        let many = LookBehindExpression::new(
            Expression::custom(LengthsOnly::new(&[2, 3, 5])),
            false,
        );
        assert_eq!(many.get_possible_match_lengths(100).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_look_behind_then_repeat() {
        let expression =
            ListExpression::new(vec![Expression::look_behind(ch('A')), ch('B').repeat(2)]);

        let source = ListSource::from("AAABBB");
        let matches: Vec<_> = expression.get_matches(&source, 3).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range(), 3..5);
        assert_eq!(matches[0].items().iter().collect::<String>(), "BB");
    }

    #[test]
    fn test_look_behind_fixed_repetition_then_greedy_any() {
        let expression = ListExpression::new(vec![
            Expression::look_behind(ch('A').repeat(3)),
            Expression::any().zero_or_more(),
            ch('B'),
        ]);

        assert_eq!(lengths_of(&expression, "AAABBB", 3), vec![3, 2, 1]);
        assert_eq!(lengths_of(&expression, "AAABBB", 4), Vec::<usize>::new());
    }

    #[test]
    fn test_look_behind_alternation() {
        let expression = ListExpression::new(vec![
            Expression::look_behind(Expression::alternation(vec![ch('5'), ch('A').repeat(3)])),
            Expression::any().zero_or_more(),
            ch('B'),
        ]);

        assert_eq!(lengths_of(&expression, "AAABBB", 3), vec![3, 2, 1]);
    }

    #[test]
    fn test_look_behind_start() {
        let expression = ListExpression::new(vec![
            Expression::look_behind(Expression::start()),
            Expression::any().zero_or_more(),
            ch('B'),
        ]);

        assert_eq!(lengths_of(&expression, "AAABBB", 0), vec![6, 5, 4]);
        assert_eq!(lengths_of(&expression, "AAABBB", 1), Vec::<usize>::new());
    }

    #[test]
    fn test_look_behind_list() {
        let expression = ListExpression::new(vec![
            Expression::look_behind(Expression::list(vec![ch('A'), ch('B')])),
            Expression::any().zero_or_more(),
            ch('B'),
        ]);

        assert_eq!(lengths_of(&expression, "AAABBB", 4), vec![2, 1]);
        assert_eq!(lengths_of(&expression, "AAABBB", 5), Vec::<usize>::new());
    }

    #[test]
    fn test_look_behind_list_with_look_ahead() {
        let expression = ListExpression::new(vec![
            Expression::look_behind(Expression::list(vec![
                ch('A'),
                ch('B'),
                Expression::look_ahead(ch('B').repeat(2)),
                Expression::negative_look_ahead(ch('A').repeat(2)),
            ])),
            Expression::any().zero_or_more(),
            ch('B'),
        ]);

        assert_eq!(lengths_of(&expression, "AAABBB", 4), vec![2, 1]);
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{collections::HashMap, fmt::Debug};

use crate::{
    alternation::AlternationExpression,
    assertion::{Anchor, LookAheadExpression, LookBehindExpression},
    class::{AnyClass, Class, PredicateClass, ValueClass},
    error::SeqError,
    list::ListExpression,
    matchresult::MatchLength,
    provider::{checked_match, LookBackMatchProvider, Matches},
    repetition::{RepeatExpression, RepetitionType, MAXIMUM},
    source::ElementSource,
};

/// A node of a pattern tree.
///
/// An expression is immutable once built and may be used by any number
/// of searches. Composite nodes own their children.
pub enum Expression<T> {
    Class(Box<dyn Class<T>>),
    List(ListExpression<T>),
    Alternation(AlternationExpression<T>),
    Repeat(RepeatExpression<T>),
    LookAhead(LookAheadExpression<T>),
    LookBehind(LookBehindExpression<T>),
    Anchor(Anchor),
    Custom(Box<dyn CustomExpression<T>>),
}

/// An expression kind defined outside of this crate.
///
/// Only `is_match_at` is required. An implementation that does not
/// return a look back provider can not be used inside a lookbehind:
/// the lookbehind never matches.
pub trait CustomExpression<T> {
    /// A successful result whose range does not fit in the source is
    /// dropped.
    fn is_match_at(&self, source: &dyn ElementSource<T>, index: usize) -> MatchLength;

    fn get_matches<'a>(&'a self, source: &'a dyn ElementSource<T>, index: usize) -> Matches<'a, T>
    where
        T: 'a,
    {
        checked_match(source, index, self.is_match_at(source, index))
    }

    fn look_back(&self) -> Option<&dyn LookBackMatchProvider> {
        None
    }

    /// The text used by the debug printer.
    fn name(&self) -> String {
        "custom".to_owned()
    }
}

impl<T> Expression<T> {
    pub fn class<C>(class: C) -> Self
    where
        C: Class<T> + 'static,
    {
        Expression::Class(Box::new(class))
    }

    pub fn any() -> Self {
        Expression::Class(Box::new(AnyClass))
    }

    pub fn predicate<F>(label: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
        T: 'static,
    {
        Expression::Class(Box::new(PredicateClass::with_label(label, predicate)))
    }

    pub fn list(expressions: Vec<Expression<T>>) -> Self {
        Expression::List(ListExpression::new(expressions))
    }

    pub fn alternation(expressions: Vec<Expression<T>>) -> Self {
        Expression::Alternation(AlternationExpression::new(expressions))
    }

    pub fn look_ahead(expression: Expression<T>) -> Self {
        Expression::LookAhead(LookAheadExpression::new(expression, false))
    }

    pub fn negative_look_ahead(expression: Expression<T>) -> Self {
        Expression::LookAhead(LookAheadExpression::new(expression, true))
    }

    pub fn look_behind(expression: Expression<T>) -> Self {
        Expression::LookBehind(LookBehindExpression::new(expression, false))
    }

    pub fn negative_look_behind(expression: Expression<T>) -> Self {
        Expression::LookBehind(LookBehindExpression::new(expression, true))
    }

    pub fn start() -> Self {
        Expression::Anchor(Anchor::Start)
    }

    pub fn end() -> Self {
        Expression::Anchor(Anchor::End)
    }

    pub fn custom<C>(expression: C) -> Self
    where
        C: CustomExpression<T> + 'static,
    {
        Expression::Custom(Box::new(expression))
    }

    // repetitions

    fn repetition(self, min: usize, max: usize, repetition_type: RepetitionType) -> Self {
        // callers pass bounds with `min <= max`
        Expression::Repeat(RepeatExpression::new_unchecked(
            self,
            min,
            max,
            repetition_type,
        ))
    }

    /// Exactly `count` times.
    pub fn repeat(self, count: usize) -> Self {
        self.repetition(count, count, RepetitionType::Greedy)
    }

    pub fn repeat_range(self, min: usize, max: usize) -> Result<Self, SeqError> {
        Ok(Expression::Repeat(RepeatExpression::new(
            self,
            min,
            max,
            RepetitionType::Greedy,
        )?))
    }

    pub fn repeat_range_lazy(self, min: usize, max: usize) -> Result<Self, SeqError> {
        Ok(Expression::Repeat(RepeatExpression::new(
            self,
            min,
            max,
            RepetitionType::Lazy,
        )?))
    }

    pub fn at_least(self, min: usize) -> Self {
        self.repetition(min, MAXIMUM, RepetitionType::Greedy)
    }

    pub fn at_least_lazy(self, min: usize) -> Self {
        self.repetition(min, MAXIMUM, RepetitionType::Lazy)
    }

    pub fn zero_or_more(self) -> Self {
        self.repetition(0, MAXIMUM, RepetitionType::Greedy)
    }

    pub fn zero_or_more_lazy(self) -> Self {
        self.repetition(0, MAXIMUM, RepetitionType::Lazy)
    }

    pub fn one_or_more(self) -> Self {
        self.repetition(1, MAXIMUM, RepetitionType::Greedy)
    }

    pub fn one_or_more_lazy(self) -> Self {
        self.repetition(1, MAXIMUM, RepetitionType::Lazy)
    }

    pub fn optional(self) -> Self {
        self.repetition(0, 1, RepetitionType::Greedy)
    }

    pub fn optional_lazy(self) -> Self {
        self.repetition(0, 1, RepetitionType::Lazy)
    }
}

impl<T: PartialEq + Debug + 'static> Expression<T> {
    pub fn value(value: T) -> Self {
        Expression::Class(Box::new(ValueClass::new(value)))
    }

    /// A list of value classes, e.g. `Expression::values("abc".chars())`.
    pub fn values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Expression::list(values.into_iter().map(Expression::value).collect())
    }
}

type Constructor<T> = Box<dyn Fn() -> Expression<T>>;

/// Named expression constructors, for front ends that build patterns
/// from a definition text.
pub struct ExpressionRegistry<T> {
    constructors: HashMap<String, Constructor<T>>,
}

impl<T> ExpressionRegistry<T> {
    pub fn new() -> Self {
        ExpressionRegistry {
            constructors: HashMap::new(),
        }
    }

    /// Registers a constructor, replacing the one with the same name.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn() -> Expression<T> + 'static,
    {
        self.constructors
            .insert(name.to_owned(), Box::new(constructor));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Builds a new instance of the named expression.
    pub fn get(&self, name: &str) -> Result<Expression<T>, SeqError> {
        match self.constructors.get(name) {
            Some(constructor) => Ok(constructor()),
            None => Err(SeqError::NullArgument(name.to_owned())),
        }
    }

    /// Builds a list of named expressions.
    pub fn get_list(&self, names: &[&str]) -> Result<Expression<T>, SeqError> {
        let expressions = names
            .iter()
            .map(|name| self.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expression::list(expressions))
    }

    /// Builds an alternation of named expressions.
    pub fn get_alternation(&self, names: &[&str]) -> Result<Expression<T>, SeqError> {
        let expressions = names
            .iter()
            .map(|name| self.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expression::alternation(expressions))
    }
}

impl<T> Default for ExpressionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    error::SeqError,
    expression::Expression,
    matchcollection::MatchCollection,
    matchresult::Match,
    provider::{ExpressionMatchProvider, MatchProvider},
    source::ElementSource,
};

/// A compiled search pattern, the entry point of the library.
///
/// A pattern is immutable and can be used for any number of searches.
pub struct Pattern<T> {
    provider: ExpressionMatchProvider<T>,
}

impl<T> Pattern<T> {
    pub fn new(expression: Expression<T>) -> Self {
        Pattern {
            provider: ExpressionMatchProvider::new(expression),
        }
    }

    pub fn expression(&self) -> &Expression<T> {
        self.provider.expression()
    }

    /// Finds all non-overlapping matches, starting the search at `start_at`.
    ///
    /// The returned collection is locked.
    pub fn matches<'a>(
        &'a self,
        source: &'a dyn ElementSource<T>,
        start_at: usize,
    ) -> Result<MatchCollection<'a, T>, SeqError> {
        check_start_at(source, start_at)?;
        Ok(self.find_iter(source, start_at).collect())
    }

    /// Finds the first match at or after `start_at`. When there is none,
    /// the result is an unsuccessful empty match at `start_at`.
    pub fn find<'a>(
        &'a self,
        source: &'a dyn ElementSource<T>,
        start_at: usize,
    ) -> Result<Match<'a, T>, SeqError> {
        check_start_at(source, start_at)?;

        let m = match self.find_iter(source, start_at).next() {
            Some(m) => m,
            None => Match::failure(source, start_at),
        };
        Ok(m)
    }

    /// The lazy version of `matches`.
    ///
    /// Yields nothing when `start_at` is out of the range of the source.
    pub fn find_iter<'a>(&'a self, source: &'a dyn ElementSource<T>, start_at: usize) -> FindIter<'a, T> {
        FindIter {
            provider: &self.provider,
            source,
            position: start_at,
            finished: !source.is_item_in_range(start_at),
        }
    }

    /// Whether the pattern matches anywhere in the source.
    pub fn is_match(&self, source: &dyn ElementSource<T>) -> bool {
        self.find_iter(source, 0).next().is_some()
    }

    /// Whether the pattern matches starting exactly at `index`.
    pub fn is_match_at(&self, source: &dyn ElementSource<T>, index: usize) -> bool {
        self.provider.get_matches(source, index).next().is_some()
    }

    pub fn get_debug_text(&self) -> String {
        self.provider.to_string()
    }
}

impl<T> From<Expression<T>> for Pattern<T> {
    fn from(expression: Expression<T>) -> Self {
        Pattern::new(expression)
    }
}

fn check_start_at<T>(source: &dyn ElementSource<T>, start_at: usize) -> Result<(), SeqError> {
    if source.is_item_in_range(start_at) {
        Ok(())
    } else {
        Err(SeqError::OutOfRange(format!(
            "start position {} must be less than or equal to the number of items.",
            start_at
        )))
    }
}

/// The search driver.
///
/// At every position only the first (most preferred) match is taken. The
/// search moves past a non-empty match, and moves one element forward
/// after an empty match or no match.
pub struct FindIter<'a, T> {
    provider: &'a ExpressionMatchProvider<T>,
    source: &'a dyn ElementSource<T>,
    position: usize,
    finished: bool,
}

impl<'a, T> Iterator for FindIter<'a, T> {
    type Item = Match<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while self.source.is_item_in_range(self.position) {
            let first = self.provider.get_matches(self.source, self.position).next();

            match first {
                Some(m) => {
                    self.position += if m.is_empty() { 1 } else { m.len() };
                    return Some(m);
                }
                None => {
                    self.position += 1;
                }
            }
        }

        self.finished = true;

        // a scan always ends one position past the valid range,
        // anything else is a defect of the engine
        assert!(
            self.source.is_index_just_past_range(self.position),
            "the search stopped at position {}, which is not just past the range of the source.",
            self.position
        );

        None
    }
}

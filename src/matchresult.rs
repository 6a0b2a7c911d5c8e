// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{cell::OnceCell, fmt, ops::Range};

use crate::{
    error::SeqError,
    source::{ElementSource, PartialList},
};

/// The outcome of testing an expression at a single position,
/// without allocating a `Match`.
///
/// `length` is always 0 when `success` is false.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MatchLength {
    pub success: bool,
    pub length: usize,
}

impl MatchLength {
    pub const NO_MATCH: MatchLength = MatchLength {
        success: false,
        length: 0,
    };

    pub fn of(length: usize) -> Self {
        MatchLength {
            success: true,
            length,
        }
    }

    /// A zero-width result, used by anchors and assertions.
    pub fn empty_match(success: bool) -> Self {
        MatchLength { success, length: 0 }
    }

    /// The result of a single-element class: one element on success.
    pub fn class_match_if(success: bool) -> Self {
        MatchLength {
            success,
            length: if success { 1 } else { 0 },
        }
    }
}

/// A match of an expression in an element source.
pub struct Match<'a, T> {
    source: &'a dyn ElementSource<T>,
    index: usize,
    length: usize,
    success: bool,
    items: OnceCell<PartialList<'a, T>>,
}

impl<'a, T> Match<'a, T> {
    /// Creates a match, checking that `[index, index + length)` lies in the
    /// source and that a non-empty match is successful.
    pub fn new(
        source: &'a dyn ElementSource<T>,
        index: usize,
        length: usize,
        success: bool,
    ) -> Result<Self, SeqError> {
        if !source.is_item_in_range(index) {
            return Err(SeqError::OutOfRange(format!(
                "index {} must be less than or equal to the number of items.",
                index
            )));
        }

        let end = index.checked_add(length).ok_or_else(|| {
            SeqError::OutOfRange(format!("length {} overflows the index {}.", length, index))
        })?;

        if !source.is_item_in_range(end) {
            return Err(SeqError::InvalidArgument(format!(
                "index + length ({}) must be less than or equal to the number of items.",
                end
            )));
        }

        if length > 0 && !success {
            return Err(SeqError::InvalidArgument(
                "success must be true when length is greater than 0.".to_owned(),
            ));
        }

        Ok(Match {
            source,
            index,
            length,
            success,
            items: OnceCell::new(),
        })
    }

    /// A successful match produced by the engine. The engine only builds
    /// matches from positions it has already visited, so the range is
    /// known to be valid.
    pub(crate) fn matched(source: &'a dyn ElementSource<T>, index: usize, length: usize) -> Self {
        debug_assert!(source.is_item_in_range(index));
        debug_assert!(source.is_item_in_range(index + length));

        Match {
            source,
            index,
            length,
            success: true,
            items: OnceCell::new(),
        }
    }

    /// An unsuccessful, zero-length match at `index`.
    pub(crate) fn failure(source: &'a dyn ElementSource<T>, index: usize) -> Self {
        Match {
            source,
            index,
            length: 0,
            success: false,
            items: OnceCell::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Position just past the last matched element.
    pub fn end(&self) -> usize {
        self.index + self.length
    }

    pub fn range(&self) -> Range<usize> {
        self.index..self.end()
    }

    /// The matched elements. The view is created on first access and the
    /// same view is returned afterwards.
    pub fn items(&self) -> &PartialList<'a, T> {
        self.items
            .get_or_init(|| PartialList::new_unchecked(self.source, self.index, self.length))
    }
}

impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        Match {
            source: self.source,
            index: self.index,
            length: self.length,
            success: self.success,
            items: self.items.clone(),
        }
    }
}

impl<T> PartialEq for Match<'_, T> {
    /// Two matches are equal when they describe the same range with the
    /// same outcome; the source itself is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.length == other.length && self.success == other.success
    }
}

impl<T> fmt::Debug for Match<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("index", &self.index)
            .field("length", &self.length)
            .field("success", &self.success)
            .finish()
    }
}

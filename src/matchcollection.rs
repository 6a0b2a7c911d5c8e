// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::Index;

use crate::{error::SeqError, matchresult::Match};

/// An ordered list of matches which accepts new matches until it is
/// locked, and is read-only afterwards.
pub struct MatchCollection<'a, T> {
    matches: Vec<Match<'a, T>>,
    locked: bool,
}

impl<'a, T> MatchCollection<'a, T> {
    pub fn new() -> Self {
        MatchCollection {
            matches: vec![],
            locked: false,
        }
    }

    pub fn add(&mut self, m: Match<'a, T>) -> Result<(), SeqError> {
        if self.locked {
            return Err(SeqError::InvalidOperation(
                "the match collection is locked.".to_owned(),
            ));
        }

        self.matches.push(m);
        Ok(())
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Match<'a, T>> {
        self.matches.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match<'a, T>> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[Match<'a, T>] {
        &self.matches
    }

    /// Removing is never allowed, locked or not.
    pub fn remove(&mut self, index: usize) -> Result<Match<'a, T>, SeqError> {
        Err(SeqError::NotSupported(format!(
            "matches can not be removed from the collection (index {}).",
            index
        )))
    }

    /// The elements of every match, concatenated in match order.
    pub fn to_items(&self) -> Vec<T> {
        self.matches
            .iter()
            .flat_map(|m| m.items().iter())
            .collect()
    }
}

impl<'a, T> Default for MatchCollection<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> Index<usize> for MatchCollection<'a, T> {
    type Output = Match<'a, T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.matches[index]
    }
}

impl<'a, 'b, T> IntoIterator for &'b MatchCollection<'a, T> {
    type Item = &'b Match<'a, T>;
    type IntoIter = std::slice::Iter<'b, Match<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl<'a, T> FromIterator<Match<'a, T>> for MatchCollection<'a, T> {
    /// Collects the matches and locks the collection.
    fn from_iter<I: IntoIterator<Item = Match<'a, T>>>(iter: I) -> Self {
        MatchCollection {
            matches: iter.into_iter().collect(),
            locked: true,
        }
    }
}

impl<T> std::fmt::Debug for MatchCollection<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.matches.iter()).finish()
    }
}

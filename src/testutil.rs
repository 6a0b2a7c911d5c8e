// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{
    expression::{CustomExpression, Expression},
    matchresult::MatchLength,
    provider::{LookBackMatchProvider, MatchLengths},
    source::ElementSource,
};

pub fn ch(c: char) -> Expression<char> {
    Expression::value(c)
}

/// An expression which never matches and only describes its look back
/// capability.
pub struct LengthsOnly {
    pub supports_look_back: bool,
    pub any_length: bool,
    pub lengths: Vec<usize>,
}

impl LengthsOnly {
    pub fn new(lengths: &[usize]) -> Self {
        LengthsOnly {
            supports_look_back: true,
            any_length: false,
            lengths: lengths.to_vec(),
        }
    }
}

impl CustomExpression<char> for LengthsOnly {
    fn is_match_at(&self, _source: &dyn ElementSource<char>, _index: usize) -> MatchLength {
        MatchLength::NO_MATCH
    }

    fn look_back(&self) -> Option<&dyn LookBackMatchProvider> {
        Some(self)
    }

    fn name(&self) -> String {
        format!("lengths({:?})", self.lengths)
    }
}

impl LookBackMatchProvider for LengthsOnly {
    fn supports_look_back(&self) -> bool {
        self.supports_look_back
    }

    fn any_length(&self) -> bool {
        self.any_length
    }

    fn get_possible_match_lengths(&self, max_length: usize) -> MatchLengths<'_> {
        Box::new(
            self.lengths
                .iter()
                .copied()
                .filter(move |length| *length <= max_length),
        )
    }
}

/// Matches one element without describing its width.
pub struct Opaque(pub char);

impl CustomExpression<char> for Opaque {
    fn is_match_at(&self, source: &dyn ElementSource<char>, index: usize) -> MatchLength {
        MatchLength::class_match_if(source.try_get_item_at_index(index) == Some(self.0))
    }

    fn name(&self) -> String {
        format!("opaque('{}')", self.0)
    }
}

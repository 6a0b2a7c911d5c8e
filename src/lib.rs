// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod alternation;
mod assertion;
mod class;
mod error;
mod expression;
mod list;
mod matchcollection;
mod matchresult;
mod printer;
mod repetition;
mod source;

pub mod process;
pub mod provider;

#[cfg(test)]
mod testutil;

pub use alternation::AlternationExpression;
pub use assertion::{Anchor, LookAheadExpression, LookBehindExpression};
pub use class::{AnyClass, Class, NegativeSetClass, NotClass, PredicateClass, SetClass, ValueClass};
pub use error::SeqError;
pub use expression::{CustomExpression, Expression, ExpressionRegistry};
pub use list::ListExpression;
pub use matchcollection::MatchCollection;
pub use matchresult::{Match, MatchLength};
pub use process::{FindIter, Pattern};
pub use provider::{ExpressionMatchProvider, LookBackMatchProvider, MatchProvider};
pub use repetition::{RepeatExpression, RepetitionType, MAXIMUM};
pub use source::{ElementSource, EnumerableSource, ListSource, PartialList, PartialListIter};

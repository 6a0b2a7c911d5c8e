// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::{self, Display};

#[derive(Debug, PartialEq, Clone)]
pub enum SeqError {
    // a required expression (e.g. a registry entry) is absent
    NullArgument(String),

    // an index, a count or a repetition bound is outside of the valid range
    OutOfRange(String),

    // arguments are individually valid but inconsistent with each other,
    // e.g. `max < min`, or `length > 0` for an unsuccessful match
    InvalidArgument(String),

    // the object is in a state that does not allow the operation,
    // e.g. appending to a locked `MatchCollection`
    InvalidOperation(String),

    // the operation is never supported by the object, e.g. mutating
    // a read-only view
    NotSupported(String),
}

impl Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqError::NullArgument(name) => write!(f, "Argument \"{}\" is required.", name),
            SeqError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            SeqError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SeqError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            SeqError::NotSupported(msg) => write!(f, "Not supported: {}", msg),
        }
    }
}

impl std::error::Error for SeqError {}

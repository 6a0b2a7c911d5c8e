// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

use crate::{
    alternation::AlternationExpression,
    assertion::{Anchor, LookAheadExpression, LookBehindExpression},
    expression::Expression,
    list::ListExpression,
    provider::ExpressionMatchProvider,
    repetition::{RepeatExpression, RepetitionType, MAXIMUM},
};

impl Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anchor::Start => f.write_str("start"),
            Anchor::End => f.write_str("end"),
        }
    }
}

impl<T> Display for ListExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: Vec<String> = self.expressions().iter().map(|e| e.to_string()).collect();
        write!(f, "({})", s.join(", "))
    }
}

impl<T> Display for AlternationExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.expressions().is_empty() {
            // same as the empty list, both match the empty sequence
            return f.write_str("()");
        }

        let s: Vec<String> = self
            .expressions()
            .iter()
            .map(|e| {
                if matches!(e.expression(), Expression::Alternation(_)) {
                    format!("({})", e)
                } else {
                    e.to_string()
                }
            })
            .collect();
        write!(f, "{}", s.join(" || "))
    }
}

impl<T> Display for RepeatExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expression = self.expression();
        let (min, max) = (self.min(), self.max());

        if min == max {
            // laziness makes no difference
            return write!(f, "repeat({}, {})", expression, min);
        }

        let suffix = match self.repetition_type() {
            RepetitionType::Lazy => "_lazy",
            RepetitionType::Greedy => "",
        };

        match (min, max) {
            (0, MAXIMUM) => write!(f, "zero_or_more{}({})", suffix, expression),
            (1, MAXIMUM) => write!(f, "one_or_more{}({})", suffix, expression),
            (0, 1) => write!(f, "optional{}({})", suffix, expression),
            (_, MAXIMUM) => write!(f, "at_least{}({}, {})", suffix, expression, min),
            _ => write!(f, "repeat_range{}({}, {}, {})", suffix, expression, min, max),
        }
    }
}

impl<T> Display for LookAheadExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "is_not_before({})", self.expression())
        } else {
            write!(f, "is_before({})", self.expression())
        }
    }
}

impl<T> Display for LookBehindExpression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "is_not_after({})", self.expression())
        } else {
            write!(f, "is_after({})", self.expression())
        }
    }
}

impl<T> Display for ExpressionMatchProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression())
    }
}

impl<T> Display for Expression<T> {
    // for debug
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Class(c) => f.write_str(&c.name()),
            Expression::List(e) => write!(f, "{}", e),
            Expression::Alternation(e) => write!(f, "{}", e),
            Expression::Repeat(e) => write!(f, "{}", e),
            Expression::LookAhead(e) => write!(f, "{}", e),
            Expression::LookBehind(e) => write!(f, "{}", e),
            Expression::Anchor(e) => write!(f, "{}", e),
            Expression::Custom(e) => f.write_str(&e.name()),
        }
    }
}

// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Debug;

use crate::{matchresult::MatchLength, source::ElementSource};

/// A matcher of a single element.
pub trait Class<T> {
    fn is_match(&self, item: &T) -> bool;

    /// Tests the element at `index`. There is no element at the end of
    /// the source, so a class never matches there.
    fn is_match_at(&self, source: &dyn ElementSource<T>, index: usize) -> MatchLength {
        match source.try_get_item_at_index(index) {
            Some(item) => MatchLength::class_match_if(self.is_match(&item)),
            None => MatchLength::NO_MATCH,
        }
    }

    /// The text used by the debug printer.
    fn name(&self) -> String;
}

/// Matches every element.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyClass;

impl<T> Class<T> for AnyClass {
    fn is_match(&self, _item: &T) -> bool {
        true
    }

    fn name(&self) -> String {
        "any".to_owned()
    }
}

/// Matches the elements equal to `value`.
#[derive(Debug, Clone)]
pub struct ValueClass<T> {
    pub value: T,
}

impl<T> ValueClass<T> {
    pub fn new(value: T) -> Self {
        ValueClass { value }
    }
}

impl<T: PartialEq + Debug> Class<T> for ValueClass<T> {
    fn is_match(&self, item: &T) -> bool {
        item == &self.value
    }

    fn name(&self) -> String {
        format!("{:?}", self.value)
    }
}

pub struct PredicateClass<T> {
    predicate: Box<dyn Fn(&T) -> bool>,
    label: Option<String>,
}

impl<T> PredicateClass<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        PredicateClass {
            predicate: Box::new(predicate),
            label: None,
        }
    }

    /// A predicate class shown as `label` in debug text,
    /// e.g. `char_digit`.
    pub fn with_label<F>(label: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        PredicateClass {
            predicate: Box::new(predicate),
            label: Some(label.to_owned()),
        }
    }
}

impl<T> Class<T> for PredicateClass<T> {
    fn is_match(&self, item: &T) -> bool {
        (self.predicate)(item)
    }

    fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => "predicate".to_owned(),
        }
    }
}

fn join_names<T>(classes: &[Box<dyn Class<T>>]) -> String {
    classes
        .iter()
        .map(|c| c.name())
        .collect::<Vec<String>>()
        .join(", ")
}

/// Matches when any of the member classes matches.
pub struct SetClass<T> {
    classes: Vec<Box<dyn Class<T>>>,
}

impl<T> SetClass<T> {
    pub fn new(classes: Vec<Box<dyn Class<T>>>) -> Self {
        SetClass { classes }
    }
}

impl<T> Class<T> for SetClass<T> {
    fn is_match(&self, item: &T) -> bool {
        self.classes.iter().any(|c| c.is_match(item))
    }

    fn name(&self) -> String {
        format!("[{}]", join_names(&self.classes))
    }
}

/// Matches when none of the member classes matches.
pub struct NegativeSetClass<T> {
    classes: Vec<Box<dyn Class<T>>>,
}

impl<T> NegativeSetClass<T> {
    pub fn new(classes: Vec<Box<dyn Class<T>>>) -> Self {
        NegativeSetClass { classes }
    }
}

impl<T> Class<T> for NegativeSetClass<T> {
    fn is_match(&self, item: &T) -> bool {
        !self.classes.iter().any(|c| c.is_match(item))
    }

    fn name(&self) -> String {
        format!("![{}]", join_names(&self.classes))
    }
}

pub struct NotClass<T> {
    class: Box<dyn Class<T>>,
}

impl<T> NotClass<T> {
    pub fn new(class: Box<dyn Class<T>>) -> Self {
        NotClass { class }
    }
}

impl<T> Class<T> for NotClass<T> {
    fn is_match(&self, item: &T) -> bool {
        !self.class.is_match(item)
    }

    fn name(&self) -> String {
        format!("!{}", self.class.name())
    }
}

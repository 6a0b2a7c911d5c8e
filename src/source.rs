// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::cell::RefCell;

use crate::error::SeqError;

const INITIAL_CACHE_CAPACITY: usize = 16;

/// The sequence of elements an expression is matched against.
///
/// Valid positions span `[0, length]`, i.e. the position just past the last
/// element is still "in range" so that the end anchor can match there.
pub trait ElementSource<T> {
    /// Returns the element at `index`, or `SeqError::OutOfRange` when there
    /// is no element at that position.
    fn get_item_at_index(&self, index: usize) -> Result<T, SeqError>;

    fn try_get_item_at_index(&self, index: usize) -> Option<T>;

    fn is_at_start(&self, index: usize) -> bool {
        index == 0
    }

    /// True exactly at `length`.
    fn is_at_end(&self, index: usize) -> bool;

    /// True for `0..=length`.
    fn is_item_in_range(&self, index: usize) -> bool;

    /// True only at `length + 1`. The search driver uses it to check that
    /// a full pass stopped exactly one position past the valid range.
    fn is_index_just_past_range(&self, index: usize) -> bool;

    /// An immutable view of `[index, index + length)`.
    fn create_partial_list(
        &self,
        index: usize,
        length: usize,
    ) -> Result<PartialList<'_, T>, SeqError>
    where
        Self: Sized,
    {
        PartialList::new(self, index, length)
    }
}

/// A source backed by a fixed list of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSource<T> {
    items: Vec<T>,
}

impl<T> ListSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        ListSource { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> ListSource<T> {
    pub fn from_slice(items: &[T]) -> Self {
        ListSource {
            items: items.to_vec(),
        }
    }
}

impl From<&str> for ListSource<char> {
    fn from(text: &str) -> Self {
        ListSource {
            items: text.chars().collect(),
        }
    }
}

impl<T> From<Vec<T>> for ListSource<T> {
    fn from(items: Vec<T>) -> Self {
        ListSource { items }
    }
}

impl<T: Clone> ElementSource<T> for ListSource<T> {
    fn get_item_at_index(&self, index: usize) -> Result<T, SeqError> {
        self.items.get(index).cloned().ok_or_else(|| {
            SeqError::OutOfRange(format!(
                "index {} is not less than the number of items {}.",
                index,
                self.items.len()
            ))
        })
    }

    fn try_get_item_at_index(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }

    fn is_at_end(&self, index: usize) -> bool {
        index == self.items.len()
    }

    fn is_item_in_range(&self, index: usize) -> bool {
        index <= self.items.len()
    }

    fn is_index_just_past_range(&self, index: usize) -> bool {
        index == self.items.len() + 1
    }
}

struct EnumerableCache<T, I> {
    upstream: I,
    items: Vec<T>,
    fully_cached: bool,
}

/// A source backed by a single-pass iterator.
///
/// Elements are pulled on demand and kept in an append-only cache, so every
/// upstream element is read at most once and an infinite iterator can be
/// searched as long as the pattern eventually stops asking for more.
///
/// The cache is mutated through a shared reference. Sharing one instance
/// between threads is not supported.
pub struct EnumerableSource<T, I>
where
    I: Iterator<Item = T>,
{
    cache: RefCell<EnumerableCache<T, I>>,
}

impl<T, I> EnumerableSource<T, I>
where
    I: Iterator<Item = T>,
{
    pub fn new(upstream: I) -> Self {
        EnumerableSource {
            cache: RefCell::new(EnumerableCache {
                upstream,
                items: Vec::new(),
                fully_cached: false,
            }),
        }
    }

    /// Number of elements pulled from the upstream iterator so far.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().items.len()
    }

    pub fn is_fully_cached(&self) -> bool {
        self.cache.borrow().fully_cached
    }

    /// Pulls elements until `index` is cached or the upstream is exhausted.
    /// Returns whether an element exists at `index`.
    fn ensure_cached(&self, index: usize) -> bool {
        let mut guard = self.cache.borrow_mut();
        let cache = &mut *guard;

        if index < cache.items.len() {
            return true;
        }

        if cache.fully_cached {
            return false;
        }

        if cache.items.capacity() <= index {
            let mut capacity = cache.items.capacity().max(INITIAL_CACHE_CAPACITY);
            while capacity <= index {
                capacity *= 2;
            }
            let additional = capacity - cache.items.len();
            cache.items.reserve(additional);
        }

        while cache.items.len() <= index {
            match cache.upstream.next() {
                Some(item) => cache.items.push(item),
                None => {
                    cache.fully_cached = true;
                    return false;
                }
            }
        }

        true
    }
}

impl<T, I> EnumerableSource<T, std::iter::Fuse<I>>
where
    I: Iterator<Item = T>,
{
    /// Fuses the upstream iterator, so that it is never polled again
    /// once it has reported the end.
    pub fn from_iterable<C>(iterable: C) -> Self
    where
        C: IntoIterator<Item = T, IntoIter = I>,
    {
        EnumerableSource::new(iterable.into_iter().fuse())
    }
}

impl<T, I> ElementSource<T> for EnumerableSource<T, I>
where
    T: Clone,
    I: Iterator<Item = T>,
{
    fn get_item_at_index(&self, index: usize) -> Result<T, SeqError> {
        self.try_get_item_at_index(index).ok_or_else(|| {
            SeqError::OutOfRange(format!(
                "index {} is not less than the number of items {}.",
                index,
                self.cached_len()
            ))
        })
    }

    fn try_get_item_at_index(&self, index: usize) -> Option<T> {
        if !self.ensure_cached(index) {
            return None;
        }
        self.cache.borrow().items.get(index).cloned()
    }

    fn is_at_end(&self, index: usize) -> bool {
        self.ensure_cached(index);
        index == self.cached_len()
    }

    fn is_item_in_range(&self, index: usize) -> bool {
        self.ensure_cached(index);
        index <= self.cached_len()
    }

    fn is_index_just_past_range(&self, index: usize) -> bool {
        if index <= self.cached_len() {
            return false;
        }
        self.ensure_cached(index);
        index == self.cached_len() + 1
    }
}

/// A read-only window `[index, index + count)` over an element source.
///
/// The window does not copy anything, elements are fetched from the
/// source when read.
pub struct PartialList<'a, T> {
    source: &'a dyn ElementSource<T>,
    index: usize,
    count: usize,
}

impl<T> Clone for PartialList<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PartialList<'_, T> {}

impl<'a, T> PartialList<'a, T> {
    pub fn new(
        source: &'a dyn ElementSource<T>,
        index: usize,
        count: usize,
    ) -> Result<Self, SeqError> {
        if !source.is_item_in_range(index) {
            return Err(SeqError::OutOfRange(format!(
                "index {} must be less than or equal to the number of items.",
                index
            )));
        }

        let end = index.checked_add(count).ok_or_else(|| {
            SeqError::OutOfRange(format!("count {} overflows the index {}.", count, index))
        })?;

        if !source.is_item_in_range(end) {
            return Err(SeqError::InvalidArgument(format!(
                "index + count ({}) must be less than or equal to the number of items.",
                end
            )));
        }

        Ok(PartialList {
            source,
            index,
            count,
        })
    }

    /// Creates a window whose range the caller has already validated.
    pub(crate) fn new_unchecked(
        source: &'a dyn ElementSource<T>,
        index: usize,
        count: usize,
    ) -> Self {
        PartialList {
            source,
            index,
            count,
        }
    }

    /// The position of the first element of this window in the source.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        if index >= self.count {
            return None;
        }
        self.source.try_get_item_at_index(self.index + index)
    }

    pub fn iter(&self) -> PartialListIter<'a, T> {
        PartialListIter {
            list: *self,
            position: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Mutation of a view is never allowed, this always fails.
    pub fn set(&self, index: usize, _item: T) -> Result<(), SeqError> {
        Err(SeqError::NotSupported(format!(
            "modifications to this list are not supported (index {}).",
            index
        )))
    }
}

impl<T: PartialEq> PartialList<'_, T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|e| &e == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PartialList<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &PartialList<'a, T> {
    type Item = T;
    type IntoIter = PartialListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct PartialListIter<'a, T> {
    list: PartialList<'a, T>,
    position: usize,
}

impl<T> Iterator for PartialListIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.list.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remain = self.list.count - self.position.min(self.list.count);
        (remain, Some(remain))
    }
}

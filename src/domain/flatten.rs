//! Flattening a `NestedValue` into its leaf values.
//!
//! Two flavours:
//! - `flatten`: plain recursion, depth of the call stack equals tree height
//! - `leaves` / `into_leaves`: lazy iterators driven by an explicit work stack
//!
//! All of them yield leaves depth-first, left to right.

use std::iter::FusedIterator;
use std::{slice, vec};

use crate::domain::nested::NestedValue;

/// Collects every leaf value of `node` in depth-first, left-to-right order.
///
/// A leaf yields a single value; a group concatenates the flattened
/// children, folding left from an empty vector.
pub fn flatten<T>(node: NestedValue<T>) -> Vec<T> {
    match node {
        NestedValue::Leaf(value) => vec![value],
        NestedValue::Group(children) => children.into_iter().fold(Vec::new(), |mut acc, child| {
            acc.extend(flatten(child));
            acc
        }),
    }
}

impl<T> NestedValue<T> {
    /// Borrowing iterator over the leaf values.
    pub fn leaves(&self) -> Leaves<'_, T> {
        Leaves {
            stack: vec![slice::from_ref(self).iter()],
        }
    }

    /// Owning iterator over the leaf values.
    ///
    /// Groups are taken apart as they are visited, so neither iteration nor
    /// dropping the iterator recurses.
    pub fn into_leaves(self) -> IntoLeaves<T> {
        IntoLeaves {
            stack: vec![vec![self].into_iter()],
        }
    }
}

/// Iterator returned by [`NestedValue::leaves`].
#[derive(Debug)]
pub struct Leaves<'a, T> {
    stack: Vec<slice::Iter<'a, NestedValue<T>>>,
}

// Manual impl: cloning the slice iterators needs no `T: Clone`.
impl<T> Clone for Leaves<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(NestedValue::Leaf(value)) => return Some(value),
                Some(NestedValue::Group(children)) => self.stack.push(children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<T> FusedIterator for Leaves<'_, T> {}

/// Iterator returned by [`NestedValue::into_leaves`].
#[derive(Debug)]
pub struct IntoLeaves<T> {
    stack: Vec<vec::IntoIter<NestedValue<T>>>,
}

impl<T> Iterator for IntoLeaves<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(NestedValue::Leaf(value)) => return Some(value),
                Some(NestedValue::Group(children)) => self.stack.push(children.into_iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<T> FusedIterator for IntoLeaves<T> {}

impl<T> Drop for IntoLeaves<T> {
    // Drain instead of letting nested vectors drop recursively.
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<T> IntoIterator for NestedValue<T> {
    type Item = T;
    type IntoIter = IntoLeaves<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_leaves()
    }
}

impl<'a, T> IntoIterator for &'a NestedValue<T> {
    type Item = &'a T;
    type IntoIter = Leaves<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.leaves()
    }
}

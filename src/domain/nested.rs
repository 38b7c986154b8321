//! The nested container: a value or an ordered group of nested containers.

use serde::{Deserialize, Serialize};

/// A finite tree whose leaves carry values of type `T`.
///
/// Children are owned exclusively by their parent, so a `NestedValue` can
/// never contain a cycle. A `Group` may be empty.
///
/// The serde form is untagged: a leaf is its bare value and a group is a
/// sequence, so the JSON `[1, 2, [3]]` reads as a group of two leaves and a
/// nested group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedValue<T> {
    Leaf(T),
    Group(Vec<NestedValue<T>>),
}

/// Builds a `NestedValue::Group` from an inline list of nodes.
///
/// `group![a, b]` and `NestedValue::group(vec![a, b])` produce the same tree.
///
/// ```
/// use nestsum::{group, NestedValue};
///
/// let tree = group![NestedValue::leaf(1), group![NestedValue::leaf(2)]];
/// assert_eq!(tree.leaf_count(), 2);
/// ```
#[macro_export]
macro_rules! group {
    () => {
        $crate::domain::NestedValue::group(::std::vec::Vec::new())
    };
    ($($node:expr),+ $(,)?) => {
        $crate::domain::NestedValue::group(::std::vec![$($node),+])
    };
}

impl<T> NestedValue<T> {
    pub fn leaf(value: T) -> Self {
        NestedValue::Leaf(value)
    }

    pub fn group<I>(children: I) -> Self
    where
        I: IntoIterator<Item = NestedValue<T>>,
    {
        NestedValue::Group(children.into_iter().collect())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NestedValue::Leaf(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NestedValue::Group(_))
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            NestedValue::Leaf(value) => Some(value),
            NestedValue::Group(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[NestedValue<T>]> {
        match self {
            NestedValue::Leaf(_) => None,
            NestedValue::Group(children) => Some(children),
        }
    }

    /// Number of `Leaf` nodes in the tree.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Height of the tree: 1 for a leaf or an empty group, otherwise
    /// 1 + the deepest child.
    ///
    /// Uses an explicit stack, so it is safe on trees deeper than the call
    /// stack allows.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)]; // (node, depth)

        while let Some((node, depth)) = stack.pop() {
            if depth > max_depth {
                max_depth = depth;
            }
            if let NestedValue::Group(children) = node {
                for child in children {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Applies `f` to every leaf, keeping the shape.
    pub fn map<U, F>(self, mut f: F) -> NestedValue<U>
    where
        F: FnMut(T) -> U,
    {
        fn go<T, U, F: FnMut(T) -> U>(node: NestedValue<T>, f: &mut F) -> NestedValue<U> {
            match node {
                NestedValue::Leaf(value) => NestedValue::Leaf(f(value)),
                NestedValue::Group(children) => {
                    NestedValue::Group(children.into_iter().map(|c| go(c, f)).collect())
                }
            }
        }
        go(self, &mut f)
    }
}

impl<T> Default for NestedValue<T> {
    fn default() -> Self {
        NestedValue::Group(Vec::new())
    }
}

impl<T> From<Vec<NestedValue<T>>> for NestedValue<T> {
    fn from(children: Vec<NestedValue<T>>) -> Self {
        NestedValue::Group(children)
    }
}

impl<T> FromIterator<NestedValue<T>> for NestedValue<T> {
    fn from_iter<I: IntoIterator<Item = NestedValue<T>>>(iter: I) -> Self {
        NestedValue::group(iter)
    }
}

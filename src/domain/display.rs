use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::nested::NestedValue;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeDisplay for NestedValue<T> {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            NestedValue::Leaf(value) => Tree::new(value.to_string()),
            NestedValue::Group(children) => {
                // Recursively construct the children
                let leaves: Vec<_> = children.iter().map(|c| c.to_tree_string()).collect();
                Tree::new(format!("[{}]", children.len())).with_leaves(leaves)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for NestedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

//! Summation service
//!
//! Runs flatten and sum under the loaded `Settings`: picks the traversal
//! strategy and enforces the optional depth limit before any recursion.

use num_traits::{CheckedAdd, Zero};
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::config::{Settings, Traversal};
use crate::domain::{self, DomainError, NestedValue};

/// Service for flattening and summing nested containers.
#[derive(Debug, Clone, Default)]
pub struct SummationService {
    settings: Settings,
}

impl SummationService {
    /// Create a new summation service.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flatten `node` into its leaf values, depth-first and left to right.
    #[instrument(level = "debug", skip(self, node))]
    pub fn flatten<T>(&self, node: NestedValue<T>) -> ApplicationResult<Vec<T>> {
        let node = self.check_depth(node)?;
        Ok(self.leaf_values(node))
    }

    /// Sum every leaf of `node`.
    #[instrument(level = "debug", skip(self, node))]
    pub fn sum<N: Zero>(&self, node: NestedValue<N>) -> ApplicationResult<N> {
        let values = self.flatten(node)?;
        Ok(values.into_iter().fold(N::zero(), |acc, value| acc + value))
    }

    /// Variadic form of [`SummationService::sum`].
    pub fn sum_all<N, I>(&self, nodes: I) -> ApplicationResult<N>
    where
        N: Zero,
        I: IntoIterator<Item = NestedValue<N>>,
    {
        self.sum(NestedValue::group(nodes))
    }

    /// Sum every leaf of `node`, failing on the first overflowing addition.
    #[instrument(level = "debug", skip(self, node))]
    pub fn checked_sum<N: Zero + CheckedAdd>(&self, node: NestedValue<N>) -> ApplicationResult<N> {
        let node = self.check_depth(node)?;
        let total = match self.settings.traversal {
            Traversal::Recursive => domain::checked_total(domain::flatten(node))?,
            Traversal::Iterative => domain::checked_total(node.into_leaves())?,
        };
        Ok(total)
    }

    /// Variadic form of [`SummationService::checked_sum`].
    pub fn checked_sum_all<N, I>(&self, nodes: I) -> ApplicationResult<N>
    where
        N: Zero + CheckedAdd,
        I: IntoIterator<Item = NestedValue<N>>,
    {
        self.checked_sum(NestedValue::group(nodes))
    }

    /// Passes `node` through if it is within `max_depth`, logging its shape.
    ///
    /// A rejected tree is drained through `into_leaves` so that dropping it
    /// never recurses.
    fn check_depth<T>(&self, node: NestedValue<T>) -> ApplicationResult<NestedValue<T>> {
        let depth = node.depth();
        debug!(
            "check_depth: depth={}, leaves={}, limit={:?}",
            depth,
            node.leaf_count(),
            self.settings.max_depth
        );
        match self.settings.max_depth {
            Some(limit) if depth > limit => {
                node.into_leaves().for_each(drop);
                Err(DomainError::DepthExceeded { depth, limit }.into())
            }
            _ => Ok(node),
        }
    }

    /// Leaf values of `node` using the configured traversal.
    fn leaf_values<T>(&self, node: NestedValue<T>) -> Vec<T> {
        match self.settings.traversal {
            Traversal::Recursive => domain::flatten(node),
            Traversal::Iterative => node.into_leaves().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ApplicationError;
    use crate::group;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a debug-level subscriber and returns what it logged.
    fn capture_debug_log(f: impl FnOnce()) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = log.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn leaf(v: i32) -> NestedValue<i32> {
        NestedValue::leaf(v)
    }

    fn service(traversal: Traversal, max_depth: Option<usize>) -> SummationService {
        SummationService::new(Settings {
            traversal,
            max_depth,
        })
    }

    #[test]
    fn given_default_service_when_summing_then_matches_domain_sum() {
        let tree = group![leaf(1), group![leaf(2), leaf(3)]];
        let svc = SummationService::default();
        assert_eq!(svc.sum(tree.clone()).unwrap(), domain::sum(tree));
    }

    #[test]
    fn given_depth_limit_when_tree_is_too_deep_then_rejects() {
        let svc = service(Traversal::Recursive, Some(2));
        let err = svc.sum(group![group![leaf(1)]]).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::DepthExceeded { depth: 3, limit: 2 })
        ));
    }

    #[test]
    fn given_depth_limit_when_tree_fits_then_sums() {
        let svc = service(Traversal::Iterative, Some(2));
        assert_eq!(svc.sum(group![leaf(1), leaf(2)]).unwrap(), 3);
    }

    #[test]
    fn given_no_depth_limit_when_checked_summing_then_logs_depth_and_leaf_count() {
        let svc = service(Traversal::Iterative, None);

        let output = capture_debug_log(|| {
            assert_eq!(svc.checked_sum(group![leaf(1), group![leaf(2)]]).unwrap(), 3);
        });

        assert!(output.contains("depth=3"), "log was: {output}");
        assert!(output.contains("leaves=2"), "log was: {output}");
    }

    #[test]
    fn given_no_depth_limit_when_summing_then_logs_depth_and_leaf_count() {
        let svc = SummationService::default();

        let output = capture_debug_log(|| {
            assert_eq!(svc.sum(group![leaf(4), leaf(5), leaf(6)]).unwrap(), 15);
        });

        assert!(output.contains("depth=2"), "log was: {output}");
        assert!(output.contains("leaves=3"), "log was: {output}");
    }

    #[test]
    fn given_either_traversal_when_checked_summing_then_same_overflow_position() {
        for traversal in [Traversal::Recursive, Traversal::Iterative] {
            let svc = service(traversal, None);
            let tree = group![
                NestedValue::leaf(100i8),
                group![NestedValue::leaf(20i8), group![NestedValue::leaf(10i8)]]
            ];

            let err = svc.checked_sum(tree).unwrap_err();

            assert!(
                matches!(err, ApplicationError::Domain(DomainError::Overflow { position: 2 })),
                "{traversal}: {err:?}"
            );
        }
    }
}

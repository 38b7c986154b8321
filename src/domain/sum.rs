//! Summation over nested containers.

use num_traits::{CheckedAdd, Zero};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::flatten::flatten;
use crate::domain::nested::NestedValue;

/// Sums every leaf of `node`, folding left from `N::zero()`.
///
/// Overflow behaviour is whatever `N`'s `+` does; use [`checked_sum`] to
/// get an error instead.
#[instrument(level = "debug", skip(node))]
pub fn sum<N: Zero>(node: NestedValue<N>) -> N {
    flatten(node).into_iter().fold(N::zero(), |acc, value| acc + value)
}

/// Variadic form of [`sum`]: identical to summing `NestedValue::group(nodes)`.
pub fn sum_all<N, I>(nodes: I) -> N
where
    N: Zero,
    I: IntoIterator<Item = NestedValue<N>>,
{
    sum(NestedValue::group(nodes))
}

/// Sums every leaf of `node` with checked addition.
///
/// Stops at the first addition that overflows and reports the offending
/// leaf's position in flatten order.
#[instrument(level = "debug", skip(node))]
pub fn checked_sum<N: Zero + CheckedAdd>(node: NestedValue<N>) -> DomainResult<N> {
    checked_total(node.into_leaves())
}

/// Checked left fold of already flattened leaf values.
///
/// `position` in the overflow error is the index into `values`.
pub fn checked_total<N, I>(values: I) -> DomainResult<N>
where
    N: Zero + CheckedAdd,
    I: IntoIterator<Item = N>,
{
    values
        .into_iter()
        .enumerate()
        .try_fold(N::zero(), |acc, (position, value)| {
            acc.checked_add(&value).ok_or_else(|| {
                debug!("overflow at leaf {}", position);
                DomainError::Overflow { position }
            })
        })
}

/// Variadic form of [`checked_sum`].
pub fn checked_sum_all<N, I>(nodes: I) -> DomainResult<N>
where
    N: Zero + CheckedAdd,
    I: IntoIterator<Item = NestedValue<N>>,
{
    checked_sum(NestedValue::group(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group;

    fn leaf<N>(v: N) -> NestedValue<N> {
        NestedValue::leaf(v)
    }

    #[test]
    fn given_sample_tree_when_summing_then_returns_fifteen() {
        let tree = group![leaf(1), leaf(2), group![leaf(3), leaf(4), group![leaf(5)]]];
        assert_eq!(sum(tree), 15);
    }

    #[test]
    fn given_inline_nodes_when_summing_all_then_returns_fifteen() {
        let total = sum_all([leaf(1), leaf(2), group![leaf(3), leaf(4), group![leaf(5)]]]);
        assert_eq!(total, 15);
    }

    #[test]
    fn given_empty_group_when_summing_then_returns_zero() {
        assert_eq!(sum::<i64>(group![]), 0);
        assert_eq!(sum_all::<u8, _>(Vec::new()), 0);
    }

    #[test]
    fn given_floats_when_summing_then_adds_left_to_right() {
        let tree = group![leaf(0.5f64), group![leaf(0.25), leaf(0.125)]];
        assert_eq!(sum(tree), 0.875);
    }

    #[test]
    fn given_overflowing_leaves_when_checked_summing_then_reports_position() {
        let tree = group![leaf(i8::MAX), leaf(1i8)];
        assert_eq!(checked_sum(tree), Err(DomainError::Overflow { position: 1 }));
    }

    #[test]
    fn given_flat_values_when_checked_totalling_then_matches_checked_sum() {
        let tree = group![leaf(i16::MAX - 1), group![leaf(1i16), leaf(1i16)]];
        assert_eq!(
            checked_total(flatten(tree.clone())),
            Err(DomainError::Overflow { position: 2 })
        );
        assert_eq!(checked_sum(tree), Err(DomainError::Overflow { position: 2 }));
        assert_eq!(checked_total(Vec::<i16>::new()), Ok(0));
    }

    #[test]
    fn given_fitting_leaves_when_checked_summing_then_returns_total() {
        let total = checked_sum_all([leaf(100u8), group![leaf(100), leaf(55)]]);
        assert_eq!(total, Ok(255));
    }
}

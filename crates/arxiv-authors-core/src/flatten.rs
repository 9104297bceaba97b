//! Nested-sequence helpers

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Concatenate inner sequences in row-major order.
pub fn flatten<I>(xss: I) -> Vec<<I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    xss.into_iter().flatten().collect()
}

/// Distinct values of a sequence.
pub fn unique<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> FxHashSet<T> {
    items.into_iter().collect()
}

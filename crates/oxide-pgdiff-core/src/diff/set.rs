//! Set-difference primitives over snapshot entities.
//!
//! Results always keep the order of the left-hand side.

use crate::model::{Column, Constraint, Sequence, Table, UserType};

/// An entity identified by name when matched across snapshots.
pub trait Named {
    /// The identifying name.
    fn name(&self) -> &str;
}

macro_rules! impl_named {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_named!(Table, Column, Constraint, Sequence, UserType);

/// Returns the items of `left` that have no match in `right` under `matches`.
pub fn difference<'a, T, F>(left: &'a [T], right: &[T], matches: F) -> Vec<&'a T>
where
    F: Fn(&T, &T) -> bool,
{
    left.iter()
        .filter(|item| !right.iter().any(|other| matches(*item, other)))
        .collect()
}

/// Returns the items of `left` whose name does not appear in `right`.
pub fn difference_by_name<'a, T: Named>(left: &'a [T], right: &[T]) -> Vec<&'a T> {
    difference(left, right, |a, b| a.name() == b.name())
}

/// Pairs every item of `left` with the first same-named item of `right`.
pub fn intersection_by_name<'a, 'b, T: Named>(
    left: &'a [T],
    right: &'b [T],
) -> Vec<(&'a T, &'b T)> {
    left.iter()
        .filter_map(|item| {
            right
                .iter()
                .find(|other| other.name() == item.name())
                .map(|other| (item, other))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<Column> {
        names.iter().map(|n| Column::new(*n, "text")).collect()
    }

    fn names<T: Named>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn difference_keeps_left_order() {
        let left = columns(&["c", "a", "d", "b"]);
        let right = columns(&["a", "b"]);
        assert_eq!(names(&difference_by_name(&left, &right)), vec!["c", "d"]);
    }

    #[test]
    fn difference_of_identical_sets_is_empty() {
        let left = columns(&["a", "b"]);
        assert!(difference_by_name(&left, &left.clone()).is_empty());
    }

    #[test]
    fn difference_with_custom_predicate() {
        let left = vec![Column::new("a", "int4"), Column::new("b", "text")];
        let right = vec![Column::new("x", "int4")];
        let found = difference(&left, &right, |a, b| a.data_type == b.data_type);
        assert_eq!(names(&found), vec!["b"]);
    }

    #[test]
    fn add_drop_and_common_partition_the_names() {
        let desired = columns(&["id", "email", "name"]);
        let current = columns(&["id", "legacy", "name"]);
        let added = names(&difference_by_name(&desired, &current));
        let dropped = names(&difference_by_name(&current, &desired));
        let common: Vec<String> = intersection_by_name(&desired, &current)
            .iter()
            .map(|(d, _)| d.name.clone())
            .collect();

        assert_eq!(added, vec!["email"]);
        assert_eq!(dropped, vec!["legacy"]);
        assert_eq!(common, vec!["id", "name"]);
        assert!(added.iter().all(|n| !dropped.contains(n) && !common.contains(n)));
        assert_eq!(added.len() + dropped.len() + 2 * common.len(), desired.len() + current.len());
    }

    #[test]
    fn intersection_pairs_by_name() {
        let left = vec![Column::new("id", "int4")];
        let right = vec![Column::new("other", "text"), Column::new("id", "int8")];
        let pairs = intersection_by_name(&left, &right);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.data_type, "int8");
    }
}

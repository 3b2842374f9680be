//! Top-N ranking of out-of-bounds items.

use serde::Serialize;

use crate::classify::{ClassifiedItem, Status};

/// Default number of rows shown per ranked table.
pub const DEFAULT_TOP_N: usize = 5;

/// Permissible values for one "top N" control.
///
/// The range never collapses to zero: with no matching rows it is `[1, 1]`
/// and the selection simply comes back empty.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl SelectionRange {
    pub fn for_total(total: usize) -> Self {
        let max = total.max(1);
        Self {
            min: 1,
            max,
            default: DEFAULT_TOP_N.min(total).max(1),
        }
    }

    /// Clamp a requested count into `[min, max]`.
    pub fn clamp(&self, requested: usize) -> usize {
        requested.clamp(self.min, self.max)
    }

    /// Clamp `requested`, falling back to the default when absent.
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.map_or(self.default, |n| self.clamp(n))
    }
}

/// Up to `n` Under-Min rows with the smallest quantity (stable on ties).
pub fn select_under(classified: &[ClassifiedItem], n: usize) -> Vec<ClassifiedItem> {
    let mut rows = rows_with(classified, Status::UnderMin);
    rows.sort_by_key(|r| r.qty());
    rows.truncate(n);
    rows
}

/// Up to `n` Over-Max rows with the largest quantity (stable on ties).
pub fn select_over(classified: &[ClassifiedItem], n: usize) -> Vec<ClassifiedItem> {
    let mut rows = rows_with(classified, Status::OverMax);
    rows.sort_by(|a, b| b.qty().cmp(&a.qty()));
    rows.truncate(n);
    rows
}

pub(crate) fn count_with(classified: &[ClassifiedItem], status: Status) -> usize {
    classified.iter().filter(|c| c.status() == status).count()
}

fn rows_with(classified: &[ClassifiedItem], status: Status) -> Vec<ClassifiedItem> {
    classified
        .iter()
        .filter(|c| c.status() == status)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::item::InventoryItem;
    use proptest::prelude::*;

    fn item(name: &str, qty: u32, min: u32, max: u32) -> InventoryItem {
        InventoryItem::new(name, qty, min, max).unwrap()
    }

    fn names(rows: &[ClassifiedItem]) -> Vec<&str> {
        rows.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn range_for_many_rows_defaults_to_five() {
        let r = SelectionRange::for_total(12);
        assert_eq!(r, SelectionRange { min: 1, max: 12, default: 5 });
    }

    #[test]
    fn range_for_few_rows_defaults_to_total() {
        let r = SelectionRange::for_total(3);
        assert_eq!(r, SelectionRange { min: 1, max: 3, default: 3 });
    }

    #[test]
    fn range_collapses_to_one_when_empty() {
        let r = SelectionRange::for_total(0);
        assert_eq!(r, SelectionRange { min: 1, max: 1, default: 1 });
        assert_eq!(r.clamp(0), 1);
        assert_eq!(r.clamp(9), 1);
    }

    #[test]
    fn resolve_clamps_or_defaults() {
        let r = SelectionRange::for_total(8);
        assert_eq!(r.resolve(None), 5);
        assert_eq!(r.resolve(Some(0)), 1);
        assert_eq!(r.resolve(Some(3)), 3);
        assert_eq!(r.resolve(Some(100)), 8);
    }

    #[test]
    fn under_is_ascending_by_qty_with_stable_ties() {
        let classified = classify(&[
            item("P", 9, 20, 40),
            item("Q", 2, 20, 40),
            item("R", 9, 25, 40),
            item("S", 0, 15, 40),
            item("T", 60, 20, 40),
        ]);

        let top = select_under(&classified, 10);
        assert_eq!(names(&top), vec!["S", "Q", "P", "R"]);
    }

    #[test]
    fn over_is_descending_by_qty_with_stable_ties() {
        let classified = classify(&[
            item("P", 70, 10, 40),
            item("Q", 95, 10, 40),
            item("R", 70, 10, 50),
            item("S", 1, 10, 40),
        ]);

        let top = select_over(&classified, 10);
        assert_eq!(names(&top), vec!["Q", "P", "R"]);
    }

    #[test]
    fn request_above_available_returns_what_exists() {
        let classified = classify(&[
            item("A", 1, 10, 20),
            item("B", 2, 10, 20),
            item("C", 15, 10, 20),
        ]);

        let top = select_under(&classified, 5);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn no_over_rows_gives_collapsed_range_and_empty_table() {
        let classified = classify(&[item("A", 1, 10, 20), item("C", 15, 10, 20)]);

        let range = SelectionRange::for_total(count_with(&classified, Status::OverMax));
        assert_eq!((range.min, range.max), (1, 1));
        assert!(select_over(&classified, range.resolve(None)).is_empty());
    }

    #[test]
    fn truncates_to_n() {
        let classified = classify(&[
            item("A", 1, 10, 20),
            item("B", 2, 10, 20),
            item("C", 3, 10, 20),
        ]);
        assert_eq!(names(&select_under(&classified, 2)), vec!["A", "B"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: selections are bounded by both `n` and the matching rows,
        /// and ordered by quantity in the required direction.
        #[test]
        fn selections_are_bounded_and_ordered(
            rows in prop::collection::vec((0u32..100, 0u32..60, 0u32..60), 0..40),
            n_under in 1usize..25,
            n_over in 1usize..25,
        ) {
            let items: Vec<InventoryItem> = rows
                .iter()
                .enumerate()
                .map(|(i, (qty, min, band))| item(&format!("SKU-{i}"), *qty, *min, *min + *band))
                .collect();
            let classified = classify(&items);

            let under = select_under(&classified, n_under);
            let over = select_over(&classified, n_over);

            prop_assert!(under.len() <= n_under);
            prop_assert!(under.len() <= count_with(&classified, Status::UnderMin));
            prop_assert!(over.len() <= n_over);
            prop_assert!(over.len() <= count_with(&classified, Status::OverMax));

            prop_assert!(under.iter().all(|r| r.status() == Status::UnderMin));
            prop_assert!(over.iter().all(|r| r.status() == Status::OverMax));
            prop_assert!(under.windows(2).all(|w| w[0].qty() <= w[1].qty()));
            prop_assert!(over.windows(2).all(|w| w[0].qty() >= w[1].qty()));
        }
    }
}

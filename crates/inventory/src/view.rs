use serde::Serialize;

use crate::classify::{ClassifiedItem, Status, classify};
use crate::item::InventoryItem;
use crate::select::{SelectionRange, count_with, select_over, select_under};

/// Everything the dashboard renders for one request.
///
/// Built fresh on every render from the session's cached items; the caller
/// only supplies the two requested counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub total_skus: usize,
    pub out_of_bounds: usize,
    pub under_range: SelectionRange,
    pub over_range: SelectionRange,
    pub n_under: usize,
    pub n_over: usize,
    pub top_under: Vec<ClassifiedItem>,
    pub top_over: Vec<ClassifiedItem>,
    /// `top_under` followed by `top_over`.
    pub chart: Vec<ClassifiedItem>,
}

impl DashboardView {
    pub fn build(
        items: &[InventoryItem],
        requested_under: Option<usize>,
        requested_over: Option<usize>,
    ) -> Self {
        let classified = classify(items);

        let under_range = SelectionRange::for_total(count_with(&classified, Status::UnderMin));
        let over_range = SelectionRange::for_total(count_with(&classified, Status::OverMax));
        let n_under = under_range.resolve(requested_under);
        let n_over = over_range.resolve(requested_over);

        let top_under = select_under(&classified, n_under);
        let top_over = select_over(&classified, n_over);
        let chart = top_under.iter().chain(top_over.iter()).cloned().collect();

        Self {
            total_skus: items.len(),
            out_of_bounds: classified.len(),
            under_range,
            over_range,
            n_under,
            n_over,
            top_under,
            top_over,
            chart,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Position of an item's quantity relative to its threshold band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Under Min")]
    UnderMin,
    #[serde(rename = "Over Max")]
    OverMax,
    #[serde(rename = "OK")]
    Ok,
}

impl Status {
    /// Under-Min is checked before Over-Max.
    pub fn of(item: &InventoryItem) -> Self {
        if item.qty() < item.min_qty() {
            Status::UnderMin
        } else if item.qty() > item.max_qty() {
            Status::OverMax
        } else {
            Status::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::UnderMin => "Under Min",
            Status::OverMax => "Over Max",
            Status::Ok => "OK",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// An out-of-bounds item together with its signed deviation.
///
/// `diff` is negative for [`Status::UnderMin`] and positive for
/// [`Status::OverMax`]; OK items are never classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedItem {
    #[serde(flatten)]
    item: InventoryItem,
    #[serde(rename = "Status")]
    status: Status,
    #[serde(rename = "Diff")]
    diff: i64,
}

impl ClassifiedItem {
    fn from_item(item: &InventoryItem) -> Option<Self> {
        let qty = i64::from(item.qty());
        let (status, diff) = match Status::of(item) {
            Status::UnderMin => (Status::UnderMin, qty - i64::from(item.min_qty())),
            Status::OverMax => (Status::OverMax, qty - i64::from(item.max_qty())),
            Status::Ok => return None,
        };
        Some(Self {
            item: item.clone(),
            status,
            diff,
        })
    }

    pub fn item(&self) -> &InventoryItem {
        &self.item
    }

    pub fn name(&self) -> &str {
        self.item.item()
    }

    pub fn qty(&self) -> u32 {
        self.item.qty()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn diff(&self) -> i64 {
        self.diff
    }
}

/// Keep only out-of-bounds items, in input order, with their deviation.
pub fn classify(items: &[InventoryItem]) -> Vec<ClassifiedItem> {
    items.iter().filter_map(ClassifiedItem::from_item).collect()
}

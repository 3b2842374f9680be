use serde::{Deserialize, Serialize};

use stockwatch_core::{DomainError, DomainResult};

/// One SKU with its current quantity and acceptable band.
///
/// Fields are private so `max_qty >= min_qty` holds for every value in
/// circulation; use [`InventoryItem::new`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem", rename_all = "PascalCase")]
pub struct InventoryItem {
    item: String,
    qty: u32,
    min_qty: u32,
    max_qty: u32,
}

impl InventoryItem {
    pub fn new(item: impl Into<String>, qty: u32, min_qty: u32, max_qty: u32) -> DomainResult<Self> {
        let item = item.into();
        if item.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        if max_qty < min_qty {
            return Err(DomainError::invariant(format!(
                "{item}: max_qty ({max_qty}) is below min_qty ({min_qty})"
            )));
        }
        Ok(Self {
            item,
            qty,
            min_qty,
            max_qty,
        })
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    pub fn min_qty(&self) -> u32 {
        self.min_qty
    }

    pub fn max_qty(&self) -> u32 {
        self.max_qty
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawItem {
    item: String,
    qty: u32,
    min_qty: u32,
    max_qty: u32,
}

impl TryFrom<RawItem> for InventoryItem {
    type Error = DomainError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        InventoryItem::new(raw.item, raw.qty, raw.min_qty, raw.max_qty)
    }
}

//! Inventory threshold pipeline.
//!
//! Generator → Classifier → Selector, implemented as deterministic functions
//! over plain data (no IO, no HTTP). The only state lives in
//! [`SessionDataset`], which caches one immutable snapshot per session.

pub mod classify;
pub mod dataset;
pub mod generator;
pub mod item;
pub mod select;
pub mod view;

pub use classify::{ClassifiedItem, Status, classify};
pub use dataset::{Dataset, SeedSource, SessionDataset};
pub use generator::{CATALOG, GenerationRanges, QtyRange, generate};
pub use item::InventoryItem;
pub use select::{DEFAULT_TOP_N, SelectionRange, select_over, select_under};
pub use view::DashboardView;

use std::sync::Arc;

use stockwatch_core::SessionId;
use stockwatch_inventory::SessionDataset;

/// Session context for a request.
///
/// Inserted by the session middleware; every dashboard route reads its
/// dataset through this.
#[derive(Debug, Clone)]
pub struct SessionContext {
    dataset: Arc<SessionDataset>,
}

impl SessionContext {
    pub fn new(dataset: Arc<SessionDataset>) -> Self {
        Self { dataset }
    }

    pub fn session_id(&self) -> SessionId {
        self.dataset.session_id()
    }

    pub fn dataset(&self) -> &SessionDataset {
        &self.dataset
    }

    pub(crate) fn dataset_arc(&self) -> Arc<SessionDataset> {
        Arc::clone(&self.dataset)
    }
}

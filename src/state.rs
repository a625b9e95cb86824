use std::sync::Arc;

use crate::storage::Storage;

/// Handles shared by every request. Built once in `main` and handed to the
/// router.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }
}

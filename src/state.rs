use crate::store::SharedUserStore;

/// Application state shared across all HTTP handlers
///
/// Holds the single store handle built by the composition root.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for user records
    pub store: SharedUserStore,
}

impl AppState {
    /// Create a new AppState instance
    ///
    /// # Arguments
    /// * `store` - The process-wide user store
    pub fn new(store: SharedUserStore) -> Self {
        Self { store }
    }
}

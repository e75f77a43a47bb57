use std::sync::Arc;

use crate::storage::SmashingStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn SmashingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SmashingStore>) -> SharedState {
        Arc::new(Self { store })
    }
}

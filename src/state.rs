use std::sync::Arc;

use crate::services::bgg::GameCatalog;
use crate::services::prediction::PredictionApi;
use crate::services::reference::ReferenceData;

/// Shared application state: the external collaborators and the startup
/// reference tables. Immutable once built; everything scoped to one user
/// interaction travels in the request itself.
#[derive(Clone)]
pub struct AppState {
    pub prediction: Arc<dyn PredictionApi>,
    pub catalog: Arc<dyn GameCatalog>,
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(
        prediction: Arc<dyn PredictionApi>,
        catalog: Arc<dyn GameCatalog>,
        reference: ReferenceData,
    ) -> Self {
        Self {
            prediction,
            catalog,
            reference: Arc::new(reference),
        }
    }
}

use std::sync::Arc;

use crate::domain::entities::resource::LookupOption;
use crate::infra::http::endpoints;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::decode_envelope;

/// Unpaged id/name lists that feed select inputs.
#[derive(Clone)]
pub struct LookupService {
    transport: Arc<dyn ApiTransport>,
}

impl LookupService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn options(&self, path: &str) -> Result<Vec<LookupOption>, ApiError> {
        let value = self.transport.get(path, "").await?;
        decode_envelope(value)
    }

    pub async fn item_categories(&self) -> Result<Vec<LookupOption>, ApiError> {
        self.options(endpoints::GET_ITEM_CATEGORIES).await
    }

    pub async fn item_sizes(&self) -> Result<Vec<LookupOption>, ApiError> {
        self.options(endpoints::GET_ITEM_SIZES).await
    }
}

use crate::client::NO_BODY;
use crate::error::ApiError;
use crate::http::{HttpMethod, QueryOptions};
use crate::models::StatusModel;
use crate::response::LockstepResponse;

resource! {
    /// Connectivity and identity checks.
    StatusClient => "/api/v1/Status", StatusModel {}
}

impl StatusClient<'_> {
    /// Verify that the server is reachable and report whether the configured
    /// credentials are accepted.
    pub async fn ping(&self) -> Result<LockstepResponse<StatusModel>, ApiError> {
        self.api
            .request(HttpMethod::Get, "/api/v1/Status", QueryOptions::new(), NO_BODY)
            .await
    }
}

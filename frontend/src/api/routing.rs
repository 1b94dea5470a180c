//! Delivery estimates from the external routing service.

use common::responses::RoutingMatrixResponse;
use common::store::delivery_time::minutes_from_matrix;
use gloo_net::http::Request;

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Driving minutes from the restaurant to `(lat, lon)`. `Ok(None)` when
    /// no routing key is configured or the service had no route.
    pub async fn drive_minutes(&self, destination: (f64, f64)) -> Result<Option<u32>, ApiError> {
        let Some(url) = self.config.routing_url(destination) else {
            return Ok(None);
        };
        let response = Request::get(&url).send().await?;
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let matrix = response.json::<RoutingMatrixResponse>().await?;
        Ok(minutes_from_matrix(&matrix.durations))
    }
}

use common::model::reservation::{Reservation, ReservationRequest, ReservationStatus};
use common::requests::ReservationStatusRequest;
use common::responses::ReservationsResponse;
use gloo_net::http::Method;

use super::{ApiClient, ApiError};

fn unwrap_list(response: ReservationsResponse, fallback: &str) -> Result<Vec<Reservation>, ApiError> {
    if response.success {
        Ok(response.reservations)
    } else {
        Err(ApiError::Rejected(
            response.error.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}

impl ApiClient {
    pub async fn create_reservation(&self, request: &ReservationRequest) -> Result<(), ApiError> {
        self.call_acked(Method::POST, "reservation", Some(request)).await
    }

    /// Every reservation of the user, whatever its status.
    pub async fn fetch_user_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, ApiError> {
        let response = self
            .get_json::<ReservationsResponse>(&format!("user/reservations/{user_id}"))
            .await?;
        unwrap_list(response, "Failed to fetch reservations")
    }

    pub async fn cancel_reservation(&self, reservation_id: &str) -> Result<(), ApiError> {
        self.call_acked::<()>(
            Method::PATCH,
            &format!("reservation/{reservation_id}/cancel"),
            None,
        )
        .await
    }

    pub async fn fetch_admin_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        // This endpoint omits `success`; a missing flag is not a failure here.
        let response = self.get_json::<ReservationsResponse>("admin/reservations").await?;
        match response.error {
            Some(error) => Err(ApiError::Rejected(error)),
            None => Ok(response.reservations),
        }
    }

    pub async fn update_reservation_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> Result<(), ApiError> {
        let body = ReservationStatusRequest {
            reservation_id: reservation_id.to_string(),
            status,
        };
        self.call_acked(Method::POST, "admin/reservation-status", Some(&body))
            .await
    }
}

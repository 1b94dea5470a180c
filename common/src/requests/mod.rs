//! Request payloads sent to the backend.

use serde::Serialize;

use crate::error::SignupError;
use crate::model::menu::Accompaniment;
use crate::model::order::{DeliveryMethod, Location, ScheduleRecord};
use crate::model::reservation::{ReservationStatus, is_ghana_phone, is_valid_email};
use crate::progress::actions::StatusUpdate;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email or phone number.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Usernames shorter than this are neither checked nor accepted.
pub const MIN_USERNAME_LEN: usize = 3;

impl SignupRequest {
    /// `username_available` is the last answer of `check-username`, `None`
    /// while no answer has arrived.
    pub fn validate(&self, username_available: Option<bool>) -> Result<(), SignupError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(SignupError::MissingFields);
        }
        if username_available != Some(true) {
            return Err(SignupError::UsernameTaken);
        }
        if self.name.chars().count() < MIN_USERNAME_LEN {
            return Err(SignupError::UsernameTooShort);
        }
        if !is_ghana_phone(&self.phone) {
            return Err(SignupError::InvalidPhone);
        }
        if !is_valid_email(&self.email) {
            return Err(SignupError::InvalidEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameCheckRequest {
    pub username: String,
}

/// One line of `POST order`. `menu_item` is the menu item id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accompaniments: Option<Vec<Accompaniment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub user_name: String,
    pub items: Vec<OrderLineRequest>,
    pub contact: String,
    pub location: Location,
    pub delivery_method: DeliveryMethod,
    pub schedule: Option<ScheduleRecord>,
}

/// Body of `POST admin/order-status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    pub order_id: String,
    pub status_key: &'static str,
    pub value: String,
}

impl OrderStatusRequest {
    pub fn new(order_id: &str, update: &StatusUpdate) -> Self {
        Self {
            order_id: order_id.to_string(),
            status_key: update.step.key(),
            value: update.value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRiderRequest {
    pub order_id: String,
    /// Empty to unassign.
    pub rider_id: String,
}

/// Body shared by the endpoints that act on a single order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdRequest {
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationStatusRequest {
    pub reservation_id: String,
    pub status: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::FulfillmentStep;

    fn signup() -> SignupRequest {
        SignupRequest {
            name: "kofi".into(),
            email: "kofi@example.com".into(),
            password: "secret".into(),
            phone: "+233241234567".into(),
        }
    }

    #[test]
    fn signup_checks_in_form_order() {
        assert_eq!(signup().validate(Some(true)), Ok(()));
        assert_eq!(signup().validate(None), Err(SignupError::UsernameTaken));
        assert_eq!(signup().validate(Some(false)), Err(SignupError::UsernameTaken));

        let short = SignupRequest { name: "ko".into(), ..signup() };
        assert_eq!(short.validate(Some(true)), Err(SignupError::UsernameTooShort));

        let bad_phone = SignupRequest { phone: "024123".into(), ..signup() };
        assert_eq!(bad_phone.validate(Some(true)), Err(SignupError::InvalidPhone));

        let bad_email = SignupRequest { email: "kofi@mail".into(), ..signup() };
        assert_eq!(bad_email.validate(Some(true)), Err(SignupError::InvalidEmail));

        let empty = SignupRequest { email: " ".into(), ..signup() };
        assert_eq!(empty.validate(Some(true)), Err(SignupError::MissingFields));
    }

    #[test]
    fn status_request_uses_wire_key() {
        let body = OrderStatusRequest::new(
            "o1",
            &StatusUpdate::clear(FulfillmentStep::OutForDelivery),
        );
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["orderId"], "o1");
        assert_eq!(json["statusKey"], "outForDelivery");
        assert_eq!(json["value"], "");
    }
}

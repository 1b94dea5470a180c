//! Response envelopes of the backend.
//!
//! Most endpoints answer with a bare record or list; the auth and
//! reservation endpoints wrap their payload in `{ success, error?, ... }`.

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::reservation::Reservation;
use crate::model::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `{ success, error? }` with no payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsernameCheckResponse {
    #[serde(default)]
    pub available: bool,
}

/// Driving-matrix answer of the routing service, durations in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingMatrixResponse {
    #[serde(default)]
    pub durations: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reads a list endpoint the way the views expect it: anything other
/// than a well-formed array becomes an empty list.
pub fn list_or_empty<T: DeserializeOwned>(value: Value) -> Vec<T> {
    if !value.is_array() {
        warn!("expected a JSON array, got {value}");
        return Vec::new();
    }
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!("discarding malformed list: {err}");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order::Order;

    #[test]
    fn failed_login_has_no_user() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"success":false,"error":"Invalid credentials"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert_eq!(resp.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn non_array_list_becomes_empty() {
        let orders: Vec<Order> = list_or_empty(serde_json::json!({"error": "boom"}));
        assert!(orders.is_empty());

        let orders: Vec<Order> = list_or_empty(serde_json::json!([{"_id": "o1"}]));
        assert_eq!(orders.len(), 1);
    }
}

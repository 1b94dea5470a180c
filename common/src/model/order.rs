//! Order records as returned by the order endpoints.
//!
//! The fulfillment milestones (`confirmed`, `preparing`, `packing`,
//! `out_for_delivery`) are plain strings: a milestone is reached when its
//! string is non-empty, and that same string is the message shown to the
//! customer. Fields the client does not model are kept in `extra` so an
//! order can be echoed back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::menu::Accompaniment;
use crate::progress::FulfillmentStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Delivery,
    Pickup,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Delivery => "delivery",
            DeliveryMethod::Pickup => "pickup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub scheduled_time: String,
    pub scheduled_date: String,
    pub scheduled_for: String,
    #[serde(default)]
    pub is_scheduled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rider {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedMenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item: OrderedMenuItem,
    pub quantity: u32,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompaniments: Option<Vec<Accompaniment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<OrderCustomer>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleRecord>,
    #[serde(default)]
    pub pending: Option<String>,
    #[serde(default)]
    pub confirmed: Option<String>,
    #[serde(default)]
    pub preparing: Option<String>,
    #[serde(default)]
    pub packing: Option<String>,
    #[serde(default)]
    pub out_for_delivery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider_id: Option<Rider>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    /// Orders without an explicit method are delivered.
    pub fn delivery_method(&self) -> DeliveryMethod {
        self.delivery_method.unwrap_or_default()
    }

    pub fn is_delivery(&self) -> bool {
        self.delivery_method() == DeliveryMethod::Delivery
    }

    /// Raw milestone string for a step, if any.
    pub fn milestone(&self, step: FulfillmentStep) -> Option<&str> {
        let field = match step {
            FulfillmentStep::Confirmed => &self.confirmed,
            FulfillmentStep::Preparing => &self.preparing,
            FulfillmentStep::Packing => &self.packing,
            FulfillmentStep::OutForDelivery => &self.out_for_delivery,
        };
        field.as_deref()
    }

    /// Overwrites a milestone. An empty `value` clears it.
    pub fn set_milestone(&mut self, step: FulfillmentStep, value: &str) {
        let field = match step {
            FulfillmentStep::Confirmed => &mut self.confirmed,
            FulfillmentStep::Preparing => &mut self.preparing,
            FulfillmentStep::Packing => &mut self.packing,
            FulfillmentStep::OutForDelivery => &mut self.out_for_delivery,
        };
        *field = Some(value.to_string());
    }

    /// Text of the furthest milestone reached, falling back to the
    /// `pending` message the order was created with.
    pub fn latest_message(&self) -> Option<&str> {
        FulfillmentStep::ORDERED
            .iter()
            .rev()
            .filter_map(|step| self.milestone(*step))
            .find(|m| !m.is_empty())
            .or_else(|| self.pending.as_deref().filter(|p| !p.is_empty()))
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the backend flagged the order as cancelled through an
    /// unmodelled field.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.extra.get("cancelled"), Some(Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_order_and_keeps_unknown_fields() {
        let raw = r#"{
            "_id": "o1",
            "userName": "Ama",
            "contact": "0241234567",
            "location": {"name": "Osu", "lat": 5.55, "lon": -0.18},
            "deliveryMethod": "pickup",
            "pending": "Order Pending",
            "confirmed": "Order Confirmed",
            "preparing": "",
            "packing": null,
            "items": [{"menuItem": {"_id": "m1", "name": "Waakye"}, "quantity": 2}],
            "createdAt": "2026-01-01T10:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();

        assert_eq!(order.delivery_method(), DeliveryMethod::Pickup);
        assert_eq!(order.milestone(FulfillmentStep::Confirmed), Some("Order Confirmed"));
        assert_eq!(order.milestone(FulfillmentStep::Preparing), Some(""));
        assert_eq!(order.milestone(FulfillmentStep::Packing), None);
        assert_eq!(order.milestone(FulfillmentStep::OutForDelivery), None);
        assert_eq!(order.item_count(), 2);
        assert!(order.extra.contains_key("createdAt"));
    }

    #[test]
    fn missing_delivery_method_means_delivery() {
        let order: Order = serde_json::from_str(r#"{"_id":"o2"}"#).unwrap();
        assert!(order.is_delivery());
        assert!(!order.is_cancelled());
    }

    #[test]
    fn set_milestone_round_trips_through_accessor() {
        let mut order = Order::default();
        order.set_milestone(FulfillmentStep::Packing, "Packing Your Order");
        assert_eq!(order.milestone(FulfillmentStep::Packing), Some("Packing Your Order"));
        order.set_milestone(FulfillmentStep::Packing, "");
        assert_eq!(order.milestone(FulfillmentStep::Packing), Some(""));
    }

    #[test]
    fn latest_message_is_the_furthest_reached_milestone() {
        let mut order = Order {
            pending: Some("Order Pending".into()),
            ..Order::default()
        };
        assert_eq!(order.latest_message(), Some("Order Pending"));

        order.set_milestone(FulfillmentStep::Confirmed, "Order Confirmed");
        order.set_milestone(FulfillmentStep::Preparing, "");
        assert_eq!(order.latest_message(), Some("Order Confirmed"));

        order.set_milestone(FulfillmentStep::Packing, "Packing Your Order");
        assert_eq!(order.latest_message(), Some("Packing Your Order"));
    }
}

//! Order progress model.
//!
//! An order moves through four milestones in a fixed order. The customer
//! tracking card, the admin order card and the rider card all draw the same
//! progress indicator, so the classification of each milestone lives here
//! as one pure function instead of being repeated per view.
//!
//! A milestone counts as reached when the order carries a non-empty value
//! for it. The backend is free to set a later milestone while an earlier
//! one is still empty; classification reports exactly what the record
//! says and never infers missing steps.

pub mod actions;

use serde_json::{Map, Value};

use crate::model::order::{DeliveryMethod, Order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FulfillmentStep {
    Confirmed,
    Preparing,
    Packing,
    OutForDelivery,
}

impl FulfillmentStep {
    /// Every milestone in fulfillment order.
    pub const ORDERED: [FulfillmentStep; 4] = [
        FulfillmentStep::Confirmed,
        FulfillmentStep::Preparing,
        FulfillmentStep::Packing,
        FulfillmentStep::OutForDelivery,
    ];

    /// Field name of the milestone on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            FulfillmentStep::Confirmed => "confirmed",
            FulfillmentStep::Preparing => "preparing",
            FulfillmentStep::Packing => "packing",
            FulfillmentStep::OutForDelivery => "outForDelivery",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|step| step.key() == key)
    }

    pub fn index(&self) -> usize {
        match self {
            FulfillmentStep::Confirmed => 0,
            FulfillmentStep::Preparing => 1,
            FulfillmentStep::Packing => 2,
            FulfillmentStep::OutForDelivery => 3,
        }
    }

    /// The milestone that has to be reached before this one.
    pub fn prerequisite(&self) -> Option<FulfillmentStep> {
        match self.index() {
            0 => None,
            i => Some(Self::ORDERED[i - 1]),
        }
    }

    /// This milestone and every later one.
    pub fn with_successors(&self) -> &'static [FulfillmentStep] {
        &Self::ORDERED[self.index()..]
    }
}

/// Anything a milestone can be read from.
///
/// `Order` is the typed record; raw JSON maps are accepted as well so a
/// snapshot with unexpected or missing keys still classifies.
pub trait StepSource {
    fn is_set(&self, step: FulfillmentStep) -> bool;
}

impl StepSource for Order {
    fn is_set(&self, step: FulfillmentStep) -> bool {
        self.milestone(step).is_some_and(|value| !value.is_empty())
    }
}

impl StepSource for Map<String, Value> {
    fn is_set(&self, step: FulfillmentStep) -> bool {
        self.get(step.key()).is_some_and(is_truthy)
    }
}

impl StepSource for Value {
    fn is_set(&self, step: FulfillmentStep) -> bool {
        self.as_object().is_some_and(|map| map.is_set(step))
    }
}

/// Truthiness of a JSON value as the backend payloads use it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// One entry of a progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
    pub step: FulfillmentStep,
    pub label: &'static str,
}

/// Steps shown to customers and admins: the final label follows the
/// delivery method.
pub fn order_steps(method: DeliveryMethod) -> Vec<StepDef> {
    let last = match method {
        DeliveryMethod::Delivery => "Out for Delivery",
        DeliveryMethod::Pickup => "Order Prepared",
    };
    steps_with_last_label(last)
}

/// Steps shown to riders, who only ever see deliveries.
pub fn rider_steps() -> Vec<StepDef> {
    steps_with_last_label("Out for Delivery")
}

fn steps_with_last_label(last: &'static str) -> Vec<StepDef> {
    vec![
        StepDef { step: FulfillmentStep::Confirmed, label: "Order Confirmed" },
        StepDef { step: FulfillmentStep::Preparing, label: "Preparing" },
        StepDef { step: FulfillmentStep::Packing, label: "Packing" },
        StepDef { step: FulfillmentStep::OutForDelivery, label: last },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    /// First milestone not yet reached, all earlier ones reached.
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStep {
    pub step: FulfillmentStep,
    pub label: &'static str,
    pub state: StepState,
}

impl ClassifiedStep {
    pub fn is_completed(&self) -> bool {
        self.state == StepState::Completed
    }

    /// Whether the indicator ring is highlighted: reached or up next.
    pub fn is_highlighted(&self) -> bool {
        self.state != StepState::Pending
    }
}

/// Classifies every step of `steps` against `order`.
///
/// Step `i` is completed when set, current when unset while every step
/// before it in `steps` is set, and pending otherwise.
pub fn classify_steps<S>(order: &S, steps: &[StepDef]) -> Vec<ClassifiedStep>
where
    S: StepSource + ?Sized,
{
    let mut prior_all_completed = true;
    steps
        .iter()
        .map(|def| {
            let completed = order.is_set(def.step);
            let state = if completed {
                StepState::Completed
            } else if prior_all_completed {
                StepState::Current
            } else {
                StepState::Pending
            };
            prior_all_completed &= completed;
            ClassifiedStep {
                step: def.step,
                label: def.label,
                state,
            }
        })
        .collect()
}

/// Shorthand for the customer/admin indicator of a typed order.
pub fn classify_order(order: &Order) -> Vec<ClassifiedStep> {
    classify_steps(order, &order_steps(order.delivery_method()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn states(classified: &[ClassifiedStep]) -> Vec<StepState> {
        classified.iter().map(|c| c.state).collect()
    }

    #[test]
    fn confirmed_only_makes_preparing_current() {
        let record = json!({
            "confirmed": "Order Confirmed",
            "preparing": "",
            "packing": "",
            "outForDelivery": ""
        });
        let classified = classify_steps(&record, &order_steps(DeliveryMethod::Delivery));
        assert_eq!(
            states(&classified),
            vec![
                StepState::Completed,
                StepState::Current,
                StepState::Pending,
                StepState::Pending
            ]
        );
    }

    #[test]
    fn empty_record_makes_first_step_current() {
        let classified = classify_steps(&json!({}), &rider_steps());
        assert_eq!(
            states(&classified),
            vec![
                StepState::Current,
                StepState::Pending,
                StepState::Pending,
                StepState::Pending
            ]
        );
    }

    #[test]
    fn later_step_set_out_of_order_is_reported_as_is() {
        let record = json!({ "packing": "Packing Your Order" });
        let classified = classify_steps(&record, &rider_steps());
        assert_eq!(
            states(&classified),
            vec![
                StepState::Current,
                StepState::Pending,
                StepState::Completed,
                StepState::Pending
            ]
        );
    }

    #[test]
    fn non_string_values_use_truthiness() {
        let record = json!({ "confirmed": true, "preparing": 0, "packing": null });
        let classified = classify_steps(&record, &rider_steps());
        assert_eq!(classified[0].state, StepState::Completed);
        assert_eq!(classified[1].state, StepState::Current);
    }

    #[test]
    fn last_label_follows_delivery_method() {
        assert_eq!(order_steps(DeliveryMethod::Delivery)[3].label, "Out for Delivery");
        assert_eq!(order_steps(DeliveryMethod::Pickup)[3].label, "Order Prepared");
        assert_eq!(rider_steps()[3].label, "Out for Delivery");
    }

    #[test]
    fn typed_order_classifies_like_its_json() {
        let mut order = Order::default();
        order.set_milestone(FulfillmentStep::Confirmed, "Order Confirmed");
        order.set_milestone(FulfillmentStep::Preparing, "Preparing Your Order");
        let typed = classify_order(&order);
        let raw = classify_steps(
            &serde_json::to_value(&order).unwrap(),
            &order_steps(DeliveryMethod::Delivery),
        );
        assert_eq!(typed, raw);
        assert_eq!(typed[2].state, StepState::Current);
    }

    #[test]
    fn step_keys_round_trip() {
        for step in FulfillmentStep::ORDERED {
            assert_eq!(FulfillmentStep::from_key(step.key()), Some(step));
        }
        assert_eq!(FulfillmentStep::from_key("pending"), None);
        assert_eq!(FulfillmentStep::Packing.prerequisite(), Some(FulfillmentStep::Preparing));
        assert_eq!(FulfillmentStep::Confirmed.prerequisite(), None);
    }
}

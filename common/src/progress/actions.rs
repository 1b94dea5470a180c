//! Admin controls layered on top of the progress model.
//!
//! Each milestone has one toggle button. A button is usable once the
//! milestone before it has been reached. Toggling an unreached milestone
//! sets it to its canonical message; toggling a reached one clears it
//! together with every later milestone, so the record never shows progress
//! beyond a step the admin has just rolled back.

use log::debug;

use super::{FulfillmentStep, StepSource};
use crate::model::order::{DeliveryMethod, Order};

/// A single milestone write, sent to the backend as one status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub step: FulfillmentStep,
    /// Empty to clear the milestone.
    pub value: String,
}

impl StatusUpdate {
    pub fn set(step: FulfillmentStep, method: DeliveryMethod) -> Self {
        Self {
            step,
            value: canonical_message(step, method).to_string(),
        }
    }

    pub fn clear(step: FulfillmentStep) -> Self {
        Self {
            step,
            value: String::new(),
        }
    }

    pub fn is_clear(&self) -> bool {
        self.value.is_empty()
    }
}

/// Message stored in a milestone when an admin reaches it.
pub fn canonical_message(step: FulfillmentStep, method: DeliveryMethod) -> &'static str {
    match (step, method) {
        (FulfillmentStep::Confirmed, _) => "Order Confirmed",
        (FulfillmentStep::Preparing, _) => "Preparing Your Order",
        (FulfillmentStep::Packing, _) => "Packing Your Order",
        (FulfillmentStep::OutForDelivery, DeliveryMethod::Delivery) => {
            "Your order is out for delivery"
        }
        (FulfillmentStep::OutForDelivery, DeliveryMethod::Pickup) => "Your order is prepared",
    }
}

/// Static description of one admin toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub step: FulfillmentStep,
    pub completed_text: &'static str,
    pub pending_text: &'static str,
    pub message: &'static str,
    pub prerequisite: Option<FulfillmentStep>,
    pub completed_tooltip: &'static str,
    pub pending_tooltip: &'static str,
    pub disabled_tooltip: Option<&'static str>,
}

/// The four toggles of the admin order card.
pub fn action_buttons(method: DeliveryMethod) -> Vec<ActionButton> {
    let last = match method {
        DeliveryMethod::Delivery => ActionButton {
            step: FulfillmentStep::OutForDelivery,
            completed_text: "Out for Delivery",
            pending_text: "Send for Delivery",
            message: canonical_message(FulfillmentStep::OutForDelivery, method),
            prerequisite: Some(FulfillmentStep::Packing),
            completed_tooltip: "Click to cancel delivery",
            pending_tooltip: "Click to send for delivery",
            disabled_tooltip: Some("Complete packing first"),
        },
        DeliveryMethod::Pickup => ActionButton {
            step: FulfillmentStep::OutForDelivery,
            completed_text: "Order Prepared",
            pending_text: "Complete Preparation",
            message: canonical_message(FulfillmentStep::OutForDelivery, method),
            prerequisite: Some(FulfillmentStep::Packing),
            completed_tooltip: "Click to cancel preparation",
            pending_tooltip: "Click to send for preparation",
            disabled_tooltip: Some("Complete packing first"),
        },
    };

    vec![
        ActionButton {
            step: FulfillmentStep::Confirmed,
            completed_text: "Confirmed",
            pending_text: "Confirm Order",
            message: canonical_message(FulfillmentStep::Confirmed, method),
            prerequisite: None,
            completed_tooltip: "Click to cancel confirmation",
            pending_tooltip: "Click to confirm order",
            disabled_tooltip: None,
        },
        ActionButton {
            step: FulfillmentStep::Preparing,
            completed_text: "Preparing",
            pending_text: "Start Preparing",
            message: canonical_message(FulfillmentStep::Preparing, method),
            prerequisite: Some(FulfillmentStep::Confirmed),
            completed_tooltip: "Click to cancel preparation",
            pending_tooltip: "Click to start preparing",
            disabled_tooltip: Some("Confirm order first"),
        },
        ActionButton {
            step: FulfillmentStep::Packing,
            completed_text: "Packing",
            pending_text: "Start Packing",
            message: canonical_message(FulfillmentStep::Packing, method),
            prerequisite: Some(FulfillmentStep::Preparing),
            completed_tooltip: "Click to cancel packing",
            pending_tooltip: "Click to start packing",
            disabled_tooltip: Some("Start preparing first"),
        },
        last,
    ]
}

/// A button resolved against a concrete order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub step: FulfillmentStep,
    pub completed: bool,
    pub enabled: bool,
    pub text: &'static str,
    pub tooltip: &'static str,
}

impl ActionButton {
    pub fn resolve<S: StepSource + ?Sized>(&self, order: &S) -> ButtonView {
        let completed = order.is_set(self.step);
        let enabled = self.prerequisite.is_none_or(|pre| order.is_set(pre));
        let tooltip = if !enabled {
            self.disabled_tooltip.unwrap_or_default()
        } else if completed {
            self.completed_tooltip
        } else {
            self.pending_tooltip
        };
        ButtonView {
            step: self.step,
            completed,
            enabled,
            text: if completed { self.completed_text } else { self.pending_text },
            tooltip,
        }
    }
}

/// Updates produced by clicking the toggle of `step`.
///
/// Returns nothing when the button is disabled.
pub fn plan_toggle<S: StepSource + ?Sized>(
    order: &S,
    step: FulfillmentStep,
    method: DeliveryMethod,
) -> Vec<StatusUpdate> {
    if step.prerequisite().is_some_and(|pre| !order.is_set(pre)) {
        debug!("toggle of {} ignored: prerequisite not reached", step.key());
        return Vec::new();
    }
    if order.is_set(step) {
        let updates: Vec<StatusUpdate> = step
            .with_successors()
            .iter()
            .map(|s| StatusUpdate::clear(*s))
            .collect();
        debug!("rolling back {} and {} later step(s)", step.key(), updates.len() - 1);
        updates
    } else {
        vec![StatusUpdate::set(step, method)]
    }
}

/// Milestones to fill in before a rider is assigned: every unreached
/// milestone, in order, with its canonical message.
pub fn plan_rider_assignment<S: StepSource + ?Sized>(
    order: &S,
    method: DeliveryMethod,
) -> Vec<StatusUpdate> {
    FulfillmentStep::ORDERED
        .into_iter()
        .filter(|step| !order.is_set(*step))
        .map(|step| StatusUpdate::set(step, method))
        .collect()
}

/// Applies updates to a local copy, mirroring what the backend will store.
pub fn apply_updates(order: &mut Order, updates: &[StatusUpdate]) {
    for update in updates {
        order.set_milestone(update.step, &update.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with(steps: &[FulfillmentStep]) -> Order {
        let mut order = Order::default();
        for step in steps {
            order.set_milestone(*step, canonical_message(*step, DeliveryMethod::Delivery));
        }
        order
    }

    #[test]
    fn clearing_preparing_cascades_to_later_steps() {
        let mut order = order_with(&FulfillmentStep::ORDERED);
        let updates = plan_toggle(&order, FulfillmentStep::Preparing, DeliveryMethod::Delivery);
        assert_eq!(
            updates,
            vec![
                StatusUpdate::clear(FulfillmentStep::Preparing),
                StatusUpdate::clear(FulfillmentStep::Packing),
                StatusUpdate::clear(FulfillmentStep::OutForDelivery),
            ]
        );

        apply_updates(&mut order, &updates);
        assert!(order.is_set(FulfillmentStep::Confirmed));
        assert!(!order.is_set(FulfillmentStep::Preparing));
        assert!(!order.is_set(FulfillmentStep::Packing));
        assert!(!order.is_set(FulfillmentStep::OutForDelivery));
    }

    #[test]
    fn toggling_unreached_step_sets_canonical_message() {
        let order = order_with(&[FulfillmentStep::Confirmed, FulfillmentStep::Preparing, FulfillmentStep::Packing]);
        let updates = plan_toggle(&order, FulfillmentStep::OutForDelivery, DeliveryMethod::Pickup);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].value, "Your order is prepared");
    }

    #[test]
    fn disabled_button_plans_nothing() {
        let order = order_with(&[FulfillmentStep::Confirmed]);
        assert!(plan_toggle(&order, FulfillmentStep::Packing, DeliveryMethod::Delivery).is_empty());
    }

    #[test]
    fn buttons_resolve_enablement_text_and_tooltip() {
        let order = order_with(&[FulfillmentStep::Confirmed]);
        let views: Vec<ButtonView> = action_buttons(DeliveryMethod::Delivery)
            .iter()
            .map(|b| b.resolve(&order))
            .collect();

        assert!(views[0].completed && views[0].enabled);
        assert_eq!(views[0].text, "Confirmed");
        assert_eq!(views[0].tooltip, "Click to cancel confirmation");

        assert!(!views[1].completed && views[1].enabled);
        assert_eq!(views[1].text, "Start Preparing");

        assert!(!views[2].enabled);
        assert_eq!(views[2].tooltip, "Start preparing first");
        assert!(!views[3].enabled);
        assert_eq!(views[3].text, "Send for Delivery");
    }

    #[test]
    fn rider_assignment_fills_only_missing_steps() {
        let order = order_with(&[FulfillmentStep::Confirmed, FulfillmentStep::Packing]);
        let updates = plan_rider_assignment(&order, DeliveryMethod::Delivery);
        let steps: Vec<FulfillmentStep> = updates.iter().map(|u| u.step).collect();
        assert_eq!(steps, vec![FulfillmentStep::Preparing, FulfillmentStep::OutForDelivery]);
        assert!(updates.iter().all(|u| !u.is_clear()));
    }
}

use common::model::order::{DeliveryMethod, Order};
use common::progress::actions::{apply_updates, plan_toggle};
use common::progress::{
    FulfillmentStep, StepState, classify_order, classify_steps, order_steps, rider_steps,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::{Map, Value, json};

fn milestone_value() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        Just(Some(json!(""))),
        Just(Some(json!("Order Confirmed"))),
        Just(Some(json!("Packing Your Order"))),
    ]
}

fn record() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::vec(milestone_value(), 4).prop_map(|values| {
        let mut map = Map::new();
        for (step, value) in FulfillmentStep::ORDERED.iter().zip(values) {
            if let Some(value) = value {
                map.insert(step.key().to_string(), value);
            }
        }
        map
    })
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn at_most_one_current_and_it_is_the_first_gap(map in record()) {
        let classified = classify_steps(&map, &rider_steps());
        let current: Vec<usize> = classified
            .iter()
            .enumerate()
            .filter(|(_, c)| c.state == StepState::Current)
            .map(|(i, _)| i)
            .collect();
        prop_assert!(current.len() <= 1);

        let first_gap = classified.iter().position(|c| c.state != StepState::Completed);
        match current.first() {
            Some(i) => {
                prop_assert_eq!(Some(*i), first_gap);
                prop_assert!(classified[..*i].iter().all(|c| c.state == StepState::Completed));
            }
            None => prop_assert!(first_gap.is_none()),
        }
    }

    #[test]
    fn classification_is_idempotent(map in record()) {
        let steps = order_steps(DeliveryMethod::Pickup);
        prop_assert_eq!(classify_steps(&map, &steps), classify_steps(&map, &steps));
    }

    #[test]
    fn rollback_never_leaves_later_steps_set(map in record(), index in 0usize..4) {
        let mut order: Order = serde_json::from_value(json!({ "_id": "o" }))
            .expect("minimal order");
        for step in FulfillmentStep::ORDERED {
            if let Some(Value::String(s)) = map.get(step.key()) {
                order.set_milestone(step, s);
            }
        }
        let step = FulfillmentStep::ORDERED[index];
        let was_set = classify_order(&order)[index].state == StepState::Completed;

        let updates = plan_toggle(&order, step, DeliveryMethod::Delivery);
        apply_updates(&mut order, &updates);
        let after = classify_order(&order);

        if was_set && !updates.is_empty() {
            prop_assert!(after[index..].iter().all(|c| c.state != StepState::Completed));
        }
    }
}

#[test]
fn cascading_clear_from_fully_progressed_order() {
    let mut order: Order = serde_json::from_value(json!({
        "_id": "o1",
        "confirmed": "Order Confirmed",
        "preparing": "Preparing Your Order",
        "packing": "Packing Your Order",
        "outForDelivery": "Your order is out for delivery"
    }))
    .unwrap();

    let updates = plan_toggle(&order, FulfillmentStep::Preparing, DeliveryMethod::Delivery);
    apply_updates(&mut order, &updates);

    let states: Vec<StepState> = classify_order(&order).into_iter().map(|c| c.state).collect();
    assert_eq!(
        states,
        vec![
            StepState::Completed,
            StepState::Current,
            StepState::Pending,
            StepState::Pending
        ]
    );
}

#[test]
fn confirmed_only_scenario() {
    let record = json!({
        "confirmed": "Order Confirmed",
        "preparing": "",
        "packing": "",
        "outForDelivery": ""
    });
    let states: Vec<StepState> = classify_steps(&record, &order_steps(DeliveryMethod::Delivery))
        .into_iter()
        .map(|c| c.state)
        .collect();
    assert_eq!(
        states,
        vec![
            StepState::Completed,
            StepState::Current,
            StepState::Pending,
            StepState::Pending
        ]
    );
}

#[test]
fn empty_record_scenario() {
    let classified = classify_steps(&json!({}), &order_steps(DeliveryMethod::Delivery));
    assert_eq!(classified[0].state, StepState::Current);
    assert!(classified[1..].iter().all(|c| c.state == StepState::Pending));
}

#[test]
fn all_three_views_agree_on_the_same_order() {
    let order: Order = serde_json::from_value(json!({
        "_id": "o1",
        "deliveryMethod": "delivery",
        "confirmed": "Order Confirmed",
        "preparing": "Preparing Your Order"
    }))
    .unwrap();

    let customer = classify_order(&order);
    let admin = classify_steps(&order, &order_steps(order.delivery_method()));
    let rider = classify_steps(&order, &rider_steps());

    assert_eq!(customer, admin);
    assert_eq!(customer, rider);
}

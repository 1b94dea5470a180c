use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::model::order::{DeliveryMethod, Location};
use crate::model::user::User;
use crate::requests::PlaceOrderRequest;
use crate::schedule::OrderSchedule;

/// Everything the cart page collects besides the cart itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckoutDetails {
    pub contact: String,
    pub location: Location,
    pub delivery_method: DeliveryMethod,
    pub schedule: Option<OrderSchedule>,
}

impl CheckoutDetails {
    /// Confirmation shown once the order went through.
    pub fn success_message(&self) -> String {
        match &self.schedule {
            Some(schedule) => format!("Order scheduled for {}!", schedule.scheduled_for()),
            None => "Order placed successfully!".to_string(),
        }
    }
}

/// Builds the `POST order` body, checking the page's preconditions.
///
/// A delivery address is only required for deliveries.
pub fn build_order_request(
    user: Option<&User>,
    cart: &Cart,
    details: &CheckoutDetails,
) -> Result<PlaceOrderRequest, CheckoutError> {
    let user = user
        .filter(|u| !u.name.is_empty())
        .ok_or(CheckoutError::NotLoggedIn)?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let needs_address = details.delivery_method == DeliveryMethod::Delivery;
    if details.contact.trim().is_empty()
        || (needs_address && details.location.name.trim().is_empty())
    {
        return Err(CheckoutError::MissingContact);
    }

    Ok(PlaceOrderRequest {
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        items: cart.to_order_items(),
        contact: details.contact.trim().to_string(),
        location: details.location.clone(),
        delivery_method: details.delivery_method,
        schedule: details.schedule.as_ref().map(OrderSchedule::to_record),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartAddition;
    use crate::model::user::Role;
    use chrono::NaiveDate;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Yaw".into(),
            email: "yaw@example.com".into(),
            phone: None,
            role: Role::User,
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartAddition {
            menu_item_id: "m1".into(),
            name: "Kenkey".into(),
            description: String::new(),
            unit_price: 20.0,
            quantity: 2,
            accompaniments: Vec::new(),
            special_note: None,
        });
        cart
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            contact: "0241234567".into(),
            location: Location {
                name: "East Legon".into(),
                lat: 5.63,
                lon: -0.16,
            },
            ..CheckoutDetails::default()
        }
    }

    #[test]
    fn builds_request_from_cart() {
        let request = build_order_request(Some(&user()), &cart(), &details()).unwrap();
        assert_eq!(request.user_id, "u1");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert!(request.schedule.is_none());

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["deliveryMethod"], "delivery");
        assert_eq!(body["items"][0]["menuItem"], "m1");
    }

    #[test]
    fn preconditions_are_checked_in_order() {
        assert_eq!(
            build_order_request(None, &cart(), &details()),
            Err(CheckoutError::NotLoggedIn)
        );
        assert_eq!(
            build_order_request(Some(&user()), &Cart::new(), &details()),
            Err(CheckoutError::EmptyCart)
        );
        let no_address = CheckoutDetails {
            location: Location::default(),
            ..details()
        };
        assert_eq!(
            build_order_request(Some(&user()), &cart(), &no_address),
            Err(CheckoutError::MissingContact)
        );
    }

    #[test]
    fn pickup_does_not_need_an_address() {
        let pickup = CheckoutDetails {
            location: Location::default(),
            delivery_method: DeliveryMethod::Pickup,
            ..details()
        };
        assert!(build_order_request(Some(&user()), &cart(), &pickup).is_ok());
    }

    #[test]
    fn scheduled_order_carries_schedule_record() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        let scheduled = CheckoutDetails {
            schedule: OrderSchedule::new("12:00", date),
            ..details()
        };
        let request = build_order_request(Some(&user()), &cart(), &scheduled).unwrap();
        assert_eq!(
            request.schedule.map(|s| s.scheduled_for),
            Some("Friday, Mar 13 at 12:00".to_string())
        );
        assert_eq!(scheduled.success_message(), "Order scheduled for Friday, Mar 13 at 12:00!");
    }
}

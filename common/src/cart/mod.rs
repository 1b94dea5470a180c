//! Shopping cart.
//!
//! Lines are keyed by [`identity::derive_line_id`]; adding a configuration
//! that already has a line sets that line's quantity instead of appending.
//! The cart is persisted as JSON by the application context.

pub mod identity;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::menu::{Accompaniment, MenuItem};
use crate::requests::OrderLineRequest;

pub use identity::derive_line_id;

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub unique_id: String,
    pub menu_item_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price of one unit with the selected accompaniments included.
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accompaniments: Vec<Accompaniment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// What the item popup hands to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartAddition {
    pub menu_item_id: String,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub accompaniments: Vec<Accompaniment>,
    pub special_note: Option<String>,
}

impl CartAddition {
    /// Builds an addition for `item` with the chosen add-ons, pricing the
    /// unit as the base price plus every surcharge.
    pub fn for_item(
        item: &MenuItem,
        accompaniments: Vec<Accompaniment>,
        special_note: Option<String>,
        quantity: u32,
    ) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            unit_price: unit_price(item.price, &accompaniments),
            quantity,
            accompaniments,
            special_note: special_note.filter(|n| !n.is_empty()),
        }
    }

    pub fn line_id(&self) -> String {
        derive_line_id(
            &self.menu_item_id,
            &self.accompaniments,
            self.special_note.as_deref(),
        )
    }
}

/// Base price plus the surcharge of every selected accompaniment.
pub fn unit_price(base: f64, accompaniments: &[Accompaniment]) -> f64 {
    base + accompaniments.iter().map(|a| a.price).sum::<f64>()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, unique_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.unique_id == unique_id)
    }

    /// First line for a dish regardless of customisation; the popup uses it
    /// to seed its quantity stepper.
    pub fn find_by_menu_item(&self, menu_item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.menu_item_id == menu_item_id)
    }

    /// Merge-on-add. Returns the id of the affected line.
    ///
    /// A zero quantity is raised to one.
    pub fn add(&mut self, addition: CartAddition) -> String {
        let unique_id = addition.line_id();
        let quantity = addition.quantity.max(1);

        if let Some(line) = self.lines.iter_mut().find(|l| l.unique_id == unique_id) {
            debug!("cart line {unique_id}: quantity {} -> {quantity}", line.quantity);
            line.quantity = quantity;
        } else {
            debug!("cart line {unique_id}: added with quantity {quantity}");
            self.lines.push(CartLine {
                unique_id: unique_id.clone(),
                menu_item_id: addition.menu_item_id,
                name: addition.name,
                description: addition.description,
                unit_price: addition.unit_price,
                quantity,
                accompaniments: addition.accompaniments,
                special_note: addition.special_note,
            });
        }
        unique_id
    }

    /// Sets a line's quantity; anything below one removes the line.
    pub fn update_quantity(&mut self, unique_id: &str, quantity: u32) {
        if quantity < 1 {
            self.remove(unique_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.unique_id == unique_id) {
            line.quantity = quantity;
        }
    }

    pub fn increment(&mut self, unique_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.unique_id == unique_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrements a line, removing it instead of going below one.
    pub fn decrement(&mut self, unique_id: &str) {
        if let Some(quantity) = self.get(unique_id).map(|l| l.quantity) {
            self.update_quantity(unique_id, quantity - 1);
        }
    }

    pub fn remove(&mut self, unique_id: &str) {
        self.lines.retain(|l| l.unique_id != unique_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Lines as the order endpoint expects them.
    pub fn to_order_items(&self) -> Vec<OrderLineRequest> {
        self.lines
            .iter()
            .map(|line| OrderLineRequest {
                menu_item: line.menu_item_id.clone(),
                quantity: line.quantity,
                accompaniments: (!line.accompaniments.is_empty())
                    .then(|| line.accompaniments.clone()),
                special_note: line.special_note.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::menu::AccompanimentCategory;

    fn addition(id: &str, quantity: u32) -> CartAddition {
        CartAddition {
            menu_item_id: id.into(),
            name: "Fried Rice".into(),
            description: String::new(),
            unit_price: 45.0,
            quantity,
            accompaniments: Vec::new(),
            special_note: None,
        }
    }

    fn side(name: &str, price: f64) -> Accompaniment {
        Accompaniment {
            id: None,
            name: name.into(),
            price,
            category: AccompanimentCategory::Protein,
            available: Some(true),
        }
    }

    #[test]
    fn adding_same_configuration_sets_quantity() {
        let mut cart = Cart::new();
        cart.add(addition("item1", 1));
        cart.add(addition("item1", 3));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn different_configurations_get_their_own_lines() {
        let mut cart = Cart::new();
        cart.add(addition("item1", 1));
        let mut with_side = addition("item1", 1);
        with_side.accompaniments = vec![side("Chicken", 15.0)];
        cart.add(with_side);
        let mut with_note = addition("item1", 2);
        with_note.special_note = Some("no pepper".into());
        cart.add(with_note);

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        let id = cart.add(addition("item1", 2));
        cart.decrement(&id);
        assert_eq!(cart.get(&id).map(|l| l.quantity), Some(1));
        cart.decrement(&id);
        assert!(cart.get(&id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_and_totals() {
        let mut cart = Cart::new();
        let a = cart.add(addition("a", 1));
        let b = cart.add(addition("b", 2));
        cart.increment(&a);
        cart.update_quantity(&b, 0);
        assert!(cart.get(&b).is_none());
        assert_eq!(cart.total(), 90.0);

        cart.clear();
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn for_item_bakes_surcharges_into_unit_price() {
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "_id": "m1", "name": "Banku", "category": "local", "price": 30.0
        }))
        .unwrap();
        let addition = CartAddition::for_item(
            &item,
            vec![side("Tilapia", 25.0), side("Pepper", 2.5)],
            None,
            2,
        );
        assert_eq!(addition.unit_price, 57.5);
        assert_eq!(addition.line_id(), "m1-Pepper-Tilapia");
    }

    #[test]
    fn whitespace_only_note_opens_its_own_line() {
        let item: MenuItem = serde_json::from_value(serde_json::json!({
            "_id": "m1", "name": "Banku", "category": "local", "price": 30.0
        }))
        .unwrap();
        let blank = CartAddition::for_item(&item, vec![], Some("   ".into()), 1);
        assert_eq!(blank.special_note.as_deref(), Some("   "));
        assert_eq!(blank.line_id(), derive_line_id("m1", &[], Some("   ")));
        assert_eq!(blank.line_id(), "m1-no-accompaniments-note-");

        let empty = CartAddition::for_item(&item, vec![], Some(String::new()), 1);
        assert_eq!(empty.special_note, None);

        let mut cart = Cart::new();
        cart.add(CartAddition::for_item(&item, vec![], None, 1));
        cart.add(blank);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn order_items_omit_empty_accompaniments() {
        let mut cart = Cart::new();
        cart.add(addition("item1", 2));
        let items = cart.to_order_items();
        assert_eq!(items[0].menu_item, "item1");
        assert_eq!(items[0].quantity, 2);
        assert!(items[0].accompaniments.is_none());
    }

    #[test]
    fn persisted_json_round_trips() {
        let mut cart = Cart::new();
        let mut with_side = addition("item1", 1);
        with_side.accompaniments = vec![side("Egg", 3.0)];
        cart.add(with_side);
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}

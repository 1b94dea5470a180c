//! Component state of the menu page.

use common::cart::unit_price;
use common::model::menu::{categories, Accompaniment, CategoryFilter, MenuItem};
use yew::prelude::*;

/// Choices made in the item sheet for one dish.
pub struct ItemSelection {
    pub item: MenuItem,
    pub quantity: u32,
    /// Identities of the ticked accompaniments, in the order they were ticked.
    pub accompaniments: Vec<String>,
    pub note: String,
}

impl ItemSelection {
    pub fn new(item: MenuItem, quantity: u32) -> Self {
        Self {
            item,
            quantity: quantity.max(1),
            accompaniments: Vec::new(),
            note: String::new(),
        }
    }

    pub fn is_ticked(&self, acc: &Accompaniment) -> bool {
        self.accompaniments.iter().any(|id| id == acc.identity())
    }

    pub fn toggle(&mut self, identity: &str) {
        if let Some(pos) = self.accompaniments.iter().position(|id| id == identity) {
            self.accompaniments.remove(pos);
        } else {
            self.accompaniments.push(identity.to_string());
        }
    }

    /// The ticked accompaniments, as offered by the item.
    pub fn chosen(&self) -> Vec<Accompaniment> {
        self.item
            .selectable_accompaniments()
            .into_iter()
            .filter(|acc| self.is_ticked(acc))
            .cloned()
            .collect()
    }

    pub fn unit_price(&self) -> f64 {
        unit_price(self.item.price, &self.chosen())
    }
}

pub struct MenuPage {
    pub items: Vec<MenuItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: CategoryFilter,
    /// The dish whose sheet is open.
    pub selection: Option<ItemSelection>,
    pub popup_ref: NodeRef,
    /// Guard to fetch the menu only once.
    pub loaded: bool,
}

impl MenuPage {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            filter: CategoryFilter::default(),
            selection: None,
            popup_ref: NodeRef::default(),
            loaded: false,
        }
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }

    pub fn items_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items.iter().filter(move |i| i.category == category)
    }
}

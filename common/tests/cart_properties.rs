use common::cart::{Cart, CartAddition, derive_line_id};
use common::model::menu::{Accompaniment, AccompanimentCategory};
use common::store::{AppContext, MemoryStore};
use proptest::prelude::*;

fn named(name: &str) -> Accompaniment {
    Accompaniment {
        id: None,
        name: name.to_string(),
        price: 5.0,
        category: AccompanimentCategory::Extra,
        available: None,
    }
}

fn plain(menu_item_id: &str, quantity: u32) -> CartAddition {
    CartAddition {
        menu_item_id: menu_item_id.to_string(),
        name: "Waakye".to_string(),
        description: String::new(),
        unit_price: 35.0,
        quantity,
        accompaniments: Vec::new(),
        special_note: None,
    }
}

/// Sorted identity join, the part of the id the accompaniments decide.
fn sorted_join(names: &[String]) -> String {
    let mut sorted = names.to_vec();
    sorted.sort();
    sorted.join("-")
}

/// The part of the id the note decides: nothing for an absent or empty
/// note, otherwise the note with whitespace removed.
fn note_key(note: &Option<String>) -> Option<String> {
    note.as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| n.chars().filter(|c| !c.is_whitespace()).collect())
}

fn accompaniment_names() -> impl Strategy<Value = Vec<String>> {
    // Capitalised letters only: no `-` inside a name and never the literal
    // `note` segment.
    proptest::collection::vec("[A-Z][a-z]{0,7}", 0..4)
}

fn special_note() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z ]{0,6}")
}

proptest! {
    #[test]
    fn line_id_ignores_selection_order(
        (names, shuffled) in proptest::collection::vec("[A-Za-z]{1,8}", 0..6)
            .prop_flat_map(|names| (Just(names.clone()), Just(names).prop_shuffle())),
    ) {
        let forward: Vec<Accompaniment> = names.iter().map(|n| named(n)).collect();
        let permuted: Vec<Accompaniment> = shuffled.iter().map(|n| named(n)).collect();
        prop_assert_eq!(
            derive_line_id("item1", &forward, None),
            derive_line_id("item1", &permuted, None)
        );
    }

    #[test]
    fn differing_configurations_get_differing_ids(
        first in accompaniment_names(),
        second in accompaniment_names(),
        first_note in special_note(),
        second_note in special_note(),
    ) {
        let same_sides = sorted_join(&first) == sorted_join(&second);
        let same_note = note_key(&first_note) == note_key(&second_note);

        let a: Vec<Accompaniment> = first.iter().map(|n| named(n)).collect();
        let b: Vec<Accompaniment> = second.iter().map(|n| named(n)).collect();
        let id_a = derive_line_id("item1", &a, first_note.as_deref());
        let id_b = derive_line_id("item1", &b, second_note.as_deref());

        if same_sides && same_note {
            prop_assert_eq!(id_a, id_b);
        } else {
            prop_assert_ne!(id_a, id_b);
        }
    }

    #[test]
    fn cart_keeps_one_line_per_id(quantities in proptest::collection::vec(1u32..10, 1..8)) {
        let mut cart = Cart::new();
        for q in &quantities {
            cart.add(plain("item1", *q));
        }
        prop_assert_eq!(cart.lines().len(), 1);
        prop_assert_eq!(cart.lines()[0].quantity, *quantities.last().unwrap());
    }
}

#[test]
fn accompaniment_order_collapses() {
    assert_eq!(
        derive_line_id("item1", &[named("Rice"), named("Stew")], None),
        derive_line_id("item1", &[named("Stew"), named("Rice")], None),
    );
}

#[test]
fn empty_selection_single_side_and_note_are_distinct() {
    let a = derive_line_id("item1", &[], None);
    let b = derive_line_id("item1", &[named("Rice")], None);
    let c = derive_line_id("item1", &[], Some("extra spicy"));
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn merge_on_add_sets_rather_than_sums() {
    let mut cart = Cart::new();
    cart.add(plain("item1", 1));
    cart.add(plain("item1", 3));
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
}

#[test]
fn cart_survives_a_reload_through_the_context() {
    let mut context = AppContext::load(MemoryStore::default()).unwrap();
    context.cart.add(plain("item1", 2));
    let mut spicy = plain("item1", 1);
    spicy.special_note = Some("extra spicy".into());
    context.cart.add(spicy);
    context.save_cart().unwrap();

    let reloaded = AppContext::load(context.store().clone()).unwrap();
    assert_eq!(reloaded.cart.lines().len(), 2);
    assert_eq!(reloaded.cart.item_count(), 3);
    assert_eq!(reloaded.cart.total(), 105.0);
}

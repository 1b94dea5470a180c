//! Content-addressed identity of cart lines.
//!
//! Two additions land on the same line exactly when they are the same dish
//! with the same set of accompaniments and the same note. The id is built
//! as `<menu item>-<accompaniments>[-note-<note>]`:
//!
//! - accompaniments are identified by id (or name when the id is unknown),
//!   sorted and joined with `-`, so selection order does not matter;
//! - no accompaniments yields the literal segment `no-accompaniments`;
//! - the note has every whitespace character removed and nothing else, so
//!   `"extra spicy"` and `"extraspicy"` collide while `"Extra"` and
//!   `"extra"` do not.

use crate::model::menu::Accompaniment;

pub const NO_ACCOMPANIMENTS: &str = "no-accompaniments";

/// Derives the id of the cart line for this configuration.
///
/// Identities are joined with `-` unescaped, so `["a-b"]` and `["a", "b"]`
/// share an id; ids are distinct only when the joined segments are.
pub fn derive_line_id(
    menu_item_id: &str,
    accompaniments: &[Accompaniment],
    special_note: Option<&str>,
) -> String {
    let accompaniment_segment = if accompaniments.is_empty() {
        NO_ACCOMPANIMENTS.to_string()
    } else {
        let mut ids: Vec<&str> = accompaniments.iter().map(Accompaniment::identity).collect();
        ids.sort_unstable();
        ids.join("-")
    };

    let mut id = format!("{menu_item_id}-{accompaniment_segment}");
    if let Some(note) = special_note.filter(|n| !n.is_empty()) {
        id.push_str("-note-");
        id.extend(note.chars().filter(|c| !c.is_whitespace()));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::menu::AccompanimentCategory;

    fn named(name: &str) -> Accompaniment {
        Accompaniment {
            id: None,
            name: name.to_string(),
            price: 0.0,
            category: AccompanimentCategory::Extra,
            available: None,
        }
    }

    #[test]
    fn selection_order_does_not_matter() {
        assert_eq!(
            derive_line_id("item1", &[named("Rice"), named("Stew")], None),
            derive_line_id("item1", &[named("Stew"), named("Rice")], None),
        );
    }

    #[test]
    fn segments_are_distinct() {
        let bare = derive_line_id("item1", &[], None);
        let with_rice = derive_line_id("item1", &[named("Rice")], None);
        let with_note = derive_line_id("item1", &[], Some("extra spicy"));

        assert_eq!(bare, "item1-no-accompaniments");
        assert_eq!(with_rice, "item1-Rice");
        assert_eq!(with_note, "item1-no-accompaniments-note-extraspicy");
        assert_ne!(bare, with_rice);
        assert_ne!(with_rice, with_note);
        assert_ne!(bare, with_note);
    }

    #[test]
    fn backend_id_takes_precedence_over_name() {
        let mut chicken = named("Chicken");
        chicken.id = Some("acc-9".into());
        assert_eq!(derive_line_id("m", &[chicken], None), "m-acc-9");
    }

    #[test]
    fn note_normalisation_strips_whitespace_only() {
        assert_eq!(
            derive_line_id("m", &[], Some(" no  onions\n")),
            derive_line_id("m", &[], Some("noonions")),
        );
        assert_ne!(
            derive_line_id("m", &[], Some("No onions")),
            derive_line_id("m", &[], Some("no onions")),
        );
    }

    #[test]
    fn hyphenated_identities_share_the_joined_segment() {
        assert_eq!(
            derive_line_id("m", &[named("a-b")], None),
            derive_line_id("m", &[named("a"), named("b")], None),
        );
    }

    #[test]
    fn empty_note_is_no_note() {
        assert_eq!(derive_line_id("m", &[], Some("")), derive_line_id("m", &[], None));
    }
}

use serde::{Deserialize, Serialize};

/// A dish as served by the `/menu` endpoint.
///
/// `accompaniments` is populated by the backend with the add-ons this item
/// may be ordered with. `allowed_accompaniments` holds the raw ids; when it
/// is present it further restricts which of the populated entries are
/// offered to the customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_accompaniments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompaniments: Option<Vec<Accompaniment>>,
}

impl MenuItem {
    /// Items without an explicit flag are treated as available.
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// Accompaniments the customer can pick for this item: available ones,
    /// filtered by `allowed_accompaniments` when the backend sent that list.
    pub fn selectable_accompaniments(&self) -> Vec<&Accompaniment> {
        let Some(accompaniments) = &self.accompaniments else {
            return Vec::new();
        };
        accompaniments
            .iter()
            .filter(|acc| acc.is_available())
            .filter(|acc| match (&self.allowed_accompaniments, &acc.id) {
                (Some(allowed), Some(id)) => allowed.iter().any(|a| a == id),
                _ => true,
            })
            .collect()
    }
}

/// An optional add-on (side, sauce, protein...) that changes both the
/// price of a dish and the identity of its cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accompaniment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: AccompanimentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Accompaniment {
    pub fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    /// Identifier used for cart identity: the backend id when known,
    /// otherwise the display name.
    pub fn identity(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccompanimentCategory {
    Soup,
    Sauce,
    Stew,
    Protein,
    #[default]
    Extra,
}

/// Distinct categories in first-appearance order.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| c == &item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

/// Category filter of the menu page. An empty selection shows every
/// category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    selected: Vec<String>,
}

impl CategoryFilter {
    /// Adds the category if absent, removes it otherwise.
    pub fn toggle(&mut self, category: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category.to_string());
        }
    }

    /// No category picked, so everything is shown.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    /// Categories to render given everything the menu offers.
    pub fn visible<'a>(&'a self, all: &'a [String]) -> &'a [String] {
        if self.selected.is_empty() {
            all
        } else {
            &self.selected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(id: Option<&str>, name: &str, available: Option<bool>) -> Accompaniment {
        Accompaniment {
            id: id.map(str::to_string),
            name: name.to_string(),
            price: 2.0,
            category: AccompanimentCategory::Stew,
            available,
        }
    }

    fn item(category: &str) -> MenuItem {
        MenuItem {
            id: format!("id-{category}"),
            name: "Jollof".into(),
            category: category.into(),
            description: None,
            price: 40.0,
            image: None,
            available: None,
            allowed_accompaniments: None,
            accompaniments: None,
        }
    }

    #[test]
    fn selectable_accompaniments_respects_availability_and_allow_list() {
        let mut menu_item = item("rice");
        menu_item.accompaniments = Some(vec![
            acc(Some("a1"), "Chicken", None),
            acc(Some("a2"), "Beef", Some(false)),
            acc(Some("a3"), "Fish", Some(true)),
        ]);
        menu_item.allowed_accompaniments = Some(vec!["a1".into(), "a2".into()]);

        let names: Vec<&str> = menu_item
            .selectable_accompaniments()
            .into_iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chicken"]);
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let items = vec![item("rice"), item("soup"), item("rice"), item("drinks")];
        assert_eq!(categories(&items), vec!["rice", "soup", "drinks"]);
    }

    #[test]
    fn empty_filter_shows_everything() {
        let all = vec!["rice".to_string(), "soup".to_string()];
        let mut filter = CategoryFilter::default();
        assert_eq!(filter.visible(&all), all.as_slice());

        filter.toggle("soup");
        assert_eq!(filter.visible(&all), ["soup".to_string()].as_slice());

        filter.toggle("soup");
        assert!(!filter.is_selected("soup"));
        assert_eq!(filter.visible(&all).len(), 2);
    }

    #[test]
    fn menu_item_reads_backend_json() {
        let raw = r#"{"_id":"m1","name":"Banku","category":"local","price":35.5,
            "accompaniments":[{"_id":"x","name":"Okro","price":5,"category":"soup"}]}"#;
        let parsed: MenuItem = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "m1");
        assert!(parsed.is_available());
        let accs = parsed.accompaniments.unwrap();
        assert_eq!(accs[0].category, AccompanimentCategory::Soup);
        assert_eq!(accs[0].identity(), "x");
    }
}

//! Menu items and category descriptors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ItemId};

/// Category label that matches every menu item.
pub const ALL_CATEGORY: &str = "All";

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    /// Whether the item belongs to `label`, treating [`ALL_CATEGORY`] as a wildcard.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn in_category(&self, label: &str) -> bool {
        label == ALL_CATEGORY || self.category == label
    }

    /// Case-insensitive substring match against the item name.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// A category tab shown above the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

impl Category {
    /// Build the category list for a sequence of items.
    ///
    /// The synthetic `{ "0", "All" }` entry comes first; the distinct
    /// categories follow in first-seen order with ids `"1"`, `"2"`, ....
    #[must_use]
    pub fn list_for<'a>(items: impl IntoIterator<Item = &'a MenuItem>) -> Vec<Self> {
        let mut labels: Vec<&str> = Vec::new();
        for item in items {
            if !labels.contains(&item.category.as_str()) {
                labels.push(&item.category);
            }
        }

        std::iter::once(ALL_CATEGORY)
            .chain(labels)
            .enumerate()
            .map(|(index, label)| Self {
                id: CategoryId::new(index.to_string()),
                label: label.to_owned(),
            })
            .collect()
    }
}

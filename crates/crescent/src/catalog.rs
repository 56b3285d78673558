use crate::menu::OptionId;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub icon: String,
    pub name: String,
    #[serde(rename = "category")]
    pub category_id: OptionId,
}

/// Content source for the grid. Looked up on every render; callers must not
/// assume two calls return the same data.
pub trait Catalog {
    fn items(&self, category: &OptionId) -> Vec<ContentItem>;

    fn count(&self, category: &OptionId) -> usize {
        self.items(category).len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    by_category: HashMap<OptionId, Vec<ContentItem>>,
}

impl StaticCatalog {
    pub fn new(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let mut by_category: HashMap<OptionId, Vec<ContentItem>> = HashMap::new();
        for item in items {
            by_category
                .entry(item.category_id.clone())
                .or_default()
                .push(item);
        }
        Self { by_category }
    }

    pub fn categories(&self) -> impl Iterator<Item = &OptionId> {
        self.by_category.keys()
    }
}

impl Catalog for StaticCatalog {
    fn items(&self, category: &OptionId) -> Vec<ContentItem> {
        self.by_category.get(category).cloned().unwrap_or_default()
    }

    fn count(&self, category: &OptionId) -> usize {
        self.by_category.get(category).map_or(0, Vec::len)
    }
}

/// Same generated items for every category.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderCatalog {
    pub count: usize,
}

impl PlaceholderCatalog {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Catalog for PlaceholderCatalog {
    fn items(&self, category: &OptionId) -> Vec<ContentItem> {
        (0..self.count)
            .map(|i| ContentItem {
                id: ItemId::new(format!("item-{}", i)),
                icon: "□".to_string(),
                name: format!("Item {}", i + 1),
                category_id: category.clone(),
            })
            .collect()
    }

    fn count(&self, _category: &OptionId) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str) -> ContentItem {
        ContentItem {
            id: ItemId::new(id),
            icon: "*".to_string(),
            name: id.to_string(),
            category_id: OptionId::new(category),
        }
    }

    #[test]
    fn test_static_catalog_partitions_by_category() {
        let catalog = StaticCatalog::new([item("a1", "a"), item("b1", "b"), item("a2", "a")]);
        let ids: Vec<String> = catalog
            .items(&OptionId::new("a"))
            .into_iter()
            .map(|i| i.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(catalog.count(&OptionId::new("b")), 1);
        assert!(catalog.items(&OptionId::new("missing")).is_empty());
    }

    #[test]
    fn test_placeholder_ignores_category() {
        let catalog = PlaceholderCatalog::new(48);
        assert_eq!(catalog.count(&OptionId::new("x")), 48);
        let items = catalog.items(&OptionId::new("y"));
        assert_eq!(items.len(), 48);
        assert_eq!(items[47].name, "Item 48");
        assert_eq!(items[0].category_id.as_str(), "y");
    }
}

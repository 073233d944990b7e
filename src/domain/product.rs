// Product catalog domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub icon: String,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
        }
    }

    fn with_icon_slug(id: u32, name: &str, slug: &str) -> Self {
        Self::new(id, name, format!("/bakery-icons/{}.svg", slug))
    }
}

/// The products offered for the display case, in sidebar order.
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product::with_icon_slug(1, "Brötchen", "broetchen"),
        Product::with_icon_slug(2, "Brezel", "brezel"),
        Product::with_icon_slug(3, "Baguette", "baguette"),
        Product::with_icon_slug(4, "Laugenstange", "laugenstange"),
        Product::with_icon_slug(5, "Croissant", "croissant"),
        Product::with_icon_slug(6, "Kürbiskernbrot", "kuerbiskernbrot"),
        Product::with_icon_slug(7, "Apfeltasche", "apfeltasche"),
        Product::with_icon_slug(8, "Nussecken", "nussecken"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_icons() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].name, "Brötchen");
        assert_eq!(catalog[0].icon, "/bakery-icons/broetchen.svg");
        assert_eq!(catalog[5].icon, "/bakery-icons/kuerbiskernbrot.svg");
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let ids: HashSet<u32> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }
}

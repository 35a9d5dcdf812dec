use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record as served by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price. The backend sends a JSON number; it is held as an exact decimal.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category name (the backend links products to categories by name, not id).
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::timestamps::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns `true` if the backend reports at least one unit in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Promotional banner shown on the storefront home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Storefront-relative link, e.g. `"/products?category=Electronics"`.
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Body for admin product create/update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBanner {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub is_active: bool,
}

/// Sort orders understood by `GET /products?sort=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl ProductSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductSort::PriceAsc => "price-asc",
            ProductSort::PriceDesc => "price-desc",
            ProductSort::NameAsc => "name-asc",
        }
    }
}

impl std::fmt::Display for ProductSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(ProductSort::PriceAsc),
            "price-desc" => Ok(ProductSort::PriceDesc),
            "name-asc" => Ok(ProductSort::NameAsc),
            other => Err(format!(
                "unknown sort \"{other}\"; expected price-asc, price-desc, or name-asc"
            )),
        }
    }
}

/// Filters for the product listing. Empty fields are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
}

impl ProductQuery {
    /// Query-string pairs in a stable order, skipping blank values.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn product_deserializes_backend_shape() {
        let json = serde_json::json!({
            "id": "p-1",
            "name": "Galaxy S24",
            "description": "Flagship phone",
            "price": 25999.99,
            "category": "Electronics",
            "stock": 4,
            "image_url": "https://cdn.example.com/s24.jpg",
            "created_at": "2025-01-05T08:30:00.000123"
        });
        let product: Product = serde_json::from_value(json).expect("product should parse");
        assert_eq!(product.price, Decimal::from_str("25999.99").unwrap());
        assert!(product.in_stock());
        assert!(product.created_at.is_some());
    }

    #[test]
    fn product_tolerates_missing_optional_fields() {
        let json = serde_json::json!({ "id": "p-2", "name": "Cable", "price": 199 });
        let product: Product = serde_json::from_value(json).expect("product should parse");
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn banner_defaults_to_active() {
        let json = serde_json::json!({ "id": "b-1", "title": "Sale" });
        let banner: Banner = serde_json::from_value(json).unwrap();
        assert!(banner.is_active);
    }

    #[test]
    fn query_pairs_skip_blank_filters() {
        let query = ProductQuery {
            category: Some("  ".to_string()),
            search: Some("samsung".to_string()),
            sort: Some(ProductSort::PriceDesc),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("search", "samsung".to_string()),
                ("sort", "price-desc".to_string())
            ]
        );
    }

    #[test]
    fn sort_parses_wire_names() {
        assert_eq!(ProductSort::from_str("name-asc"), Ok(ProductSort::NameAsc));
        assert!(ProductSort::from_str("newest").is_err());
    }
}

//! Catalog provider seam.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Source of product records.
#[async_trait]
pub trait CatalogProvider {
    /// List all products.
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError>;

    /// Fetch one product by id.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Ok(self
            .list_products()
            .await?
            .into_iter()
            .find(|p| &p.id == id))
    }
}

/// Catalog documents come either as a bare array or as a provider list
/// response (`{"data": [...]}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List { data: Vec<Product> },
    Products(Vec<Product>),
}

/// A fixed set of products, typically loaded from a JSON export.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog from records.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CommerceError> {
        let products = match serde_json::from_str::<CatalogDocument>(json)? {
            CatalogDocument::List { data } => data,
            CatalogDocument::Products(products) => products,
        };
        Ok(Self::new(products))
    }

    /// Read and parse a JSON catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Borrow the records.
    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_RESPONSE: &str = r#"{
        "object": "list",
        "data": [
            {"id": "prod_a", "name": "A", "default_price": {"unit_amount": 500, "currency": "usd"}},
            {"id": "prod_b", "name": "B", "images": ["b.png"]}
        ],
        "has_more": false
    }"#;

    #[test]
    fn test_parse_list_response() {
        let catalog = StaticCatalog::from_json_str(LIST_RESPONSE).unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.products()[1].primary_image(), Some("b.png"));
    }

    #[test]
    fn test_odd_prices_only_affect_their_product() {
        let catalog = StaticCatalog::from_json_str(
            r#"{"data": [
                {"id": "prod_a", "name": "A", "default_price": {"unit_amount": 500, "currency": "usd"}},
                {"id": "prod_b", "name": "B", "default_price": {"unit_amount": 900, "currency": "chf"}},
                {"id": "prod_c", "name": "C", "default_price": "price_123"}
            ]}"#,
        )
        .unwrap();

        let priced: Vec<&str> = catalog
            .products()
            .iter()
            .filter(|p| p.unit_price().is_some())
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(catalog.products().len(), 3);
        assert_eq!(priced, vec!["prod_a"]);
    }

    #[test]
    fn test_parse_bare_array() {
        let catalog = StaticCatalog::from_json_str(r#"[{"id":"prod_a","name":"A"}]"#).unwrap();
        assert_eq!(catalog.products().len(), 1);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            StaticCatalog::from_json_str("{\"nope\": 1}"),
            Err(CommerceError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = StaticCatalog::from_path("/definitely/not/here/catalog.json");
        assert!(matches!(result, Err(CommerceError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_provider_lookup() {
        let catalog = StaticCatalog::from_json_str(LIST_RESPONSE).unwrap();

        let all = catalog.list_products().await.unwrap();
        assert_eq!(all.len(), 2);

        let found = catalog.get_product(&ProductId::new("prod_a")).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("A".to_string()));

        let missing = catalog.get_product(&ProductId::new("prod_z")).await.unwrap();
        assert!(missing.is_none());
    }
}

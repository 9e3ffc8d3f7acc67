use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

use crate::entities::product::{self, Entity as ProductEntity};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=No+Image";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound(i32),
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

/// Query parameters accepted by the product listing. Empty strings are
/// treated the same as absent ones.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilter {
    fn category(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Read side of the product catalog.
#[derive(Clone)]
pub struct Catalog {
    db: Arc<DatabaseConnection>,
}

impl Catalog {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> Result<product::Model, CatalogError> {
        find_product(&*self.db, id).await
    }

    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<product::Model>, CatalogError> {
        let mut condition = Condition::all();

        if let Some(category) = filter.category() {
            condition = condition.add(product::Column::Category.eq(category));
        }

        debug!(category = ?filter.category(), search = ?filter.search(), "Listing products");

        let products = ProductEntity::find()
            .filter(condition)
            .order_by_asc(product::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(match filter.search() {
            Some(search) => {
                let needle = search.to_lowercase();
                products
                    .into_iter()
                    .filter(|product| matches_search(product, &needle))
                    .collect()
            }
            None => products,
        })
    }

    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        Ok(ProductEntity::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .order_by_asc(product::Column::Category)
            .into_tuple::<String>()
            .all(&*self.db)
            .await?)
    }
}

/// Resolves a product id on any connection, including an open transaction.
pub async fn find_product<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<product::Model, CatalogError> {
    ProductEntity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(CatalogError::ProductNotFound(id))
}

/// Case-insensitive substring match over name or description. `needle` is
/// already lowercased.
fn matches_search(product: &product::Model, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
}

/// A catalog entry before it gets an id.
#[derive(Clone, Debug, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Please provide a product name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please provide a product description"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Please provide a category"))]
    pub category: String,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[validate(range(min = 0))]
    pub num_reviews: i32,
    pub brand: Option<String>,
}

impl NewProduct {
    /// Trims the text fields and drops blank optional ones.
    pub fn normalized(self) -> Self {
        let blank_to_none = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        Self {
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            image: blank_to_none(self.image),
            brand: blank_to_none(self.brand),
            ..self
        }
    }

    pub fn into_active_model(self) -> product::ActiveModel {
        product::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
            image: Set(self.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned())),
            category: Set(self.category),
            stock: Set(self.stock),
            rating: Set(self.rating),
            num_reviews: Set(self.num_reviews),
            brand: Set(self.brand),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
    }
}

use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::entities::{
    cart::{self, Entity as CartEntity},
    product::{self, Entity as ProductEntity},
    user::Entity as UserEntity,
};
use crate::services::catalog::{find_product, CatalogError};

#[derive(Error, Debug)]
pub enum CartError {
    #[error("User not found")]
    UserNotFound(i32),
    #[error("Product not found")]
    ProductNotFound(i32),
    #[error("Item not found in cart")]
    ItemNotFound(i32),
    #[error("Quantity should be greater than 0")]
    InvalidQuantity(i32),
    #[error("Quantity is too large")]
    QuantityTooLarge(i32),
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ProductNotFound(id) => CartError::ProductNotFound(id),
            CatalogError::Storage(err) => CartError::Storage(err),
        }
    }
}

/// A cart line with its product joined in. `product` is `None` when the
/// referenced product no longer exists.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i32,
    pub product: Option<product::Model>,
    pub quantity: i32,
    /// The line asks for more than the product currently has in stock.
    pub exceeds_stock: bool,
}

impl CartLine {
    pub fn new(product_id: i32, product: Option<product::Model>, quantity: i32) -> Self {
        let exceeds_stock = product.as_ref().is_some_and(|p| quantity > p.stock);
        Self {
            product_id,
            product,
            quantity,
            exceeds_stock,
        }
    }

    /// Price of the line, zero when the product did not resolve.
    pub fn subtotal(&self) -> f64 {
        self.product
            .as_ref()
            .map_or(0.0, |p| p.price * f64::from(self.quantity))
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub total: f64,
    pub item_count: i64,
    pub over_stock: Vec<i32>,
}

impl CartSummary {
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total = compute_total(&items);
        let item_count = compute_item_count(&items);
        let over_stock = items
            .iter()
            .filter(|line| line.exceeds_stock)
            .map(|line| line.product_id)
            .collect();
        Self {
            items,
            total,
            item_count,
            over_stock,
        }
    }
}

pub fn compute_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::subtotal).sum()
}

pub fn compute_item_count(lines: &[CartLine]) -> i64 {
    lines.iter().map(|line| i64::from(line.quantity)).sum()
}

/// Reads and mutates a single user's cart.
///
/// Every operation runs in its own transaction and each mutation is a single
/// statement, so two requests for the same user never overwrite each other's
/// quantities. Failures are returned as they are, nothing is retried.
#[derive(Clone)]
pub struct CartManager {
    db: Arc<DatabaseConnection>,
}

impl CartManager {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn get_cart(&self, user_id: i32) -> Result<Vec<CartLine>, CartError> {
        let txn = self.db.begin().await?;
        ensure_user(&txn, user_id).await?;
        let lines = load_lines(&txn, user_id).await?;
        txn.commit().await?;
        Ok(lines)
    }

    /// Adds `quantity` of a product, merging into an existing line.
    /// A quantity of 0 adds one item, a negative one is rejected.
    pub async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        let quantity = match quantity {
            0 => 1,
            q if q < 0 => return Err(CartError::InvalidQuantity(q)),
            q => q,
        };

        let txn = self.db.begin().await?;
        ensure_user(&txn, user_id).await?;
        find_product(&txn, product_id).await?;

        if let Some(existing) = CartEntity::find()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::ProductId.eq(product_id))
            .one(&txn)
            .await?
        {
            if existing.quantity.checked_add(quantity).is_none() {
                return Err(CartError::QuantityTooLarge(product_id));
            }
        }

        let line = cart::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            ..Default::default()
        };
        CartEntity::insert(line)
            .on_conflict(
                OnConflict::columns([cart::Column::UserId, cart::Column::ProductId])
                    .value(
                        cart::Column::Quantity,
                        Expr::col((CartEntity, cart::Column::Quantity)).add(quantity),
                    )
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let lines = load_lines(&txn, user_id).await?;
        txn.commit().await?;
        debug!(user_id, product_id, quantity, "Added to cart");
        Ok(lines)
    }

    /// Sets the exact quantity of an existing line. Zero or less removes it.
    pub async fn update_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        let txn = self.db.begin().await?;
        ensure_user(&txn, user_id).await?;

        let affected = if quantity <= 0 {
            CartEntity::delete_many()
                .filter(cart::Column::UserId.eq(user_id))
                .filter(cart::Column::ProductId.eq(product_id))
                .exec(&txn)
                .await?
                .rows_affected
        } else {
            CartEntity::update_many()
                .col_expr(cart::Column::Quantity, Expr::value(quantity))
                .filter(cart::Column::UserId.eq(user_id))
                .filter(cart::Column::ProductId.eq(product_id))
                .exec(&txn)
                .await?
                .rows_affected
        };

        if affected == 0 {
            return Err(CartError::ItemNotFound(product_id));
        }

        let lines = load_lines(&txn, user_id).await?;
        txn.commit().await?;
        debug!(user_id, product_id, quantity, "Updated cart line");
        Ok(lines)
    }

    /// Removes the line for a product. Removing an absent line is a no-op.
    pub async fn remove_item(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Vec<CartLine>, CartError> {
        let txn = self.db.begin().await?;
        ensure_user(&txn, user_id).await?;

        let removed = CartEntity::delete_many()
            .filter(cart::Column::UserId.eq(user_id))
            .filter(cart::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let lines = load_lines(&txn, user_id).await?;
        txn.commit().await?;
        debug!(user_id, product_id, removed, "Removed from cart");
        Ok(lines)
    }

    pub async fn clear_cart(&self, user_id: i32) -> Result<(), CartError> {
        let txn = self.db.begin().await?;
        ensure_user(&txn, user_id).await?;

        let removed = CartEntity::delete_many()
            .filter(cart::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;
        info!(user_id, removed, "Cleared cart");
        Ok(())
    }

    pub async fn summary(&self, user_id: i32) -> Result<CartSummary, CartError> {
        Ok(CartSummary::from_lines(self.get_cart(user_id).await?))
    }
}

async fn ensure_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<(), CartError> {
    match UserEntity::find_by_id(user_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(CartError::UserNotFound(user_id)),
    }
}

async fn load_lines<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<Vec<CartLine>, CartError> {
    let rows = CartEntity::find()
        .filter(cart::Column::UserId.eq(user_id))
        .order_by_asc(cart::Column::Id)
        .find_also_related(ProductEntity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(line, product)| CartLine::new(line.product_id, product, line.quantity))
        .collect())
}

pub mod cart;
pub mod product;
pub mod seed;
pub mod user;

use sea_orm::{
    sea_query::Index, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    Schema,
};
use tracing::{info, warn};
use validator::Validate;

use crate::entities::{cart::Entity as Cart, product::Entity as Product, user::Entity as User};
use crate::services::catalog::NewProduct;

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let create_user_table = schema.create_table_from_entity(User).if_not_exists().to_owned();
    let create_product_table = schema
        .create_table_from_entity(Product)
        .if_not_exists()
        .to_owned();
    let create_cart_table = schema.create_table_from_entity(Cart).if_not_exists().to_owned();

    db.execute(backend.build(&create_user_table)).await?;
    db.execute(backend.build(&create_product_table)).await?;
    db.execute(backend.build(&create_cart_table)).await?;

    for mut index in schema
        .create_index_from_entity(Product)
        .into_iter()
        .chain(schema.create_index_from_entity(Cart))
    {
        let index = index.if_not_exists().to_owned();
        db.execute(backend.build(&index)).await?;
    }

    //One line per product per user, also the conflict target of the cart upsert.
    let cart_line_index = Index::create()
        .name("idx_cart_user_product")
        .table(Cart)
        .col(cart::Column::UserId)
        .col(cart::Column::ProductId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&cart_line_index)).await?;

    Ok(())
}

/// Fills an empty catalog with the storefront's starter products.
/// Returns how many products were inserted.
pub async fn seed_products(db: &DatabaseConnection) -> Result<u64, DbErr> {
    if Product::find().count(db).await? > 0 {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let products: Vec<product::ActiveModel> = seed::starter_products()
        .into_iter()
        .filter_map(|new_product: NewProduct| {
            let new_product = new_product.normalized();
            match new_product.validate() {
                Ok(()) => Some(new_product.into_active_model()),
                Err(err) => {
                    warn!(name = %new_product.name, error = %err, "Skipping invalid seed product");
                    None
                }
            }
        })
        .collect();

    let count = products.len() as u64;
    if count == 0 {
        return Ok(0);
    }

    Product::insert_many(products).exec(db).await?;
    info!(count, "Seeded product catalog");
    Ok(count)
}

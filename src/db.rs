use anyhow::Result;
use surrealdb::engine::local::{Db, RocksDb};
use surrealdb::Surreal;

pub type DbConn = Surreal<Db>;

/// Initialize database connection with RocksDB backend
pub async fn connect(path: &str) -> Result<DbConn> {
    let db = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("pizza").use_db("ops").await?;
    Ok(db)
}

/// Initialize database schema
pub async fn init_schema(db: &DbConn) -> Result<()> {
    db.query(
        r#"
        -- Delivery-order table (schemaless for flexibility)
        DEFINE TABLE delivery SCHEMALESS;
        DEFINE INDEX idx_order_id ON delivery FIELDS order_id UNIQUE;
        DEFINE INDEX idx_delivery_restaurant ON delivery FIELDS restaurant;
        DEFINE INDEX idx_delivery_delayed ON delivery FIELDS delayed;
        DEFINE INDEX idx_delivery_hour ON delivery FIELDS hour;

        -- Restaurant reference table
        DEFINE TABLE restaurant SCHEMAFULL;
        DEFINE FIELD restaurant_id ON restaurant TYPE string;
        DEFINE FIELD name ON restaurant TYPE string;
        DEFINE FIELD code ON restaurant TYPE string;
        DEFINE INDEX idx_restaurant_id ON restaurant FIELDS restaurant_id UNIQUE;
        "#,
    )
    .await?;

    Ok(())
}

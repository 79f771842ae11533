use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::orders::repo_types::{NewOrder, Order};

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Order>>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<Order>>;
    async fn create(&self, order: NewOrder) -> anyhow::Result<Order>;
    /// Persist every field of an existing order.
    async fn save(&self, order: &Order) -> anyhow::Result<Order>;
    /// Returns false when no order had this id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgOrderStore {
    db: PgPool,
}

impl PgOrderStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn list(&self) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, status, estimated_delivery
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list orders")?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, status, estimated_delivery
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("find order {id}"))?;
        Ok(row)
    }

    async fn create(&self, order: NewOrder) -> anyhow::Result<Order> {
        let row = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (status, estimated_delivery)
            VALUES ($1, $2)
            RETURNING id, status, estimated_delivery
            "#,
        )
        .bind(&order.status)
        .bind(&order.estimated_delivery)
        .fetch_one(&self.db)
        .await
        .context("insert order")?;
        Ok(row)
    }

    async fn save(&self, order: &Order) -> anyhow::Result<Order> {
        let row = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
               SET status = $2, estimated_delivery = $3
             WHERE id = $1
            RETURNING id, status, estimated_delivery
            "#,
        )
        .bind(order.id)
        .bind(&order.status)
        .bind(&order.estimated_delivery)
        .fetch_one(&self.db)
        .await
        .with_context(|| format!("update order {}", order.id))?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM orders WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete order {id}"))?;
        Ok(res.rows_affected() > 0)
    }
}

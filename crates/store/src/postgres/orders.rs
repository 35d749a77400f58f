//! Buyers and their purchase orders.

use async_trait::async_trait;
use common::{Buyer, Id, PurchaseOrder, PurchaseOrdersByBuyer};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PostgresStore, affected, anchored, delete_error, many, one, write_error};
use crate::Result;
use crate::entity::{BUYER, PURCHASE_ORDER};
use crate::repository::{BuyerRepository, PurchaseOrderRepository};

const BUYER_COLUMNS: &str = "id, card_number_id, first_name, last_name";

fn buyer_from_row(row: &PgRow) -> Result<Buyer> {
    Ok(Buyer {
        id: row.try_get("id")?,
        card_number_id: row.try_get("card_number_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
    })
}

fn purchase_orders_count_from_row(row: &PgRow) -> Result<PurchaseOrdersByBuyer> {
    Ok(PurchaseOrdersByBuyer {
        buyer_id: row.try_get("id")?,
        card_number_id: row.try_get("card_number_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        purchase_orders_count: row.try_get("purchase_orders_count")?,
    })
}

#[async_trait]
impl BuyerRepository for PostgresStore {
    async fn list_buyers(&self) -> Result<Vec<Buyer>> {
        let sql = format!("SELECT {BUYER_COLUMNS} FROM buyers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, buyer_from_row)
    }

    async fn find_buyer(&self, id: Id) -> Result<Buyer> {
        let sql = format!("SELECT {BUYER_COLUMNS} FROM buyers WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, BUYER, buyer_from_row)
    }

    async fn find_buyer_by_card_number(&self, card_number_id: &str) -> Result<Buyer> {
        let sql = format!("SELECT {BUYER_COLUMNS} FROM buyers WHERE card_number_id = $1");
        let row = sqlx::query(&sql)
            .bind(card_number_id)
            .fetch_optional(&self.pool)
            .await?;
        one(row, BUYER, buyer_from_row)
    }

    async fn save_buyer(&self, mut buyer: Buyer) -> Result<Buyer> {
        buyer.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO buyers (card_number_id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&buyer.card_number_id)
        .bind(&buyer.first_name)
        .bind(&buyer.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(BUYER, e))?;
        Ok(buyer)
    }

    async fn update_buyer(&self, buyer: &Buyer) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE buyers
            SET card_number_id = $1, first_name = $2, last_name = $3
            WHERE id = $4
            "#,
        )
        .bind(&buyer.card_number_id)
        .bind(&buyer.first_name)
        .bind(&buyer.last_name)
        .bind(buyer.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(BUYER, e))?;
        affected(result, BUYER)
    }

    async fn delete_buyer(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM buyers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(BUYER, e))?;
        affected(result, BUYER)
    }

    async fn purchase_orders_report(&self, id: Option<Id>) -> Result<Vec<PurchaseOrdersByBuyer>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.card_number_id, b.first_name, b.last_name,
                   COUNT(po.id) AS purchase_orders_count
            FROM buyers b
            LEFT JOIN purchase_orders po ON po.buyer_id = b.id
            WHERE ($1::BIGINT IS NULL OR b.id = $1)
            GROUP BY b.id
            ORDER BY b.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, BUYER, purchase_orders_count_from_row)
    }
}

fn purchase_order_from_row(row: &PgRow) -> Result<PurchaseOrder> {
    Ok(PurchaseOrder {
        id: row.try_get("id")?,
        order_number: row.try_get("order_number")?,
        order_date: row.try_get("order_date")?,
        tracking_code: row.try_get("tracking_code")?,
        buyer_id: row.try_get("buyer_id")?,
        product_record_id: row.try_get("product_record_id")?,
    })
}

#[async_trait]
impl PurchaseOrderRepository for PostgresStore {
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, order_date, tracking_code, buyer_id, product_record_id
            FROM purchase_orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, purchase_order_from_row)
    }

    async fn find_purchase_order(&self, id: Id) -> Result<PurchaseOrder> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, order_date, tracking_code, buyer_id, product_record_id
            FROM purchase_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, PURCHASE_ORDER, purchase_order_from_row)
    }

    async fn find_purchase_order_by_number(&self, order_number: &str) -> Result<PurchaseOrder> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, order_date, tracking_code, buyer_id, product_record_id
            FROM purchase_orders
            WHERE order_number = $1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;
        one(row, PURCHASE_ORDER, purchase_order_from_row)
    }

    async fn save_purchase_order(&self, mut order: PurchaseOrder) -> Result<PurchaseOrder> {
        order.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO purchase_orders (order_number, order_date, tracking_code, buyer_id,
                                         product_record_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(&order.tracking_code)
        .bind(order.buyer_id)
        .bind(order.product_record_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(PURCHASE_ORDER, e))?;
        Ok(order)
    }

    async fn update_purchase_order(&self, order: &PurchaseOrder) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE purchase_orders
            SET order_number = $1, order_date = $2, tracking_code = $3, buyer_id = $4,
                product_record_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(&order.tracking_code)
        .bind(order.buyer_id)
        .bind(order.product_record_id)
        .bind(order.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(PURCHASE_ORDER, e))?;
        affected(result, PURCHASE_ORDER)
    }

    async fn delete_purchase_order(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(PURCHASE_ORDER, e))?;
        affected(result, PURCHASE_ORDER)
    }
}

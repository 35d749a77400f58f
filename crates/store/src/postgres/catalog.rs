//! Localities, sellers, carriers, products and their price records.

use async_trait::async_trait;
use common::{
    Carrier, CarriesCountPerLocality, Id, Locality, LocalitySellersCount, Product, ProductRecord,
    ProductRecordsReport, Seller,
};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PostgresStore, affected, anchored, delete_error, many, one, write_error};
use crate::Result;
use crate::entity::{CARRIER, LOCALITY, PRODUCT, PRODUCT_RECORD, SELLER};
use crate::repository::{
    CarrierRepository, LocalityRepository, ProductRecordRepository, ProductRepository,
    SellerRepository,
};

fn locality_from_row(row: &PgRow) -> Result<Locality> {
    Ok(Locality {
        id: row.try_get("id")?,
        locality_name: row.try_get("locality_name")?,
        province_name: row.try_get("province_name")?,
        country_name: row.try_get("country_name")?,
    })
}

fn sellers_count_from_row(row: &PgRow) -> Result<LocalitySellersCount> {
    Ok(LocalitySellersCount {
        locality_id: row.try_get("id")?,
        locality_name: row.try_get("locality_name")?,
        province_name: row.try_get("province_name")?,
        country_name: row.try_get("country_name")?,
        sellers_count: row.try_get("sellers_count")?,
    })
}

fn carries_count_from_row(row: &PgRow) -> Result<CarriesCountPerLocality> {
    Ok(CarriesCountPerLocality {
        locality_id: row.try_get("id")?,
        locality_name: row.try_get("locality_name")?,
        carries_count: row.try_get("carries_count")?,
    })
}

#[async_trait]
impl LocalityRepository for PostgresStore {
    async fn list_localities(&self) -> Result<Vec<Locality>> {
        let rows = sqlx::query(
            "SELECT id, locality_name, province_name, country_name FROM localities ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, locality_from_row)
    }

    async fn find_locality(&self, id: Id) -> Result<Locality> {
        let row = sqlx::query(
            "SELECT id, locality_name, province_name, country_name FROM localities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, LOCALITY, locality_from_row)
    }

    async fn save_locality(&self, locality: Locality) -> Result<Locality> {
        sqlx::query(
            r#"
            INSERT INTO localities (id, locality_name, province_name, country_name)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(locality.id)
        .bind(&locality.locality_name)
        .bind(&locality.province_name)
        .bind(&locality.country_name)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(LOCALITY, e))?;
        Ok(locality)
    }

    async fn update_locality(&self, locality: &Locality) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE localities
            SET locality_name = $1, province_name = $2, country_name = $3
            WHERE id = $4
            "#,
        )
        .bind(&locality.locality_name)
        .bind(&locality.province_name)
        .bind(&locality.country_name)
        .bind(locality.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(LOCALITY, e))?;
        affected(result, LOCALITY)
    }

    async fn delete_locality(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM localities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(LOCALITY, e))?;
        affected(result, LOCALITY)
    }

    async fn locality_sellers_report(&self, id: Option<Id>) -> Result<Vec<LocalitySellersCount>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.locality_name, l.province_name, l.country_name,
                   COUNT(s.id) AS sellers_count
            FROM localities l
            LEFT JOIN sellers s ON s.locality_id = l.id
            WHERE ($1::BIGINT IS NULL OR l.id = $1)
            GROUP BY l.id
            ORDER BY l.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, LOCALITY, sellers_count_from_row)
    }

    async fn locality_carries_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<CarriesCountPerLocality>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.locality_name, COUNT(c.id) AS carries_count
            FROM localities l
            LEFT JOIN carriers c ON c.locality_id = l.id
            WHERE ($1::BIGINT IS NULL OR l.id = $1)
            GROUP BY l.id
            ORDER BY l.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, LOCALITY, carries_count_from_row)
    }
}

const SELLER_COLUMNS: &str = "id, cid, company_name, address, telephone, locality_id";

fn seller_from_row(row: &PgRow) -> Result<Seller> {
    Ok(Seller {
        id: row.try_get("id")?,
        cid: row.try_get("cid")?,
        company_name: row.try_get("company_name")?,
        address: row.try_get("address")?,
        telephone: row.try_get("telephone")?,
        locality_id: row.try_get("locality_id")?,
    })
}

#[async_trait]
impl SellerRepository for PostgresStore {
    async fn list_sellers(&self) -> Result<Vec<Seller>> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, seller_from_row)
    }

    async fn find_seller(&self, id: Id) -> Result<Seller> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, SELLER, seller_from_row)
    }

    async fn find_seller_by_cid(&self, cid: i64) -> Result<Seller> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE cid = $1");
        let row = sqlx::query(&sql)
            .bind(cid)
            .fetch_optional(&self.pool)
            .await?;
        one(row, SELLER, seller_from_row)
    }

    async fn save_seller(&self, mut seller: Seller) -> Result<Seller> {
        seller.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO sellers (cid, company_name, address, telephone, locality_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(seller.cid)
        .bind(&seller.company_name)
        .bind(&seller.address)
        .bind(&seller.telephone)
        .bind(seller.locality_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(SELLER, e))?;
        Ok(seller)
    }

    async fn update_seller(&self, seller: &Seller) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE sellers
            SET cid = $1, company_name = $2, address = $3, telephone = $4, locality_id = $5
            WHERE id = $6
            "#,
        )
        .bind(seller.cid)
        .bind(&seller.company_name)
        .bind(&seller.address)
        .bind(&seller.telephone)
        .bind(seller.locality_id)
        .bind(seller.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(SELLER, e))?;
        affected(result, SELLER)
    }

    async fn delete_seller(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(SELLER, e))?;
        affected(result, SELLER)
    }
}

const CARRIER_COLUMNS: &str = "id, cid, company_name, address, phone_number, locality_id";

fn carrier_from_row(row: &PgRow) -> Result<Carrier> {
    Ok(Carrier {
        id: row.try_get("id")?,
        cid: row.try_get("cid")?,
        company_name: row.try_get("company_name")?,
        address: row.try_get("address")?,
        phone_number: row.try_get("phone_number")?,
        locality_id: row.try_get("locality_id")?,
    })
}

#[async_trait]
impl CarrierRepository for PostgresStore {
    async fn list_carriers(&self) -> Result<Vec<Carrier>> {
        let sql = format!("SELECT {CARRIER_COLUMNS} FROM carriers ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, carrier_from_row)
    }

    async fn find_carrier(&self, id: Id) -> Result<Carrier> {
        let sql = format!("SELECT {CARRIER_COLUMNS} FROM carriers WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, CARRIER, carrier_from_row)
    }

    async fn find_carrier_by_cid(&self, cid: &str) -> Result<Carrier> {
        let sql = format!("SELECT {CARRIER_COLUMNS} FROM carriers WHERE cid = $1");
        let row = sqlx::query(&sql)
            .bind(cid)
            .fetch_optional(&self.pool)
            .await?;
        one(row, CARRIER, carrier_from_row)
    }

    async fn save_carrier(&self, mut carrier: Carrier) -> Result<Carrier> {
        carrier.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO carriers (cid, company_name, address, phone_number, locality_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&carrier.cid)
        .bind(&carrier.company_name)
        .bind(&carrier.address)
        .bind(&carrier.phone_number)
        .bind(carrier.locality_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(CARRIER, e))?;
        Ok(carrier)
    }

    async fn update_carrier(&self, carrier: &Carrier) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE carriers
            SET cid = $1, company_name = $2, address = $3, phone_number = $4, locality_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&carrier.cid)
        .bind(&carrier.company_name)
        .bind(&carrier.address)
        .bind(&carrier.phone_number)
        .bind(carrier.locality_id)
        .bind(carrier.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(CARRIER, e))?;
        affected(result, CARRIER)
    }

    async fn delete_carrier(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM carriers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(CARRIER, e))?;
        affected(result, CARRIER)
    }
}

const PRODUCT_COLUMNS: &str = "id, product_code, description, height, length, width, net_weight, \
     expiration_rate, recommended_freezing_temperature, freezing_rate, product_type_id, seller_id";

fn product_from_row(row: &PgRow) -> Result<Product> {
    Ok(Product {
        id: row.try_get("id")?,
        product_code: row.try_get("product_code")?,
        description: row.try_get("description")?,
        height: row.try_get("height")?,
        length: row.try_get("length")?,
        width: row.try_get("width")?,
        net_weight: row.try_get("net_weight")?,
        expiration_rate: row.try_get("expiration_rate")?,
        recommended_freezing_temperature: row.try_get("recommended_freezing_temperature")?,
        freezing_rate: row.try_get("freezing_rate")?,
        product_type_id: row.try_get("product_type_id")?,
        seller_id: row.try_get("seller_id")?,
    })
}

fn records_report_from_row(row: &PgRow) -> Result<ProductRecordsReport> {
    Ok(ProductRecordsReport {
        product_id: row.try_get("id")?,
        description: row.try_get("description")?,
        records_count: row.try_get("records_count")?,
    })
}

#[async_trait]
impl ProductRepository for PostgresStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, product_from_row)
    }

    async fn find_product(&self, id: Id) -> Result<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, PRODUCT, product_from_row)
    }

    async fn find_product_by_code(&self, product_code: &str) -> Result<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_code = $1");
        let row = sqlx::query(&sql)
            .bind(product_code)
            .fetch_optional(&self.pool)
            .await?;
        one(row, PRODUCT, product_from_row)
    }

    async fn save_product(&self, mut product: Product) -> Result<Product> {
        product.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO products (product_code, description, height, length, width, net_weight,
                                  expiration_rate, recommended_freezing_temperature, freezing_rate,
                                  product_type_id, seller_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&product.product_code)
        .bind(&product.description)
        .bind(product.height)
        .bind(product.length)
        .bind(product.width)
        .bind(product.net_weight)
        .bind(product.expiration_rate)
        .bind(product.recommended_freezing_temperature)
        .bind(product.freezing_rate)
        .bind(product.product_type_id)
        .bind(product.seller_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT, e))?;
        Ok(product)
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET product_code = $1, description = $2, height = $3, length = $4, width = $5,
                net_weight = $6, expiration_rate = $7, recommended_freezing_temperature = $8,
                freezing_rate = $9, product_type_id = $10, seller_id = $11
            WHERE id = $12
            "#,
        )
        .bind(&product.product_code)
        .bind(&product.description)
        .bind(product.height)
        .bind(product.length)
        .bind(product.width)
        .bind(product.net_weight)
        .bind(product.expiration_rate)
        .bind(product.recommended_freezing_temperature)
        .bind(product.freezing_rate)
        .bind(product.product_type_id)
        .bind(product.seller_id)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT, e))?;
        affected(result, PRODUCT)
    }

    async fn delete_product(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(PRODUCT, e))?;
        affected(result, PRODUCT)
    }

    async fn product_records_report(&self, id: Option<Id>) -> Result<Vec<ProductRecordsReport>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.description, COUNT(pr.id) AS records_count
            FROM products p
            LEFT JOIN product_records pr ON pr.product_id = p.id
            WHERE ($1::BIGINT IS NULL OR p.id = $1)
            GROUP BY p.id
            ORDER BY p.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, PRODUCT, records_report_from_row)
    }
}

fn product_record_from_row(row: &PgRow) -> Result<ProductRecord> {
    Ok(ProductRecord {
        id: row.try_get("id")?,
        last_update_date: row.try_get("last_update_date")?,
        purchase_price: row.try_get("purchase_price")?,
        sale_price: row.try_get("sale_price")?,
        product_id: row.try_get("product_id")?,
    })
}

#[async_trait]
impl ProductRecordRepository for PostgresStore {
    async fn list_product_records(&self) -> Result<Vec<ProductRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, last_update_date, purchase_price, sale_price, product_id
            FROM product_records
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, product_record_from_row)
    }

    async fn find_product_record(&self, id: Id) -> Result<ProductRecord> {
        let row = sqlx::query(
            r#"
            SELECT id, last_update_date, purchase_price, sale_price, product_id
            FROM product_records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, PRODUCT_RECORD, product_record_from_row)
    }

    async fn save_product_record(&self, mut record: ProductRecord) -> Result<ProductRecord> {
        record.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO product_records (last_update_date, purchase_price, sale_price, product_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(record.last_update_date)
        .bind(record.purchase_price)
        .bind(record.sale_price)
        .bind(record.product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT_RECORD, e))?;
        Ok(record)
    }

    async fn update_product_record(&self, record: &ProductRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE product_records
            SET last_update_date = $1, purchase_price = $2, sale_price = $3, product_id = $4
            WHERE id = $5
            "#,
        )
        .bind(record.last_update_date)
        .bind(record.purchase_price)
        .bind(record.sale_price)
        .bind(record.product_id)
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT_RECORD, e))?;
        affected(result, PRODUCT_RECORD)
    }

    async fn delete_product_record(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM product_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(PRODUCT_RECORD, e))?;
        affected(result, PRODUCT_RECORD)
    }
}

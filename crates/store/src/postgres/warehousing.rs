//! Warehouses and what lives in them: sections, product batches, employees, inbound orders.

use async_trait::async_trait;
use common::{
    Employee, Id, InboundOrder, InboundOrdersPerEmployee, ProductBatch, ReportProduct, Section,
    Warehouse,
};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::{PostgresStore, affected, anchored, delete_error, many, one, write_error};
use crate::Result;
use crate::entity::{EMPLOYEE, INBOUND_ORDER, PRODUCT_BATCH, SECTION, WAREHOUSE};
use crate::repository::{
    EmployeeRepository, InboundOrderRepository, ProductBatchRepository, SectionRepository,
    WarehouseRepository,
};

fn warehouse_from_row(row: &PgRow) -> Result<Warehouse> {
    Ok(Warehouse {
        id: row.try_get("id")?,
        warehouse_code: row.try_get("warehouse_code")?,
        address: row.try_get("address")?,
        telephone: row.try_get("telephone")?,
        minimum_capacity: row.try_get("minimum_capacity")?,
        minimum_temperature: row.try_get("minimum_temperature")?,
    })
}

#[async_trait]
impl WarehouseRepository for PostgresStore {
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let rows = sqlx::query(
            r#"
            SELECT id, warehouse_code, address, telephone, minimum_capacity, minimum_temperature
            FROM warehouses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, warehouse_from_row)
    }

    async fn find_warehouse(&self, id: Id) -> Result<Warehouse> {
        let row = sqlx::query(
            r#"
            SELECT id, warehouse_code, address, telephone, minimum_capacity, minimum_temperature
            FROM warehouses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, WAREHOUSE, warehouse_from_row)
    }

    async fn find_warehouse_by_code(&self, warehouse_code: &str) -> Result<Warehouse> {
        let row = sqlx::query(
            r#"
            SELECT id, warehouse_code, address, telephone, minimum_capacity, minimum_temperature
            FROM warehouses
            WHERE warehouse_code = $1
            "#,
        )
        .bind(warehouse_code)
        .fetch_optional(&self.pool)
        .await?;
        one(row, WAREHOUSE, warehouse_from_row)
    }

    async fn save_warehouse(&self, mut warehouse: Warehouse) -> Result<Warehouse> {
        warehouse.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO warehouses (warehouse_code, address, telephone, minimum_capacity,
                                    minimum_temperature)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&warehouse.warehouse_code)
        .bind(&warehouse.address)
        .bind(&warehouse.telephone)
        .bind(warehouse.minimum_capacity)
        .bind(warehouse.minimum_temperature)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(WAREHOUSE, e))?;
        Ok(warehouse)
    }

    async fn update_warehouse(&self, warehouse: &Warehouse) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE warehouses
            SET warehouse_code = $1, address = $2, telephone = $3, minimum_capacity = $4,
                minimum_temperature = $5
            WHERE id = $6
            "#,
        )
        .bind(&warehouse.warehouse_code)
        .bind(&warehouse.address)
        .bind(&warehouse.telephone)
        .bind(warehouse.minimum_capacity)
        .bind(warehouse.minimum_temperature)
        .bind(warehouse.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(WAREHOUSE, e))?;
        affected(result, WAREHOUSE)
    }

    async fn delete_warehouse(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(WAREHOUSE, e))?;
        affected(result, WAREHOUSE)
    }
}

const SECTION_COLUMNS: &str = "id, section_number, current_temperature, minimum_temperature, \
     current_capacity, minimum_capacity, maximum_capacity, warehouse_id, product_type_id";

fn section_from_row(row: &PgRow) -> Result<Section> {
    Ok(Section {
        id: row.try_get("id")?,
        section_number: row.try_get("section_number")?,
        current_temperature: row.try_get("current_temperature")?,
        minimum_temperature: row.try_get("minimum_temperature")?,
        current_capacity: row.try_get("current_capacity")?,
        minimum_capacity: row.try_get("minimum_capacity")?,
        maximum_capacity: row.try_get("maximum_capacity")?,
        warehouse_id: row.try_get("warehouse_id")?,
        product_type_id: row.try_get("product_type_id")?,
    })
}

fn report_product_from_row(row: &PgRow) -> Result<ReportProduct> {
    Ok(ReportProduct {
        section_id: row.try_get("id")?,
        section_number: row.try_get("section_number")?,
        products_count: row.try_get("products_count")?,
    })
}

#[async_trait]
impl SectionRepository for PostgresStore {
    async fn list_sections(&self) -> Result<Vec<Section>> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, section_from_row)
    }

    async fn find_section(&self, id: Id) -> Result<Section> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, SECTION, section_from_row)
    }

    async fn find_section_by_number(&self, section_number: i64) -> Result<Section> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections WHERE section_number = $1");
        let row = sqlx::query(&sql)
            .bind(section_number)
            .fetch_optional(&self.pool)
            .await?;
        one(row, SECTION, section_from_row)
    }

    async fn save_section(&self, mut section: Section) -> Result<Section> {
        section.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO sections (section_number, current_temperature, minimum_temperature,
                                  current_capacity, minimum_capacity, maximum_capacity,
                                  warehouse_id, product_type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(section.section_number)
        .bind(section.current_temperature)
        .bind(section.minimum_temperature)
        .bind(section.current_capacity)
        .bind(section.minimum_capacity)
        .bind(section.maximum_capacity)
        .bind(section.warehouse_id)
        .bind(section.product_type_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(SECTION, e))?;
        Ok(section)
    }

    async fn update_section(&self, section: &Section) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE sections
            SET section_number = $1, current_temperature = $2, minimum_temperature = $3,
                current_capacity = $4, minimum_capacity = $5, maximum_capacity = $6,
                warehouse_id = $7, product_type_id = $8
            WHERE id = $9
            "#,
        )
        .bind(section.section_number)
        .bind(section.current_temperature)
        .bind(section.minimum_temperature)
        .bind(section.current_capacity)
        .bind(section.minimum_capacity)
        .bind(section.maximum_capacity)
        .bind(section.warehouse_id)
        .bind(section.product_type_id)
        .bind(section.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(SECTION, e))?;
        affected(result, SECTION)
    }

    async fn delete_section(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(SECTION, e))?;
        affected(result, SECTION)
    }

    async fn section_products_report(&self, id: Option<Id>) -> Result<Vec<ReportProduct>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.section_number, COUNT(pb.id) AS products_count
            FROM sections s
            LEFT JOIN product_batches pb ON pb.section_id = s.id
            WHERE ($1::BIGINT IS NULL OR s.id = $1)
            GROUP BY s.id
            ORDER BY s.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, SECTION, report_product_from_row)
    }
}

const PRODUCT_BATCH_COLUMNS: &str = "id, batch_number, current_quantity, current_temperature, \
     due_date, initial_quantity, manufacturing_date, manufacturing_hour, minimum_temperature, \
     product_id, section_id";

fn product_batch_from_row(row: &PgRow) -> Result<ProductBatch> {
    Ok(ProductBatch {
        id: row.try_get("id")?,
        batch_number: row.try_get("batch_number")?,
        current_quantity: row.try_get("current_quantity")?,
        current_temperature: row.try_get("current_temperature")?,
        due_date: row.try_get("due_date")?,
        initial_quantity: row.try_get("initial_quantity")?,
        manufacturing_date: row.try_get("manufacturing_date")?,
        manufacturing_hour: row.try_get("manufacturing_hour")?,
        minimum_temperature: row.try_get("minimum_temperature")?,
        product_id: row.try_get("product_id")?,
        section_id: row.try_get("section_id")?,
    })
}

#[async_trait]
impl ProductBatchRepository for PostgresStore {
    async fn list_product_batches(&self) -> Result<Vec<ProductBatch>> {
        let sql = format!("SELECT {PRODUCT_BATCH_COLUMNS} FROM product_batches ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        many(rows, product_batch_from_row)
    }

    async fn find_product_batch(&self, id: Id) -> Result<ProductBatch> {
        let sql = format!("SELECT {PRODUCT_BATCH_COLUMNS} FROM product_batches WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        one(row, PRODUCT_BATCH, product_batch_from_row)
    }

    async fn find_product_batch_by_number(&self, batch_number: i64) -> Result<ProductBatch> {
        let sql =
            format!("SELECT {PRODUCT_BATCH_COLUMNS} FROM product_batches WHERE batch_number = $1");
        let row = sqlx::query(&sql)
            .bind(batch_number)
            .fetch_optional(&self.pool)
            .await?;
        one(row, PRODUCT_BATCH, product_batch_from_row)
    }

    async fn save_product_batch(&self, mut batch: ProductBatch) -> Result<ProductBatch> {
        batch.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO product_batches (batch_number, current_quantity, current_temperature,
                                         due_date, initial_quantity, manufacturing_date,
                                         manufacturing_hour, minimum_temperature, product_id,
                                         section_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(batch.batch_number)
        .bind(batch.current_quantity)
        .bind(batch.current_temperature)
        .bind(&batch.due_date)
        .bind(batch.initial_quantity)
        .bind(&batch.manufacturing_date)
        .bind(batch.manufacturing_hour)
        .bind(batch.minimum_temperature)
        .bind(batch.product_id)
        .bind(batch.section_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT_BATCH, e))?;
        Ok(batch)
    }

    async fn update_product_batch(&self, batch: &ProductBatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE product_batches
            SET batch_number = $1, current_quantity = $2, current_temperature = $3,
                due_date = $4, initial_quantity = $5, manufacturing_date = $6,
                manufacturing_hour = $7, minimum_temperature = $8, product_id = $9,
                section_id = $10
            WHERE id = $11
            "#,
        )
        .bind(batch.batch_number)
        .bind(batch.current_quantity)
        .bind(batch.current_temperature)
        .bind(&batch.due_date)
        .bind(batch.initial_quantity)
        .bind(&batch.manufacturing_date)
        .bind(batch.manufacturing_hour)
        .bind(batch.minimum_temperature)
        .bind(batch.product_id)
        .bind(batch.section_id)
        .bind(batch.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(PRODUCT_BATCH, e))?;
        affected(result, PRODUCT_BATCH)
    }

    async fn delete_product_batch(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM product_batches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(PRODUCT_BATCH, e))?;
        affected(result, PRODUCT_BATCH)
    }
}

fn employee_from_row(row: &PgRow) -> Result<Employee> {
    Ok(Employee {
        id: row.try_get("id")?,
        card_number_id: row.try_get("card_number_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        warehouse_id: row.try_get("warehouse_id")?,
    })
}

fn inbound_orders_count_from_row(row: &PgRow) -> Result<InboundOrdersPerEmployee> {
    Ok(InboundOrdersPerEmployee {
        employee_id: row.try_get("id")?,
        card_number_id: row.try_get("card_number_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        warehouse_id: row.try_get("warehouse_id")?,
        inbound_orders_count: row.try_get("inbound_orders_count")?,
    })
}

#[async_trait]
impl EmployeeRepository for PostgresStore {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query(
            r#"
            SELECT id, card_number_id, first_name, last_name, warehouse_id
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, employee_from_row)
    }

    async fn find_employee(&self, id: Id) -> Result<Employee> {
        let row = sqlx::query(
            r#"
            SELECT id, card_number_id, first_name, last_name, warehouse_id
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, EMPLOYEE, employee_from_row)
    }

    async fn find_employee_by_card_number(&self, card_number_id: &str) -> Result<Employee> {
        let row = sqlx::query(
            r#"
            SELECT id, card_number_id, first_name, last_name, warehouse_id
            FROM employees
            WHERE card_number_id = $1
            "#,
        )
        .bind(card_number_id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, EMPLOYEE, employee_from_row)
    }

    async fn save_employee(&self, mut employee: Employee) -> Result<Employee> {
        employee.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO employees (card_number_id, first_name, last_name, warehouse_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&employee.card_number_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.warehouse_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(EMPLOYEE, e))?;
        Ok(employee)
    }

    async fn update_employee(&self, employee: &Employee) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET card_number_id = $1, first_name = $2, last_name = $3, warehouse_id = $4
            WHERE id = $5
            "#,
        )
        .bind(&employee.card_number_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.warehouse_id)
        .bind(employee.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(EMPLOYEE, e))?;
        affected(result, EMPLOYEE)
    }

    async fn delete_employee(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(EMPLOYEE, e))?;
        affected(result, EMPLOYEE)
    }

    async fn inbound_orders_report(
        &self,
        id: Option<Id>,
    ) -> Result<Vec<InboundOrdersPerEmployee>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.card_number_id, e.first_name, e.last_name, e.warehouse_id,
                   COUNT(io.id) AS inbound_orders_count
            FROM employees e
            LEFT JOIN inbound_orders io ON io.employee_id = e.id
            WHERE ($1::BIGINT IS NULL OR e.id = $1)
            GROUP BY e.id
            ORDER BY e.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        anchored(id, rows, EMPLOYEE, inbound_orders_count_from_row)
    }
}

fn inbound_order_from_row(row: &PgRow) -> Result<InboundOrder> {
    Ok(InboundOrder {
        id: row.try_get("id")?,
        order_date: row.try_get("order_date")?,
        order_number: row.try_get("order_number")?,
        employee_id: row.try_get("employee_id")?,
        product_batch_id: row.try_get("product_batch_id")?,
        warehouse_id: row.try_get("warehouse_id")?,
    })
}

#[async_trait]
impl InboundOrderRepository for PostgresStore {
    async fn list_inbound_orders(&self) -> Result<Vec<InboundOrder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_date, order_number, employee_id, product_batch_id, warehouse_id
            FROM inbound_orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        many(rows, inbound_order_from_row)
    }

    async fn find_inbound_order(&self, id: Id) -> Result<InboundOrder> {
        let row = sqlx::query(
            r#"
            SELECT id, order_date, order_number, employee_id, product_batch_id, warehouse_id
            FROM inbound_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        one(row, INBOUND_ORDER, inbound_order_from_row)
    }

    async fn find_inbound_order_by_number(&self, order_number: &str) -> Result<InboundOrder> {
        let row = sqlx::query(
            r#"
            SELECT id, order_date, order_number, employee_id, product_batch_id, warehouse_id
            FROM inbound_orders
            WHERE order_number = $1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;
        one(row, INBOUND_ORDER, inbound_order_from_row)
    }

    async fn save_inbound_order(&self, mut order: InboundOrder) -> Result<InboundOrder> {
        order.id = sqlx::query_scalar::<_, Id>(
            r#"
            INSERT INTO inbound_orders (order_date, order_number, employee_id, product_batch_id,
                                        warehouse_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(order.order_date)
        .bind(&order.order_number)
        .bind(order.employee_id)
        .bind(order.product_batch_id)
        .bind(order.warehouse_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(INBOUND_ORDER, e))?;
        Ok(order)
    }

    async fn update_inbound_order(&self, order: &InboundOrder) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE inbound_orders
            SET order_date = $1, order_number = $2, employee_id = $3, product_batch_id = $4,
                warehouse_id = $5
            WHERE id = $6
            "#,
        )
        .bind(order.order_date)
        .bind(&order.order_number)
        .bind(order.employee_id)
        .bind(order.product_batch_id)
        .bind(order.warehouse_id)
        .bind(order.id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(INBOUND_ORDER, e))?;
        affected(result, INBOUND_ORDER)
    }

    async fn delete_inbound_order(&self, id: Id) -> Result<()> {
        let result = sqlx::query("DELETE FROM inbound_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(INBOUND_ORDER, e))?;
        affected(result, INBOUND_ORDER)
    }
}

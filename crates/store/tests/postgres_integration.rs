//! PostgreSQL integration tests
//!
//! These tests share one PostgreSQL container and truncate every table on
//! entry, so each one is `#[serial]`. Docker must be available.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use common::{
    Buyer, Carrier, Employee, InboundOrder, Locality, Product, ProductBatch, ProductRecord,
    PurchaseOrder, Section, Seller, Warehouse,
};
use serial_test::serial;
use sqlx::PgPool;
use store::{
    BuyerRepository, CarrierRepository, EmployeeRepository, InboundOrderRepository,
    LocalityRepository, PostgresStore, ProductBatchRepository, ProductRecordRepository,
    ProductRepository, ProductTypeRepository, PurchaseOrderRepository, SectionRepository,
    SellerRepository, StoreError, WarehouseRepository,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!("../../../migrations/001_create_inventory_schema.sql"))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Fresh pool with every table but the seeded product types cleared.
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query(
        "TRUNCATE TABLE inbound_orders, purchase_orders, product_records, product_batches, \
         products, sections, employees, warehouses, buyers, carriers, sellers, localities \
         RESTART IDENTITY",
    )
    .execute(&pool)
    .await
    .unwrap();

    PostgresStore::new(pool)
}

fn locality(id: i64) -> Locality {
    Locality {
        id,
        locality_name: "Sao Paulo".to_string(),
        province_name: "SP".to_string(),
        country_name: "Brazil".to_string(),
    }
}

fn seller(cid: i64, locality_id: i64) -> Seller {
    Seller {
        id: 0,
        cid,
        company_name: "Fresh Farms".to_string(),
        address: "Rua A, 100".to_string(),
        telephone: "(11) 91234-5678".to_string(),
        locality_id,
    }
}

fn warehouse(code: &str) -> Warehouse {
    Warehouse {
        id: 0,
        warehouse_code: code.to_string(),
        address: "Av. B, 200".to_string(),
        telephone: "(11) 3333-4444".to_string(),
        minimum_capacity: 10,
        minimum_temperature: -5.0,
    }
}

fn section(number: i64, warehouse_id: i64) -> Section {
    Section {
        id: 0,
        section_number: number,
        current_temperature: 2.0,
        minimum_temperature: -5.0,
        current_capacity: 10,
        minimum_capacity: 5,
        maximum_capacity: 50,
        warehouse_id,
        product_type_id: 1,
    }
}

fn product(code: &str, seller_id: i64) -> Product {
    Product {
        id: 0,
        product_code: code.to_string(),
        description: "Frozen peas".to_string(),
        height: 10.0,
        length: 20.0,
        width: 5.0,
        net_weight: 1.5,
        expiration_rate: 0.7,
        recommended_freezing_temperature: -18.0,
        freezing_rate: 1.0,
        product_type_id: 1,
        seller_id,
    }
}

fn batch(number: i64, product_id: i64, section_id: i64) -> ProductBatch {
    ProductBatch {
        id: 0,
        batch_number: number,
        current_quantity: 100,
        current_temperature: -10.0,
        due_date: "2026-12-01".to_string(),
        initial_quantity: 100,
        manufacturing_date: "2026-01-10".to_string(),
        manufacturing_hour: 8,
        minimum_temperature: -20.0,
        product_id,
        section_id,
    }
}

#[tokio::test]
#[serial]
async fn product_types_are_seeded() {
    let store = get_test_store().await;

    let types = store.list_product_types().await.unwrap();
    assert_eq!(types.len(), 3);
    assert_eq!(store.find_product_type(1).await.unwrap().name, "Frozen");
}

#[tokio::test]
#[serial]
async fn seller_round_trip_and_duplicate_cid() {
    let store = get_test_store().await;
    store.save_locality(locality(1)).await.unwrap();

    let saved = store.save_seller(seller(123, 1)).await.unwrap();
    assert!(saved.id > 0);
    assert_eq!(store.find_seller_by_cid(123).await.unwrap(), saved);

    let err = store.save_seller(seller(123, 1)).await.unwrap_err();
    match err {
        StoreError::Duplicated { entity, constraint } => {
            assert_eq!(entity, "seller");
            assert_eq!(constraint, "uq_sellers_cid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn missing_foreign_key_reports_referenced_entity() {
    let store = get_test_store().await;

    let err = store.save_seller(seller(1, 99)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "locality" }));

    let err = store.save_section(section(1, 42)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "warehouse" }));
}

#[tokio::test]
#[serial]
async fn delete_of_referenced_row_is_restricted() {
    let store = get_test_store().await;
    store.save_locality(locality(1)).await.unwrap();
    store.save_seller(seller(1, 1)).await.unwrap();

    let err = store.delete_locality(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Referenced { entity: "locality" }));
}

#[tokio::test]
#[serial]
async fn update_and_delete_missing_rows() {
    let store = get_test_store().await;

    let mut ghost = warehouse("W-404");
    ghost.id = 404;
    let err = store.update_warehouse(&ghost).await.unwrap_err();
    assert!(err.is_not_found());
    let err = store.delete_warehouse(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(store.find_warehouse(404).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[serial]
async fn locality_reports_keep_zero_counts() {
    let store = get_test_store().await;
    store.save_locality(locality(1)).await.unwrap();
    store.save_locality(locality(2)).await.unwrap();
    store.save_seller(seller(1, 1)).await.unwrap();
    store.save_seller(seller(2, 1)).await.unwrap();
    store
        .save_carrier(Carrier {
            id: 0,
            cid: "CAR-1".to_string(),
            company_name: "Speedy".to_string(),
            address: "Rua C, 1".to_string(),
            phone_number: "(11) 99999-0000".to_string(),
            locality_id: 2,
        })
        .await
        .unwrap();

    let sellers = store.locality_sellers_report(None).await.unwrap();
    let counts: Vec<_> = sellers
        .iter()
        .map(|r| (r.locality_id, r.sellers_count))
        .collect();
    assert_eq!(counts, vec![(1, 2), (2, 0)]);

    let carries = store.locality_carries_report(Some(2)).await.unwrap();
    assert_eq!(carries.len(), 1);
    assert_eq!(carries[0].carries_count, 1);

    let err = store.locality_sellers_report(Some(7)).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "locality" }));
}

#[tokio::test]
#[serial]
async fn warehousing_chain_and_reports() {
    let store = get_test_store().await;
    store.save_locality(locality(1)).await.unwrap();
    let owner = store.save_seller(seller(1, 1)).await.unwrap();
    let depot = store.save_warehouse(warehouse("W-1")).await.unwrap();
    let stocked = store.save_section(section(10, depot.id)).await.unwrap();
    let empty = store.save_section(section(11, depot.id)).await.unwrap();
    let peas = store.save_product(product("P-1", owner.id)).await.unwrap();
    let lot = store
        .save_product_batch(batch(500, peas.id, stocked.id))
        .await
        .unwrap();

    let employee = store
        .save_employee(Employee {
            id: 0,
            card_number_id: "E-1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            warehouse_id: depot.id,
        })
        .await
        .unwrap();
    let order = store
        .save_inbound_order(InboundOrder {
            id: 0,
            order_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            order_number: "IN-1".to_string(),
            employee_id: employee.id,
            product_batch_id: lot.id,
            warehouse_id: depot.id,
        })
        .await
        .unwrap();
    let found = store.find_inbound_order_by_number("IN-1").await.unwrap();
    assert_eq!(found, order);

    let report = store.section_products_report(None).await.unwrap();
    let counts: Vec<_> = report
        .iter()
        .map(|r| (r.section_id, r.products_count))
        .collect();
    assert_eq!(counts, vec![(stocked.id, 1), (empty.id, 0)]);

    let report = store
        .inbound_orders_report(Some(employee.id))
        .await
        .unwrap();
    assert_eq!(report[0].inbound_orders_count, 1);
    assert_eq!(report[0].warehouse_id, depot.id);
}

#[tokio::test]
#[serial]
async fn purchase_orders_and_product_records() {
    let store = get_test_store().await;
    store.save_locality(locality(1)).await.unwrap();
    let owner = store.save_seller(seller(1, 1)).await.unwrap();
    let peas = store.save_product(product("P-1", owner.id)).await.unwrap();
    let record = store
        .save_product_record(ProductRecord {
            id: 0,
            last_update_date: Utc::now(),
            purchase_price: 10.0,
            sale_price: 15.0,
            product_id: peas.id,
        })
        .await
        .unwrap();
    let buyer = store
        .save_buyer(Buyer {
            id: 0,
            card_number_id: "B-1".to_string(),
            first_name: "Joao".to_string(),
            last_name: "Souza".to_string(),
        })
        .await
        .unwrap();
    let idle = store
        .save_buyer(Buyer {
            id: 0,
            card_number_id: "B-2".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lima".to_string(),
        })
        .await
        .unwrap();

    let mut order = store
        .save_purchase_order(PurchaseOrder {
            id: 0,
            order_number: "PO-1".to_string(),
            order_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            tracking_code: "TRK-1".to_string(),
            buyer_id: buyer.id,
            product_record_id: record.id,
        })
        .await
        .unwrap();
    order.tracking_code = "TRK-2".to_string();
    store.update_purchase_order(&order).await.unwrap();
    assert_eq!(store.find_purchase_order(order.id).await.unwrap(), order);

    let report = store.purchase_orders_report(None).await.unwrap();
    let counts: Vec<_> = report
        .iter()
        .map(|r| (r.buyer_id, r.purchase_orders_count))
        .collect();
    assert_eq!(counts, vec![(buyer.id, 1), (idle.id, 0)]);

    let report = store.product_records_report(Some(peas.id)).await.unwrap();
    assert_eq!(report[0].records_count, 1);

    let err = store.delete_product_record(record.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Referenced { entity: "product record" }));
}

use common::{Locality, Seller, SellerPatch, Validate, Warehouse};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{LocalityService, SellerService};
use store::InMemoryStore;

fn seller(cid: i64) -> Seller {
    Seller {
        id: 0,
        cid,
        company_name: "Bench Foods".to_string(),
        address: "Rua 1".to_string(),
        telephone: "11 91332-3232".to_string(),
        locality_id: 1,
    }
}

fn bench_validate(c: &mut Criterion) {
    let warehouse = Warehouse {
        id: 0,
        warehouse_code: "BENCH".to_string(),
        address: "Av. 1".to_string(),
        telephone: "(11) 91332-3232".to_string(),
        minimum_capacity: 10,
        minimum_temperature: -18.0,
    };

    c.bench_function("domain/validate_warehouse", |b| {
        b.iter(|| std::hint::black_box(warehouse.validate()));
    });
}

fn bench_create_seller(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    rt.block_on(async {
        LocalityService::new(store.clone())
            .create(Locality {
                id: 1,
                locality_name: "Bench".to_string(),
                province_name: "SP".to_string(),
                country_name: "Brazil".to_string(),
            })
            .await
            .unwrap();
    });
    let service = SellerService::new(store);
    let mut cid = 0;

    c.bench_function("domain/create_seller", |b| {
        b.iter(|| {
            cid += 1;
            rt.block_on(async { service.create(seller(cid)).await.unwrap() });
        });
    });
}

fn bench_update_seller(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let service = SellerService::new(store.clone());
    let id = rt.block_on(async {
        LocalityService::new(store)
            .create(Locality {
                id: 1,
                locality_name: "Bench".to_string(),
                province_name: "SP".to_string(),
                country_name: "Brazil".to_string(),
            })
            .await
            .unwrap();
        service.create(seller(1)).await.unwrap().id
    });

    c.bench_function("domain/patch_seller", |b| {
        b.iter(|| {
            rt.block_on(async {
                let patch = SellerPatch {
                    address: Some("Rua 2".to_string()),
                    ..Default::default()
                };
                service.update(id, patch).await.unwrap()
            });
        });
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_create_seller,
    bench_update_seller
);
criterion_main!(benches);

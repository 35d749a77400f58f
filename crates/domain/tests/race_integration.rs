//! The uniqueness check and the write are not atomic. These tests hide rows
//! from the natural-key lookup so that the store's unique index is the one to
//! reject the write, as happens when two requests race.

use async_trait::async_trait;
use common::{Id, Locality, Seller};
use domain::{DomainError, LocalityService, SellerService};
use store::{InMemoryStore, LocalityRepository, SellerRepository};

/// Delegates to the in-memory store but never finds a seller by cid.
#[derive(Clone)]
struct BlindStore(InMemoryStore);

#[async_trait]
impl SellerRepository for BlindStore {
    async fn list_sellers(&self) -> store::Result<Vec<Seller>> {
        self.0.list_sellers().await
    }

    async fn find_seller(&self, id: Id) -> store::Result<Seller> {
        self.0.find_seller(id).await
    }

    async fn find_seller_by_cid(&self, _cid: i64) -> store::Result<Seller> {
        Err(store::StoreError::not_found("seller"))
    }

    async fn save_seller(&self, seller: Seller) -> store::Result<Seller> {
        self.0.save_seller(seller).await
    }

    async fn update_seller(&self, seller: &Seller) -> store::Result<()> {
        self.0.update_seller(seller).await
    }

    async fn delete_seller(&self, id: Id) -> store::Result<()> {
        self.0.delete_seller(id).await
    }
}

#[async_trait]
impl LocalityRepository for BlindStore {
    async fn list_localities(&self) -> store::Result<Vec<Locality>> {
        self.0.list_localities().await
    }

    async fn find_locality(&self, id: Id) -> store::Result<Locality> {
        self.0.find_locality(id).await
    }

    async fn save_locality(&self, locality: Locality) -> store::Result<Locality> {
        self.0.save_locality(locality).await
    }

    async fn update_locality(&self, locality: &Locality) -> store::Result<()> {
        self.0.update_locality(locality).await
    }

    async fn delete_locality(&self, id: Id) -> store::Result<()> {
        self.0.delete_locality(id).await
    }

    async fn locality_sellers_report(
        &self,
        id: Option<Id>,
    ) -> store::Result<Vec<common::LocalitySellersCount>> {
        self.0.locality_sellers_report(id).await
    }

    async fn locality_carries_report(
        &self,
        id: Option<Id>,
    ) -> store::Result<Vec<common::CarriesCountPerLocality>> {
        self.0.locality_carries_report(id).await
    }
}

fn seller(cid: i64) -> Seller {
    Seller {
        id: 0,
        cid,
        company_name: "Test".to_string(),
        address: "Rua 1".to_string(),
        telephone: "11 91332-3232".to_string(),
        locality_id: 1,
    }
}

async fn blind_service() -> SellerService<BlindStore> {
    let inner = InMemoryStore::new();
    LocalityService::new(inner.clone())
        .create(Locality {
            id: 1,
            locality_name: "Campinas".to_string(),
            province_name: "SP".to_string(),
            country_name: "Brazil".to_string(),
        })
        .await
        .unwrap();
    SellerService::new(BlindStore(inner))
}

#[tokio::test]
async fn duplicate_rejected_by_store_is_a_conflict() {
    let service = blind_service().await;
    service.create(seller(123)).await.unwrap();

    let err = service.create(seller(123)).await.unwrap_err();
    let expected = "seller with this CID already exists";
    assert!(
        matches!(err, DomainError::Conflict(ref msg) if msg == expected),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn concurrent_creates_succeed_at_most_once() {
    let service = std::sync::Arc::new(blind_service().await);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.create(seller(777)).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(DomainError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

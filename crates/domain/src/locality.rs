//! Locality service and the per-locality reports.

use common::{CarriesCountPerLocality, Id, Locality, LocalityPatch, LocalitySellersCount};
use store::LocalityRepository;
use store::entity::LOCALITY;

use crate::error::{DomainError, Result};
use crate::protocol::{Op, record, report_query, validate, write_failed};

const ID_TAKEN: &str = "locality with this id already exists";

/// Manages localities. Unlike other aggregates the id is chosen by the client.
pub struct LocalityService<S> {
    store: S,
}

impl<S: LocalityRepository> LocalityService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Locality>> {
        Ok(self.store.list_localities().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Locality> {
        Ok(self.store.find_locality(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, locality: Locality) -> Result<Locality> {
        record(LOCALITY, Op::Create, self.insert(locality).await)
    }

    /// The id in the patch is ignored; a locality cannot be renumbered.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: LocalityPatch) -> Result<Locality> {
        record(LOCALITY, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(LOCALITY, Op::Delete, self.remove(id).await)
    }

    /// Sellers per locality, or for one locality when `id` is given.
    #[tracing::instrument(skip(self))]
    pub async fn sellers_report(&self, id: Option<Id>) -> Result<Vec<LocalitySellersCount>> {
        report_query("locality_sellers");
        Ok(self.store.locality_sellers_report(id).await?)
    }

    /// Carriers per locality, or for one locality when `id` is given.
    #[tracing::instrument(skip(self))]
    pub async fn carries_report(&self, id: Option<Id>) -> Result<Vec<CarriesCountPerLocality>> {
        report_query("locality_carries");
        Ok(self.store.locality_carries_report(id).await?)
    }

    async fn insert(&self, locality: Locality) -> Result<Locality> {
        validate(&locality)?;
        match self.store.find_locality(locality.id).await {
            Ok(_) => return Err(DomainError::conflict(ID_TAKEN)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let locality = self
            .store
            .save_locality(locality)
            .await
            .map_err(|e| write_failed(e, ID_TAKEN))?;
        tracing::info!(locality_id = locality.id, "locality created");
        Ok(locality)
    }

    async fn modify(&self, id: Id, patch: LocalityPatch) -> Result<Locality> {
        let mut locality = self.store.find_locality(id).await?;
        patch.apply(&mut locality);
        validate(&locality)?;
        self.store.update_locality(&locality).await?;
        Ok(locality)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_locality(id).await?;
        self.store.delete_locality(id).await?;
        Ok(())
    }
}

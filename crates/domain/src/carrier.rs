//! Carrier service.

use common::{Carrier, CarrierPatch, Id};
use store::entity::CARRIER;
use store::{CarrierRepository, LocalityRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const CID_TAKEN: &str = "carrier with this CID already exists";

pub struct CarrierService<S> {
    store: S,
}

impl<S> CarrierService<S>
where
    S: CarrierRepository + LocalityRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Carrier>> {
        Ok(self.store.list_carriers().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Carrier> {
        Ok(self.store.find_carrier(id).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, carrier: Carrier) -> Result<Carrier> {
        record(CARRIER, Op::Create, self.insert(carrier).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: CarrierPatch) -> Result<Carrier> {
        record(CARRIER, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(CARRIER, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, carrier: Carrier) -> Result<Carrier> {
        validate(&carrier)?;
        ensure_unique(
            self.store.find_carrier_by_cid(&carrier.cid).await,
            |found| found.id,
            carrier.id,
            CID_TAKEN,
        )?;
        self.store.find_locality(carrier.locality_id).await?;

        let carrier = self
            .store
            .save_carrier(carrier)
            .await
            .map_err(|e| write_failed(e, CID_TAKEN))?;
        tracing::info!(carrier_id = carrier.id, "carrier created");
        Ok(carrier)
    }

    async fn modify(&self, id: Id, patch: CarrierPatch) -> Result<Carrier> {
        let mut carrier = self.store.find_carrier(id).await?;
        let prior_cid = carrier.cid.clone();
        patch.apply(&mut carrier);

        validate(&carrier)?;
        if carrier.cid != prior_cid {
            ensure_unique(
                self.store.find_carrier_by_cid(&carrier.cid).await,
                |found| found.id,
                id,
                CID_TAKEN,
            )?;
        }
        self.store.find_locality(carrier.locality_id).await?;

        self.store
            .update_carrier(&carrier)
            .await
            .map_err(|e| write_failed(e, CID_TAKEN))?;
        Ok(carrier)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_carrier(id).await?;
        self.store.delete_carrier(id).await?;
        Ok(())
    }
}

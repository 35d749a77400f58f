//! Seller service.

use common::{Id, Seller, SellerPatch};
use store::entity::SELLER;
use store::{LocalityRepository, SellerRepository};

use crate::error::Result;
use crate::protocol::{Op, ensure_unique, record, validate, write_failed};

const CID_TAKEN: &str = "seller with this CID already exists";

/// Manages sellers. A seller's `cid` is unique and its locality must exist.
pub struct SellerService<S> {
    store: S,
}

impl<S> SellerService<S>
where
    S: SellerRepository + LocalityRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Seller>> {
        Ok(self.store.list_sellers().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: Id) -> Result<Seller> {
        Ok(self.store.find_seller(id).await?)
    }

    /// Registers a new seller and returns it with its assigned id.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, seller: Seller) -> Result<Seller> {
        record(SELLER, Op::Create, self.insert(seller).await)
    }

    /// Applies a partial update; unset fields keep their stored value.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: Id, patch: SellerPatch) -> Result<Seller> {
        record(SELLER, Op::Update, self.modify(id, patch).await)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Id) -> Result<()> {
        record(SELLER, Op::Delete, self.remove(id).await)
    }

    async fn insert(&self, seller: Seller) -> Result<Seller> {
        validate(&seller)?;
        ensure_unique(
            self.store.find_seller_by_cid(seller.cid).await,
            |found| found.id,
            seller.id,
            CID_TAKEN,
        )?;
        self.check_references(&seller).await?;

        let seller = self
            .store
            .save_seller(seller)
            .await
            .map_err(|e| write_failed(e, CID_TAKEN))?;
        tracing::info!(seller_id = seller.id, cid = seller.cid, "seller created");
        Ok(seller)
    }

    async fn modify(&self, id: Id, patch: SellerPatch) -> Result<Seller> {
        let mut seller = self.store.find_seller(id).await?;
        let prior_cid = seller.cid;
        patch.apply(&mut seller);

        validate(&seller)?;
        if seller.cid != prior_cid {
            ensure_unique(
                self.store.find_seller_by_cid(seller.cid).await,
                |found| found.id,
                id,
                CID_TAKEN,
            )?;
        }
        self.check_references(&seller).await?;

        self.store
            .update_seller(&seller)
            .await
            .map_err(|e| write_failed(e, CID_TAKEN))?;
        Ok(seller)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.store.find_seller(id).await?;
        self.store.delete_seller(id).await?;
        Ok(())
    }

    async fn check_references(&self, seller: &Seller) -> Result<()> {
        self.store.find_locality(seller.locality_id).await?;
        Ok(())
    }
}

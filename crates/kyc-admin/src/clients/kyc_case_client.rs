//! # KYC Case Client
//!
//! CRUD for `api/kyc-cases` and the criteria queries the case screens use.
use crate::model::{KycCase, KycStatus};
use resource_framework::{EntityClient, EntityId, RequestOptions, SortState};
use tracing::{debug, instrument};

entity_client!(KycCase);

impl KycCaseClient {
    /// Cases in `status`, ordered by `sort`.
    #[instrument(skip(self))]
    pub async fn by_status(
        &self,
        status: KycStatus,
        sort: &SortState,
    ) -> Result<Vec<KycCase>, KycCaseError> {
        let options = RequestOptions::new()
            .sort(sort)
            .param("status.equals", status.as_str());
        let cases = self.query(&options).await?.items;
        debug!(count = cases.len(), "Cases by status");
        Ok(cases)
    }

    #[instrument(skip(self))]
    pub async fn for_customer(&self, customer_id: EntityId) -> Result<Vec<KycCase>, KycCaseError> {
        let options = RequestOptions::new().param("customerId.equals", customer_id.to_string());
        Ok(self.query(&options).await?.items)
    }

    /// Number of cases in `status`.
    #[instrument(skip(self))]
    pub async fn count_by_status(&self, status: KycStatus) -> Result<u64, KycCaseError> {
        let options = RequestOptions::new().param("status.equals", status.as_str());
        self.count(&options).await
    }
}

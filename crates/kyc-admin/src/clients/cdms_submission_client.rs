use crate::model::CdmsSubmission;
use resource_framework::{EntityClient, EntityId, RequestOptions};
use tracing::instrument;

entity_client!(CdmsSubmission);

impl CdmsSubmissionClient {
    /// Options for the submissions a case can still pick.
    pub fn unassigned_options() -> RequestOptions {
        RequestOptions::new().specified("kycCaseId", false)
    }

    /// Submissions not yet linked to any KYC case.
    #[instrument(skip(self))]
    pub async fn unassigned(&self) -> Result<Vec<CdmsSubmission>, CdmsSubmissionError> {
        Ok(self.query(&Self::unassigned_options()).await?.items)
    }

    /// The submission linked to `kyc_case_id`, if any.
    #[instrument(skip(self))]
    pub async fn for_case(
        &self,
        kyc_case_id: EntityId,
    ) -> Result<Option<CdmsSubmission>, CdmsSubmissionError> {
        let options = RequestOptions::new().param("kycCaseId.equals", kyc_case_id.to_string());
        Ok(self.query(&options).await?.items.into_iter().next())
    }
}

use crate::model::KycConsent;
use resource_framework::{EntityClient, RequestOptions};
use tracing::instrument;

entity_client!(KycConsent);

/// Backend filter for consents not yet linked to a case.
pub const UNASSIGNED_CONSENTS_FILTER: &str = "kyccase-is-null";

impl KycConsentClient {
    /// Options for the consents a case can still pick.
    pub fn unassigned_options() -> RequestOptions {
        RequestOptions::new().filter(UNASSIGNED_CONSENTS_FILTER)
    }

    /// Consents not yet linked to any KYC case.
    #[instrument(skip(self))]
    pub async fn unassigned(&self) -> Result<Vec<KycConsent>, KycConsentError> {
        Ok(self.query(&Self::unassigned_options()).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn unassigned_uses_the_named_filter() {
        let mock = MockTransport::new();
        mock.expect_get("api/kyc-consents")
            .return_json(json!([{ "id": 3, "consented": true }]));
        let client = KycConsentClient::new(mock.client());

        let consents = client.unassigned().await.unwrap();

        assert_eq!(consents[0].consented, Some(true));
        assert_eq!(
            mock.requests()[0].query,
            vec![("filter".to_string(), "kyccase-is-null".to_string())]
        );
    }
}

//! # Customer Client
//!
//! CRUD for `api/customers` plus the `customerRef` criteria lookup.
use crate::model::Customer;
use resource_framework::{EntityClient, RequestOptions};
use tracing::{debug, instrument};

entity_client!(Customer);

impl CustomerClient {
    /// Looks a customer up by its `FGR-CUST-` reference.
    #[instrument(skip(self))]
    pub async fn find_by_ref(&self, customer_ref: &str) -> Result<Option<Customer>, CustomerError> {
        debug!("Sending request");
        let options = RequestOptions::new().param("customerRef.equals", customer_ref);
        let page = self.query(&options).await?;
        Ok(page.items.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use resource_framework::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn find_by_ref_filters_on_the_reference() {
        let mock = MockTransport::new();
        mock.expect_get("api/customers")
            .return_json(json!([{ "id": 5, "customerRef": "FGR-CUST-00000005" }]));
        let client = CustomerClient::new(mock.client());

        let found = client.find_by_ref("FGR-CUST-00000005").await.unwrap();

        assert_eq!(found.and_then(|c| c.id), Some(5));
        assert_eq!(
            mock.requests()[0].query,
            vec![(
                "customerRef.equals".to_string(),
                "FGR-CUST-00000005".to_string()
            )]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn unknown_reference_is_none() {
        let mock = MockTransport::new();
        mock.expect_get("api/customers").return_json(json!([]));
        let client = CustomerClient::new(mock.client());

        assert_matches!(client.find_by_ref("FGR-CUST-99999999").await, Ok(None));
    }

    #[tokio::test]
    async fn backend_rejection_keeps_the_status() {
        let mock = MockTransport::new();
        mock.expect_post("api/customers").return_status(400);
        let client = CustomerClient::new(mock.client());

        let result = client.create(&Customer::default()).await;

        assert_matches!(result, Err(CustomerError::Status { status: 400, .. }));
    }
}

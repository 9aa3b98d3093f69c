use crate::model::CustomerIdentifier;
use resource_framework::{EntityClient, EntityId, RequestOptions};
use tracing::instrument;

entity_client!(CustomerIdentifier);

impl CustomerIdentifierClient {
    /// Every identifier registered for `customer_id`.
    #[instrument(skip(self))]
    pub async fn for_customer(
        &self,
        customer_id: EntityId,
    ) -> Result<Vec<CustomerIdentifier>, CustomerIdentifierError> {
        let options = RequestOptions::new().param("customerId.equals", customer_id.to_string());
        Ok(self.query(&options).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentifierType;
    use resource_framework::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn for_customer_sends_the_customer_criteria() {
        let mock = MockTransport::new();
        mock.expect_get("api/customer-identifiers").return_json(json!([
            { "id": 1, "identifierType": "EMAIL", "customer": { "id": 9 } },
            { "id": 2, "identifierType": "PHONE_NUMBER", "customer": { "id": 9 } }
        ]));
        let client = CustomerIdentifierClient::new(mock.client());

        let identifiers = client.for_customer(9).await.unwrap();

        assert_eq!(identifiers.len(), 2);
        assert_eq!(identifiers[0].identifier_type, Some(IdentifierType::Email));
        assert_eq!(
            mock.requests()[0].query,
            vec![("customerId.equals".to_string(), "9".to_string())]
        );
    }
}

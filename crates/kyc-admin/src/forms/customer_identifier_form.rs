use super::selected;
use crate::clients::KycClients;
use crate::model::{ChannelType, Customer, CustomerIdentifier, IdentifierType};
use async_trait::async_trait;
use resource_framework::edit::{format_date_time, form_now, load_relationship, parse_date_time};
use resource_framework::{
    Constraint, EntityClient, EntityId, FieldRule, FormModel, FrameworkError, RequestOptions,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentifierForm {
    pub id: Option<EntityId>,
    pub identifier_type: Option<IdentifierType>,
    pub identifier_value: Option<String>,
    pub channel: Option<ChannelType>,
    pub verified: Option<bool>,
    pub is_primary: Option<bool>,
    pub created_at: Option<String>,
    pub verified_at: Option<String>,
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerIdentifierOptions {
    pub customers: Vec<Customer>,
}

#[async_trait]
impl FormModel for CustomerIdentifierForm {
    type Entity = CustomerIdentifier;
    type Options = CustomerIdentifierOptions;
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new("identifierType", &[Constraint::Required]),
        FieldRule::new(
            "identifierValue",
            &[Constraint::Required, Constraint::MaxLength(255)],
        ),
        FieldRule::new("channel", &[Constraint::Required]),
        FieldRule::new("verified", &[Constraint::Required]),
        FieldRule::new("createdAt", &[Constraint::Required]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            identifier_type: None,
            identifier_value: None,
            channel: None,
            verified: Some(false),
            is_primary: Some(false),
            created_at: Some(now.clone()),
            verified_at: Some(now),
            customer: None,
        }
    }

    fn from_entity(identifier: &CustomerIdentifier) -> Self {
        Self {
            id: identifier.id,
            identifier_type: identifier.identifier_type,
            identifier_value: identifier.identifier_value.clone(),
            channel: identifier.channel,
            verified: identifier.verified,
            is_primary: identifier.is_primary,
            created_at: format_date_time(identifier.created_at),
            verified_at: format_date_time(identifier.verified_at),
            customer: identifier.customer.clone(),
        }
    }

    fn to_entity(&self) -> Result<CustomerIdentifier, FrameworkError> {
        Ok(CustomerIdentifier {
            id: self.id,
            identifier_type: self.identifier_type,
            identifier_value: self.identifier_value.clone(),
            channel: self.channel,
            verified: self.verified,
            is_primary: self.is_primary,
            created_at: parse_date_time("createdAt", self.created_at.as_deref())?,
            verified_at: parse_date_time("verifiedAt", self.verified_at.as_deref())?,
            customer: self.customer.clone(),
        })
    }

    fn seed_options(&self) -> CustomerIdentifierOptions {
        CustomerIdentifierOptions {
            customers: selected(&self.customer),
        }
    }

    async fn load_options(
        &self,
        clients: &KycClients,
    ) -> Result<CustomerIdentifierOptions, FrameworkError> {
        let customers = load_relationship(
            clients.customers.inner(),
            &RequestOptions::new(),
            self.customer.clone(),
        )
        .await?;
        Ok(CustomerIdentifierOptions { customers })
    }
}

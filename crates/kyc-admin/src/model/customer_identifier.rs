use crate::model::{ChannelType, Customer, IdentifierType};
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// A handle a customer can be reached or recognized by (phone, e-mail, passport, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentifier {
    pub id: Option<EntityId>,
    pub identifier_type: Option<IdentifierType>,
    pub identifier_value: Option<String>,
    pub channel: Option<ChannelType>,
    pub verified: Option<bool>,
    pub is_primary: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub customer: Option<Customer>,
}

patch!(CustomerIdentifierPatch {
    identifier_type: IdentifierType,
    identifier_value: String,
    channel: ChannelType,
    verified: bool,
    is_primary: bool,
    created_at: DateTime<Utc>,
    verified_at: DateTime<Utc>,
    customer: Customer,
});

impl Identified for CustomerIdentifier {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for CustomerIdentifier {
    const RESOURCE: &'static str = "api/customer-identifiers";
    const NAME: &'static str = "CustomerIdentifier";
    type Patch = CustomerIdentifierPatch;
}

impl Sortable for CustomerIdentifier {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "identifierType" => self.identifier_type.map(|t| t.as_str()).into(),
            "identifierValue" => self.identifier_value.as_ref().into(),
            "channel" => self.channel.map(|c| c.as_str()).into(),
            "verified" => self.verified.into(),
            "isPrimary" => self.is_primary.into(),
            "createdAt" => self.created_at.into(),
            "verifiedAt" => self.verified_at.into(),
            "customer.id" => self.customer.as_ref().and_then(|c| c.id).into(),
            _ => SortKey::Absent,
        }
    }
}

use crate::model::ChannelType;
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// The customer's recorded agreement to KYC processing. Linked one-to-one to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycConsent {
    pub id: Option<EntityId>,
    pub consent_text: Option<String>,
    pub consented: Option<bool>,
    pub consented_at: Option<DateTime<Utc>>,
    pub channel: Option<ChannelType>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub consent_version: Option<String>,
}

impl KycConsent {
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

patch!(KycConsentPatch {
    consent_text: String,
    consented: bool,
    consented_at: DateTime<Utc>,
    channel: ChannelType,
    ip_address: String,
    user_agent: String,
    consent_version: String,
});

impl Identified for KycConsent {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for KycConsent {
    const RESOURCE: &'static str = "api/kyc-consents";
    const NAME: &'static str = "KycConsent";
    type Patch = KycConsentPatch;
}

impl Sortable for KycConsent {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "consentText" => self.consent_text.as_ref().into(),
            "consented" => self.consented.into(),
            "consentedAt" => self.consented_at.into(),
            "channel" => self.channel.map(|c| c.as_str()).into(),
            "ipAddress" => self.ip_address.as_ref().into(),
            "userAgent" => self.user_agent.as_ref().into(),
            "consentVersion" => self.consent_version.as_ref().into(),
            _ => SortKey::Absent,
        }
    }
}

use crate::model::{KycCase, NotificationType};
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// A message sent to the customer about their case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycNotification {
    pub id: Option<EntityId>,
    pub notification_type: Option<NotificationType>,
    pub message: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered: Option<bool>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub kyc_case: Option<KycCase>,
}

patch!(KycNotificationPatch {
    notification_type: NotificationType,
    message: String,
    sent_at: DateTime<Utc>,
    delivered: bool,
    delivered_at: DateTime<Utc>,
    error_message: String,
    kyc_case: KycCase,
});

impl Identified for KycNotification {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for KycNotification {
    const RESOURCE: &'static str = "api/kyc-notifications";
    const NAME: &'static str = "KycNotification";
    type Patch = KycNotificationPatch;
}

impl Sortable for KycNotification {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "notificationType" => self.notification_type.map(|t| t.as_str()).into(),
            "message" => self.message.as_ref().into(),
            "sentAt" => self.sent_at.into(),
            "delivered" => self.delivered.into(),
            "deliveredAt" => self.delivered_at.into(),
            "errorMessage" => self.error_message.as_ref().into(),
            "kycCase.id" => self.kyc_case.as_ref().and_then(|c| c.id).into(),
            _ => SortKey::Absent,
        }
    }
}

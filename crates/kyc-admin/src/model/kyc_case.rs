use crate::model::{CdmsSubmission, ChannelType, Customer, KycConsent, KycStatus};
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// A customer's KYC case.
///
/// `consent` and `submission` are one-to-one: a consent or submission belongs to at
/// most one case, which is why their pickers only offer unassigned records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycCase {
    pub id: Option<EntityId>,
    /// `FGR` + eight digits + `-` + three digits.
    pub kyc_ref: Option<String>,
    pub status: Option<KycStatus>,
    pub channel: Option<ChannelType>,
    pub started_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub validation_errors: Option<String>,
    pub internal_notes: Option<String>,
    pub consent: Option<KycConsent>,
    pub submission: Option<CdmsSubmission>,
    pub customer: Option<Customer>,
}

impl KycCase {
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

patch!(KycCasePatch {
    kyc_ref: String,
    status: KycStatus,
    channel: ChannelType,
    started_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    validation_errors: String,
    internal_notes: String,
    consent: KycConsent,
    submission: CdmsSubmission,
    customer: Customer,
});

impl Identified for KycCase {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for KycCase {
    const RESOURCE: &'static str = "api/kyc-cases";
    const NAME: &'static str = "KycCase";
    type Patch = KycCasePatch;
}

impl Sortable for KycCase {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "kycRef" => self.kyc_ref.as_ref().into(),
            "status" => self.status.map(|s| s.as_str()).into(),
            "channel" => self.channel.map(|c| c.as_str()).into(),
            "startedAt" => self.started_at.into(),
            "lastActivityAt" => self.last_activity_at.into(),
            "lastUpdatedAt" => self.last_updated_at.into(),
            "completedAt" => self.completed_at.into(),
            "expiresAt" => self.expires_at.into(),
            "validationErrors" => self.validation_errors.as_ref().into(),
            "internalNotes" => self.internal_notes.as_ref().into(),
            "consent.id" => self.consent.as_ref().and_then(|c| c.id).into(),
            "submission.id" => self.submission.as_ref().and_then(|s| s.id).into(),
            "customer.id" => self.customer.as_ref().and_then(|c| c.id).into(),
            _ => SortKey::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::sort::apply_sort;
    use resource_framework::{SortOrder, SortState};
    use serde_json::json;

    #[test]
    fn nested_references_decode_from_bare_ids() {
        let case: KycCase = serde_json::from_value(json!({
            "id": 1342,
            "status": "APPROVED",
            "consent": { "id": 7 },
            "customer": { "id": 3, "fullName": "Tendai Moyo" }
        }))
        .unwrap();

        assert_eq!(case.consent, Some(KycConsent::reference(7)));
        assert_eq!(case.submission, None);
        assert_eq!(
            case.customer.and_then(|c| c.full_name).as_deref(),
            Some("Tendai Moyo")
        );
    }

    #[test]
    fn sorts_by_status_then_keeps_backend_order_for_ties() {
        let case = |id, status| KycCase {
            id: Some(id),
            status: Some(status),
            ..Default::default()
        };
        let mut cases = vec![
            case(1, KycStatus::Approved),
            case(2, KycStatus::Started),
            case(3, KycStatus::Approved),
        ];

        apply_sort(&mut cases, &SortState::new("status", SortOrder::Desc));

        let ids: Vec<_> = cases.iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }
}

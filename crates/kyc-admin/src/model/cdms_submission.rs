use crate::model::SubmissionStatus;
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// One push of a completed case to the CDMS, with its retry bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdmsSubmission {
    pub id: Option<EntityId>,
    pub submission_ref: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    /// 0..=3
    pub attempts: Option<i32>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub cdms_customer_id: Option<String>,
}

impl CdmsSubmission {
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

patch!(CdmsSubmissionPatch {
    submission_ref: String,
    status: SubmissionStatus,
    response_code: String,
    response_message: String,
    attempts: i32,
    submitted_at: DateTime<Utc>,
    last_attempt_at: DateTime<Utc>,
    next_retry_at: DateTime<Utc>,
    cdms_customer_id: String,
});

impl Identified for CdmsSubmission {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for CdmsSubmission {
    const RESOURCE: &'static str = "api/cdms-submissions";
    const NAME: &'static str = "CdmsSubmission";
    type Patch = CdmsSubmissionPatch;
}

impl Sortable for CdmsSubmission {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "submissionRef" => self.submission_ref.as_ref().into(),
            "status" => self.status.map(|s| s.as_str()).into(),
            "responseCode" => self.response_code.as_ref().into(),
            "responseMessage" => self.response_message.as_ref().into(),
            "attempts" => self.attempts.into(),
            "submittedAt" => self.submitted_at.into(),
            "lastAttemptAt" => self.last_attempt_at.into(),
            "nextRetryAt" => self.next_retry_at.into(),
            "cdmsCustomerId" => self.cdms_customer_id.as_ref().into(),
            _ => SortKey::Absent,
        }
    }
}

use crate::clients::KycClients;
use crate::model::{CdmsSubmission, SubmissionStatus};
use resource_framework::edit::{format_date_time, form_now, parse_date_time};
use resource_framework::{Constraint, EntityId, FieldRule, FormModel, FrameworkError};
use serde::Serialize;

/// Retries the backend allows before a submission is left as failed.
pub const MAX_SUBMISSION_ATTEMPTS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CdmsSubmissionForm {
    pub id: Option<EntityId>,
    pub submission_ref: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub response_code: Option<String>,
    pub response_message: Option<String>,
    pub attempts: Option<i32>,
    pub submitted_at: Option<String>,
    pub last_attempt_at: Option<String>,
    pub next_retry_at: Option<String>,
    pub cdms_customer_id: Option<String>,
}

impl FormModel for CdmsSubmissionForm {
    type Entity = CdmsSubmission;
    type Options = ();
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new("submissionRef", &[Constraint::Required]),
        FieldRule::new("status", &[Constraint::Required]),
        FieldRule::new("responseCode", &[Constraint::MaxLength(50)]),
        FieldRule::new("responseMessage", &[Constraint::MaxLength(1000)]),
        FieldRule::new(
            "attempts",
            &[
                Constraint::Required,
                Constraint::Min(0),
                Constraint::Max(MAX_SUBMISSION_ATTEMPTS),
            ],
        ),
        FieldRule::new("cdmsCustomerId", &[Constraint::MaxLength(100)]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            submission_ref: None,
            status: None,
            response_code: None,
            response_message: None,
            attempts: None,
            submitted_at: Some(now.clone()),
            last_attempt_at: Some(now.clone()),
            next_retry_at: Some(now),
            cdms_customer_id: None,
        }
    }

    fn from_entity(submission: &CdmsSubmission) -> Self {
        Self {
            id: submission.id,
            submission_ref: submission.submission_ref.clone(),
            status: submission.status,
            response_code: submission.response_code.clone(),
            response_message: submission.response_message.clone(),
            attempts: submission.attempts,
            submitted_at: format_date_time(submission.submitted_at),
            last_attempt_at: format_date_time(submission.last_attempt_at),
            next_retry_at: format_date_time(submission.next_retry_at),
            cdms_customer_id: submission.cdms_customer_id.clone(),
        }
    }

    fn to_entity(&self) -> Result<CdmsSubmission, FrameworkError> {
        Ok(CdmsSubmission {
            id: self.id,
            submission_ref: self.submission_ref.clone(),
            status: self.status,
            response_code: self.response_code.clone(),
            response_message: self.response_message.clone(),
            attempts: self.attempts,
            submitted_at: parse_date_time("submittedAt", self.submitted_at.as_deref())?,
            last_attempt_at: parse_date_time("lastAttemptAt", self.last_attempt_at.as_deref())?,
            next_retry_at: parse_date_time("nextRetryAt", self.next_retry_at.as_deref())?,
            cdms_customer_id: self.cdms_customer_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::validation::validate;

    #[test]
    fn attempts_are_bounded() {
        let mut form = CdmsSubmissionForm {
            submission_ref: Some("SUB-1".to_string()),
            status: Some(SubmissionStatus::Failed),
            attempts: Some(3),
            ..CdmsSubmissionForm::defaults()
        };
        let report = validate(CdmsSubmissionForm::RULES, &serde_json::to_value(&form).unwrap());
        assert!(report.is_valid(), "{report}");

        form.attempts = Some(4);
        let report = validate(CdmsSubmissionForm::RULES, &serde_json::to_value(&form).unwrap());
        assert_eq!(report.for_field("attempts").count(), 1);

        form.attempts = None;
        let report = validate(CdmsSubmissionForm::RULES, &serde_json::to_value(&form).unwrap());
        assert!(!report.is_valid());
    }
}

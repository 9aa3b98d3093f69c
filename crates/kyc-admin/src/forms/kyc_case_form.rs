//! # KYC Case Form
//!
//! The case editor links three other records. Consent and submission are
//! one-to-one, so their pickers only offer records no other case holds yet, plus
//! whatever this case already references. The two text blobs can be filled from a
//! file.

use super::{read_text_blob, selected};
use crate::clients::{CdmsSubmissionClient, KycClients, KycConsentClient};
use crate::model::{CdmsSubmission, ChannelType, Customer, KycCase, KycConsent, KycStatus};
use async_trait::async_trait;
use resource_framework::edit::{format_date_time, form_now, load_relationship, parse_date_time};
use resource_framework::{
    Constraint, EntityClient, EntityId, EventManager, FieldRule, FileLoader, FormModel,
    FrameworkError, RequestOptions,
};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycCaseForm {
    pub id: Option<EntityId>,
    pub kyc_ref: Option<String>,
    pub status: Option<KycStatus>,
    pub channel: Option<ChannelType>,
    pub started_at: Option<String>,
    pub last_activity_at: Option<String>,
    pub last_updated_at: Option<String>,
    pub completed_at: Option<String>,
    pub expires_at: Option<String>,
    pub validation_errors: Option<String>,
    pub internal_notes: Option<String>,
    pub consent: Option<KycConsent>,
    pub submission: Option<CdmsSubmission>,
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Default)]
pub struct KycCaseOptions {
    pub consents: Vec<KycConsent>,
    pub submissions: Vec<CdmsSubmission>,
    pub customers: Vec<Customer>,
}

/// Text-blob fields of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTextField {
    ValidationErrors,
    InternalNotes,
}

impl CaseTextField {
    pub fn name(self) -> &'static str {
        match self {
            CaseTextField::ValidationErrors => "validationErrors",
            CaseTextField::InternalNotes => "internalNotes",
        }
    }
}

impl KycCaseForm {
    /// Replaces a text blob with the content of `path`. Returns whether it did.
    pub async fn set_file_data(
        &mut self,
        field: CaseTextField,
        path: impl AsRef<Path>,
        loader: &FileLoader,
        events: &EventManager,
    ) -> bool {
        let Some(text) = read_text_blob(path.as_ref(), field.name(), loader, events).await else {
            return false;
        };
        debug!(field = field.name(), len = text.len(), "Text blob loaded");
        match field {
            CaseTextField::ValidationErrors => self.validation_errors = Some(text),
            CaseTextField::InternalNotes => self.internal_notes = Some(text),
        }
        true
    }
}

#[async_trait]
impl FormModel for KycCaseForm {
    type Entity = KycCase;
    type Options = KycCaseOptions;
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new(
            "kycRef",
            &[Constraint::Required, Constraint::Pattern(r"^FGR[0-9]{8}-[0-9]{3}$")],
        ),
        FieldRule::new("status", &[Constraint::Required]),
        FieldRule::new("channel", &[Constraint::Required]),
        FieldRule::new("startedAt", &[Constraint::Required]),
        FieldRule::new("lastActivityAt", &[Constraint::Required]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            kyc_ref: None,
            status: None,
            channel: None,
            started_at: Some(now.clone()),
            last_activity_at: Some(now.clone()),
            last_updated_at: Some(now.clone()),
            completed_at: Some(now.clone()),
            expires_at: Some(now),
            validation_errors: None,
            internal_notes: None,
            consent: None,
            submission: None,
            customer: None,
        }
    }

    fn from_entity(case: &KycCase) -> Self {
        Self {
            id: case.id,
            kyc_ref: case.kyc_ref.clone(),
            status: case.status,
            channel: case.channel,
            started_at: format_date_time(case.started_at),
            last_activity_at: format_date_time(case.last_activity_at),
            last_updated_at: format_date_time(case.last_updated_at),
            completed_at: format_date_time(case.completed_at),
            expires_at: format_date_time(case.expires_at),
            validation_errors: case.validation_errors.clone(),
            internal_notes: case.internal_notes.clone(),
            consent: case.consent.clone(),
            submission: case.submission.clone(),
            customer: case.customer.clone(),
        }
    }

    fn to_entity(&self) -> Result<KycCase, FrameworkError> {
        Ok(KycCase {
            id: self.id,
            kyc_ref: self.kyc_ref.clone(),
            status: self.status,
            channel: self.channel,
            started_at: parse_date_time("startedAt", self.started_at.as_deref())?,
            last_activity_at: parse_date_time("lastActivityAt", self.last_activity_at.as_deref())?,
            last_updated_at: parse_date_time("lastUpdatedAt", self.last_updated_at.as_deref())?,
            completed_at: parse_date_time("completedAt", self.completed_at.as_deref())?,
            expires_at: parse_date_time("expiresAt", self.expires_at.as_deref())?,
            validation_errors: self.validation_errors.clone(),
            internal_notes: self.internal_notes.clone(),
            consent: self.consent.clone(),
            submission: self.submission.clone(),
            customer: self.customer.clone(),
        })
    }

    fn seed_options(&self) -> KycCaseOptions {
        KycCaseOptions {
            consents: selected(&self.consent),
            submissions: selected(&self.submission),
            customers: selected(&self.customer),
        }
    }

    async fn load_options(&self, clients: &KycClients) -> Result<KycCaseOptions, FrameworkError> {
        let consents = load_relationship(
            clients.kyc_consents.inner(),
            &KycConsentClient::unassigned_options(),
            self.consent.clone(),
        )
        .await?;
        let submissions = load_relationship(
            clients.cdms_submissions.inner(),
            &CdmsSubmissionClient::unassigned_options(),
            self.submission.clone(),
        )
        .await?;
        let customers = load_relationship(
            clients.customers.inner(),
            &RequestOptions::new(),
            self.customer.clone(),
        )
        .await?;
        Ok(KycCaseOptions {
            consents,
            submissions,
            customers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::validation::validate;
    use resource_framework::{AppEvent, FileLoadError};
    use std::io::Write;

    #[test]
    fn defaults_seed_every_timestamp() {
        let form = KycCaseForm::defaults();
        let stamps = [
            &form.started_at,
            &form.last_activity_at,
            &form.last_updated_at,
            &form.completed_at,
            &form.expires_at,
        ];
        assert!(stamps.iter().all(|s| s.is_some()));
        assert!(form.consent.is_none());
    }

    #[test]
    fn case_reference_pattern() {
        let mut form = KycCaseForm {
            kyc_ref: Some("FGR20240101-001".to_string()),
            status: Some(KycStatus::Started),
            channel: Some(ChannelType::Whatsapp),
            ..KycCaseForm::defaults()
        };
        assert!(validate(KycCaseForm::RULES, &serde_json::to_value(&form).unwrap()).is_valid());

        form.kyc_ref = Some("FGR2024-1".to_string());
        let report = validate(KycCaseForm::RULES, &serde_json::to_value(&form).unwrap());
        assert_eq!(report.for_field("kycRef").count(), 1);
    }

    #[test]
    fn seed_options_hold_the_current_links() {
        let form = KycCaseForm {
            consent: Some(KycConsent::reference(4)),
            ..KycCaseForm::defaults()
        };
        let options = form.seed_options();
        assert_eq!(options.consents, vec![KycConsent::reference(4)]);
        assert!(options.submissions.is_empty());
    }

    #[tokio::test]
    async fn notes_are_loaded_from_a_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"called customer, awaiting ID").unwrap();
        let events = EventManager::default();
        let mut form = KycCaseForm::defaults();

        let loaded = form
            .set_file_data(CaseTextField::InternalNotes, file.path(), &FileLoader::new(1024), &events)
            .await;

        assert!(loaded);
        assert_eq!(form.internal_notes.as_deref(), Some("called customer, awaiting ID"));
    }

    #[tokio::test]
    async fn oversized_file_leaves_the_field_and_reports() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(&[b'x'; 64]).unwrap();
        let events = EventManager::default();
        let mut failures = events.subscribe();
        let mut form = KycCaseForm::defaults();

        let loaded = form
            .set_file_data(CaseTextField::ValidationErrors, file.path(), &FileLoader::new(8), &events)
            .await;

        assert!(!loaded);
        assert_eq!(form.validation_errors, None);
        let AppEvent::FileLoadFailed { field, key, .. } = failures.recv().await.unwrap();
        assert_eq!(field, "validationErrors");
        assert_eq!(key, FileLoadError::TooLarge { size: 64, max: 8 }.key());
    }
}

//! # Create/Edit Controller
//!
//! Drives one form: builds the snapshot from an entity (or defaults), loads the
//! relationship options its selects need, validates and dispatches the save.
//!
//! ## FormModel
//!
//! A [`FormModel`] is the editable view of an entity. Date-times are held as
//! `YYYY-MM-DDTHH:MM` strings the way a `datetime-local` input reports them, so the
//! conversion back ([`FormModel::to_entity`]) can fail with
//! [`FrameworkError::FormValue`].

use crate::client::ResourceClient;
use crate::entity::{Identified, RestEntity};
use crate::error::FrameworkError;
use crate::query::RequestOptions;
use crate::reconcile::add_to_collection_if_missing;
use crate::route::Navigator;
use crate::validation::{validate, FieldRule, ValidationReport};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// `chrono` format of a date-time form value. Form values carry no offset and are
/// read and written as UTC, not as the machine's local time.
pub const FORM_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Formats a wire date-time for a form field, in UTC.
pub fn format_date_time(value: Option<DateTime<Utc>>) -> Option<String> {
    value.map(|v| v.format(FORM_DATE_TIME_FORMAT).to_string())
}

/// Parses a form field back into a date-time, taking it as UTC. Blank means absent.
pub fn parse_date_time(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, FrameworkError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDateTime::parse_from_str(value, FORM_DATE_TIME_FORMAT)
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .map_err(|e| FrameworkError::FormValue {
            field,
            reason: e.to_string(),
        })
}

/// Like [`parse_date_time`] for a field that must be present after validation.
pub fn require_date_time(
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, FrameworkError> {
    parse_date_time(field, value)?.ok_or(FrameworkError::FormValue {
        field,
        reason: "missing".to_string(),
    })
}

/// The current time as a form value, used to seed new records.
pub fn form_now() -> String {
    Utc::now().format(FORM_DATE_TIME_FORMAT).to_string()
}

/// Fetches a relationship option list and makes sure `current` is in it.
///
/// One-to-one pickers query only unassigned records, so the record already linked
/// to the form would be missing without the merge.
pub async fn load_relationship<R: RestEntity>(
    client: &ResourceClient<R>,
    options: &RequestOptions,
    current: Option<R>,
) -> Result<Vec<R>, FrameworkError> {
    let page = client.query(options).await?;
    Ok(add_to_collection_if_missing(page.items, [current]))
}

/// The editable snapshot of one entity type.
#[async_trait]
pub trait FormModel: Serialize + Clone + Send + Sync + Sized + 'static {
    type Entity: RestEntity;

    /// Relationship option lists for the form's selects.
    type Options: Default + Clone + Send + Sync;

    /// Clients the option loaders need.
    type Context: Send + Sync;

    /// Constraints checked before any save.
    const RULES: &'static [FieldRule];

    /// Snapshot for a new record.
    fn defaults() -> Self;

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Converts the snapshot back into the wire model.
    fn to_entity(&self) -> Result<Self::Entity, FrameworkError>;

    /// Option lists containing only what the form currently references.
    fn seed_options(&self) -> Self::Options {
        Self::Options::default()
    }

    /// Fetches option lists from the backend, merged with the current references.
    async fn load_options(&self, _context: &Self::Context) -> Result<Self::Options, FrameworkError> {
        Ok(self.seed_options())
    }
}

pub struct EditController<F: FormModel> {
    client: ResourceClient<F::Entity>,
    navigator: Arc<dyn Navigator>,
    form: F,
    options: F::Options,
    is_saving: watch::Sender<bool>,
}

impl<F: FormModel> EditController<F> {
    /// Builds the form from `entity`, or from defaults when there is none.
    pub fn new(
        client: ResourceClient<F::Entity>,
        navigator: Arc<dyn Navigator>,
        entity: Option<&F::Entity>,
    ) -> Self {
        let form = entity.map_or_else(F::defaults, F::from_entity);
        let options = form.seed_options();
        let (is_saving, _) = watch::channel(false);
        Self {
            client,
            navigator,
            form,
            options,
            is_saving,
        }
    }

    /// `new` plus the relationship option load.
    pub async fn activate(
        client: ResourceClient<F::Entity>,
        navigator: Arc<dyn Navigator>,
        entity: Option<&F::Entity>,
        context: &F::Context,
    ) -> Result<Self, FrameworkError> {
        let mut controller = Self::new(client, navigator, entity);
        controller.load_options(context).await?;
        Ok(controller)
    }

    #[tracing::instrument(skip_all, fields(entity_type = <F::Entity as RestEntity>::NAME))]
    pub async fn load_options(&mut self, context: &F::Context) -> Result<(), FrameworkError> {
        match self.form.load_options(context).await {
            Ok(options) => {
                self.options = options;
                debug!("Relationship options loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Loading relationship options failed");
                Err(e)
            }
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn options(&self) -> &F::Options {
        &self.options
    }

    pub fn is_saving(&self) -> bool {
        *self.is_saving.borrow()
    }

    /// Receiver for the saving flag.
    pub fn saving(&self) -> watch::Receiver<bool> {
        self.is_saving.subscribe()
    }

    pub fn validate(&self) -> Result<ValidationReport, FrameworkError> {
        let snapshot = serde_json::to_value(&self.form)?;
        Ok(validate(F::RULES, &snapshot))
    }

    /// Validates, then creates or updates depending on the form's identity.
    ///
    /// Success navigates back exactly once. On failure the form is left as it was.
    #[tracing::instrument(skip_all, fields(entity_type = <F::Entity as RestEntity>::NAME))]
    pub async fn save(&mut self) -> Result<F::Entity, FrameworkError> {
        let report = self.validate()?;
        if !report.is_valid() {
            debug!(%report, "Form invalid");
            return Err(FrameworkError::Validation(report));
        }
        let entity = self.form.to_entity()?;

        self.is_saving.send_replace(true);
        let result = match entity.identity() {
            None => self.client.create(&entity).await,
            Some(_) => self.client.update(&entity).await,
        };
        self.is_saving.send_replace(false);

        match result {
            Ok(saved) => {
                info!(id = ?saved.identity(), "Saved");
                self.navigator.previous_state();
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                Err(e)
            }
        }
    }

    /// Leaves the form without saving.
    pub fn previous_state(&self) {
        self.navigator.previous_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{create_mock_transport, MockTransport, RecordingNavigator};
    use crate::transport::{ApiResponse, HttpMethod};
    use crate::validation::Constraint;
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Consent {
        id: Option<i64>,
        consent_text: String,
        consented_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize)]
    struct ConsentPatch {
        id: i64,
    }

    impl Identified for Consent {
        fn identity(&self) -> Option<i64> {
            self.id
        }
    }

    impl Identified for ConsentPatch {
        fn identity(&self) -> Option<i64> {
            Some(self.id)
        }
    }

    impl RestEntity for Consent {
        const RESOURCE: &'static str = "api/kyc-consents";
        const NAME: &'static str = "KycConsent";
        type Patch = ConsentPatch;
    }

    #[derive(Clone, Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ConsentForm {
        id: Option<i64>,
        consent_text: Option<String>,
        consented_at: Option<String>,
    }

    impl FormModel for ConsentForm {
        type Entity = Consent;
        type Options = ();
        type Context = ();

        const RULES: &'static [FieldRule] = &[
            FieldRule::new("consentText", &[Constraint::Required, Constraint::MaxLength(2000)]),
            FieldRule::new("consentedAt", &[Constraint::Required]),
        ];

        fn defaults() -> Self {
            Self {
                id: None,
                consent_text: None,
                consented_at: Some(form_now()),
            }
        }

        fn from_entity(entity: &Consent) -> Self {
            Self {
                id: entity.id,
                consent_text: Some(entity.consent_text.clone()),
                consented_at: format_date_time(Some(entity.consented_at)),
            }
        }

        fn to_entity(&self) -> Result<Consent, FrameworkError> {
            Ok(Consent {
                id: self.id,
                consent_text: self.consent_text.clone().unwrap_or_default(),
                consented_at: require_date_time("consentedAt", self.consented_at.as_deref())?,
            })
        }
    }

    fn consent(id: Option<i64>) -> Consent {
        Consent {
            id,
            consent_text: "I agree".to_string(),
            consented_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn date_time_form_format_round_trips_to_the_minute() {
        let value = format_date_time(Some(consent(None).consented_at));
        assert_eq!(value.as_deref(), Some("2024-03-01T09:30"));
        let parsed = parse_date_time("consentedAt", value.as_deref()).unwrap();
        assert_eq!(parsed, Some(consent(None).consented_at));
        assert_matches!(
            parse_date_time("consentedAt", Some("01/03/2024")),
            Err(FrameworkError::FormValue { field: "consentedAt", .. })
        );
    }

    #[test]
    fn form_date_times_are_utc() {
        let offset: DateTime<Utc> = "2024-03-01T11:30:00+02:00".parse().unwrap();
        assert_eq!(format_date_time(Some(offset)).as_deref(), Some("2024-03-01T09:30"));
        assert_eq!(
            parse_date_time("consentedAt", Some("2024-03-01T09:30")).unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn new_form_seeds_now_and_creates() {
        let mock = MockTransport::new();
        mock.expect_post("api/kyc-consents").return_json(json!({
            "id": 5, "consentText": "I agree", "consentedAt": "2024-03-01T09:30:00Z"
        }));
        let navigator = Arc::new(RecordingNavigator::new());
        let mut edit = EditController::<ConsentForm>::new(mock.client(), navigator.clone(), None);
        assert!(edit.form().consented_at.is_some());

        edit.form_mut().consent_text = Some("I agree".to_string());
        let saved = edit.save().await.unwrap();

        assert_eq!(saved.id, Some(5));
        assert_eq!(navigator.back_count(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn persisted_form_updates() {
        let mock = MockTransport::new();
        mock.expect_put("api/kyc-consents/123")
            .return_json(serde_json::to_value(consent(Some(123))).unwrap());
        let navigator = Arc::new(RecordingNavigator::new());
        let mut edit =
            EditController::<ConsentForm>::new(mock.client(), navigator.clone(), Some(&consent(Some(123))));

        edit.save().await.unwrap();

        assert_eq!(mock.count(HttpMethod::Put, "api/kyc-consents/123"), 1);
        assert_eq!(navigator.back_count(), 1);
    }

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        let mock = MockTransport::new();
        let navigator = Arc::new(RecordingNavigator::new());
        let mut edit = EditController::<ConsentForm>::new(mock.client(), navigator.clone(), None);

        let result = edit.save().await;

        assert_matches!(result, Err(FrameworkError::Validation(report)) if report.for_field("consentText").count() == 1);
        assert!(mock.requests().is_empty());
        assert!(!edit.is_saving());
        assert_eq!(navigator.back_count(), 0);
    }

    #[tokio::test]
    async fn saving_flag_is_raised_while_in_flight_and_cleared_on_error() {
        let (transport, mut requests) = create_mock_transport(4);
        let navigator = Arc::new(RecordingNavigator::new());
        let mut edit = EditController::<ConsentForm>::new(
            ResourceClient::new(transport),
            navigator.clone(),
            Some(&consent(Some(123))),
        );
        let mut saving = edit.saving();

        let save = tokio::spawn(async move {
            let result = edit.save().await;
            (result, edit)
        });

        let (request, respond_to) = requests.recv().await.unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert!(*saving.borrow_and_update());
        respond_to
            .send(Err(FrameworkError::Status {
                status: 500,
                body: String::new(),
            }))
            .unwrap();

        let (result, edit) = save.await.unwrap();
        assert_eq!(result.unwrap_err().status(), Some(500));
        assert!(!edit.is_saving());
        assert_eq!(edit.form().consent_text.as_deref(), Some("I agree"));
        assert_eq!(navigator.back_count(), 0);
    }

    #[tokio::test]
    async fn relationship_options_keep_the_current_value() {
        let mock = MockTransport::new();
        mock.expect_get("api/kyc-consents")
            .return_json(json!([serde_json::to_value(consent(Some(2))).unwrap()]));

        let client = mock.client::<Consent>();
        let options = load_relationship(
            &client,
            &RequestOptions::new().filter("kyccase-is-null"),
            Some(consent(Some(1))),
        )
        .await
        .unwrap();

        let ids: Vec<_> = options.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(
            mock.requests()[0].query,
            vec![("filter".to_string(), "kyccase-is-null".to_string())]
        );
    }

    #[tokio::test]
    async fn responder_ok_clears_flag_and_navigates_once() {
        let (transport, mut requests) = create_mock_transport(4);
        let navigator = Arc::new(RecordingNavigator::new());
        let mut edit =
            EditController::<ConsentForm>::new(ResourceClient::new(transport), navigator.clone(), None);
        edit.form_mut().consent_text = Some("I agree".to_string());

        let save = tokio::spawn(async move { (edit.save().await, edit) });
        let (_, respond_to) = requests.recv().await.unwrap();
        respond_to
            .send(Ok(ApiResponse::ok(serde_json::to_value(consent(Some(9))).unwrap())))
            .unwrap();

        let (result, edit) = save.await.unwrap();
        assert!(result.is_ok());
        assert!(!edit.is_saving());
        assert_eq!(navigator.back_count(), 1);
    }
}

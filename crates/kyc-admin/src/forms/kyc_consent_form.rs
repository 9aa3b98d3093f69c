use crate::clients::KycClients;
use crate::model::{ChannelType, KycConsent};
use resource_framework::edit::{format_date_time, form_now, parse_date_time};
use resource_framework::{Constraint, EntityId, FieldRule, FormModel, FrameworkError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycConsentForm {
    pub id: Option<EntityId>,
    pub consent_text: Option<String>,
    pub consented: Option<bool>,
    pub consented_at: Option<String>,
    pub channel: Option<ChannelType>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub consent_version: Option<String>,
}

impl FormModel for KycConsentForm {
    type Entity = KycConsent;
    type Options = ();
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new("consentText", &[Constraint::Required, Constraint::MaxLength(2000)]),
        FieldRule::new("consented", &[Constraint::Required]),
        FieldRule::new("consentedAt", &[Constraint::Required]),
        FieldRule::new("channel", &[Constraint::Required]),
        FieldRule::new("ipAddress", &[Constraint::MaxLength(45)]),
        FieldRule::new("userAgent", &[Constraint::MaxLength(500)]),
        FieldRule::new("consentVersion", &[Constraint::MaxLength(10)]),
    ];

    fn defaults() -> Self {
        Self {
            id: None,
            consent_text: None,
            consented: Some(false),
            consented_at: Some(form_now()),
            channel: None,
            ip_address: None,
            user_agent: None,
            consent_version: None,
        }
    }

    fn from_entity(consent: &KycConsent) -> Self {
        Self {
            id: consent.id,
            consent_text: consent.consent_text.clone(),
            consented: consent.consented,
            consented_at: format_date_time(consent.consented_at),
            channel: consent.channel,
            ip_address: consent.ip_address.clone(),
            user_agent: consent.user_agent.clone(),
            consent_version: consent.consent_version.clone(),
        }
    }

    fn to_entity(&self) -> Result<KycConsent, FrameworkError> {
        Ok(KycConsent {
            id: self.id,
            consent_text: self.consent_text.clone(),
            consented: self.consented,
            consented_at: parse_date_time("consentedAt", self.consented_at.as_deref())?,
            channel: self.channel,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
            consent_version: self.consent_version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_consent_is_not_yet_given() {
        let form = KycConsentForm::defaults();
        assert_eq!(form.consented, Some(false));
        assert!(form.consented_at.is_some());
    }

    #[test]
    fn edit_form_round_trips_to_the_minute() {
        let consent = KycConsent {
            id: Some(3),
            consent_text: Some("I agree to the processing of my data".to_string()),
            consented: Some(true),
            consented_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 15, 0).unwrap()),
            channel: Some(ChannelType::Ussd),
            ..Default::default()
        };

        let form = KycConsentForm::from_entity(&consent);

        assert_eq!(form.consented_at.as_deref(), Some("2024-06-01T08:15"));
        assert_eq!(form.to_entity().unwrap(), consent);
    }

    #[test]
    fn malformed_date_names_the_field() {
        let form = KycConsentForm {
            consented_at: Some("yesterday".to_string()),
            ..KycConsentForm::defaults()
        };
        assert_matches!(
            form.to_entity(),
            Err(FrameworkError::FormValue { field: "consentedAt", .. })
        );
    }
}

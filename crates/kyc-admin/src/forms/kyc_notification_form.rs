use super::selected;
use crate::clients::KycClients;
use crate::model::{KycCase, KycNotification, NotificationType};
use async_trait::async_trait;
use resource_framework::edit::{format_date_time, form_now, load_relationship, parse_date_time};
use resource_framework::{
    Constraint, EntityClient, EntityId, FieldRule, FormModel, FrameworkError, RequestOptions,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycNotificationForm {
    pub id: Option<EntityId>,
    pub notification_type: Option<NotificationType>,
    pub message: Option<String>,
    pub sent_at: Option<String>,
    pub delivered: Option<bool>,
    pub delivered_at: Option<String>,
    pub error_message: Option<String>,
    pub kyc_case: Option<KycCase>,
}

#[derive(Debug, Clone, Default)]
pub struct KycNotificationOptions {
    pub kyc_cases: Vec<KycCase>,
}

#[async_trait]
impl FormModel for KycNotificationForm {
    type Entity = KycNotification;
    type Options = KycNotificationOptions;
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new("notificationType", &[Constraint::Required]),
        FieldRule::new("message", &[Constraint::Required, Constraint::MaxLength(1000)]),
        FieldRule::new("sentAt", &[Constraint::Required]),
        FieldRule::new("errorMessage", &[Constraint::MaxLength(500)]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            notification_type: None,
            message: None,
            sent_at: Some(now.clone()),
            delivered: Some(false),
            delivered_at: Some(now),
            error_message: None,
            kyc_case: None,
        }
    }

    fn from_entity(notification: &KycNotification) -> Self {
        Self {
            id: notification.id,
            notification_type: notification.notification_type,
            message: notification.message.clone(),
            sent_at: format_date_time(notification.sent_at),
            delivered: notification.delivered,
            delivered_at: format_date_time(notification.delivered_at),
            error_message: notification.error_message.clone(),
            kyc_case: notification.kyc_case.clone(),
        }
    }

    fn to_entity(&self) -> Result<KycNotification, FrameworkError> {
        Ok(KycNotification {
            id: self.id,
            notification_type: self.notification_type,
            message: self.message.clone(),
            sent_at: parse_date_time("sentAt", self.sent_at.as_deref())?,
            delivered: self.delivered,
            delivered_at: parse_date_time("deliveredAt", self.delivered_at.as_deref())?,
            error_message: self.error_message.clone(),
            kyc_case: self.kyc_case.clone(),
        })
    }

    fn seed_options(&self) -> KycNotificationOptions {
        KycNotificationOptions {
            kyc_cases: selected(&self.kyc_case),
        }
    }

    async fn load_options(
        &self,
        clients: &KycClients,
    ) -> Result<KycNotificationOptions, FrameworkError> {
        let kyc_cases = load_relationship(
            clients.kyc_cases.inner(),
            &RequestOptions::new(),
            self.kyc_case.clone(),
        )
        .await?;
        Ok(KycNotificationOptions { kyc_cases })
    }
}

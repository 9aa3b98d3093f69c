use crate::model::KycNotification;

entity_client!(KycNotification);

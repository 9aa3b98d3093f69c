use crate::model::KycDocument;

entity_client!(KycDocument);

use super::{read_text_blob, selected};
use crate::clients::KycClients;
use crate::model::{DocumentType, KycCase, KycDocument};
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
pub struct KycDocumentForm {
    pub id: Option<EntityId>,
    pub document_type: Option<DocumentType>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub storage_path: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_at: Option<String>,
    pub expires_at: Option<String>,
    pub deleted: Option<bool>,
    pub deleted_at: Option<String>,
    pub metadata: Option<String>,
    pub checksum: Option<String>,
    pub kyc_case: Option<KycCase>,
}

#[derive(Debug, Clone, Default)]
pub struct KycDocumentOptions {
    pub kyc_cases: Vec<KycCase>,
}

impl KycDocumentForm {
    /// Describes the local file at `path`: name, content type, size and SHA-256.
    ///
    /// Storage path and document type stay with the operator. Returns whether the
    /// file could be read; failures are broadcast on `events`.
    pub async fn attach_file(
        &mut self,
        path: impl AsRef<Path>,
        loader: &FileLoader,
        events: &EventManager,
    ) -> bool {
        let Some(file) = loader.load_into(path, "fileName", events).await else {
            return false;
        };
        debug!(file_name = %file.file_name, size = file.size, "Document attached");
        self.file_name = Some(file.file_name);
        self.mime_type = Some(file.mime_type);
        self.file_size = i64::try_from(file.size).ok();
        self.checksum = Some(file.checksum);
        true
    }

    /// Replaces the metadata blob with the text content of `path`.
    pub async fn set_metadata_from_file(
        &mut self,
        path: impl AsRef<Path>,
        loader: &FileLoader,
        events: &EventManager,
    ) -> bool {
        match read_text_blob(path.as_ref(), "metadata", loader, events).await {
            Some(text) => {
                self.metadata = Some(text);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl FormModel for KycDocumentForm {
    type Entity = KycDocument;
    type Options = KycDocumentOptions;
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new("documentType", &[Constraint::Required]),
        FieldRule::new("fileName", &[Constraint::Required, Constraint::MaxLength(255)]),
        FieldRule::new("mimeType", &[Constraint::Required, Constraint::MaxLength(100)]),
        FieldRule::new("storagePath", &[Constraint::Required, Constraint::MaxLength(500)]),
        FieldRule::new("uploadedAt", &[Constraint::Required]),
        FieldRule::new("expiresAt", &[Constraint::Required]),
        FieldRule::new("checksum", &[Constraint::MaxLength(64)]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            document_type: None,
            file_name: None,
            mime_type: None,
            storage_path: None,
            file_size: None,
            uploaded_at: Some(now.clone()),
            expires_at: Some(now.clone()),
            deleted: Some(false),
            deleted_at: Some(now),
            metadata: None,
            checksum: None,
            kyc_case: None,
        }
    }

    fn from_entity(document: &KycDocument) -> Self {
        Self {
            id: document.id,
            document_type: document.document_type,
            file_name: document.file_name.clone(),
            mime_type: document.mime_type.clone(),
            storage_path: document.storage_path.clone(),
            file_size: document.file_size,
            uploaded_at: format_date_time(document.uploaded_at),
            expires_at: format_date_time(document.expires_at),
            deleted: document.deleted,
            deleted_at: format_date_time(document.deleted_at),
            metadata: document.metadata.clone(),
            checksum: document.checksum.clone(),
            kyc_case: document.kyc_case.clone(),
        }
    }

    fn to_entity(&self) -> Result<KycDocument, FrameworkError> {
        Ok(KycDocument {
            id: self.id,
            document_type: self.document_type,
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            storage_path: self.storage_path.clone(),
            file_size: self.file_size,
            uploaded_at: parse_date_time("uploadedAt", self.uploaded_at.as_deref())?,
            expires_at: parse_date_time("expiresAt", self.expires_at.as_deref())?,
            deleted: self.deleted,
            deleted_at: parse_date_time("deletedAt", self.deleted_at.as_deref())?,
            metadata: self.metadata.clone(),
            checksum: self.checksum.clone(),
            kyc_case: self.kyc_case.clone(),
        })
    }

    fn seed_options(&self) -> KycDocumentOptions {
        KycDocumentOptions {
            kyc_cases: selected(&self.kyc_case),
        }
    }

    async fn load_options(&self, clients: &KycClients) -> Result<KycDocumentOptions, FrameworkError> {
        let kyc_cases = load_relationship(
            clients.kyc_cases.inner(),
            &RequestOptions::new(),
            self.kyc_case.clone(),
        )
        .await?;
        Ok(KycDocumentOptions { kyc_cases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::file::sha256_hex;
    use resource_framework::AppEvent;
    use std::io::Write;

    #[tokio::test]
    async fn attaching_a_file_fills_its_description() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 scan").unwrap();
        let mut form = KycDocumentForm {
            storage_path: Some("/vault/scans".to_string()),
            ..KycDocumentForm::defaults()
        };

        let attached = form
            .attach_file(file.path(), &FileLoader::new(1024), &EventManager::default())
            .await;

        assert!(attached);
        assert_eq!(form.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(form.file_size, Some(13));
        assert_eq!(form.checksum, Some(sha256_hex(b"%PDF-1.4 scan")));
        assert_eq!(form.storage_path.as_deref(), Some("/vault/scans"));
    }

    #[tokio::test]
    async fn binary_metadata_is_refused() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        let events = EventManager::default();
        let mut failures = events.subscribe();
        let mut form = KycDocumentForm::defaults();

        let loaded = form
            .set_metadata_from_file(file.path(), &FileLoader::new(1024), &events)
            .await;

        assert!(!loaded);
        assert_eq!(form.metadata, None);
        let AppEvent::FileLoadFailed { field, key, .. } = failures.recv().await.unwrap();
        assert_eq!(field, "metadata");
        assert_eq!(key, crate::forms::NOT_TEXT_KEY);
    }
}

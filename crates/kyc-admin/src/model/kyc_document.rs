use crate::model::{DocumentType, KycCase};
use chrono::{DateTime, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// A document uploaded for a KYC case. Listed page by page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDocument {
    pub id: Option<EntityId>,
    pub document_type: Option<DocumentType>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub storage_path: Option<String>,
    pub file_size: Option<i64>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub deleted: Option<bool>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub metadata: Option<String>,
    /// SHA-256, lowercase hex.
    pub checksum: Option<String>,
    pub kyc_case: Option<KycCase>,
}

patch!(KycDocumentPatch {
    document_type: DocumentType,
    file_name: String,
    mime_type: String,
    storage_path: String,
    file_size: i64,
    uploaded_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    deleted: bool,
    deleted_at: DateTime<Utc>,
    metadata: String,
    checksum: String,
    kyc_case: KycCase,
});

impl Identified for KycDocument {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for KycDocument {
    const RESOURCE: &'static str = "api/kyc-documents";
    const NAME: &'static str = "KycDocument";
    type Patch = KycDocumentPatch;
}

impl Sortable for KycDocument {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "documentType" => self.document_type.map(|t| t.as_str()).into(),
            "fileName" => self.file_name.as_ref().into(),
            "mimeType" => self.mime_type.as_ref().into(),
            "storagePath" => self.storage_path.as_ref().into(),
            "fileSize" => self.file_size.into(),
            "uploadedAt" => self.uploaded_at.into(),
            "expiresAt" => self.expires_at.into(),
            "deleted" => self.deleted.into(),
            "deletedAt" => self.deleted_at.into(),
            "metadata" => self.metadata.as_ref().into(),
            "checksum" => self.checksum.as_ref().into(),
            "kycCase.id" => self.kyc_case.as_ref().and_then(|c| c.id).into(),
            _ => SortKey::Absent,
        }
    }
}

use crate::model::CustomerType;
use chrono::{DateTime, NaiveDate, Utc};
use resource_framework::{EntityId, Identified, RestEntity, SortKey, Sortable};
use serde::{Deserialize, Serialize};

/// A person or company going through KYC.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<EntityId>,
    /// `FGR-CUST-` followed by eight digits.
    pub customer_ref: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Identity-only reference, as nested in other records.
    pub fn reference(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }
}

patch!(CustomerPatch {
    customer_ref: String,
    customer_type: CustomerType,
    full_name: String,
    date_of_birth: NaiveDate,
    id_number: String,
    registration_number: String,
    address: String,
    phone_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
});

impl Identified for Customer {
    fn identity(&self) -> Option<EntityId> {
        self.id
    }
}

impl RestEntity for Customer {
    const RESOURCE: &'static str = "api/customers";
    const NAME: &'static str = "Customer";
    type Patch = CustomerPatch;
}

impl Sortable for Customer {
    fn sort_key(&self, field: &str) -> SortKey {
        match field {
            "id" => self.id.into(),
            "customerRef" => self.customer_ref.as_ref().into(),
            "customerType" => self.customer_type.map(|t| t.as_str()).into(),
            "fullName" => self.full_name.as_ref().into(),
            "dateOfBirth" => self.date_of_birth.into(),
            "idNumber" => self.id_number.as_ref().into(),
            "registrationNumber" => self.registration_number.as_ref().into(),
            "address" => self.address.as_ref().into(),
            "phoneNumber" => self.phone_number.as_ref().into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => SortKey::Absent,
        }
    }
}

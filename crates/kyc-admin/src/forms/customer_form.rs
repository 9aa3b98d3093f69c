use crate::clients::KycClients;
use crate::model::{Customer, CustomerType};
use chrono::NaiveDate;
use resource_framework::edit::{format_date_time, form_now, parse_date_time};
use resource_framework::{Constraint, EntityId, FieldRule, FormModel, FrameworkError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    pub id: Option<EntityId>,
    pub customer_ref: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
    pub registration_number: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl FormModel for CustomerForm {
    type Entity = Customer;
    type Options = ();
    type Context = KycClients;

    const RULES: &'static [FieldRule] = &[
        FieldRule::new(
            "customerRef",
            &[Constraint::Required, Constraint::Pattern(r"^FGR-CUST-[0-9]{8}$")],
        ),
        FieldRule::new("customerType", &[Constraint::Required]),
        FieldRule::new("fullName", &[Constraint::Required, Constraint::MaxLength(255)]),
        FieldRule::new("idNumber", &[Constraint::MaxLength(50)]),
        FieldRule::new("registrationNumber", &[Constraint::MaxLength(100)]),
        FieldRule::new("address", &[Constraint::MaxLength(500)]),
        FieldRule::new("phoneNumber", &[Constraint::MaxLength(20)]),
        FieldRule::new("createdAt", &[Constraint::Required]),
    ];

    fn defaults() -> Self {
        let now = form_now();
        Self {
            id: None,
            customer_ref: None,
            customer_type: None,
            full_name: None,
            date_of_birth: None,
            id_number: None,
            registration_number: None,
            address: None,
            phone_number: None,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }

    fn from_entity(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            customer_ref: customer.customer_ref.clone(),
            customer_type: customer.customer_type,
            full_name: customer.full_name.clone(),
            date_of_birth: customer.date_of_birth,
            id_number: customer.id_number.clone(),
            registration_number: customer.registration_number.clone(),
            address: customer.address.clone(),
            phone_number: customer.phone_number.clone(),
            created_at: format_date_time(customer.created_at),
            updated_at: format_date_time(customer.updated_at),
        }
    }

    fn to_entity(&self) -> Result<Customer, FrameworkError> {
        Ok(Customer {
            id: self.id,
            customer_ref: self.customer_ref.clone(),
            customer_type: self.customer_type,
            full_name: self.full_name.clone(),
            date_of_birth: self.date_of_birth,
            id_number: self.id_number.clone(),
            registration_number: self.registration_number.clone(),
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            created_at: parse_date_time("createdAt", self.created_at.as_deref())?,
            updated_at: parse_date_time("updatedAt", self.updated_at.as_deref())?,
        })
    }
}

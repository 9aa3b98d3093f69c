//! Enumerations shared by the KYC records. On the wire they are SCREAMING_SNAKE_CASE
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Channel a KYC interaction came through.
    ChannelType {
        Web => "WEB",
        Whatsapp => "WHATSAPP",
        Android => "ANDROID",
        Ussd => "USSD",
    }
);

wire_enum!(CustomerType {
    Individual => "INDIVIDUAL",
    Company => "COMPANY",
});

wire_enum!(
    /// Lifecycle of a KYC case.
    KycStatus {
        Started => "STARTED",
        InProgress => "IN_PROGRESS",
        AwaitingDocuments => "AWAITING_DOCUMENTS",
        Submitted => "SUBMITTED",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Failed => "FAILED",
        Expired => "EXPIRED",
        Timeout => "TIMEOUT",
    }
);

wire_enum!(IdentifierType {
    PhoneNumber => "PHONE_NUMBER",
    Email => "EMAIL",
    Username => "USERNAME",
    NationalId => "NATIONAL_ID",
    Passport => "PASSPORT",
    CompanyRegistration => "COMPANY_REGISTRATION",
});

wire_enum!(DocumentType {
    NationalId => "NATIONAL_ID",
    Passport => "PASSPORT",
    CompanyRegistration => "COMPANY_REGISTRATION",
    MineLicense => "MINE_LICENSE",
    ProofOfAddress => "PROOF_OF_ADDRESS",
    Selfie => "SELFIE",
    Other => "OTHER",
});

wire_enum!(NotificationType {
    Welcome => "WELCOME",
    DocumentReceived => "DOCUMENT_RECEIVED",
    SubmissionSuccess => "SUBMISSION_SUCCESS",
    SubmissionFailed => "SUBMISSION_FAILED",
    ValidationError => "VALIDATION_ERROR",
    TimeoutWarning => "TIMEOUT_WARNING",
    HelpRequest => "HELP_REQUEST",
});

wire_enum!(
    /// Outcome of pushing a case to the CDMS.
    SubmissionStatus {
        Pending => "PENDING",
        Success => "SUCCESS",
        Failed => "FAILED",
    }
);

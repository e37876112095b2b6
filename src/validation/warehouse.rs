use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{FieldErrors, ServiceError};
use crate::phone;
use crate::validation::require_text;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+1 \(\d{3}\) \d{3}-\d{4}$").unwrap());

/// Inbound warehouse body. Every field is optional at the wire level;
/// validation decides what is admissible.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehousePayload {
    pub warehouse_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_position: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

/// A validated warehouse record, with the contact phone already in
/// canonical format. This is the "working body" downstream create/edit use.
#[derive(Debug, Clone)]
pub struct NewWarehouse {
    pub warehouse_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub contact_name: String,
    pub contact_position: String,
    pub contact_phone: String,
    pub contact_email: String,
}

/// Validates a warehouse body.
///
/// Required-field checks run independently and accumulate into one
/// field-keyed mapping. The email and phone format checks short-circuit
/// with an immediate single-message failure instead, even when required
/// field errors have already accumulated. That asymmetry is deliberate
/// legacy behavior and must not be unified.
pub fn validate(payload: WarehousePayload) -> Result<NewWarehouse, ServiceError> {
    let mut errors = FieldErrors::new();

    require_text(
        &mut errors,
        "warehouse_name",
        payload.warehouse_name.as_deref(),
        "Please enter a warehouse name.",
    );
    require_text(
        &mut errors,
        "address",
        payload.address.as_deref(),
        "Please enter an address.",
    );
    require_text(
        &mut errors,
        "city",
        payload.city.as_deref(),
        "Please enter a city.",
    );
    require_text(
        &mut errors,
        "country",
        payload.country.as_deref(),
        "Please enter a country.",
    );
    require_text(
        &mut errors,
        "contact_name",
        payload.contact_name.as_deref(),
        "Please enter a contact name.",
    );
    require_text(
        &mut errors,
        "contact_position",
        payload.contact_position.as_deref(),
        "Please enter a contact position.",
    );
    require_text(
        &mut errors,
        "contact_email",
        payload.contact_email.as_deref(),
        "Please enter a contact email.",
    );
    require_text(
        &mut errors,
        "contact_phone",
        payload.contact_phone.as_deref(),
        "Please enter a contact phone number.",
    );

    if let Some(email) = payload.contact_email.as_deref().filter(|s| !s.is_empty()) {
        if !EMAIL_RE.is_match(email) {
            return Err(ServiceError::InvalidFormat(
                "Please provide a valid email address.".to_string(),
            ));
        }
    }

    let contact_phone = match payload.contact_phone.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let formatted = phone::normalize(raw);
            if !PHONE_RE.is_match(&formatted) {
                return Err(ServiceError::InvalidFormat(
                    "Please provide a valid phone number in the following format: +1 (XXX) XXX-XXXX."
                        .to_string(),
                ));
            }
            formatted
        }
        None => String::new(),
    };

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    Ok(NewWarehouse {
        warehouse_name: payload.warehouse_name.unwrap_or_default(),
        address: payload.address.unwrap_or_default(),
        city: payload.city.unwrap_or_default(),
        country: payload.country.unwrap_or_default(),
        contact_name: payload.contact_name.unwrap_or_default(),
        contact_position: payload.contact_position.unwrap_or_default(),
        contact_phone,
        contact_email: payload.contact_email.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> WarehousePayload {
        WarehousePayload {
            warehouse_name: Some("Manhattan".to_string()),
            address: Some("503 Broadway".to_string()),
            city: Some("New York".to_string()),
            country: Some("USA".to_string()),
            contact_name: Some("Parmin Aujla".to_string()),
            contact_position: Some("Warehouse Manager".to_string()),
            contact_phone: Some("555-123-4567".to_string()),
            contact_email: Some("paujla@instock.com".to_string()),
        }
    }

    #[test]
    fn valid_body_passes_and_normalizes_phone() {
        let record = validate(full_payload()).expect("valid payload");
        assert_eq!(record.contact_phone, "+1 (555) 123-4567");
        assert_eq!(record.warehouse_name, "Manhattan");
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let mut payload = full_payload();
        payload.warehouse_name = None;
        payload.city = Some(String::new());
        payload.contact_name = None;

        match validate(payload) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors["warehouse_name"], "Please enter a warehouse name.");
                assert_eq!(errors["city"], "Please enter a city.");
                assert_eq!(errors["contact_name"], "Please enter a contact name.");
            }
            other => panic!("expected field mapping, got {:?}", other),
        }
    }

    #[test]
    fn invalid_email_short_circuits_even_with_missing_fields() {
        let mut payload = full_payload();
        payload.warehouse_name = None;
        payload.contact_email = Some("not-an-email".to_string());

        match validate(payload) {
            Err(ServiceError::InvalidFormat(message)) => {
                assert_eq!(message, "Please provide a valid email address.");
            }
            other => panic!("expected immediate failure, got {:?}", other),
        }
    }

    #[test]
    fn unnormalizable_phone_short_circuits() {
        let mut payload = full_payload();
        payload.contact_phone = Some("12345".to_string());

        match validate(payload) {
            Err(ServiceError::InvalidFormat(message)) => {
                assert!(message.contains("+1 (XXX) XXX-XXXX"));
            }
            other => panic!("expected immediate failure, got {:?}", other),
        }
    }

    #[test]
    fn email_failure_takes_precedence_over_phone_failure() {
        let mut payload = full_payload();
        payload.contact_email = Some("broken".to_string());
        payload.contact_phone = Some("12345".to_string());

        match validate(payload) {
            Err(ServiceError::InvalidFormat(message)) => {
                assert_eq!(message, "Please provide a valid email address.");
            }
            other => panic!("expected email failure first, got {:?}", other),
        }
    }
}

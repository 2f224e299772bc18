use crate::core::config::FormPolicy;
use crate::core::error::FormError;
use crate::mapping::field_mapper::has_value;
use crate::models::form::{Field, FormFields};

/// Fields that must be filled before a create or update is sent
pub const REQUIRED_FIELDS: [Field; 7] = [
    Field::UserId,
    Field::FirstName,
    Field::LastName,
    Field::Street,
    Field::City,
    Field::State,
    Field::ZipCode,
];

/// Check the form before a create/update
///
/// Reports a single generic error with no field-level detail.
pub fn check_submission(fields: &FormFields, policy: &FormPolicy) -> Result<(), FormError> {
    if policy.require_fields
        && !REQUIRED_FIELDS
            .into_iter()
            .all(|field| has_value(&fields.get(field)))
    {
        return Err(FormError::MissingRequired);
    }

    if !policy.allow_unspecified_active && !fields.active.is_specified() {
        return Err(FormError::MissingRequired);
    }

    Ok(())
}

/// Identifier for actions addressed to one customer
///
/// The id is only ever taken from the form; it is never generated here.
pub fn require_customer_id(fields: &FormFields) -> Result<String, FormError> {
    let id = fields.customer_id.trim();
    if id.is_empty() {
        return Err(FormError::MissingCustomerId);
    }
    Ok(id.to_string())
}

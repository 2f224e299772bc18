use crate::mapping::field_mapper::has_value;
use crate::models::form::{Field, FormFields};

/// Search filters in the order they appear in the query string
pub const FILTER_KEYS: [Field; 9] = [
    Field::UserId,
    Field::FirstName,
    Field::LastName,
    Field::Active,
    Field::City,
    Field::State,
    Field::ZipCode,
    Field::Street,
    Field::Apartment,
];

/// Collect the non-empty filters, each paired with its own field's value
pub fn filter_pairs(fields: &FormFields) -> Vec<(&'static str, String)> {
    FILTER_KEYS
        .into_iter()
        .filter_map(|field| {
            let value = fields.get(field);
            has_value(&value).then(|| (field.name(), value))
        })
        .collect()
}

/// Build the `key=value&key=value` query for a customer search
///
/// Values are form-urlencoded. No filters yields an empty string.
pub fn build_query(fields: &FormFields) -> Result<String, serde_urlencoded::ser::Error> {
    serde_urlencoded::to_string(filter_pairs(fields))
}

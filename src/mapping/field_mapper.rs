use crate::core::config::PayloadMode;
use crate::models::customer::{AddressPayload, Customer, CustomerPayload};
use crate::models::form::{ActiveSelector, FormFields};

/// Build the outgoing body for create/update from the current form
///
/// The `active` key is only present when the selector holds true or false.
pub fn to_payload(fields: &FormFields, mode: PayloadMode) -> CustomerPayload {
    let take = |value: &String| pick(value, mode);

    CustomerPayload {
        user_id: take(&fields.user_id),
        first_name: take(&fields.first_name),
        last_name: take(&fields.last_name),
        password: take(&fields.password),
        active: fields.active.as_bool(),
        address: AddressPayload {
            street: take(&fields.street),
            apartment: take(&fields.apartment),
            city: take(&fields.city),
            state: take(&fields.state),
            zip_code: take(&fields.zip_code),
        },
    }
}

/// Derive a complete set of form values from a customer record
///
/// Every field is produced, so assigning the result overwrites the whole
/// form. Missing values (including a missing address) become empty strings.
/// The password is write-only and always comes back empty.
pub fn from_resource(resource: &Customer) -> FormFields {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let address = resource.address.clone().unwrap_or_default();

    FormFields {
        customer_id: text(&resource.customer_id),
        user_id: text(&resource.user_id),
        first_name: text(&resource.first_name),
        last_name: text(&resource.last_name),
        password: String::new(),
        active: ActiveSelector::from_bool(resource.active),
        street: text(&address.street),
        apartment: text(&address.apartment),
        city: text(&address.city),
        state: text(&address.state),
        zip_code: text(&address.zip_code),
    }
}

fn pick(value: &str, mode: PayloadMode) -> Option<String> {
    match mode {
        PayloadMode::Full => Some(value.to_string()),
        PayloadMode::Sparse if has_value(value) => Some(value.to_string()),
        PayloadMode::Sparse => None,
    }
}

pub(crate) fn has_value(value: &str) -> bool {
    !value.trim().is_empty()
}

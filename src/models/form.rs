use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tri-state `active` selector
///
/// `Unspecified` and `Inactive` are distinct: an unspecified selector is left
/// out of payloads and queries, never sent as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveSelector {
    Active,
    Inactive,
    #[default]
    Unspecified,
}

impl ActiveSelector {
    pub fn from_bool(active: Option<bool>) -> Self {
        match active {
            Some(true) => ActiveSelector::Active,
            Some(false) => ActiveSelector::Inactive,
            None => ActiveSelector::Unspecified,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            ActiveSelector::Active => Some(true),
            ActiveSelector::Inactive => Some(false),
            ActiveSelector::Unspecified => None,
        }
    }

    pub fn is_specified(self) -> bool {
        self != ActiveSelector::Unspecified
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid active value '{0}': expected true, false or n/a")]
pub struct InvalidActive(pub String);

impl FromStr for ActiveSelector {
    type Err = InvalidActive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(ActiveSelector::Active),
            "false" => Ok(ActiveSelector::Inactive),
            "" | "n/a" => Ok(ActiveSelector::Unspecified),
            _ => Err(InvalidActive(s.to_string())),
        }
    }
}

impl fmt::Display for ActiveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveSelector::Active => write!(f, "true"),
            ActiveSelector::Inactive => write!(f, "false"),
            ActiveSelector::Unspecified => write!(f, "n/a"),
        }
    }
}

/// Named inputs on the customer form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CustomerId,
    UserId,
    FirstName,
    LastName,
    Password,
    Active,
    Street,
    Apartment,
    City,
    State,
    ZipCode,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::CustomerId,
        Field::UserId,
        Field::FirstName,
        Field::LastName,
        Field::Password,
        Field::Active,
        Field::Street,
        Field::Apartment,
        Field::City,
        Field::State,
        Field::ZipCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::CustomerId => "customer_id",
            Field::UserId => "user_id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Password => "password",
            Field::Active => "active",
            Field::Street => "street",
            Field::Apartment => "apartment",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zip_code",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The flat set of values currently shown on the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub customer_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub active: ActiveSelector,
    pub street: String,
    pub apartment: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl FormFields {
    /// Text value of a field as it would be read from the input
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Active => match self.active {
                ActiveSelector::Unspecified => String::new(),
                other => other.to_string(),
            },
            _ => self.text(field).map(str::to_string).unwrap_or_default(),
        }
    }

    /// Assign a field from its text representation
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), InvalidActive> {
        match field {
            Field::Active => self.active = value.parse()?,
            _ => {
                if let Some(slot) = self.text_mut(field) {
                    *slot = value.to_string();
                }
            }
        }
        Ok(())
    }

    /// Every text field and the selector are empty/unspecified
    pub fn is_blank(&self) -> bool {
        Field::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::CustomerId => &self.customer_id,
            Field::UserId => &self.user_id,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Password => &self.password,
            Field::Street => &self.street,
            Field::Apartment => &self.apartment,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::Active => return None,
        };
        Some(value)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::CustomerId => &mut self.customer_id,
            Field::UserId => &mut self.user_id,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Password => &mut self.password,
            Field::Street => &mut self.street,
            Field::Apartment => &mut self.apartment,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::ZipCode => &mut self.zip_code,
            Field::Active => return None,
        };
        Some(value)
    }
}

use crate::mapping::field_mapper::from_resource;
use crate::models::customer::Customer;
use crate::models::form::{Field, FormFields};
use crate::render::table::{render_table, ResultRow};
use std::fmt;

/// Everything the user sees: the form, the results table and the status area
///
/// Only the render methods below mutate it. Each one replaces what it owns
/// wholesale, so repeated calls are idempotent.
#[derive(Debug, Clone)]
pub struct Screen {
    pub form: FormFields,
    pub results: Vec<ResultRow>,
    pub flash: Option<String>,
    flash_target: String,
}

impl Screen {
    pub fn new(flash_target: impl Into<String>) -> Self {
        Self {
            form: FormFields::default(),
            results: Vec::new(),
            flash: None,
            flash_target: flash_target.into(),
        }
    }

    pub fn flash_target(&self) -> &str {
        &self.flash_target
    }

    /// Overwrite every form field from a customer record
    pub fn render_record(&mut self, resource: &Customer) {
        self.form = from_resource(resource);
    }

    /// Rebuild the results table and make the first record current
    pub fn render_list(&mut self, resources: &[Customer]) {
        self.results = resources.iter().map(ResultRow::from).collect();

        match resources.first() {
            Some(first) => self.render_record(first),
            None => self.clear(),
        }
    }

    /// Replace the status area with `message`
    pub fn render_error(&mut self, message: &str) {
        self.flash = Some(message.to_string());
    }

    /// Replace the status area after a successful action
    pub fn render_success(&mut self, message: &str) {
        self.flash = Some(message.to_string());
    }

    /// Reset every field, the id included, to empty/unspecified
    pub fn clear(&mut self) {
        self.form = FormFields::default();
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] {}",
            self.flash_target,
            self.flash.as_deref().unwrap_or("")
        )?;
        writeln!(f)?;

        let width = Field::ALL
            .iter()
            .map(|field| field.name().len())
            .max()
            .unwrap_or(0);
        for field in Field::ALL {
            let value = match field {
                Field::Active => self.form.active.to_string(),
                Field::Password if !self.form.password.is_empty() => "********".to_string(),
                _ => self.form.get(field),
            };
            writeln!(f, "  {:<width$} : {}", field.name(), value, width = width)?;
        }

        if !self.results.is_empty() {
            writeln!(f)?;
            write!(f, "{}", render_table(&self.results))?;
        }

        Ok(())
    }
}

use crate::api::client::CustomerClient;
use crate::core::config::{Config, FormPolicy, Recovery, RecoveryConfig};
use crate::core::error::{ActionError, ApiError};
use crate::mapping::field_mapper::to_payload;
use crate::mapping::query::build_query;
use crate::models::form::FormFields;
use crate::render::screen::Screen;
use crate::render::table::ResultRow;
use crate::validation::required::{check_submission, require_customer_id};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// The buttons of the customer form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Retrieve,
    Update,
    Delete,
    Activate,
    Deactivate,
    Search,
    Clear,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Create,
        Action::Retrieve,
        Action::Update,
        Action::Delete,
        Action::Activate,
        Action::Deactivate,
        Action::Search,
        Action::Clear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Retrieve => "retrieve",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Activate => "activate",
            Action::Deactivate => "deactivate",
            Action::Search => "search",
            Action::Clear => "clear",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Drives the customer form: one request per action, then a repaint
pub struct CustomerConsole {
    client: CustomerClient,
    policy: FormPolicy,
    recovery: RecoveryConfig,
    screen: Screen,
}

impl CustomerConsole {
    pub fn new(client: CustomerClient, policy: FormPolicy, recovery: RecoveryConfig) -> Self {
        let screen = Screen::new(policy.flash_target.clone());
        Self {
            client,
            policy,
            recovery,
            screen,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let client = CustomerClient::from_config(&config.backend)?;
        Ok(Self::new(
            client,
            config.form.clone(),
            config.recovery.clone(),
        ))
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Direct access to the inputs, as a user typing into them
    pub fn form_mut(&mut self) -> &mut FormFields {
        &mut self.screen.form
    }

    /// Run one action and paint its outcome
    ///
    /// The screen is updated on both branches; the error is handed back so
    /// callers can pick an exit status.
    pub async fn run(&mut self, action: Action) -> Result<(), ActionError> {
        let outcome = match action {
            Action::Create => self.create().await,
            Action::Retrieve => self.retrieve().await,
            Action::Update => self.update().await,
            Action::Delete => self.delete().await,
            Action::Activate => self.set_active(true).await,
            Action::Deactivate => self.set_active(false).await,
            Action::Search => self.search().await,
            Action::Clear => {
                self.screen.clear();
                return Ok(());
            }
        };

        match outcome {
            Ok(message) => {
                info!(action = %action, customer_id = %self.screen.form.customer_id, "Action succeeded");
                self.screen.render_success(message);
                Ok(())
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Action failed");
                // Local validation failures never reach the server and keep the form
                if matches!(e, ActionError::Api(_)) && self.recovery_for(action) == Recovery::Clear {
                    self.screen.clear();
                }
                self.screen.render_error(&e.flash_text());
                Err(e)
            }
        }
    }

    fn recovery_for(&self, action: Action) -> Recovery {
        match action {
            Action::Create => self.recovery.create,
            Action::Retrieve => self.recovery.retrieve,
            Action::Update => self.recovery.update,
            Action::Delete => self.recovery.delete,
            Action::Activate => self.recovery.activate,
            Action::Deactivate => self.recovery.deactivate,
            Action::Search => self.recovery.search,
            Action::Clear => Recovery::Preserve,
        }
    }

    async fn create(&mut self) -> Result<&'static str, ActionError> {
        check_submission(&self.screen.form, &self.policy)?;
        let payload = to_payload(&self.screen.form, self.policy.payload);

        let created = self.client.create(&payload).await?;
        self.screen.render_record(&created);
        Ok("Success")
    }

    async fn retrieve(&mut self) -> Result<&'static str, ActionError> {
        let id = require_customer_id(&self.screen.form)?;

        let customer = self.client.retrieve(&id).await?;
        self.screen.render_record(&customer);
        Ok("Success")
    }

    async fn update(&mut self) -> Result<&'static str, ActionError> {
        let id = require_customer_id(&self.screen.form)?;
        check_submission(&self.screen.form, &self.policy)?;
        let payload = to_payload(&self.screen.form, self.policy.payload);

        let updated = self.client.update(&id, &payload).await?;
        self.screen.render_record(&updated);
        Ok("Success")
    }

    async fn delete(&mut self) -> Result<&'static str, ActionError> {
        let id = require_customer_id(&self.screen.form)?;

        self.client.delete(&id).await?;
        self.screen.clear();
        Ok("Customer has been Deleted!")
    }

    async fn set_active(&mut self, active: bool) -> Result<&'static str, ActionError> {
        let id = require_customer_id(&self.screen.form)?;

        let customer = if active {
            self.client.activate(&id).await?
        } else {
            self.client.deactivate(&id).await?
        };

        self.screen.render_record(&customer);
        self.screen.results = vec![ResultRow::from(&customer)];

        Ok(if active {
            "Customer activated."
        } else {
            "Customer deactivated."
        })
    }

    async fn search(&mut self) -> Result<&'static str, ActionError> {
        let query = build_query(&self.screen.form)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let customers = self.client.list(&query).await?;
        info!(count = customers.len(), query = %query, "Search returned customers");
        self.screen.render_list(&customers);
        Ok("Success")
    }
}

use crate::handlers::actions::Action;
use crate::models::form::{ActiveSelector, FormFields};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "customer-console")]
#[command(about = "Create, find and manage customers through a REST backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (defaults to ./customer-console.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a customer from the given fields
    Create(FormArgs),

    /// Fetch one customer by id
    Retrieve { customer_id: String },

    /// Replace a customer's fields (requires --customer-id)
    Update(FormArgs),

    Delete { customer_id: String },

    Activate { customer_id: String },

    Deactivate { customer_id: String },

    /// List customers matching the given filters
    Search(FormArgs),

    /// Interactive session with a persistent form
    Shell,
}

impl Commands {
    /// The action a one-shot command performs; `None` for the shell
    pub fn action(&self) -> Option<Action> {
        match self {
            Commands::Create(_) => Some(Action::Create),
            Commands::Retrieve { .. } => Some(Action::Retrieve),
            Commands::Update(_) => Some(Action::Update),
            Commands::Delete { .. } => Some(Action::Delete),
            Commands::Activate { .. } => Some(Action::Activate),
            Commands::Deactivate { .. } => Some(Action::Deactivate),
            Commands::Search(_) => Some(Action::Search),
            Commands::Shell => None,
        }
    }

    /// Fill the form the way a user would before pressing the button
    pub fn fill(&self, form: &mut FormFields) {
        match self {
            Commands::Create(args) | Commands::Update(args) | Commands::Search(args) => {
                args.fill(form)
            }
            Commands::Retrieve { customer_id }
            | Commands::Delete { customer_id }
            | Commands::Activate { customer_id }
            | Commands::Deactivate { customer_id } => form.customer_id = customer_id.clone(),
            Commands::Shell => {}
        }
    }
}

/// Form inputs as flags; omitted flags leave the field empty
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub customer_id: Option<String>,
    #[arg(long)]
    pub user_id: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// true, false or n/a
    #[arg(long)]
    pub active: Option<ActiveSelector>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub apartment: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip_code: Option<String>,
}

impl FormArgs {
    pub fn fill(&self, form: &mut FormFields) {
        let assign = |slot: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                *slot = value.clone();
            }
        };

        assign(&mut form.customer_id, &self.customer_id);
        assign(&mut form.user_id, &self.user_id);
        assign(&mut form.first_name, &self.first_name);
        assign(&mut form.last_name, &self.last_name);
        assign(&mut form.password, &self.password);
        assign(&mut form.street, &self.street);
        assign(&mut form.apartment, &self.apartment);
        assign(&mut form.city, &self.city);
        assign(&mut form.state, &self.state);
        assign(&mut form.zip_code, &self.zip_code);

        if let Some(active) = self.active {
            form.active = active;
        }
    }
}

//! Command line and runtime configuration.

use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{OrderStatus, RecordId};
use crate::error::DashboardError;
use crate::order_resource::OrderSortKey;
use crate::view_model::ViewModelOptions;

#[derive(Debug, Parser)]
#[command(name = "admin-dashboard", about = "Admin dashboard for orders, products and users")]
pub struct Cli {
    /// Base URL of the admin REST API.
    #[arg(long, env = "ADMIN_API_URL", default_value = "http://localhost:8080/api")]
    pub api_url: String,

    /// Serve every tab from built-in demo data instead of the API.
    #[arg(long)]
    pub offline: bool,

    /// Quiet period before a search is sent (milliseconds).
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,

    /// Per-request timeout (seconds).
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Capacity of every actor mailbox.
    #[arg(long, default_value_t = 32)]
    pub buffer_size: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the orders of one day (today when no date is given).
    Orders {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// `date` or `total`.
        #[arg(long, default_value_t = OrderSortKey::Date)]
        sort: OrderSortKey,
        /// `pending`, `completed` or `cancelled`.
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// List products, optionally for one brand.
    Products {
        #[arg(long)]
        brand: Option<String>,
    },
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        stock: u32,
    },
    /// Set price and/or stock on every product of a brand.
    UpdateBrand {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<u32>,
    },
    /// List users matching a search term.
    Users {
        #[arg(long)]
        search: Option<String>,
    },
    /// Block an active user or unblock a blocked one.
    ToggleBlock {
        #[arg(long)]
        customer_id: String,
    },
    EditUser {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        customer_id: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Settings shared by every tab.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_url: String,
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub buffer_size: usize,
}

impl DashboardConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, DashboardError> {
        if cli.buffer_size == 0 {
            return Err(DashboardError::Config("buffer size must be at least 1".to_string()));
        }
        if cli.timeout_secs == 0 {
            return Err(DashboardError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(Self {
            api_url: cli.api_url.clone(),
            debounce: Duration::from_millis(cli.debounce_ms),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            buffer_size: cli.buffer_size,
        })
    }

    pub fn view_model_options(&self) -> ViewModelOptions {
        ViewModelOptions { buffer_size: self.buffer_size, debounce: self.debounce }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let options = ViewModelOptions::default();
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            debounce: options.debounce,
            request_timeout: Duration::from_secs(10),
            buffer_size: options.buffer_size,
        }
    }
}

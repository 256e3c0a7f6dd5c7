mod domain;
mod error;
mod notifications;
mod resource_framework;
mod http_api;
mod memory_backend;
mod view_model;
mod order_resource;
mod product_resource;
mod user_resource;
mod tabs;
mod presentation;
mod config;

mod app_system;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, DashboardSystem};
use crate::config::{Cli, Command, DashboardConfig};
use crate::domain::User;
use crate::error::DashboardError;
use crate::notifications::LogNotifier;
use crate::product_resource::{ProductBulkUpdate, ProductCreate};
use crate::view_model::FetchState;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    setup_tracing();

    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;
    let notifier = Arc::new(LogNotifier);

    let system = if cli.offline {
        DashboardSystem::offline(&config, notifier)
    } else {
        DashboardSystem::connect(&config, notifier)?
    };
    info!("Dashboard started");

    let span = tracing::info_span!("command");
    let result = run_command(&system, cli.command).instrument(span).await;

    system.shutdown().await?;
    result
}

async fn run_command(system: &DashboardSystem, command: Command) -> Result<(), DashboardError> {
    match command {
        Command::Orders { date, sort, status } => {
            let tab = &system.orders;
            tab.sort_by(sort).await?;
            tab.filter_status(status).await?;
            tab.select_date(date.unwrap_or_else(|| Utc::now().date_naive())).await?;
            let snapshot = tab.settled().await?;
            ensure_loaded(&snapshot.state)?;
            print!("{}", presentation::render_orders(&snapshot));
        }
        Command::Products { brand } => {
            let tab = &system.products;
            tab.refresh_products().await?;
            tab.filter_brand(brand).await?;
            let snapshot = tab.settled().await?;
            ensure_loaded(&snapshot.state)?;
            print!("{}", presentation::render_products(&snapshot));
        }
        Command::AddProduct { name, brand, category, price, stock } => {
            let tab = &system.products;
            tab.add_product(ProductCreate { name, brand, category, price, stock }).await?;
            let snapshot = tab.settled().await?;
            print!("{}", presentation::render_products(&snapshot));
        }
        Command::UpdateBrand { brand, price, stock } => {
            let tab = &system.products;
            tab.filter_brand(Some(brand)).await?;
            tab.update_selected_brand(ProductBulkUpdate { price, stock }).await?;
            let snapshot = tab.settled().await?;
            print!("{}", presentation::render_products(&snapshot));
        }
        Command::Users { search } => {
            let tab = &system.users;
            match search {
                Some(term) => tab.search(term).await?,
                None => tab.refresh_users().await?,
            }
            let snapshot = tab.settled().await?;
            ensure_loaded(&snapshot.state)?;
            print!("{}", presentation::render_users(&snapshot));
        }
        Command::ToggleBlock { customer_id } => {
            let tab = &system.users;
            let user = find_user(system, |user| user.customer_id == customer_id).await?
                .ok_or_else(|| DashboardError::NotFound(format!("customer {}", customer_id)))?;
            tab.toggle_block(&user).await?;
            let snapshot = tab.settled().await?;
            print!("{}", presentation::render_users(&snapshot));
        }
        Command::EditUser { id, username, customer_id, phone } => {
            let tab = &system.users;
            let user = find_user(system, |user| user.id == id).await?
                .ok_or_else(|| DashboardError::NotFound(format!("user {}", id)))?;
            let form = edit_form(&user, username, customer_id, phone);
            tab.update_user(&user, form).await?;
            let snapshot = tab.settled().await?;
            print!("{}", presentation::render_users(&snapshot));
        }
    }
    Ok(())
}

fn ensure_loaded(state: &FetchState) -> Result<(), DashboardError> {
    match state {
        FetchState::Failed(reason) => Err(DashboardError::FetchFailed(reason.clone())),
        _ => Ok(()),
    }
}

/// Loads the full user list and returns the first user matching `predicate`.
async fn find_user(
    system: &DashboardSystem,
    predicate: impl Fn(&User) -> bool,
) -> Result<Option<User>, DashboardError> {
    system.users.refresh_users().await?;
    let snapshot = system.users.settled().await?;
    ensure_loaded(&snapshot.state)?;
    Ok(snapshot.items.into_iter().find(|user| predicate(user)))
}

/// Edit form pre-filled from `user`, with the given fields replaced.
fn edit_form(user: &User, username: Option<String>, customer_id: Option<String>, phone: Option<String>) -> domain::UserUpdate {
    let mut form = tabs::UsersTab::edit_form(user);
    if username.is_some() {
        form.username = username;
    }
    if customer_id.is_some() {
        form.customer_id = customer_id;
    }
    if phone.is_some() {
        form.phone = phone;
    }
    form
}

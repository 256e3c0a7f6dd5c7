//! Plain-text rendering of tab snapshots for the command line.

use std::fmt::Write;

use chrono::DateTime;

use crate::domain::{Order, Product, User};
use crate::view_model::{FetchState, ListSnapshot, Listing};

pub fn format_epoch(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Line shown above a table while a fetch or search is outstanding, or after
/// the last fetch failed.
fn status_line<T: Listing>(snapshot: &ListSnapshot<T>) -> Option<String> {
    if snapshot.is_busy() {
        return Some("Loading...".to_string());
    }
    match &snapshot.state {
        FetchState::Failed(reason) => Some(format!("Last fetch failed: {}", reason)),
        _ => None,
    }
}

fn render_table<T: Listing>(
    snapshot: &ListSnapshot<T>,
    header: String,
    empty: &str,
    row: impl Fn(&T) -> String,
) -> String {
    let mut out = String::new();
    if let Some(status) = status_line(snapshot) {
        let _ = writeln!(out, "{}", status);
    }
    if snapshot.visible.is_empty() {
        let _ = writeln!(out, "{}", empty);
        return out;
    }
    let _ = writeln!(out, "{}", header);
    for item in &snapshot.visible {
        let _ = writeln!(out, "{}", row(item));
    }
    out
}

pub fn render_orders(snapshot: &ListSnapshot<Order>) -> String {
    let header = format!(
        "Orders for {} ({}, by {})\n{:<8} {:<17} {:<10} {:>12}",
        snapshot.query.format("%Y-%m-%d"),
        snapshot.visible.len(),
        snapshot.sort,
        "ID",
        "PLACED",
        "STATUS",
        "TOTAL"
    );
    render_table(snapshot, header, "No orders found", |order| {
        format!(
            "{:<8} {:<17} {:<10} {:>12}",
            order.id.to_string(),
            format_epoch(order.placed_on),
            order.status.as_str(),
            format_amount(order.total_amount)
        )
    })
}

pub fn render_products(snapshot: &ListSnapshot<Product>) -> String {
    let header = format!(
        "{:<6} {:<24} {:<16} {:<16} {:>12} {:>6}",
        "ID", "NAME", "BRAND", "CATEGORY", "PRICE", "STOCK"
    );
    render_table(snapshot, header, "No products found", |product| {
        format!(
            "{:<6} {:<24} {:<16} {:<16} {:>12} {:>6}",
            product.id.to_string(),
            product.name,
            product.brand,
            product.category,
            format_amount(product.price),
            product.stock
        )
    })
}

pub fn render_users(snapshot: &ListSnapshot<User>) -> String {
    let header = format!(
        "{:<6} {:<16} {:<12} {:<14} {:<8} {:<17}",
        "ID", "USERNAME", "CUSTOMER", "PHONE", "STATUS", "CREATED"
    );
    render_table(snapshot, header, "No users found", |user| {
        let status = if user.is_blocked() { "Blocked" } else { "Active" };
        format!(
            "{:<6} {:<16} {:<12} {:<14} {:<8} {:<17}",
            user.id.to_string(),
            user.username,
            user.customer_id,
            user.phone,
            status,
            format_epoch(user.created_at)
        )
    })
}

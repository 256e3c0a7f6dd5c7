//! Seed records for `--offline` mode.

use chrono::NaiveDate;

use crate::domain::{Order, OrderStatus, Product, User, UserStatus};
use crate::order_resource::day_bounds;

/// A handful of orders spread over `today`, plus one from the day before.
pub fn orders(today: NaiveDate) -> Vec<Order> {
    let (start, _) = day_bounds(today);
    let hour = 3_600;
    vec![
        Order::new(1, start + 9 * hour, OrderStatus::Completed, 1_250.0),
        Order::new(2, start + 11 * hour + 1_200, OrderStatus::Pending, 349.5),
        Order::new(3, start + 14 * hour, OrderStatus::Cancelled, 89.0),
        Order::new(4, start + 18 * hour + 600, OrderStatus::Pending, 2_199.0),
        Order::new(5, start - 5 * hour, OrderStatus::Completed, 560.0),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new(1, "Marie Gold", "Britannia", "Biscuits", 30.0, 240),
        Product::new(2, "Good Day", "Britannia", "Biscuits", 25.0, 180),
        Product::new(3, "Parle-G", "Parle", "Biscuits", 10.0, 500),
        Product::new(4, "Amul Butter 500g", "Amul", "Dairy", 275.0, 60),
        Product::new(5, "Amul Taaza 1L", "Amul", "Dairy", 68.0, 120),
        Product::new(6, "Maggi Noodles", "Nestle", "Instant Food", 14.0, 400),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User::new(1, "asha", "CUST-101", "98450 12345", UserStatus::Active, 1_700_000_000),
        User::new(2, "vikram", "CUST-102", "98860 22110", UserStatus::Active, 1_702_500_000),
        User::new(3, "ravi", "CUST-103", "99001 45678", UserStatus::Block, 1_703_100_000),
        User::new(4, "meera", "CUST-104", "97400 98765", UserStatus::Active, 1_704_067_200),
    ]
}

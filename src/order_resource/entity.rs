use std::cmp::Ordering;

use chrono::NaiveDate;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Order, OrderStatus, RecordId};
use crate::error::ApiError;
use crate::http_api::{HttpApi, HttpResource};
use crate::memory_backend::MemoryResource;
use crate::resource_framework::Resource;
use crate::view_model::Listing;
use super::OrderSortKey;

/// `[start, end)` epoch seconds of a UTC calendar day.
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc().timestamp();
    (start, start + 86_400)
}

impl Resource for Order {
    type Id = RecordId;
    type Query = NaiveDate;
    type CreatePayload = (); // Orders are read-only here
    type Patch = ();
    type Group = ();
    type Action = ();

    const NAME: &'static str = "orders";

    fn id(&self) -> &RecordId { &self.id }
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

impl HttpResource for Order {
    /// `GET orders?date=YYYY-MM-DD`
    fn list_request(api: &HttpApi, date: &NaiveDate) -> Result<RequestBuilder, ApiError> {
        let date = date.format("%Y-%m-%d").to_string();
        Ok(api.get(&["orders"])?.query(&[("date", date)]))
    }

    /// The orders endpoint wraps its list in `{"orders": [...]}`.
    fn decode_list(body: Value) -> Result<Vec<Self>, ApiError> {
        serde_json::from_value::<OrdersEnvelope>(body)
            .map(|envelope| envelope.orders)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl MemoryResource for Order {
    fn numeric_id(&self) -> Option<u64> {
        self.id.as_number()
    }

    fn matches_query(&self, date: &NaiveDate) -> bool {
        let (start, end) = day_bounds(*date);
        (start..end).contains(&self.placed_on)
    }
}

impl Listing for Order {
    /// `None` shows every status.
    type Filter = Option<OrderStatus>;
    type SortKey = OrderSortKey;

    fn matches(&self, filter: &Option<OrderStatus>) -> bool {
        filter.map_or(true, |status| self.status == status)
    }

    fn compare(a: &Self, b: &Self, sort: OrderSortKey) -> Ordering {
        match sort {
            OrderSortKey::Date => b.placed_on.cmp(&a.placed_on),
            OrderSortKey::Total => b.total_amount.total_cmp(&a.total_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_cover_one_utc_day() {
        let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(start, 1704067200);
        assert_eq!(end - start, 86_400);
    }

    #[test]
    fn test_memory_query_matches_orders_of_that_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let midnight = Order::new(1, 1704067200, OrderStatus::Pending, 1.0);
        let next_day = Order::new(2, 1704153600, OrderStatus::Pending, 1.0);
        assert!(midnight.matches_query(&date));
        assert!(!next_day.matches_query(&date));
    }

    #[test]
    fn test_decodes_orders_envelope() {
        let body = serde_json::json!({
            "orders": [{ "id": 1, "placed_on": 1704067200, "status": "pending", "total_amount": 100.0 }]
        });
        let orders = Order::decode_list(body).unwrap();
        assert_eq!(orders, vec![Order::new(1, 1704067200, OrderStatus::Pending, 100.0)]);

        let bare = serde_json::json!([]);
        assert!(matches!(Order::decode_list(bare), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_status_filter() {
        let order = Order::new(1, 0, OrderStatus::Cancelled, 1.0);
        assert!(order.matches(&None));
        assert!(order.matches(&Some(OrderStatus::Cancelled)));
        assert!(!order.matches(&Some(OrderStatus::Completed)));
    }
}

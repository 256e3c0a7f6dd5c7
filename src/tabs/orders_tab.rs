use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::domain::{Order, OrderStatus};
use crate::error::ViewModelError;
use crate::order_resource::OrderSortKey;
use crate::view_model::ListViewModelClient;

/// Orders placed on one day, filtered by status and sorted by date or total.
#[derive(Clone)]
pub struct OrdersTab {
    inner: ListViewModelClient<Order>,
}

impl_basic_tab!(OrdersTab, Order, orders);

impl OrdersTab {
    /// Picking a date fetches that day's orders at once.
    #[instrument(skip(self))]
    pub async fn select_date(&self, date: NaiveDate) -> Result<(), ViewModelError> {
        debug!("Sending request");
        self.inner.set_query(date).await
    }

    #[instrument(skip(self))]
    pub async fn sort_by(&self, key: OrderSortKey) -> Result<(), ViewModelError> {
        self.inner.set_sort(key).await
    }

    /// `None` shows every status.
    #[instrument(skip(self))]
    pub async fn filter_status(&self, status: Option<OrderStatus>) -> Result<(), ViewModelError> {
        self.inner.set_filter(status).await
    }

    /// Count shown in the tab header.
    pub fn total_orders(&self) -> usize {
        self.inner.snapshot().visible.len()
    }
}

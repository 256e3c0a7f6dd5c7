use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::domain::{Order, Product, User};
use crate::error::DashboardError;
use crate::http_api::{HttpApi, HttpApiActor};
use crate::memory_backend::MemoryBackend;
use crate::notifications::Notifier;
use crate::resource_framework::ResourceClient;
use crate::tabs::{OrdersTab, ProductsTab, UsersTab};
use crate::view_model::ListViewModel;
use super::demo_data;

/// The running dashboard: one backend and one view model per tab.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct DashboardSystem {
    pub orders: OrdersTab,
    pub products: ProductsTab,
    pub users: UsersTab,
    handles: Vec<JoinHandle<()>>,
}

impl DashboardSystem {
    /// Tabs backed by the REST API at `config.api_url`.
    pub fn connect(config: &DashboardConfig, notifier: Arc<dyn Notifier>) -> Result<Self, DashboardError> {
        let api = HttpApi::new(&config.api_url, config.request_timeout)
            .map_err(|e| DashboardError::Config(e.to_string()))?;
        info!(api_url = %config.api_url, "Connecting to admin API");

        let (order_actor, order_api) = HttpApiActor::<Order>::new(config.buffer_size, api.clone());
        let (product_actor, product_api) = HttpApiActor::<Product>::new(config.buffer_size, api.clone());
        let (user_actor, user_api) = HttpApiActor::<User>::new(config.buffer_size, api);
        let backends = vec![
            tokio::spawn(order_actor.run()),
            tokio::spawn(product_actor.run()),
            tokio::spawn(user_actor.run()),
        ];

        Ok(Self::assemble(config, notifier, order_api, product_api, user_api, backends))
    }

    /// Tabs backed by in-memory stores seeded with demo data.
    pub fn offline(config: &DashboardConfig, notifier: Arc<dyn Notifier>) -> Self {
        info!("Starting with demo data");
        let today = Utc::now().date_naive();

        let (order_store, order_api) = MemoryBackend::new(config.buffer_size, demo_data::orders(today));
        let (product_store, product_api) = MemoryBackend::new(config.buffer_size, demo_data::products());
        let (user_store, user_api) = MemoryBackend::new(config.buffer_size, demo_data::users());
        let backends = vec![
            tokio::spawn(order_store.run()),
            tokio::spawn(product_store.run()),
            tokio::spawn(user_store.run()),
        ];

        Self::assemble(config, notifier, order_api, product_api, user_api, backends)
    }

    /// Starts one view model per tab on top of the given resource clients.
    pub fn assemble(
        config: &DashboardConfig,
        notifier: Arc<dyn Notifier>,
        order_api: ResourceClient<Order>,
        product_api: ResourceClient<Product>,
        user_api: ResourceClient<User>,
        mut handles: Vec<JoinHandle<()>>,
    ) -> Self {
        let options = config.view_model_options();

        let (orders_vm, orders) = ListViewModel::new(options, Utc::now().date_naive(), order_api, notifier.clone());
        let (products_vm, products) = ListViewModel::new(options, (), product_api, notifier.clone());
        let (users_vm, users) = ListViewModel::new(options, String::new(), user_api, notifier);
        handles.push(tokio::spawn(orders_vm.run()));
        handles.push(tokio::spawn(products_vm.run()));
        handles.push(tokio::spawn(users_vm.run()));

        Self {
            orders: OrdersTab::new(orders),
            products: ProductsTab::new(products),
            users: UsersTab::new(users),
            handles,
        }
    }

    /// Drops the tabs, which stops the view models, which in turn release
    /// the backends; then waits for every task.
    pub async fn shutdown(self) -> Result<(), DashboardError> {
        info!("Shutting down dashboard...");
        drop(self.orders);
        drop(self.products);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(DashboardError::Task(e.to_string()));
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}

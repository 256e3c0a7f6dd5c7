//! In-memory backend used by `--offline` mode and tests.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::resource_framework::{Resource, ResourceClient, ResourceRequest};

// =============================================================================
// 1. THE HOOKS
// =============================================================================

/// Hooks a resource implements to be served from an in-memory store.
///
/// Hook errors are reported to the client as `422` responses, mirroring what
/// the REST backend does with a rejected payload.
pub trait MemoryResource: Resource {
    /// Whether this record belongs in the answer to a list request.
    fn matches_query(&self, query: &Self::Query) -> bool;

    /// Numeric part of the id, if any. New records are numbered after the
    /// largest one in the seed.
    fn numeric_id(&self) -> Option<u64> {
        None
    }

    /// Construct the full record from a backend-assigned id and the payload.
    fn from_create(_id: u64, _payload: Self::CreatePayload) -> Result<Self, String> {
        Err(format!("{} cannot be created", Self::NAME))
    }

    fn on_update(&mut self, _patch: &Self::Patch) -> Result<(), String> {
        Err(format!("{} cannot be updated", Self::NAME))
    }

    fn in_group(&self, _group: &Self::Group) -> bool {
        false
    }

    /// Whether `action` addresses this record.
    fn action_target(&self, _action: &Self::Action) -> bool {
        false
    }

    fn handle_action(&mut self, _action: &Self::Action) -> Result<(), String> {
        Err(format!("{} has no actions", Self::NAME))
    }
}

fn rejected(reason: String) -> ApiError {
    ApiError::Status { status: 422, body: reason }
}

fn not_found(what: String) -> ApiError {
    ApiError::Status { status: 404, body: format!("Item not found: {}", what) }
}

// =============================================================================
// 2. THE ACTOR
// =============================================================================

pub struct MemoryBackend<T: MemoryResource> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id: u64,
}

impl<T: MemoryResource> MemoryBackend<T> {
    pub fn new(buffer_size: usize, seed: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let next_id = seed.iter().filter_map(T::numeric_id).max().unwrap_or(0) + 1;
        let backend = Self { receiver, store: seed, next_id };
        (backend, ResourceClient::new(sender))
    }

    #[instrument(name = "memory_backend", skip(self), fields(resource = T::NAME))]
    pub async fn run(mut self) {
        info!(records = self.store.len(), "In-memory backend starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self.store.iter()
                        .filter(|item| item.matches_query(&query))
                        .cloned()
                        .collect();
                    debug!(count = items.len(), "Serving list");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Create { payload, respond_to } => {
                    let result = match T::from_create(self.next_id, payload) {
                        Ok(item) => {
                            self.next_id += 1;
                            self.store.push(item);
                            Ok(())
                        }
                        Err(e) => Err(rejected(e)),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.iter_mut().find(|item| item.id() == &id) {
                        Some(item) => item.on_update(&patch).map_err(rejected),
                        None => Err(not_found(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::UpdateGroup { group, patch, respond_to } => {
                    let _ = respond_to.send(self.update_group(&group, &patch));
                }
                ResourceRequest::Action { action, respond_to } => {
                    let result = match self.store.iter_mut().find(|item| item.action_target(&action)) {
                        Some(item) => item.handle_action(&action).map_err(rejected),
                        None => Err(not_found(format!("{:?}", action))),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("In-memory backend stopped");
    }

    /// All-or-nothing: the patch is applied to copies and written back only
    /// if every member of the group accepts it.
    fn update_group(&mut self, group: &T::Group, patch: &T::Patch) -> Result<(), ApiError> {
        let mut updated = Vec::new();
        for (index, item) in self.store.iter().enumerate().filter(|(_, item)| item.in_group(group)) {
            let mut copy = item.clone();
            copy.on_update(patch).map_err(rejected)?;
            updated.push((index, copy));
        }
        if updated.is_empty() {
            return Err(not_found(format!("{:?}", group)));
        }
        debug!(matched = updated.len(), "Group updated");
        for (index, item) in updated {
            self.store[index] = item;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderStatus, Product, RecordId, User, UserStatus, UserUpdate};
    use crate::product_resource::{ProductBulkUpdate, ProductCreate};
    use crate::user_resource::UserAction;

    fn spawn<T: MemoryResource>(seed: Vec<T>) -> ResourceClient<T> {
        let (backend, client) = MemoryBackend::new(8, seed);
        tokio::spawn(backend.run());
        client
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let client = spawn(vec![Product::new(1, "Milk", "Amul", "Dairy", 30.0, 10)]);

        let payload = ProductCreate {
            name: "Butter".into(),
            brand: "Amul".into(),
            category: "Dairy".into(),
            price: 55.0,
            stock: 4,
        };
        client.create(payload).await.unwrap();

        let products = client.list(()).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, RecordId::Number(2));
        assert_eq!(products[1].name, "Butter");
    }

    #[tokio::test]
    async fn test_group_update_touches_only_that_brand() {
        let client = spawn(vec![
            Product::new(1, "Milk", "Amul", "Dairy", 30.0, 10),
            Product::new(2, "Coffee", "Nestle", "Beverages", 120.0, 5),
            Product::new(3, "Cheese", "Amul", "Dairy", 90.0, 3),
        ]);

        let patch = ProductBulkUpdate { price: None, stock: Some(50) };
        client.update_group("Amul".to_string(), patch.clone()).await.unwrap();

        let stocks: Vec<u32> = client.list(()).await.unwrap().iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![50, 5, 50]);

        let missing = client.update_group("Britannia".to_string(), patch).await;
        assert!(matches!(missing, Err(ApiError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_orders_are_read_only() {
        let client = spawn(vec![Order::new(1, 1704067200, OrderStatus::Pending, 100.0)]);

        let result = client.update(RecordId::Number(1), ()).await;
        assert_eq!(result, Err(rejected("orders cannot be updated".to_string())));
    }

    #[tokio::test]
    async fn test_block_action_and_update_on_users() {
        let client = spawn(vec![
            User::new(1, "asha", "CUST-1", "98450 11111", UserStatus::Active, 1704067200),
            User::new(2, "ravi", "CUST-2", "98450 22222", UserStatus::Active, 1704067200),
        ]);

        let action = UserAction::SetBlocked { customer_id: "CUST-2".into(), blocked: true };
        client.perform_action(action).await.unwrap();

        let update = UserUpdate { phone: Some("98450 99999".into()), ..UserUpdate::default() };
        client.update(RecordId::Number(1), update).await.unwrap();

        let users = client.list(String::new()).await.unwrap();
        assert_eq!(users[0].phone, "98450 99999");
        assert_eq!(users[1].status, UserStatus::Block);

        let unknown = UserAction::SetBlocked { customer_id: "CUST-404".into(), blocked: true };
        let result = client.perform_action(unknown).await;
        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_create_numbers_after_the_largest_seeded_id() {
        let client = spawn(vec![
            Product::new(1, "Milk", "Amul", "Dairy", 30.0, 10),
            Product::new(5, "Coffee", "Nestle", "Beverages", 120.0, 5),
        ]);

        let payload = ProductCreate {
            name: "Tea".into(),
            brand: "Tata Sons".into(),
            category: "Beverages".into(),
            price: 80.0,
            stock: 7,
        };
        client.create(payload).await.unwrap();

        let ids: Vec<RecordId> = client.list(()).await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![RecordId::Number(1), RecordId::Number(5), RecordId::Number(6)]);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Shelf {
        id: RecordId,
        aisle: String,
        stock: u32,
        capacity: u32,
    }

    impl Resource for Shelf {
        type Id = RecordId;
        type Query = ();
        type CreatePayload = ();
        type Patch = u32;
        type Group = String;
        type Action = ();

        const NAME: &'static str = "shelves";

        fn id(&self) -> &RecordId { &self.id }
    }

    impl MemoryResource for Shelf {
        fn matches_query(&self, _query: &()) -> bool {
            true
        }

        fn on_update(&mut self, stock: &u32) -> Result<(), String> {
            if *stock > self.capacity {
                return Err(format!("shelf {} holds at most {}", self.id, self.capacity));
            }
            self.stock = *stock;
            Ok(())
        }

        fn in_group(&self, aisle: &String) -> bool {
            &self.aisle == aisle
        }
    }

    #[tokio::test]
    async fn test_group_update_is_all_or_nothing() {
        let shelf = |id: u64, capacity: u32| Shelf { id: RecordId::Number(id), aisle: "A".into(), stock: 1, capacity };
        let client = spawn(vec![shelf(1, 50), shelf(2, 50), shelf(3, 10)]);

        // The third shelf rejects the patch after the first two accepted it
        let result = client.update_group("A".to_string(), 20).await;
        assert_eq!(result, Err(rejected("shelf 3 holds at most 10".to_string())));

        let stocks: Vec<u32> = client.list(()).await.unwrap().iter().map(|s| s.stock).collect();
        assert_eq!(stocks, vec![1, 1, 1]);

        client.update_group("A".to_string(), 8).await.unwrap();
        let stocks: Vec<u32> = client.list(()).await.unwrap().iter().map(|s| s.stock).collect();
        assert_eq!(stocks, vec![8, 8, 8]);
    }
}

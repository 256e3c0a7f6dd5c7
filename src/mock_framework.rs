//! # Mock Framework
//!
//! Utilities for testing view models and tabs in isolation.
//!
//! Use [`create_mock_api`] to get a resource client and a receiver.
//! Then use helpers like [`expect_list`] or [`expect_action`] to assert behavior.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::notifications::{Notification, Notifier};
use crate::resource_framework::{Resource, ResourceClient, ResourceRequest, Response};
use crate::view_model::{ListViewModel, ListViewModelClient, Listing, ViewModelOptions};

/// Creates a mock API client and a receiver for asserting requests.
///
/// # Testing Strategy
/// View models only see the remote service through a [`ResourceClient`], so
/// tests hand them a client whose channel they control. Each request that
/// arrives can be inspected and answered with success, failure or not at all,
/// which makes network behaviour (including out-of-order responses)
/// deterministic.
pub fn create_mock_api<T: Resource>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Query, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreatePayload, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateGroup request
pub async fn expect_update_group<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Group, T::Patch, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::UpdateGroup { group, patch, respond_to }) => Some((group, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Resource>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Action, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Starts a view model with default options on top of `api`.
pub fn spawn_view_model<T: Listing>(
    api: ResourceClient<T>,
    notifier: Arc<RecordingNotifier>,
    initial_query: T::Query,
) -> ListViewModelClient<T> {
    let (view_model, client) = ListViewModel::new(ViewModelOptions::default(), initial_query, api, notifier);
    tokio::spawn(view_model.run());
    client
}

/// Notifier that keeps everything it is given.
#[derive(Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().unwrap().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::product_resource::ProductCreate;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_api::<Product>(10);

        // Test Create
        let create_task = tokio::spawn(async move {
            let product = ProductCreate {
                name: "Test".to_string(),
                brand: "Acme".to_string(),
                category: "Tools".to_string(),
                price: 10.0,
                stock: 1,
            };
            client.create(product).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Test");
        responder.send(Ok(())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(()));
    }
}

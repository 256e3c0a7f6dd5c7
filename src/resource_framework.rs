use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};

use crate::error::ApiError;

// =============================================================================
// 1. THE ABSTRACTION (Remote resources and their operations)
// =============================================================================

/// Trait that any record listed by the dashboard must implement to be
/// fetched and written through a [`ResourceClient`].
///
/// Operations a resource does not support use `()` for their payload type.
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    type Id: Clone + PartialEq + Display + Debug + Send + Sync + 'static;
    /// Server-side criteria of a list request (date, search text, ...).
    type Query: Clone + Debug + Send + Sync + 'static;
    type CreatePayload: Clone + Debug + Send + Sync + 'static;
    type Patch: Clone + Debug + Send + Sync + 'static;
    /// Key of a bulk update (e.g. the brand of a product).
    type Group: Clone + Debug + Send + Sync + 'static;
    type Action: Clone + Debug + Send + Sync + 'static;

    /// Plural name used in paths, logs and notifications.
    const NAME: &'static str;

    fn id(&self) -> &Self::Id;
}

/// A remote write against a resource.
#[derive(Debug, Clone)]
pub enum Mutation<T: Resource> {
    Create(T::CreatePayload),
    Update { id: T::Id, patch: T::Patch },
    UpdateGroup { group: T::Group, patch: T::Patch },
    Action(T::Action),
}

impl<T: Resource> Mutation<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update { .. } => "update",
            Mutation::UpdateGroup { .. } => "update_group",
            Mutation::Action(_) => "action",
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Resource> {
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Create {
        payload: T::CreatePayload,
        respond_to: Response<()>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<()>,
    },
    UpdateGroup {
        group: T::Group,
        patch: T::Patch,
        respond_to: Response<()>,
    },
    Action {
        action: T::Action,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC CLIENT
// =============================================================================

/// Handle to whichever backend actor serves `T` (HTTP or in-memory).
#[derive(Clone)]
pub struct ResourceClient<T: Resource> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| ApiError::ActorCommunicationError("Actor closed".to_string()))?;
        response.await.map_err(|_| ApiError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    pub async fn list(&self, query: T::Query) -> Result<Vec<T>, ApiError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to }).await
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn update_group(&self, group: T::Group, patch: T::Patch) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::UpdateGroup { group, patch, respond_to }).await
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::Action { action, respond_to }).await
    }

    /// Dispatches a [`Mutation`] to the matching write operation.
    pub async fn apply(&self, mutation: Mutation<T>) -> Result<(), ApiError> {
        match mutation {
            Mutation::Create(payload) => self.create(payload).await,
            Mutation::Update { id, patch } => self.update(id, patch).await,
            Mutation::UpdateGroup { group, patch } => self.update_group(group, patch).await,
            Mutation::Action(action) => self.perform_action(action).await,
        }
    }
}

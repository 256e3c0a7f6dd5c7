//! # List View-Model
//!
//! The state behind a dashboard tab: remote query, client-side filter and
//! sort, the last fetched collection and the fetch state.
//!
//! A [`ListViewModel`] runs as its own task and is the only writer of that
//! state. Tabs talk to it through a [`ListViewModelClient`]; every state change
//! publishes a fresh [`ListSnapshot`] on a watch channel for observers.
//!
//! Remote calls run in spawned tasks and report back through an internal
//! channel, so the loop keeps accepting input while requests are in flight.
//! Overlapping fetches are not cancelled: whichever response arrives last is
//! the one displayed.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::error::{ApiError, ViewModelError};
use crate::notifications::{Notification, Notifier};
use crate::resource_framework::{Mutation, Resource, ResourceClient};

/// Quiet period a debounced query must survive before it is fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Client-side behaviour of a listed resource.
pub trait Listing: Resource {
    type Filter: Clone + Default + Debug + Send + Sync + 'static;
    type SortKey: Copy + Default + Debug + Send + Sync + 'static;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Comparator for the given sort key. Used with a stable sort.
    fn compare(a: &Self, b: &Self, sort: Self::SortKey) -> Ordering;

    fn fetch_failed_message() -> String {
        format!("Failed to fetch {}", Self::NAME)
    }

    fn mutation_succeeded_message(_mutation: &Mutation<Self>) -> String {
        format!("{} updated successfully", Self::NAME)
    }

    fn mutation_failed_message(_mutation: &Mutation<Self>) -> String {
        format!("Failed to update {}", Self::NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
    Loaded,
    Failed(String),
}

/// Immutable copy of a view model's state.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T: Listing> {
    pub query: T::Query,
    pub filter: T::Filter,
    pub sort: T::SortKey,
    /// Everything the last successful fetch returned, in server order.
    pub items: Vec<T>,
    /// `items` after filtering and sorting.
    pub visible: Vec<T>,
    pub state: FetchState,
    /// A debounced query is waiting for its quiet period to end.
    pub search_pending: bool,
}

impl<T: Listing> ListSnapshot<T> {
    pub fn is_busy(&self) -> bool {
        self.state == FetchState::Fetching || self.search_pending
    }
}

pub fn visible_items<T: Listing>(items: &[T], filter: &T::Filter, sort: T::SortKey) -> Vec<T> {
    let mut visible: Vec<T> = items.iter().filter(|item| item.matches(filter)).cloned().collect();
    visible.sort_by(|a, b| T::compare(a, b, sort));
    visible
}

#[derive(Debug, Clone, Copy)]
pub struct ViewModelOptions {
    pub buffer_size: usize,
    pub debounce: Duration,
}

impl Default for ViewModelOptions {
    fn default() -> Self {
        Self { buffer_size: 32, debounce: DEFAULT_DEBOUNCE }
    }
}

// =============================================================================
// 2. THE MESSAGES
// =============================================================================

pub enum ViewModelRequest<T: Listing> {
    SetQuery { query: T::Query, debounce: bool },
    SetFilter(T::Filter),
    SetSort(T::SortKey),
    Refresh,
    Mutate {
        mutation: Mutation<T>,
        respond_to: oneshot::Sender<Result<(), ApiError>>,
    },
    Settled {
        respond_to: oneshot::Sender<ListSnapshot<T>>,
    },
}

enum ViewModelEvent<T: Listing> {
    FetchCompleted {
        generation: u64,
        query: T::Query,
        result: Result<Vec<T>, ApiError>,
    },
    MutationCompleted {
        mutation: Mutation<T>,
        result: Result<(), ApiError>,
        respond_to: oneshot::Sender<Result<(), ApiError>>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

pub struct ListViewModel<T: Listing> {
    receiver: mpsc::Receiver<ViewModelRequest<T>>,
    events_tx: mpsc::UnboundedSender<ViewModelEvent<T>>,
    events_rx: mpsc::UnboundedReceiver<ViewModelEvent<T>>,
    snapshots: watch::Sender<ListSnapshot<T>>,
    api: ResourceClient<T>,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    query: T::Query,
    filter: T::Filter,
    sort: T::SortKey,
    items: Vec<T>,
    state: FetchState,
    search_deadline: Option<Instant>,
    generation: u64,
    fetches_in_flight: usize,
    mutations_in_flight: usize,
    settled_waiters: Vec<oneshot::Sender<ListSnapshot<T>>>,
}

impl<T: Listing> ListViewModel<T> {
    /// Creates the view model without fetching; the owning tab decides when
    /// the first fetch happens.
    pub fn new(
        options: ViewModelOptions,
        initial_query: T::Query,
        api: ResourceClient<T>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, ListViewModelClient<T>) {
        let (sender, receiver) = mpsc::channel(options.buffer_size);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let initial = ListSnapshot {
            query: initial_query.clone(),
            filter: T::Filter::default(),
            sort: T::SortKey::default(),
            items: Vec::new(),
            visible: Vec::new(),
            state: FetchState::Idle,
            search_pending: false,
        };
        let (snapshots, snapshot_rx) = watch::channel(initial);

        let view_model = Self {
            receiver,
            events_tx,
            events_rx,
            snapshots,
            api,
            notifier,
            debounce: options.debounce,
            query: initial_query,
            filter: T::Filter::default(),
            sort: T::SortKey::default(),
            items: Vec::new(),
            state: FetchState::Idle,
            search_deadline: None,
            generation: 0,
            fetches_in_flight: 0,
            mutations_in_flight: 0,
            settled_waiters: Vec::new(),
        };
        let client = ListViewModelClient { sender, snapshots: snapshot_rx };
        (view_model, client)
    }

    #[instrument(name = "list_view_model", skip(self), fields(resource = T::NAME))]
    pub async fn run(mut self) {
        info!("View model starting");
        loop {
            let deadline = self.search_deadline;
            let quiet_period = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now));
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle_event(event),
                _ = quiet_period, if deadline.is_some() => {
                    debug!(query = ?self.query, "Search input settled");
                    self.search_deadline = None;
                    self.start_fetch();
                }
            }
            self.release_settled_waiters();
        }
        info!("View model stopped");
    }

    fn handle_request(&mut self, request: ViewModelRequest<T>) {
        match request {
            ViewModelRequest::SetQuery { query, debounce } => {
                self.query = query;
                if debounce {
                    self.search_deadline = Some(Instant::now() + self.debounce);
                    self.publish();
                } else {
                    self.search_deadline = None;
                    self.start_fetch();
                }
            }
            ViewModelRequest::SetFilter(filter) => {
                debug!(filter = ?filter, "Filter changed");
                self.filter = filter;
                self.publish();
            }
            ViewModelRequest::SetSort(sort) => {
                debug!(sort = ?sort, "Sort changed");
                self.sort = sort;
                self.publish();
            }
            ViewModelRequest::Refresh => self.start_fetch(),
            ViewModelRequest::Mutate { mutation, respond_to } => self.start_mutation(mutation, respond_to),
            ViewModelRequest::Settled { respond_to } => self.settled_waiters.push(respond_to),
        }
    }

    fn handle_event(&mut self, event: ViewModelEvent<T>) {
        match event {
            ViewModelEvent::FetchCompleted { generation, query, result } => {
                self.finish_fetch(generation, query, result);
            }
            ViewModelEvent::MutationCompleted { mutation, result, respond_to } => {
                self.finish_mutation(mutation, result, respond_to);
            }
        }
    }

    fn start_fetch(&mut self) {
        self.generation += 1;
        self.fetches_in_flight += 1;
        self.state = FetchState::Fetching;

        let generation = self.generation;
        let query = self.query.clone();
        debug!(generation, query = ?query, "Fetching");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list(query.clone()).await;
            let _ = events.send(ViewModelEvent::FetchCompleted { generation, query, result });
        });
        self.publish();
    }

    fn finish_fetch(&mut self, generation: u64, query: T::Query, result: Result<Vec<T>, ApiError>) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        match result {
            Ok(items) => {
                if generation < self.generation {
                    debug!(generation, latest = self.generation, query = ?query, "Applying response of a superseded fetch");
                }
                info!(count = items.len(), "Fetch succeeded");
                self.items = items;
                self.state = FetchState::Loaded;
            }
            Err(e) => {
                error!(error = %e, query = ?query, "Fetch failed");
                self.notifier.notify(Notification::error(T::fetch_failed_message()));
                self.state = FetchState::Failed(e.to_string());
            }
        }
        if self.fetches_in_flight > 0 {
            self.state = FetchState::Fetching;
        }
        self.publish();
    }

    fn start_mutation(&mut self, mutation: Mutation<T>, respond_to: oneshot::Sender<Result<(), ApiError>>) {
        self.mutations_in_flight += 1;
        debug!(kind = mutation.kind(), mutation = ?mutation, "Submitting write");

        let api = self.api.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.apply(mutation.clone()).await;
            let _ = events.send(ViewModelEvent::MutationCompleted { mutation, result, respond_to });
        });
    }

    /// Successful writes are reconciled by a full re-fetch, never merged.
    fn finish_mutation(
        &mut self,
        mutation: Mutation<T>,
        result: Result<(), ApiError>,
        respond_to: oneshot::Sender<Result<(), ApiError>>,
    ) {
        self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
        match &result {
            Ok(()) => {
                info!(kind = mutation.kind(), "Write succeeded");
                self.start_fetch();
                self.notifier.notify(Notification::success(T::mutation_succeeded_message(&mutation)));
            }
            Err(e) => {
                error!(kind = mutation.kind(), error = %e, "Write failed");
                self.notifier.notify(Notification::error(T::mutation_failed_message(&mutation)));
            }
        }
        let _ = respond_to.send(result);
    }

    fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            query: self.query.clone(),
            filter: self.filter.clone(),
            sort: self.sort,
            items: self.items.clone(),
            visible: visible_items(&self.items, &self.filter, self.sort),
            state: self.state.clone(),
            search_pending: self.search_deadline.is_some(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    fn is_settled(&self) -> bool {
        self.fetches_in_flight == 0 && self.mutations_in_flight == 0 && self.search_deadline.is_none()
    }

    fn release_settled_waiters(&mut self) {
        if self.settled_waiters.is_empty() || !self.is_settled() {
            return;
        }
        let snapshot = self.snapshot();
        for waiter in self.settled_waiters.drain(..) {
            let _ = waiter.send(snapshot.clone());
        }
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ListViewModelClient<T: Listing> {
    sender: mpsc::Sender<ViewModelRequest<T>>,
    snapshots: watch::Receiver<ListSnapshot<T>>,
}

impl<T: Listing> ListViewModelClient<T> {
    async fn send(&self, request: ViewModelRequest<T>) -> Result<(), ViewModelError> {
        self.sender.send(request)
            .await.map_err(|_| ViewModelError::ActorCommunicationError("View model closed".to_string()))
    }

    /// Changes the remote query and fetches at once.
    pub async fn set_query(&self, query: T::Query) -> Result<(), ViewModelError> {
        self.send(ViewModelRequest::SetQuery { query, debounce: false }).await
    }

    /// Changes the remote query; the fetch waits for the debounce window.
    pub async fn set_query_debounced(&self, query: T::Query) -> Result<(), ViewModelError> {
        self.send(ViewModelRequest::SetQuery { query, debounce: true }).await
    }

    pub async fn set_filter(&self, filter: T::Filter) -> Result<(), ViewModelError> {
        self.send(ViewModelRequest::SetFilter(filter)).await
    }

    pub async fn set_sort(&self, sort: T::SortKey) -> Result<(), ViewModelError> {
        self.send(ViewModelRequest::SetSort(sort)).await
    }

    pub async fn refresh(&self) -> Result<(), ViewModelError> {
        self.send(ViewModelRequest::Refresh).await
    }

    /// Performs one remote write and resolves once it has succeeded or failed.
    pub async fn mutate(&self, mutation: Mutation<T>) -> Result<(), ViewModelError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ViewModelRequest::Mutate { mutation, respond_to }).await?;
        let result = response.await
            .map_err(|_| ViewModelError::ActorCommunicationError("View model dropped".to_string()))?;
        result.map_err(ViewModelError::from)
    }

    /// Resolves once every request sent before this call has played out.
    pub async fn settled(&self) -> Result<ListSnapshot<T>, ViewModelError> {
        let (respond_to, response) = oneshot::channel();
        self.send(ViewModelRequest::Settled { respond_to }).await?;
        response.await
            .map_err(|_| ViewModelError::ActorCommunicationError("View model dropped".to_string()))
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.snapshots.clone()
    }
}

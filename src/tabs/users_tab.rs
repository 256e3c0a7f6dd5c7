use tracing::{debug, instrument};

use crate::domain::{User, UserUpdate};
use crate::error::ViewModelError;
use crate::resource_framework::Mutation;
use crate::user_resource::UserAction;
use crate::view_model::ListViewModelClient;

/// User table with debounced search, block toggle and edit form.
#[derive(Clone)]
pub struct UsersTab {
    inner: ListViewModelClient<User>,
}

impl_basic_tab!(UsersTab, User, users);

impl UsersTab {
    /// Typing in the search bar; fetches once input has been quiet for the
    /// debounce interval.
    #[instrument(skip(self))]
    pub async fn search(&self, term: String) -> Result<(), ViewModelError> {
        self.inner.set_query_debounced(term).await
    }

    /// Writes the inverse of the user's current block state.
    #[instrument(skip(self, user), fields(customer_id = %user.customer_id))]
    pub async fn toggle_block(&self, user: &User) -> Result<(), ViewModelError> {
        let blocked = !user.is_blocked();
        debug!(blocked, "Sending request");
        let action = UserAction::SetBlocked { customer_id: user.customer_id.clone(), blocked };
        self.inner.mutate(Mutation::Action(action)).await
    }

    /// Edit form pre-filled from `user`.
    pub fn edit_form(user: &User) -> UserUpdate {
        UserUpdate::from_user(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn update_user(&self, user: &User, update: UserUpdate) -> Result<(), ViewModelError> {
        if update.username.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ViewModelError::InvalidInput("username is required".to_string()));
        }
        debug!("Sending request");
        self.inner.mutate(Mutation::Update { id: user.id.clone(), patch: update }).await
    }
}

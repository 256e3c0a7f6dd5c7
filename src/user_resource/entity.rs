use std::cmp::Ordering;

use reqwest::RequestBuilder;
use serde_json::json;

use crate::domain::{RecordId, User, UserStatus, UserUpdate};
use crate::error::ApiError;
use crate::http_api::{HttpApi, HttpResource};
use crate::memory_backend::MemoryResource;
use crate::resource_framework::{Mutation, Resource};
use crate::view_model::Listing;
use super::UserAction;

impl Resource for User {
    type Id = RecordId;
    /// Free-text search; empty lists everyone.
    type Query = String;
    type CreatePayload = ();
    type Patch = UserUpdate;
    type Group = ();
    type Action = UserAction;

    const NAME: &'static str = "users";

    fn id(&self) -> &RecordId { &self.id }
}

impl HttpResource for User {
    /// `GET users?search=term`, without the parameter for an empty term.
    fn list_request(api: &HttpApi, search: &String) -> Result<RequestBuilder, ApiError> {
        let request = api.get(&["users"])?;
        if search.is_empty() {
            Ok(request)
        } else {
            Ok(request.query(&[("search", search)]))
        }
    }

    fn update_request(api: &HttpApi, id: &RecordId, patch: &UserUpdate) -> Result<RequestBuilder, ApiError> {
        Ok(api.put(&["users", id.to_string().as_str()])?.json(patch))
    }

    /// `PATCH users/{customer_id}/block`
    fn action_request(api: &HttpApi, action: &UserAction) -> Result<RequestBuilder, ApiError> {
        match action {
            UserAction::SetBlocked { customer_id, blocked } => {
                Ok(api.patch(&["users", customer_id.as_str(), "block"])?.json(&json!({ "blocked": blocked })))
            }
        }
    }
}

impl MemoryResource for User {
    fn numeric_id(&self) -> Option<u64> {
        self.id.as_number()
    }

    /// Case-insensitive match on username, customer id or phone.
    fn matches_query(&self, search: &String) -> bool {
        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.username, &self.customer_id, &self.phone]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn on_update(&mut self, patch: &UserUpdate) -> Result<(), String> {
        if let Some(username) = &patch.username {
            if username.trim().is_empty() {
                return Err("username must not be empty".to_string());
            }
            self.username = username.clone();
        }
        if let Some(customer_id) = &patch.customer_id {
            self.customer_id = customer_id.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        Ok(())
    }

    fn action_target(&self, action: &UserAction) -> bool {
        match action {
            UserAction::SetBlocked { customer_id, .. } => &self.customer_id == customer_id,
        }
    }

    fn handle_action(&mut self, action: &UserAction) -> Result<(), String> {
        match action {
            UserAction::SetBlocked { blocked, .. } => {
                self.status = if *blocked { UserStatus::Block } else { UserStatus::Active };
                Ok(())
            }
        }
    }
}

impl Listing for User {
    type Filter = ();
    type SortKey = ();

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(_a: &Self, _b: &Self, _sort: ()) -> Ordering {
        Ordering::Equal
    }

    fn mutation_succeeded_message(mutation: &Mutation<Self>) -> String {
        match mutation {
            Mutation::Action(UserAction::SetBlocked { blocked: true, .. }) => "User blocked successfully".to_string(),
            Mutation::Action(UserAction::SetBlocked { blocked: false, .. }) => "User unblocked successfully".to_string(),
            _ => "User updated successfully".to_string(),
        }
    }

    fn mutation_failed_message(mutation: &Mutation<Self>) -> String {
        match mutation {
            Mutation::Action(_) => "Failed to update user status".to_string(),
            _ => "Failed to update user".to_string(),
        }
    }
}

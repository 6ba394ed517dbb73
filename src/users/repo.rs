use thiserror::Error;
use tracing::debug;

use super::repo_types::{NewUser, User};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no user with id {0}")]
    NotFound(u64),
}

/// Ordered in-memory user list.
///
/// Known limitations, kept on purpose:
/// - ids are `len + 1` at insert time, so inserting after a delete can hand out
///   an id that is still in use; lookups then return the first match.
/// - emails are not unique; [`UserStore::get_by_email`] returns the earliest record.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two records a fresh process of the original service started with.
    /// Their password fields are bare algorithm tags with no salt or output,
    /// so logging in as them is a verification error.
    pub fn with_demo_users() -> Self {
        let users = vec![
            User {
                id: 1,
                name: "John".into(),
                age: 31,
                email: "john@example.com".into(),
                password: "$argon2i".into(),
            },
            User {
                id: 2,
                name: "Cédric".into(),
                age: 35,
                email: "cedric@example.com".into(),
                password: "$argon2id".into(),
            },
        ];
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All users, in insertion order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn get_by_id(&self, id: u64) -> Result<&User, StoreError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn get_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn insert(&mut self, new: NewUser) -> User {
        let id = self.users.len() as u64 + 1;
        let user = new.into_user(id);
        self.users.push(user.clone());
        debug!(user_id = id, "user inserted");
        user
    }

    /// Full replacement of the record; the id is kept.
    pub fn update(&mut self, id: u64, new: NewUser) -> Result<User, StoreError> {
        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = new.into_user(id);
        debug!(user_id = id, "user replaced");
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<User, StoreError> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        debug!(user_id = id, "user removed");
        Ok(self.users.remove(index))
    }
}

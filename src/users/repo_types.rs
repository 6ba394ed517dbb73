use serde::{Deserialize, Serialize};

/// User record in the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,          // assigned by the store
    pub name: String,
    pub age: i64,
    pub email: String,    // login key, not unique
    pub password: String, // Argon2 PHC string, never plaintext
}

/// Everything but the id; what insert and update take.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            password: self.password_hash,
        }
    }
}

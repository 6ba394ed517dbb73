use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for login. Absent fields are answered like bad credentials.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}

/// User record without its password hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            age: u.age,
            email: u.email,
        }
    }
}

use serde::Deserialize;

use super::repo_types::NewUser;
use crate::error::ApiError;

/// Body of `POST /user` and `PUT /user/:id`.
///
/// Every field is optional at decode time so that a missing password is
/// answered with `400 Password is required` whatever else is absent.
#[derive(Debug, Default, Deserialize)]
pub struct UserBody {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A body that passed the presence checks, waiting for its password hash.
#[derive(Debug)]
pub struct UserFields {
    name: String,
    age: i64,
    email: String,
}

impl UserBody {
    /// Splits off the plaintext password, checking it first. Empty counts as absent.
    pub fn split(self) -> Result<(String, UserFields), ApiError> {
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ApiError::Validation("Password is required"))?;
        match (self.name, self.age, self.email) {
            (Some(name), Some(age), Some(email)) => Ok((password, UserFields { name, age, email })),
            _ => Err(ApiError::Validation("name, age and email are required")),
        }
    }
}

impl UserFields {
    pub fn with_hash(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name,
            age: self.age,
            email: self.email,
            password_hash,
        }
    }
}

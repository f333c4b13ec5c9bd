//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::models::Group;

use super::UserId;
use super::serde_helpers;

/// User model matching the SurrealDB `user` table
///
/// `group` stays `None` until the student picks a cohort via the profile
/// group endpoint; the resolver then coerces unset groups to A.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub group: Option<Group>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user payload
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2 with a per-password salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Wire-format user info (never includes the password hash)
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            group: self.group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = User::hash_password("correct horse battery").unwrap();
        let user = User {
            id: None,
            name: "Asha".to_string(),
            email: "asha@college.edu".to_string(),
            hash_pass: hash,
            group: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(user.verify_password("correct horse battery").unwrap());
        assert!(!user.verify_password("wrong password").unwrap());
    }

    #[test]
    fn hashes_are_salted_per_password() {
        let h1 = User::hash_password("same-password").unwrap();
        let h2 = User::hash_password("same-password").unwrap();
        assert_ne!(h1, h2);
    }
}

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::users::users_model::{NewUser, User, UserUpdate};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Failed to hash password: {e}"
                )))
            })?;
        Ok(hash.to_string())
    }

    fn verify_password(candidate: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Stored password hash is invalid: {e}"
            )))
        })?;
        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password verification failed: {e}"
            )))),
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let email = new_user.email.trim().to_lowercase();
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "User with this email already exists".to_string(),
            )));
        }

        let password_hash = Self::hash_password(&new_user.password)?;
        let user = new_user.into_user(Uuid::new_v4().to_string(), password_hash);
        debug!("Registering user {}", user.email);
        self.repository.insert(user).await
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repository.find_by_email(&email)? else {
            return Ok(None);
        };
        if !Self::verify_password(password, &user.password_hash)? {
            return Ok(None);
        }
        Ok(Some(user))
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .get_by_id(user_id)
            .map_err(|_| Error::NotFound("User".to_string()))
    }

    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        self.repository.update_profile(user_id, update).await
    }

    async fn change_password(&self, user_id: &str, new_password: &str) -> Result<()> {
        if new_password.len() < 8 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            )));
        }
        let password_hash = Self::hash_password(new_password)?;
        self.repository.set_password_hash(user_id, password_hash).await
    }

    async fn deactivate(&self, user_id: &str) -> Result<()> {
        self.repository.set_active(user_id, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = UserService::hash_password("correct horse battery").unwrap();
        assert!(UserService::verify_password("correct horse battery", &hash).unwrap());
        assert!(!UserService::verify_password("wrong password", &hash).unwrap());
    }
}

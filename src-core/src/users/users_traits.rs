use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User, UserUpdate};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, user: User) -> Result<User>;
    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User>;
    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<()>;
    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<()>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User>;
    async fn change_password(&self, user_id: &str, new_password: &str) -> Result<()>;
    async fn deactivate(&self, user_id: &str) -> Result<()>;
}

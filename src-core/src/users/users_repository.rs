use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_model::{User, UserUpdate};
use crate::users::users_traits::UserRepositoryTrait;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table.find(user_id).first::<User>(&mut conn)?)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?)
    }

    async fn insert(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                Ok(diesel::insert_into(users::table)
                    .values(&user)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update_profile(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        let id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user: User = users::table.find(&id_owned).first(conn)?;

                if let Some(full_name) = update.full_name {
                    user.full_name = Some(full_name);
                }
                if let Some(currency) = update.currency {
                    user.currency = currency;
                }
                if let Some(timezone) = update.timezone {
                    user.timezone = timezone;
                }
                user.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(users::table.find(&id_owned))
                    .set(&user)
                    .execute(conn)?;

                Ok(users::table.find(&id_owned).first(conn)?)
            })
            .await
    }

    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<()> {
        let id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(users::table.find(&id_owned))
                    .set((
                        users::password_hash.eq(password_hash),
                        users::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn set_active(&self, user_id: &str, is_active: bool) -> Result<()> {
        let id_owned = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(users::table.find(&id_owned))
                    .set((
                        users::is_active.eq(is_active),
                        users::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }
}

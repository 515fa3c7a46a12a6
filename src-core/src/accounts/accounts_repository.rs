use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::accounts::accounts_model::{Account, AccountUpdate};
use crate::accounts::accounts_traits::AccountRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::accounts;
use crate::Error;

pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        AccountRepository { pool, writer }
    }
}

fn account_scoped(
    user_id: &str,
    account_id: &str,
) -> accounts::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    accounts::table
        .filter(accounts::id.eq(account_id.to_string()))
        .filter(accounts::user_id.eq(user_id.to_string()))
        .into_boxed()
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = accounts::table
            .filter(accounts::user_id.eq(user_id))
            .order(accounts::created_at.asc())
            .into_boxed();
        if let Some(is_active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(is_active));
        }
        Ok(query.load::<Account>(&mut conn)?)
    }

    fn list_linked(&self, user_id: &str) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(accounts::table
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::access_token.is_not_null())
            .order(accounts::created_at.asc())
            .load::<Account>(&mut conn)?)
    }

    fn get_by_id(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        account_scoped(user_id, account_id)
            .first::<Account>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Account".to_string()))
    }

    fn find_by_plaid_account_id(
        &self,
        user_id: &str,
        plaid_account_id: &str,
    ) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(accounts::table
            .filter(accounts::user_id.eq(user_id))
            .filter(accounts::plaid_account_id.eq(plaid_account_id))
            .first::<Account>(&mut conn)
            .optional()?)
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                Ok(diesel::insert_into(accounts::table)
                    .values(&account)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update(&self, account: Account) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let account_id = account.id.clone();
                diesel::update(accounts::table.find(&account_id))
                    .set(&account)
                    .execute(conn)?;
                Ok(accounts::table.find(&account_id).first(conn)?)
            })
            .await
    }

    async fn deactivate(&self, user_id: &str, account_id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::update(
                    accounts::table
                        .filter(accounts::id.eq(&id_owned))
                        .filter(accounts::user_id.eq(&user_owned)),
                )
                .set((
                    accounts::is_active.eq(false),
                    accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
                ))
                .execute(conn)?)
            })
            .await
    }

    async fn record_sync(
        &self,
        account_id: &str,
        current_balance: f64,
        available_balance: Option<f64>,
        synced_at: NaiveDateTime,
    ) -> Result<()> {
        let id_owned = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(accounts::table.find(&id_owned))
                    .set((
                        accounts::current_balance.eq(current_balance),
                        accounts::available_balance.eq(available_balance),
                        accounts::last_sync.eq(Some(synced_at)),
                        accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }
}

/// Applies an in-place update to an account row. Shared with the service so
/// validation happens before the write is queued.
pub(crate) fn apply_update(account: &mut Account, update: AccountUpdate) {
    if let Some(name) = update.name {
        account.name = name;
    }
    if let Some(balance) = update.current_balance {
        account.current_balance = balance;
    }
    account.updated_at = chrono::Utc::now().naive_utc();
}

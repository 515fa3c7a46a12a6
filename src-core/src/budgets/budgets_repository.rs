use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::budgets::budgets_model::Budget;
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::budgets;
use crate::Error;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = budgets::table
            .filter(budgets::user_id.eq(user_id.to_string()))
            .order(budgets::created_at.asc())
            .into_boxed();
        if let Some(is_active) = is_active_filter {
            query = query.filter(budgets::is_active.eq(is_active));
        }
        Ok(query.load::<Budget>(&mut conn)?)
    }

    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::id.eq(budget_id))
            .filter(budgets::user_id.eq(user_id))
            .first::<Budget>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Budget".to_string()))
    }

    async fn insert(&self, budget: Budget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                Ok(diesel::insert_into(budgets::table)
                    .values(&budget)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let budget_id = budget.id.clone();
                diesel::update(budgets::table.find(&budget_id))
                    .set(&budget)
                    .execute(conn)?;
                Ok(budgets::table.find(&budget_id).first(conn)?)
            })
            .await
    }

    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budgets::table
                        .filter(budgets::id.eq(&id_owned))
                        .filter(budgets::user_id.eq(&user_owned)),
                )
                .execute(conn)?)
            })
            .await
    }
}

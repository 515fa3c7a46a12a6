use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::schema::transactions;
use crate::transactions::transactions_model::{
    DateRange, Transaction, TransactionFilters,
};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::Error;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

fn apply_range(
    mut query: transactions::BoxedQuery<'static, diesel::sqlite::Sqlite>,
    range: &DateRange,
) -> transactions::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    if let Some(start) = range.start_date {
        query = query.filter(transactions::transaction_date.ge(start));
    }
    if let Some(end) = range.end_date {
        query = query.filter(transactions::transaction_date.le(end));
    }
    query
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list(&self, user_id: &str, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id.to_string()))
            .into_boxed();

        if let Some(account_id) = &filters.account_id {
            query = query.filter(transactions::account_id.eq(account_id.clone()));
        }
        if let Some(category) = filters.category {
            query = query.filter(transactions::category.eq(category.as_str()));
        }

        Ok(query
            .order(transactions::transaction_date.desc())
            .offset(filters.offset())
            .limit(filters.limit())
            .load::<Transaction>(&mut conn)?)
    }

    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .first::<Transaction>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Transaction".to_string()))
    }

    fn exists_by_plaid_transaction_id(&self, plaid_transaction_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = transactions::table
            .filter(transactions::plaid_transaction_id.eq(plaid_transaction_id))
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }

    fn load_expenses(&self, user_id: &str, range: &DateRange) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let query = transactions::table
            .filter(transactions::user_id.eq(user_id.to_string()))
            .filter(transactions::amount.gt(0.0))
            .into_boxed();
        Ok(apply_range(query, range)
            .order(transactions::transaction_date.asc())
            .load::<Transaction>(&mut conn)?)
    }

    fn search(
        &self,
        user_id: &str,
        terms: &[String],
        range: &DateRange,
        limit: i64,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let query = transactions::table
            .filter(transactions::user_id.eq(user_id.to_string()))
            .into_boxed();
        let rows = apply_range(query, range)
            .order(transactions::transaction_date.desc())
            .load::<Transaction>(&mut conn)?;

        if terms.is_empty() {
            return Ok(rows.into_iter().take(limit as usize).collect());
        }

        // Term matching happens here rather than in SQL so a term can hit
        // the description, the merchant name, or the category with one pass.
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        Ok(rows
            .into_iter()
            .filter(|t| {
                let description = t.description.to_lowercase();
                let merchant = t
                    .merchant_name
                    .as_deref()
                    .map(str::to_lowercase)
                    .unwrap_or_default();
                terms.iter().any(|term| {
                    description.contains(term)
                        || merchant.contains(term)
                        || t.category == *term
                })
            })
            .take(limit as usize)
            .collect())
    }

    fn sum_category_spent(
        &self,
        user_id: &str,
        category: &str,
        range: &DateRange,
    ) -> Result<f64> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id.to_string()))
            .filter(transactions::category.eq(category.to_string()))
            .filter(transactions::amount.gt(0.0))
            .select(sum(transactions::amount))
            .into_boxed();
        if let Some(start) = range.start_date {
            query = query.filter(transactions::transaction_date.ge(start));
        }
        if let Some(end) = range.end_date {
            query = query.filter(transactions::transaction_date.le(end));
        }
        let total: Option<f64> = query.first(&mut conn)?;
        Ok(total.unwrap_or(0.0))
    }

    async fn insert(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                Ok(diesel::insert_into(transactions::table)
                    .values(&transaction)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update(&self, transaction: Transaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let transaction_id = transaction.id.clone();
                diesel::update(transactions::table.find(&transaction_id))
                    .set(&transaction)
                    .execute(conn)?;
                Ok(transactions::table.find(&transaction_id).first(conn)?)
            })
            .await
    }

    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions::table
                        .filter(transactions::id.eq(&id_owned))
                        .filter(transactions::user_id.eq(&user_owned)),
                )
                .execute(conn)?)
            })
            .await
    }
}

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::goals::goals_model::Goal;
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::schema::goals;
use crate::Error;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = goals::table
            .filter(goals::user_id.eq(user_id.to_string()))
            .order(goals::created_at.asc())
            .into_boxed();
        if let Some(is_active) = is_active_filter {
            query = query.filter(goals::is_active.eq(is_active));
        }
        Ok(query.load::<Goal>(&mut conn)?)
    }

    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .filter(goals::id.eq(goal_id))
            .filter(goals::user_id.eq(user_id))
            .first::<Goal>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound("Goal".to_string()))
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                Ok(diesel::insert_into(goals::table)
                    .values(&goal)
                    .get_result(conn)?)
            })
            .await
    }

    async fn update(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_id = goal.id.clone();
                diesel::update(goals::table.find(&goal_id))
                    .set(&goal)
                    .execute(conn)?;
                Ok(goals::table.find(&goal_id).first(conn)?)
            })
            .await
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    goals::table
                        .filter(goals::id.eq(&id_owned))
                        .filter(goals::user_id.eq(&user_owned)),
                )
                .execute(conn)?)
            })
            .await
    }
}

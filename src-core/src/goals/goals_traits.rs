use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, GoalView, NewGoal};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn list(&self, user_id: &str, is_active_filter: Option<bool>) -> Result<Vec<Goal>>;
    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    async fn insert(&self, goal: Goal) -> Result<Goal>;
    async fn update(&self, goal: Goal) -> Result<Goal>;
    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user_id: &str) -> Result<Vec<GoalView>>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalView>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<GoalView>;
    async fn contribute(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<GoalView>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
}

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::goals::goals_model::{Goal, GoalUpdate, GoalView, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::{Error, Result};

pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { repository }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user_id: &str) -> Result<Vec<GoalView>> {
        let goals = self.repository.list(user_id, Some(true))?;
        Ok(goals.into_iter().map(GoalView::from).collect())
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalView> {
        Ok(GoalView::from(self.repository.get_by_id(user_id, goal_id)?))
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let now = chrono::Utc::now().naive_utc();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name,
            description: new_goal.description,
            target_amount: new_goal.target_amount,
            current_amount: 0.0,
            target_date: new_goal.target_date,
            is_active: true,
            is_achieved: false,
            achieved_date: None,
            created_at: now,
            updated_at: now,
        };
        debug!("Creating goal '{}' for user {}", goal.name, user_id);
        self.repository.insert(goal).await
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<GoalView> {
        let mut goal = self.repository.get_by_id(user_id, goal_id)?;

        if let Some(name) = update.name {
            goal.name = name;
        }
        if let Some(description) = update.description {
            goal.description = Some(description);
        }
        if let Some(target_amount) = update.target_amount {
            if target_amount <= 0.0 {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Goal target amount must be positive".to_string(),
                )));
            }
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = update.current_amount {
            goal.current_amount = current_amount;
        }
        if let Some(target_date) = update.target_date {
            goal.target_date = Some(target_date);
        }
        if let Some(is_active) = update.is_active {
            goal.is_active = is_active;
        }
        goal.refresh_achievement();
        goal.updated_at = chrono::Utc::now().naive_utc();

        Ok(GoalView::from(self.repository.update(goal).await?))
    }

    async fn contribute(&self, user_id: &str, goal_id: &str, amount: f64) -> Result<GoalView> {
        if amount <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be positive".to_string(),
            )));
        }
        let mut goal = self.repository.get_by_id(user_id, goal_id)?;
        goal.current_amount += amount;
        goal.refresh_achievement();
        goal.updated_at = chrono::Utc::now().naive_utc();

        let mut view = GoalView::from(self.repository.update(goal).await?);
        // The contribution response never reports more than 100%.
        view.progress_percentage = view.progress_percentage.min(100.0);
        Ok(view)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        let goal = self.repository.get_by_id(user_id, goal_id)?;
        self.repository.delete(user_id, &goal.id).await?;
        Ok(())
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::{Error, Result};

/// Database model for savings goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
// Updates write the whole row back; clearing achieved_date must NULL it.
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub is_active: bool,
    pub is_achieved: bool,
    pub achieved_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Re-evaluates the achievement flag after an amount change.
    pub(crate) fn refresh_achievement(&mut self) {
        if self.current_amount >= self.target_amount {
            if !self.is_achieved {
                self.is_achieved = true;
                self.achieved_date = Some(chrono::Utc::now().naive_utc());
            }
        } else if self.is_achieved {
            self.is_achieved = false;
            self.achieved_date = None;
        }
    }
}

/// Input model for creating a new goal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: f64,
    pub target_date: Option<NaiveDate>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal name cannot be empty".to_string(),
            )));
        }
        if self.target_amount <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Goal target amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Goal enriched with derived progress fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub remaining_amount: f64,
    pub progress_percentage: f64,
}

impl From<Goal> for GoalView {
    fn from(goal: Goal) -> Self {
        let remaining = goal.target_amount - goal.current_amount;
        let progress = if goal.target_amount > 0.0 {
            (goal.current_amount / goal.target_amount) * 100.0
        } else {
            0.0
        };
        GoalView {
            goal,
            remaining_amount: remaining,
            progress_percentage: progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: f64, target: f64, achieved: bool) -> Goal {
        let now = chrono::Utc::now().naive_utc();
        Goal {
            id: "g1".into(),
            user_id: "u1".into(),
            name: "Emergency fund".into(),
            description: None,
            target_amount: target,
            current_amount: current,
            target_date: None,
            is_active: true,
            is_achieved: achieved,
            achieved_date: if achieved { Some(now) } else { None },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn achievement_flips_exactly_at_target() {
        let mut g = goal(999.99, 1000.0, false);
        g.refresh_achievement();
        assert!(!g.is_achieved);

        g.current_amount = 1000.0;
        g.refresh_achievement();
        assert!(g.is_achieved);
        assert!(g.achieved_date.is_some());
    }

    #[test]
    fn raising_target_resets_achievement() {
        let mut g = goal(1000.0, 1000.0, true);
        g.target_amount = 2000.0;
        g.refresh_achievement();
        assert!(!g.is_achieved);
        assert!(g.achieved_date.is_none());
    }

    #[test]
    fn progress_view_derives_percentage() {
        let view = GoalView::from(goal(250.0, 1000.0, false));
        assert_eq!(view.progress_percentage, 25.0);
        assert_eq!(view.remaining_amount, 750.0);
    }
}

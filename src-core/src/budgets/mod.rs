pub mod budgets_model;
pub mod budgets_repository;
pub mod budgets_service;
pub mod budgets_traits;

pub use budgets_model::{
    Budget, BudgetOverview, BudgetPeriod, BudgetTotals, BudgetUpdate, BudgetView, GoalTotals,
    NewBudget,
};
pub use budgets_repository::BudgetRepository;
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};

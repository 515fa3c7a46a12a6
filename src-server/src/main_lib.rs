use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};
use fintrack_core::{
    accounts::{AccountRepository, AccountService, AccountServiceTrait},
    assistant::{AssistantService, AssistantServiceTrait, CompletionClient},
    bank::{BankService, BankServiceTrait, PlaidClient},
    budgets::{BudgetRepository, BudgetService, BudgetServiceTrait},
    db,
    goals::{GoalRepository, GoalService, GoalServiceTrait},
    transactions::{TransactionRepository, TransactionService, TransactionServiceTrait},
    users::{UserRepository, UserService, UserServiceTrait},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub bank_service: Arc<dyn BankServiceTrait>,
    pub assistant_service: Arc<dyn AssistantServiceTrait>,
    pub auth: AuthManager,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));

    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));
    let account_service: Arc<dyn AccountServiceTrait> =
        Arc::new(AccountService::new(account_repository.clone()));
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        account_repository.clone(),
    ));
    let budget_service: Arc<dyn BudgetServiceTrait> = Arc::new(BudgetService::new(
        budget_repository.clone(),
        transaction_repository.clone(),
        goal_repository.clone(),
    ));
    let goal_service: Arc<dyn GoalServiceTrait> =
        Arc::new(GoalService::new(goal_repository.clone()));

    let plaid_client = PlaidClient::from_env();
    if plaid_client.is_none() {
        tracing::warn!("Plaid credentials not configured; bank aggregation is disabled");
    }
    let bank_service: Arc<dyn BankServiceTrait> = Arc::new(BankService::new(
        plaid_client,
        account_repository.clone(),
        transaction_repository.clone(),
    ));

    let completion_client = CompletionClient::from_env();
    if completion_client.is_none() {
        tracing::warn!("OPENAI_API_KEY not configured; AI advice will be unavailable");
    }
    let assistant_service: Arc<dyn AssistantServiceTrait> = Arc::new(AssistantService::new(
        account_repository.clone(),
        transaction_repository.clone(),
        transaction_service.clone(),
        budget_service.clone(),
        goal_service.clone(),
        completion_client,
    ));

    let auth = AuthManager::new(&config.jwt_secret, config.token_ttl);

    Ok(Arc::new(AppState {
        user_service,
        account_service,
        transaction_service,
        budget_service,
        goal_service,
        bank_service,
        assistant_service,
        auth,
    }))
}

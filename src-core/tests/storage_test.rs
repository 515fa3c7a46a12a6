use std::sync::Arc;

use tempfile::tempdir;

use fintrack_core::accounts::{
    AccountRepository, AccountService, AccountServiceTrait, AccountType, AccountUpdate, NewAccount,
};
use fintrack_core::budgets::{
    BudgetPeriod, BudgetRepository, BudgetService, BudgetServiceTrait, BudgetUpdate, NewBudget,
};
use fintrack_core::db;
use fintrack_core::goals::{GoalRepository, GoalService, GoalServiceTrait, NewGoal};
use fintrack_core::transactions::{
    DateRange, NewTransaction, TransactionCategory, TransactionFilters, TransactionRepository,
    TransactionService, TransactionServiceTrait, TransactionType,
};
use fintrack_core::users::{NewUser, UserRepository, UserService, UserServiceTrait};

struct Harness {
    user_id: String,
    account_service: AccountService,
    transaction_service: Arc<TransactionService>,
    budget_service: BudgetService,
    goal_service: GoalService,
    // Keeps the temp dir alive for the duration of the test.
    _tmp: tempfile::TempDir,
}

async fn build_harness() -> Harness {
    let tmp = tempdir().unwrap();
    let db_path = db::init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service = UserService::new(user_repository);
    let user = user_service
        .register(NewUser {
            email: "test@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            full_name: Some("Test User".to_string()),
        })
        .await
        .unwrap();

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));

    Harness {
        user_id: user.id,
        account_service: AccountService::new(account_repository.clone()),
        transaction_service: Arc::new(TransactionService::new(
            transaction_repository.clone(),
            account_repository.clone(),
        )),
        budget_service: BudgetService::new(
            budget_repository,
            transaction_repository,
            goal_repository.clone(),
        ),
        goal_service: GoalService::new(goal_repository),
        _tmp: tmp,
    }
}

#[tokio::test]
async fn account_crud_round_trip() {
    let h = build_harness().await;

    let account = h
        .account_service
        .create_account(
            &h.user_id,
            NewAccount {
                name: "Everyday Checking".to_string(),
                account_type: AccountType::Checking,
                institution_name: Some("Test Bank".to_string()),
                is_manual: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(account.current_balance, 0.0);
    assert_eq!(account.sync_status, "manual");

    let updated = h
        .account_service
        .update_account(
            &h.user_id,
            &account.id,
            AccountUpdate {
                name: None,
                current_balance: Some(1250.75),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.current_balance, 1250.75);
    assert_eq!(updated.name, "Everyday Checking");

    h.account_service
        .delete_account(&h.user_id, &account.id)
        .await
        .unwrap();
    let active = h.account_service.get_active_accounts(&h.user_id).unwrap();
    assert!(active.is_empty());

    // Soft delete keeps the row reachable by id.
    let fetched = h.account_service.get_account(&h.user_id, &account.id).unwrap();
    assert!(!fetched.is_active);
}

#[tokio::test]
async fn transactions_filter_and_summarize() {
    let h = build_harness().await;
    let account = h
        .account_service
        .create_account(
            &h.user_id,
            NewAccount {
                name: "Card".to_string(),
                account_type: AccountType::CreditCard,
                institution_name: None,
                is_manual: true,
            },
        )
        .await
        .unwrap();

    for (amount, category) in [
        (30.0, TransactionCategory::Groceries),
        (70.0, TransactionCategory::Groceries),
        (40.0, TransactionCategory::Restaurants),
    ] {
        h.transaction_service
            .create_transaction(
                &h.user_id,
                NewTransaction {
                    account_id: account.id.clone(),
                    amount,
                    transaction_type: TransactionType::Debit,
                    description: format!("{} purchase", category),
                    merchant_name: None,
                    category,
                    transaction_date: None,
                },
            )
            .await
            .unwrap();
    }

    let groceries = h
        .transaction_service
        .list_transactions(
            &h.user_id,
            &TransactionFilters {
                category: Some(TransactionCategory::Groceries),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(groceries.len(), 2);

    let summary = h
        .transaction_service
        .category_summary(&h.user_id, &DateRange::default())
        .unwrap();
    assert_eq!(summary.len(), 2);
    // Sorted by total descending.
    assert_eq!(summary[0].category, "groceries");
    assert_eq!(summary[0].total, 100.0);
    assert_eq!(summary[0].average, 50.0);
    assert_eq!(summary[1].total, 40.0);
}

#[tokio::test]
async fn unknown_account_is_rejected() {
    let h = build_harness().await;
    let err = h
        .transaction_service
        .create_transaction(
            &h.user_id,
            NewTransaction {
                account_id: "missing".to_string(),
                amount: 5.0,
                transaction_type: TransactionType::Debit,
                description: "orphan".to_string(),
                merchant_name: None,
                category: TransactionCategory::Uncategorized,
                transaction_date: None,
            },
        )
        .await;
    assert!(err.is_err());
}

#[tokio::test]
async fn budget_derives_spent_and_over_flag() {
    let h = build_harness().await;
    let account = h
        .account_service
        .create_account(
            &h.user_id,
            NewAccount {
                name: "Checking".to_string(),
                account_type: AccountType::Checking,
                institution_name: None,
                is_manual: true,
            },
        )
        .await
        .unwrap();

    h.budget_service
        .create_budget(
            &h.user_id,
            NewBudget {
                name: "Groceries".to_string(),
                category: TransactionCategory::Groceries,
                amount: 100.0,
                period: BudgetPeriod::Monthly,
                start_date: None,
                end_date: None,
            },
        )
        .await
        .unwrap();

    h.transaction_service
        .create_transaction(
            &h.user_id,
            NewTransaction {
                account_id: account.id.clone(),
                amount: 100.0,
                transaction_type: TransactionType::Debit,
                description: "grocery run".to_string(),
                merchant_name: None,
                category: TransactionCategory::Groceries,
                transaction_date: None,
            },
        )
        .await
        .unwrap();

    let budgets = h.budget_service.get_budgets(&h.user_id, Some(true)).unwrap();
    assert_eq!(budgets.len(), 1);
    let view = &budgets[0];
    assert_eq!(view.spent_amount, 100.0);
    assert_eq!(view.remaining_amount, 0.0);
    assert_eq!(view.percentage_used, 100.0);
    // Exactly on the cap is not over budget.
    assert!(!view.over_budget);

    h.transaction_service
        .create_transaction(
            &h.user_id,
            NewTransaction {
                account_id: account.id,
                amount: 0.5,
                transaction_type: TransactionType::Debit,
                description: "gum".to_string(),
                merchant_name: None,
                category: TransactionCategory::Groceries,
                transaction_date: None,
            },
        )
        .await
        .unwrap();

    let budgets = h.budget_service.get_budgets(&h.user_id, Some(true)).unwrap();
    assert!(budgets[0].over_budget);

    let overview = h.budget_service.get_overview(&h.user_id).unwrap();
    assert_eq!(overview.budgets.total_budgets, 1);
    assert_eq!(overview.budgets.over_budget_count, 1);
}

#[tokio::test]
async fn budget_update_changes_amount() {
    let h = build_harness().await;
    let budget = h
        .budget_service
        .create_budget(
            &h.user_id,
            NewBudget {
                name: "Fun".to_string(),
                category: TransactionCategory::Entertainment,
                amount: 50.0,
                period: BudgetPeriod::Monthly,
                start_date: None,
                end_date: None,
            },
        )
        .await
        .unwrap();

    let view = h
        .budget_service
        .update_budget(
            &h.user_id,
            &budget.id,
            BudgetUpdate {
                name: None,
                amount: Some(80.0),
                is_active: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(view.budget.amount, 80.0);
    assert_eq!(view.remaining_amount, 80.0);
}

#[tokio::test]
async fn goal_contributions_flip_achievement() {
    let h = build_harness().await;
    let goal = h
        .goal_service
        .create_goal(
            &h.user_id,
            NewGoal {
                name: "Vacation".to_string(),
                description: None,
                target_amount: 500.0,
                target_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(goal.current_amount, 0.0);

    let view = h
        .goal_service
        .contribute(&h.user_id, &goal.id, 200.0)
        .await
        .unwrap();
    assert!(!view.goal.is_achieved);
    assert_eq!(view.progress_percentage, 40.0);

    let view = h
        .goal_service
        .contribute(&h.user_id, &goal.id, 300.0)
        .await
        .unwrap();
    assert!(view.goal.is_achieved);
    assert!(view.goal.achieved_date.is_some());
    // Contribution responses cap progress at 100.
    assert_eq!(view.progress_percentage, 100.0);

    let err = h.goal_service.contribute(&h.user_id, &goal.id, 0.0).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn duplicate_email_registration_fails() {
    let h = build_harness().await;
    // build_harness already registered test@example.com
    let _ = h;

    let tmp = tempdir().unwrap();
    let db_path = db::init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = db::spawn_writer((*pool).clone());
    let service = UserService::new(Arc::new(UserRepository::new(pool, writer)));

    let new_user = NewUser {
        email: "dup@example.com".to_string(),
        password: "longenoughpw".to_string(),
        full_name: None,
    };
    service.register(new_user.clone()).await.unwrap();
    let err = service.register(new_user).await;
    assert!(err.is_err());

    let authenticated = service
        .authenticate("dup@example.com", "longenoughpw")
        .unwrap();
    assert!(authenticated.is_some());
    let rejected = service.authenticate("dup@example.com", "wrong").unwrap();
    assert!(rejected.is_none());

    let user_id = authenticated.unwrap().id;
    service
        .change_password(&user_id, "a-new-password")
        .await
        .unwrap();
    assert!(service
        .authenticate("dup@example.com", "a-new-password")
        .unwrap()
        .is_some());
    assert!(service
        .authenticate("dup@example.com", "longenoughpw")
        .unwrap()
        .is_none());

    service.deactivate(&user_id).await.unwrap();
    let user = service.get_user(&user_id).unwrap();
    assert!(!user.is_active);
}

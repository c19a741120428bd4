//! Integration tests for budget lifecycles: copy-forward, cascade delete,
//! bulk copy and usage recomputation.

mod common;

use common::{budget, category, expense, setup_db, transaction};
use dompet_core::budget::BudgetStatus;
use dompet_db::repositories::{BudgetError, TransactionError};
use dompet_db::{BudgetRepository, CategoryRepository, TransactionRepository};
use uuid::Uuid;

#[tokio::test]
async fn test_food_budget_warning_scenario() {
    let db = setup_db().await;
    let categories = CategoryRepository::new(db.clone());
    let budgets = BudgetRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);

    let food = categories.create(category("Food", None)).await.unwrap();
    let created = budgets
        .create(budget(food.id, "Food", 1_000_000, "2025-06", false))
        .await
        .unwrap();
    assert_eq!(created.budget.used, 0);
    assert_eq!(created.budget.status, BudgetStatus::Safe);

    let saved = transactions
        .create(expense(food.id, 900_000, "2025-06-10"))
        .await
        .unwrap();
    assert_eq!(saved.month.to_string(), "2025-06");
    assert_eq!(saved.category_name.as_deref(), Some("Food"));

    let synced = budgets.find(created.budget.id).await.unwrap().unwrap();
    assert_eq!(synced.used, 900_000);
    assert_eq!(synced.remaining, 100_000);
    assert_eq!(synced.status, BudgetStatus::Warning);
}

#[tokio::test]
async fn test_used_tracks_sum_across_writes() {
    let db = setup_db().await;
    let budgets = BudgetRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);
    let food = Uuid::new_v4();
    let rent = Uuid::new_v4();

    let june = budgets
        .create(budget(food, "Food", 1_000, "2025-06", false))
        .await
        .unwrap()
        .budget;
    let rent_june = budgets
        .create(budget(rent, "Rent", 5_000, "2025-06", false))
        .await
        .unwrap()
        .budget;

    let first = transactions.create(expense(food, 300, "2025-06-01")).await.unwrap();
    transactions.create(expense(food, 200, "2025-06-02")).await.unwrap();
    // Income and other months never count.
    transactions
        .create(transaction("income", food, 999, "2025-06-03"))
        .await
        .unwrap();
    transactions.create(expense(food, 50, "2025-07-01")).await.unwrap();
    assert_eq!(budgets.find(june.id).await.unwrap().unwrap().used, 500);

    // Move the first expense to the rent category: both budgets follow.
    transactions
        .update(first.id, expense(rent, 300, "2025-06-01"))
        .await
        .unwrap();
    assert_eq!(budgets.find(june.id).await.unwrap().unwrap().used, 200);
    assert_eq!(budgets.find(rent_june.id).await.unwrap().unwrap().used, 300);

    transactions.delete(first.id).await.unwrap();
    assert_eq!(budgets.find(rent_june.id).await.unwrap().unwrap().used, 0);

    let over = transactions.create(expense(food, 900, "2025-06-20")).await.unwrap();
    let food_june = budgets.find(june.id).await.unwrap().unwrap();
    assert_eq!(food_june.used, 1_100);
    assert_eq!(food_june.remaining, -100);
    assert_eq!(food_june.status, BudgetStatus::Over);

    assert!(matches!(
        transactions.delete(Uuid::new_v4()).await,
        Err(TransactionError::NotFound(_))
    ));
    transactions.delete(over.id).await.unwrap();
    assert_eq!(budgets.find(june.id).await.unwrap().unwrap().used, 200);
}

#[tokio::test]
async fn test_transaction_without_budget_is_still_saved() {
    let db = setup_db().await;
    let transactions = TransactionRepository::new(db);

    let saved = transactions
        .create(expense(Uuid::new_v4(), 1_000, "2025-06-10"))
        .await
        .unwrap();
    assert!(transactions.find(saved.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_budget_created_after_transactions_counts_them() {
    let db = setup_db().await;
    let budgets = BudgetRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);
    let food = Uuid::new_v4();

    transactions.create(expense(food, 700, "2025-06-05")).await.unwrap();
    let created = budgets
        .create(budget(food, "Food", 1_000, "2025-06", false))
        .await
        .unwrap();

    assert_eq!(created.budget.used, 700);
    assert_eq!(created.budget.status, BudgetStatus::Safe);
}

#[tokio::test]
async fn test_copy_forward_creates_exactly_one_copy() {
    let budgets = BudgetRepository::new(setup_db().await);
    let food = Uuid::new_v4();

    let first = budgets
        .create(budget(food, "Food", 1_000, "2025-12", true))
        .await
        .unwrap();
    let copy = first.carried_forward.expect("copy for next month");
    assert_eq!(copy.month.to_string(), "2026-01");
    assert_eq!(copy.parent_id, Some(first.budget.id));
    assert_eq!(copy.limit, 1_000);
    assert!(copy.continue_next_month);

    // Same month pair again: the copy already exists.
    let second = budgets
        .create(budget(food, "Food", 1_000, "2025-12", true))
        .await
        .unwrap();
    assert!(second.carried_forward.is_none());

    let january = budgets.list(Some("2026-01".parse().unwrap())).await.unwrap();
    assert_eq!(january.len(), 1);
}

#[tokio::test]
async fn test_delete_original_cascades_copy_delete_does_not() {
    let budgets = BudgetRepository::new(setup_db().await);

    let food = budgets
        .create(budget(Uuid::new_v4(), "Food", 1_000, "2025-06", true))
        .await
        .unwrap();
    let rent = budgets
        .create(budget(Uuid::new_v4(), "Rent", 2_000, "2025-06", true))
        .await
        .unwrap();
    let rent_copy = rent.carried_forward.unwrap();

    // Copy first: only itself goes.
    assert_eq!(budgets.delete(rent_copy.id).await.unwrap(), 1);
    assert!(budgets.find(rent.budget.id).await.unwrap().is_some());

    // Original: takes its copy along.
    assert_eq!(budgets.delete(food.budget.id).await.unwrap(), 2);
    let food_copy = food.carried_forward.unwrap();
    assert!(budgets.find(food_copy.id).await.unwrap().is_none());

    assert!(matches!(
        budgets.delete(food.budget.id).await,
        Err(BudgetError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_recomputes_usage_and_leaves_copy() {
    let db = setup_db().await;
    let budgets = BudgetRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);
    let food = Uuid::new_v4();

    transactions.create(expense(food, 500, "2025-06-05")).await.unwrap();
    let created = budgets
        .create(budget(food, "Food", 10_000, "2025-06", true))
        .await
        .unwrap();

    let updated = budgets
        .update(created.budget.id, budget(food, "Food", 600, "2025-06", true))
        .await
        .unwrap();
    assert_eq!(updated.used, 500);
    assert_eq!(updated.status, BudgetStatus::Warning);

    let copy = budgets
        .find(created.carried_forward.unwrap().id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(copy.limit, 10_000);
}

#[tokio::test]
async fn test_bulk_copy_skips_existing_categories() {
    let db = setup_db().await;
    let budgets = BudgetRepository::new(db.clone());
    let transactions = TransactionRepository::new(db);
    let food = Uuid::new_v4();
    let rent = Uuid::new_v4();

    budgets.create(budget(food, "Food", 1_000, "2025-06", false)).await.unwrap();
    budgets.create(budget(rent, "Rent", 2_000, "2025-06", false)).await.unwrap();
    budgets.create(budget(rent, "Rent", 2_500, "2025-08", false)).await.unwrap();
    transactions.create(expense(food, 400, "2025-08-02")).await.unwrap();

    let from = "2025-06".parse().unwrap();
    let to = "2025-08".parse().unwrap();
    let copied = budgets.copy_month(from, to).await.unwrap();
    assert_eq!(copied.len(), 1);
    assert_eq!(copied[0].category_name, "Food");
    assert_eq!(copied[0].used, 400);
    assert_eq!(copied[0].parent_id, None);

    // Repeating is a no-op.
    assert!(budgets.copy_month(from, to).await.unwrap().is_empty());
    assert_eq!(budgets.list(Some(to)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_carry_forward_past_last_month_writes_nothing() {
    let budgets = BudgetRepository::new(setup_db().await);

    let result = budgets
        .create(budget(Uuid::new_v4(), "Food", 1_000, "9999-12", true))
        .await;

    assert!(matches!(result, Err(BudgetError::Invalid(_))));
    assert!(budgets.list(None).await.unwrap().is_empty());
}

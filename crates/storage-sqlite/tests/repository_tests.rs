//! Repository tests against a real SQLite file.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use familybudget_core::budget::{BudgetCategoryUpdate, BudgetRepositoryTrait, NewBudgetCategory};
use familybudget_core::errors::{DatabaseError, Error};
use familybudget_core::expenses::{ExpenseRepositoryTrait, ExpenseUpdate, NewExpense};
use familybudget_core::goals::{evaluate_alerts, AlertEvent, GoalRepositoryTrait, GoalUpdate, NewGoal};
use familybudget_core::incomes::{IncomeRepositoryTrait, IncomeUpdate, NewIncome, Recurrence};
use familybudget_core::members::{ChildLimits, Member, MemberRepositoryTrait, MemberRole, NewMember};
use familybudget_storage_sqlite::{
    create_pool, init, ping, run_migrations, spawn_writer, BudgetRepository, DbPool,
    ExpenseRepository, GoalRepository, IncomeRepository, MemberRepository, WriteHandle,
};

struct TestDb {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    _dir: TempDir,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("test.db");
    let db_path = init(&path.to_string_lossy()).expect("init db");
    let pool = create_pool(&db_path).expect("pool");
    run_migrations(&pool).expect("migrations");
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn new_income(user_id: &str, amount: Decimal, date: NaiveDateTime) -> NewIncome {
    NewIncome {
        id: None,
        user_id: user_id.to_string(),
        source: "Salary".to_string(),
        amount,
        date,
        description: None,
        recurrence: Recurrence::Monthly,
    }
}

fn new_expense(user_id: &str, amount: Decimal, date: NaiveDateTime) -> NewExpense {
    NewExpense {
        id: None,
        user_id: user_id.to_string(),
        category_id: None,
        amount,
        description: Some("lunch".to_string()),
        date,
        payment_method: Some("card".to_string()),
    }
}

fn new_goal(user_id: &str) -> NewGoal {
    NewGoal {
        id: None,
        user_id: user_id.to_string(),
        title: "Emergency fund".to_string(),
        target_amount: dec!(1000),
        current_amount: Decimal::ZERO,
        deadline: Some(at(12, 31, 0)),
        alert_percentages: vec![25, 50],
        alert_before_days: Some(14),
    }
}

#[tokio::test]
async fn test_ping_after_migrations() {
    let db = setup();
    ping(&db.pool).unwrap();
}

#[tokio::test]
async fn test_income_period_is_inclusive_and_scoped_to_user() {
    let db = setup();
    let repo = IncomeRepository::new(db.pool.clone(), db.writer.clone());

    repo.insert(new_income("u1", dec!(100), at(3, 31, 23))).await.unwrap();
    repo.insert(new_income("u1", dec!(200), at(4, 1, 0))).await.unwrap();
    repo.insert(new_income("u1", dec!(300), at(4, 30, 23))).await.unwrap();
    repo.insert(new_income("u2", dec!(999), at(4, 10, 12))).await.unwrap();

    let april = repo
        .list_by_user_in_period("u1", at(4, 1, 0), at(4, 30, 23))
        .unwrap();
    let amounts: Vec<Decimal> = april.iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![dec!(200), dec!(300)]);
}

#[tokio::test]
async fn test_income_update_and_delete() {
    let db = setup();
    let repo = IncomeRepository::new(db.pool.clone(), db.writer.clone());
    let created = repo
        .insert(new_income("u1", dec!(10.25), at(5, 2, 9)))
        .await
        .unwrap();
    assert_eq!(created.amount, dec!(10.25));

    let updated = repo
        .update(IncomeUpdate {
            id: created.id.clone(),
            user_id: "u1".to_string(),
            source: "Bonus".to_string(),
            amount: dec!(50),
            date: at(5, 3, 9),
            description: Some("Q2".to_string()),
            recurrence: Recurrence::OneTime,
        })
        .await
        .unwrap();
    assert_eq!(updated.source, "Bonus");
    assert_eq!(updated.recurrence, Recurrence::OneTime);

    let err = repo
        .update(IncomeUpdate {
            id: created.id.clone(),
            user_id: "someone-else".to_string(),
            source: "Bonus".to_string(),
            amount: dec!(50),
            date: at(5, 3, 9),
            description: None,
            recurrence: Recurrence::OneTime,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));

    assert_eq!(repo.delete("u1", &created.id).await.unwrap(), 1);
    assert_eq!(repo.delete("u1", &created.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_budget_upsert_keeps_one_row_and_delete_cascades() {
    let db = setup();
    let repo = BudgetRepository::new(db.pool.clone(), db.writer.clone());

    let first = repo.upsert_budget("u1", dec!(1500)).await.unwrap();
    let second = repo.upsert_budget("u1", dec!(2000)).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.total_budget, dec!(2000));

    let food = repo
        .insert_category(
            &second.id,
            NewBudgetCategory {
                id: None,
                name: "Food".to_string(),
                limit: dec!(400),
            },
        )
        .await
        .unwrap();
    repo.insert_category(
        &second.id,
        NewBudgetCategory {
            id: None,
            name: "Transport".to_string(),
            limit: dec!(100),
        },
    )
    .await
    .unwrap();

    let renamed = repo
        .update_category(
            &second.id,
            BudgetCategoryUpdate {
                id: food.id.clone(),
                name: "Groceries".to_string(),
                limit: dec!(450),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Groceries");

    let names: Vec<String> = repo
        .get_categories(&second.id)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Groceries", "Transport"]);

    assert_eq!(repo.delete_budget("u1").await.unwrap(), 1);
    assert!(repo.get_budget("u1").unwrap().is_none());
    assert!(repo.get_categories(&second.id).unwrap().is_empty());
}

#[tokio::test]
async fn test_category_for_missing_budget_is_rejected() {
    let db = setup();
    let repo = BudgetRepository::new(db.pool.clone(), db.writer.clone());
    let err = repo
        .insert_category(
            "no-such-budget",
            NewBudgetCategory {
                id: None,
                name: "Food".to_string(),
                limit: dec!(1),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(_)));
}

#[tokio::test]
async fn test_contribution_updates_goal_and_records_expense() {
    let db = setup();
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());
    let goal = goals.insert(new_goal("u1")).await.unwrap();

    let result = goals
        .apply_contribution(
            "u1",
            &goal.id,
            dec!(260),
            new_expense("u1", dec!(260), at(6, 1, 8)),
            at(6, 1, 8),
            evaluate_alerts,
        )
        .await
        .unwrap();

    assert_eq!(result.goal.current_amount, dec!(260));
    assert_eq!(result.expense.amount, dec!(260));
    assert_eq!(result.goal.alerted_percents, BTreeSet::from([25]));
    assert!(matches!(
        result.alerts.as_slice(),
        [AlertEvent::Milestone { percent: 25, .. }]
    ));
    assert_eq!(expenses.list_by_user("u1").unwrap().len(), 1);

    let stored = goals.get_by_id("u1", &goal.id).unwrap().unwrap();
    assert_eq!(stored.alerted_percents, BTreeSet::from([25]));
}

#[tokio::test]
async fn test_failed_contribution_leaves_no_expense() {
    let db = setup();
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());
    let goal = goals.insert(new_goal("owner")).await.unwrap();

    let err = goals
        .apply_contribution(
            "intruder",
            &goal.id,
            dec!(5),
            new_expense("intruder", dec!(5), at(6, 1, 8)),
            at(6, 1, 8),
            evaluate_alerts,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    assert!(expenses.list_by_user("intruder").unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_contributions_are_not_lost() {
    let db = setup();
    let goals = Arc::new(GoalRepository::new(db.pool.clone(), db.writer.clone()));
    let goal = goals.insert(new_goal("u1")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let goals = goals.clone();
        let goal_id = goal.id.clone();
        handles.push(tokio::spawn(async move {
            let when = at(6, 1, i % 24);
            goals
                .apply_contribution(
                    "u1",
                    &goal_id,
                    dec!(5),
                    new_expense("u1", dec!(5), when),
                    when,
                    evaluate_alerts,
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = goals.get_by_id("u1", &goal.id).unwrap().unwrap();
    assert_eq!(stored.current_amount, dec!(100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_contributions_fire_each_milestone_once() {
    let db = setup();
    let goals = Arc::new(GoalRepository::new(db.pool.clone(), db.writer.clone()));
    let goal = goals
        .insert(NewGoal {
            alert_percentages: vec![50],
            deadline: None,
            ..new_goal("u1")
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let goals = goals.clone();
        let goal_id = goal.id.clone();
        handles.push(tokio::spawn(async move {
            goals
                .apply_contribution(
                    "u1",
                    &goal_id,
                    dec!(100),
                    new_expense("u1", dec!(100), at(6, 1, 8)),
                    at(6, 1, 8),
                    evaluate_alerts,
                )
                .await
        }));
    }

    let mut milestone_alerts = 0;
    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        milestone_alerts += result
            .alerts
            .iter()
            .filter(|a| matches!(a, AlertEvent::Milestone { percent: 50, .. }))
            .count();
    }
    assert_eq!(milestone_alerts, 1);

    let stored = goals.get_by_id("u1", &goal.id).unwrap().unwrap();
    assert_eq!(stored.current_amount, dec!(800));
    assert_eq!(stored.alerted_percents, BTreeSet::from([50]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_alert_checks_report_each_alert_once() {
    let db = setup();
    let goals = Arc::new(GoalRepository::new(db.pool.clone(), db.writer.clone()));
    for title in ["Bike", "Trip"] {
        goals
            .insert(NewGoal {
                title: title.to_string(),
                current_amount: dec!(600),
                deadline: Some(at(6, 3, 12)),
                alert_before_days: Some(7),
                ..new_goal("u1")
            })
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..6 {
        let goals = goals.clone();
        handles.push(tokio::spawn(async move {
            goals.record_alerts("u1", at(6, 1, 8), evaluate_alerts).await
        }));
    }
    let mut alerts = Vec::new();
    for handle in handles {
        alerts.extend(handle.await.unwrap().unwrap());
    }

    // Two milestones and one deadline alert per goal, across every concurrent check.
    assert_eq!(alerts.len(), 6);
    let deadline_alerts = alerts
        .iter()
        .filter(|a| matches!(a.alert, AlertEvent::Deadline { days_left: 3, .. }))
        .count();
    assert_eq!(deadline_alerts, 2);

    for goal in goals.list_by_user("u1").unwrap() {
        assert_eq!(goal.alerted_percents, BTreeSet::from([25, 50]));
        assert_eq!(goal.last_deadline_alert_date, Some(at(6, 1, 8)));
    }
    assert!(goals
        .record_alerts("u1", at(6, 1, 20), evaluate_alerts)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_goal_update_can_clear_deadline_and_keeps_alert_history() {
    let db = setup();
    let goals = GoalRepository::new(db.pool.clone(), db.writer.clone());
    let goal = goals.insert(new_goal("u1")).await.unwrap();
    goals
        .apply_contribution(
            "u1",
            &goal.id,
            dec!(300),
            new_expense("u1", dec!(300), at(6, 1, 8)),
            at(6, 1, 8),
            evaluate_alerts,
        )
        .await
        .unwrap();

    let updated = goals
        .update(GoalUpdate {
            id: goal.id.clone(),
            user_id: "u1".to_string(),
            title: "Rainy day".to_string(),
            target_amount: dec!(2000),
            current_amount: dec!(300),
            deadline: None,
            alert_percentages: vec![10, 90],
            alert_before_days: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.deadline, None);
    assert_eq!(updated.alert_before_days, None);
    assert_eq!(updated.alert_percentages, vec![10, 90]);
    assert_eq!(updated.alerted_percents, BTreeSet::from([25]));
}

#[tokio::test]
async fn test_member_children_and_limits() {
    let db = setup();
    let repo = MemberRepository::new(db.pool.clone(), db.writer.clone());
    let parent = repo
        .insert(NewMember {
            id: None,
            name: "Alex".to_string(),
            role: MemberRole::Parent,
            parent_id: None,
            spending_limit: None,
            monthly_cap: None,
        })
        .await
        .unwrap();
    let child = repo
        .insert(NewMember {
            id: None,
            name: "Sam".to_string(),
            role: MemberRole::Child,
            parent_id: Some(parent.id.clone()),
            spending_limit: Some(dec!(20)),
            monthly_cap: None,
        })
        .await
        .unwrap();

    let limited = repo
        .update_limits(
            &child.id,
            ChildLimits {
                spending_limit: None,
                monthly_cap: Some(dec!(150)),
            },
        )
        .await
        .unwrap();
    assert_eq!(limited.spending_limit, None);
    assert_eq!(limited.monthly_cap, Some(dec!(150)));

    let children = repo.list_children(&parent.id).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].role, MemberRole::Child);
    assert!(repo.find_by_id("missing").unwrap().is_none());
}

fn child_with_cap(cap: Decimal) -> Member {
    Member {
        id: "kid".to_string(),
        name: "Sam".to_string(),
        role: MemberRole::Child,
        parent_id: Some("parent".to_string()),
        spending_limit: None,
        monthly_cap: Some(cap),
        created_at: at(1, 1, 0),
        updated_at: at(1, 1, 0),
    }
}

#[tokio::test]
async fn test_child_expense_over_monthly_cap_is_rejected() {
    let db = setup();
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());
    let kid = child_with_cap(dec!(40));

    expenses
        .insert(new_expense("kid", dec!(30), at(3, 2, 9)), Some(kid.clone()))
        .await
        .unwrap();
    // Previous month does not count.
    expenses
        .insert(new_expense("kid", dec!(40), at(2, 28, 9)), Some(kid.clone()))
        .await
        .unwrap();

    let err = expenses
        .insert(new_expense("kid", dec!(11), at(3, 30, 9)), Some(kid.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ConstraintViolation(_)));

    // Without constraints the same insert goes through.
    expenses
        .insert(new_expense("kid", dec!(11), at(3, 30, 9)), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_child_expense_update_excludes_itself_from_cap() {
    let db = setup();
    let expenses = ExpenseRepository::new(db.pool.clone(), db.writer.clone());
    let kid = child_with_cap(dec!(40));
    let stored = expenses
        .insert(new_expense("kid", dec!(30), at(3, 2, 9)), Some(kid.clone()))
        .await
        .unwrap();

    let updated = expenses
        .update(
            ExpenseUpdate {
                id: stored.id.clone(),
                user_id: "kid".to_string(),
                category_id: None,
                amount: dec!(40),
                description: None,
                date: at(3, 2, 9),
                payment_method: None,
            },
            Some(kid),
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, dec!(40));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_child_expenses_respect_monthly_cap() {
    let db = setup();
    let expenses = Arc::new(ExpenseRepository::new(db.pool.clone(), db.writer.clone()));
    let kid = child_with_cap(dec!(40));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let expenses = expenses.clone();
        let kid = kid.clone();
        handles.push(tokio::spawn(async move {
            expenses
                .insert(new_expense("kid", dec!(30), at(3, 5, 9)), Some(kid))
                .await
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert!(matches!(err, Error::ConstraintViolation(_))),
        }
    }
    assert_eq!(accepted, 1);

    let total: Decimal = expenses
        .list_by_user("kid")
        .unwrap()
        .iter()
        .map(|e| e.amount)
        .sum();
    assert_eq!(total, dec!(30));
}

use chrono::{DateTime, TimeZone, Utc};

use engine::{
    CashbookEntryCmd, CashbookFilter, DayReference, EngineError, Money, PaymentMode, UNCATEGORIZED,
};

mod common;

use common::{corrupt_amount, create_user, engine_with_db};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

#[tokio::test]
async fn summary_splits_by_day_and_payment_mode() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    let entries = [
        CashbookEntryCmd::new("IN", "100", "CASH").entry_date(at(1, 10)),
        CashbookEntryCmd::new("IN", "50", "ONLINE").entry_date(at(2, 9)),
        CashbookEntryCmd::new("OUT", "30", "CASH").entry_date(at(2, 11)),
    ];
    for cmd in entries {
        engine.add_cashbook_entry(user.id, cmd).await.unwrap();
    }

    let reference = DayReference::at(chrono_tz::UTC, at(2, 18));
    let summary = engine
        .cashbook_summary_at(user.id, &reference)
        .await
        .unwrap();

    assert_eq!(summary.total_balance, Money::new(12000));
    assert_eq!(summary.todays_balance, Money::new(2000));
    assert_eq!(summary.online_balance, Money::new(5000));
    assert_eq!(summary.cash_balance, Money::new(7000));
    assert_eq!(summary.todays_online_balance, Money::new(5000));
    assert_eq!(summary.todays_cash_balance, Money::new(-3000));
    assert_eq!(
        summary.online_balance + summary.cash_balance,
        summary.total_balance
    );
}

#[tokio::test]
async fn empty_cashbook_summary_is_zero() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    let summary = engine.cashbook_summary(user.id).await.unwrap();
    assert_eq!(summary.total_balance, Money::ZERO);
    assert_eq!(summary.todays_balance, Money::ZERO);
}

#[tokio::test]
async fn summaries_are_scoped_per_user() {
    let (engine, _db) = engine_with_db().await;
    let alice = create_user(&engine, "alice").await;
    let bob = create_user(&engine, "bob").await;
    engine
        .add_cashbook_entry(alice.id, CashbookEntryCmd::new("IN", "10", "CASH"))
        .await
        .unwrap();

    let summary = engine.cashbook_summary(bob.id).await.unwrap();
    assert_eq!(summary.total_balance, Money::ZERO);
    assert!(engine.category_rollup(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_cashbook_input_writes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    let err = engine
        .add_cashbook_entry(user.id, CashbookEntryCmd::new("DEBIT", "10", "CASH"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidEntryType(_)));

    let err = engine
        .add_cashbook_entry(user.id, CashbookEntryCmd::new("IN", "10", "CARD"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPaymentMode(_)));

    let err = engine
        .add_cashbook_entry(user.id, CashbookEntryCmd::new("IN", "ten", "CASH"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedAmount { .. }));

    let listed = engine
        .cashbook_entries(user.id, &CashbookFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn entries_are_listed_newest_first_and_filtered() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("IN", "10", "CASH")
                .category("Sales")
                .entry_date(at(1, 8)),
        )
        .await
        .unwrap();
    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("OUT", "4", "ONLINE").entry_date(at(3, 8)),
        )
        .await
        .unwrap();
    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("IN", "7", "ONLINE")
                .category("Sales")
                .entry_date(at(5, 8)),
        )
        .await
        .unwrap();

    let all = engine
        .cashbook_entries(user.id, &CashbookFilter::default())
        .await
        .unwrap();
    let dates: Vec<DateTime<Utc>> = all.iter().map(|e| e.entry_date).collect();
    assert_eq!(dates, [at(5, 8), at(3, 8), at(1, 8)]);

    let window = CashbookFilter {
        from: Some(at(2, 0)),
        to: Some(at(5, 8)),
        ..CashbookFilter::default()
    };
    let ranged = engine.cashbook_entries(user.id, &window).await.unwrap();
    assert_eq!(ranged.len(), 2);

    let sales = CashbookFilter {
        category: Some("Sales".to_string()),
        ..CashbookFilter::default()
    };
    let sales = engine.cashbook_entries(user.id, &sales).await.unwrap();
    assert_eq!(sales.len(), 2);

    let uncategorized = CashbookFilter {
        category: Some(UNCATEGORIZED.to_string()),
        ..CashbookFilter::default()
    };
    let uncategorized = engine
        .cashbook_entries(user.id, &uncategorized)
        .await
        .unwrap();
    assert_eq!(uncategorized.len(), 1);
    assert_eq!(uncategorized[0].payment_mode, PaymentMode::Online);
    assert_eq!(uncategorized[0].category, None);
}

#[tokio::test]
async fn rollup_merges_declared_and_used_categories() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    let sales = engine
        .create_category(user.id, "Sales", "IN")
        .await
        .unwrap();
    engine
        .create_category(user.id, "Rent", "OUT")
        .await
        .unwrap();

    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("IN", "50", "CASH")
                .category("Sales")
                .entry_date(at(4, 8)),
        )
        .await
        .unwrap();
    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("OUT", "20", "CASH")
                .category("  ")
                .entry_date(at(1, 8)),
        )
        .await
        .unwrap();
    engine
        .add_cashbook_entry(
            user.id,
            CashbookEntryCmd::new("OUT", "5", "ONLINE")
                .category("Fuel")
                .entry_date(at(2, 8)),
        )
        .await
        .unwrap();

    let rollup = engine.category_rollup(user.id).await.unwrap();
    assert_eq!(rollup.len(), 4);

    let by_name = |name: &str| rollup.iter().find(|s| s.name == name).unwrap();

    let sales_summary = by_name("Sales");
    assert_eq!(sales_summary.id, Some(sales.id));
    assert_eq!(sales_summary.total_in, Money::new(5000));
    assert_eq!(sales_summary.balance, Money::new(5000));
    assert_eq!(sales_summary.entries_count, 1);

    let rent = by_name("Rent");
    assert!(rent.id.is_some());
    assert_eq!(rent.entries_count, 0);
    assert_eq!(rent.balance, Money::ZERO);

    let uncategorized = by_name(UNCATEGORIZED);
    assert_eq!(uncategorized.id, None);
    assert_eq!(uncategorized.total_out, Money::new(2000));
    assert_eq!(uncategorized.balance, Money::new(-2000));

    let fuel = by_name("Fuel");
    assert_eq!(fuel.id, None);
    assert_eq!(fuel.last_entry_date, at(2, 8));

    let dates: Vec<DateTime<Utc>> = rollup.iter().map(|s| s.last_entry_date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn rollup_ties_follow_a_fixed_order() {
    let (engine, _db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;

    engine
        .create_category(user.id, "Zeta", "IN")
        .await
        .unwrap();
    engine
        .create_category(user.id, "Alpha", "IN")
        .await
        .unwrap();
    for name in ["Mango", "Kiwi"] {
        engine
            .add_cashbook_entry(
                user.id,
                CashbookEntryCmd::new("IN", "1", "CASH")
                    .category(name)
                    .entry_date(at(2, 8)),
            )
            .await
            .unwrap();
    }

    let declared: Vec<String> = engine
        .categories(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    let rollup: Vec<String> = engine
        .category_rollup(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();

    // Untouched categories keep their creation date, newer than any entry.
    assert_eq!(rollup[..2], declared[..]);
    assert_eq!(rollup[2..], ["Kiwi", "Mango"]);
}

#[tokio::test]
async fn malformed_cashbook_amount_fails_the_summary() {
    let (engine, db) = engine_with_db().await;
    let user = create_user(&engine, "alice").await;
    let entry = engine
        .add_cashbook_entry(user.id, CashbookEntryCmd::new("IN", "10", "CASH"))
        .await
        .unwrap();

    corrupt_amount(&db, "cashbook_entries", entry.id, "1O").await;

    let err = engine.cashbook_summary(user.id).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::MalformedAmount { entry_id: Some(id), .. } if id == entry.id
    ));
    let err = engine.category_rollup(user.id).await.unwrap_err();
    assert!(matches!(err, EngineError::MalformedAmount { .. }));
}

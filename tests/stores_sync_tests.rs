// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{
    MockBackend, account_json, error_json, gateway, overview_json, session_with_token,
    transaction_json,
};
use kopilka::error::ApiError;
use kopilka::models::{NewTransaction, TxType};
use kopilka::store::Stores;
use rust_decimal::Decimal;

fn new_tx() -> NewTransaction {
    NewTransaction {
        account_id: "a1".into(),
        category_id: "c1".into(),
        r#type: TxType::Expense,
        amount: Decimal::new(2500, 2),
        description: Some("Coffee".into()),
        date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
    }
}

#[test]
fn creating_a_transaction_refreshes_accounts_and_overview() {
    let backend = MockBackend::start(vec![
        (
            200,
            format!(
                r#"{{"transaction":{}}}"#,
                transaction_json("t1", "expense", 25.0, "2025-02-10")
            ),
        ),
        (
            200,
            format!(r#"{{"accounts":[{}]}}"#, account_json("a1", "Cash", 75.0, true)),
        ),
        (200, overview_json("month", 0.0, 25.0)),
    ]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut stores = Stores::default();
    stores.create_transaction(&gw, &session, &new_tx()).unwrap();

    assert_eq!(stores.transactions.transactions()[0].id, "t1");
    assert_eq!(stores.accounts.accounts()[0].balance, Decimal::new(75, 0));
    assert!(stores.analytics.overview().is_some());

    let requests = backend.finish();
    let paths: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        paths,
        [
            ("POST", "/api/v1/transactions"),
            ("GET", "/api/v1/accounts"),
            ("GET", "/api/v1/analytics/overview?period=month"),
        ]
    );
}

#[test]
fn deleting_a_transaction_refreshes_accounts_and_overview() {
    let backend = MockBackend::start(vec![
        (200, r#"{"message":"deleted"}"#.into()),
        (200, r#"{"accounts":[]}"#.into()),
        (200, overview_json("month", 0.0, 0.0)),
    ]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut stores = Stores::default();
    stores.delete_transaction(&gw, &session, "t1").unwrap();

    let requests = backend.finish();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/v1/transactions/t1");
}

#[test]
fn failed_mutation_skips_the_refresh() {
    let backend = MockBackend::start(vec![(422, error_json("insufficient funds"))]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut stores = Stores::default();
    stores.create_transaction(&gw, &session, &new_tx()).unwrap();

    assert_eq!(stores.transactions.error(), Some("insufficient funds"));
    // No follow-up account or analytics requests.
    assert_eq!(backend.finish().len(), 1);
}

#[test]
fn unauthorized_mutation_aborts_immediately() {
    let backend = MockBackend::start(vec![(401, error_json("token expired"))]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("stale");

    let mut stores = Stores::default();
    let err = stores
        .delete_transaction(&gw, &session, "t1")
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(backend.finish().len(), 1);
}

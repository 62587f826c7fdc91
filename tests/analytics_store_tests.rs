// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{MockBackend, error_json, gateway, overview_json, session_with_token};
use kopilka::error::ApiError;
use kopilka::models::Period;
use kopilka::store::{AnalyticsStore, TransactionFilter};
use rust_decimal::Decimal;

#[test]
fn overview_parses_and_remembers_the_period() {
    let backend = MockBackend::start(vec![(200, overview_json("year", 5000.0, 3000.0))]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut store = AnalyticsStore::default();
    store.fetch_overview(&gw, &session, Period::Year).unwrap();

    let o = store.overview().unwrap();
    assert_eq!(o.total_income, Decimal::new(5000, 0));
    assert_eq!(o.net_income, Decimal::new(2000, 0));
    assert_eq!(store.period(), Period::Year);

    let requests = backend.finish();
    assert_eq!(requests[0].path, "/api/v1/analytics/overview?period=year");
}

#[test]
fn refresh_reuses_the_last_period() {
    let backend = MockBackend::start(vec![
        (200, overview_json("quarter", 100.0, 50.0)),
        (200, overview_json("quarter", 200.0, 50.0)),
    ]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut store = AnalyticsStore::default();
    store
        .fetch_overview(&gw, &session, Period::Quarter)
        .unwrap();
    store.refresh_overview(&gw, &session).unwrap();

    let requests = backend.finish();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].path, "/api/v1/analytics/overview?period=quarter");
}

#[test]
fn aggregate_errors_are_independent() {
    let backend = MockBackend::start(vec![
        (500, error_json("overview broke")),
        (200, r#"[{"date":"2025-02-01","income":10.0,"expense":5.0,"balance":105.0}]"#.into()),
    ]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut store = AnalyticsStore::default();
    store.fetch_overview(&gw, &session, Period::Month).unwrap();
    store.fetch_trends(&gw, &session, 30).unwrap();

    assert_eq!(store.overview_error(), Some("overview broke"));
    assert!(store.overview().is_none());
    assert!(store.trends_error().is_none());
    assert_eq!(store.trends().len(), 1);
    backend.finish();
}

#[test]
fn forecast_failures_are_swallowed() {
    let backend = MockBackend::start(vec![(500, error_json("not enough history"))]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut store = AnalyticsStore::default();
    store.fetch_forecast(&gw, &session, 3).unwrap();

    assert!(store.forecast().is_none());
    assert!(store.overview_error().is_none());
    backend.finish();
}

#[test]
fn forecast_unauthorized_still_propagates() {
    let backend = MockBackend::start(vec![(401, error_json("token expired"))]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("stale");

    let mut store = AnalyticsStore::default();
    let err = store.fetch_forecast(&gw, &session, 3).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    backend.finish();
}

#[test]
fn cashflow_sends_date_range() {
    let backend = MockBackend::start(vec![(200, "[]".into())]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let mut store = AnalyticsStore::default();
    store
        .fetch_cashflow(
            &gw,
            &session,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        )
        .unwrap();

    let requests = backend.finish();
    assert_eq!(
        requests[0].path,
        "/api/v1/analytics/cashflow?start_date=2025-02-01&end_date=2025-02-28"
    );
}

#[test]
fn report_export_sends_the_period() {
    let backend = MockBackend::start(vec![(200, "%PDF-1.4".into())]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let store = AnalyticsStore::default();
    let blob = store
        .export_report(&gw, &session, Period::Quarter)
        .unwrap();
    assert_eq!(blob, b"%PDF-1.4");

    let requests = backend.finish();
    assert_eq!(requests[0].path, "/api/v1/export/report?period=quarter");
}

#[test]
fn export_returns_the_raw_body() {
    let backend = MockBackend::start(vec![(200, "id,amount\n1,10.5\n".into())]);
    let gw = gateway(backend.base_url());
    let (_dir, session) = session_with_token("tok-1");

    let store = AnalyticsStore::default();
    let blob = store
        .export_transactions(&gw, &session, &TransactionFilter::default())
        .unwrap();
    assert_eq!(blob, b"id,amount\n1,10.5\n");

    let requests = backend.finish();
    assert_eq!(requests[0].path, "/api/v1/export/transactions");
}

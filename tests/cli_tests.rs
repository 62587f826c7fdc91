// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kopilka::cli;

#[test]
fn tx_list_accepts_filter_and_pagination_flags() {
    let matches = cli::build_cli().get_matches_from([
        "kopilka", "tx", "list", "--type", "expense", "--account", "a1", "--from", "2025-01-01",
        "--to", "2025-01-31", "--limit", "25", "--page", "2", "--search", "coffee",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    assert_eq!(list_m.get_one::<String>("type").unwrap(), "expense");
    assert_eq!(*list_m.get_one::<u32>("limit").unwrap(), 25);
    assert_eq!(*list_m.get_one::<u32>("page").unwrap(), 2);
    assert_eq!(list_m.get_one::<String>("search").unwrap(), "coffee");
}

#[test]
fn tx_list_rejects_unknown_type() {
    let result = cli::build_cli().try_get_matches_from([
        "kopilka", "tx", "list", "--type", "transfer",
    ]);
    assert!(result.is_err());
}

#[test]
fn tx_add_requires_the_core_fields() {
    let result =
        cli::build_cli().try_get_matches_from(["kopilka", "tx", "add", "--amount", "10"]);
    assert!(result.is_err());

    let result = cli::build_cli().try_get_matches_from([
        "kopilka", "tx", "add", "--account", "a1", "--category", "c1", "--type", "expense",
        "--amount", "10", "--date", "2025-02-01",
    ]);
    assert!(result.is_ok());
}

#[test]
fn analytics_overview_defaults_to_month() {
    let matches = cli::build_cli().get_matches_from(["kopilka", "analytics", "overview"]);
    let Some(("analytics", a_m)) = matches.subcommand() else {
        panic!("no analytics subcommand");
    };
    let Some(("overview", o_m)) = a_m.subcommand() else {
        panic!("no overview subcommand");
    };
    assert_eq!(o_m.get_one::<String>("period").unwrap(), "month");
}

#[test]
fn auth_login_takes_email_and_password() {
    let matches = cli::build_cli().get_matches_from([
        "kopilka", "auth", "login", "--email", "me@example.com", "--password", "secret1",
    ]);
    let Some(("auth", auth_m)) = matches.subcommand() else {
        panic!("no auth subcommand");
    };
    let Some(("login", login_m)) = auth_m.subcommand() else {
        panic!("no login subcommand");
    };
    assert_eq!(
        login_m.get_one::<String>("email").unwrap(),
        "me@example.com"
    );
}

#[test]
fn export_summary_requires_a_date_range() {
    let result = cli::build_cli().try_get_matches_from([
        "kopilka", "export", "summary", "--out", "summary.pdf",
    ]);
    assert!(result.is_err());

    let result = cli::build_cli().try_get_matches_from([
        "kopilka", "export", "summary", "--out", "summary.pdf", "--from", "2025-01-01", "--to",
        "2025-01-31",
    ]);
    assert!(result.is_ok());
}

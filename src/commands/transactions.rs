// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiGateway;
use crate::models::{NewTransaction, Transaction, TxType};
use crate::store::{Session, Stores, TransactionFilter};
use crate::utils::{
    format_currency, format_date, maybe_print_json, parse_date, parse_decimal, pretty_table,
};

fn check(stores: &Stores) -> Result<()> {
    if let Some(err) = stores.transactions.error() {
        anyhow::bail!("{}", err);
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        r#type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TxType>().map_err(anyhow::Error::msg))
            .transpose()?,
        account_id: sub.get_one::<String>("account").cloned(),
        category_id: sub.get_one::<String>("category").cloned(),
        date_from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        date_to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
    })
}

fn input_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    Ok(NewTransaction {
        account_id: sub.get_one::<String>("account").unwrap().clone(),
        category_id: sub.get_one::<String>("category").unwrap().clone(),
        r#type: sub
            .get_one::<String>("type")
            .unwrap()
            .parse::<TxType>()
            .map_err(anyhow::Error::msg)?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        description: sub.get_one::<String>("note").cloned(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
    })
}

fn print_rows(rows: Vec<&Transaction>) {
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                format_date(t.date),
                t.account_name.clone().unwrap_or_default(),
                t.category_name.clone().unwrap_or_default(),
                format_currency(
                    match t.r#type {
                        TxType::Income => t.amount,
                        TxType::Expense => -t.amount,
                    },
                    true,
                ),
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Account", "Category", "Amount", "Note"],
            data
        )
    );
}

pub fn handle(
    gw: &ApiGateway,
    session: &Session,
    stores: &mut Stores,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            stores.transactions.apply_filters(filter_from_args(sub)?);
            if let Some(limit) = sub.get_one::<u32>("limit") {
                stores.transactions.set_limit(*limit);
            }
            if let Some(page) = sub.get_one::<u32>("page") {
                stores.transactions.set_page(*page);
            }
            stores.transactions.fetch_all(gw, session)?;
            check(stores)?;
            let visible = match sub.get_one::<String>("search") {
                Some(query) => stores.transactions.search(query),
                None => stores.transactions.transactions().iter().collect(),
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &visible)? {
                print_rows(visible);
                let p = stores.transactions.pagination();
                println!("Page {} ({} per page, {} total)", p.page, p.limit, p.total);
            }
        }
        Some(("add", sub)) => {
            // The category list backs the type-match validation.
            stores.categories.fetch_all(gw, session, None)?;
            let input = input_from_args(sub)?;
            stores.create_transaction(gw, session, &input)?;
            check(stores)?;
            println!(
                "Recorded {} on {}",
                format_currency(input.amount, false),
                format_date(input.date)
            );
        }
        Some(("edit", sub)) => {
            stores.categories.fetch_all(gw, session, None)?;
            let id = sub.get_one::<String>("id").unwrap().clone();
            let input = input_from_args(sub)?;
            stores.update_transaction(gw, session, &id, &input)?;
            check(stores)?;
            println!("Updated transaction {}", id);
        }
        Some(("show", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            stores.transactions.fetch_one(gw, session, id)?;
            check(stores)?;
            if let Some(t) = stores.transactions.current() {
                print_rows(vec![t]);
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().clone();
            stores.delete_transaction(gw, session, &id)?;
            check(stores)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

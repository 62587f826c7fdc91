// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiGateway;
use crate::models::{AccountPatch, NewAccount};
use crate::store::{Session, Stores};
use crate::utils::{format_currency, format_date, maybe_print_json, parse_decimal, pretty_table};

fn check(stores: &Stores) -> Result<()> {
    if let Some(err) = stores.accounts.error() {
        anyhow::bail!("{}", err);
    }
    Ok(())
}

pub fn handle(
    gw: &ApiGateway,
    session: &Session,
    stores: &mut Stores,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            stores.accounts.fetch_all(gw, session)?;
            check(stores)?;
            let accounts = stores.accounts.accounts();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
                let rows: Vec<Vec<String>> = accounts
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.clone(),
                            a.name.clone(),
                            format_currency(a.balance, false),
                            if a.is_default { "*".into() } else { String::new() },
                            format_date(a.created_at.date_naive()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Balance", "Default", "Created"], rows)
                );
            }
        }
        Some(("add", sub)) => {
            let input = NewAccount {
                name: sub.get_one::<String>("name").unwrap().clone(),
                balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
                is_default: sub.get_flag("default"),
            };
            stores.accounts.create(gw, session, &input)?;
            check(stores)?;
            println!("Added account '{}'", input.name);
        }
        Some(("show", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            stores.accounts.fetch_one(gw, session, id)?;
            check(stores)?;
            if let Some(a) = stores.accounts.current() {
                println!("{} ({})", a.name, a.id);
                println!("Balance: {}", format_currency(a.balance, false));
                if let Some(income) = a.total_income {
                    println!("Total income: {}", format_currency(income, true));
                }
                if let Some(expense) = a.total_expense {
                    println!("Total expense: {}", format_currency(-expense, true));
                }
            }
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let input = AccountPatch {
                name: sub.get_one::<String>("name").unwrap().clone(),
                balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
            };
            stores.accounts.update(gw, session, id, &input)?;
            check(stores)?;
            println!("Updated account '{}'", input.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            stores.accounts.delete(gw, session, id)?;
            check(stores)?;
            println!("Removed account {}", id);
        }
        Some(("set-default", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            stores.accounts.set_default(gw, session, id)?;
            check(stores)?;
            println!("Default account is now {}", id);
        }
        _ => {}
    }
    Ok(())
}

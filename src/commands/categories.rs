// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiGateway;
use crate::models::{CategoryPatch, NewCategory, TxType};
use crate::store::{Session, Stores};
use crate::utils::{maybe_print_json, pretty_table};

fn check(stores: &Stores) -> Result<()> {
    if let Some(err) = stores.categories.error() {
        anyhow::bail!("{}", err);
    }
    Ok(())
}

fn parse_type(sub: &clap::ArgMatches) -> Result<Option<TxType>> {
    sub.get_one::<String>("type")
        .map(|s| s.parse::<TxType>().map_err(anyhow::Error::msg))
        .transpose()
}

pub fn handle(
    gw: &ApiGateway,
    session: &Session,
    stores: &mut Stores,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            stores.categories.fetch_all(gw, session, parse_type(sub)?)?;
            check(stores)?;
            let categories = stores.categories.categories();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows: Vec<Vec<String>> = categories
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            c.r#type.to_string(),
                            c.icon.clone(),
                            c.color.clone(),
                            if c.is_system { "yes".into() } else { String::new() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Type", "Icon", "Color", "System"], rows)
                );
            }
        }
        Some(("add", sub)) => {
            let input = NewCategory {
                name: sub.get_one::<String>("name").unwrap().clone(),
                r#type: parse_type(sub)?.unwrap(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                color: sub.get_one::<String>("color").unwrap().clone(),
            };
            stores.categories.create(gw, session, &input)?;
            check(stores)?;
            println!("Added category '{}'", input.name);
        }
        Some(("edit", sub)) => {
            // The cached list backs the system-category guard.
            stores.categories.fetch_all(gw, session, None)?;
            check(stores)?;
            let id = sub.get_one::<String>("id").unwrap();
            let input = CategoryPatch {
                name: sub.get_one::<String>("name").unwrap().clone(),
                icon: sub.get_one::<String>("icon").unwrap().clone(),
                color: sub.get_one::<String>("color").unwrap().clone(),
            };
            stores.categories.update(gw, session, id, &input)?;
            check(stores)?;
            println!("Updated category '{}'", input.name);
        }
        Some(("rm", sub)) => {
            stores.categories.fetch_all(gw, session, None)?;
            check(stores)?;
            let id = sub.get_one::<String>("id").unwrap();
            stores.categories.delete(gw, session, id)?;
            check(stores)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use anyhow::Result;

use crate::api::ApiGateway;
use crate::commands::transactions::filter_from_args;
use crate::models::Period;
use crate::store::{Session, Stores};
use crate::utils::parse_date;

pub fn handle(
    gw: &ApiGateway,
    session: &Session,
    stores: &mut Stores,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let filter = filter_from_args(sub)?;
            let blob = stores.analytics.export_transactions(gw, session, &filter)?;
            fs::write(out, &blob)?;
            println!("Wrote {} bytes to {}", blob.len(), out);
        }
        Some(("report", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let period = sub
                .get_one::<String>("period")
                .unwrap()
                .parse::<Period>()
                .map_err(anyhow::Error::msg)?;
            let blob = stores.analytics.export_report(gw, session, period)?;
            fs::write(out, &blob)?;
            println!("Wrote {} bytes to {}", blob.len(), out);
        }
        Some(("summary", sub)) => {
            let out = sub.get_one::<String>("out").unwrap();
            let from = parse_date(sub.get_one::<String>("from").unwrap())?;
            let to = parse_date(sub.get_one::<String>("to").unwrap())?;
            let blob = stores.analytics.export_summary(gw, session, from, to)?;
            fs::write(out, &blob)?;
            println!("Wrote {} bytes to {}", blob.len(), out);
        }
        _ => {}
    }
    Ok(())
}

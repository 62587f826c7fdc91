// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use kopilka::api::ApiGateway;
use kopilka::config::Config;
use kopilka::error::ApiError;
use kopilka::store::{Session, Stores};
use kopilka::{cli, commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let gw = ApiGateway::new(Config::from_env())?;
    let mut session = Session::open()?;
    let mut stores = Stores::default();

    let outcome = match matches.subcommand() {
        Some(("auth", sub)) => commands::auth::handle(&gw, &mut session, sub),
        Some(("account", sub)) => commands::accounts::handle(&gw, &session, &mut stores, sub),
        Some(("category", sub)) => commands::categories::handle(&gw, &session, &mut stores, sub),
        Some(("tx", sub)) => commands::transactions::handle(&gw, &session, &mut stores, sub),
        Some(("analytics", sub)) => commands::analytics::handle(&gw, &session, &mut stores, sub),
        Some(("export", sub)) => commands::exporter::handle(&gw, &session, &mut stores, sub),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            Ok(())
        }
    };

    if let Err(err) = outcome {
        if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) {
            session.clear()?;
            anyhow::bail!("Session expired. Run `kopilka auth login` to sign in again.");
        }
        return Err(err);
    }
    Ok(())
}

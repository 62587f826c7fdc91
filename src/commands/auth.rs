// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::store::Session;

fn check(session: &Session) -> Result<()> {
    if let Some(err) = session.error() {
        anyhow::bail!("{}", err);
    }
    Ok(())
}

pub fn handle(gw: &ApiGateway, session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            session.register(gw, email, password)?;
            check(session)?;
            println!("Registered. A verification code was sent to {}", email);
        }
        Some(("verify", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let code = sub.get_one::<String>("code").unwrap();
            session.verify_email(gw, email, code)?;
            check(session)?;
            println!("Email verified. You can sign in now.");
        }
        Some(("resend-code", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            session.resend_code(gw, email)?;
            check(session)?;
            println!("A new verification code was sent to {}", email);
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            match session.login(gw, email, password) {
                Err(ApiError::Unauthorized) => anyhow::bail!("Invalid email or password"),
                other => other?,
            }
            check(session)?;
            println!("Signed in as {}", email);
        }
        Some(("logout", _)) => {
            session.logout(gw)?;
            println!("Signed out.");
        }
        Some(("whoami", _)) => {
            session.me(gw)?;
            check(session)?;
            if let Some(user) = session.user() {
                println!("{}", user.email);
            }
        }
        Some(("change-password", sub)) => {
            let old = sub.get_one::<String>("old").unwrap();
            let new = sub.get_one::<String>("new").unwrap();
            session.change_password(gw, old, new)?;
            check(session)?;
            println!("Password changed.");
        }
        _ => {}
    }
    Ok(())
}

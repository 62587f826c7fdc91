// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;

use crate::api::{ApiGateway, Origin};
use crate::error::ApiError;
use crate::models::{Account, AccountPatch, NewAccount};
use crate::store::{Session, non_fatal};

#[derive(Debug, Deserialize)]
struct AccountList {
    #[serde(default)]
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct AccountEnvelope {
    account: Account,
}

#[derive(Debug, Deserialize)]
struct Acknowledged {
    #[serde(default)]
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug)]
pub enum AccountEvent {
    Fetched(Vec<Account>),
    FetchedOne(Account),
    Created(Account),
    Updated(Account),
    Deleted(String),
    DefaultSet(String),
    Failed(String),
}

/// Local cache of the account collection.
///
/// Invariant: whenever the collection is non-empty, exactly one account has
/// `is_default` set. The server owns that flag, but `set-default` returns no
/// updated collection, so [`AccountEvent::DefaultSet`] repairs it locally.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
    current: Option<Account>,
    default_account_id: Option<String>,
    error: Option<String>,
}

impl AccountStore {
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn default_account_id(&self) -> Option<&str> {
        self.default_account_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn apply(&mut self, event: AccountEvent) {
        match event {
            AccountEvent::Fetched(accounts) => {
                self.error = None;
                self.accounts = accounts;
                self.default_account_id = self
                    .accounts
                    .iter()
                    .find(|a| a.is_default)
                    .map(|a| a.id.clone());
            }
            AccountEvent::FetchedOne(account) => {
                self.error = None;
                self.current = Some(account);
            }
            AccountEvent::Created(account) => {
                self.error = None;
                let make_default = account.is_default;
                let id = account.id.clone();
                self.accounts.push(account);
                if make_default {
                    self.reconcile_default(&id);
                }
            }
            AccountEvent::Updated(account) => {
                self.error = None;
                // Missing id means the collection is stale; leave it alone.
                if let Some(slot) = self.accounts.iter_mut().find(|a| a.id == account.id) {
                    *slot = account;
                }
            }
            AccountEvent::Deleted(id) => {
                self.error = None;
                self.accounts.retain(|a| a.id != id);
            }
            AccountEvent::DefaultSet(id) => {
                self.error = None;
                self.reconcile_default(&id);
            }
            AccountEvent::Failed(message) => {
                self.error = Some(message);
            }
        }
    }

    fn reconcile_default(&mut self, id: &str) {
        self.default_account_id = Some(id.to_string());
        for a in &mut self.accounts {
            a.is_default = a.id == id;
        }
    }

    /// Replace the whole collection; on failure the previous one stays.
    pub fn fetch_all(&mut self, gw: &ApiGateway, session: &Session) -> Result<(), ApiError> {
        match gw.get::<AccountList>(Origin::Core, "/api/v1/accounts", &[], session) {
            Ok(list) => self.apply(AccountEvent::Fetched(list.accounts)),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn fetch_one(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/v1/accounts/{}", id);
        match gw.get::<AccountEnvelope>(Origin::Core, &path, &[], session) {
            Ok(env) => self.apply(AccountEvent::FetchedOne(env.account)),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn create(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        input: &NewAccount,
    ) -> Result<(), ApiError> {
        input.validate()?;
        match gw.post::<_, AccountEnvelope>(Origin::Core, "/api/v1/accounts", input, session) {
            Ok(env) => self.apply(AccountEvent::Created(env.account)),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn update(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
        input: &AccountPatch,
    ) -> Result<(), ApiError> {
        input.validate()?;
        let path = format!("/api/v1/accounts/{}", id);
        match gw.put::<_, AccountEnvelope>(Origin::Core, &path, input, session) {
            Ok(env) => self.apply(AccountEvent::Updated(env.account)),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    /// Referential constraints (non-empty accounts) are the server's call;
    /// the local collection shrinks only on success.
    pub fn delete(&mut self, gw: &ApiGateway, session: &Session, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/v1/accounts/{}", id);
        match gw.delete(Origin::Core, &path, session) {
            Ok(()) => self.apply(AccountEvent::Deleted(id.to_string())),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn set_default(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/v1/accounts/{}/set-default", id);
        match gw.post_empty::<Acknowledged>(Origin::Core, &path, session) {
            Ok(_) => self.apply(AccountEvent::DefaultSet(id.to_string())),
            Err(e) => self.apply(AccountEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::{ApiGateway, Origin};
use crate::error::ApiError;
use crate::models::{Category, NewTransaction, Transaction, TxType};
use crate::store::{Session, non_fatal};

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize)]
struct TransactionList {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct TransactionEnvelope {
    transaction: Transaction,
}

/// Sparse server-side predicate. `None` (or an empty id) means "no
/// constraint" and the field is omitted from the outgoing query entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub r#type: Option<TxType>,
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(t) = self.r#type {
            q.push(("type", t.to_string()));
        }
        if let Some(id) = &self.account_id {
            if !id.is_empty() {
                q.push(("account_id", id.clone()));
            }
        }
        if let Some(id) = &self.category_id {
            if !id.is_empty() {
                q.push(("category_id", id.clone()));
            }
        }
        if let Some(d) = self.date_from {
            q.push(("date_from", d.to_string()));
        }
        if let Some(d) = self.date_to {
            q.push(("date_to", d.to_string()));
        }
        q
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

#[derive(Debug)]
pub enum TransactionEvent {
    Fetched {
        transactions: Vec<Transaction>,
        count: u64,
    },
    FetchedOne(Transaction),
    Created(Transaction),
    Updated(Transaction),
    Deleted(String),
    Failed(String),
}

/// Local cache of the currently visible transaction page plus the filter and
/// pagination state that decide what gets fetched next.
#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    current: Option<Transaction>,
    filter: TransactionFilter,
    pagination: Pagination,
    error: Option<String>,
}

impl TransactionStore {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn current(&self) -> Option<&Transaction> {
        self.current.as_ref()
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Changing any filter field invalidates the page position.
    pub fn apply_filters(&mut self, filter: TransactionFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.pagination.page = 0;
        }
    }

    pub fn clear_filters(&mut self) {
        self.apply_filters(TransactionFilter::default());
    }

    pub fn set_page(&mut self, page: u32) {
        self.pagination.page = page;
    }

    pub fn set_limit(&mut self, limit: u32) {
        if limit != self.pagination.limit {
            self.pagination.limit = limit;
            self.pagination.page = 0;
        }
    }

    /// Filter predicate composed with page/limit into fetch parameters.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut q = self.filter.query_params();
        q.push(("limit", self.pagination.limit.to_string()));
        q.push((
            "offset",
            (u64::from(self.pagination.page) * u64::from(self.pagination.limit)).to_string(),
        ));
        q
    }

    /// Full-text search over the already-fetched page only. This never
    /// issues a request and never touches the server-reported total.
    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.transactions.iter().collect();
        }
        self.transactions
            .iter()
            .filter(|t| {
                t.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&q))
                    .unwrap_or(false)
                    || t.category_name
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&q))
                        .unwrap_or(false)
                    || t.account_name
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&q))
                        .unwrap_or(false)
                    || t.amount.to_string().contains(&q)
            })
            .collect()
    }

    pub fn apply(&mut self, event: TransactionEvent) {
        match event {
            TransactionEvent::Fetched {
                transactions,
                count,
            } => {
                self.error = None;
                self.transactions = transactions;
                self.pagination.total = count;
            }
            TransactionEvent::FetchedOne(tx) => {
                self.error = None;
                self.current = Some(tx);
            }
            TransactionEvent::Created(tx) => {
                self.error = None;
                // Newest first.
                self.transactions.insert(0, tx);
            }
            TransactionEvent::Updated(tx) => {
                self.error = None;
                if let Some(slot) = self.transactions.iter_mut().find(|t| t.id == tx.id) {
                    *slot = tx;
                }
            }
            TransactionEvent::Deleted(id) => {
                self.error = None;
                self.transactions.retain(|t| t.id != id);
            }
            TransactionEvent::Failed(message) => {
                self.error = Some(message);
            }
        }
    }

    pub fn fetch_all(&mut self, gw: &ApiGateway, session: &Session) -> Result<(), ApiError> {
        let query = self.query_params();
        match gw.get::<TransactionList>(Origin::Core, "/api/v1/transactions", &query, session) {
            Ok(list) => self.apply(TransactionEvent::Fetched {
                transactions: list.transactions,
                count: list.count,
            }),
            Err(e) => self.apply(TransactionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn fetch_one(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/v1/transactions/{}", id);
        match gw.get::<TransactionEnvelope>(Origin::Core, &path, &[], session) {
            Ok(env) => self.apply(TransactionEvent::FetchedOne(env.transaction)),
            Err(e) => self.apply(TransactionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn create(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        input: &NewTransaction,
        categories: &[Category],
    ) -> Result<(), ApiError> {
        input.validate(categories)?;
        match gw.post::<_, TransactionEnvelope>(Origin::Core, "/api/v1/transactions", input, session)
        {
            Ok(env) => self.apply(TransactionEvent::Created(env.transaction)),
            Err(e) => self.apply(TransactionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn update(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
        input: &NewTransaction,
        categories: &[Category],
    ) -> Result<(), ApiError> {
        input.validate(categories)?;
        let path = format!("/api/v1/transactions/{}", id);
        match gw.put::<_, TransactionEnvelope>(Origin::Core, &path, input, session) {
            Ok(env) => self.apply(TransactionEvent::Updated(env.transaction)),
            Err(e) => self.apply(TransactionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn delete(&mut self, gw: &ApiGateway, session: &Session, id: &str) -> Result<(), ApiError> {
        let path = format!("/api/v1/transactions/{}", id);
        match gw.delete(Origin::Core, &path, session) {
            Ok(()) => self.apply(TransactionEvent::Deleted(id.to_string())),
            Err(e) => self.apply(TransactionEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side caches of the server-backed collections.
//!
//! Each store holds the authoritative local copy of one collection and a
//! pure `apply` reducer consuming tagged success/failure events; the
//! request-issuing methods translate gateway responses into those events.
//! Request failures never blank already-fetched data: they land in the
//! store's error slot and the previous collection stays visible.

pub mod accounts;
pub mod analytics;
pub mod categories;
pub mod session;
pub mod transactions;

pub use accounts::{AccountEvent, AccountStore};
pub use analytics::{AnalyticsEvent, AnalyticsStore};
pub use categories::{CategoryEvent, CategoryStore};
pub use session::{Session, SessionEvent};
pub use transactions::{
    DEFAULT_PAGE_SIZE, Pagination, TransactionEvent, TransactionFilter, TransactionStore,
};

use crate::api::ApiGateway;
use crate::error::ApiError;
use crate::models::NewTransaction;

/// Split gateway failures into the global one (401) and everything else.
/// Non-fatal failures come back as the message a store should record.
pub(crate) fn non_fatal(err: ApiError) -> Result<String, ApiError> {
    match err {
        ApiError::Unauthorized => Err(ApiError::Unauthorized),
        other => Ok(other.to_string()),
    }
}

/// One of each store, plus the cross-entity invalidation contract: a
/// transaction mutation dirties account balances and the analytics overview,
/// so both are re-fetched after any successful create/update/delete. The
/// remaining aggregates (trends, forecast, insights, cashflow) deliberately
/// stay stale until explicitly refreshed, to bound request volume.
#[derive(Debug, Default)]
pub struct Stores {
    pub accounts: AccountStore,
    pub categories: CategoryStore,
    pub transactions: TransactionStore,
    pub analytics: AnalyticsStore,
}

impl Stores {
    pub fn create_transaction(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        input: &NewTransaction,
    ) -> Result<(), ApiError> {
        self.transactions
            .create(gw, session, input, self.categories.categories())?;
        self.refresh_if_clean(gw, session)
    }

    pub fn update_transaction(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
        input: &NewTransaction,
    ) -> Result<(), ApiError> {
        self.transactions
            .update(gw, session, id, input, self.categories.categories())?;
        self.refresh_if_clean(gw, session)
    }

    pub fn delete_transaction(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
    ) -> Result<(), ApiError> {
        self.transactions.delete(gw, session, id)?;
        self.refresh_if_clean(gw, session)
    }

    fn refresh_if_clean(&mut self, gw: &ApiGateway, session: &Session) -> Result<(), ApiError> {
        if self.transactions.error().is_some() {
            return Ok(());
        }
        self.accounts.fetch_all(gw, session)?;
        self.analytics.refresh_overview(gw, session)
    }
}

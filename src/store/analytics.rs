// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use log::debug;

use crate::api::{ApiGateway, Origin};
use crate::error::ApiError;
use crate::models::{CashflowDay, Forecast, Insight, Overview, Period, TrendPoint};
use crate::store::{Session, TransactionFilter, non_fatal};

#[derive(Debug)]
pub enum AnalyticsEvent {
    OverviewLoaded(Overview),
    OverviewFailed(String),
    TrendsLoaded(Vec<TrendPoint>),
    TrendsFailed(String),
    ForecastLoaded(Forecast),
    /// Forecast is best-effort: failures clear it and surface no error.
    ForecastUnavailable,
    InsightsLoaded(Vec<Insight>),
    InsightsFailed(String),
    CashflowLoaded(Vec<CashflowDay>),
    CashflowFailed(String),
}

/// Read-side cache of the server-computed aggregates. Every aggregate is
/// fetched independently and keeps its own error slot, so one failing does
/// not block the others. Nothing here is ever mutated locally; refreshing
/// means re-fetching.
#[derive(Debug, Default)]
pub struct AnalyticsStore {
    overview: Option<Overview>,
    trends: Vec<TrendPoint>,
    forecast: Option<Forecast>,
    insights: Vec<Insight>,
    cashflow: Vec<CashflowDay>,
    period: Period,
    overview_error: Option<String>,
    trends_error: Option<String>,
    insights_error: Option<String>,
    cashflow_error: Option<String>,
}

impl AnalyticsStore {
    pub fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    pub fn trends(&self) -> &[TrendPoint] {
        &self.trends
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn cashflow(&self) -> &[CashflowDay] {
        &self.cashflow
    }

    /// Period of the last requested overview.
    pub fn period(&self) -> Period {
        self.period
    }

    pub fn overview_error(&self) -> Option<&str> {
        self.overview_error.as_deref()
    }

    pub fn trends_error(&self) -> Option<&str> {
        self.trends_error.as_deref()
    }

    pub fn insights_error(&self) -> Option<&str> {
        self.insights_error.as_deref()
    }

    pub fn cashflow_error(&self) -> Option<&str> {
        self.cashflow_error.as_deref()
    }

    pub fn clear_errors(&mut self) {
        self.overview_error = None;
        self.trends_error = None;
        self.insights_error = None;
        self.cashflow_error = None;
    }

    pub fn apply(&mut self, event: AnalyticsEvent) {
        match event {
            AnalyticsEvent::OverviewLoaded(overview) => {
                self.overview_error = None;
                self.overview = Some(overview);
            }
            AnalyticsEvent::OverviewFailed(message) => {
                self.overview_error = Some(message);
            }
            AnalyticsEvent::TrendsLoaded(trends) => {
                self.trends_error = None;
                self.trends = trends;
            }
            AnalyticsEvent::TrendsFailed(message) => {
                self.trends_error = Some(message);
            }
            AnalyticsEvent::ForecastLoaded(forecast) => {
                self.forecast = Some(forecast);
            }
            AnalyticsEvent::ForecastUnavailable => {
                self.forecast = None;
            }
            AnalyticsEvent::InsightsLoaded(insights) => {
                self.insights_error = None;
                self.insights = insights;
            }
            AnalyticsEvent::InsightsFailed(message) => {
                self.insights_error = Some(message);
            }
            AnalyticsEvent::CashflowLoaded(cashflow) => {
                self.cashflow_error = None;
                self.cashflow = cashflow;
            }
            AnalyticsEvent::CashflowFailed(message) => {
                self.cashflow_error = Some(message);
            }
        }
    }

    pub fn fetch_overview(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        period: Period,
    ) -> Result<(), ApiError> {
        self.period = period;
        let query = [("period", period.to_string())];
        match gw.get::<Overview>(
            Origin::Analytics,
            "/api/v1/analytics/overview",
            &query,
            session,
        ) {
            Ok(o) => self.apply(AnalyticsEvent::OverviewLoaded(o)),
            Err(e) => self.apply(AnalyticsEvent::OverviewFailed(non_fatal(e)?)),
        }
        Ok(())
    }

    /// Re-fetch the overview for the period already on record. Used after
    /// transaction mutations.
    pub fn refresh_overview(&mut self, gw: &ApiGateway, session: &Session) -> Result<(), ApiError> {
        let period = self.period;
        self.fetch_overview(gw, session, period)
    }

    pub fn fetch_trends(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        days: u32,
    ) -> Result<(), ApiError> {
        let query = [("days", days.to_string())];
        match gw.get::<Vec<TrendPoint>>(
            Origin::Analytics,
            "/api/v1/analytics/trends",
            &query,
            session,
        ) {
            Ok(t) => self.apply(AnalyticsEvent::TrendsLoaded(t)),
            Err(e) => self.apply(AnalyticsEvent::TrendsFailed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn fetch_forecast(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        months: u32,
    ) -> Result<(), ApiError> {
        let query = [("months", months.to_string())];
        match gw.get::<Forecast>(
            Origin::Analytics,
            "/api/v1/analytics/forecast",
            &query,
            session,
        ) {
            Ok(f) => self.apply(AnalyticsEvent::ForecastLoaded(f)),
            Err(e) => {
                let message = non_fatal(e)?;
                debug!("forecast unavailable: {}", message);
                self.apply(AnalyticsEvent::ForecastUnavailable);
            }
        }
        Ok(())
    }

    pub fn fetch_insights(&mut self, gw: &ApiGateway, session: &Session) -> Result<(), ApiError> {
        match gw.get::<Vec<Insight>>(Origin::Analytics, "/api/v1/analytics/insights", &[], session)
        {
            Ok(i) => self.apply(AnalyticsEvent::InsightsLoaded(i)),
            Err(e) => self.apply(AnalyticsEvent::InsightsFailed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn fetch_cashflow(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), ApiError> {
        let query = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        match gw.get::<Vec<CashflowDay>>(
            Origin::Analytics,
            "/api/v1/analytics/cashflow",
            &query,
            session,
        ) {
            Ok(c) => self.apply(AnalyticsEvent::CashflowLoaded(c)),
            Err(e) => self.apply(AnalyticsEvent::CashflowFailed(non_fatal(e)?)),
        }
        Ok(())
    }

    /// Download the transaction export for the given filter as an opaque
    /// blob. Errors propagate; the caller decides how to surface them.
    pub fn export_transactions(
        &self,
        gw: &ApiGateway,
        session: &Session,
        filter: &TransactionFilter,
    ) -> Result<Vec<u8>, ApiError> {
        let query = filter.query_params();
        gw.get_bytes(
            Origin::Analytics,
            "/api/v1/export/transactions",
            &query,
            session,
        )
    }

    pub fn export_report(
        &self,
        gw: &ApiGateway,
        session: &Session,
        period: Period,
    ) -> Result<Vec<u8>, ApiError> {
        let query = [("period", period.to_string())];
        gw.get_bytes(Origin::Analytics, "/api/v1/export/report", &query, session)
    }

    pub fn export_summary(
        &self,
        gw: &ApiGateway,
        session: &Session,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<u8>, ApiError> {
        let query = [
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        gw.get_bytes(Origin::Analytics, "/api/v1/export/summary", &query, session)
    }
}

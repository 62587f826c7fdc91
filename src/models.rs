// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::utils::validate_required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(format!("Invalid type '{}', expected income|expense", other)),
        }
    }
}

/// Period token accepted by the analytics overview endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "quarter" => Ok(Period::Quarter),
            "year" => Ok(Period::Year),
            other => Err(format!(
                "Invalid period '{}', expected week|month|quarter|year",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    // Aggregated stats the server may attach to list responses.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_income: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_expense: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub r#type: TxType,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub category_id: String,
    pub r#type: TxType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    // Denormalized display fields joined in by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ---- mutation payloads ----

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub is_default: bool,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !validate_required(&self.name) {
            return Err(ApiError::Validation("Account name is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountPatch {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl AccountPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !validate_required(&self.name) {
            return Err(ApiError::Validation("Account name is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub r#type: TxType,
    pub icon: String,
    pub color: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !validate_required(&self.name) {
            return Err(ApiError::Validation("Category name is required".into()));
        }
        if !validate_required(&self.color) {
            return Err(ApiError::Validation("Category color is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPatch {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl CategoryPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !validate_required(&self.name) {
            return Err(ApiError::Validation("Category name is required".into()));
        }
        Ok(())
    }
}

/// Payload for both creating and fully replacing a transaction.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub account_id: String,
    pub category_id: String,
    pub r#type: TxType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Presence and consistency checks done before any request is issued.
    /// The category/type match is only verifiable against the locally cached
    /// category list; unknown ids are left for the server to reject.
    pub fn validate(&self, categories: &[Category]) -> Result<(), ApiError> {
        if !validate_required(&self.account_id) {
            return Err(ApiError::Validation("An account must be selected".into()));
        }
        if !validate_required(&self.category_id) {
            return Err(ApiError::Validation("A category must be selected".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(ApiError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        if let Some(cat) = categories.iter().find(|c| c.id == self.category_id) {
            if cat.r#type != self.r#type {
                return Err(ApiError::Validation(format!(
                    "Category '{}' is an {} category, not {}",
                    cat.name, cat.r#type, self.r#type
                )));
            }
        }
        Ok(())
    }
}

// ---- analytics aggregates (server-computed, read-only) ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_income: Decimal,
    pub savings_rate: f64,
    #[serde(default)]
    pub top_categories: Vec<CategoryStat>,
    #[serde(default)]
    pub month_comparison: Option<Comparison>,
    #[serde(default)]
    pub account_balances: Vec<AccountBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category_id: String,
    pub category_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub count: i64,
    pub percentage: f64,
    #[serde(default)]
    pub trend: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(with = "rust_decimal::serde::float")]
    pub income_diff: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense_diff: Decimal,
    pub income_change: f64,
    pub expense_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account_id: String,
    pub account_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub period: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_balance: Decimal,
    pub confidence: f64,
    pub based_on_months: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for InsightPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightPriority::High => f.write_str("high"),
            InsightPriority::Medium => f.write_str("medium"),
            InsightPriority::Low => f.write_str("low"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub r#type: String,
    pub title: String,
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub value: Option<Decimal>,
    pub priority: InsightPriority,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowDay {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub open_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub close_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inflow: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_outflow: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_cashflow: Decimal,
    #[serde(default)]
    pub details: Vec<CashflowDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowDetail {
    pub category_name: String,
    pub r#type: TxType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub count: i64,
}

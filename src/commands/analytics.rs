// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiGateway;
use crate::models::Period;
use crate::store::{Session, Stores};
use crate::utils::{
    format_currency, format_date, format_percent, maybe_print_json, parse_date, pretty_table,
};

pub fn handle(
    gw: &ApiGateway,
    session: &Session,
    stores: &mut Stores,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => {
            let period = sub
                .get_one::<String>("period")
                .unwrap()
                .parse::<Period>()
                .map_err(anyhow::Error::msg)?;
            stores.analytics.fetch_overview(gw, session, period)?;
            if let Some(err) = stores.analytics.overview_error() {
                anyhow::bail!("{}", err);
            }
            let Some(o) = stores.analytics.overview() else {
                return Ok(());
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), o)? {
                println!("Period: {}", o.period);
                println!("Income:  {}", format_currency(o.total_income, true));
                println!("Expense: {}", format_currency(-o.total_expense, true));
                println!("Net:     {}", format_currency(o.net_income, true));
                println!("Savings rate: {}", format_percent(o.savings_rate, 1));
                if !o.top_categories.is_empty() {
                    let rows: Vec<Vec<String>> = o
                        .top_categories
                        .iter()
                        .map(|c| {
                            vec![
                                c.category_name.clone(),
                                format_currency(c.amount, false),
                                format_percent(c.percentage, 1),
                            ]
                        })
                        .collect();
                    println!("{}", pretty_table(&["Category", "Amount", "Share"], rows));
                }
            }
        }
        Some(("trends", sub)) => {
            let days = *sub.get_one::<u32>("days").unwrap();
            stores.analytics.fetch_trends(gw, session, days)?;
            if let Some(err) = stores.analytics.trends_error() {
                anyhow::bail!("{}", err);
            }
            let trends = stores.analytics.trends();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trends)? {
                let rows: Vec<Vec<String>> = trends
                    .iter()
                    .map(|p| {
                        vec![
                            format_date(p.date),
                            format_currency(p.income, false),
                            format_currency(p.expense, false),
                            format_currency(p.balance, false),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "Income", "Expense", "Balance"], rows)
                );
            }
        }
        Some(("forecast", sub)) => {
            let months = *sub.get_one::<u32>("months").unwrap();
            stores.analytics.fetch_forecast(gw, session, months)?;
            match stores.analytics.forecast() {
                Some(f) => {
                    println!("Forecast for the next {}", f.period);
                    println!("Income:  {}", format_currency(f.predicted_income, true));
                    println!("Expense: {}", format_currency(-f.predicted_expense, true));
                    println!("Balance: {}", format_currency(f.predicted_balance, false));
                    println!(
                        "Confidence {} (based on {} months)",
                        format_percent(f.confidence * 100.0, 0),
                        f.based_on_months
                    );
                }
                None => println!("Not enough history for a forecast yet."),
            }
        }
        Some(("insights", sub)) => {
            stores.analytics.fetch_insights(gw, session)?;
            if let Some(err) = stores.analytics.insights_error() {
                anyhow::bail!("{}", err);
            }
            let insights = stores.analytics.insights();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &insights)? {
                let rows: Vec<Vec<String>> = insights
                    .iter()
                    .map(|i| {
                        vec![
                            i.priority.to_string(),
                            i.title.clone(),
                            i.description.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Priority", "Insight", "Detail"], rows));
            }
        }
        Some(("cashflow", sub)) => {
            let from = parse_date(sub.get_one::<String>("from").unwrap())?;
            let to = parse_date(sub.get_one::<String>("to").unwrap())?;
            stores.analytics.fetch_cashflow(gw, session, from, to)?;
            if let Some(err) = stores.analytics.cashflow_error() {
                anyhow::bail!("{}", err);
            }
            let cashflow = stores.analytics.cashflow();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cashflow)? {
                let rows: Vec<Vec<String>> = cashflow
                    .iter()
                    .map(|d| {
                        vec![
                            format_date(d.date),
                            format_currency(d.total_inflow, false),
                            format_currency(d.total_outflow, false),
                            format_currency(d.net_cashflow, true),
                            format_currency(d.close_balance, false),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "In", "Out", "Net", "Close"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as a JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kopilka")
        .about("Personal finance tracker talking to the Kopilka services")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(
            Command::new("auth")
                .about("Account registration and sign-in")
                .subcommand(
                    Command::new("register")
                        .about("Create an account and send a verification code")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("verify")
                        .about("Confirm the e-mailed 6-digit code")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("resend-code")
                        .about("Send a fresh verification code")
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Sign in and store the token")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Sign out and forget the token"))
                .subcommand(Command::new("whoami").about("Show the signed-in user"))
                .subcommand(
                    Command::new("change-password")
                        .about("Change the account password")
                        .arg(Arg::new("old").long("old").required(true))
                        .arg(Arg::new("new").long("new").required(true)),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("add")
                        .about("Create an account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue)
                                .help("Make this the default account"),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one account with its totals")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rename an account or adjust its balance")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("set-default")
                        .about("Mark an account as the default")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    json_flags(Command::new("list").about("List categories")).arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"])
                            .help("Only categories of this type"),
                    ),
                )
                .subcommand(
                    Command::new("add")
                        .about("Create a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("icon").long("icon").default_value("tag"))
                        .arg(Arg::new("color").long("color").default_value("#999999")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a category")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("tag"))
                        .arg(Arg::new("color").long("color").default_value("#999999")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a category")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    json_flags(Command::new("list").about("List a page of transactions"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("account").long("account").help("Account id"))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(u32))
                                .help("Page size"),
                        )
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(value_parser!(u32))
                                .default_value("0")
                                .help("Zero-based page number"),
                        )
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Narrow the fetched page by text match"),
                        ),
                )
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Rewrite a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("analytics")
                .about("Server-computed aggregates")
                .subcommand(
                    json_flags(Command::new("overview").about("Income/expense overview")).arg(
                        Arg::new("period")
                            .long("period")
                            .value_parser(["week", "month", "quarter", "year"])
                            .default_value("month"),
                    ),
                )
                .subcommand(
                    json_flags(Command::new("trends").about("Daily balance trend")).arg(
                        Arg::new("days")
                            .long("days")
                            .value_parser(value_parser!(u32))
                            .default_value("30"),
                    ),
                )
                .subcommand(
                    Command::new("forecast")
                        .about("Projected income and expenses")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32))
                                .default_value("3"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("insights").about("Spending insights"),
                ))
                .subcommand(
                    json_flags(Command::new("cashflow").about("Per-day cashflow breakdown"))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Download server-side exports")
                .subcommand(
                    Command::new("transactions")
                        .about("Export transactions matching a filter")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("account").long("account").help("Account id"))
                        .arg(Arg::new("category").long("category").help("Category id"))
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("report")
                        .about("Export the full report for a period")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["week", "month", "quarter", "year"])
                                .default_value("month"),
                        ),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Export a period summary")
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
}

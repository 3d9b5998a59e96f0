// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn list_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive text to look for"),
        Arg::new("amount")
            .long("amount")
            .default_value("all")
            .help("Amount range: all, 0-100, 100-500, 500-1000, 1000-5000, 5000+"),
        Arg::new("date")
            .long("date")
            .default_value("all")
            .help("Date window: all, today, week, month, 3months, 6months"),
        Arg::new("sort").long("sort").help("Column to sort by"),
        Arg::new("order")
            .long("order")
            .requires("sort")
            .help("Sort direction: asc (default) or desc"),
        Arg::new("page")
            .long("page")
            .value_parser(value_parser!(usize))
            .default_value("1")
            .help("1-based page number"),
        Arg::new("page-size")
            .long("page-size")
            .value_parser(value_parser!(usize))
            .help("Rows per page (defaults to the configured page size)"),
    ];
    args.extend(json_args());
    args
}

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .help("YYYY-MM-DD (defaults to today)")
}

pub fn build_cli() -> Command {
    Command::new("finview")
        .version(crate_version!())
        .about("Filter, sort and page through transactions and investments")
        .arg_required_else_help(true)
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .help("JSON data file (overrides the config)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to config.yaml"),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .args(list_args())
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("all")
                                .help("all, income or expense"),
                        ),
                )
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(date_arg())
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Totals, monthly cashflow and spending by category")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("import")
                        .about(
                            "Import transactions from CSV \
                             (date,type,description,amount,category)",
                        )
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("inv")
                .about("Investments")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List investments")
                        .args(list_args())
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .default_value("all")
                                .help("Rate range: all, 0-50, 50-80, 80-100, 100+"),
                        ),
                )
                .subcommand(
                    Command::new("add")
                        .about("Record an investment")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .required(true)
                                .help("Percent of the reference index, e.g. 110"),
                        )
                        .arg(date_arg())
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Investment type, e.g. CDB"),
                        ),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Invested total, monthly return and average rate")
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("overview")
                .about("Balance, investments and monthly cashflow")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize)),
                )
                .args(json_args()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn order_requires_sort() {
        let res =
            build_cli().try_get_matches_from(["finview", "tx", "list", "--order", "desc"]);
        assert!(res.is_err());
    }
}

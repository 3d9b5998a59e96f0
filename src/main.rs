// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use finview::config::Config;
use finview::source::JsonFileSource;
use finview::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::load(matches.get_one::<String>("config").map(Path::new))
        .context("failed to load configuration")?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let data_path = match matches.get_one::<String>("data") {
        Some(p) => p.into(),
        None => config.data_path()?,
    };
    debug!("using data file {}", data_path.display());
    let mut store = JsonFileSource::open(&data_path)
        .with_context(|| format!("failed to open {}", data_path.display()))?;

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut store, &config, sub)?,
        Some(("inv", sub)) => commands::investments::handle(&mut store, &config, sub)?,
        Some(("overview", sub)) => commands::overview::handle(&store, &config, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

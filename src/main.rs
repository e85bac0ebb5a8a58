mod check;
mod cli;
mod config;
mod constants;
mod errors;
mod git;
mod redirects;
mod rename;
mod report;
mod slug;
mod ui;

use crate::check::Checker;
use crate::cli::{Backend, Cli};
use crate::config::CheckConfig;
use crate::constants::EXIT_CONFIGURATION;
use crate::errors::CheckError;
use crate::git::{Git2RenameSource, GitCliRenameSource};
use crate::redirects::RedirectFile;
use crate::rename::RenameSource;
use anyhow::Result;

fn main() {
    let cli = Cli::parse_args();
    ui::configure_colors(cli.no_color);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        let code = e
            .downcast_ref::<CheckError>()
            .map_or(EXIT_CONFIGURATION, CheckError::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CheckConfig::from_cli(cli)?;

    // both inputs must be readable before anything is checked
    let redirects = RedirectFile::load(&config.redirects_file)?;
    let source: Box<dyn RenameSource> = match config.backend {
        Backend::Libgit2 => Box::new(Git2RenameSource::new(&config.repo)),
        Backend::Git => Box::new(GitCliRenameSource::new(&config.repo)),
    };

    let report = Checker::new(config.clone()).run(source.as_ref(), &redirects)?;
    report::print(&report, &config, &redirects)?;
    report.into_result()?;

    Ok(())
}

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use env_logger::Env;

use crate::config::Config;
use crate::sink::CsvSink;
use crate::source::maildir::MaildirSource;
use crate::source::MessageQuery;

mod config;
mod controller;
mod extract;
mod sink;
mod source;
mod transaction;
mod util;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Directory holding exported alert emails
    mail_dir: String,

    /// Config file with subject keywords and sheet path
    config_file: Option<String>,

    /// Start of the date range, inclusive, e.g. 2024/10/01
    #[clap(long)]
    after: String,

    /// End of the date range, exclusive
    #[clap(long)]
    before: String,

    /// Sheet path, overrides the config file
    #[clap(long)]
    out: Option<String>,

    /// Print extracted rows without appending them to the sheet
    #[clap(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config = match &cli.config_file {
        Some(f) => Config::load_from_file(f)?,
        None => Config::default_config(),
    };

    let query = MessageQuery {
        subject_keywords: config.subject_keywords,
        after: parse_date_arg(&cli.after)?,
        before: parse_date_arg(&cli.before)?,
    };

    let source = MaildirSource::new(Path::new(&cli.mail_dir));
    let sheet = cli.out.unwrap_or(config.sheet);
    let mut sink = CsvSink::new(Path::new(&sheet));

    let processed = controller::run(&source, &mut sink, &query, cli.dry_run)?;
    println!("Processed {} transactions", processed);

    Ok(())
}

fn parse_date_arg(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y/%m/%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY/MM/DD", s))
}

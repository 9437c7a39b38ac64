//! Command-line flags

use crate::config::Config;

use clap::{ArgAction, Parser};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
The canonical transaction, written as a CSV record to standard output, has the fields:
  date (ISO 8601, e.g. 2006-01-02), this account, other account (may be empty), memo, amount

Fields of an input record are linked to transaction fields by 1-based indexes.
An index of zero means the statement does not have that field.

Example: the record \"24/12/2019,Brumby's,6.50,,330.04\" has a debit, a credit and a
balance column but no account, and is translated by

  stmtmap --this-account PCUS1 --field-count 5 --date-index 1 --date-format DD/MM/YYYY \\
          --memo-index 2 --debit-index 3 --credit-index 4

into \"2019-12-24,PCUS1,,Brumby's,-6.5\".

Records that cannot be translated, such as header lines, are reported on standard
error with their line number and skipped.";

/// Translate financial transactions from an arbitrary CSV layout to the canonical one
#[derive(Parser, Debug)]
#[command(name = "stmtmap", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Statement files to translate, in order; standard input if none or "-"
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// YAML file with the column mapping; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of fields in an input record, mandatory
    #[arg(long, value_name = "N")]
    pub field_count: Option<u32>,

    /// Amount field index; if zero then credit and debit indexes must be set
    #[arg(long, value_name = "INDEX")]
    pub amount_index: Option<u32>,

    /// Credit field index, see --amount-index
    #[arg(long, value_name = "INDEX")]
    pub credit_index: Option<u32>,

    /// Date field index, mandatory
    #[arg(long, value_name = "INDEX")]
    pub date_index: Option<u32>,

    /// Debit field index, see --amount-index
    #[arg(long, value_name = "INDEX")]
    pub debit_index: Option<u32>,

    /// Memo or description field index, mandatory
    #[arg(long, value_name = "INDEX")]
    pub memo_index: Option<u32>,

    /// Other account field index
    #[arg(long, value_name = "INDEX")]
    pub other_account_index: Option<u32>,

    /// This account field index, see --this-account
    #[arg(long, value_name = "INDEX")]
    pub this_account_index: Option<u32>,

    /// Date format, mandatory: tokens like DD/MM/YYYY or a strftime pattern like %d/%m/%Y
    #[arg(long, value_name = "PATTERN")]
    pub date_format: Option<String>,

    /// This account name for every record; if empty then --this-account-index must be set
    #[arg(long, value_name = "NAME")]
    pub this_account: Option<String>,

    /// Trim whitespace around every input field
    #[arg(long, overrides_with = "no_trim")]
    pub trim: bool,

    /// Keep input fields as they are, even if the config file sets trim
    #[arg(long, overrides_with = "trim")]
    pub no_trim: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlays the flags that were given on `config`.
    pub fn apply(&self, config: &mut Config) {
        let indexes = [
            (self.field_count, &mut config.field_count),
            (self.amount_index, &mut config.amount_index),
            (self.credit_index, &mut config.credit_index),
            (self.date_index, &mut config.date_index),
            (self.debit_index, &mut config.debit_index),
            (self.memo_index, &mut config.memo_index),
            (self.other_account_index, &mut config.other_account_index),
            (self.this_account_index, &mut config.this_account_index),
        ];
        for (flag, value) in indexes {
            if let Some(flag) = flag {
                *value = flag;
            }
        }

        if let Some(date_format) = &self.date_format {
            config.date_format = date_format.clone();
        }
        if let Some(this_account) = &self.this_account {
            config.this_account = this_account.clone();
        }
        if self.trim {
            config.trim = true;
        }
        if self.no_trim {
            config.trim = false;
        }
    }

    /// Builds the run's configuration from the config file, if any, and the
    /// flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

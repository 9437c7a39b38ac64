//! The column mapping as the user writes it, and its validation.
//!
//! Indexes are 1-based column numbers, with 0 meaning "this statement has no
//! such column". [`Config::validate`] turns a raw mapping into a [`Mapper`],
//! after which no zero-index bookkeeping is left.

use crate::date::DateFormat;
use crate::error::ConfigError;
use crate::mapper::{AmountSource, Column, Mapper, ThisAccount};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Inclusive bounds for the number of fields in an input record.
pub const MIN_FIELD_COUNT: u32 = 3; // date, memo and amount
pub const MAX_FIELD_COUNT: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Number of fields in every input record, mandatory.
    pub field_count: u32,

    /// Optional, but if zero then credit and debit indexes must be set.
    pub amount_index: u32,
    pub credit_index: u32,
    /// Mandatory.
    pub date_index: u32,
    pub debit_index: u32,
    /// Memo or description, mandatory.
    pub memo_index: u32,
    pub other_account_index: u32,
    /// Optional, but if zero then `this_account` must be set.
    pub this_account_index: u32,

    /// Mandatory, see [`DateFormat`].
    pub date_format: String,

    /// Literal account name for every record. Takes precedence over
    /// `this_account_index`.
    pub this_account: String,

    /// Trim whitespace around every field while reading.
    pub trim: bool,
}

/// The semantic fields that can be mapped to a column, in the order their
/// indexes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Credit,
    Date,
    Debit,
    Memo,
    OtherAccount,
    ThisAccount,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Amount,
        Field::Credit,
        Field::Date,
        Field::Debit,
        Field::Memo,
        Field::OtherAccount,
        Field::ThisAccount,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::Credit => "credit",
            Field::Date => "date",
            Field::Debit => "debit",
            Field::Memo => "memo",
            Field::OtherAccount => "other account",
            Field::ThisAccount => "this account",
        };
        f.write_str(name)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        log::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    pub fn index(&self, field: Field) -> u32 {
        match field {
            Field::Amount => self.amount_index,
            Field::Credit => self.credit_index,
            Field::Date => self.date_index,
            Field::Debit => self.debit_index,
            Field::Memo => self.memo_index,
            Field::OtherAccount => self.other_account_index,
            Field::ThisAccount => self.this_account_index,
        }
    }

    /// Checks the mapping and resolves it into a [`Mapper`].
    ///
    /// The checks run in a fixed order and the first failure is returned.
    pub fn validate(&self) -> Result<Mapper, ConfigError> {
        if self.date_format.is_empty() {
            return Err(ConfigError::InvalidDateFormat);
        }

        if !(MIN_FIELD_COUNT..=MAX_FIELD_COUNT).contains(&self.field_count) {
            return Err(ConfigError::FieldCountOutOfRange(self.field_count));
        }

        self.check_indexes()?;

        let date = Column::from_index(self.date_index).ok_or(ConfigError::MissingDateIndex)?;
        let memo = Column::from_index(self.memo_index).ok_or(ConfigError::MissingMemoIndex)?;
        let this_account = self.resolve_this_account()?;
        let amount = self.resolve_amount()?;

        Ok(Mapper::new(
            self.field_count as usize,
            date,
            DateFormat::new(&self.date_format),
            amount,
            memo,
            Column::from_index(self.other_account_index),
            this_account,
        ))
    }

    /// Every index must fit in the record, and no two fields may share a
    /// non-zero index. Assumes `field_count` is in range.
    fn check_indexes(&self) -> Result<(), ConfigError> {
        let mut in_use = [false; MAX_FIELD_COUNT as usize + 1];

        for field in Field::ALL {
            let index = self.index(field);

            if index > self.field_count {
                return Err(ConfigError::IndexOutOfRange {
                    field,
                    index,
                    field_count: self.field_count,
                });
            }
            if index == 0 {
                continue;
            }
            if in_use[index as usize] {
                return Err(ConfigError::DuplicateIndex { field, index });
            }
            in_use[index as usize] = true;
        }

        Ok(())
    }

    fn resolve_this_account(&self) -> Result<ThisAccount, ConfigError> {
        if !self.this_account.is_empty() {
            return Ok(ThisAccount::Literal(self.this_account.clone()));
        }

        Column::from_index(self.this_account_index)
            .map(ThisAccount::Column)
            .ok_or(ConfigError::MissingThisAccount)
    }

    fn resolve_amount(&self) -> Result<AmountSource, ConfigError> {
        if let Some(column) = Column::from_index(self.amount_index) {
            return Ok(AmountSource::Direct(column));
        }

        match (
            Column::from_index(self.credit_index),
            Column::from_index(self.debit_index),
        ) {
            (Some(credit), Some(debit)) => Ok(AmountSource::CreditDebit { credit, debit }),
            _ => Err(ConfigError::MissingAmountSource),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Kiwibank full statement: has both an amount and credit/debit columns,
    /// and carries this account in the first column.
    pub(crate) fn kiwibank_full() -> Config {
        Config {
            field_count: 16,
            amount_index: 15,
            credit_index: 13,
            date_index: 2,
            debit_index: 14,
            memo_index: 3,
            other_account_index: 12,
            this_account_index: 1,
            date_format: "DD-MM-YYYY".to_string(),
            ..Config::default()
        }
    }

    pub(crate) fn mini() -> Config {
        Config {
            field_count: 3,
            amount_index: 3,
            date_index: 1,
            memo_index: 2,
            date_format: "YYYY-MM-DD".to_string(),
            this_account: "Mini".to_string(),
            ..Config::default()
        }
    }

    /// Credit union statement: debit, credit and balance columns.
    pub(crate) fn credit_union() -> Config {
        Config {
            field_count: 5,
            credit_index: 4,
            date_index: 1,
            debit_index: 3,
            memo_index: 2,
            date_format: "DD/MM/YYYY".to_string(),
            this_account: "Assets:Current:PCUS1".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_valid_configs() {
        for config in [kiwibank_full(), mini(), credit_union()] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
    }

    #[test]
    fn test_empty_date_format() {
        let mut config = kiwibank_full();
        config.date_format = String::new();
        assert_eq!(config.validate().err(), Some(ConfigError::InvalidDateFormat));

        config.date_format = "DD-MM-YYYY".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gibberish_date_format_is_accepted() {
        let mut config = kiwibank_full();
        config.date_format = "gibberish".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_count_too_low() {
        let mut config = mini();
        config.field_count = MIN_FIELD_COUNT - 1;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::FieldCountOutOfRange(2))
        );

        config.field_count = MIN_FIELD_COUNT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_count_too_high() {
        let mut config = kiwibank_full();
        config.field_count = MAX_FIELD_COUNT + 1;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::FieldCountOutOfRange(21))
        );

        config.field_count = 16;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_field_count_bounds_are_inclusive() {
        let mut config = mini();
        config.field_count = MAX_FIELD_COUNT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_index_out_of_range() {
        let mut config = kiwibank_full();
        config.amount_index = config.field_count + 1;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::IndexOutOfRange {
                field: Field::Amount,
                index: 17,
                field_count: 16,
            })
        );

        // the last field is in range
        config.amount_index = config.field_count;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_index() {
        let mut config = kiwibank_full();
        config.credit_index = 1;
        config.debit_index = 1;
        // this account also uses 1, but credit comes first and debit is the
        // first to collide
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::DuplicateIndex {
                field: Field::Debit,
                index: 1,
            })
        );

        config.credit_index = 13;
        config.debit_index = 14;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_indexes_never_collide() {
        let config = mini();
        assert_eq!(config.credit_index, 0);
        assert_eq!(config.debit_index, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_index_checks_follow_field_order() {
        let mut config = mini();
        config.amount_index = 1; // collides with date
        config.this_account_index = 9; // out of range, but checked later
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::DuplicateIndex {
                field: Field::Date,
                index: 1,
            })
        );
    }

    #[test]
    fn test_missing_date_index() {
        let mut config = kiwibank_full();
        config.date_index = 0;
        assert_eq!(config.validate().err(), Some(ConfigError::MissingDateIndex));

        config.date_index = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_memo_index() {
        let mut config = kiwibank_full();
        config.memo_index = 0;
        assert_eq!(config.validate().err(), Some(ConfigError::MissingMemoIndex));

        config.memo_index = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_this_account() {
        let mut config = kiwibank_full();
        config.this_account = String::new();
        config.this_account_index = 0;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::MissingThisAccount)
        );

        config.this_account_index = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_amount_source() {
        let mut config = kiwibank_full();
        config.amount_index = 0;
        config.credit_index = 0;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::MissingAmountSource)
        );

        config.credit_index = 13;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_this_account_reported_before_amount_source() {
        let mut config = mini();
        config.this_account = String::new();
        config.amount_index = 0;
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::MissingThisAccount)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let config = Config::default();
        assert_eq!(config.validate().err(), Some(ConfigError::InvalidDateFormat));

        let config = Config {
            date_format: "YYYY".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.validate().err(),
            Some(ConfigError::FieldCountOutOfRange(0))
        );

        let config = Config {
            field_count: 3,
            date_format: "YYYY".to_string(),
            ..Config::default()
        };
        assert_eq!(config.validate().err(), Some(ConfigError::MissingDateIndex));
    }

    #[test]
    fn test_load_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "field-count: 5\n\
             date-index: 1\n\
             memo-index: 2\n\
             debit-index: 3\n\
             credit-index: 4\n\
             date-format: DD/MM/YYYY\n\
             this-account: Assets:Current:PCUS1"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, credit_union());
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "field-count: 5\nfield-cuont: 6").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("does/not/exist.yml").is_err());
    }
}

use crate::date::DateFormat;
use crate::error::RecordError;
use crate::mapper::column::{AmountSource, Column, ThisAccount};
use crate::transaction::Transaction;

use std::fmt;

/// A validated column mapping. Built by [`crate::config::Config::validate`]
/// and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper {
    field_count: usize,
    date: Column,
    date_format: DateFormat,
    amount: AmountSource,
    memo: Column,
    other_account: Option<Column>,
    this_account: ThisAccount,
}

impl Mapper {
    pub(crate) fn new(
        field_count: usize,
        date: Column,
        date_format: DateFormat,
        amount: AmountSource,
        memo: Column,
        other_account: Option<Column>,
        this_account: ThisAccount,
    ) -> Self {
        Self {
            field_count,
            date,
            date_format,
            amount,
            memo,
            other_account,
            this_account,
        }
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn amount_source(&self) -> &AmountSource {
        &self.amount
    }

    pub fn this_account(&self) -> &ThisAccount {
        &self.this_account
    }

    /// Reshapes one input record into a canonical transaction.
    ///
    /// Fields are checked in the order arity, date, amount, memo, this
    /// account, and the first failure is returned.
    pub fn transform<S: AsRef<str>>(&self, row: &[S]) -> Result<Transaction, RecordError> {
        // The CSV reader is flexible, so this is the only arity check.
        if row.len() != self.field_count {
            return Err(RecordError::WrongFieldCount {
                expected: self.field_count,
                found: row.len(),
            });
        }

        let date = self.date_format.parse(self.date.read(row))?;

        let amount = self.amount.amount(row)?;
        if amount.is_zero() {
            return Err(RecordError::ZeroAmount);
        }

        let memo = self.memo.read(row);
        if memo.is_empty() {
            return Err(RecordError::EmptyMemo);
        }

        let other_account = self.other_account.map_or("", |column| column.read(row));

        let this_account = match &self.this_account {
            ThisAccount::Literal(name) => name.as_str(),
            ThisAccount::Column(column) => column.read(row),
        };
        if this_account.is_empty() {
            return Err(RecordError::EmptyThisAccount);
        }

        Ok(Transaction {
            date,
            this_account: this_account.to_string(),
            other_account: other_account.to_string(),
            memo: memo.to_string(),
            amount,
        })
    }
}

/// One-line summary for logs, in the 1-based indexes the user configured.
impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fields; date {} as {:?}; amount {}; memo {}",
            self.field_count(),
            self.date,
            self.date_format().pattern(),
            self.amount_source(),
            self.memo
        )?;
        if let Some(other_account) = self.other_account {
            write!(f, "; other account {}", other_account)?;
        }
        write!(f, "; this account {}", self.this_account())
    }
}

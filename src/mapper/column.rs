use crate::amount::parse_amount;
use crate::error::RecordError;

use rust_decimal::Decimal;
use std::fmt;

/// A column of an input record. Only exists for fields the statement
/// actually has, so there is no "index 0" to special-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column(usize);

impl Column {
    /// Converts a 1-based index, where 0 means the field is absent.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_sub(1).map(|position| Column(position as usize))
    }

    /// The 1-based index this column was configured with.
    pub fn index(&self) -> u32 {
        self.0 as u32 + 1
    }

    pub fn read<'r, S: AsRef<str>>(&self, row: &'r [S]) -> &'r str {
        row.get(self.0).map_or("", AsRef::as_ref)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.index())
    }
}

/// Where the amount of a transaction comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountSource {
    /// A single signed amount column.
    Direct(Column),
    /// Separate credit and debit columns, exactly one of which is filled in
    /// per record. Debits are made negative.
    CreditDebit { credit: Column, debit: Column },
}

impl AmountSource {
    pub fn amount<S: AsRef<str>>(&self, row: &[S]) -> Result<Decimal, RecordError> {
        match self {
            AmountSource::Direct(column) => parse_amount(column.read(row)),
            AmountSource::CreditDebit { credit, debit } => {
                match (credit.read(row), debit.read(row)) {
                    (credit, "") if !credit.is_empty() => parse_amount(credit),
                    ("", debit) if !debit.is_empty() => {
                        // some banks already sign their debits
                        Ok(-parse_amount(debit)?.abs())
                    }
                    _ => Err(RecordError::CreditDebitConflict),
                }
            }
        }
    }
}

impl fmt::Display for AmountSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountSource::Direct(column) => write!(f, "{}", column),
            AmountSource::CreditDebit { credit, debit } => {
                write!(f, "credit {}, debit {}", credit, debit)
            }
        }
    }
}

/// The account a statement belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThisAccount {
    Literal(String),
    Column(Column),
}

impl fmt::Display for ThisAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThisAccount::Literal(name) => write!(f, "{:?}", name),
            ThisAccount::Column(column) => write!(f, "{}", column),
        }
    }
}

use crate::config::Field;

use thiserror::Error;

/// Problems with the column mapping. Any of these aborts the run before a
/// single record is read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("date format cannot be empty, e.g. \"DD/MM/YYYY\" or \"%d/%m/%Y\"")]
    InvalidDateFormat,

    #[error("field count {0} is out of range, expected {min} to {max}", min = crate::config::MIN_FIELD_COUNT, max = crate::config::MAX_FIELD_COUNT)]
    FieldCountOutOfRange(u32),

    #[error("{field} index {index} is out of range, the record has {field_count} fields")]
    IndexOutOfRange {
        field: Field,
        index: u32,
        field_count: u32,
    },

    #[error("{field} index {index} is already used by another field")]
    DuplicateIndex { field: Field, index: u32 },

    #[error("date index cannot be zero")]
    MissingDateIndex,

    #[error("memo index cannot be zero")]
    MissingMemoIndex,

    #[error("this account and this account index cannot be empty and zero respectively")]
    MissingThisAccount,

    #[error("amount index, or both credit and debit indexes, must be non-zero")]
    MissingAmountSource,
}

/// Problems with a single input record. The record is skipped and the
/// statement carries on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("wrong number of fields: expected {expected}, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("cannot parse date {value:?}: {reason}")]
    DateParse { value: String, reason: String },

    #[error("cannot parse amount {value:?}")]
    AmountParse { value: String },

    #[error("exactly one of credit and debit must have a value")]
    CreditDebitConflict,

    #[error("amount cannot be zero")]
    ZeroAmount,

    #[error("memo cannot be empty")]
    EmptyMemo,

    #[error("this account cannot be empty")]
    EmptyThisAccount,
}

use crate::amount::render_amount;
use crate::date::render_date;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// A transaction in the canonical format.
///
/// Every field but `other_account` is non-empty, and `amount` is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub this_account: String,
    pub other_account: String,
    pub memo: String,
    pub amount: Decimal,
}

/// Renders `date,this_account,other_account,memo,amount`.
///
/// Fields are not quoted, so a memo or account containing a comma will not
/// read back as the same record.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            render_date(&self.date),
            self.this_account,
            self.other_account,
            self.memo,
            render_amount(&self.amount)
        )
    }
}

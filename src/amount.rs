use crate::error::RecordError;

use rust_decimal::Decimal;

/// Parses a plain decimal such as `16.92`, `-3` or `.01`, falling back to
/// scientific notation (`1.5e3`). Whitespace, currency symbols and digit
/// separators (`,` or `_`) are not accepted, and neither is a value that
/// cannot be held without rounding.
pub fn parse_amount(value: &str) -> Result<Decimal, RecordError> {
    let invalid = || RecordError::AmountParse {
        value: value.to_string(),
    };

    // rust_decimal skips underscores between digits
    if value.contains('_') {
        return Err(invalid());
    }

    match value.split_once(['e', 'E']) {
        // from_scientific rounds an over-long mantissa, so check it first
        Some((mantissa, _)) => Decimal::from_str_exact(mantissa)
            .and_then(|_| Decimal::from_scientific(value))
            .map_err(|_| invalid()),
        None => Decimal::from_str_exact(value).map_err(|_| invalid()),
    }
}

/// Shortest exact form: `0.01`, `-6.5`, `123`.
pub fn render_amount(amount: &Decimal) -> String {
    amount.normalize().to_string()
}

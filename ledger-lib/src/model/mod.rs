//! Application records and their list-view column presets

mod backup;
mod client;
mod invoice;
mod tax_prepayment;
mod time_entry;

pub use backup::*;
pub use client::*;
pub use invoice::*;
pub use tax_prepayment::*;
pub use time_entry::*;

use rust_decimal::Decimal;

use crate::table::SortValue;

/// Sum a decimal field over group members. Missing values count as zero.
pub(crate) fn sum_decimal<T>(members: &[&T], value: impl Fn(&T) -> Option<Decimal>) -> SortValue {
    let total: Decimal = members.iter().filter_map(|&row| value(row)).sum();
    SortValue::Decimal(total)
}

/// Two-decimal display form for money and hours; empty when missing.
pub(crate) fn format_decimal(value: Option<Decimal>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

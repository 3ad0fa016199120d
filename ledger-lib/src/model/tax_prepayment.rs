//! Quarterly tax prepayments

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::table::Column;
use crate::table::GroupBy;
use crate::table::SortValue;
use crate::table::TableRow;

use super::format_decimal;
use super::sum_decimal;

/// One quarterly prepayment to the tax office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPrepayment {
    pub id: Uuid,
    pub year: i32,
    /// Quarter, 1 to 4.
    pub quarter: u32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
}

impl TaxPrepayment {
    /// Period label, e.g. `2024 Q2`.
    pub fn period(&self) -> String {
        format!("{} Q{}", self.year, self.quarter)
    }

    /// Columns of the tax prepayment list.
    pub fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("period", "Period")
                .sortable()
                .sort_value(|t: &TaxPrepayment| {
                    SortValue::from(i64::from(t.year) * 10 + i64::from(t.quarter))
                })
                .render(TaxPrepayment::period),
            Column::new("due_date", "Due").sortable(),
            Column::new("amount", "Amount")
                .sortable()
                .render(|t: &TaxPrepayment| format_decimal(Some(t.amount)))
                .group_sort_value(|_, members: &[&TaxPrepayment]| {
                    sum_decimal(members, |t| Some(t.amount))
                }),
            Column::new("paid_on", "Paid").sortable(),
        ]
    }

    /// Group by tax year.
    pub fn by_year() -> GroupBy<Self> {
        GroupBy::field("year")
    }
}

impl TableRow for TaxPrepayment {
    const FIELDS: &'static [&'static str] =
        &["id", "year", "quarter", "due_date", "amount", "paid_on"];

    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, name: &str) -> SortValue {
        match name {
            "id" => SortValue::from(self.id),
            "year" => SortValue::from(self.year),
            "quarter" => SortValue::from(self.quarter),
            "due_date" => SortValue::from(self.due_date),
            "amount" => SortValue::from(self.amount),
            "paid_on" => SortValue::from(self.paid_on),
            _ => SortValue::Null,
        }
    }
}

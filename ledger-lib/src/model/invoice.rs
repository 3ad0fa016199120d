//! Invoices

use std::fmt;

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

/// Lifecycle of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }

    /// Position in the invoice lifecycle, used for sorting.
    pub fn rank(&self) -> i64 {
        match self {
            Self::Draft => 0,
            Self::Sent => 1,
            Self::Overdue => 2,
            Self::Paid => 3,
            Self::Cancelled => 4,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issued (or draft) invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub client: String,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub total: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Invoice {
    /// Columns of the invoice list.
    ///
    /// Status sorts by lifecycle, not alphabetically. While "total" is the
    /// active sort, groups are ordered by their summed totals.
    pub fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("number", "Number").sortable(),
            Column::new("client", "Client").sortable(),
            Column::new("issue_date", "Issued").sortable(),
            Column::new("due_date", "Due").sortable(),
            Column::new("status", "Status")
                .sortable()
                .sort_value(|i: &Invoice| SortValue::from(i.status.rank())),
            Column::new("total", "Total")
                .sortable()
                .render(|i: &Invoice| format!("{} {}", format_decimal(Some(i.total)), i.currency))
                .group_sort_value(|_, members: &[&Invoice]| {
                    sum_decimal(members, |i| Some(i.total))
                }),
        ]
    }

    /// Group by client.
    pub fn by_client() -> GroupBy<Self> {
        GroupBy::field("client")
    }

    /// Group by status.
    pub fn by_status() -> GroupBy<Self> {
        GroupBy::field("status")
    }

    /// Group by issue month, as `YYYY-MM`.
    pub fn by_month() -> GroupBy<Self> {
        GroupBy::derive(|i: &Invoice| Some(i.issue_date.format("%Y-%m").to_string()))
    }
}

impl TableRow for Invoice {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "number",
        "client",
        "issue_date",
        "due_date",
        "status",
        "total",
        "currency",
    ];

    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, name: &str) -> SortValue {
        match name {
            "id" => SortValue::from(self.id),
            "number" => SortValue::from(&self.number),
            "client" => SortValue::from(&self.client),
            "issue_date" => SortValue::from(self.issue_date),
            "due_date" => SortValue::from(self.due_date),
            "status" => SortValue::from(self.status.as_str()),
            "total" => SortValue::from(self.total),
            "currency" => SortValue::from(&self.currency),
            _ => SortValue::Null,
        }
    }
}

//! Time entries

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

/// Tracked work on a client project.
///
/// `hours` is missing while a timer is still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub client: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hours: Option<Decimal>,
    #[serde(default)]
    pub billable: bool,
    #[serde(default)]
    pub invoiced: bool,
}

impl TimeEntry {
    /// Columns of the time-tracking list.
    ///
    /// While "hours" is the active sort, date groups are ordered by their
    /// total hours.
    pub fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("date", "Date").sortable(),
            Column::new("client", "Client").sortable(),
            Column::new("project", "Project").sortable(),
            Column::new("description", "Description"),
            Column::new("hours", "Duration")
                .sortable()
                .render(|e: &TimeEntry| format_decimal(e.hours))
                .group_sort_value(|_, members: &[&TimeEntry]| sum_decimal(members, |e| e.hours)),
            Column::new("billable", "Billable")
                .sortable()
                .render(|e: &TimeEntry| if e.billable { "yes" } else { "no" }.to_string()),
        ]
    }

    /// Group by day.
    pub fn by_date() -> GroupBy<Self> {
        GroupBy::field("date")
    }

    /// Group by project; entries without one land in the undefined group.
    pub fn by_project() -> GroupBy<Self> {
        GroupBy::field("project")
    }
}

impl TableRow for TimeEntry {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "date",
        "client",
        "project",
        "description",
        "hours",
        "billable",
        "invoiced",
    ];

    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, name: &str) -> SortValue {
        match name {
            "id" => SortValue::from(self.id),
            "date" => SortValue::from(self.date),
            "client" => SortValue::from(&self.client),
            "project" => SortValue::from(self.project.as_ref()),
            "description" => SortValue::from(self.description.as_ref()),
            "hours" => SortValue::from(self.hours),
            "billable" => SortValue::from(self.billable),
            "invoiced" => SortValue::from(self.invoiced),
            _ => SortValue::Null,
        }
    }
}

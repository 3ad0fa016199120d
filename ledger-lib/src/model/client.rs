//! Clients

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::table::Column;
use crate::table::GroupBy;
use crate::table::SortValue;
use crate::table::TableRow;

use super::format_decimal;

/// A client of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Client {
    /// Columns of the client list.
    pub fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name")
                .sortable()
                .sort_value(|c: &Client| SortValue::from(c.name.to_lowercase())),
            Column::new("email", "Email"),
            Column::new("vat_number", "VAT"),
            Column::new("country", "Country").sortable(),
            Column::new("hourly_rate", "Rate")
                .sortable()
                .render(|c: &Client| format_decimal(c.hourly_rate)),
            Column::new("created_at", "Since")
                .sortable()
                .render(|c: &Client| c.created_at.format("%Y-%m-%d").to_string()),
        ]
    }

    /// Group by country.
    pub fn by_country() -> GroupBy<Self> {
        GroupBy::field("country")
    }

    /// Group into active and archived clients.
    pub fn by_status() -> GroupBy<Self> {
        GroupBy::derive(|c: &Client| Some(if c.active { "active" } else { "archived" }.to_string()))
    }
}

impl TableRow for Client {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "vat_number",
        "country",
        "hourly_rate",
        "created_at",
        "active",
    ];

    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, name: &str) -> SortValue {
        match name {
            "id" => SortValue::from(self.id),
            "name" => SortValue::from(&self.name),
            "email" => SortValue::from(self.email.as_ref()),
            "vat_number" => SortValue::from(self.vat_number.as_ref()),
            "country" => SortValue::from(self.country.as_ref()),
            "hourly_rate" => SortValue::from(self.hourly_rate),
            "created_at" => SortValue::from(self.created_at),
            "active" => SortValue::from(self.active),
            _ => SortValue::Null,
        }
    }
}

//! Database backups

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::table::Column;
use crate::table::GroupBy;
use crate::table::SortValue;
use crate::table::TableRow;

/// How a backup was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupTrigger {
    #[default]
    Scheduled,
    Manual,
}

impl BackupTrigger {
    /// Wire name of the trigger.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Manual => "manual",
        }
    }
}

/// A stored database backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: Uuid,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    #[serde(default)]
    pub trigger: BackupTrigger,
}

impl Backup {
    /// Columns of the backup list.
    pub fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("created_at", "Created")
                .sortable()
                .render(|b: &Backup| b.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Column::new("file_name", "File").sortable(),
            Column::new("size", "Size")
                .accessor("size_bytes")
                .sortable()
                .render(|b: &Backup| format_size(b.size_bytes)),
            Column::new("trigger", "Trigger").sortable(),
        ]
    }

    /// Group by creation day.
    pub fn by_day() -> GroupBy<Self> {
        GroupBy::derive(|b: &Backup| Some(b.created_at.date_naive().to_string()))
    }
}

impl TableRow for Backup {
    const FIELDS: &'static [&'static str] =
        &["id", "file_name", "created_at", "size_bytes", "trigger"];

    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn field(&self, name: &str) -> SortValue {
        match name {
            "id" => SortValue::from(self.id),
            "file_name" => SortValue::from(&self.file_name),
            "created_at" => SortValue::from(self.created_at),
            "size_bytes" => SortValue::from(i64::try_from(self.size_bytes).ok()),
            "trigger" => SortValue::from(self.trigger.as_str()),
            _ => SortValue::Null,
        }
    }
}

/// Human-readable byte size, binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

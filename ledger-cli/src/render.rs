//! Plain-text rendering of a table view.

use std::io;
use std::io::Write;

use ledger_lib::table::TableRow;
use ledger_lib::table::TableView;
use ledger_lib::table::ViewBody;

const GAP: &str = "  ";

/// Write one page: header, rows (or groups), and a page footer.
///
/// Collapsed groups show only their header line.
pub fn write_view<T: TableRow>(out: &mut impl Write, view: &TableView<'_, T>) -> io::Result<()> {
    let headers: Vec<String> = view
        .header
        .iter()
        .map(|cell| match cell.indicator() {
            "" => cell.header.clone(),
            indicator => format!("{} {}", cell.header, indicator),
        })
        .collect();

    let rows: Vec<Vec<String>> = view
        .body
        .visible_rows()
        .into_iter()
        .map(|row| view.cells(row))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", format_line(&headers, &widths))?;
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    writeln!(out, "{}", format_line(&rule, &widths))?;

    match &view.body {
        ViewBody::Rows(_) => {
            for cells in &rows {
                writeln!(out, "{}", format_line(cells, &widths))?;
            }
        }
        ViewBody::Groups(groups) => {
            let mut cells = rows.iter();
            for group in groups {
                let marker = if group.expanded { "▾" } else { "▸" };
                writeln!(out, "{} {}", marker, group.header)?;
                for row in cells.by_ref().take(group.visible_members().len()) {
                    writeln!(out, "{}", format_line(row, &widths))?;
                }
            }
        }
    }

    let info = &view.pagination;
    let unit = match view.body {
        ViewBody::Rows(_) => "rows",
        ViewBody::Groups(_) => "groups",
    };
    writeln!(
        out,
        "\nPage {} of {} ({} {})",
        info.current_page, info.total_pages, info.total_items, unit
    )?;
    Ok(())
}

/// Pad cells to their column widths. Trailing spaces are dropped.
fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    line.join(GAP).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use ledger_lib::model::Invoice;
    use ledger_lib::table::Table;

    use super::*;

    fn invoices() -> Vec<Invoice> {
        serde_json::from_str(
            r#"[
                {"id": "11111111-1111-4111-8111-111111111111", "number": "A-2",
                 "client": "Contoso", "issue_date": "2024-01-10", "status": "sent",
                 "total": "100"},
                {"id": "22222222-2222-4222-8222-222222222222", "number": "A-1",
                 "client": "Fabrikam", "issue_date": "2024-01-05", "status": "paid",
                 "total": "50.5"}
            ]"#,
        )
        .unwrap()
    }

    fn render(table: &Table<Invoice>) -> String {
        let mut out = Vec::new();
        write_view(&mut out, &table.view()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_flat_page() {
        let mut table = Table::builder(Invoice::columns())
            .rows(invoices())
            .build()
            .unwrap();
        table.on_header_click("number");

        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Number ▲"));
        assert!(lines[2].starts_with("A-1"));
        assert!(lines[3].starts_with("A-2"));
        assert!(lines[3].ends_with("100.00 EUR"));
        assert_eq!(lines.last(), Some(&"Page 1 of 1 (2 rows)"));
    }

    #[test]
    fn test_collapsed_groups_show_headers_only() {
        let mut table = Table::builder(Invoice::columns())
            .rows(invoices())
            .group_by(Invoice::by_client())
            .expanded(["Fabrikam"])
            .build()
            .unwrap();
        table.on_header_click("client");

        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "▸ Contoso (1)");
        assert_eq!(lines[3], "▾ Fabrikam (1)");
        assert!(lines[4].starts_with("A-1"));
        assert_eq!(lines.last(), Some(&"Page 1 of 1 (2 groups)"));
    }

    #[test]
    fn test_format_line_pads_columns() {
        let cells = vec!["a".to_string(), "bb".to_string()];
        assert_eq!(format_line(&cells, &[3, 2]), "a    bb");
    }
}

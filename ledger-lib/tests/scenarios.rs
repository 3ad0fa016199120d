use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use chrono::NaiveDate;
use ledger_lib::config::TableConfig;
use ledger_lib::model::TimeEntry;
use ledger_lib::table::EventResult;
use ledger_lib::table::Group;
use ledger_lib::table::PaginationProps;
use ledger_lib::table::SortDirection;
use ledger_lib::table::SortState;
use ledger_lib::table::Table;
use ledger_lib::table::ViewBody;
use rust_decimal::Decimal;
use uuid::Uuid;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

/// Entry whose description doubles as its name in assertions.
fn entry(name: &str, day: u32, hours: Option<&str>) -> TimeEntry {
    TimeEntry {
        id: Uuid::new_v4(),
        date: date(day),
        client: "Contoso".to_string(),
        project: None,
        description: Some(name.to_string()),
        hours: hours.map(|h| h.parse::<Decimal>().unwrap()),
        billable: true,
        invoiced: false,
    }
}

fn names(rows: &[&TimeEntry]) -> Vec<String> {
    rows.iter()
        .map(|e| e.description.clone().unwrap_or_default())
        .collect()
}

fn group_keys(body: &ViewBody<'_, TimeEntry>) -> Vec<String> {
    match body {
        ViewBody::Groups(groups) => groups.iter().map(|g| g.key.clone()).collect(),
        ViewBody::Rows(_) => panic!("expected groups"),
    }
}

fn latest_date_first(a: &Group<'_, TimeEntry>, b: &Group<'_, TimeEntry>) -> Ordering {
    b.key.cmp(&a.key)
}

fn flat_rows<'a>(body: &ViewBody<'a, TimeEntry>) -> Vec<&'a TimeEntry> {
    match body {
        ViewBody::Rows(rows) => rows.clone(),
        ViewBody::Groups(_) => panic!("expected flat rows"),
    }
}

#[test]
fn test_sort_ascending_keeps_ties_in_input_order() {
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![
            entry("B", 4, Some("2")),
            entry("A", 4, Some("2")),
            entry("C", 4, Some("1")),
        ])
        .build()
        .unwrap();

    assert_eq!(table.on_header_click("hours"), EventResult::Consumed);
    let view = table.view();
    assert_eq!(names(&flat_rows(&view.body)), vec!["C", "B", "A"]);
    assert_eq!(view.header[4].indicator(), "▲");
}

#[test]
fn test_missing_hours_sort_last_descending() {
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![
            entry("running", 4, None),
            entry("short", 4, Some("0.5")),
            entry("long", 4, Some("6")),
        ])
        .build()
        .unwrap();

    table.on_header_click("hours");
    table.on_header_click("hours");
    assert_eq!(table.sort(), Some(&SortState::desc("hours")));

    let view = table.view();
    assert_eq!(names(&flat_rows(&view.body)), vec!["long", "short", "running"]);
    assert_eq!(view.cells(flat_rows(&view.body)[2])[4], "");
}

#[test]
fn test_groups_ordered_by_summed_hours() {
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![
            entry("a", 4, Some("3")),
            entry("b", 4, Some("0.25")),
            entry("c", 4, Some("0.25")),
            entry("d", 5, Some("2")),
            entry("e", 5, Some("2")),
        ])
        .group_by(TimeEntry::by_date())
        .expanded(["2024-03-04", "2024-03-05"])
        .build()
        .unwrap();

    table.on_header_click("hours");
    table.on_header_click("hours");

    let view = table.view();
    let ViewBody::Groups(groups) = &view.body else {
        panic!("expected groups");
    };
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["2024-03-05", "2024-03-04"]);
    assert_eq!(names(&groups[1].members), vec!["a", "b", "c"]);
    assert_eq!(groups[0].header, "2024-03-05 (2)");
    assert_eq!(names(&view.body.visible_rows()), vec!["d", "e", "a", "b", "c"]);
}

#[test]
fn test_page_request_beyond_last_page_clamps() {
    let rows: Vec<TimeEntry> = (1..=5).map(|i| entry(&i.to_string(), 4, Some("1"))).collect();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(rows)
        .page_size(2)
        .build()
        .unwrap();

    assert_eq!(table.view().pagination.total_pages, 3);
    table.set_page(5);
    let view = table.view();
    assert_eq!(view.pagination.current_page, 3);
    assert_eq!(names(&flat_rows(&view.body)), vec!["5"]);
    assert!(!view.pagination.has_next());
}

#[test]
fn test_expanded_group_survives_sort_change() {
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![entry("a", 4, Some("1")), entry("b", 5, Some("2"))])
        .group_by(TimeEntry::by_date())
        .build()
        .unwrap();

    assert!(table.toggle_group("2024-03-04"));
    table.on_header_click("hours");
    table.on_header_click("client");

    let view = table.view();
    let ViewBody::Groups(groups) = &view.body else {
        panic!("expected groups");
    };
    let expanded: Vec<bool> = groups.iter().map(|g| g.expanded).collect();
    assert_eq!(expanded, vec![true, false]);
    assert_eq!(names(&view.body.visible_rows()), vec!["a"]);
}

#[test]
fn test_pagination_unit_is_the_group() {
    let rows = vec![
        entry("a", 1, Some("1")),
        entry("b", 1, Some("1")),
        entry("c", 2, Some("1")),
        entry("d", 3, Some("1")),
    ];
    let mut table = Table::builder(TimeEntry::columns())
        .rows(rows)
        .group_by(TimeEntry::by_date())
        .page_size(2)
        .build()
        .unwrap();

    let view = table.view();
    assert_eq!(view.pagination.total_items, 3);
    assert_eq!(view.pagination.total_pages, 2);
    assert_eq!(view.body.len(), 2);

    table.next_page();
    let view = table.view();
    let ViewBody::Groups(groups) = &view.body else {
        panic!("expected groups");
    };
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "2024-03-03");
}

#[test]
fn test_missing_project_lands_in_configured_group() {
    let mut with_project = entry("a", 1, Some("1"));
    with_project.project = Some("Website".to_string());
    let table = Table::builder(TimeEntry::columns())
        .rows(vec![with_project, entry("b", 1, Some("1"))])
        .group_by(TimeEntry::by_project())
        .config(TableConfig::default().with_undefined_group_key("(no project)"))
        .build()
        .unwrap();

    assert_eq!(table.group_keys(), vec!["Website", "(no project)"]);
}

#[test]
fn test_external_sort_only_mirrors_state() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = requests.clone();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![entry("x", 4, Some("5")), entry("y", 4, Some("1"))])
        .on_sort(move |key, direction| sink.borrow_mut().push((key.to_string(), direction)))
        .build()
        .unwrap();

    table.on_header_click("hours");
    assert_eq!(
        *requests.borrow(),
        vec![("hours".to_string(), SortDirection::Asc)]
    );
    let view = table.view();
    assert_eq!(names(&flat_rows(&view.body)), vec!["x", "y"]);
    assert_eq!(view.header[4].sort, Some(SortDirection::Asc));
}

#[test]
fn test_controlled_pagination_reports_props() {
    let requested = Rc::new(RefCell::new(None));
    let sink = requested.clone();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![entry("p3", 4, Some("1"))])
        .pagination(
            PaginationProps::new(3, 4).with_total_items(31).with_page_size(10),
            move |page| *sink.borrow_mut() = Some(page),
        )
        .build()
        .unwrap();

    let view = table.view();
    assert!(view.pagination.controlled);
    assert_eq!(view.pagination.total_items, 31);
    assert_eq!(view.body.len(), 1);

    table.last_page();
    assert_eq!(*requested.borrow(), Some(4));
    assert_eq!(table.view().pagination.current_page, 3);

    table.set_pagination_props(PaginationProps::new(4, 4).with_total_items(31));
    assert_eq!(table.view().pagination.current_page, 4);
}

#[test]
fn test_replacing_rows_clamps_page() {
    let rows: Vec<TimeEntry> = (1..=6).map(|i| entry(&i.to_string(), 4, Some("1"))).collect();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(rows)
        .page_size(2)
        .default_sort(SortState::desc("hours"))
        .build()
        .unwrap();

    table.last_page();
    assert_eq!(table.view().pagination.current_page, 3);

    table.set_rows(vec![entry("only", 4, Some("1"))]);
    let view = table.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(names(&flat_rows(&view.body)), vec!["only"]);
    assert_eq!(table.sort(), Some(&SortState::desc("hours")));
}

#[test]
fn test_empty_rows_give_one_empty_page() {
    let table = Table::builder(TimeEntry::columns())
        .group_by(TimeEntry::by_date())
        .build()
        .unwrap();

    let view = table.view();
    assert!(view.body.is_empty());
    assert_eq!(view.pagination.total_pages, 1);
    assert_eq!(view.pagination.current_page, 1);
}

#[test]
fn test_zero_page_size_rejected_at_build() {
    let result = Table::builder(TimeEntry::columns()).page_size(0).build();
    assert!(result.is_err());
}

#[test]
fn test_group_comparator_applies_without_an_aggregate() {
    let mut table = Table::builder(TimeEntry::columns())
        .rows(vec![
            entry("a", 3, Some("5")),
            entry("b", 4, Some("1")),
            entry("c", 5, Some("3")),
        ])
        .group_by(TimeEntry::by_date())
        .group_sort(latest_date_first)
        .build()
        .unwrap();

    assert_eq!(
        group_keys(&table.view().body),
        vec!["2024-03-05", "2024-03-04", "2024-03-03"]
    );

    // Sorting by client has no group aggregate, so the comparator still decides.
    table.on_header_click("client");
    assert_eq!(
        group_keys(&table.view().body),
        vec!["2024-03-05", "2024-03-04", "2024-03-03"]
    );

    // Summed hours override the comparator.
    table.on_header_click("hours");
    assert_eq!(
        group_keys(&table.view().body),
        vec!["2024-03-04", "2024-03-05", "2024-03-03"]
    );
    table.on_header_click("hours");
    assert_eq!(
        group_keys(&table.view().body),
        vec!["2024-03-03", "2024-03-05", "2024-03-04"]
    );
}

#[test]
fn test_custom_group_header() {
    let table = Table::builder(TimeEntry::columns())
        .rows(vec![
            entry("a", 4, Some("1")),
            entry("b", 4, Some("2")),
            entry("c", 5, Some("1")),
        ])
        .group_by(TimeEntry::by_date())
        .expanded(["2024-03-05"])
        .group_header(|key, members, expanded| {
            let state = if expanded { "open" } else { "closed" };
            format!("{}: {} entries, {}", key, members.len(), state)
        })
        .build()
        .unwrap();

    let view = table.view();
    let ViewBody::Groups(groups) = &view.body else {
        panic!("expected groups");
    };
    let headers: Vec<&str> = groups.iter().map(|g| g.header.as_str()).collect();
    assert_eq!(
        headers,
        vec!["2024-03-04: 2 entries, closed", "2024-03-05: 1 entries, open"]
    );
}

#[test]
fn test_page_size_change_notifies_and_returns_to_first_page() {
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = sizes.clone();
    let rows: Vec<TimeEntry> = (1..=9).map(|i| entry(&i.to_string(), 4, Some("1"))).collect();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(rows)
        .page_size(2)
        .on_page_size_change(move |size| sink.borrow_mut().push(size))
        .build()
        .unwrap();

    table.set_page(4);
    assert_eq!(table.view().pagination.current_page, 4);

    assert_eq!(table.set_page_size(5), EventResult::Consumed);
    assert_eq!(*sizes.borrow(), vec![5]);
    let view = table.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.page_size, Some(5));
    assert_eq!(view.pagination.total_pages, 2);

    assert_eq!(table.set_page_size(0), EventResult::Ignored);
    assert_eq!(*sizes.borrow(), vec![5]);
}

#[test]
fn test_changing_grouping_returns_to_first_page() {
    let rows: Vec<TimeEntry> = (1..=6).map(|i| entry(&i.to_string(), i, Some("1"))).collect();
    let mut table = Table::builder(TimeEntry::columns())
        .rows(rows)
        .page_size(2)
        .build()
        .unwrap();

    table.set_page(3);
    assert_eq!(table.view().pagination.current_page, 3);

    table.set_group_by(Some(TimeEntry::by_date()));
    let view = table.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(view.pagination.total_items, 6);
    assert_eq!(group_keys(&view.body), vec!["2024-03-01", "2024-03-02"]);

    table.next_page();
    assert_eq!(table.view().pagination.current_page, 2);
    table.set_group_by(None);
    let view = table.view();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(names(&flat_rows(&view.body)), vec!["1", "2"]);
}

//! Randomised checks of the pipeline invariants, with fixed seeds.

use std::collections::HashSet;

use ledger_lib::table::Column;
use ledger_lib::table::ColumnSet;
use ledger_lib::table::ExpansionState;
use ledger_lib::table::GroupBy;
use ledger_lib::table::SortState;
use ledger_lib::table::SortValue;
use ledger_lib::table::Table;
use ledger_lib::table::TableRow;
use ledger_lib::table::ViewBody;
use ledger_lib::table::group_rows;
use ledger_lib::table::sort_rows;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SEEDS: [u64; 4] = [1, 7, 42, 2024];

#[derive(Debug, Clone)]
struct Row {
    /// Input position.
    index: usize,
    hours: Option<i64>,
    project: Option<&'static str>,
}

impl TableRow for Row {
    const FIELDS: &'static [&'static str] = &["index", "hours", "project"];

    fn field(&self, name: &str) -> SortValue {
        match name {
            "index" => SortValue::from(self.index as i64),
            "hours" => SortValue::from(self.hours),
            "project" => SortValue::from(self.project),
            _ => SortValue::Null,
        }
    }
}

fn random_rows(rng: &mut StdRng, n: usize) -> Vec<Row> {
    const PROJECTS: [&str; 3] = ["alpha", "beta", "gamma"];
    (0..n)
        .map(|index| Row {
            index,
            // Few distinct values, so ties are common.
            hours: (!rng.random_bool(0.2)).then(|| rng.random_range(0..4)),
            project: (!rng.random_bool(0.1)).then(|| PROJECTS[rng.random_range(0..PROJECTS.len())]),
        })
        .collect()
}

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::new("index", "#"),
        Column::new("hours", "Hours").sortable(),
        Column::new("project", "Project").sortable(),
    ]
}

#[test]
fn test_sort_is_stable_with_nulls_last() {
    let set = ColumnSet::new(columns()).unwrap();
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = random_rows(&mut rng, 60);

        for sort in [SortState::asc("hours"), SortState::desc("hours")] {
            let sorted = sort_rows(&rows, Some(&sort), &set);
            assert_eq!(sorted.len(), rows.len());

            let first_null = sorted.iter().position(|r| r.hours.is_none());
            if let Some(first_null) = first_null {
                assert!(sorted[first_null..].iter().all(|r| r.hours.is_none()));
            }

            for pair in sorted.windows(2) {
                if pair[0].hours == pair[1].hours {
                    assert!(pair[0].index < pair[1].index, "seed {seed}: tie reordered");
                }
            }
        }
    }
}

#[test]
fn test_every_row_in_exactly_one_group() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = random_rows(&mut rng, 50);
        let refs: Vec<&Row> = rows.iter().collect();
        let groups = group_rows(&refs, &GroupBy::field("project"));

        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, rows.len());

        let seen: HashSet<usize> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|r| r.index))
            .collect();
        assert_eq!(seen.len(), rows.len());

        let keys: HashSet<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys.len(), groups.len());
    }
}

#[test]
fn test_pages_concatenate_to_sorted_rows() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = random_rows(&mut rng, 37);
        let page_size = rng.random_range(1..10);

        let mut table = Table::builder(columns())
            .rows(rows)
            .page_size(page_size)
            .default_sort(SortState::desc("hours"))
            .build()
            .unwrap();

        let expected: Vec<usize> = sort_rows(table.rows(), table.sort(), table.columns())
            .iter()
            .map(|r| r.index)
            .collect();

        let total_pages = table.view().pagination.total_pages;
        let mut collected = Vec::new();
        for page in 1..=total_pages {
            table.set_page(page);
            let view = table.view();
            let ViewBody::Rows(rows) = view.body else {
                panic!("expected flat rows");
            };
            assert!(rows.len() <= page_size);
            collected.extend(rows.iter().map(|r| r.index));
        }
        assert_eq!(collected, expected, "seed {seed}, page size {page_size}");
    }
}

#[test]
fn test_double_toggle_is_identity() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state: ExpansionState = ["alpha", "gamma"].into_iter().collect();
    for _ in 0..100 {
        let key = ["alpha", "beta", "gamma", "delta"][rng.random_range(0..4)];
        let before = state.clone();
        assert_eq!(state.toggled(key).toggled(key), before);
        state.toggle(key);
    }
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let rows = random_rows(&mut rng, 40);
        let mut table = Table::builder(columns())
            .rows(rows)
            .page_size(3)
            .build()
            .unwrap();

        table.set_page(rng.random_range(2..=14));
        assert!(table.view().pagination.current_page > 1);

        table.set_page_size(rng.random_range(1..=40));
        assert_eq!(table.view().pagination.current_page, 1);
    }
}

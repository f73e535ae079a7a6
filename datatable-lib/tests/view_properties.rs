use datatable_lib::TableConfig;
use datatable_lib::TableStore;
use datatable_lib::exchange::ExportScope;
use datatable_lib::model::Row;
use datatable_lib::query::Direction;
use datatable_lib::query::SearchTerm;
use datatable_lib::query::SortConfig;
use datatable_lib::query::filter_and_sort;
use datatable_lib::store::default_columns;
use proptest::prelude::*;

fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            "[A-Za-z ]{0,10}",
            "[a-z@.]{0,12}",
            0i64..120,
            prop::sample::select(vec!["Developer", "Designer", "Manager", ""]),
        ),
        0..30,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, email, age, role))| {
                Row::new(i.to_string())
                    .with_name(name)
                    .with_email(email)
                    .with_age(age)
                    .with_role(role)
            })
            .collect()
    })
}

fn arb_sort() -> impl Strategy<Value = SortConfig> {
    (
        prop::sample::select(vec!["name", "email", "age", "role", "missing"]),
        prop::bool::ANY,
    )
        .prop_map(|(key, desc)| {
            let direction = if desc { Direction::Desc } else { Direction::Asc };
            SortConfig::new(key, direction)
        })
}

fn store_with(rows: Vec<Row>) -> TableStore {
    TableStore::with_data(TableConfig::empty(), rows, default_columns())
}

fn matches(row: &Row, term: &str) -> bool {
    let needle = term.to_lowercase();
    row.texts().any(|t| t.to_lowercase().contains(&needle))
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_matching_rows(rows in arb_rows(), term in "[a-zA-Z@ ]{0,3}") {
        let kept = filter_and_sort(&rows, &SearchTerm::new(term.as_str()), None);
        let expected: Vec<&Row> = rows.iter().filter(|r| matches(r, &term)).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_sort_is_ordered_and_stable(rows in arb_rows(), sort in arb_sort()) {
        let view = filter_and_sort(&rows, &SearchTerm::default(), Some(&sort));
        prop_assert_eq!(view.len(), rows.len());

        for pair in view.windows(2) {
            let ordering = sort.compare(pair[0], pair[1]);
            prop_assert!(ordering.is_le());
            if ordering.is_eq() {
                let a: usize = pair[0].id().as_str().parse().unwrap();
                let b: usize = pair[1].id().as_str().parse().unwrap();
                prop_assert!(a < b);
            }
        }
    }

    #[test]
    fn prop_pages_cover_the_view(
        rows in arb_rows(),
        sort in arb_sort(),
        term in "[a-z]{0,1}",
        per_page in 1usize..8,
    ) {
        let expected: Vec<String> = filter_and_sort(&rows, &SearchTerm::new(term.as_str()), Some(&sort))
            .iter()
            .map(|r| r.id().to_string())
            .collect();

        let mut store = store_with(rows);
        store.set_search_term(term);
        store.set_sort(Some(sort));
        store.set_rows_per_page(per_page);

        let pages = store.total_pages();
        let mut seen = Vec::new();
        for page in 0..pages {
            store.set_current_page(page);
            let page = store.page();
            prop_assert!(!page.is_empty());
            prop_assert!(page.len() <= per_page);
            seen.extend(page.rows().iter().map(|r| r.id.to_string()));
        }
        prop_assert_eq!(seen, expected);

        store.set_current_page(pages);
        prop_assert!(store.page().is_empty());
    }

    #[test]
    fn prop_export_then_import_keeps_core_fields(rows in arb_rows()) {
        let store = store_with(rows.clone());
        let mut buffer = Vec::new();
        store.export_csv(&mut buffer, ExportScope::All).unwrap();

        let mut target = store_with(Vec::new());
        let count = target.import_csv(buffer.as_slice()).unwrap();
        prop_assert_eq!(count, rows.len());

        for (original, imported) in rows.iter().zip(target.rows()) {
            prop_assert_eq!(imported.name(), original.name());
            prop_assert_eq!(imported.email(), original.email());
            prop_assert_eq!(imported.age(), original.age());
            prop_assert_eq!(imported.role(), original.role());
        }
    }

    #[test]
    fn prop_visibility_is_idempotent(rows in arb_rows(), column in prop::sample::select(vec!["name", "email", "age", "role"])) {
        let mut store = store_with(rows);
        let before = store.page();
        let definition = store.column(column).cloned();

        store.set_column_visible(column, false);
        let hidden = store.page();
        let hidden_definition = store.column(column).cloned();
        prop_assert_eq!(
            hidden_definition.as_ref().map(|c| (&c.label, c.column_type, c.sortable, c.visible)),
            definition.as_ref().map(|c| (&c.label, c.column_type, c.sortable, false))
        );
        store.set_column_visible(column, false);
        prop_assert_eq!(store.page(), hidden);

        store.set_column_visible(column, true);
        store.set_column_visible(column, true);
        prop_assert_eq!(store.page(), before);
        prop_assert_eq!(store.column(column).cloned(), definition);
    }

    #[test]
    fn prop_edit_set_is_idempotent(ids in prop::collection::vec(0usize..5, 0..20)) {
        let mut store = store_with(Vec::new());
        for id in &ids {
            store.mark_editing(&id.to_string(), true);
            store.mark_editing(&id.to_string(), true);
        }

        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(store.edit_set().len(), unique.len());

        for id in &ids {
            store.mark_editing(&id.to_string(), false);
        }
        prop_assert!(store.edit_set().is_empty());
    }
}

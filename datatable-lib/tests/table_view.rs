use datatable_lib::TableConfig;
use datatable_lib::TableStore;
use datatable_lib::model::Column;
use datatable_lib::model::ColumnType;
use datatable_lib::model::Row;
use datatable_lib::model::RowPatch;
use datatable_lib::model::Value;
use datatable_lib::query::SortConfig;
use datatable_lib::store::default_columns;
use rstest::fixture;
use rstest::rstest;

#[fixture]
fn seeded() -> TableStore {
    TableStore::new(TableConfig::default())
}

#[fixture]
fn pair() -> TableStore {
    TableStore::with_data(
        TableConfig::empty(),
        vec![
            Row::new("1").with_name("John Doe").with_age(28),
            Row::new("2").with_name("Jane Smith").with_age(32),
        ],
        default_columns(),
    )
}

fn page_ids(store: &TableStore) -> Vec<String> {
    store.page().rows().iter().map(|r| r.id.to_string()).collect()
}

#[rstest]
fn test_seeded_store_shows_first_page(seeded: TableStore) {
    let page = seeded.page();
    assert_eq!(page.len(), 5);
    assert_eq!(page.total_count(), 5);
    assert_eq!(page.total_pages(), 1);
    assert_eq!(page.rows()[0].texts(), vec!["John Doe", "john@example.com", "28", "Developer"]);
}

#[rstest]
#[case("jane", vec!["2"])]
#[case("JANE", vec!["2"])]
#[case("32", vec!["2"])]
#[case("", vec!["1", "2"])]
#[case("nobody", vec![])]
fn test_search(mut pair: TableStore, #[case] term: &str, #[case] expected: Vec<&str>) {
    pair.set_search_term(term);
    assert_eq!(page_ids(&pair), expected);
}

#[rstest]
#[case(SortConfig::asc("age"), vec!["1", "4", "2", "5", "3"])]
#[case(SortConfig::desc("age"), vec!["3", "5", "2", "4", "1"])]
#[case(SortConfig::asc("name"), vec!["4", "3", "5", "2", "1"])]
#[case(SortConfig::asc("role"), vec!["5", "2", "1", "4", "3"])]
#[case(SortConfig::desc("role"), vec!["3", "1", "4", "2", "5"])]
fn test_sort(mut seeded: TableStore, #[case] sort: SortConfig, #[case] expected: Vec<&str>) {
    seeded.set_sort(Some(sort));
    assert_eq!(page_ids(&seeded), expected);
}

#[rstest]
fn test_sort_leaves_storage_order(mut seeded: TableStore) {
    seeded.set_sort(Some(SortConfig::desc("age")));
    let stored: Vec<&str> = seeded.rows().iter().map(|r| r.id().as_str()).collect();
    assert_eq!(stored, vec!["1", "2", "3", "4", "5"]);
}

#[rstest]
#[case(2, 0, vec!["1", "2"])]
#[case(2, 1, vec!["3", "4"])]
#[case(2, 2, vec!["5"])]
#[case(2, 3, vec![])]
#[case(10, 0, vec!["1", "2", "3", "4", "5"])]
fn test_pagination(
    mut seeded: TableStore,
    #[case] per_page: usize,
    #[case] page: usize,
    #[case] expected: Vec<&str>,
) {
    assert!(seeded.set_rows_per_page(per_page));
    seeded.set_current_page(page);
    assert_eq!(page_ids(&seeded), expected);
    assert_eq!(seeded.page().total_count(), 5);
}

#[rstest]
fn test_search_then_sort_then_page(mut seeded: TableStore) {
    seeded.set_rows_per_page(1);
    seeded.set_current_page(1);
    seeded.set_search_term("developer");
    assert_eq!(seeded.current_page(), 0);

    seeded.set_sort(Some(SortConfig::desc("age")));
    seeded.set_current_page(1);
    assert_eq!(page_ids(&seeded), vec!["1"]);
    assert_eq!(seeded.total_pages(), 2);
}

#[rstest]
fn test_hidden_column_is_projected_away(mut seeded: TableStore) {
    assert!(seeded.set_column_visible("email", false));
    let page = seeded.page();
    assert_eq!(page.rows()[0].texts(), vec!["John Doe", "28", "Developer"]);
    assert_eq!(seeded.rows()[0].email(), "john@example.com");

    seeded.set_search_term("alice@");
    assert_eq!(page_ids(&seeded), vec!["4"]);
}

#[rstest]
fn test_added_column_reads_absent_until_edited(mut pair: TableStore) {
    let id = pair.add_column_labeled("Start Date", ColumnType::Text).unwrap();
    assert_eq!(id, "start_date");
    assert_eq!(pair.page().rows()[0].texts(), vec!["John Doe", "", "28", "", ""]);

    let patch = RowPatch::new().set("start_date", "2024-01-15");
    assert_eq!(pair.update_row("1", patch), Ok(true));
    assert_eq!(pair.page().rows()[0].get("start_date"), Some(&Value::from("2024-01-15")));

    pair.set_search_term("2024-01");
    assert_eq!(page_ids(&pair), vec!["1"]);
}

#[rstest]
fn test_added_number_column_sorts_numerically(mut pair: TableStore) {
    pair.add_column(Column::new("score", "Score", ColumnType::Number)).unwrap();
    pair.update_row("1", RowPatch::new().set("score", 10i64)).unwrap();
    pair.update_row("2", RowPatch::new().set("score", 9i64)).unwrap();
    pair.set_sort(Some(SortConfig::asc("score")));
    assert_eq!(page_ids(&pair), vec!["2", "1"]);
}

#[rstest]
fn test_header_clicks(mut seeded: TableStore) {
    seeded.toggle_sort("age");
    assert_eq!(page_ids(&seeded)[0], "1");
    seeded.toggle_sort("age");
    assert_eq!(page_ids(&seeded)[0], "3");
}

#[rstest]
fn test_editing_rows_are_flagged(mut pair: TableStore) {
    pair.mark_editing("2", true);
    pair.mark_editing("2", true);
    assert_eq!(pair.edit_set().len(), 1);

    let flags: Vec<bool> = pair.page().rows().iter().map(|r| r.editing).collect();
    assert_eq!(flags, vec![false, true]);

    pair.mark_editing("2", false);
    assert!(pair.edit_set().is_empty());
}

#[rstest]
fn test_new_row_appears_on_last_page(mut seeded: TableStore) {
    seeded.set_rows_per_page(5);
    let id = seeded.add_blank_row();
    assert_eq!(seeded.total_pages(), 2);

    seeded.set_current_page(1);
    let page = seeded.page();
    assert_eq!(page.rows()[0].id, id);
    assert!(page.rows()[0].editing);
    assert_eq!(page.rows()[0].texts(), vec!["", "", "0", ""]);
}

#[rstest]
fn test_rejects_type_mismatch(mut pair: TableStore) {
    let err = pair
        .update_row("1", RowPatch::new().set("age", "twenty"))
        .unwrap_err();
    assert_eq!(err.field(), "age");
    assert_eq!(pair.row("1").unwrap().age(), 28);
}

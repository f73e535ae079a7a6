//! Walks a seeded table through search, sort, paging, editing and CSV.
//!
//! Run with: cargo run --example dashboard

use std::fs::File;

use datatable_lib::TableConfig;
use datatable_lib::TableStore;
use datatable_lib::exchange::ExportScope;
use datatable_lib::exchange::export_file_name_today;
use datatable_lib::model::ColumnType;
use datatable_lib::query::Page;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("dashboard.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut store = TableStore::new(TableConfig::default().with_rows_per_page(2));
    print_page(&store, &store.page());

    store.set_search_term("developer");
    store.toggle_sort("age");
    store.toggle_sort("age");
    println!("\nDevelopers, oldest first:");
    print_page(&store, &store.page());

    store.set_search_term("");
    let department = store.add_column_labeled("Department", ColumnType::Text)?;
    let id = store.add_blank_row();
    if let Some(mut draft) = store.begin_edit(id.as_str()) {
        draft.set("name", "Dana Lee");
        draft.set("age", "31");
        draft.set(department.as_str(), "Research");
        store.commit_draft(draft)?;
    }

    store.set_current_page(store.total_pages().saturating_sub(1));
    println!("\nLast page after adding a row:");
    print_page(&store, &store.page());

    let imported = store.import_csv("name,email,age,role\nEve,eve@example.com,27,Tester\n".as_bytes())?;
    println!("\nImported {} rows", imported);

    let path = export_file_name_today();
    let written = store.export_csv(File::create(&path)?, ExportScope::All)?;
    println!("Exported {} rows to {}", written, path);

    Ok(())
}

fn print_page(store: &TableStore, page: &Page) {
    let header: Vec<&str> = store.visible_columns().map(|c| c.label.as_str()).collect();
    println!("{}", header.join(" | "));
    for row in page.rows() {
        let marker = if row.editing { "*" } else { " " };
        println!("{} {}", marker, row.texts().join(" | "));
    }
    println!(
        "page {} of {} ({} rows)",
        page.page_index() + 1,
        page.total_pages().max(1),
        page.total_count()
    );
}

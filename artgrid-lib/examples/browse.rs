//! Browse the public artworks listing and select rows across pages.
//!
//! Run with: cargo run --example browse -- [page] [ids]
//!
//! `page` is the page to jump to after the first one (default 2) and `ids` is
//! a comma-separated list handed to the bulk selection (default "").
//! Logs are written to `browse.log`.

use std::env;
use std::fs::File;
use std::time::Duration;

use artgrid_lib::ArticClient;
use artgrid_lib::DEFAULT_FIELDS;
use artgrid_lib::GridController;
use artgrid_lib::pager::LoaderConfig;
use simplelog::{Config, LevelFilter, WriteLogger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("browse.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut args = env::args().skip(1);
    let target: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(2);
    let bulk = args.next().unwrap_or_default();

    let client = ArticClient::builder()
        .timeout(Duration::from_secs(20))
        .build()?;
    let controller = GridController::new(client, LoaderConfig::default())?;

    println!("Loading first page...\n");
    controller.initialize().await?;
    print_page(&controller);

    let first_id = controller.rows().first().map(|row| row.record.id());
    if let Some(id) = first_id {
        controller.on_toggle(id, true);
        println!("\nSelected {id}");
    }

    if !bulk.is_empty() {
        let map = controller.submit_bulk_selection(&bulk);
        println!("Bulk selection now holds {} ids", map.selected_count());
    }

    println!("\nJumping to page {target}...\n");
    if let Err(e) = controller.on_page_change(target).await {
        println!("Could not load page {target}: {e}");
    }
    print_page(&controller);

    println!("\nSelected across all pages: {:?}", controller.selected_ids());
    Ok(())
}

fn print_page<S>(controller: &GridController<S>) {
    let view = controller.pagination();
    println!(
        "Page {} of {} ({} artworks){}",
        view.current_page,
        view.page_count,
        view.total_records.unwrap_or(0),
        if controller.header_checked() { " [all selected]" } else { "" }
    );

    for row in controller.rows() {
        let columns = row.record.display_values(DEFAULT_FIELDS);
        println!(
            "[{}] {:>7} {}",
            if row.selected { "x" } else { " " },
            row.record.id(),
            columns.join(" | ")
        );
    }
}

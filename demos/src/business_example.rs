use std::env;

use catalog_admin::business::SearchField;
use catalog_admin::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_admin=info".into()),
        )
        .init();

    let dashboard = Dashboard::from_env()?;
    let term = env::args().nth(1).unwrap_or_else(|| "pizza".to_string());

    let directory = dashboard.businesses();
    directory.set_search_field(SearchField::City).await?;

    println!("Searching businesses by city for {:?}", term);
    match directory.search(&term).await? {
        Some(outcome) => println!("Search {:?}", outcome),
        None => println!("Search superseded by newer input"),
    }

    loop {
        println!("\nPage {} of {}", directory.page(), directory.pages());
        for business in directory.controller().entities() {
            println!(
                "  {:<30} {:<20} {}",
                business.name, business.category, business.address.city
            );
        }
        if directory.page() >= directory.pages() {
            break;
        }
        directory.next_page().await?;
    }

    println!("Business example completed");
    Ok(())
}

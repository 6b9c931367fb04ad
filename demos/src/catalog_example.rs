use std::env;

use catalog_admin::catalog::{FilterChange, SortField};
use catalog_admin::forms::{CategoryDraft, ItemDraft};
use catalog_admin::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dashboard = Dashboard::from_env()?;
    let username = env::var("DASHBOARD_USERNAME")?;
    let password = env::var("DASHBOARD_PASSWORD")?;

    println!("Signing in as {}", username);
    dashboard.auth().sign_in(&username, &password).await?;

    let categories = dashboard.categories();
    categories.load().await?;
    let stats = categories.stats();
    println!(
        "{} categories, {} sections, {} items, {} samples",
        stats.categories, stats.sections, stats.items, stats.samples
    );

    // Create a category through the same form the dashboard modal uses
    categories.open_create();
    let mut form: Form<CategoryDraft> = Form::create();
    form.update(|_| CategoryDraft {
        name: "Demo category".to_string(),
    });
    let notification = form.submit(&categories).await;
    println!("{:?}: {}", notification.level, notification.message);

    let Some(category) = categories
        .entities()
        .into_iter()
        .find(|c| c.name == "Demo category")
    else {
        println!("Demo category not found after reload");
        return Ok(());
    };

    let detail = dashboard.category(&category.id);
    detail.load().await?;

    for section in detail.sections().entities() {
        let items = detail.items(&section.id);
        items.apply_filter(FilterChange::MinPrice("5".to_string()));
        items.toggle_sort(SortField::Price);

        println!("\n{} ({} items)", section.title, items.entities().len());
        for item in items.visible_items() {
            println!("  {:<30} {:>8.2}", item.name, item.price);
        }

        let mut item_form = Form::with_draft(FormMode::Create, ItemDraft::for_section(&section.id));
        item_form.update(|draft| ItemDraft {
            name: "Demo item".to_string(),
            price: "9.90".to_string(),
            ..draft
        });
        let notification = detail.submit_item(&mut item_form).await;
        println!("{:?}: {}", notification.level, notification.message);
    }

    println!("\nRemoving the demo category");
    categories
        .remove(&category.id, Confirmation::Confirmed)
        .await?;

    dashboard.auth().sign_out().await?;
    println!("Catalog example completed");

    Ok(())
}

use std::env;

use catalog_admin::chatbot::ConfidenceBand;
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
    let chatbot = dashboard.chatbot();

    // Optional knowledge base file as first argument
    if let Some(path) = env::args().nth(1) {
        let imported = chatbot.import_file(&path).await?;
        println!("Imported {} QA pairs from {}", imported.len(), path);
    }

    let query = env::args()
        .nth(2)
        .unwrap_or_else(|| "What are your opening hours?".to_string());
    println!("Testing query: {}", query);

    let result = chatbot.test(&query).await?;
    println!("Reply: {}", result.message);
    println!("Confidence: {}%", result.confidence_percent());
    println!("Intents: {:?}", result.analysis.intents);
    println!("Key phrases: {:?}", result.analysis.key_phrases);
    for m in &result.matches {
        println!("  {:.2} {} -> {}", m.score, m.question, m.answer);
    }

    if result.band() == ConfidenceBand::Low {
        println!("Low confidence: add QA pairs with keywords matching this query");
    }

    Ok(())
}

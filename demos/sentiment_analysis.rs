use std::sync::Arc;

use anyhow::Result;
use review_sentiment::pipelines::sentiment_analysis_pipeline::*;
use review_sentiment::reviews::{collect_from_text, Analyzer};

#[tokio::main]
async fn main() -> Result<()> {
    println!("Building pipeline...");

    let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base)
        .batch_size(8)
        .build()
        .await?;

    println!("Pipeline built successfully.");

    let text = "Earrings arrived quickly!\nBeautiful packaging.\n\nToo heavy for my ears...";

    let result = pipeline.predict("I love my new earrings")?;
    println!("\n=== Single Review ===");
    println!("Sentiment: {} (confidence: {:.4})", result.label, result.score);

    let reviews = collect_from_text(text);
    let table = Analyzer::new(Arc::new(pipeline)).on_analyze_requested(&reviews)?;

    println!("\n=== Review Table ===");
    for row in table.rows() {
        println!("{:<40} {:<10} {:.3}", row.review, row.sentiment, row.confidence);
    }

    let export = table.to_csv()?;
    println!("\n{} ({} bytes)", export.file_name, export.bytes.len());
    print!("{}", String::from_utf8_lossy(&export.bytes));

    Ok(())
}

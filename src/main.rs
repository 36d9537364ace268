use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use review_sentiment::pipelines::SentimentAnalysisPipelineBuilder;
use review_sentiment::reviews::Analyzer;
use review_sentiment::web::{configure_routes, Templates};
use review_sentiment::{AnalysisError, ServeConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServeConfig::parse();
    tracing::info!(
        model = %config.model_size,
        batch_size = config.batch_size,
        "starting review sentiment analyzer"
    );

    // Load once; every request shares this instance.
    let pipeline = SentimentAnalysisPipelineBuilder::modernbert(config.model_size)
        .device_request(config.device_request())
        .batch_size(config.batch_size)
        .build()
        .await
        .map_err(AnalysisError::ClassifierLoad)?;

    let analyzer = web::Data::new(Analyzer::new(Arc::new(pipeline)));
    let templates = web::Data::new(Templates::new().context("failed to compile page templates")?);

    let bind_address = config.bind_address();
    tracing::info!("listening on http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(analyzer.clone())
            .app_data(templates.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?
    .run()
    .await?;

    Ok(())
}

mod config;
mod error;
mod handlers;
mod models;
mod services;
mod web;

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::AnalysisHandler;
use services::{GeminiService, VisionService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    log::info!("🚀 Starting NutriScan...");

    // Load configuration (fails fast when the API key is missing)
    let config = Config::from_env()?;

    let vision = Arc::new(GeminiService::new(&config)) as Arc<dyn VisionService>;
    log::info!(
        "✅ Gemini service initialized with model: {}",
        config.gemini_model
    );

    let handler = Arc::new(AnalysisHandler::new(vision));
    log::info!("✅ Analysis handler initialized");

    let app = web::create_router(handler);

    log::info!("🌐 Server starting on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    println!("\n🍽️ NutriScan is running!");
    println!("🌐 Open http://{} in your browser", config.bind_addr);
    println!("📸 Upload a meal photo to get its nutritional breakdown");
    println!("\n🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;

    Ok(())
}

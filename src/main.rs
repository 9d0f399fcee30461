use clap::Parser;
use std::path::Path;
use title_recommender::app::{build_extractor, build_recommender};
use title_recommender::domain::ports::Recommender;
use title_recommender::domain::model::BatchRow;
use title_recommender::utils::error::{ErrorSeverity, RecommendError};
use title_recommender::utils::{logger, validation::Validate};
use title_recommender::{
    AppConfig, BatchOrchestrator, CliConfig, LocalStorage, RecommendEngine,
    RecommendationPipeline,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting title-recommender");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<(), RecommendError> {
    config.validate()?;

    let app_config = load_app_config(&config.config)?;
    app_config.validate()?;

    let recommender = build_recommender(&app_config, config.offline)?;

    if let Some(seed) = config.seed.as_deref() {
        // 單一關鍵字查詢
        for title in recommender.recommend(seed.trim()).await {
            println!("{}", title);
        }
        return Ok(());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let preview_rows = config.preview_rows;
    let orchestrator = BatchOrchestrator::new(build_extractor(&app_config), recommender);
    let storage = LocalStorage::new(".".to_string());
    let pipeline = RecommendationPipeline::new(storage, config, orchestrator);
    let engine = RecommendEngine::new_with_monitoring(pipeline, monitor_enabled);

    let (output_path, rows) = engine.run_with_rows().await?;
    print_preview(&rows, preview_rows);

    println!("✅ Recommendation completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn load_app_config(path: &str) -> Result<AppConfig, RecommendError> {
    if Path::new(path).exists() {
        tracing::info!("📁 Loading configuration from: {}", path);
        AppConfig::from_file(path)
    } else {
        tracing::info!("No configuration file at {}, using defaults", path);
        Ok(AppConfig::default())
    }
}

fn print_preview(rows: &[BatchRow], limit: usize) {
    for row in rows.iter().take(limit) {
        println!("{}\t{}\t{}", row.original_title, row.seed, row.joined_titles());
    }
    if rows.len() > limit {
        println!("... {} more rows", rows.len() - limit);
    }
}

use clap::Parser;
use desk_detox::analyzer::{self, Analyzer, CacheFile, CachedAnalyzer, GeminiClient};
use desk_detox::{capture, cli, config, error, logging, report, results, review};
use desk_detox_common::{
    Controller, DashboardView, DetoxResponse, DocumentStore, Filter, ProcessingStatus,
    ViewOptions,
};
use cli::{Cli, Commands};
use config::Config;
use error::{DetoxError, Result};
use review::ReviewState;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, output, use_cache, cache_dir, filter, no_privacy, review, model } => {
            println!("🗂  desk-detox - desk analysis\n");

            if let Some(model) = model {
                config.model = model;
            }
            let api_key = config.get_api_key()?;

            // 1. Image
            println!("[1/2] Loading image...");
            let captured = capture::load_image(&image, config.max_image_size)?;
            println!("✔ {} ({} KB)\n", captured.mime_type, captured.bytes.len() / 1024);

            // 2. Gemini
            println!("[2/2] Analysing with {}...{}", config.model, if use_cache { " (cache on)" } else { "" });
            let client = GeminiClient::new(&api_key, &config)?;
            let backend: Box<dyn Analyzer> = if use_cache {
                let folder = match cache_dir {
                    Some(dir) => dir,
                    None => CacheFile::default_dir()?,
                };
                Box::new(CachedAnalyzer::new(client, folder))
            } else {
                Box::new(client)
            };

            let mut controller = Controller::new();
            let bar = logging::spinner("Scanning documents...");
            let outcome = analyzer::run_analysis(&mut controller, backend.as_ref(), captured).await;
            bar.finish_and_clear();
            outcome?;

            if controller.status() == ProcessingStatus::Error {
                let message = controller.error().unwrap_or_default().to_string();
                return Err(DetoxError::AnalysisFailed(message));
            }
            println!("✔ Analysis complete\n");

            let Some(store) = controller.store_mut() else {
                return Err(DetoxError::AnalysisFailed("no result".into()));
            };
            present(store, filter, no_privacy, review)?;

            if let Some(output) = output {
                save_result(&store.to_response(), &output)?;
            }
        }

        Commands::Show { input, filter, no_privacy, review, output } => {
            let response = results::load_result(&input)?;
            let mut store = DocumentStore::load(&response);

            present(&mut store, filter, no_privacy, review)?;

            if review {
                let target = output.unwrap_or(input);
                save_result(&store.to_response(), &target)?;
            } else if let Some(output) = output {
                save_result(&store.to_response(), &output)?;
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if let Some(model) = set_model {
                config.model = model;
                config.save()?;
                println!("✔ Model set to {}", config.model);
            }

            if show {
                println!("Configuration:");
                println!("  File: {}", Config::config_path()?.display());
                println!("  Model: {}", config.model);
                println!("  Max image size: {}px", config.max_image_size);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!(
                    "  API key: {}",
                    config.masked_api_key().unwrap_or_else(|| "not set".to_string())
                );
            }
        }

        Commands::Cache { clear, cache_dir, info } => {
            let folder = match cache_dir {
                Some(dir) => dir,
                None => CacheFile::default_dir()?,
            };
            let cache_path = CacheFile::cache_path(&folder);

            if info {
                if cache_path.exists() {
                    let cache = CacheFile::load(&folder);
                    println!("Cache:");
                    println!("  Path: {}", cache_path.display());
                    println!("  Entries: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Size: {} bytes", meta.len());
                    }
                } else {
                    println!("No cache file: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&folder) {
                    Ok(true) => println!("✔ Cache deleted: {}", cache_path.display()),
                    Ok(false) => println!("No cache file to delete"),
                    Err(e) => println!("Could not delete cache: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Print the dashboard, or run the review loop when asked
fn present(store: &mut DocumentStore, filter: Filter, no_privacy: bool, interactive: bool) -> Result<()> {
    let state = ReviewState {
        filter,
        options: ViewOptions { privacy: !no_privacy, ..ViewOptions::default() },
    };

    if interactive {
        review::run(store, state)?;
    } else {
        let view = DashboardView::build(store, state.filter, &state.options);
        println!("{}", report::render(&view));
    }
    Ok(())
}

fn save_result(response: &DetoxResponse, path: &Path) -> Result<()> {
    results::save_result(response, path)?;
    println!("✔ Result saved: {}", path.display());
    Ok(())
}

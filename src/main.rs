use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use unlocked_scraper::{Scraper, ScraperConfig};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ScraperConfig::default(),
    };

    let scraper = match Scraper::new(config) {
        Ok(scraper) => scraper,
        Err(e) => {
            ::log::error!("Failed to set up scraper: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Search { query, limit } => print(scraper.search(&query, limit).await),
        Command::Detail { game } => print(scraper.get_detail(&game).await),
        Command::Category { category, page } => {
            print(scraper.list_category(&category, page).await)
        }
        Command::Az { letter, page } => print(scraper.list_az(letter.as_deref(), page).await),
        Command::Categories => print(Ok(scraper.categories())),
        Command::Download { url, headless } => {
            println!("Note: downloads require a WebDriver server (e.g., ChromeDriver).");
            println!(
                "Set WEBDRIVER_URL environment variable if not using the default {}",
                scraper.config().automation.webdriver_url
            );

            let headless = headless || scraper.config().automation.headless;
            let report = scraper.run_auto_download(&url, headless).await;
            ::log::info!("{}", report);
            let completed = report.is_completed();
            let code = print(Ok(report));
            if completed { code } else { ExitCode::FAILURE }
        }
    }
}

/// Print a result as pretty JSON, or log the error
fn print<T: Serialize>(result: unlocked_scraper::Result<T>) -> ExitCode {
    let value = match result {
        Ok(value) => value,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

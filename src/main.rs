use clap::Parser;
use portfolio_services::config::{AppsQuery, Command};
use portfolio_services::core::{QuizProvider, Storage};
use portfolio_services::domain::model::{AppRecord, QuizPayload};
use portfolio_services::utils::error::ErrorSeverity;
use portfolio_services::utils::{logger, validation::Validate};
use portfolio_services::{
    format_price, format_review_count, AppCatalog, CliConfig, LocalStorage, QuizService,
    Result, TomlConfig,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入配置，未指定檔案時使用預設值
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    let verbose = cli.verbose || config.verbose_logs();
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting portfolio CLI");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli.command, config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
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

    Ok(())
}

async fn run(command: &Command, config: TomlConfig) -> Result<()> {
    match command {
        Command::Quiz { output, .. } => {
            let storage = LocalStorage::new(".");
            let service = QuizService::new(storage.clone(), config);
            let provider: &dyn QuizProvider = &service;
            let query = command.quiz_query().unwrap_or_default();
            query.validate()?;

            let payload = provider.fetch_quiz_data(&query).await?;
            emit_payload(&storage, &payload, output.as_deref()).await
        }
        Command::CustomQuiz { output, .. } => {
            let storage = LocalStorage::new(".");
            let service = QuizService::new(storage.clone(), config);
            let provider: &dyn QuizProvider = &service;
            let request = command.custom_request().unwrap_or_default();
            request.validate()?;

            let payload = provider.fetch_custom_quiz_data(&request).await?;
            emit_payload(&storage, &payload, output.as_deref()).await
        }
        Command::Apps { query } => {
            let catalog = AppCatalog::from_manifest_file(config.manifest_path())?;
            tracing::debug!("Catalog loaded with {} apps", catalog.all_apps().len());
            run_apps_query(&catalog, query)
        }
    }
}

async fn emit_payload(
    storage: &LocalStorage,
    payload: &QuizPayload,
    output: Option<&str>,
) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;

    match output {
        Some(path) => {
            storage.write_file(path, json.as_bytes()).await?;
            tracing::info!("📁 Quiz from {} saved to: {}", payload.source, path);
            println!("✅ {} question(s) from {} saved to {}", payload.quiz.len(), payload.source, path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_apps_query(catalog: &AppCatalog, query: &AppsQuery) -> Result<()> {
    match query {
        AppsQuery::List => print_apps(catalog.all_apps()),
        AppsQuery::Categories => {
            for category in catalog.categories() {
                println!("{}", category);
            }
        }
        AppsQuery::Category { name } => print_apps(&catalog.apps_by_category(name)),
        AppsQuery::TopPicks { limit } => print_apps(&catalog.top_picks(*limit)),
        AppsQuery::ByRating { limit } => print_apps(&catalog.apps_by_rating(*limit)),
        AppsQuery::Search { query } => {
            let results = catalog.search_apps(query);
            if results.is_empty() {
                println!("No apps match '{}'", query.trim());
            }
            print_apps(&results);
        }
        AppsQuery::Show { id } => match catalog.app_by_id(*id) {
            Some(app) => println!("{}", serde_json::to_string_pretty(app)?),
            None => println!("No app with id {}", id),
        },
    }
    Ok(())
}

fn print_apps(apps: &[AppRecord]) {
    for app in apps {
        println!(
            "{:>3}  {:<24} {:<20} {:<14} ★ {:.1} ({} reviews)  {}{}",
            app.id,
            app.name,
            app.developer,
            app.category,
            app.rating,
            format_review_count(app.reviews),
            format_price(app.price),
            if app.is_installed() { "  [installed]" } else { "" }
        );
    }
}

use clap::Parser;
use solar_presenter::domain::catalog::personas;
use solar_presenter::domain::model::LoadingStates;
use solar_presenter::render::markdown::api_key_status;
use solar_presenter::render::{render_personas, render_view};
use solar_presenter::utils::error::{ErrorSeverity, PresenterError};
use solar_presenter::utils::{logger, validation::Validate};
use solar_presenter::{
    AppConfig, CliConfig, ContentService, LocalStorage, Presenter, PresentationExporter,
    TomlConfig,
};
use tokio::sync::mpsc;

fn fail(e: &PresenterError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting solar-presenter");

    if cli.list_personas {
        println!("{}", render_personas(&personas()));
        return Ok(());
    }

    let toml = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml = TomlConfig::from_file(path).unwrap_or_else(|e| fail(&e));
            if let Err(e) = toml.validate() {
                fail(&e);
            }
            Some(toml)
        }
        None => None,
    };

    let config = AppConfig::resolve(&cli, toml.as_ref());
    if let Err(e) = config.validate() {
        fail(&e);
    }
    tracing::debug!("Effective config: {:?}", AppConfig {
        api_key: config.api_key.as_ref().map(|_| "***".to_string()),
        ..config.clone()
    });

    let service = ContentService::from_config(&config);
    tracing::debug!(
        "Text model: {}, image model: {}",
        service.settings().text_model,
        service.settings().image_model
    );

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<LoadingStates>();
    let progress_printer = tokio::spawn(async move {
        while let Some(loading) = progress_rx.recv().await {
            if let Some(stage) = loading.active_stage() {
                eprintln!("⏳ {}", stage.spinner_message());
            }
        }
    });

    let mut presenter = Presenter::new(service).with_progress(progress_tx);
    presenter.set_user_api_key(config.api_key.as_deref().unwrap_or(""));
    eprintln!("{}", api_key_status(presenter.api_key_available()));

    if let Some(id) = &cli.persona {
        if let Err(e) = presenter.select_persona_by_id(id).await {
            fail(&e);
        }
    } else if let Some(text) = &cli.custom {
        if !presenter.submit_custom_data(text).await {
            eprintln!("❌ Custom customer data cannot be empty");
            std::process::exit(1);
        }
    } else {
        println!("{}", render_view(&presenter));
        println!("{}", render_personas(&personas()));
        eprintln!("💡 Pick a persona with --persona <id> or describe a customer with --custom \"...\"");
        return Ok(());
    }

    if cli.faq && presenter.error().is_none() {
        presenter.generate_faq().await;
    }

    println!("{}", render_view(&presenter));

    if let Some(error) = presenter.error() {
        eprintln!("❌ {}", error);
        std::process::exit(2);
    }

    if config.export_enabled {
        let storage = LocalStorage::new(config.output_path.clone());
        let exporter = PresentationExporter::new(storage, config.compress);
        match exporter.export(presenter.presentation()).await {
            Ok(location) => {
                tracing::info!("📁 Presentation saved to: {}", location);
                eprintln!("📁 Presentation saved to: {}", location);
            }
            Err(e) => fail(&e),
        }
    }

    drop(presenter);
    let _ = progress_printer.await;

    Ok(())
}

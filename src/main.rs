use clap::Parser;
use microbiobase::{browse, cli, config, error, export, loader, render};
use cli::{Cli, Commands, ThemeAction};
use config::Config;
use error::MicroBioError;
use loader::Fallback;
use microbiobase_common::{project, AliasConfig, AppState, JsonFileStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load()?;
    config.apply_env();
    if let Some(dataset) = &cli.dataset {
        config.dataset_path = dataset.clone();
    }
    if let Some(fallback) = &cli.fallback {
        config.fallback_path = Some(fallback.clone());
    }
    if let Some(storage) = &cli.storage {
        config.storage_path = Some(storage.clone());
    }
    if let Some(aliases) = &cli.aliases {
        config.aliases_path = Some(aliases.clone());
    }

    // commands that never touch the dataset
    match &cli.command {
        Commands::Config { set_dataset, set_storage, show } => {
            let mut saved = Config::load()?;

            if let Some(dataset) = set_dataset {
                saved.dataset_path = dataset.clone();
                saved.save()?;
                println!("✔ Dataset set: {}", saved.dataset_path.display());
            }
            if let Some(storage) = set_storage {
                saved.storage_path = Some(storage.clone());
                saved.save()?;
                println!("✔ Storage set: {}", storage.display());
            }

            if *show {
                println!("Config ({}):", Config::config_path()?.display());
                println!("  dataset: {}", config.dataset_path.display());
                println!("  fallback: {}", describe(&config.fallback_path, "embedded"));
                println!("  storage: {}", config.resolved_storage_path()?.display());
                println!("  aliases: {}", describe(&config.aliases_path, "built-in"));
            }
            return Ok(());
        }
        Commands::Theme { action } => {
            let store = JsonFileStore::open(config.resolved_storage_path()?);
            let mut app = AppState::new(Vec::new(), store);

            match action {
                Some(ThemeAction::Set(theme)) => {
                    app.set_theme(*theme)?;
                }
                Some(ThemeAction::Toggle) => {
                    app.toggle_theme()?;
                }
                None => {}
            }
            println!("Theme: {}", app.theme());
            return Ok(());
        }
        _ => {}
    }

    let aliases = match &config.aliases_path {
        Some(path) => AliasConfig::from_file(path)?,
        None => AliasConfig::builtin(),
    };

    let fallback = if cli.no_fallback {
        Fallback::Disabled
    } else {
        match &config.fallback_path {
            Some(path) => Fallback::File(path.clone()),
            None => Fallback::Embedded,
        }
    };

    let outcome = loader::load_dataset(&config.dataset_path, &fallback, &aliases).await;
    if let Some(message) = &outcome.error {
        eprintln!("{}", message);
    }
    info!(source = ?outcome.source, count = outcome.items.len(), "items ready");

    let store = JsonFileStore::open(config.resolved_storage_path()?);
    let mut app = AppState::new(outcome.items, store);

    match cli.command {
        Commands::List { search, category } => {
            app.set_search(search);
            app.set_category(category);
            println!("{}", render::render_cards(&app.visible(), app.favorites()));
        }

        Commands::Show { id } => {
            let item = app.find(&id).ok_or_else(|| MicroBioError::ItemNotFound(id.clone()))?;
            println!("{}", render::render_detail(&project(item)));
        }

        Commands::Favorite { id } => {
            if app.find(&id).is_none() && !app.is_favorite(&id) {
                return Err(MicroBioError::ItemNotFound(id).into());
            }
            if app.toggle_favorite(&id)? {
                println!("★ Added to favorites: {}", id);
            } else {
                println!("☆ Removed from favorites: {}", id);
            }
        }

        Commands::Favorites => {
            let items = app.favorite_items();
            if items.is_empty() {
                println!("No favorites yet.");
            }
            for item in items {
                println!("{}\n", render::render_card(item, true));
            }
        }

        Commands::Categories => {
            println!("{}", render::render_categories(app.items(), app.favorites()));
        }

        Commands::Export { format, output, title } => {
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

            let items = app.favorite_items();
            println!("- Exporting {} favorites...", items.len());
            let path = export::export_favorites(&items, &format, &output, &title, &generated_at)?;
            println!("✔ Exported: {}", path.display());
        }

        Commands::Normalize { output } => {
            let json = serde_json::to_string_pretty(app.items())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ Normalized {} items: {}", app.items().len(), path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Browse => browse::run(&mut app)?,

        Commands::Config { .. } | Commands::Theme { .. } => unreachable!("handled before loading"),
    }

    Ok(())
}

fn describe(path: &Option<PathBuf>, default: &str) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| default.to_string())
}

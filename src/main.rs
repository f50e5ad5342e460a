//! Folio - a file-backed content index for small publishing tools.

use anyhow::{Context, Result, bail};
use clap::Parser;
use folio::cli::{Cli, Commands};
use folio::config::SiteConfig;
use folio::{Catalog, Document, LoadSummary, Visibility, log};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut catalog = Catalog::from_config(&config.content);
    let summary = catalog.load()?;

    match &cli.command {
        Commands::List { limit, all, json } => list_documents(&catalog, *limit, *all, *json),
        Commands::Show { id } => show_document(&catalog, id),
        Commands::Check => check_catalog(&summary),
    }
}

/// Load configuration from CLI arguments, falling back to defaults when no
/// config file is present.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config_path = match &cli.root {
        Some(root) => root.join(&cli.config),
        None => cli.config.clone(),
    };

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)
            .with_context(|| format!("failed to load `{}`", config_path.display()))?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

fn list_documents(catalog: &Catalog, limit: Option<usize>, all: bool, json: bool) -> Result<()> {
    let visibility = if all { Visibility::All } else { Visibility::Published };
    let n = limit.unwrap_or(usize::MAX);

    if json {
        let items: Vec<_> = catalog
            .top(n, visibility)
            .into_iter()
            .map(Document::summary_data)
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for doc in catalog.top(n, visibility) {
        let date = doc
            .sort_date()
            .map(|d| d.to_string())
            .unwrap_or_default();
        let marker = if doc.is_published() { " " } else { "*" };
        println!("{date} {marker} {:<30} {}", doc.id(), doc.title());
    }
    Ok(())
}

fn show_document(catalog: &Catalog, id: &str) -> Result<()> {
    let doc = catalog.get(id)?;
    println!("{}", doc.render()?);
    Ok(())
}

fn check_catalog(summary: &LoadSummary) -> Result<()> {
    log!("check"; "{} documents loaded, {} skipped", summary.loaded, summary.skipped.len());
    if !summary.skipped.is_empty() {
        for (path, err) in &summary.skipped {
            log!("error"; "`{}`: {err}", path.display());
        }
        bail!("{} files failed to parse", summary.skipped.len());
    }
    Ok(())
}

//! Subcommand implementations.

use crate::cli::{CheckArgs, ExportArgs, ImportArgs, WebBuildArgs};
use crate::error::{ErrorKind, Result};
use dreimeta_catalog::models::{Catalog, CollectionType};
use dreimeta_catalog::{Encoder, KeyStyle};
use dreimeta_config::Config;
use dreimeta_store::{Database, Repository};
use dreimeta_web::{PageBuilder, SiteContext};
use exn::ResultExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const STDOUT: &str = "-";

#[instrument(skip_all)]
pub async fn export(config: &Config, args: ExportArgs) -> Result<()> {
    let catalog = load_catalog(&existing_file(args.db.as_deref().unwrap_or(config.database.as_path()))?).await?;
    let style = if args.plain_keys { KeyStyle::Plain } else { config.output.key_style };
    let mut text = Encoder::new()
        .key_style(style)
        .pretty(config.output.pretty && !args.compact)
        .encode(&catalog)
        .or_raise(|| ErrorKind::Catalog)?;
    text.push('\n');
    if args.output.as_os_str() == STDOUT {
        std::io::stdout().write_all(text.as_bytes()).or_raise(|| ErrorKind::WriteFailed(args.output.clone()))?;
    } else {
        write_file(&args.output, &text)?;
        info!(path = %args.output.display(), episodes = catalog.len(), "exported catalog");
    }
    Ok(())
}

#[instrument(skip_all, fields(json = %args.json.display(), dry_run = args.dry_run))]
pub async fn import(config: &Config, args: ImportArgs) -> Result<()> {
    let catalog = read_catalog(&args.json)?;
    let path = args.db.as_deref().unwrap_or(config.database.as_path());
    let db = Database::connect(path).await.or_raise(|| ErrorKind::Store)?;
    let repo = Repository::new(db.pool().clone(), args.dry_run);
    let stored = match repo.save(&catalog).await {
        Ok(()) => repo.counts().await,
        Err(err) => Err(err),
    };
    db.close().await;
    for (collection, episodes) in stored.or_raise(|| ErrorKind::Store)? {
        info!(%collection, episodes, "stored collection");
    }
    info!(db = %path.display(), episodes = catalog.len(), "imported catalog");
    Ok(())
}

#[instrument(skip_all, fields(json = %args.json.display()))]
pub fn check(args: CheckArgs) -> Result<()> {
    let catalog = read_catalog(&args.json)?;
    let mut stdout = std::io::stdout();
    for line in summary(&catalog) {
        writeln!(stdout, "{line}").or_raise(|| ErrorKind::WriteFailed(PathBuf::from(STDOUT)))?;
    }
    Ok(())
}

/// One line per collection, including empty ones.
fn summary(catalog: &Catalog) -> Vec<String> {
    catalog
        .collections()
        .map(|(collection, episodes)| {
            let parts: usize = episodes.iter().map(|e| e.parts().len()).sum();
            format!("{}: {} episodes, {} parts", collection.key(), episodes.len(), parts)
        })
        .collect()
}

#[instrument(skip_all, fields(collection = ?args.collection))]
pub async fn webbuild(config: &Config, args: WebBuildArgs) -> Result<()> {
    let site = SiteContext::new(args.web_data_url.as_deref().unwrap_or(config.web_data_url.as_str()))
        .or_raise(|| ErrorKind::Render)?;
    let catalog = load_catalog(&existing_file(args.db.as_deref().unwrap_or(config.database.as_path()))?).await?;
    for collection in args.collection.collections() {
        let template = page_path(args.template.as_deref(), &config.templates_dir, collection)?;
        let output = page_path(args.output.as_deref(), &config.web_dir, collection)?;
        let builder: PageBuilder = read_file(&template)?.parse::<PageBuilder>().or_raise(|| ErrorKind::Render)?;
        let page = builder.render(&catalog, collection, &site).or_raise(|| ErrorKind::Render)?;
        write_file(&output, &page)?;
        info!(%collection, template = %template.display(), output = %output.display(), "built page");
    }
    Ok(())
}

/// The explicitly given file, or the collection's page inside `default_dir`.
/// Either way the file has to exist already.
fn page_path(explicit: Option<&Path>, default_dir: &Path, collection: CollectionType) -> Result<PathBuf> {
    let path = explicit.map_or_else(|| default_dir.join(collection.html_file()), Path::to_path_buf);
    existing_file(&path)
}

fn existing_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NoSuchFile(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(existing_file(path)?).or_raise(|| ErrorKind::ReadFailed(path.to_path_buf()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).or_raise(|| ErrorKind::WriteFailed(path.to_path_buf()))
}

fn read_catalog(path: &Path) -> Result<Catalog> {
    dreimeta_catalog::decode(read_file(path)?).or_raise(|| ErrorKind::Catalog)
}

async fn load_catalog(db: &Path) -> Result<Catalog> {
    let db = Database::connect(db).await.or_raise(|| ErrorKind::Store)?;
    let catalog = Repository::from(&db).load().await;
    db.close().await;
    catalog.or_raise(|| ErrorKind::Store)
}

//! Command-line interface for saunamap.
//!
//! Provides commands for submitting and moderating map sites and for
//! browsing and resolving the learning-resource catalog. State lives in the
//! JSON stores under the configured home directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use crate::core::moderation::{self, ContentPatch, ReviewDecision};
use crate::core::resolver::{self, ResolvedAccess, SlideDeckMode};
use crate::domain::{
    Actor, GeoPoint, Language, LocalizedEntry, LocalizedText, MapPoint, ResourceId,
    ResourceKind, Role, SiteCategory, SiteDraft, SiteId,
};
use crate::error::CoreError;
use crate::stores::{
    FileStore, HttpFileStore, RecordStore, ResourceCatalog, SiteQuery, SiteRegistry,
};

/// saunamap - sauna heritage map and learning library
#[derive(Parser, Debug)]
#[command(name = "saunamap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Acting identity (omit for anonymous read-only access)
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Role of the acting identity
    #[arg(long, global = true, value_enum, default_value_t = RoleArg::User)]
    pub role: RoleArg,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new site for review
    Submit {
        /// Horizontal pin position, percent of map canvas
        #[arg(long)]
        x: f64,

        /// Vertical pin position, percent of map canvas
        #[arg(long)]
        y: f64,

        /// Site category
        #[arg(long, value_enum)]
        category: CategoryArg,

        /// Language of the initial content
        #[arg(long, value_enum)]
        lang: LangArg,

        /// Site name in that language
        #[arg(long)]
        name: String,

        /// Description in that language
        #[arg(long)]
        description: String,

        /// Optional usage notes
        #[arg(long)]
        notes: Option<String>,

        /// Raw latitude, display only
        #[arg(long)]
        lat: Option<f64>,

        /// Raw longitude, display only
        #[arg(long)]
        lng: Option<f64>,
    },

    /// Approve or reject a submitted site (admin)
    Review {
        /// Site ID
        site_id: String,

        /// Review decision
        #[arg(long, value_enum)]
        decision: DecisionArg,
    },

    /// Edit a site's localized content (owner or admin)
    Edit {
        /// Site ID
        site_id: String,

        /// Language to update
        #[arg(long, value_enum)]
        lang: LangArg,

        /// New name
        #[arg(long)]
        name: String,

        /// New description
        #[arg(long)]
        description: String,

        /// New usage notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a site (admin, or owner while pending)
    Delete {
        /// Site ID
        site_id: String,
    },

    /// List sites visible to the acting identity
    Sites {
        /// Filter by category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Show one site and count the view
    Show {
        /// Site ID
        site_id: String,
    },

    /// List learning resources
    Resources {
        /// Filter by resource kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Search over titles and tags
        #[arg(long)]
        search: Option<String>,
    },

    /// Resolve a learning resource to its access method
    Resolve {
        /// Resource ID
        resource_id: String,

        /// Download slide-deck files into this directory
        #[arg(long)]
        download_to: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Role for CLI (maps to Role)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Site category for CLI (maps to SiteCategory)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Smoke,
    WoodFired,
    ColdPlunge,
    Other,
}

impl From<CategoryArg> for SiteCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Smoke => SiteCategory::Smoke,
            CategoryArg::WoodFired => SiteCategory::WoodFired,
            CategoryArg::ColdPlunge => SiteCategory::ColdPlunge,
            CategoryArg::Other => SiteCategory::Other,
        }
    }
}

/// Resource kind for CLI (maps to ResourceKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Document,
    SlideDeck,
    Video,
    Interactive,
}

impl From<KindArg> for ResourceKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Document => ResourceKind::Document,
            KindArg::SlideDeck => ResourceKind::SlideDeck,
            KindArg::Video => ResourceKind::Video,
            KindArg::Interactive => ResourceKind::Interactive,
        }
    }
}

/// Language for CLI (maps to Language)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LangArg {
    Est,
    Eng,
    Rus,
}

impl From<LangArg> for Language {
    fn from(l: LangArg) -> Self {
        match l {
            LangArg::Est => Language::Est,
            LangArg::Eng => Language::Eng,
            LangArg::Rus => Language::Rus,
        }
    }
}

/// Review decision for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DecisionArg {
    Approve,
    Reject,
}

impl From<DecisionArg> for ReviewDecision {
    fn from(d: DecisionArg) -> Self {
        match d {
            DecisionArg::Approve => ReviewDecision::Approve,
            DecisionArg::Reject => ReviewDecision::Reject,
        }
    }
}

impl Cli {
    fn acting(&self) -> Option<Actor> {
        self.actor
            .as_ref()
            .map(|id| Actor::new(id.clone(), self.role.into()))
    }

    fn authenticated(&self) -> Result<Actor> {
        self.acting()
            .context("authentication required: pass --actor <id>")
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match &self.command {
            Commands::Submit {
                x,
                y,
                category,
                lang,
                name,
                description,
                notes,
                lat,
                lng,
            } => {
                let actor = self.authenticated()?;
                submit_site(
                    &actor,
                    *x,
                    *y,
                    (*category).into(),
                    (*lang).into(),
                    name,
                    description,
                    notes.as_deref(),
                    lat.zip(*lng),
                )
                .await
            }
            Commands::Review { site_id, decision } => {
                let actor = self.authenticated()?;
                review_site(&actor, site_id, (*decision).into()).await
            }
            Commands::Edit {
                site_id,
                lang,
                name,
                description,
                notes,
            } => {
                let actor = self.authenticated()?;
                edit_site(
                    &actor,
                    site_id,
                    (*lang).into(),
                    name,
                    description,
                    notes.as_deref(),
                )
                .await
            }
            Commands::Delete { site_id } => {
                let actor = self.authenticated()?;
                delete_site(&actor, site_id).await
            }
            Commands::Sites { category } => {
                list_sites(self.acting(), category.map(Into::into)).await
            }
            Commands::Show { site_id } => show_site(self.acting(), site_id).await,
            Commands::Resources { kind, search } => {
                list_resources(kind.map(Into::into), search.as_deref()).await
            }
            Commands::Resolve {
                resource_id,
                download_to,
            } => resolve_resource(resource_id, download_to.as_deref()).await,
            Commands::Config => show_config(),
        }
    }
}

/// File store stub used when no file store is configured; every call reports
/// the missing configuration instead of panicking or silently skipping.
struct NoFileStore;

#[async_trait::async_trait]
impl FileStore for NoFileStore {
    async fn download(&self, path: &str) -> Result<Vec<u8>, CoreError> {
        Err(CoreError::StoreUnavailable(format!(
            "no file store configured for {path}; set SAUNAMAP_FILE_STORE"
        )))
    }

    async fn public_url(&self, path: &str) -> Result<String, CoreError> {
        Err(CoreError::StoreUnavailable(format!(
            "no file store configured for {path}; set SAUNAMAP_FILE_STORE"
        )))
    }
}

fn file_store() -> Result<Box<dyn FileStore>> {
    Ok(match crate::config::file_store_base()? {
        Some(base) => Box::new(HttpFileStore::new(base)),
        None => Box::new(NoFileStore),
    })
}

#[allow(clippy::too_many_arguments)]
async fn submit_site(
    actor: &Actor,
    x: f64,
    y: f64,
    category: SiteCategory,
    lang: Language,
    name: &str,
    description: &str,
    notes: Option<&str>,
    geo: Option<(f64, f64)>,
) -> Result<()> {
    let point = MapPoint::new(x, y)?;

    let mut entry = LocalizedEntry::new(name, description);
    if let Some(notes) = notes {
        entry = entry.with_usage_notes(notes);
    }

    let mut draft = SiteDraft::new(point, category)
        .with_localized(LocalizedText::new().with(lang, entry));
    if let Some((lat, lng)) = geo {
        draft = draft.with_geo(GeoPoint { lat, lng });
    }

    let record = moderation::submit(actor, draft);
    let id = record.id.clone();

    let registry = SiteRegistry::open_default().await?;
    registry.insert(record).await?;

    println!("{id}");
    eprintln!("[site {id} submitted, awaiting review]");
    Ok(())
}

async fn review_site(actor: &Actor, site_id: &str, decision: ReviewDecision) -> Result<()> {
    let id = SiteId::new(site_id);
    let registry = SiteRegistry::open_default().await?;

    let mut record = registry.get(&id).await?;
    let previous = moderation::review(actor, &mut record, decision)?;
    let current = record.status;
    registry.update(&id, record).await?;

    eprintln!("[site {id}: {previous} -> {current}]");
    Ok(())
}

async fn edit_site(
    actor: &Actor,
    site_id: &str,
    lang: Language,
    name: &str,
    description: &str,
    notes: Option<&str>,
) -> Result<()> {
    let id = SiteId::new(site_id);
    let registry = SiteRegistry::open_default().await?;

    let mut record = registry.get(&id).await?;

    let mut entry = LocalizedEntry::new(name, description);
    if let Some(notes) = notes {
        entry = entry.with_usage_notes(notes);
    }
    moderation::edit(actor, &mut record, ContentPatch::new().set(lang, entry))?;

    registry.update(&id, record).await?;
    eprintln!("[site {id} updated]");
    Ok(())
}

async fn delete_site(actor: &Actor, site_id: &str) -> Result<()> {
    let id = SiteId::new(site_id);
    let registry = SiteRegistry::open_default().await?;

    let record = registry.get(&id).await?;
    moderation::authorize_delete(actor, &record)?;

    registry.delete(&id).await?;
    eprintln!("[site {id} deleted]");
    Ok(())
}

async fn list_sites(actor: Option<Actor>, category: Option<SiteCategory>) -> Result<()> {
    let registry = SiteRegistry::open_default().await?;

    let mut query = match actor.clone() {
        Some(actor) => SiteQuery::for_actor(actor),
        None => SiteQuery::anonymous(),
    };
    if let Some(category) = category {
        query = query.with_category(category);
    }

    // Store failures degrade to an empty listing plus a reported error
    let records = match registry.list(&query).await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "site listing failed");
            eprintln!("[no sites available: {e}]");
            return Ok(());
        }
    };

    // The store already filtered; apply the predicate once more at the edge
    let visible = crate::core::filter::visible_sites(&records, actor.as_ref());

    if visible.is_empty() {
        eprintln!("[no sites]");
        return Ok(());
    }

    for record in visible {
        let name = record
            .display_name(Language::Eng)
            .or_else(|| record.display_name(Language::Est))
            .unwrap_or("(unnamed)");
        println!(
            "{}  {:<12} {:<16} views:{:<5} {}",
            record.id, record.category, record.status, record.view_count, name
        );
    }
    Ok(())
}

async fn show_site(actor: Option<Actor>, site_id: &str) -> Result<()> {
    let id = SiteId::new(site_id);
    let registry = SiteRegistry::open_default().await?;

    let record = registry.get(&id).await?;
    if !moderation::visible(actor.as_ref(), &record) {
        // Do not reveal that a hidden record exists
        return Err(CoreError::NotFound(id.to_string()).into());
    }

    let views = registry.record_view(&id).await?;

    println!("id:        {}", record.id);
    println!("category:  {}", record.category);
    println!("status:    {}", record.status);
    println!("position:  {:.1}%, {:.1}%", record.point.x(), record.point.y());
    if let Some(geo) = record.geo {
        println!("geo:       {:.5}, {:.5}", geo.lat, geo.lng);
    }
    println!("views:     {views}");
    for (lang, entry) in record.localized.iter() {
        println!("[{lang}] {}", entry.name);
        println!("    {}", entry.description);
        if let Some(notes) = &entry.usage_notes {
            println!("    notes: {notes}");
        }
    }
    Ok(())
}

async fn list_resources(kind: Option<ResourceKind>, search: Option<&str>) -> Result<()> {
    let catalog = ResourceCatalog::load_default().await?;

    let items: Vec<_> = match (search, kind) {
        (Some(query), _) => catalog.search(query),
        (None, Some(kind)) => catalog.filter_by_kind(kind),
        (None, None) => catalog.list(None),
    };

    if items.is_empty() {
        eprintln!("[no resources]");
        return Ok(());
    }

    for item in items {
        println!(
            "{}  {:<12} {}  [{}]",
            item.id,
            item.kind,
            item.title,
            item.tags.join(", ")
        );
    }
    Ok(())
}

async fn resolve_resource(resource_id: &str, download_to: Option<&std::path::Path>) -> Result<()> {
    let catalog = ResourceCatalog::load_default().await?;
    let id = ResourceId::new(resource_id);

    let resource = catalog
        .get(&id)
        .ok_or_else(|| CoreError::NotFound(resource_id.to_string()))?;

    let files = file_store()?;
    let access = match resolver::resolve(resource, files.as_ref()).await {
        Ok(access) => access,
        Err(CoreError::UnresolvableLocator(detail)) => {
            // Fall back to the external-link affordance instead of embedding
            eprintln!("[cannot embed: {detail}]");
            match resource.locator.url() {
                Some(url) => {
                    println!("open externally: {url}");
                    return Ok(());
                }
                None => anyhow::bail!("resource {id} has no external URL to fall back to"),
            }
        }
        Err(e) => return Err(e.into()),
    };

    match access {
        ResolvedAccess::Embed { url } => println!("embed: {url}"),
        ResolvedAccess::InlineViewer { url } => println!("inline viewer: {url}"),
        ResolvedAccess::ExternalAction { url } => println!("open externally: {url}"),
        ResolvedAccess::DownloadOrExternal { mode } => match mode {
            SlideDeckMode::OpenExternal { url } => println!("open externally: {url}"),
            SlideDeckMode::Download { file } => {
                let dest = match download_to {
                    Some(dest) => dest.to_path_buf(),
                    None => crate::config::downloads_dir()?,
                };
                tokio::fs::create_dir_all(&dest).await?;

                let path = resolver::download_to_dir(files.as_ref(), &file, &dest).await?;
                println!("downloaded: {}", path.display());
            }
        },
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let config = crate::config::config()?;

    println!("home:        {}", config.home.display());
    println!("registry:    {}", config.registry_path().display());
    println!("catalog:     {}", config.catalog_path().display());
    println!("downloads:   {}", config.downloads.display());
    println!(
        "file store:  {}",
        config.file_store_base.as_deref().unwrap_or("(none)")
    );
    match &config.config_file {
        Some(path) => println!("config file: {}", path.display()),
        None => println!("config file: (none)"),
    }
    Ok(())
}

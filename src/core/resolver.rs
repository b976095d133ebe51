//! Type-dispatched resolution of learning resources into access methods.
//!
//! Resolution is a pure computation over the entry plus at most one file-store
//! call; it never mutates the entry. Each resource kind carries its own
//! policy:
//!
//! - videos embed through a canonical player URL,
//! - documents open in an inline viewer,
//! - interactive exercises always open in a new top-level context,
//! - slide decks download from storage when a stored file exists.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tokio::fs;
use tracing::warn;

use crate::domain::resource::{LearningResource, Locator, ResourceKind};
use crate::error::CoreError;
use crate::stores::FileStore;

/// Fragment appended to file-store document URLs so the embedded viewer
/// suppresses its outer chrome
const VIEWER_CHROME_HINT: &str = "#toolbar=0";

/// How the UI should present a resolved resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAccess {
    /// Render inside an embedded player
    Embed { url: String },

    /// Render inside an inline document viewer
    InlineViewer { url: String },

    /// Open in a new top-level context, never embedded
    ExternalAction { url: String },

    /// Slide decks either download from storage or open externally
    DownloadOrExternal { mode: SlideDeckMode },
}

/// Access mode for a slide deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideDeckMode {
    /// Fetch the stored file through the download procedure
    Download { file: String },

    /// No stored file; open the external URL
    OpenExternal { url: String },
}

static VIDEO_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

/// One pattern covering the common URL shapes: bare id, share link, embed
/// link, shorts link, and the watch?v= query form.
fn video_id_pattern() -> &'static Regex {
    VIDEO_ID_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:youtu\.be/|youtube\.com/(?:embed/|shorts/|live/|v/|watch\?(?:[^#]*&)?v=)|^)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
        )
        .expect("video id pattern is valid")
    })
}

/// Extract the 11-character video identifier from a locator URL
pub fn extract_video_id(locator: &str) -> Option<&str> {
    video_id_pattern()
        .captures(locator)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Compute the access method for a resource.
pub async fn resolve(
    resource: &LearningResource,
    files: &dyn FileStore,
) -> Result<ResolvedAccess, CoreError> {
    match resource.kind {
        ResourceKind::Video => {
            let url = resource.locator.url().ok_or_else(|| {
                CoreError::UnresolvableLocator(format!(
                    "video {} has no URL to derive a player from",
                    resource.id
                ))
            })?;

            match extract_video_id(url) {
                Some(id) => Ok(ResolvedAccess::Embed {
                    url: format!("https://www.youtube.com/embed/{id}"),
                }),
                None => {
                    warn!(resource = %resource.id, url, "no video id in locator");
                    Err(CoreError::UnresolvableLocator(url.to_string()))
                }
            }
        }

        ResourceKind::Document => match &resource.locator {
            Locator::Url(url) | Locator::UrlAndFile { url, .. } => {
                Ok(ResolvedAccess::InlineViewer { url: url.clone() })
            }
            Locator::File(file) => {
                let url = files.public_url(file).await?;
                Ok(ResolvedAccess::InlineViewer {
                    url: format!("{url}{VIEWER_CHROME_HINT}"),
                })
            }
        },

        ResourceKind::Interactive => match &resource.locator {
            Locator::Url(url) | Locator::UrlAndFile { url, .. } => {
                Ok(ResolvedAccess::ExternalAction { url: url.clone() })
            }
            Locator::File(file) => {
                let url = files.public_url(file).await?;
                Ok(ResolvedAccess::ExternalAction { url })
            }
        },

        ResourceKind::SlideDeck => match &resource.locator {
            Locator::File(file) | Locator::UrlAndFile { file, .. } => {
                Ok(ResolvedAccess::DownloadOrExternal {
                    mode: SlideDeckMode::Download { file: file.clone() },
                })
            }
            Locator::Url(url) => Ok(ResolvedAccess::DownloadOrExternal {
                mode: SlideDeckMode::OpenExternal { url: url.clone() },
            }),
        },
    }
}

/// Fetch a stored file and place it in `dest_dir`.
///
/// Bytes land in a transient `.part` file first and are renamed into place;
/// the `.part` file is removed on any failure so no half-written artifact
/// survives. Fetch failures surface as `StoreUnavailable`.
pub async fn download_to_dir(
    files: &dyn FileStore,
    file: &str,
    dest_dir: &Path,
) -> Result<PathBuf, CoreError> {
    let bytes = files.download(file).await?;

    let name = file.rsplit('/').next().unwrap_or(file);
    let target = dest_dir.join(name);
    let part = dest_dir.join(format!(".{name}.part"));

    if let Err(e) = fs::write(&part, &bytes).await {
        let _ = fs::remove_file(&part).await;
        return Err(CoreError::StoreUnavailable(format!(
            "writing {}: {e}",
            part.display()
        )));
    }

    if let Err(e) = fs::rename(&part, &target).await {
        let _ = fs::remove_file(&part).await;
        return Err(CoreError::StoreUnavailable(format!(
            "placing {}: {e}",
            target.display()
        )));
    }

    Ok(target)
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer, ser::SerializeMap};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::{
    categories::CategoryCatalog,
    suggest::{SearchLimits, SuggestedPlaylist, suggest_playlists},
    youtube::CatalogSearch,
};

/// Suggestions for every category, serialized as a JSON object keyed by category name
///
/// Keys keep insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryExport {
    entries: Vec<(String, Vec<SuggestedPlaylist>)>,
}

impl CategoryExport {
    pub fn push(&mut self, category: &str, playlists: Vec<SuggestedPlaylist>) {
        self.entries.push((category.to_string(), playlists));
    }

    #[cfg(test)]
    pub(crate) fn get(&self, category: &str) -> Option<&[SuggestedPlaylist]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, playlists)| playlists.as_slice())
    }

    #[must_use]
    pub fn total_playlists(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.len()).sum()
    }
}

impl Serialize for CategoryExport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, playlists) in &self.entries {
            map.serialize_entry(category, playlists)?;
        }
        map.end()
    }
}

#[must_use]
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("playlists_{}.json", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Runs the playlist lookup for every category in catalog order
///
/// # Errors
/// Errors when any search fails or when cancelled
pub async fn collect_all(
    search: &dyn CatalogSearch,
    catalog: &CategoryCatalog,
    limits: SearchLimits,
    ct: &CancellationToken,
) -> Result<CategoryExport> {
    let pb = indicatif::ProgressBar::new(catalog.len() as u64);
    pb.set_style(
        indicatif::ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} {msg}")
            .context("Building progress bar style")?,
    );

    let mut export = CategoryExport::default();
    for category in catalog.iter() {
        pb.set_message(category.name);
        info!("Updating category {}", category.name);

        let playlists = select! {
            biased;
            () = ct.cancelled() => {
                pb.abandon();
                bail!("Update cancelled while processing {}", category.name);
            }
            p = suggest_playlists(search, category.seed_channels, limits) => p
                .with_context(|| format!("Suggesting playlists for {}", category.name))?,
        };

        export.push(category.name, playlists);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(export)
}

/// Writes the export as pretty-printed JSON into `output_dir`, returning the file path
///
/// # Errors
/// Errors when the directory cannot be created or the file cannot be written
pub async fn write_export(
    export: &CategoryExport,
    output_dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Creating output directory {output_dir:?}"))?;

    let path = output_dir.join(export_file_name(now));
    let body = serde_json::to_vec_pretty(export).context("Serializing playlist export")?;
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Writing {path:?}"))?;

    Ok(path)
}

/// Refreshes suggestions for every category and persists them to a timestamped file
///
/// # Errors
/// See [`collect_all`] and [`write_export`]. Nothing is written when collection fails.
#[instrument(skip(search, catalog, limits, ct))]
pub async fn update_all(
    search: &dyn CatalogSearch,
    catalog: &CategoryCatalog,
    limits: SearchLimits,
    output_dir: &Path,
    ct: &CancellationToken,
) -> Result<PathBuf> {
    let export = collect_all(search, catalog, limits, ct).await?;
    let path = write_export(&export, output_dir, Local::now()).await?;

    info!(
        "Playlists updated successfully! {} playlists written to {path:?}",
        export.total_playlists()
    );
    Ok(path)
}

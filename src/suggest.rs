use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::youtube::{CatalogSearch, error::SearchError, structs::PlaylistRecord};

pub const DEFAULT_CHANNEL_LIMIT: usize = 3;
pub const DEFAULT_PLAYLIST_LIMIT: usize = 5;

/// A playlist suggestion as served to clients and written to exports
///
/// Field names are part of the public JSON format consumed by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedPlaylist {
    #[serde(rename = "titulo")]
    pub title: String,
    pub link: String,
    pub thumbnail: Option<String>,
    /// Title of the channel found for the seed name, not the seed name itself
    #[serde(rename = "canal")]
    pub channel: String,
}

impl SuggestedPlaylist {
    fn new(playlist: PlaylistRecord, channel: &str) -> Self {
        Self {
            title: playlist.title,
            link: playlist.link,
            thumbnail: playlist.thumbnail,
            channel: channel.to_string(),
        }
    }
}

/// How many results are read from each search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub channels: usize,
    pub playlists: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNEL_LIMIT,
            playlists: DEFAULT_PLAYLIST_LIMIT,
        }
    }
}

/// Resolves seed channel names into a flat, link-deduplicated list of playlists
///
/// Each seed name is searched as a channel, then every channel found is searched (by its title)
/// for playlists. Results keep discovery order and the first occurrence of a link wins.
///
/// # Errors
/// Any failed search aborts the whole lookup
#[instrument(skip(search, limits))]
pub async fn suggest_playlists(
    search: &dyn CatalogSearch,
    seed_channels: &[&str],
    limits: SearchLimits,
) -> Result<Vec<SuggestedPlaylist>, SearchError> {
    let mut suggestions = Vec::new();
    let mut seen_links = HashSet::new();

    for seed in seed_channels {
        let channels = search.search_channels(seed, limits.channels).await?;
        debug!("Seed {seed:?} matched {} channels", channels.len());

        for channel in channels {
            let playlists = search
                .search_playlists(&channel.title, limits.playlists)
                .await?;

            for playlist in playlists {
                if seen_links.insert(playlist.link.clone()) {
                    suggestions.push(SuggestedPlaylist::new(playlist, &channel.title));
                } else {
                    debug!("Skipping duplicate playlist {}", playlist.link);
                }
            }
        }
    }

    info!("Found {} playlists", suggestions.len());
    Ok(suggestions)
}

use serde::Serialize;

/// A channel as it appears in a search result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub thumbnail: Option<String>,
    /// Free-form text, e.g. `1.2M subscribers` or the channel handle
    pub subscribers: Option<String>,
    pub description: Option<String>,
}

/// A playlist as it appears in a search result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub thumbnail: Option<String>,
    /// Name of the channel owning the playlist, when YouTube shows it
    pub channel: Option<String>,
    pub video_count: Option<u32>,
}

/// Which kind of result a search is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    Channels,
    Playlists,
}

impl SearchFilter {
    /// The protobuf-encoded `params` value the web client sends when picking a result type filter
    #[must_use]
    pub const fn params(self) -> &'static str {
        match self {
            Self::Channels => "EgIQAg==",
            Self::Playlists => "EgIQAw==",
        }
    }
}

#[must_use]
pub fn channel_link(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{channel_id}")
}

#[must_use]
pub fn playlist_link(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={playlist_id}")
}

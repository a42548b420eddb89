use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::structs::{ChannelRecord, PlaylistRecord, channel_link, playlist_link};

static COUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,.\u{a0}\u{202f}]*").unwrap());

const PLAYLIST_LOCKUP_TYPE: &str = "LOCKUP_CONTENT_TYPE_PLAYLIST";

/// Flattens the item sections of a search result page
///
/// Returns `None` when the page does not look like a search result page at all
pub fn result_items(page: &Value) -> Option<Vec<&Value>> {
    let sections = page
        .pointer("/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents")?
        .as_array()?;

    Some(
        sections
            .iter()
            .filter_map(|s| s.pointer("/itemSectionRenderer/contents")?.as_array())
            .flatten()
            .collect(),
    )
}

/// Extracts up to `limit` channels out of a search result page, skipping anything else
pub fn parse_channels(page: &Value, limit: usize) -> Option<Vec<ChannelRecord>> {
    let channels = result_items(page)?
        .into_iter()
        .filter_map(|item| item.get("channelRenderer"))
        .filter_map(|renderer| {
            let channel = parse_channel_renderer(renderer);
            if channel.is_none() {
                debug!("Skipping malformed channel result");
            }
            channel
        })
        .take(limit)
        .collect();

    Some(channels)
}

/// Extracts up to `limit` playlists out of a search result page, skipping anything else
///
/// Understands both the classic `playlistRenderer` and the newer `lockupViewModel` layouts
pub fn parse_playlists(page: &Value, limit: usize) -> Option<Vec<PlaylistRecord>> {
    let playlists = result_items(page)?
        .into_iter()
        .filter_map(|item| {
            if let Some(renderer) = item.get("playlistRenderer") {
                return Some(parse_playlist_renderer(renderer));
            }
            item.get("lockupViewModel")
                .filter(|lockup| lockup["contentType"] == PLAYLIST_LOCKUP_TYPE)
                .map(parse_playlist_lockup)
        })
        .filter_map(|playlist| {
            if playlist.is_none() {
                debug!("Skipping malformed playlist result");
            }
            playlist
        })
        .take(limit)
        .collect();

    Some(playlists)
}

fn parse_channel_renderer(renderer: &Value) -> Option<ChannelRecord> {
    let id = renderer["channelId"].as_str()?.to_owned();
    let title = text(&renderer["title"])?;

    Some(ChannelRecord {
        link: channel_link(&id),
        id,
        title,
        thumbnail: first_thumbnail(&renderer["thumbnail"]["thumbnails"]),
        subscribers: text(&renderer["subscriberCountText"]),
        description: text(&renderer["descriptionSnippet"]),
    })
}

fn parse_playlist_renderer(renderer: &Value) -> Option<PlaylistRecord> {
    let id = renderer["playlistId"].as_str()?.to_owned();
    let title = text(&renderer["title"])?;

    Some(PlaylistRecord {
        link: playlist_link(&id),
        id,
        title,
        thumbnail: first_thumbnail(&renderer["thumbnails"][0]["thumbnails"])
            .or_else(|| first_thumbnail(&renderer["thumbnail"]["thumbnails"])),
        channel: text(&renderer["shortBylineText"])
            .or_else(|| text(&renderer["longBylineText"])),
        video_count: renderer["videoCount"].as_str().and_then(parse_count),
    })
}

fn parse_playlist_lockup(lockup: &Value) -> Option<PlaylistRecord> {
    let id = lockup["contentId"].as_str()?.to_owned();
    let metadata = &lockup["metadata"]["lockupMetadataViewModel"];
    let title = text(&metadata["title"])?;

    let primary =
        lockup.pointer("/contentImage/collectionThumbnailViewModel/primaryThumbnail/thumbnailViewModel");
    let thumbnail = primary
        .and_then(|p| p.pointer("/image/sources/0/url"))
        .and_then(Value::as_str)
        .map(absolute_url);
    let video_count = primary
        .and_then(|p| p["overlays"].as_array())
        .and_then(|overlays| {
            overlays.iter().find_map(|o| {
                o.pointer("/thumbnailOverlayBadgeViewModel/thumbnailBadges/0/thumbnailBadgeViewModel/text")?
                    .as_str()
            })
        })
        .and_then(parse_count);

    Some(PlaylistRecord {
        link: playlist_link(&id),
        id,
        title,
        thumbnail,
        channel: metadata
            .pointer("/metadata/contentMetadataViewModel/metadataRows/0/metadataParts/0/text/content")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        video_count,
    })
}

/// Reads a YouTube text object, either `{simpleText}`, `{content}` or `{runs: [{text}]}`
fn text(value: &Value) -> Option<String> {
    if let Some(s) = value["simpleText"].as_str().or_else(|| value["content"].as_str()) {
        return Some(s.to_owned());
    }

    let joined = value["runs"]
        .as_array()?
        .iter()
        .filter_map(|run| run["text"].as_str())
        .collect::<String>();
    (!joined.is_empty()).then_some(joined)
}

fn first_thumbnail(thumbnails: &Value) -> Option<String> {
    thumbnails
        .as_array()?
        .first()?
        .get("url")?
        .as_str()
        .map(absolute_url)
}

/// YouTube sometimes hands out protocol-relative URLs (`//i.ytimg.com/...`)
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_owned()
    }
}

/// Parses counts such as `12`, `1,234 videos` or `1.234 vídeos`
fn parse_count(input: &str) -> Option<u32> {
    let digits = COUNT_REGEX
        .find(input)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn page(items: Vec<Value>) -> Value {
        json!({
            "contents": {
                "twoColumnSearchResultsRenderer": {
                    "primaryContents": {
                        "sectionListRenderer": {
                            "contents": [
                                { "itemSectionRenderer": { "contents": items } },
                                { "continuationItemRenderer": { "trigger": "CONTINUATION_TRIGGER_ON_ITEM_SHOWN" } }
                            ]
                        }
                    }
                }
            }
        })
    }

    fn channel_item(id: &str, title: &str) -> Value {
        json!({
            "channelRenderer": {
                "channelId": id,
                "title": { "simpleText": title },
                "thumbnail": { "thumbnails": [{ "url": "//yt3.ggpht.com/avatar=s88", "width": 88 }] },
                "subscriberCountText": { "simpleText": "@canal" },
                "descriptionSnippet": { "runs": [{ "text": "Vídeos sobre " }, { "text": "IA" }] }
            }
        })
    }

    #[test]
    fn parses_channel_renderers() {
        let page = page(vec![
            json!({ "shelfRenderer": {} }),
            channel_item("UC1", "Canal AI"),
            channel_item("UC2", "Canal AI Brasil"),
        ]);

        let channels = parse_channels(&page, 3).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(
            channels[0],
            ChannelRecord {
                id: "UC1".into(),
                title: "Canal AI".into(),
                link: "https://www.youtube.com/channel/UC1".into(),
                thumbnail: Some("https://yt3.ggpht.com/avatar=s88".into()),
                subscribers: Some("@canal".into()),
                description: Some("Vídeos sobre IA".into()),
            }
        );
    }

    #[test]
    fn channel_limit_is_applied_after_filtering() {
        let page = page(vec![
            json!({ "videoRenderer": { "videoId": "v" } }),
            channel_item("UC1", "A"),
            json!({ "channelRenderer": { "title": { "simpleText": "missing id" } } }),
            channel_item("UC2", "B"),
            channel_item("UC3", "C"),
        ]);

        let ids = parse_channels(&page, 2)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["UC1", "UC2"]);
    }

    #[test]
    fn parses_playlist_renderer() {
        let page = page(vec![json!({
            "playlistRenderer": {
                "playlistId": "PLabc",
                "title": { "simpleText": "Curso de IA" },
                "thumbnails": [{ "thumbnails": [
                    { "url": "https://i.ytimg.com/vi/x/hqdefault.jpg" },
                    { "url": "https://i.ytimg.com/vi/x/maxres.jpg" }
                ] }],
                "videoCount": "42",
                "shortBylineText": { "runs": [{ "text": "Canal AI" }] }
            }
        })]);

        let playlists = parse_playlists(&page, 5).unwrap();
        assert_eq!(
            playlists,
            vec![PlaylistRecord {
                id: "PLabc".into(),
                title: "Curso de IA".into(),
                link: "https://www.youtube.com/playlist?list=PLabc".into(),
                thumbnail: Some("https://i.ytimg.com/vi/x/hqdefault.jpg".into()),
                channel: Some("Canal AI".into()),
                video_count: Some(42),
            }]
        );
    }

    #[test]
    fn parses_playlist_lockup_view_model() {
        let page = page(vec![
            json!({
                "lockupViewModel": {
                    "contentType": "LOCKUP_CONTENT_TYPE_VIDEO",
                    "contentId": "not-a-playlist"
                }
            }),
            json!({
                "lockupViewModel": {
                    "contentType": "LOCKUP_CONTENT_TYPE_PLAYLIST",
                    "contentId": "PLxyz",
                    "contentImage": { "collectionThumbnailViewModel": { "primaryThumbnail": { "thumbnailViewModel": {
                        "image": { "sources": [{ "url": "https://i.ytimg.com/vi/y/hqdefault.jpg" }] },
                        "overlays": [
                            { "thumbnailOverlayBadgeViewModel": { "thumbnailBadges": [
                                { "thumbnailBadgeViewModel": { "text": "1.234 vídeos" } }
                            ] } }
                        ]
                    } } } },
                    "metadata": { "lockupMetadataViewModel": {
                        "title": { "content": "Growth na prática" },
                        "metadata": { "contentMetadataViewModel": { "metadataRows": [
                            { "metadataParts": [{ "text": { "content": "Growth Hacker" } }] }
                        ] } }
                    } }
                }
            }),
        ]);

        let playlists = parse_playlists(&page, 5).unwrap();
        assert_eq!(playlists.len(), 1);
        let playlist = &playlists[0];
        assert_eq!(playlist.id, "PLxyz");
        assert_eq!(playlist.title, "Growth na prática");
        assert_eq!(playlist.link, "https://www.youtube.com/playlist?list=PLxyz");
        assert_eq!(
            playlist.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/y/hqdefault.jpg")
        );
        assert_eq!(playlist.channel.as_deref(), Some("Growth Hacker"));
        assert_eq!(playlist.video_count, Some(1234));
    }

    #[test]
    fn playlist_without_thumbnail_is_kept() {
        let page = page(vec![json!({
            "playlistRenderer": {
                "playlistId": "PLnothumb",
                "title": { "runs": [{ "text": "Sem capa" }] }
            }
        })]);

        let playlists = parse_playlists(&page, 5).unwrap();
        assert_eq!(playlists[0].thumbnail, None);
        assert_eq!(playlists[0].video_count, None);
    }

    #[test]
    fn empty_results_page_yields_no_items() {
        let page = page(vec![json!({ "backgroundPromoRenderer": { "title": { "simpleText": "No results found" } } })]);
        assert_eq!(parse_channels(&page, 3), Some(vec![]));
        assert_eq!(parse_playlists(&page, 5), Some(vec![]));
    }

    #[test]
    fn unrecognised_page_is_rejected() {
        assert!(result_items(&json!({ "error": { "code": 400 } })).is_none());
        assert!(parse_playlists(&json!({}), 5).is_none());
    }

    #[test]
    fn counts_with_separators() {
        assert_eq!(parse_count("7"), Some(7));
        assert_eq!(parse_count("1,234 videos"), Some(1234));
        assert_eq!(parse_count("no videos"), None);
    }
}

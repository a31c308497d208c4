//! Turns the raw `video_url`/`link` of a gallery item into something playable.
//!
//! Classification is a fixed, ordered rule table; the first rule whose
//! predicate accepts the source builds the result.

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})",
    )
    .expect("valid youtube pattern")
});

static VIMEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vimeo\.com/(?:video/|channels/[^/?#\s]+/)?(\d+)").expect("valid vimeo pattern")
});

const DIRECT_FILE_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    YouTube,
    Vimeo,
    DirectFile,
    Generic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRef {
    pub video_url: Option<String>,
    pub link: Option<String>,
}

impl MediaRef {
    /// `video_url` wins over `link`; empty strings count as absent.
    pub fn source(&self) -> Option<&str> {
        [self.video_url.as_deref(), self.link.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEmbed {
    pub provider: Provider,
    pub embed_url: String,
    pub thumbnail_url: Option<String>,
}

struct Rule {
    provider: Provider,
    matches: fn(&str) -> bool,
    build: fn(&str) -> (String, Option<String>),
}

const RULES: &[Rule] = &[
    Rule {
        provider: Provider::YouTube,
        matches: is_youtube,
        build: youtube_embed,
    },
    Rule {
        provider: Provider::Vimeo,
        matches: is_vimeo,
        build: vimeo_embed,
    },
    Rule {
        provider: Provider::DirectFile,
        matches: is_direct_file,
        build: passthrough,
    },
    Rule {
        provider: Provider::Generic,
        matches: any_url,
        build: passthrough,
    },
];

/// Returns `None` when the reference has neither a `video_url` nor a `link`.
pub fn normalize(media: &MediaRef) -> Option<MediaEmbed> {
    let source = media.source()?;
    RULES.iter().find(|rule| (rule.matches)(source)).map(|rule| {
        let (embed_url, thumbnail_url) = (rule.build)(source);
        MediaEmbed {
            provider: rule.provider,
            embed_url,
            thumbnail_url,
        }
    })
}

fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

fn is_vimeo(url: &str) -> bool {
    url.contains("vimeo.com")
}

fn is_direct_file(url: &str) -> bool {
    let parsed = Url::parse(url).ok();
    let path = parsed.as_ref().map_or(url, |u| u.path());
    DIRECT_FILE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn any_url(_: &str) -> bool {
    true
}

fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn vimeo_id(url: &str) -> Option<&str> {
    VIMEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// An unextractable id leaves the segment empty; the caller shows a broken embed.
fn youtube_embed(url: &str) -> (String, Option<String>) {
    let id = youtube_id(url).unwrap_or_default();
    (
        format!("https://www.youtube.com/embed/{id}"),
        Some(format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")),
    )
}

fn vimeo_embed(url: &str) -> (String, Option<String>) {
    let id = vimeo_id(url).unwrap_or_default();
    (
        format!("https://player.vimeo.com/video/{id}"),
        Some(format!("https://vumbnail.com/{id}.jpg")),
    )
}

fn passthrough(url: &str) -> (String, Option<String>) {
    (url.to_string(), None)
}

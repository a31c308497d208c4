use crate::i18n::t;
use crate::media::{MediaEmbed, MediaRef, Provider, normalize};
use crate::text::excerpt;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const EXCERPT_GRAPHEMES: usize = 100;
const FLAT_WIDTH: usize = 10_000;

// Records are keyed by whatever the API hands out; ids may be numbers or slugs.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Video {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub link: Option<String>,
    pub file: Option<String>,
}

impl Video {
    pub fn media_ref(&self) -> MediaRef {
        MediaRef {
            video_url: self.video_url.clone(),
            link: self.link.clone(),
        }
    }

    pub fn embed(&self) -> Option<MediaEmbed> {
        normalize(&self.media_ref())
    }

    /// Uploaded files and direct video links play in a local player.
    pub fn plays_inline(&self) -> bool {
        self.file.as_deref().is_some_and(|f| !f.is_empty())
            || self
                .embed()
                .is_some_and(|e| e.provider == Provider::DirectFile)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub caption: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub content: String,
    pub image_url: Option<String>,
    pub author_name: Option<String>,
    pub formatted_date: Option<String>,
    /// Per-language variants such as `title_en` and `content_pt`.
    #[serde(flatten)]
    pub translations: HashMap<String, Value>,
}

impl BlogPost {
    fn translated(&self, field: &str, lang: &str) -> Option<&str> {
        self.translations
            .get(&format!("{field}_{lang}"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn localized_title(&self, lang: &str) -> &str {
        self.translated("title", lang).unwrap_or(&self.title)
    }

    pub fn localized_content(&self, lang: &str) -> &str {
        self.translated("content", lang).unwrap_or(&self.content)
    }

    /// Plain-text rendering of the (HTML) content.
    pub fn body_text(&self, lang: &str, width: usize) -> String {
        let html = self.localized_content(lang);
        html2text::from_read(html.as_bytes(), width).unwrap_or_else(|_| html.to_string())
    }

    pub fn excerpt(&self, lang: &str) -> String {
        let flat = self.body_text(lang, FLAT_WIDTH);
        let flat = flat.split_whitespace().collect::<Vec<_>>().join(" ");
        excerpt(&flat, EXCERPT_GRAPHEMES)
    }

    pub fn byline(&self) -> String {
        format!(
            "{} - {}",
            self.author_name.as_deref().unwrap_or_default(),
            self.formatted_date.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
}

impl Document {
    pub fn display_title(&self) -> String {
        non_empty(&self.title).unwrap_or_else(|| t!("documents.no_title"))
    }

    pub fn display_description(&self) -> String {
        non_empty(&self.description).unwrap_or_else(|| t!("documents.no_description"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sponsor {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl Sponsor {
    pub fn display_name(&self) -> String {
        non_empty(&self.name).unwrap_or_else(|| t!("sponsors.no_name"))
    }

    pub fn display_description(&self) -> String {
        non_empty(&self.description).unwrap_or_else(|| t!("sponsors.no_description"))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

/// One decoded API response.
#[derive(Debug, Clone)]
pub enum Listing {
    Videos(Vec<Video>),
    Photos(Vec<Photo>),
    BlogPosts(Vec<BlogPost>),
    Documents(Vec<Document>),
    Sponsors(Vec<Sponsor>),
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Videos(v) => v.len(),
            Listing::Photos(v) => v.len(),
            Listing::BlogPosts(v) => v.len(),
            Listing::Documents(v) => v.len(),
            Listing::Sponsors(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn id_at(&self, i: usize) -> Option<&str> {
        let id = match self {
            Listing::Videos(v) => &v.get(i)?.id,
            Listing::Photos(v) => &v.get(i)?.id,
            Listing::BlogPosts(v) => &v.get(i)?.id,
            Listing::Documents(v) => &v.get(i)?.id,
            Listing::Sponsors(v) => &v.get(i)?.id,
        };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: &str) -> BlogPost {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn blog_post_prefers_translated_fields() {
        let p = post(
            r#"{"id": 3, "title": "Olá", "content": "<p>Texto</p>",
                "title_en": "Hello", "content_en": "", "author_name": "Ana",
                "formatted_date": "01/02/2024"}"#,
        );
        assert_eq!(p.id, "3");
        assert_eq!(p.localized_title("en"), "Hello");
        assert_eq!(p.localized_title("pt"), "Olá");
        // empty translation falls back to the base content
        assert_eq!(p.localized_content("en"), "<p>Texto</p>");
        assert_eq!(p.byline(), "Ana - 01/02/2024");
    }

    #[test]
    fn null_text_fields_do_not_sink_the_listing() {
        let posts: Vec<BlogPost> = serde_json::from_str(
            r#"[{"id": 1, "title": "ok", "content": "x"},
                {"id": 2, "title": "T", "content": null, "image_url": null},
                {"id": 3, "title": null, "title_pt": null}]"#,
        )
        .unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[1].localized_content("pt"), "");
        assert_eq!(posts[2].localized_title("pt"), "");
        assert_eq!(posts[2].excerpt("pt"), "...");
    }

    #[test]
    fn every_record_kind_keeps_its_id() {
        let videos: Vec<Video> =
            serde_json::from_str(r#"[{"id": 7, "link": "https://vimeo.com/1"}]"#).unwrap();
        let photos: Vec<Photo> = serde_json::from_str(r#"[{"id": "capa"}]"#).unwrap();
        let docs: Vec<Document> = serde_json::from_str(r#"[{"id": null}]"#).unwrap();
        let sponsors: Vec<Sponsor> = serde_json::from_str(r#"[{"name": "x"}]"#).unwrap();

        assert_eq!(Listing::Videos(videos).id_at(0), Some("7"));
        assert_eq!(Listing::Photos(photos).id_at(0), Some("capa"));
        assert_eq!(Listing::Documents(docs).id_at(0), Some(""));
        let sponsors = Listing::Sponsors(sponsors);
        assert_eq!(sponsors.id_at(0), Some(""));
        assert_eq!(sponsors.id_at(1), None);
    }

    #[test]
    fn excerpt_is_plain_text() {
        let long = "a".repeat(150);
        let p = post(&format!(r#"{{"id": "x", "content": "<p>{long}</p>"}}"#));
        let e = p.excerpt("pt");
        assert!(e.ends_with("..."));
        assert_eq!(e.len(), 103);
        assert!(!e.contains('<'));
    }

    #[test]
    fn video_records_feed_the_normalizer() {
        let v: Video =
            serde_json::from_str(r#"{"id": 1, "title": "T", "link": "https://vimeo.com/9"}"#)
                .unwrap();
        let embed = v.embed().unwrap();
        assert_eq!(embed.embed_url, "https://player.vimeo.com/video/9");
        assert!(!v.plays_inline());

        let uploaded: Video = serde_json::from_str(
            r#"{"id": 2, "video_url": "https://cdn.example.org/v/abc", "file": "abc.mp4"}"#,
        )
        .unwrap();
        assert!(uploaded.plays_inline());

        let bare: Video = serde_json::from_str(r#"{"id": 3, "title": "no media"}"#).unwrap();
        assert!(bare.embed().is_none());
        assert!(!bare.plays_inline());
    }

    #[test]
    fn missing_fields_use_placeholders() {
        // the active locale is process-wide, so accept either catalog
        let no_title = [
            t!("documents.no_title", locale = "pt"),
            t!("documents.no_title", locale = "en"),
        ];
        let no_description = [
            t!("sponsors.no_description", locale = "pt"),
            t!("sponsors.no_description", locale = "en"),
        ];

        let d: Document = serde_json::from_str(r#"{"id": 1, "title": ""}"#).unwrap();
        assert!(no_title.contains(&d.display_title()));

        let s: Sponsor =
            serde_json::from_str(r#"{"id": 1, "name": "Padaria", "description": null}"#).unwrap();
        assert_eq!(s.display_name(), "Padaria");
        assert!(no_description.contains(&s.display_description()));
    }
}

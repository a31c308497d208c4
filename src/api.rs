use crate::content::Listing;
use crate::locale::language_prefix;
use crate::routes::Collection;
use crate::types::BgEvent;
use crate::utils::log_msg;
use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, Response};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

const USER_AGENT: &str = concat!("ong-portal/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(10);

pub fn endpoint(base_url: &str, prefix: &str, collection: Collection) -> String {
    format!(
        "{}/{prefix}/api/{}/",
        base_url.trim_end_matches('/'),
        collection.as_str()
    )
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    tx: Sender<BgEvent>,
}

impl ApiClient {
    pub fn new(base_url: String, tx: Sender<BgEvent>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url,
            tx,
        })
    }

    /// Requests the listing for `collection` in the language of `path`.
    pub fn fetch(&self, path: &str, collection: Collection, request_id: u64) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let url = endpoint(&self.base_url, language_prefix(path), collection);

        thread::spawn(move || {
            log_msg("info", &format!("Fetching {url}"));

            let event = match get_listing(&client, &url, collection) {
                Ok(listing) => {
                    log_msg("info", &format!("Loaded {} items from {url}", listing.len()));
                    BgEvent::Loaded {
                        request_id,
                        listing,
                    }
                }
                Err(e) => {
                    log_msg("error", &format!("{url}: {e:#}"));
                    BgEvent::Error {
                        request_id,
                        message: format!("{e:#}"),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }
}

fn get_listing(client: &Client, url: &str, collection: Collection) -> Result<Listing> {
    let resp = client.get(url).send()?;
    if !resp.status().is_success() {
        bail!("HTTP {}", resp.status());
    }
    decode(resp, collection).with_context(|| format!("decoding {}", collection.as_str()))
}

fn decode(resp: Response, collection: Collection) -> Result<Listing> {
    Ok(match collection {
        Collection::Videos => Listing::Videos(resp.json()?),
        Collection::Photos => Listing::Photos(resp.json()?),
        Collection::BlogPosts => Listing::BlogPosts(resp.json()?),
        Collection::Documents => Listing::Documents(resp.json()?),
        Collection::Sponsors => Listing::Sponsors(resp.json()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_collection_endpoints() {
        assert_eq!(
            endpoint("https://api.example.org", "pt", Collection::Videos),
            "https://api.example.org/pt/api/videos/"
        );
        assert_eq!(
            endpoint("https://api.example.org/", "en", Collection::BlogPosts),
            "https://api.example.org/en/api/blogposts/"
        );
    }

    #[test]
    fn endpoint_language_follows_the_path() {
        let url = |path: &str| endpoint("http://localhost:8000", language_prefix(path), Collection::Sponsors);
        assert_eq!(url("/pt/patrocinadores"), "http://localhost:8000/pt/api/sponsors/");
        assert_eq!(url("/patrocinadores"), "http://localhost:8000/en/api/sponsors/");
    }
}

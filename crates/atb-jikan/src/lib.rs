//! Jikan v4 adapter (unofficial MyAnimeList REST API).
//!
//! Implements the `atb-core` CatalogSource port over plain HTTP GETs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use chrono::{Datelike, Local, NaiveDate};
use serde::{de::DeserializeOwned, Deserialize};

use atb_core::{
    catalog::{CatalogError, CatalogRecord, CatalogResult, CatalogSource, Season, TopFilter},
    errors::Error,
    Result,
};

#[derive(Clone, Debug)]
pub struct JikanClient {
    base_url: String,
    http: reqwest::Client,
}

impl JikanClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("atb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<T> {
        tracing::debug!(path, ?query, "jikan request");
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(format!("jikan request error: {e}")))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| CatalogError::Transport(format!("jikan body error: {e}")))?;
        decode_response(status, &body)
    }
}

/// Non-2xx is a transport failure; a 2xx body that does not parse is malformed.
fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> CatalogResult<T> {
    if !status.is_success() {
        let text = String::from_utf8_lossy(body);
        return Err(CatalogError::Transport(format!(
            "jikan returned {status} {}",
            text.chars().take(200).collect::<String>()
        )));
    }
    serde_json::from_slice(body).map_err(|e| CatalogError::Malformed(e.to_string()))
}

#[async_trait]
impl CatalogSource for JikanClient {
    async fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<CatalogRecord>> {
        let params = [("q", query.to_string()), ("limit", limit.to_string())];
        let page: ListPage = self.get_json("/anime", &params).await?;
        Ok(page.into_records(limit))
    }

    async fn random(&self) -> CatalogResult<CatalogRecord> {
        let one: SinglePage = self.get_json("/random/anime", &[]).await?;
        Ok(one.data.into())
    }

    async fn top_list(
        &self,
        filter: TopFilter,
        limit: usize,
    ) -> CatalogResult<Vec<CatalogRecord>> {
        let (path, params) = top_request(filter, limit, Local::now().date_naive());
        let page: ListPage = self.get_json(&path, &params).await?;
        Ok(page.into_records(limit))
    }
}

/// Path and query parameters for a ranked-list request on `today`.
pub fn top_request(
    filter: TopFilter,
    limit: usize,
    today: NaiveDate,
) -> (String, Vec<(&'static str, String)>) {
    let limit = ("limit", limit.to_string());
    match filter {
        TopFilter::All => ("/top/anime".to_string(), vec![limit]),
        TopFilter::ByPopularity => (
            "/top/anime".to_string(),
            vec![("filter", "bypopularity".to_string()), limit],
        ),
        TopFilter::CurrentSeason => {
            let season = Season::from_month(today.month());
            (format!("/seasons/{}/{season}", today.year()), vec![limit])
        }
        TopFilter::CurrentYear => {
            let year = today.year();
            (
                "/anime".to_string(),
                vec![
                    ("start_date", format!("{year}-01-01")),
                    ("end_date", format!("{year}-12-31")),
                    ("order_by", "score".to_string()),
                    ("sort", "desc".to_string()),
                    limit,
                ],
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListPage {
    data: Vec<AnimeData>,
}

impl ListPage {
    fn into_records(self, limit: usize) -> Vec<CatalogRecord> {
        self.data.into_iter().take(limit).map(Into::into).collect()
    }
}

#[derive(Debug, Deserialize)]
struct SinglePage {
    data: AnimeData,
}

#[derive(Debug, Deserialize)]
struct AnimeData {
    #[serde(default)]
    title: String,
    score: Option<f64>,
    synopsis: Option<String>,
    episodes: Option<u32>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    images: Option<Images>,
}

#[derive(Debug, Deserialize)]
struct Genre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Images {
    jpg: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
struct ImageSet {
    large_image_url: Option<String>,
}

impl From<AnimeData> for CatalogRecord {
    fn from(a: AnimeData) -> Self {
        let image_url = a
            .images
            .and_then(|i| i.jpg)
            .and_then(|j| j.large_image_url)
            .filter(|u| !u.trim().is_empty());

        CatalogRecord {
            title: a.title,
            score: a.score.unwrap_or(0.0),
            synopsis: a.synopsis.unwrap_or_default(),
            episode_count: a.episodes,
            status: a.status.unwrap_or_default(),
            genres: a.genres.into_iter().map(|g| g.name).collect(),
            image_url,
        }
    }
}

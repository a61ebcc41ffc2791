//! Paginated database query

use crate::config::NotionConfig;
use crate::decode::{JsonPageDecoder, QueryPage};
use crate::diagnostics::{DiagnosticsSink, NullSink};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{NextPage, PaginationState, QueryPaginator};
use crate::types::{Record, NOTION_VERSION_HEADER};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// A fetch that stopped on an error, with the records gathered before it
#[derive(Debug, thiserror::Error)]
#[error("fetch aborted after {} records: {source}", .records.len())]
pub struct PartialFetch {
    /// Records received before the failure, in server order
    pub records: Vec<Record>,
    /// What stopped the fetch
    #[source]
    pub source: Error,
}

impl PartialFetch {
    /// Drop the partial records and keep the error
    pub fn into_error(self) -> Error {
        self.source
    }
}

impl From<PartialFetch> for Error {
    fn from(partial: PartialFetch) -> Self {
        partial.source
    }
}

/// Outcome of a single-page query
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    /// Records on the first page
    pub records: usize,
    /// Whether the server reported more pages
    pub has_more: bool,
}

/// Query client for one database
pub struct DatabaseQuery {
    client: HttpClient,
    endpoint: Url,
    paginator: QueryPaginator,
    decoder: JsonPageDecoder,
    sink: Arc<dyn DiagnosticsSink>,
}

impl DatabaseQuery {
    /// Build a query client from config, with diagnostics discarded
    pub fn new(config: &NotionConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .timeout(config.timeout())
            .bearer_token(config.notion_token.clone())
            .header(NOTION_VERSION_HEADER, config.notion_version.clone())
            .build();

        Ok(Self {
            client: HttpClient::with_config(http_config)?,
            endpoint: config.query_url()?,
            paginator: QueryPaginator::new(),
            decoder: JsonPageDecoder::new(),
            sink: Arc::new(NullSink),
        })
    }

    /// Send raw page bodies to `sink`
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the paginator
    #[must_use]
    pub fn with_paginator(mut self, paginator: QueryPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Query endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch every record of the database, in server order
    pub async fn fetch_all(&self) -> std::result::Result<Vec<Record>, PartialFetch> {
        let mut records = Vec::new();
        let mut state = PaginationState::new();

        self.sink.begin().await;
        info!(endpoint = %self.endpoint, "Querying database");

        loop {
            let page = match self.fetch_page(&state).await {
                Ok(page) => page,
                Err(source) => {
                    warn!(
                        page = state.pages,
                        fetched = records.len(),
                        "Fetch aborted: {source}"
                    );
                    return Err(PartialFetch { records, source });
                }
            };

            debug!(
                page = state.pages,
                records = page.len(),
                has_more = page.has_more,
                "Fetched page"
            );

            let next = self.paginator.process_page(&page, &mut state);
            records.extend(page.records);

            if let NextPage::Done = next {
                break;
            }
        }

        info!(
            pages = state.pages,
            records = records.len(),
            "Fetched all records"
        );
        Ok(records)
    }

    /// Fetch only the first page and report its size
    pub async fn probe(&self) -> Result<FetchSummary> {
        let state = PaginationState::new();
        self.sink.begin().await;
        let page = self.fetch_page(&state).await?;
        Ok(FetchSummary {
            records: page.len(),
            has_more: page.has_more,
        })
    }

    /// Post one page request and decode the reply
    ///
    /// The sink sees every body that arrives, error replies included.
    async fn fetch_page(&self, state: &PaginationState) -> Result<QueryPage> {
        let body = self.paginator.request_body(state);
        let response = self.client.post_json(self.endpoint.as_str(), &body).await?;
        self.sink.record_page(state.pages, &response.body).await;
        let text = response.into_body()?;
        self.decoder.decode(&text)
    }
}

impl std::fmt::Debug for DatabaseQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseQuery")
            .field("endpoint", &self.endpoint.as_str())
            .field("client", &self.client)
            .field("paginator", &self.paginator)
            .finish_non_exhaustive()
    }
}

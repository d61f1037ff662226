use reqwest::Client;
use tracing::{debug, info};
use url::form_urlencoded;

use crate::{
    config::{ArxivConfig, ArxivQuery},
    error::HarvestResult,
    model::RawResponse
};

// single GET against the arXiv export API. no retries, no paging.
#[derive(Debug)]
pub struct ArxivFetcher {
    client: Client,
    config: ArxivConfig
}

impl ArxivFetcher {
    pub fn new(config: ArxivConfig) -> HarvestResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(ArxivFetcher {
            client,
            config
        })
    }

    pub fn query_url(&self, query: &ArxivQuery) -> String {
        let params = form_urlencoded::Serializer::new(String::new())
            .append_pair("search_query", &query.search_query)
            .append_pair("start", &query.start.to_string())
            .append_pair("max_results", &query.max_results.to_string())
            .finish();
        format!("{}?{}", self.config.api_url, params)
    }

    pub async fn fetch(&self, query: &ArxivQuery) -> HarvestResult<RawResponse> {
        let url = self.query_url(query);
        info!(url = %url, "fetching arxiv feed");

        let response = self.client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(status = %status, bytes = body.len(), "arxiv feed received");
        Ok(RawResponse { url, body })
    }
}

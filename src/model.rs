use serde::{Deserialize, Serialize};

// one normalized arXiv entry, written as a single line of items.jsonl.
// field order here is the key order on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArxivRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub published: String,
    pub updated: String,
    pub authors: Vec<String>,
    pub primary_category: Option<String>,
    pub categories: Vec<String>,
    pub link_html: Option<String>,
    pub link_pdf: Option<String>
}

// contents of run.json.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunMetadata {
    pub run_id: String,
    pub fetched_at_utc: String,
    pub source: String,
    pub source_url: String,
    pub count: usize,
    pub raw_path: String,
    pub items_path: String
}

// response body exactly as the API returned it, plus the URL it came from.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub body: Vec<u8>
}

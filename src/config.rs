use std::{
    path::{Path, PathBuf},
    time::Duration
};
use chrono::{DateTime, Utc};

pub const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";
pub const DEFAULT_QUERY: &str = "all:\"vaccine effectiveness\"";
pub const USER_AGENT: &str = "tvel-harvester/0.1";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const SOURCE_NAME: &str = "arxiv";

const HARVESTER_DIR: &str = "tvel-harvester";
const RUNS_DIR: &str = "runs";
const RUN_ID_FORMAT: &str = "%Y%m%d-%H%M%S";

const RAW_FILE: &str = "raw.xml";
const ITEMS_FILE: &str = "items.jsonl";
const META_FILE: &str = "run.json";

// endpoint settings for the arXiv export API.
#[derive(Debug, Clone)]
pub struct ArxivConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ArxivConfig {
    pub fn new(api_url: &str) -> Self {
        ArxivConfig {
            api_url: api_url.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT
        }
    }

    // points the fetcher at a mock server, with a short timeout.
    pub fn for_testing(base_url: &str) -> Self {
        ArxivConfig {
            api_url: format!("{}/api/query", base_url),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(5)
        }
    }
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self::new(ARXIV_API_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArxivQuery {
    pub search_query: String,
    pub start: u32,
    pub max_results: u32,
}

impl ArxivQuery {
    pub fn new(search_query: &str) -> Self {
        ArxivQuery {
            search_query: search_query.to_string(),
            start: 0,
            max_results: 25
        }
    }

    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for ArxivQuery {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}

/// Layout of one run directory:
/// `<dataroot>/tvel-harvester/<source>/runs/<YYYYMMDD-HHMMSS>/`.
///
/// The run id has second resolution, so two runs started within the same
/// second share a directory.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub run_id: String,
    run_dir: PathBuf
}

impl RunConfig {
    pub fn new(dataroot: &Path, source: &str, run_id: &str) -> Self {
        let run_dir = dataroot
            .join(HARVESTER_DIR)
            .join(source)
            .join(RUNS_DIR)
            .join(run_id);
        RunConfig {
            run_id: run_id.to_string(),
            run_dir
        }
    }

    pub fn at(dataroot: &Path, source: &str, time: DateTime<Utc>) -> Self {
        Self::new(dataroot, source, &run_id_for(time))
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn raw_xml_path(&self) -> PathBuf {
        self.run_dir.join(RAW_FILE)
    }

    pub fn items_jsonl_path(&self) -> PathBuf {
        self.run_dir.join(ITEMS_FILE)
    }

    pub fn run_json_path(&self) -> PathBuf {
        self.run_dir.join(META_FILE)
    }
}

pub fn run_id_for(time: DateTime<Utc>) -> String {
    time.format(RUN_ID_FORMAT).to_string()
}

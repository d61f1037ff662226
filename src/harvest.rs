//! One harvesting run: fetch the feed, parse it, write the run directory.

use std::path::{Path, PathBuf};

use crate::{
    config::{ArxivQuery, SOURCE_NAME},
    error::HarvestResult,
    fetcher::ArxivFetcher,
    parser::parse_feed,
    storage::LocalStorage
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub run_dir: PathBuf,
    pub count: usize
}

impl HarvestOutcome {
    /// The line printed to stdout after a successful run.
    pub fn summary(&self) -> String {
        format!("{}: wrote {} items to {}", SOURCE_NAME, self.count, self.run_dir.display())
    }
}

/// Runs the three stages in order. Nothing is written unless both the fetch
/// and the parse succeed.
pub async fn run(
    fetcher: &ArxivFetcher,
    query: &ArxivQuery,
    dataroot: &Path
) -> HarvestResult<HarvestOutcome> {
    let response = fetcher.fetch(query).await?;
    let items = parse_feed(&response.body)?;
    let run_dir = LocalStorage::write_run(
        dataroot,
        SOURCE_NAME,
        &response.url,
        &response.body,
        &items
    )?;
    Ok(HarvestOutcome {
        run_dir,
        count: items.len()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let outcome = HarvestOutcome {
            run_dir: PathBuf::from("/data/tvel-harvester/arxiv/runs/20250101-000000"),
            count: 3
        };
        assert_eq!(
            outcome.summary(),
            "arxiv: wrote 3 items to /data/tvel-harvester/arxiv/runs/20250101-000000"
        );
    }
}

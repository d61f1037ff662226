use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf}
};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::{
    config::RunConfig,
    error::{HarvestError, HarvestResult},
    format::Formatter,
    model::{ArxivRecord, RunMetadata}
};

// Writes run directories on the local filesystem. Files are written in place:
// a failure part way through leaves whatever was already written.
pub struct LocalStorage;

impl LocalStorage {
    /// Writes `raw.xml`, `items.jsonl` and `run.json` into a new run
    /// directory named after the current UTC second, returning its path.
    pub fn write_run(
        dataroot: &Path,
        source: &str,
        url: &str,
        raw: &[u8],
        items: &[ArxivRecord]
    ) -> HarvestResult<PathBuf> {
        Self::write_run_at(Utc::now(), dataroot, source, url, raw, items)
    }

    pub fn write_run_at(
        now: DateTime<Utc>,
        dataroot: &Path,
        source: &str,
        url: &str,
        raw: &[u8],
        items: &[ArxivRecord]
    ) -> HarvestResult<PathBuf> {
        let run = RunConfig::at(dataroot, source, now);
        fs::create_dir_all(run.run_dir())
            .map_err(|e| HarvestError::io(run.run_dir(), e))?;

        let raw_path = run.raw_xml_path();
        fs::write(&raw_path, raw).map_err(|e| HarvestError::io(&raw_path, e))?;

        let items_path = run.items_jsonl_path();
        Self::save_items_as_jsonl(&items_path, items)?;

        let meta = RunMetadata {
            run_id: run.run_id.clone(),
            fetched_at_utc: iso_timestamp(now),
            source: source.to_string(),
            source_url: url.to_string(),
            count: items.len(),
            raw_path: raw_path.display().to_string(),
            items_path: items_path.display().to_string()
        };
        let meta_path = run.run_json_path();
        fs::write(&meta_path, Formatter::to_pretty_json(&meta)?)
            .map_err(|e| HarvestError::io(&meta_path, e))?;

        info!(run_dir = %run.run_dir().display(), count = items.len(), "wrote run");
        Ok(run.run_dir().to_path_buf())
    }

    pub fn save_items_as_jsonl(fname: &Path, data: &[ArxivRecord]) -> HarvestResult<()> {
        let file = File::create(fname).map_err(|e| HarvestError::io(fname, e))?;
        let mut writer = BufWriter::new(file);
        data.iter().try_for_each(|record| -> HarvestResult<()> {
            writer.write_all(Formatter::to_jsonl(record)?.as_bytes())
                .map_err(|e| HarvestError::io(fname, e))
        })?;
        writer.flush().map_err(|e| HarvestError::io(fname, e))?;
        Ok(())
    }
}

/// RFC 3339 with a `+00:00` offset. The fraction is truncated to microseconds
/// and left out entirely when it is zero.
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    let format = if time.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    time.to_rfc3339_opts(format, false)
}

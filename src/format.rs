use serde::Serialize;

use crate::{
    error::HarvestResult,
    model::ArxivRecord
};

// serde_json leaves non-ASCII characters unescaped, which is what we want on disk.
pub struct Formatter;

impl Formatter {
    /// One compact JSON object terminated by a newline.
    pub fn to_jsonl(data: &ArxivRecord) -> HarvestResult<String> {
        let mut line = serde_json::to_string(data)?;
        line.push('\n');
        Ok(line)
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_json<T: Serialize>(data: &T) -> HarvestResult<String> {
        let mut text = serde_json::to_string_pretty(data)?;
        text.push('\n');
        Ok(text)
    }
}

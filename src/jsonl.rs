// JSONL output

use eyre::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Write records to `writer`, one JSON object per line
pub fn write_jsonl<W, T, I>(writer: &mut W, records: I) -> Result<usize>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut count = 0;
    for record in records {
        let json = serde_json::to_string(&record).context("Failed to serialize record")?;
        writeln!(writer, "{}", json)?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

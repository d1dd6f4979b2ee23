use crate::app::models::FileRecord;
use anyhow::{Context, Result};
use std::io::Write;

const SEPARATOR_WIDTH: usize = 80;

pub struct OutputGenerator;

impl OutputGenerator {
    pub fn header(relative_path: &str) -> String {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        format!("{separator}\nFile: {relative_path}\n{separator}\n\n")
    }

    /// Writes one header block, the file content and the trailing blank lines.
    pub fn write_block<W: Write>(out: &mut W, record: &FileRecord) -> Result<()> {
        out.write_all(Self::header(&record.relative_path).as_bytes())
            .and_then(|_| out.write_all(record.content.as_bytes()))
            .and_then(|_| out.write_all(b"\n\n"))
            .with_context(|| format!("Failed to write block for {}", record.relative_path))
    }
}

use crate::app::decode::decode_lossy;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{DumpSummary, FileEntry, FileRecord, FilterConfig};
use crate::app::scanner::Scanner;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Walks a root and writes every surviving file into the dump.
pub struct DumpBuilder {
    config: FilterConfig,
}

impl DumpBuilder {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Truncates the output file and writes the dump of `root` into it.
    pub fn run(&self, root: PathBuf) -> Result<DumpSummary> {
        let file = File::create(&self.config.output).with_context(|| {
            format!(
                "Failed to open output file {} for writing",
                self.config.output.display()
            )
        })?;
        let mut out = BufWriter::new(file);

        let summary = self.write_dump(root, &mut out)?;
        out.flush().context("Failed to flush output file")?;

        Ok(summary)
    }

    /// Writes the dump of `root` into any writer.
    pub fn write_dump<W: Write>(&self, root: PathBuf, out: &mut W) -> Result<DumpSummary> {
        let scanner = Scanner::new(root, &self.config)?;
        let mut summary = DumpSummary::default();

        for entry in scanner.files() {
            let record = match read_record(&entry) {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("Could not read file {}: {}", entry.relative_path, err);
                    summary.files_failed += 1;
                    continue;
                }
            };

            OutputGenerator::write_block(out, &record)?;
            log::info!("+ Added: {}", record.relative_path);

            summary.files_written += 1;
            if record.dropped_bytes > 0 {
                summary.dropped_bytes += record.dropped_bytes;
                summary.lossy_files.push(record.relative_path);
            }
        }

        Ok(summary)
    }
}

fn read_record(entry: &FileEntry) -> std::io::Result<FileRecord> {
    let bytes = fs::read(&entry.path)?;
    let decoded = decode_lossy(&bytes);
    Ok(FileRecord {
        relative_path: entry.relative_path.clone(),
        content: decoded.text,
        dropped_bytes: decoded.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn header(path: &str) -> String {
        OutputGenerator::header(path)
    }

    fn dump(root: &Path, config: FilterConfig) -> (String, DumpSummary) {
        let builder = DumpBuilder::new(config);
        let mut out = Vec::new();
        let summary = builder.write_dump(root.to_path_buf(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn skips_ignored_extensions_and_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "hello").unwrap();
        fs::write(tmp.path().join("notes.log"), "noise").unwrap();
        fs::create_dir(tmp.path().join("node_modules")).unwrap();
        fs::write(tmp.path().join("node_modules/x.js"), "module").unwrap();

        let (output, summary) = dump(tmp.path(), FilterConfig::default());

        assert_eq!(output, format!("{}hello\n\n", header("./a.txt")));
        assert!(!output.contains("notes.log"));
        assert!(!output.contains("x.js"));
        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.files_failed, 0);
    }

    #[test]
    fn empty_root_gives_empty_dump() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("yarn.lock"), "lock").unwrap();
        fs::create_dir(tmp.path().join("dist")).unwrap();
        fs::write(tmp.path().join("dist/bundle.js"), "bundle").unwrap();

        let (output, summary) = dump(tmp.path(), FilterConfig::default());

        assert!(output.is_empty());
        assert_eq!(summary, DumpSummary::default());
    }

    #[test]
    fn header_paths_are_root_anchored_with_forward_slashes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/app")).unwrap();
        fs::write(tmp.path().join("src/app/mod.rs"), "pub mod x;\n").unwrap();

        let (output, _) = dump(tmp.path(), FilterConfig::default());
        assert_eq!(output, format!("{}pub mod x;\n\n\n", header("./src/app/mod.rs")));
    }

    #[test]
    fn lossy_files_are_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bin.dat"), b"ok\xffok").unwrap();
        fs::write(tmp.path().join("clean.txt"), "clean").unwrap();

        let (output, summary) = dump(tmp.path(), FilterConfig::default());

        assert!(output.contains("okok"));
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.lossy_files, vec!["./bin.dat".to_string()]);
        assert_eq!(summary.dropped_bytes, 1);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_does_not_stop_the_walk() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "first").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("b.txt")).unwrap();
        fs::write(tmp.path().join("c.txt"), "last").unwrap();

        let (output, summary) = dump(tmp.path(), FilterConfig::default());

        let expected = format!("{}first\n\n{}last\n\n", header("./a.txt"), header("./c.txt"));
        assert_eq!(output, expected);
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.files_failed, 1);
    }

    #[test]
    fn run_is_idempotent_with_output_inside_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.py"), "print('hi')\n").unwrap();

        let mut config = FilterConfig::default();
        config.output = tmp.path().join("context.txt");
        let builder = DumpBuilder::new(config);

        builder.run(tmp.path().to_path_buf()).unwrap();
        let first = fs::read(tmp.path().join("context.txt")).unwrap();
        builder.run(tmp.path().to_path_buf()).unwrap();
        let second = fs::read(tmp.path().join("context.txt")).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(second).unwrap(),
            format!("{}print('hi')\n\n\n", header("./main.py"))
        );
    }

    #[test]
    fn run_fails_when_output_cannot_be_opened() {
        let tmp = TempDir::new().unwrap();
        let config = FilterConfig::empty(tmp.path().join("no/such/dir/out.txt"));

        let err = DumpBuilder::new(config)
            .run(tmp.path().to_path_buf())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open output file"));
    }

    #[test]
    fn synthetic_filter_sets() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("keep.rs"), "keep").unwrap();
        fs::write(tmp.path().join("drop.tmp"), "drop").unwrap();
        fs::write(tmp.path().join("README.md"), "readme").unwrap();
        fs::create_dir(tmp.path().join("vendor")).unwrap();
        fs::write(tmp.path().join("vendor/dep.rs"), "dep").unwrap();

        let mut config = FilterConfig::empty("out.txt");
        config.ignored_extensions.insert(".tmp".to_string());
        config.ignored_dir_names.insert("vendor".to_string());

        let (output, summary) = dump(tmp.path(), config);
        assert_eq!(
            output,
            format!("{}readme\n\n{}keep\n\n", header("./README.md"), header("./keep.rs"))
        );
        assert_eq!(summary.files_written, 2);
    }
}

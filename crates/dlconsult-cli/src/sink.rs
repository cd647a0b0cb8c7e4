//! 出力先: 追記専用の結果ファイルとコンソールレポート

use crate::error::ConsultError;
use dlconsult_query::{JsonSerializer, QueryResult, ResultSerializer, XmlSerializer};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const RECORD_PREFIX: &str = "queryresults:";
pub const RULE: &str = "-------------------------------------------------";

/// Append-only output document, opened once per consultation
pub struct OutputSink {
    path: PathBuf,
    file: File,
}

impl OutputSink {
    /// Creates the file when missing; existing content is kept
    pub fn open(path: &Path) -> Result<Self, ConsultError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ConsultError::OutputCreation(e.to_string()))?;
        debug!(path = %path.display(), "output file opened");
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `queryresults:<json>` without a trailing newline
    pub fn append(&mut self, result: &QueryResult) -> Result<(), ConsultError> {
        let json = JsonSerializer
            .render(result)
            .map_err(|e| ConsultError::OutputWrite(e.to_string()))?;
        let record = format!("{}{}", RECORD_PREFIX, json);
        self.file
            .write_all(record.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|e| ConsultError::OutputWrite(e.to_string()))
    }
}

/// Human-readable report; write failures are logged and ignored
pub struct ConsoleSink<'w> {
    out: &'w mut dyn Write,
}

impl<'w> ConsoleSink<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self { out }
    }

    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "console write failed");
        }
    }

    pub fn query(&mut self, text: &str) {
        self.line("\nQuery:");
        self.line(text);
        self.line(RULE);
    }

    pub fn xml(&mut self, result: &QueryResult) {
        let written = XmlSerializer
            .write(result, &mut *self.out)
            .map_err(|e| e.to_string())
            .and_then(|_| writeln!(self.out).map_err(|e| e.to_string()));
        if let Err(e) = written {
            warn!(error = %e, "XML rendering failed");
        }
    }

    pub fn json(&mut self, result: &QueryResult) {
        self.line("\nResults:");
        self.line(RULE);
        match JsonSerializer.render(result) {
            Ok(json) => self.line(&json),
            Err(e) => warn!(error = %e, "JSON rendering failed"),
        }
    }

    pub fn summary(&mut self, size: usize, elapsed: Duration) {
        self.line(RULE);
        self.line(&format!("Size of result set: {}", size));
        self.line(&format!("Finished in {:.3}s\n", elapsed.as_secs_f64()));
    }

    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "console flush failed");
        }
    }
}

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::client::Sample;
use crate::error::SinkError;

/// One logged sampling cycle: the capture instant plus one sample per
/// configured tag, in configured order.
#[derive(Debug, Clone)]
pub struct Row {
    captured: DateTime<Local>,
    samples: Vec<Sample>,
}

impl Row {
    pub fn new(captured: DateTime<Local>, samples: Vec<Sample>) -> Self {
        Self { captured, samples }
    }

    pub fn captured(&self) -> DateTime<Local> {
        self.captured
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// CSV fields: local time of day, integer epoch seconds, then one field
    /// per sample (empty for an unreadable tag).
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.samples.len() + 2);
        fields.push(self.captured.format("%H:%M:%S").to_string());
        fields.push(self.captured.timestamp().to_string());
        fields.extend(self.samples.iter().map(Sample::field));
        fields
    }
}

/// Appends rows to hourly CSV files under a fixed directory.
///
/// The target file is recomputed from each row's capture time, so rotation
/// across an hour boundary is implicit; there is no timer and no rollover
/// event. A file gets its header exactly once, on the append that creates
/// it.
pub struct LogSink {
    dir: PathBuf,
    header: Vec<String>,
}

impl LogSink {
    /// Fix the column layout and create the log directory if absent.
    pub fn new(dir: impl Into<PathBuf>, tag_count: usize) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let mut header = Vec::with_capacity(tag_count + 2);
        header.push("Timestamp".to_string());
        header.push("Epoch".to_string());
        header.extend((1..=tag_count).map(|i| format!("Tag{i}")));
        Ok(Self { dir, header })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Path of the file backing the bucket that `at` falls into: one file
    /// per calendar date and hour.
    pub fn bucket_path(&self, at: DateTime<Local>) -> PathBuf {
        self.dir
            .join(format!("OPC_Log_{}.csv", at.format("%Y-%m-%d_%H")))
    }

    /// Append one row, creating the bucket file (and writing its header
    /// first) if this row starts a new hour. Returns the path written to.
    pub fn append(&self, row: &Row) -> Result<PathBuf, SinkError> {
        let fields = row.fields();
        debug_assert_eq!(fields.len(), self.header.len());

        let path = self.bucket_path(row.captured());
        let is_new = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            debug!(path = %path.display(), "starting new log bucket");
            writer.write_record(&self.header)?;
        }
        writer.write_record(&fields)?;
        writer.flush()?;
        Ok(path)
    }
}

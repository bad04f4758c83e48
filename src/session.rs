use chrono::Local;
use directories::ProjectDirs;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crate::util::mean;

/// End-of-session statistics over the accepted sentence history.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub sentence_count: usize,
    pub longest_words: usize,
    pub average_words: f64,
}

impl SessionSummary {
    pub fn from_sentences(sentences: &[String]) -> Self {
        let word_counts: Vec<f64> = sentences
            .iter()
            .map(|s| s.split(' ').count() as f64)
            .collect();

        Self {
            sentence_count: sentences.len(),
            longest_words: word_counts.iter().map(|&n| n as usize).max().unwrap_or(0),
            average_words: mean(&word_counts).unwrap_or(0.0),
        }
    }
}

/// One row in the session result log.
#[derive(Debug, Serialize)]
pub struct SessionRecord {
    pub date: String,
    pub sentences: usize,
    pub longest_words: usize,
    pub average_words: f64,
    pub score: f64,
    pub elapsed_secs: f64,
}

impl SessionRecord {
    pub fn new(summary: &SessionSummary, score: f64, elapsed_secs: f64) -> Self {
        Self {
            date: Local::now().format("%c").to_string(),
            sentences: summary.sentence_count,
            longest_words: summary.longest_words,
            average_words: summary.average_words,
            score,
            elapsed_secs,
        }
    }
}

pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "skriv").map(|pd| pd.data_local_dir().join("sessions.csv"))
}

/// Append one record, emitting the header on first write. Callers treat
/// failures as best-effort.
pub fn append_record<P: AsRef<Path>>(path: P, record: &SessionRecord) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let needs_header = !path.exists();

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    writer
        .serialize(record)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.flush()
}

//! Record splitting and error reporting shared by the catalogue parsers.
//!
//! A catalogue is a sequence of records separated by blank lines. Each record
//! is parsed on its own; a malformed record is reported and skipped while the
//! rest of the catalogue still loads.

use thiserror::Error;

/// Embedded LevelDrain buff catalogue.
pub const BUFF_CORPUS: &str = include_str!("../../data/buffs.txt");

/// Embedded LevelDrain job catalogue.
pub const JOB_CORPUS: &str = include_str!("../../data/jobs.txt");

/// One blank-line separated block of a catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number of the first line
    pub line: usize,
    pub lines: Vec<&'a str>,
}

impl Record<'_> {
    /// First line of the record, used in diagnostics.
    pub fn head(&self) -> &str {
        self.lines.first().copied().unwrap_or_default()
    }
}

/// Split a catalogue into records.
pub fn split_records(corpus: &str) -> Vec<Record<'_>> {
    let mut records = Vec::new();
    let mut current: Option<Record<'_>> = None;

    for (index, line) in corpus.lines().enumerate() {
        if line.trim().is_empty() {
            records.extend(current.take());
            continue;
        }

        current
            .get_or_insert_with(|| Record {
                line: index + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    records.extend(current);
    records
}

/// Why a single catalogue record was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{kind} record at line {line} is missing its {field}: {head}")]
    MissingField {
        kind: &'static str,
        line: usize,
        field: &'static str,
        head: String,
    },

    #[error("{kind} record at line {line} duplicates '{name}', keeping the first entry")]
    Duplicate {
        kind: &'static str,
        line: usize,
        name: String,
    },
}

impl RecordError {
    pub fn line(&self) -> usize {
        match self {
            RecordError::MissingField { line, .. } | RecordError::Duplicate { line, .. } => *line,
        }
    }
}

/// Outcome of parsing one catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub parsed: usize,
    pub failures: Vec<RecordError>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record a rejected record and log it.
    pub fn reject(&mut self, error: RecordError) {
        tracing::warn!("{}", error);
        self.failures.push(error);
    }
}

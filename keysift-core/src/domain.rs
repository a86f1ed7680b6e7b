// keysift_core/src/domain.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal classification of one archive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "password", rename_all = "snake_case")]
pub enum Outcome {
    NoPassword,
    Found(String),
    /// The attempt with this candidate outlived the time bound, which only a
    /// correct password does.
    FoundByTimeout(String),
    Unsupported,
    Corrupt,
    Exhausted,
    /// The direct probe timed out; counted like `NoPassword`.
    Cancelled,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(
            self,
            Outcome::NoPassword
                | Outcome::Found(_)
                | Outcome::FoundByTimeout(_)
                | Outcome::Cancelled
        )
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            Outcome::Found(p) | Outcome::FoundByTimeout(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoPassword => f.write_str("no password"),
            Outcome::Found(p) => write!(f, "password found: {p}"),
            Outcome::FoundByTimeout(p) => write!(f, "password found (slow decode): {p}"),
            Outcome::Unsupported => f.write_str("unsupported file type"),
            Outcome::Corrupt => f.write_str("corrupted archive"),
            Outcome::Exhausted => f.write_str("no password in dictionary"),
            Outcome::Cancelled => f.write_str("no password (probe timed out)"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTally {
    pub total: u64,
    pub ok: u64,
    pub unsupported: u64,
    pub exhausted: u64,
    pub corrupt: u64,
}

impl BatchTally {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome {
            Outcome::Unsupported => self.unsupported += 1,
            Outcome::Exhausted => self.exhausted += 1,
            Outcome::Corrupt => self.corrupt += 1,
            _ => self.ok += 1,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.total == self.ok + self.unsupported + self.exhausted + self.corrupt
    }
}

impl fmt::Display for BatchTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total: {}, ok: {}, unsupported: {}, no password: {}, corrupt: {}",
            self.total, self.ok, self.unsupported, self.exhausted, self.corrupt
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileStatus {
    pub name: String,
    pub outcome: Outcome,
}

/// Per-file outcomes in input order plus the tally over them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub tally: BatchTally,
    pub files: Vec<FileStatus>,
}

impl BatchReport {
    pub fn record(&mut self, name: String, outcome: Outcome) {
        self.tally.record(&outcome);
        self.files.push(FileStatus { name, outcome });
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.files.iter().map(|f| &f.outcome)
    }
}

//! Candidate password store.
//!
//! A UTF-8 text file, one password per line. The in-memory list is kept
//! unique and ordered by [`display_width`] after every mutation, so the
//! search engine always tries short, plain-looking passwords first.

use std::collections::HashSet;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Letters, digits, whitespace and punctuation count 1; non-ASCII
/// alphabetic characters (CJK and the like) count 2.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_numeric() || c.is_whitespace() {
                1
            } else if c.is_alphabetic() {
                2
            } else {
                1
            }
        })
        .sum()
}

/// Drop repeats (first occurrence wins) and stable-sort by display width.
pub fn normalize(entries: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut out: Vec<String> = entries
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .collect();
    out.sort_by_key(|e| display_width(e));
    out
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub before: usize,
    pub incoming: usize,
    pub added: usize,
    pub skipped: usize,
}

#[derive(Clone, Debug)]
pub struct Dictionary {
    path: PathBuf,
    entries: Vec<String>,
}

impl Dictionary {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let entries = normalize(parse_lines(&text));
        debug!(path = %path.display(), count = entries.len(), "dictionary loaded");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn from_entries(path: impl Into<PathBuf>, entries: Vec<String>) -> Self {
        Self {
            path: path.into(),
            entries: normalize(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Frozen copy handed to the search engine.
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::from(self.entries.clone())
    }

    pub fn add(&mut self, password: &str) -> AddOutcome {
        let password = password.trim();
        if password.is_empty() || self.entries.iter().any(|e| e == password) {
            return AddOutcome::AlreadyPresent;
        }
        let mut entries = std::mem::take(&mut self.entries);
        entries.push(password.to_owned());
        self.entries = normalize(entries);
        AddOutcome::Added
    }

    pub fn merge(&mut self, incoming: Vec<String>) -> MergeReport {
        let before = self.entries.len();
        let incoming_len = incoming.len();
        let mut entries = std::mem::take(&mut self.entries);
        entries.extend(incoming);
        self.entries = normalize(entries);
        let added = self.entries.len() - before;
        MergeReport {
            before,
            incoming: incoming_len,
            added,
            skipped: incoming_len - added,
        }
    }

    /// Merge the passwords listed in an external file.
    pub fn merge_from(&mut self, other: &Path) -> Result<MergeReport> {
        let text = std::fs::read_to_string(other)?;
        Ok(self.merge(parse_lines(&text)))
    }

    /// Rewrite the store through a temp file in the same directory so a crash
    /// never leaves a half-written dictionary.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;
        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut w = BufWriter::new(tmp.as_file());
            for e in &self.entries {
                writeln!(w, "{e}")?;
            }
            w.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), count = self.entries.len(), "dictionary saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn width_metric() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("a1 b"), 4);
        assert_eq!(display_width("密码"), 4);
        assert_eq!(display_width("p@ss!"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let sorted = normalize(strings(&["密码", "ab", "a1 b"]));
        assert_eq!(sorted, strings(&["ab", "密码", "a1 b"]));
        let sorted = normalize(strings(&["ab", "a1 b", "密码"]));
        assert_eq!(sorted, strings(&["ab", "a1 b", "密码"]));
    }

    #[test]
    fn add_existing_is_a_no_op() {
        let mut d = Dictionary::from_entries("dict.txt", strings(&["abcd", "xy", "z"]));
        let before = d.entries().to_vec();
        assert_eq!(d.add("xy"), AddOutcome::AlreadyPresent);
        assert_eq!(d.entries(), &before[..]);

        assert_eq!(d.add("qqq"), AddOutcome::Added);
        assert_eq!(d.entries(), &strings(&["z", "xy", "qqq", "abcd"])[..]);
    }

    #[test]
    fn merge_counts_only_new_entries() {
        let mut d = Dictionary::from_entries("dict.txt", strings(&["one", "two"]));
        let r = d.merge(strings(&["two", "three", "three", "one", "four"]));
        assert_eq!(r.before, 2);
        assert_eq!(r.incoming, 5);
        assert_eq!(r.added, 2);
        assert_eq!(r.skipped, 3);
        assert_eq!(d.entries(), &strings(&["one", "two", "four", "three"])[..]);
    }

    #[test]
    fn load_save_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.txt");
        std::fs::write(&path, "secret\n  abc \n\nabc\n密码\n").unwrap();

        let mut d = Dictionary::load(&path).unwrap();
        assert_eq!(d.entries(), &strings(&["abc", "密码", "secret"])[..]);

        let external = dir.path().join("more.txt");
        std::fs::write(&external, "zz\nabc\n").unwrap();
        let r = d.merge_from(&external).unwrap();
        assert_eq!((r.added, r.skipped), (1, 1));
        d.save().unwrap();

        let reloaded = Dictionary::load(&path).unwrap();
        assert_eq!(reloaded.entries(), d.entries());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "zz\nabc\n密码\nsecret\n"
        );
    }

    #[test]
    fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let d = Dictionary::load(&dir.path().join("absent.txt")).unwrap();
        assert!(d.is_empty());
        assert_eq!(d.snapshot().len(), 0);
    }
}

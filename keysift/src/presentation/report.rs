use std::sync::Mutex;

use console::{StyledObject, style};
use indicatif::{ProgressBar, ProgressStyle};
use keysift_core::error::Result;
use keysift_core::{ArchiveDescriptor, BatchReport, Outcome, ProgressObserver};

const RULE: &str = "++++++++++++++++";

fn label(outcome: &Outcome) -> StyledObject<String> {
    let text = format!(" {outcome} ");
    match outcome {
        Outcome::NoPassword | Outcome::Cancelled => style(text).black().on_green(),
        Outcome::Found(_) | Outcome::FoundByTimeout(_) => style(text).black().on_cyan(),
        Outcome::Exhausted => style(text).white().on_red(),
        Outcome::Corrupt => style(text).white().on_magenta(),
        Outcome::Unsupported => style(text).dim(),
    }
}

/// Console observer: metadata before each archive, a bar while the
/// dictionary is searched, a colored status line afterwards. Silent when
/// `quiet` so JSON output stays clean.
pub struct ConsoleProgress {
    quiet: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: Mutex::new(None),
        }
    }

    fn search_bar(len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl ProgressObserver for ConsoleProgress {
    fn archive_started(&self, index: usize, total: usize, archive: &ArchiveDescriptor) {
        if self.quiet {
            return;
        }
        println!("\n({}/{})", index + 1, total);
        for line in archive.describe() {
            println!("  {}", style(line).dim());
        }
    }

    fn search_started(&self, archive: &ArchiveDescriptor, candidates: usize) {
        if self.quiet {
            return;
        }
        println!(
            "{} {} candidates",
            style(format!(" {} is encrypted, trying dictionary ", archive.file_name))
                .black()
                .on_yellow(),
            candidates
        );
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(Self::search_bar(candidates as u64));
        }
    }

    fn candidate_started(&self, index: usize, _total: usize, candidate: &str) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_position(index as u64);
                pb.set_message(candidate.to_string());
            }
        }
    }

    fn archive_finished(&self, archive: &ArchiveDescriptor, outcome: &Outcome) {
        if let Some(pb) = self.take_bar() {
            pb.finish_and_clear();
        }
        if self.quiet {
            return;
        }
        println!("{} {}", style(&archive.file_name).bold(), label(outcome));
    }
}

pub fn print_summary(report: &BatchReport) {
    println!("\n\nResults");
    println!("{}: no password or cracked", style("  ").on_green());
    println!("{}: password not in dictionary", style("  ").on_red());
    println!("{}: corrupted archive", style("  ").on_magenta());
    println!("{RULE}");
    for file in &report.files {
        let outcome = &file.outcome;
        if let Some(p) = outcome.password() {
            println!("{} -> {}", style(&file.name).black().on_green(), p);
        } else if outcome.is_ok() {
            println!("{}", style(&file.name).black().on_green());
        } else if *outcome == Outcome::Exhausted {
            println!("{}", style(&file.name).white().on_red());
        } else if *outcome == Outcome::Corrupt {
            println!("{}", style(&file.name).white().on_magenta());
        } else {
            println!("{}", file.name);
        }
    }
    println!("{RULE}");
    println!("{}", report.tally);
}

pub fn print_json(report: &BatchReport) -> Result<()> {
    let text = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}

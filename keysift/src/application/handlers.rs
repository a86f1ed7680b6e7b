use std::path::PathBuf;
use std::time::Duration;

use keysift_core::dictionary::AddOutcome;
use keysift_core::error::Result;
use keysift_core::{
    BackendSet, BatchClassifier, Dictionary, ProbeTimeoutPolicy, RecoveryOptions, collect_inputs,
};
use tracing::warn;

use super::Settings;
use crate::presentation::report::{ConsoleProgress, print_json, print_summary};

/// Grace period for detached attempts when the runtime shuts down.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn recovery_options(settings: &Settings) -> RecoveryOptions {
    let mut opts = RecoveryOptions {
        attempt_timeout: settings.timeout,
        probe_timeout: if settings.report_probe_timeouts {
            ProbeTimeoutPolicy::Report
        } else {
            ProbeTimeoutPolicy::AssumeNoPassword
        },
        ..Default::default()
    };
    if let Some(dir) = &settings.scratch {
        opts.scratch_root = dir.clone();
    }
    opts
}

fn announce_add(dict: &Dictionary, password: &str, added: AddOutcome) {
    match added {
        AddOutcome::AlreadyPresent => {
            println!("password {password} is already in the dictionary, nothing to add")
        }
        AddOutcome::Added => println!("password {password} added to the dictionary"),
    }
    println!("your dictionary now has {} passwords", dict.len());
}

pub fn handle_check(settings: &Settings, path: PathBuf, add_password: Option<String>) -> Result<()> {
    let mut dict = Dictionary::load(&settings.dict)?;
    if let Some(pw) = add_password {
        let added = dict.add(&pw);
        if added == AddOutcome::Added {
            dict.save()?;
        }
        if !settings.json {
            announce_add(&dict, &pw, added);
        }
    }

    let inputs = collect_inputs(&path)?;
    let classifier = BatchClassifier::new(recovery_options(settings), BackendSet::standard());
    let candidates = dict.snapshot();
    let progress = ConsoleProgress::new(settings.json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    let outcome = runtime.block_on(classifier.run(&inputs, &candidates, &progress));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    if !settings.keep_scratch {
        if let Err(e) = classifier.scratch().cleanup() {
            warn!(error = %e, scratch = %classifier.scratch().path().display(), "could not remove scratch directory");
        }
    }

    let report = outcome?;
    if settings.json {
        print_json(&report)
    } else {
        print_summary(&report);
        Ok(())
    }
}

pub fn handle_dict_add(settings: &Settings, password: &str) -> Result<()> {
    let mut dict = Dictionary::load(&settings.dict)?;
    let added = dict.add(password);
    if added == AddOutcome::Added {
        dict.save()?;
    }
    announce_add(&dict, password, added);
    Ok(())
}

pub fn handle_dict_merge(settings: &Settings, file: PathBuf) -> Result<()> {
    let mut dict = Dictionary::load(&settings.dict)?;
    let report = dict.merge_from(&file)?;
    println!(
        "internal dictionary has {} passwords, {} has {}",
        report.before,
        file.display(),
        report.incoming
    );
    if report.added > 0 {
        dict.save()?;
    }
    println!(
        "added {} passwords, skipped {} duplicates",
        report.added, report.skipped
    );
    println!("your dictionary now has {} passwords", dict.len());
    Ok(())
}

pub fn handle_dict_list(settings: &Settings) -> Result<()> {
    let dict = Dictionary::load(&settings.dict)?;
    for entry in dict.entries() {
        println!("{entry}");
    }
    Ok(())
}

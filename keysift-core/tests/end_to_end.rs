mod common;

use std::path::Path;
use std::time::Duration;

use common::{Lock, dictionary, write_truncated_zip, write_zip};
use keysift_core::{
    BackendSet, BatchClassifier, BatchTally, Dictionary, NoProgress, Outcome,
    ProbeTimeoutPolicy, RecoveryOptions, collect_inputs,
};

fn classifier(scratch: &Path) -> BatchClassifier {
    BatchClassifier::new(
        RecoveryOptions {
            attempt_timeout: Duration::from_secs(10),
            scratch_root: scratch.to_path_buf(),
            probe_timeout: ProbeTimeoutPolicy::AssumeNoPassword,
        },
        BackendSet::standard(),
    )
}

#[tokio::test]
async fn plain_locked_and_broken() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        write_zip(dir.path(), "plain.zip", Lock::None),
        write_zip(dir.path(), "locked.zip", Lock::Aes("test123")),
        write_truncated_zip(dir.path(), "broken.zip"),
    ];
    let dict = Dictionary::from_entries(dir.path().join("dictionary.txt"), dictionary());
    assert_eq!(dict.entries()[4], "test123");

    let c = classifier(&dir.path().join("scratch"));
    let report = c.run(&inputs, &dict.snapshot(), &NoProgress).await.unwrap();

    assert_eq!(
        report.tally,
        BatchTally {
            total: 3,
            ok: 2,
            unsupported: 0,
            exhausted: 0,
            corrupt: 1,
        }
    );
    assert_eq!(
        report.outcomes().cloned().collect::<Vec<_>>(),
        vec![
            Outcome::NoPassword,
            Outcome::Found("test123".into()),
            Outcome::Corrupt
        ]
    );
    assert!(report.tally.is_balanced());
}

#[tokio::test]
async fn zipcrypto_password_is_recovered_and_extracted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_zip(dir.path(), "legacy.zip", Lock::ZipCrypto("admin"));
    let scratch = dir.path().join("scratch");

    let c = classifier(&scratch);
    let outcome = c
        .classify(&input, &dictionary(), &NoProgress)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Found("admin".into()));

    let extracted = std::fs::read(scratch.join("legacy/report/data.txt")).unwrap();
    assert_eq!(extracted.len(), common::PAYLOAD.len() * 64);
}

#[tokio::test]
async fn password_not_in_dictionary_is_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_zip(dir.path(), "vault.zip", Lock::Aes("correct horse"));
    let c = classifier(&dir.path().join("scratch"));
    let outcome = c
        .classify(&input, &dictionary(), &NoProgress)
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Exhausted);
}

#[tokio::test]
async fn directory_batch_counts_every_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let inbox = dir.path().join("inbox");
    std::fs::create_dir(&inbox).unwrap();
    write_zip(&inbox, "a_plain.zip", Lock::None);
    write_zip(&inbox, "b_locked.zip", Lock::Aes("nobody-knows"));
    write_truncated_zip(&inbox, "c_broken.zip");
    std::fs::write(inbox.join("d_notes.txt"), "shopping list").unwrap();
    std::fs::write(inbox.join("e_fake.7z"), "not really 7z").unwrap();

    let inputs = collect_inputs(&inbox).unwrap();
    let c = classifier(&dir.path().join("scratch"));
    let report = c.run(&inputs, &dictionary(), &NoProgress).await.unwrap();

    let names: Vec<_> = report.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "a_plain.zip",
            "b_locked.zip",
            "c_broken.zip",
            "d_notes.txt",
            "e_fake.7z"
        ]
    );
    assert_eq!(
        report.tally,
        BatchTally {
            total: 5,
            ok: 1,
            unsupported: 1,
            exhausted: 1,
            corrupt: 2,
        }
    );
    assert!(report.tally.is_balanced());
}

#[tokio::test]
async fn scratch_root_is_removed_on_cleanup() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_zip(dir.path(), "plain.zip", Lock::None);
    let scratch = dir.path().join("scratch");

    let c = classifier(&scratch);
    c.classify(&input, &[], &NoProgress).await.unwrap();
    assert!(scratch.join("plain").is_dir());

    c.scratch().cleanup().unwrap();
    assert!(!scratch.exists());
    c.scratch().cleanup().unwrap();
}

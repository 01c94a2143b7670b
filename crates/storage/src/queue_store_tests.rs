use super::*;
use chrono::TimeZone;
use tempfile::tempdir;

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn load_on_missing_file_returns_empty_ledger() {
    let dir = tempdir().unwrap();
    let store = QueueStore::new(Layout::new(dir.path()));
    assert!(store.load().unwrap().jobs.is_empty());
}

#[test]
fn add_job_then_load_contains_entry() {
    let dir = tempdir().unwrap();
    let store = QueueStore::new(Layout::new(dir.path()));

    store
        .add_job(JobEntry::new("1", "a", "bash", "", ts()))
        .unwrap();

    let ledger = store.load().unwrap();
    assert_eq!(ledger.jobs.len(), 1);
    assert_eq!(ledger.jobs[0].session, "a");
}

#[test]
fn update_job_mutates_status_and_message_in_place() {
    let dir = tempdir().unwrap();
    let store = QueueStore::new(Layout::new(dir.path()));

    store
        .add_job(JobEntry::new("1", "a", "bash", "", ts()))
        .unwrap();
    store
        .update_job("1", JobStatus::Running, Some("started".to_string()), ts())
        .unwrap();

    let ledger = store.load().unwrap();
    assert_eq!(ledger.jobs[0].status, JobStatus::Running);
    assert_eq!(ledger.jobs[0].message.as_deref(), Some("started"));
}

#[test]
fn update_job_on_unknown_id_is_a_no_op() {
    let dir = tempdir().unwrap();
    let store = QueueStore::new(Layout::new(dir.path()));
    store
        .add_job(JobEntry::new("1", "a", "bash", "", ts()))
        .unwrap();

    store
        .update_job("missing", JobStatus::Running, None, ts())
        .unwrap();

    let ledger = store.load().unwrap();
    assert_eq!(ledger.jobs.len(), 1);
    assert_eq!(ledger.jobs[0].status, JobStatus::Queued);
}

#[test]
fn remove_job_deletes_the_matching_entry() {
    let dir = tempdir().unwrap();
    let store = QueueStore::new(Layout::new(dir.path()));

    store
        .add_job(JobEntry::new("1", "a", "bash", "", ts()))
        .unwrap();
    store
        .add_job(JobEntry::new("2", "b", "bash", "", ts()))
        .unwrap();

    store.remove_job("1").unwrap();

    let ledger = store.load().unwrap();
    assert_eq!(ledger.jobs.len(), 1);
    assert_eq!(ledger.jobs[0].id, "2");
}

#[test]
fn concurrent_add_jobs_do_not_clobber_each_other() {
    let dir = tempdir().unwrap();
    let store = std::sync::Arc::new(QueueStore::new(Layout::new(dir.path())));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                store
                    .add_job(JobEntry::new(i.to_string(), "a", "bash", "", ts()))
                    .unwrap();
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let ledger = store.load().unwrap();
    assert_eq!(ledger.jobs.len(), 8);
}

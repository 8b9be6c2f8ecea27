//! Directory pre-process pass and single-file comparator against a real
//! install layout

use patch_freshness::{
    compare_file_time, preprocess_patches, FileTime, PatchRecord, PatchRecordSet, RecordState,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

fn set_mtime(path: &Path, secs: u64) -> FileTime {
    let mtime = UNIX_EPOCH + Duration::new(secs, 4_200);
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
    FileTime::from_system_time(mtime)
}

fn data_win32(bin: &TempDir) -> PathBuf {
    let dir = bin.path().join("data").join("win32");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_patch(dir: &Path, name: &str, secs: u64) -> FileTime {
    let path = dir.join(name);
    fs::write(&path, name).unwrap();
    set_mtime(&path, secs)
}

#[test]
fn test_matching_file_is_satisfied() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let foo_time = write_patch(&dir, "foo", 1_600_000_000);
    let baz_time = write_patch(&dir, "baz", 1_600_000_100);

    let mut records = PatchRecordSet::new();
    records.insert("data/win32/foo.pat", PatchRecord::pending(foo_time));
    records.insert(
        "data/win32/baz.pat",
        PatchRecord::pending(FileTime::from_ticks(baz_time.ticks() + 1)),
    );
    records.insert("data/win32/bar.pat", PatchRecord::pending(foo_time));

    let summary = preprocess_patches(&mut records, bin.path()).unwrap();

    assert_eq!(records.get("data/win32/foo.pat").unwrap().state(), RecordState::Satisfied);
    assert_eq!(records.get("data/win32/baz.pat").unwrap().state(), RecordState::PendingUpdate);
    assert_eq!(records.get("data/win32/bar.pat").unwrap().state(), RecordState::PendingUpdate);
    assert_eq!(summary.entries_visited, 2);
    assert_eq!(summary.records_matched, 2);
    assert_eq!(summary.records_satisfied, 1);
}

#[test]
fn test_missing_directory_leaves_records_unchanged() {
    let bin = TempDir::new().unwrap();
    let mut records = PatchRecordSet::new();
    records.insert("data/win32/foo.pat", PatchRecord::pending(FileTime::from_ticks(1)));
    let before = records.clone();

    let summary = preprocess_patches(&mut records, bin.path()).unwrap();

    assert_eq!(records, before);
    assert_eq!(summary.entries_visited, 0);
}

#[test]
fn test_empty_directory_leaves_records_unchanged() {
    let bin = TempDir::new().unwrap();
    data_win32(&bin);
    let mut records = PatchRecordSet::new();
    records.insert("data/win32/foo.pat", PatchRecord::pending(FileTime::from_ticks(1)));
    let before = records.clone();

    preprocess_patches(&mut records, bin.path()).unwrap();

    assert_eq!(records, before);
}

#[test]
fn test_subdirectory_never_matches() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let sub = dir.join("sub");
    fs::create_dir(&sub).unwrap();
    let sub_time = FileTime::from_system_time(fs::metadata(&sub).unwrap().modified().unwrap());
    // Files below the scanned level are not visited
    write_patch(&sub, "deep", 1_600_000_000);

    let mut records = PatchRecordSet::new();
    records.insert("data/win32/sub.pat", PatchRecord::pending(sub_time));
    records.insert(
        "data/win32/deep.pat",
        PatchRecord::pending(FileTime::from_system_time(UNIX_EPOCH + Duration::new(1_600_000_000, 4_200))),
    );

    let summary = preprocess_patches(&mut records, bin.path()).unwrap();

    assert_eq!(records.satisfied_count(), 0);
    assert_eq!(summary.entries_visited, 1);
    assert_eq!(summary.entries_skipped, 1);
}

#[cfg(unix)]
#[test]
fn test_hidden_file_never_matches() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let time = write_patch(&dir, ".foo", 1_600_000_000);

    let mut records = PatchRecordSet::new();
    records.insert("data/win32/.foo.pat", PatchRecord::pending(time));

    preprocess_patches(&mut records, bin.path()).unwrap();

    assert!(records.get("data/win32/.foo.pat").unwrap().needs_update());
}

#[test]
fn test_rerun_is_idempotent() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let foo_time = write_patch(&dir, "foo", 1_600_000_000);
    write_patch(&dir, "bar", 1_600_000_000);

    let mut records = PatchRecordSet::new();
    records.insert("data/win32/foo.pat", PatchRecord::pending(foo_time));
    records.insert("data/win32/bar.pat", PatchRecord::pending(FileTime::from_ticks(7)));

    preprocess_patches(&mut records, bin.path()).unwrap();
    let after_first = records.clone();
    preprocess_patches(&mut records, bin.path()).unwrap();

    assert_eq!(records, after_first);
    assert_eq!(records.satisfied_count(), 1);
}

#[test]
fn test_compare_file_time_exact_match_only() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let time = write_patch(&dir, "foo", 1_650_000_000);
    let path = dir.join("foo");

    assert!(compare_file_time(&path, time));
    assert!(!compare_file_time(&path, FileTime::from_ticks(time.ticks() + 1)));
    assert!(!compare_file_time(dir.join("missing"), time));
    assert!(!compare_file_time(&dir, time));
}

#[test]
fn test_comparator_and_scan_agree() {
    let bin = TempDir::new().unwrap();
    let dir = data_win32(&bin);
    let time = write_patch(&dir, "foo", 1_700_000_000);

    let mut records = PatchRecordSet::new();
    records.insert("data/win32/foo.pat", PatchRecord::pending(time));
    preprocess_patches(&mut records, bin.path()).unwrap();

    let satisfied = !records.get("data/win32/foo.pat").unwrap().needs_update();
    assert_eq!(satisfied, compare_file_time(dir.join("foo"), time));
}

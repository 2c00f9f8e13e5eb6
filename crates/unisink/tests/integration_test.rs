//! Integration tests for unisink.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use unisink::{
    write_annotations, Annotation, ConflictField, Origin, Outcome, Resolver, SourceOrSink,
    Unifier, UnifyConfig, UnifyInputs, UnisinkError,
};

/// Helper to write a named file inside a temporary directory.
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

const SCAN: &str = "\
String android.telephony.TelephonyManager.getDeviceId() - @DSSource({DSSourceKind.UNIQUE_IDENTIFIER}) - @DSGenerator(tool_name=\"Doppelganger\",tool_version=\"2.0\")
native int android.os.Parcel.nativeDataSize(int)
void android.util.Log.d(String,String) - @DSSink({DSSinkKind.LOG})
";

const CATALOG_SOURCES: &str = "\
Category: UNIQUE_IDENTIFIER
<android.telephony.TelephonyManager: java.lang.String getDeviceId()> (UNIQUE_IDENTIFIER)
";

const PERMISSION_MAP: &str = "\
\"java.lang.String android.telephony.TelephonyManager.getDeviceId()\",READ_PHONE_STATE
void android.accounts.AccountManager.clearPassword(android.accounts.Account),MANAGE_ACCOUNTS
";

fn standard_inputs(dir: &TempDir) -> UnifyInputs {
    UnifyInputs::new()
        .with_framework_scan(write_file(dir, "scanning_2014-02-10.txt", SCAN))
        .with_catalog(write_file(dir, "Ouput_CatSources_v0_9.txt", CATALOG_SOURCES))
        .with_permission_map(write_file(dir, "perm_map.csv", PERMISSION_MAP))
}

// =============================================================================
// End-to-end Tests
// =============================================================================

#[test]
fn test_overlapping_method_is_merged() {
    let dir = TempDir::new().unwrap();
    let result = Unifier::new()
        .unify(&standard_inputs(&dir))
        .expect("Unify failed");

    assert_eq!(result.summary.collected, 5);
    assert_eq!(result.summary.unique, 3);
    assert!(result.conflicts.is_empty());

    let device_id = &result.annotations[0];
    assert_eq!(device_id.method_name(), "getDeviceId");
    assert_eq!(device_id.origin(), Origin::FrameworkScan);
    assert_eq!(device_id.source_or_sink(), SourceOrSink::Source);
    assert_eq!(device_id.category(), "UNIQUE_IDENTIFIER");
    assert_eq!(device_id.returns(), "java.lang.String");
}

#[test]
fn test_source_metadata() {
    let dir = TempDir::new().unwrap();
    let result = Unifier::new().unify(&standard_inputs(&dir)).unwrap();

    assert_eq!(result.sources.len(), 3);

    let scan = &result.sources[0];
    assert_eq!(scan.file, "scanning_2014-02-10.txt");
    assert_eq!(scan.origin, Origin::FrameworkScan);
    assert_eq!(scan.entry_count, 3);
    assert_eq!(scan.record_count, 2);
    assert_eq!(scan.skipped(), 1);

    let catalog = &result.sources[1];
    assert_eq!(catalog.origin, Origin::Catalog);
    assert_eq!(catalog.record_count, 1);

    let perm = &result.sources[2];
    assert_eq!(perm.origin, Origin::PermissionMap);
    assert_eq!(perm.entry_count, 2);
}

#[test]
fn test_stats_from_result() {
    let dir = TempDir::new().unwrap();
    let result = Unifier::new().unify(&standard_inputs(&dir)).unwrap();

    assert_eq!(result.stats.total, 3);
    assert_eq!(result.stats.count(SourceOrSink::Source), 1);
    assert_eq!(result.stats.count(SourceOrSink::Sink), 1);
    assert_eq!(result.stats.count(SourceOrSink::Unannotated), 1);
    assert_eq!(result.stats.origin_count(Origin::FrameworkScan), 2);
    assert_eq!(result.stats.origin_count(Origin::PermissionMap), 1);
}

#[test]
fn test_written_csv() {
    let dir = TempDir::new().unwrap();
    let result = Unifier::new().unify(&standard_inputs(&dir)).unwrap();

    let output = dir.path().join("lissa_annotations.csv");
    write_annotations(&output, &result.annotations).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "<android.telephony.TelephonyManager: String getDeviceId()>,dsafe,source,UNIQUE_IDENTIFIER",
            "\"<android.util.Log: void d(String,String)>\",dsafe,sink,LOG",
            "<android.accounts.AccountManager: void clearPassword(Account)>,perm_map,unannotated,unannotated",
        ]
    );
}

// =============================================================================
// Catalog Kind Tests
// =============================================================================

#[test]
fn test_catalog_kind_comes_from_file_name() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new()
        .with_catalog(write_file(
            &dir,
            "Ouput_CatSinks_v0_9.txt",
            "<android.telephony.SmsManager: void sendTextMessage(java.lang.String,java.lang.String)> (SMS_MMS)\n",
        ))
        .with_catalog(write_file(
            &dir,
            "Ouput_CatSources_v0_9.txt",
            "<android.location.Location: double getLatitude()> (LOCATION_INFORMATION)\n",
        ));

    let result = Unifier::new().unify(&inputs).unwrap();

    assert_eq!(result.annotations[0].source_or_sink(), SourceOrSink::Sink);
    assert_eq!(result.annotations[1].source_or_sink(), SourceOrSink::Source);
    assert_eq!(result.annotations[1].category(), "LOCATION");
}

#[test]
fn test_strict_rejects_unknown_catalog_kind() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new().with_catalog(write_file(
        &dir,
        "catalog.txt",
        "<a.B: void m()> (NETWORK)\n",
    ));

    let lenient = Unifier::new().unify(&inputs).unwrap();
    assert_eq!(lenient.annotations[0].source_or_sink(), SourceOrSink::Unannotated);

    let strict = Unifier::with_config(UnifyConfig {
        strict_catalog_kind: true,
        ..UnifyConfig::default()
    });
    assert!(matches!(strict.unify(&inputs), Err(UnisinkError::Config(_))));
}

// =============================================================================
// Conflict Tests
// =============================================================================

#[test]
fn test_framework_scan_wins_open_file_input() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new()
        .with_framework_scan(write_file(
            &dir,
            "scan.txt",
            "FileInputStream android.content.ContextWrapper.openFileInput(String) - @DSSink({DSSinkKind.FILE})\n",
        ))
        .with_catalog(write_file(
            &dir,
            "CatSources.txt",
            "<android.content.ContextWrapper: java.io.FileInputStream openFileInput(java.lang.String)> (FILE_INFORMATION)\n",
        ));

    let result = Unifier::new().unify(&inputs).unwrap();

    assert_eq!(result.annotations.len(), 1);
    let merged = &result.annotations[0];
    assert_eq!(merged.origin(), Origin::FrameworkScan);
    assert_eq!(merged.source_or_sink(), SourceOrSink::Sink);
    assert_eq!(merged.returns(), "java.io.FileInputStream");

    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].field, ConflictField::SourceOrSink);
    assert_eq!(result.conflicts[0].winner().origin, Origin::FrameworkScan);
}

#[test]
fn test_framework_scan_wins_open_file_input_when_catalog_seen_first() {
    let method = "android.content.ContextWrapper.openFileInput";
    let catalog = Annotation::new(
        "",
        method,
        vec!["java.lang.String".to_string()],
        "java.io.FileInputStream",
        "FILE",
        Origin::Catalog,
        SourceOrSink::Source,
    );
    let scan = Annotation::new(
        "",
        method,
        vec!["String".to_string()],
        "FileInputStream",
        "FILE",
        Origin::FrameworkScan,
        SourceOrSink::Sink,
    );

    let resolution = Resolver::new().resolve(vec![catalog, scan]);

    assert_eq!(resolution.annotations[0].origin(), Origin::FrameworkScan);
    assert_eq!(resolution.annotations[0].source_or_sink(), SourceOrSink::Sink);
    assert_eq!(resolution.conflicts[0].outcome, Outcome::Overridden);
}

#[test]
fn test_conflict_display_names_both_claims() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new()
        .with_framework_scan(write_file(
            &dir,
            "scan.txt",
            "int a.B.m(int) - @DSSink({DSSinkKind.NETWORK})\n",
        ))
        .with_catalog(write_file(
            &dir,
            "CatSources.txt",
            "<a.B: int m(int)> (LOCATION_INFORMATION)\n",
        ));

    let result = Unifier::new().unify(&inputs).unwrap();
    let report = result.conflicts[0].to_string();

    assert!(report.contains("a.B.m(int)"));
    assert!(report.contains("sink (dsafe)"));
    assert!(report.contains("source (susi)"));
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_malformed_line_stops_the_batch() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new().with_catalog(write_file(
        &dir,
        "CatSinks.txt",
        "Category: NETWORK\n<a.B: void m()>\n",
    ));

    match Unifier::new().unify(&inputs) {
        Err(UnisinkError::Malformed {
            origin, location, ..
        }) => {
            assert_eq!(origin, Origin::Catalog);
            assert!(location.ends_with("CatSinks.txt:2"), "location was {location}");
        }
        other => panic!("expected malformed error, got {other:?}"),
    }
}

#[test]
fn test_malformed_permission_row_reports_file_line() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new()
        .with_framework_scan(write_file(&dir, "scan.txt", SCAN))
        .with_permission_map(write_file(
            &dir,
            "perm.csv",
            "void a.B.ok(),X\n\n\nbroken.sig(int),X\n",
        ));

    match Unifier::new().unify(&inputs) {
        Err(UnisinkError::Malformed {
            origin, location, ..
        }) => {
            assert_eq!(origin, Origin::PermissionMap);
            assert!(location.ends_with("perm.csv:4"), "location was {location}");
        }
        other => panic!("expected malformed error, got {other:?}"),
    }
}

#[test]
fn test_strict_fails_before_reading_any_file() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new()
        .with_framework_scan(dir.path().join("missing_scan.txt"))
        .with_catalog(dir.path().join("catalog.txt"));

    let strict = Unifier::with_config(UnifyConfig {
        strict_catalog_kind: true,
        ..UnifyConfig::default()
    });
    assert!(matches!(strict.unify(&inputs), Err(UnisinkError::Config(_))));
}

#[test]
fn test_missing_file() {
    let inputs = UnifyInputs::new().with_framework_scan("/nonexistent/scan.txt");
    assert!(matches!(
        Unifier::new().unify(&inputs),
        Err(UnisinkError::Io { .. })
    ));
}

#[test]
fn test_permission_map_alone_is_rejected() {
    let dir = TempDir::new().unwrap();
    let inputs = UnifyInputs::new().with_permission_map(write_file(&dir, "perm.csv", PERMISSION_MAP));
    assert!(matches!(
        Unifier::new().unify(&inputs),
        Err(UnisinkError::EmptyInput(_))
    ));
}

//! Release pipeline tests against a temporary project and a recording
//! version control double

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use launchpad::planner::stage;
use launchpad::{ReleasePlanner, ReleaseRequest};
use launchpad_core::config::{Config, ManifestTargetConfig};
use launchpad_core::error::{LaunchpadError, ManifestError, WorkflowError};
use launchpad_git::{RecordingVersionControl, VcsCall, VersionControl};
use launchpad_manifests::TargetStatus;
use launchpad_strategies::{BuildNumber, BumpDirective};

const PUBSPEC: &str = "name: acme_app
description: Acme mobile app

version: 1.4.2+17

environment:
  sdk: '>=3.0.0 <4.0.0'
";

const PACKAGE_JSON: &str = r#"{
  "name": "acme-app",
  "version": "1.4.2",
  "private": true
}
"#;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleShortVersionString</key>
	<string>1.4.2</string>
	<key>CFBundleVersion</key>
	<string>17</string>
</dict>
</plist>
"#;

const BUILD_GRADLE: &str = "android {
    defaultConfig {
        versionCode 17
        versionName \"1.4.2\"
    }
}
";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 16, 12, 30, 0).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("ios/Runner")).unwrap();
    fs::create_dir_all(root.join("android/app")).unwrap();
    fs::write(root.join("pubspec.yaml"), PUBSPEC).unwrap();
    fs::write(root.join("package.json"), PACKAGE_JSON).unwrap();
    fs::write(root.join("ios/Runner/Info.plist"), INFO_PLIST).unwrap();
    fs::write(root.join("android/app/build.gradle"), BUILD_GRADLE).unwrap();
    dir
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn snapshot(root: &Path) -> Vec<String> {
    [
        "pubspec.yaml",
        "package.json",
        "ios/Runner/Info.plist",
        "android/app/build.gradle",
    ]
    .iter()
    .map(|p| read(root, p))
    .collect()
}

fn stage_of(err: &LaunchpadError) -> &str {
    match err {
        LaunchpadError::Workflow(WorkflowError::StageFailed { stage, .. }) => stage,
        other => panic!("expected a stage failure, got {other}"),
    }
}

#[test]
fn test_bump_updates_every_manifest_and_commits() {
    let dir = project();
    let config = Config::default();
    let vcs = RecordingVersionControl::new();

    let plan = ReleasePlanner::new(&config, dir.path())
        .with_time(now())
        .execute(&ReleaseRequest::new(BumpDirective::Minor), Some(&vcs as &dyn VersionControl))
        .unwrap();

    assert_eq!(plan.previous_version.to_string(), "1.4.2");
    assert_eq!(plan.version.to_string(), "1.5.0");
    assert_eq!(plan.build_number, BuildNumber::new(18));
    assert!(plan.outcomes.iter().all(|o| o.status == TargetStatus::Updated));

    let root = dir.path();
    assert!(read(root, "pubspec.yaml").contains("version: 1.5.0+18\n"));
    assert!(read(root, "package.json").contains("\"version\": \"1.5.0\""));
    assert!(read(root, "ios/Runner/Info.plist").contains("<string>18</string>"));
    assert!(read(root, "android/app/build.gradle").contains("versionCode 18\n"));
    assert!(read(root, "android/app/build.gradle").contains("versionName \"1.5.0\""));

    let calls = vcs.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        VcsCall::Commit { paths, message } => {
            assert_eq!(paths.len(), 4);
            assert_eq!(message, "chore(release): bump version to 1.5.0+18");
        }
        other => panic!("unexpected call {other:?}"),
    }
    assert!(plan.commit.is_some());
    assert!(plan.tag.is_none());
    assert!(!plan.pushed);
}

#[test]
fn test_second_run_with_same_version_is_idempotent() {
    let dir = project();
    let mut config = Config::default();
    config.git.commit = false;
    let request = ReleaseRequest::new(BumpDirective::Explicit("2.0.0".to_string())).with_build(40u64);
    let planner = ReleasePlanner::new(&config, dir.path());

    planner.execute(&request, None).unwrap();
    let first = snapshot(dir.path());

    let plan = planner.execute(&request, None).unwrap();
    assert!(plan.outcomes.iter().all(|o| o.status == TargetStatus::Unchanged));
    assert_eq!(snapshot(dir.path()), first);
}

#[test]
fn test_timestamp_build_is_rejected_by_gradle_only() {
    let dir = project();
    let mut config = Config::default();
    config.versioning.build_strategy = launchpad_core::BuildStrategy::Timestamp;
    config.git.commit = false;

    let plan = ReleasePlanner::new(&config, dir.path())
        .with_time(now())
        .execute(&ReleaseRequest::new(BumpDirective::Patch), None)
        .unwrap();

    assert_eq!(plan.build_number, BuildNumber::new(202410161230));
    let gradle = &plan.outcomes[3];
    assert_eq!(gradle.path, dir.path().join("android/app/build.gradle"));
    match &gradle.status {
        TargetStatus::Failed(message) => assert!(message.contains("versionCode 202410161230")),
        other => panic!("expected gradle to fail, got {other}"),
    }
    assert_eq!(read(dir.path(), "android/app/build.gradle"), BUILD_GRADLE);

    assert!(plan.outcomes[..3].iter().all(|o| o.status == TargetStatus::Updated));
    assert!(read(dir.path(), "pubspec.yaml").contains("version: 1.4.3+202410161230\n"));
}

#[test]
fn test_tag_and_push_follow_commit() {
    let dir = project();
    let mut config = Config::default();
    config.git.tag = true;
    config.git.push = true;
    let vcs = RecordingVersionControl::new();

    let plan = ReleasePlanner::new(&config, dir.path())
        .execute(
            &ReleaseRequest::new(BumpDirective::Major).with_build(18u64),
            Some(&vcs as &dyn VersionControl),
        )
        .unwrap();

    assert_eq!(plan.tag.as_deref(), Some("v2.0.0"));
    assert!(plan.pushed);

    let calls = vcs.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], VcsCall::Commit { .. }));
    assert_eq!(
        calls[1],
        VcsCall::Tag {
            name: "v2.0.0".to_string(),
            message: "Release 2.0.0".to_string(),
        }
    );
    assert_eq!(
        calls[2],
        VcsCall::Push {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            tag: Some("v2.0.0".to_string()),
        }
    );
}

#[test]
fn test_optional_target_fault_does_not_stop_release() {
    let dir = project();
    fs::write(dir.path().join("package.json"), "{ \"version\": ").unwrap();
    let config = Config::default();
    let vcs = RecordingVersionControl::new();

    let plan = ReleasePlanner::new(&config, dir.path())
        .execute(
            &ReleaseRequest::new(BumpDirective::Patch).with_build(18u64),
            Some(&vcs as &dyn VersionControl),
        )
        .unwrap();

    assert!(matches!(plan.outcomes[1].status, TargetStatus::Failed(_)));
    assert_eq!(plan.outcomes[2].status, TargetStatus::Updated);
    assert_eq!(plan.touched_paths().len(), 3);
    assert!(!plan
        .touched_paths()
        .contains(&dir.path().join("package.json")));
}

#[test]
fn test_required_target_fault_stops_before_git() {
    let dir = project();
    let mut config = Config::default();
    config.manifests.targets = vec![
        ManifestTargetConfig::new("package.json"),
        ManifestTargetConfig::new("ios/Runner/Info.plist").required(),
        ManifestTargetConfig::new("android/app/build.gradle"),
    ];
    fs::write(dir.path().join("ios/Runner/Info.plist"), "<plist><dict>").unwrap();
    let vcs = RecordingVersionControl::new();

    let err = ReleasePlanner::new(&config, dir.path())
        .execute(
            &ReleaseRequest::new(BumpDirective::Patch).with_build(18u64),
            Some(&vcs as &dyn VersionControl),
        )
        .unwrap_err();

    assert_eq!(stage_of(&err), stage::SYNC_MANIFESTS);
    assert!(matches!(
        err.root(),
        LaunchpadError::Manifest(ManifestError::RequiredTargetFailed { .. })
    ));
    assert!(vcs.calls().is_empty());

    // Completed writes stay, later targets are untouched
    assert!(read(dir.path(), "package.json").contains("\"version\": \"1.4.3\""));
    assert_eq!(read(dir.path(), "android/app/build.gradle"), BUILD_GRADLE);
}

#[test]
fn test_push_failure_reports_push_stage() {
    let dir = project();
    let mut config = Config::default();
    config.git.push = true;
    let vcs = RecordingVersionControl::failing_push();

    let err = ReleasePlanner::new(&config, dir.path())
        .execute(
            &ReleaseRequest::new(BumpDirective::Patch).with_build(18u64),
            Some(&vcs as &dyn VersionControl),
        )
        .unwrap_err();

    assert_eq!(stage_of(&err), stage::PUSH);
    assert!(err.to_string().starts_with("push failed"));
    // Local mutations are not rolled back
    assert!(read(dir.path(), "pubspec.yaml").contains("version: 1.4.3+18"));
}

#[test]
fn test_git_steps_need_a_repository() {
    let dir = project();
    let config = Config::default();

    let err = ReleasePlanner::new(&config, dir.path())
        .execute(&ReleaseRequest::new(BumpDirective::Patch), None)
        .unwrap_err();
    assert_eq!(stage_of(&err), stage::COMMIT);
}

#[test]
fn test_falls_back_to_second_source() {
    let dir = project();
    fs::remove_file(dir.path().join("pubspec.yaml")).unwrap();
    let mut config = Config::default();
    config.git.commit = false;

    let plan = ReleasePlanner::new(&config, dir.path())
        .with_time(now())
        .execute(&ReleaseRequest::new(BumpDirective::Patch), None)
        .unwrap();

    assert_eq!(plan.source, dir.path().join("package.json"));
    assert_eq!(plan.outcomes[0].status, TargetStatus::Absent);
    assert_eq!(plan.version.to_string(), "1.4.3");
    assert_eq!(plan.outcomes[0].path, dir.path().join("pubspec.yaml"));
}

#[test]
fn test_no_source_is_a_resolve_failure() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();

    let err = ReleasePlanner::new(&config, dir.path())
        .plan(&ReleaseRequest::new(BumpDirective::Patch))
        .unwrap_err();
    assert_eq!(stage_of(&err), stage::RESOLVE_VERSION);
    assert!(snapshot_is_empty(dir.path()));
}

fn snapshot_is_empty(root: &Path) -> bool {
    fs::read_dir(root).unwrap().next().is_none()
}

//! Scenario: Nested watchers share one target
//!
//! Journey: A project watches `styles` and, separately, `styles/components`.
//!
//! Steps:
//! 1. Both watchers start; the outer one skips the inner one's subtree
//! 2. The inner watcher is removed; the outer one takes its files over
//! 3. The inner watcher comes back; the files move back
//!
//! Success Criteria:
//! - Each partial is imported by exactly one region
//! - Removing a watcher resyncs the watchers that were excluding it

use std::fs;
use std::path::Path;

use scssync::application::Cleanup;
use scssync::infrastructure::fs::LocalFs;
use scssync::infrastructure::observer::NoopObserver;
use scssync::{WatcherRegistry, WatcherSpec};
use tempfile::tempdir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn specs(root: &Path) -> Vec<(String, WatcherSpec)> {
    vec![
        (
            "styles".to_string(),
            WatcherSpec::new(root, "styles", "main.scss").unwrap(),
        ),
        (
            "components".to_string(),
            WatcherSpec::new(root, "styles/components", "main.scss")
                .unwrap()
                .with_insertion_line(100),
        ),
    ]
}

fn project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.scss"), "").unwrap();
    touch(dir.path(), "styles/_base.scss");
    touch(dir.path(), "styles/components/_button.scss");
    touch(dir.path(), "styles/components/cards/_card.scss");
    dir
}

/// SCENARIO: Parent skips the nested watcher's subtree
#[test]
fn scenario_nested_watcher_is_excluded_from_parent() {
    let dir = project();
    let mut registry = WatcherRegistry::new(LocalFs::new(), NoopObserver);

    registry.add_all(specs(dir.path())).unwrap();

    insta::assert_snapshot!(fs::read_to_string(dir.path().join("main.scss")).unwrap(), @r#"
    /* styles import start */
    @import "base";
    /* styles import end */
    /* components import start */
    @import "button";
    /* cards */
    @import "cards/card";
    /* components import end */
    "#);
}

/// SCENARIO: Removing the nested watcher hands its files to the parent
#[test]
fn scenario_removing_nested_watcher_resyncs_parent() {
    let dir = project();
    let mut registry = WatcherRegistry::new(LocalFs::new(), NoopObserver);
    registry.add_all(specs(dir.path())).unwrap();

    let reports = registry.remove("components", Cleanup::DeleteBody).unwrap();

    let names: Vec<&str> = reports.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["styles"]);
    insta::assert_snapshot!(fs::read_to_string(dir.path().join("main.scss")).unwrap(), @r#"
    /* styles import start */
    @import "base";
    /* components */
    @import "components/button";
    @import "components/cards/card";
    /* styles import end */
    "#);
}

/// SCENARIO: Adding the nested watcher back takes its files away again
#[test]
fn scenario_readding_nested_watcher_moves_imports_back() {
    let dir = project();
    let mut registry = WatcherRegistry::new(LocalFs::new(), NoopObserver);
    registry.add_all(specs(dir.path())).unwrap();
    registry.remove("components", Cleanup::DeleteBody).unwrap();

    let (name, spec) = specs(dir.path()).pop().unwrap();
    registry.add(&name, spec).unwrap();

    let target = fs::read_to_string(dir.path().join("main.scss")).unwrap();
    assert_eq!(target.matches("@import \"base\";").count(), 1);
    assert_eq!(target.matches("button\";").count(), 1);
    assert!(!target.contains("components/button"));
    assert_eq!(registry.list("styles").unwrap().len(), 1);
}

/// SCENARIO: Siblings with a common prefix do not exclude each other
#[test]
fn scenario_prefix_siblings_are_independent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.scss"), "").unwrap();
    touch(dir.path(), "styles/_a.scss");
    touch(dir.path(), "styles-legacy/_old.scss");
    let mut registry = WatcherRegistry::new(LocalFs::new(), NoopObserver);

    registry
        .add_all(vec![
            (
                "styles".to_string(),
                WatcherSpec::new(dir.path(), "styles", "main.scss").unwrap(),
            ),
            (
                "legacy".to_string(),
                WatcherSpec::new(dir.path(), "styles-legacy", "main.scss").unwrap(),
            ),
        ])
        .unwrap();

    assert_eq!(registry.list("styles").unwrap().len(), 1);
    assert_eq!(registry.list("legacy").unwrap().len(), 1);
}

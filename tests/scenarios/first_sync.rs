//! Scenario: First sync into a hand-written stylesheet
//!
//! Journey: User adds scssync to a project whose main.scss already exists.
//!
//! Steps:
//! 1. User writes scssync.json with an insertion line
//! 2. User runs sync; the region is seeded at that line
//! 3. User edits around the region and adds partials
//! 4. User syncs again; the region is updated in place
//!
//! Success Criteria:
//! - Text outside the region is never touched
//! - The region stays where the user moved it

use crate::common::*;

const CONFIG_AT_LINE_2: &str = r#"{
  "rootDir": ".",
  "targetFile": "main.scss",
  "watchers": {
    "styles": { "watchDir": "styles", "insertionLine": 2 }
  }
}"#;

/// SCENARIO: Region is seeded at the configured line
#[test]
fn scenario_region_seeded_at_insertion_line() {
    let env = TestEnv::builder()
        .with_config(CONFIG_AT_LINE_2)
        .with_target(HAND_WRITTEN)
        .with_partial("styles/_reset.scss")
        .with_partial("styles/layout/_grid.scss")
        .build();

    let result = env.run(&["sync"]);

    assert!(result.success, "Sync failed: {}", result.combined_output());
    insta::assert_snapshot!(env.read(TARGET), @r#"
    @use "sass:math";
    /* styles import start */
    @import "reset";
    /* layout */
    @import "layout/grid";
    /* styles import end */

    body {
      margin: 0;
    }
    "#);
}

/// SCENARIO: A moved region is reused, not re-seeded
#[test]
fn scenario_moved_region_is_updated_in_place() {
    let env = TestEnv::builder()
        .with_config(CONFIG_AT_LINE_2)
        .with_partial("styles/_reset.scss")
        .with_target(
            "\
@use \"sass:math\";

body {
  margin: 0;
}

/* styles import start */
@import \"stale\";
/* styles import end */
",
        )
        .build();
    env.write("styles/_buttons.scss", "");

    let result = env.run(&["sync"]);

    assert!(result.success, "Sync failed: {}", result.combined_output());
    insta::assert_snapshot!(env.read(TARGET), @r#"
    @use "sass:math";

    body {
      margin: 0;
    }

    /* styles import start */
    @import "buttons";
    @import "reset";
    /* styles import end */
    "#);
    assert!(result.stdout.contains("replaced"));
}

/// SCENARIO: Non-partials and the target itself are never imported
#[test]
fn scenario_only_partials_are_imported() {
    let env = TestEnv::builder()
        .with_config(
            r#"{"rootDir": ".", "targetFile": "main.scss",
                "watchers": {"root": {"watchDir": ".", "ownerId": "root"}}}"#,
        )
        .with_partial("_vars.scss")
        .with_partial("print.scss")
        .with_file("notes.md", "# notes")
        .build();

    let result = env.run(&["sync"]);

    assert!(result.success, "Sync failed: {}", result.combined_output());
    assert_eq!(
        env.read(TARGET),
        "/* root import start */\n@import \"vars\";\n/* root import end */\n"
    );
}

/// SCENARIO: filePolicy "all" imports plain files and index files
#[test]
fn scenario_file_policy_all() {
    let env = TestEnv::builder()
        .with_config(
            r#"{"rootDir": ".", "targetFile": "main.scss",
                "watchers": {"styles": {"watchDir": "styles", "filePolicy": "all",
                                        "groupHeadings": false}}}"#,
        )
        .with_partial("styles/print.scss")
        .with_partial("styles/forms/index.scss")
        .with_partial("styles/forms/_input.scss")
        .build();

    let result = env.run(&["list", "styles"]);

    assert!(result.success, "List failed: {}", result.combined_output());
    let ids: Vec<&str> = result.stdout.lines().skip(1).map(str::trim).collect();
    assert_eq!(ids, vec!["print", "forms", "forms/input"]);
}

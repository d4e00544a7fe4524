//! Scenario: Taking scssync out and putting it back
//!
//! Journey: User removes the generated region, keeps editing, then
//! re-enables scssync.
//!
//! Steps:
//! 1. User syncs, then cleans with --keep-body
//! 2. The imports stay behind as plain lines
//! 3. User syncs again; the imports now appear twice
//! 4. User runs rehome; the floating copies go away
//!
//! Success Criteria:
//! - Nothing outside a region is deleted implicitly
//! - rehome leaves each import exactly once, inside the region

use crate::common::*;

const CRLF_TARGET: &str = "@use \"sass:math\";\r\n\r\nbody {\r\n  margin: 0;\r\n}\r\n";

/// SCENARIO: sync then clean restores the file byte for byte
#[test]
fn scenario_clean_round_trips_crlf_file() {
    let env = TestEnv::builder()
        .with_config(SINGLE_WATCHER)
        .with_target(CRLF_TARGET)
        .with_partial("styles/_a.scss")
        .build();

    assert!(env.run(&["sync"]).success);
    let synced = env.read(TARGET);
    assert!(synced.starts_with("/* styles import start */\r\n@import \"a\";\r\n"));

    let result = env.run(&["clean"]);

    assert!(result.success, "Clean failed: {}", result.combined_output());
    assert_eq!(env.read(TARGET), CRLF_TARGET);
}

/// SCENARIO: floating imports are duplicated until rehomed
#[test]
fn scenario_floating_imports_need_rehome() {
    let env = TestEnv::builder()
        .with_config(SINGLE_WATCHER)
        .with_target(HAND_WRITTEN)
        .with_partial("styles/_a.scss")
        .with_partial("styles/_b.scss")
        .build();
    assert!(env.run(&["sync"]).success);
    assert!(env.run(&["clean", "--keep-body"]).success);

    // Re-enabling does not touch the floating copies
    assert!(env.run(&["sync"]).success);
    let duplicated = env.read(TARGET);
    assert_eq!(duplicated.matches("@import \"a\";").count(), 2);

    let result = env.run(&["rehome", "styles", "--json"]);

    assert!(result.success, "Rehome failed: {}", result.combined_output());
    let events = result.events_named("rehomed");
    assert_eq!(events[0]["removed"], 2);
    assert_eq!(events[0]["imports"], 2);
    insta::assert_snapshot!(env.read(TARGET), @r#"
    /* styles import start */
    @import "a";
    @import "b";
    /* styles import end */
    @use "sass:math";

    body {
      margin: 0;
    }
    "#);
}

/// SCENARIO: imports outside the watcher's ids survive rehome
#[test]
fn scenario_rehome_keeps_unrelated_imports() {
    let env = TestEnv::builder()
        .with_config(SINGLE_WATCHER)
        .with_target("@import \"vendor/normalize\";\n@import \"a\";\n")
        .with_partial("styles/_a.scss")
        .build();

    let result = env.run(&["rehome", "styles"]);

    assert!(result.success, "Rehome failed: {}", result.combined_output());
    assert_eq!(
        env.read(TARGET),
        "/* styles import start */\n@import \"a\";\n/* styles import end */\n@import \"vendor/normalize\";\n"
    );
}

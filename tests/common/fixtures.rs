//! Reusable fixtures.

/// Target file every fixture config points at
pub const TARGET: &str = "main.scss";

/// One watcher on `styles`, region seeded at the top
pub const SINGLE_WATCHER: &str = r#"{
  "rootDir": ".",
  "targetFile": "main.scss",
  "watchers": {
    "styles": { "watchDir": "styles" }
  }
}"#;

/// `styles` with `styles/components` nested inside it
pub const NESTED_WATCHERS: &str = r#"{
  "rootDir": ".",
  "targetFile": "main.scss",
  "watchers": {
    "styles": { "watchDir": "styles" },
    "components": { "watchDir": "styles/components", "insertionLine": 3 }
  }
}"#;

/// A config whose watcher points at a target that does not exist
pub const MISSING_TARGET: &str = r#"{
  "rootDir": ".",
  "targetFile": "absent.scss",
  "watchers": {
    "styles": { "watchDir": "styles" }
  }
}"#;

/// Hand-written stylesheet the region gets seeded into
pub const HAND_WRITTEN: &str = "\
@use \"sass:math\";

body {
  margin: 0;
}
";

//! Configuration loading and persistence

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::path;
use crate::error::{ScssyncError, ScssyncResult};
use crate::infrastructure::fs::atomic_write;

pub use crate::domain::value_objects::ConfigWarning;

use super::types::ProjectConfig;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "scssync.json";

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SCSSYNC_CONFIG";

/// Environment variable overriding `debounceMs`
pub const DEBOUNCE_ENV: &str = "SCSSYNC_DEBOUNCE_MS";

/// Where the configuration lives: `--config`, then `SCSSYNC_CONFIG`, then
/// `./scssync.json`.
pub fn resolve_path(cli: Option<&Path>) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(CONFIG_FILE),
    }
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> ScssyncResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| ScssyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(&content);

    let mut config: ProjectConfig = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ScssyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    deserializer.end().map_err(|e| ScssyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.source = path.to_path_buf();
    if config.root_dir.is_relative() {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let base = if base.is_absolute() {
            base.to_path_buf()
        } else {
            std::env::current_dir()?.join(base)
        };
        config.root_dir = path::normalize(&base.join(&config.root_dir));
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let last = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                suggestion: suggest_key(&last),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply `SCSSYNC_*` environment overrides
pub fn with_env_overrides(config: ProjectConfig) -> ProjectConfig {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_overrides<L>(mut config: ProjectConfig, lookup: L) -> ProjectConfig
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(DEBOUNCE_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.debounce_ms = ms,
            Err(_) => tracing::warn!(
                variable = DEBOUNCE_ENV,
                value = %raw,
                "ignoring non-numeric debounce override"
            ),
        }
    }
    config
}

/// Write `config` as pretty JSON, replacing the file atomically
pub fn save(config: &ProjectConfig, path: &Path) -> ScssyncResult<()> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    atomic_write(path, json.as_bytes())?;
    Ok(())
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "rootDir",
        "targetFile",
        "debounceMs",
        "allowNestedTarget",
        "watchers",
        "watchDir",
        "insertionLine",
        "ownerId",
        "excludeSubtrees",
        "importBase",
        "filePolicy",
        "groupHeadings",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(&unknown.to_lowercase(), &candidate.to_lowercase());
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

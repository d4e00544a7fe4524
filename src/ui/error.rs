use std::path::Path;

use scssync::ScssyncError;

use crate::ui::ci::{github_actions_annotation, in_github_actions, AnnotationLevel};
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::terminal::detect_capabilities;

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let icon = Icon::Error.colored(supports_color, supports_unicode);
    let message = ColoredText::error(err.to_string())
        .bold()
        .render(supports_color);
    let mut out = format!("{} {}\n", icon, message);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    if let Some(hint) = err.downcast_ref::<ScssyncError>().and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim(hint).render(supports_color)
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let event = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        let _ = crate::ui::json::write_event(&mut std::io::stdout().lock(), &event);
        return;
    }

    if in_github_actions() {
        let file = err
            .downcast_ref::<ScssyncError>()
            .and_then(error_file)
            .map(|p| p.to_string_lossy().to_string());
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &err.to_string(),
                file.as_deref(),
                None
            )
        );
    }

    let caps = detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color && !caps.is_ci, caps.supports_unicode)
    );
}

fn hint(err: &ScssyncError) -> Option<&'static str> {
    match err {
        ScssyncError::InvalidConfig { .. } => {
            Some("Check scssync.json, or point --config / SCSSYNC_CONFIG at another file.")
        }
        ScssyncError::TargetNotFound { .. } => {
            Some("Create the target stylesheet first; scssync never creates it.")
        }
        ScssyncError::TargetInSubfolder { .. } => {
            Some("Set \"allowNestedTarget\": true to allow targets below rootDir.")
        }
        ScssyncError::DuplicateOwner { .. } => {
            Some("Give one of the watchers a distinct \"ownerId\".")
        }
        ScssyncError::UnknownWatcher { .. } => Some("Run `scssync list` to see configured watchers."),
        _ => None,
    }
}

fn error_file(err: &ScssyncError) -> Option<&Path> {
    match err {
        ScssyncError::InvalidConfig { file, .. } => Some(file.as_path()),
        ScssyncError::TargetNotFound { path }
        | ScssyncError::TargetNotAFile { path }
        | ScssyncError::TargetOutsideRoot { path, .. }
        | ScssyncError::TargetInSubfolder { path, .. } => Some(path.as_path()),
        _ => None,
    }
}

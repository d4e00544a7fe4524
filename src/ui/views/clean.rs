use scssync::domain::services::RegionAction;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_clean_result(
    watcher: &str,
    action: RegionAction,
    keep_body: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (icon, detail) = match action {
        RegionAction::Removed if keep_body => (Icon::Clean, "markers removed, imports kept"),
        RegionAction::Removed => (Icon::Clean, "region removed"),
        _ => (Icon::Pending, "no region found"),
    };
    format!(
        "{} {} {}\n",
        icon.colored(supports_color, supports_unicode),
        ColoredText::info(watcher).bold().render(supports_color),
        ColoredText::dim(detail).render(supports_color)
    )
}

use scssync::ImportId;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Ids currently inside a watcher's region, in file order
pub fn render_import_list(
    watcher: &str,
    owner: &str,
    ids: &[ImportId],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {} {}\n",
        Icon::List.colored(supports_color, supports_unicode),
        ColoredText::info(watcher).bold().render(supports_color),
        ColoredText::dim(format!("(owner {}, {} imports)", owner, ids.len()))
            .render(supports_color)
    );
    if ids.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            ColoredText::dim("no generated region").render(supports_color)
        ));
    }
    for id in ids {
        out.push_str(&format!("  {}\n", id));
    }
    out
}

use crossterm::style::Stylize;
use similar::{ChangeTag, TextDiff};

use crate::ui::theme;

/// Lines of unchanged context around each hunk
const CONTEXT_LINES: usize = 2;

/// Unified diff of `old` to `new`, hunks only, with old/new line numbers.
pub fn render_unified_diff_with_line_numbers(
    path: &str,
    old: &str,
    new: &str,
    supports_color: bool,
) -> String {
    let diff = TextDiff::from_lines(old, new);
    let width = old.lines().count().max(new.lines().count()).max(1).to_string().len();

    let mut out = String::new();
    push_line(&mut out, &format!("--- a/{}", path), LineStyle::Header, supports_color);
    push_line(&mut out, &format!("+++ b/{}", path), LineStyle::Header, supports_color);

    for (idx, group) in diff.grouped_ops(CONTEXT_LINES).iter().enumerate() {
        if idx > 0 {
            push_line(&mut out, "...", LineStyle::Header, supports_color);
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (old_no, new_no, sign) = match change.tag() {
                    ChangeTag::Delete => (change.old_index(), None, "-"),
                    ChangeTag::Insert => (None, change.new_index(), "+"),
                    ChangeTag::Equal => (change.old_index(), change.new_index(), " "),
                };
                let column = |n: Option<usize>| match n {
                    Some(i) => format!("{:>width$}", i + 1),
                    None => " ".repeat(width),
                };
                let value = change.value().trim_end_matches(['\r', '\n']);
                let line = format!("{} {} {sign} {value}", column(old_no), column(new_no));
                push_line(&mut out, &line, LineStyle::Body(change.tag()), supports_color);
            }
        }
    }

    out
}

#[derive(Debug, Clone, Copy)]
enum LineStyle {
    Header,
    Body(ChangeTag),
}

fn push_line(out: &mut String, s: &str, style: LineStyle, supports_color: bool) {
    if supports_color {
        let color = match style {
            LineStyle::Header => theme::colors::INFO,
            LineStyle::Body(ChangeTag::Delete) => theme::colors::ERROR,
            LineStyle::Body(ChangeTag::Insert) => theme::colors::SUCCESS,
            LineStyle::Body(ChangeTag::Equal) => theme::colors::DIM,
        };
        out.push_str(&format!("{}", s.with(color)));
    } else {
        out.push_str(s);
    }
    out.push('\n');
}

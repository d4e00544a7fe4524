//! Marker-scoped region rewriting
//!
//! A region is the run of lines between one owner's start and end marker.
//! Everything here is line-oriented: markers are found by scanning lines
//! top to bottom, never by a regex spanning the whole file, so body content
//! that looks like another owner's markers is passed through untouched.
//!
//! All operations are pure `&str -> String` transforms. Reading and writing
//! the target file is the caller's job.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use crate::domain::value_objects::{parse_marker_line, ImportId, MarkerKind, OwnerId};

/// Blank lines allowed in a row after normalization
const MAX_BLANK_RUN: usize = 2;

/// Line indices (0-based) of a located marker pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Lines strictly between the markers
    pub fn body(&self) -> Range<usize> {
        self.start + 1..self.end
    }
}

/// A marker pair that cannot be used as a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerFault {
    /// Start marker on this (1-indexed) line, no end marker after it
    StartWithoutEnd { line: usize },
    /// End marker on this (1-indexed) line, no start marker before it
    EndWithoutStart { line: usize },
}

impl MarkerFault {
    /// 1-indexed line of the lone marker
    pub fn line(&self) -> usize {
        match self {
            MarkerFault::StartWithoutEnd { line } | MarkerFault::EndWithoutStart { line } => *line,
        }
    }
}

impl fmt::Display for MarkerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerFault::StartWithoutEnd { line } => {
                write!(f, "start marker on line {} has no matching end marker", line)
            }
            MarkerFault::EndWithoutStart { line } => {
                write!(f, "end marker on line {} has no start marker before it", line)
            }
        }
    }
}

/// Result of looking for an owner's region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located {
    Found(Span),
    Missing,
    /// Only half a pair exists; callers treat this like `Missing`
    Malformed(MarkerFault),
}

/// What a rewrite did to the owner's region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionAction {
    /// Existing body replaced
    Replaced,
    /// No usable region existed, a new one was inserted
    Inserted,
    /// Markers (and maybe the body) deleted
    Removed,
    /// Nothing to remove
    Untouched,
}

/// Rewritten text plus what happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub action: RegionAction,
    /// Set when malformed markers were found and left in place
    pub fault: Option<MarkerFault>,
}

/// One line of a document and the terminator that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    /// `"\n"` or `"\r\n"`; on an unterminated last line this is only used
    /// once something is appended after it
    eol: &'static str,
}

/// A text file split into lines, remembering how to put it back together
///
/// Every line keeps its own terminator, so a file mixing LF and CRLF comes
/// back byte-identical outside the lines that were actually rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    /// Terminator for new lines with no neighbour to copy from
    newline: &'static str,
    trailing_newline: bool,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self {
                lines: Vec::new(),
                newline: "\n",
                trailing_newline: false,
            };
        }

        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let pieces: Vec<&str> = body.split('\n').collect();
        let last = pieces.len() - 1;

        let newline = match pieces.first() {
            Some(first) if (last > 0 || trailing_newline) && first.ends_with('\r') => "\r\n",
            _ => "\n",
        };

        let lines = pieces
            .into_iter()
            .enumerate()
            .map(|(idx, piece)| {
                let terminated = idx < last || trailing_newline;
                match piece.strip_suffix('\r') {
                    Some(text) if terminated => Line {
                        text: text.to_string(),
                        eol: "\r\n",
                    },
                    _ => Line {
                        text: piece.to_string(),
                        eol: if terminated { "\n" } else { newline },
                    },
                }
            })
            .collect();

        Self {
            lines,
            newline,
            trailing_newline,
        }
    }

    /// Join the lines back; a document with no lines is an empty file.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let last = self.lines.len().saturating_sub(1);
        for (idx, line) in self.lines.iter().enumerate() {
            out.push_str(&line.text);
            if idx < last || self.trailing_newline {
                out.push_str(line.eol);
            }
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace `range` with `texts`, each terminated with `eol`.
    fn splice(
        &mut self,
        range: Range<usize>,
        texts: impl IntoIterator<Item = String>,
        eol: &'static str,
    ) {
        self.lines
            .splice(range, texts.into_iter().map(|text| Line { text, eol }));
    }

    /// Terminator of the line before `at`, for lines inserted there
    fn eol_before(&self, at: usize) -> &'static str {
        at.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(|line| line.eol)
            .unwrap_or(self.newline)
    }

    /// Collapse every run of more than two blank lines down to two.
    fn collapse_blank_runs(&mut self) {
        let mut run = 0;
        self.lines.retain(|line| {
            if line.text.trim().is_empty() {
                run += 1;
                run <= MAX_BLANK_RUN
            } else {
                run = 0;
                true
            }
        });
    }
}

/// Find `owner`'s region in `text`.
pub fn locate(text: &str, owner: &OwnerId) -> Located {
    locate_lines(&Document::parse(text).lines, owner)
}

/// First start/end pair, scanning top to bottom. A start marker that sees
/// another start before any end is a lone half and the later one wins.
fn locate_lines(lines: &[Line], owner: &OwnerId) -> Located {
    let start_marker = owner.start_marker();
    let end_marker = owner.end_marker();

    let mut open: Option<usize> = None;
    let mut stray_end: Option<usize> = None;
    for (idx, line) in lines.iter().enumerate() {
        if line.text.contains(&start_marker) {
            open = Some(idx);
        } else if line.text.contains(&end_marker) {
            match open {
                Some(start) => return Located::Found(Span { start, end: idx }),
                None => {
                    stray_end.get_or_insert(idx);
                }
            }
        }
    }

    match (open, stray_end) {
        (Some(start), _) => Located::Malformed(MarkerFault::StartWithoutEnd { line: start + 1 }),
        (None, Some(end)) => Located::Malformed(MarkerFault::EndWithoutStart { line: end + 1 }),
        (None, None) => Located::Missing,
    }
}

/// Push an insertion index out of any other owner's well-formed region.
///
/// Inserting between another region's markers would make its next sync
/// replace our block as part of its body.
fn outside_foreign_regions(lines: &[Line], owner: &OwnerId, mut at: usize) -> usize {
    let others: BTreeSet<&str> = lines
        .iter()
        .filter_map(|line| match parse_marker_line(&line.text) {
            Some((MarkerKind::Start, other)) if other != owner.as_str() => Some(other),
            _ => None,
        })
        .collect();
    let spans: Vec<Span> = others
        .into_iter()
        .filter_map(|other| OwnerId::new(other).ok())
        .filter_map(|other| match locate_lines(lines, &other) {
            Located::Found(span) => Some(span),
            _ => None,
        })
        .collect();

    // Overlapping pairs can nest; `at` only moves forward so this settles.
    while let Some(end) = spans
        .iter()
        .find(|span| span.start < at && at <= span.end)
        .map(|span| span.end)
    {
        at = end + 1;
    }
    at
}

/// Body lines of `owner`'s region, if it has a well-formed one
pub fn region_body(text: &str, owner: &OwnerId) -> Option<Vec<String>> {
    let doc = Document::parse(text);
    match locate_lines(&doc.lines, owner) {
        Located::Found(span) => Some(
            doc.lines[span.body()]
                .iter()
                .map(|line| line.text.clone())
                .collect(),
        ),
        _ => None,
    }
}

/// Replace `owner`'s region body with `body`, or seed a new region.
///
/// A new region goes in at `insertion_line` (1-indexed, clamped to the
/// file), pushed below any other owner's region that line falls inside.
/// Malformed half-pairs are left where they are.
pub fn rewrite(text: &str, owner: &OwnerId, body: &[String], insertion_line: usize) -> Rewrite {
    let mut doc = Document::parse(text);

    let (action, fault) = match locate_lines(&doc.lines, owner) {
        Located::Found(span) => {
            let eol = doc.lines[span.start].eol;
            doc.splice(span.body(), body.iter().cloned(), eol);
            (RegionAction::Replaced, None)
        }
        located => {
            let fault = match located {
                Located::Malformed(fault) => Some(fault),
                _ => None,
            };
            if doc.is_empty() {
                doc.trailing_newline = true;
            }
            let at = insertion_line.saturating_sub(1).min(doc.lines.len());
            let at = outside_foreign_regions(&doc.lines, owner, at);
            let eol = doc.eol_before(at);
            let block = std::iter::once(owner.start_marker())
                .chain(body.iter().cloned())
                .chain(std::iter::once(owner.end_marker()));
            doc.splice(at..at, block, eol);
            (RegionAction::Inserted, fault)
        }
    };

    doc.collapse_blank_runs();
    Rewrite {
        text: doc.render(),
        action,
        fault,
    }
}

/// `rewrite`, returning only the new text
pub fn synchronize(text: &str, owner: &OwnerId, body: &[String], insertion_line: usize) -> String {
    rewrite(text, owner, body, insertion_line).text
}

/// Delete `owner`'s markers, and the body too when `delete_body` is set.
///
/// With `delete_body == false` the body stays exactly where it was as plain
/// "floating" lines.
pub fn remove_region(text: &str, owner: &OwnerId, delete_body: bool) -> Rewrite {
    let mut doc = Document::parse(text);

    let (action, fault) = match locate_lines(&doc.lines, owner) {
        Located::Found(span) => {
            if delete_body {
                doc.lines.drain(span.start..=span.end);
            } else {
                doc.lines.remove(span.end);
                doc.lines.remove(span.start);
            }
            (RegionAction::Removed, None)
        }
        Located::Missing => (RegionAction::Untouched, None),
        Located::Malformed(fault) => (RegionAction::Untouched, Some(fault)),
    };

    doc.collapse_blank_runs();
    Rewrite {
        text: doc.render(),
        action,
        fault,
    }
}

/// `remove_region`, returning only the new text
pub fn remove(text: &str, owner: &OwnerId, delete_body: bool) -> String {
    remove_region(text, owner, delete_body).text
}

/// Drop `@import` lines for `ids` that sit outside every marker region.
///
/// This is the explicit clean-up for floating imports left behind by
/// `remove(.., delete_body = false)`; nothing calls it implicitly. Returns
/// the new text and the number of lines removed.
pub fn strip_floating_imports(text: &str, ids: &BTreeSet<ImportId>) -> (String, usize) {
    let mut doc = Document::parse(text);
    let mut open_owner: Option<String> = None;
    let mut removed = 0;

    doc.lines.retain(|line| {
        match parse_marker_line(&line.text) {
            Some((MarkerKind::Start, owner)) if open_owner.is_none() => {
                open_owner = Some(owner.to_string());
                return true;
            }
            Some((MarkerKind::End, owner)) if open_owner.as_deref() == Some(owner) => {
                open_owner = None;
                return true;
            }
            _ => {}
        }
        if open_owner.is_some() {
            return true;
        }
        match ImportId::from_directive(&line.text) {
            Some(id) if ids.contains(&id) => {
                removed += 1;
                false
            }
            _ => true,
        }
    });

    if removed > 0 {
        doc.collapse_blank_runs();
        (doc.render(), removed)
    } else {
        (text.to_string(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    fn body(ids: &[&str]) -> Vec<String> {
        ids.iter()
            .map(|id| ImportId::new(*id).to_directive())
            .collect()
    }

    // === locate ===

    #[test]
    fn locate_finds_pair() {
        let text = "a\n/* x import start */\n@import \"old\";\n/* x import end */\nb\n";
        assert_eq!(
            locate(text, &owner("x")),
            Located::Found(Span { start: 1, end: 3 })
        );
    }

    #[test]
    fn locate_ignores_other_owners() {
        let text = "/* y import start */\n/* y import end */\n";
        assert_eq!(locate(text, &owner("x")), Located::Missing);
    }

    #[test]
    fn locate_does_not_confuse_owner_suffixes() {
        let text = "/* ax import start */\n/* ax import end */\n";
        assert_eq!(locate(text, &owner("x")), Located::Missing);
    }

    #[test]
    fn locate_reports_start_without_end() {
        let text = "top\n/* x import start */\n@import \"a\";\n";
        assert_eq!(
            locate(text, &owner("x")),
            Located::Malformed(MarkerFault::StartWithoutEnd { line: 2 })
        );
    }

    #[test]
    fn locate_reports_end_before_start() {
        let text = "/* x import end */\n@import \"a\";\n";
        assert_eq!(
            locate(text, &owner("x")),
            Located::Malformed(MarkerFault::EndWithoutStart { line: 1 })
        );
    }

    #[test]
    fn locate_prefers_the_start_closest_to_the_end() {
        let text = "/* x import start */\nstale\n/* x import start */\n/* x import end */\n";
        assert_eq!(
            locate(text, &owner("x")),
            Located::Found(Span { start: 2, end: 3 })
        );
    }

    // === synchronize ===

    #[test]
    fn fresh_insertion_into_empty_file() {
        let out = synchronize("", &owner("x"), &body(&["a", "b"]), 1);
        assert_eq!(
            out,
            "/* x import start */\n@import \"a\";\n@import \"b\";\n/* x import end */\n"
        );
    }

    #[test]
    fn marker_reuse_replaces_body_only() {
        let text = "// head\n/* x import start */\n@import \"old\";\n/* x import end */\n.foo { color: red; }\n";
        let out = synchronize(text, &owner("x"), &body(&["new"]), 1);
        assert_eq!(
            out,
            "// head\n/* x import start */\n@import \"new\";\n/* x import end */\n.foo { color: red; }\n"
        );
    }

    #[test]
    fn insertion_line_is_clamped() {
        let text = "one\ntwo\n";
        let out = synchronize(text, &owner("x"), &body(&["a"]), 99);
        assert_eq!(
            out,
            "one\ntwo\n/* x import start */\n@import \"a\";\n/* x import end */\n"
        );

        let out = synchronize(text, &owner("x"), &body(&["a"]), 0);
        assert!(out.starts_with("/* x import start */\n"));
    }

    #[test]
    fn insertion_shifts_following_lines() {
        let text = "one\ntwo\nthree\n";
        let out = synchronize(text, &owner("x"), &body(&["a"]), 2);
        assert_eq!(
            out,
            "one\n/* x import start */\n@import \"a\";\n/* x import end */\ntwo\nthree\n"
        );
    }

    #[test]
    fn synchronize_is_idempotent() {
        let text = "body { margin: 0; }\n\n\n\n\n.a {}\n";
        let once = synchronize(text, &owner("x"), &body(&["a", "b/c"]), 2);
        let twice = synchronize(&once, &owner("x"), &body(&["a", "b/c"]), 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_body_keeps_markers() {
        let text = "/* x import start */\n@import \"gone\";\n/* x import end */\n";
        let out = synchronize(text, &owner("x"), &[], 1);
        assert_eq!(out, "/* x import start */\n/* x import end */\n");
    }

    #[test]
    fn synchronize_leaves_other_regions_alone() {
        let text = "\
/* y import start */
@import \"y1\";
/* x import start */
/* y import end */
keep me
/* x import start */
@import \"x-old\";
/* x import end */
trailer
";
        // The stray x start inside y's body belongs to y and goes with it.
        let out = rewrite(text, &owner("y"), &body(&["y2"]), 1);
        assert_eq!(out.action, RegionAction::Replaced);
        assert_eq!(
            out.text,
            "/* y import start */\n@import \"y2\";\n/* y import end */\nkeep me\n/* x import start */\n@import \"x-old\";\n/* x import end */\ntrailer\n"
        );
    }

    #[test]
    fn malformed_markers_are_left_in_place() {
        let text = "/* x import start */\n@import \"stale\";\n.rule {}\n";
        let out = rewrite(text, &owner("x"), &body(&["a"]), 4);
        assert_eq!(out.action, RegionAction::Inserted);
        assert_eq!(
            out.fault,
            Some(MarkerFault::StartWithoutEnd { line: 1 })
        );
        assert_eq!(
            out.text,
            "/* x import start */\n@import \"stale\";\n.rule {}\n/* x import start */\n@import \"a\";\n/* x import end */\n"
        );
    }

    #[test]
    fn lone_start_above_fresh_region_stays_stable() {
        let text = "/* x import start */\n@import \"stale\";\n.rule {}\n";
        let once = synchronize(text, &owner("x"), &body(&["a"]), 4);
        let twice = synchronize(&once, &owner("x"), &body(&["a"]), 4);
        assert_eq!(once, twice);
    }

    #[test]
    fn crlf_line_endings_are_preserved() {
        let text = "a\r\n/* x import start */\r\n/* x import end */\r\nb\r\n";
        let out = synchronize(text, &owner("x"), &body(&["n"]), 1);
        assert_eq!(
            out,
            "a\r\n/* x import start */\r\n@import \"n\";\r\n/* x import end */\r\nb\r\n"
        );
    }

    #[test]
    fn mixed_line_endings_outside_the_region_are_kept() {
        let text = "a\r\nb\nc\n/* x import start */\n/* x import end */\n";
        let out = synchronize(text, &owner("x"), &body(&["n"]), 1);
        assert_eq!(
            out,
            "a\r\nb\nc\n/* x import start */\n@import \"n\";\n/* x import end */\n"
        );
    }

    #[test]
    fn fresh_region_copies_the_line_ending_above_it() {
        let text = "a\r\nb\nc\n";
        let out = synchronize(text, &owner("x"), &body(&["n"]), 2);
        assert_eq!(
            out,
            "a\r\n/* x import start */\r\n@import \"n\";\r\n/* x import end */\r\nb\nc\n"
        );
        assert_eq!(remove(&out, &owner("x"), true), text);
    }

    #[test]
    fn fresh_region_at_top_of_crlf_file_uses_crlf() {
        let text = "a\r\nb\n";
        let out = synchronize(text, &owner("x"), &[], 1);
        assert_eq!(out, "/* x import start */\r\n/* x import end */\r\na\r\nb\n");
    }

    #[test]
    fn insertion_inside_another_region_moves_below_it() {
        let y = owner("y");
        let x = owner("x");
        let seeded = synchronize("", &y, &body(&["y1", "y2"]), 1);
        let out = synchronize(&seeded, &x, &body(&["x1"]), 3);
        assert_eq!(
            out,
            "\
/* y import start */
@import \"y1\";
@import \"y2\";
/* y import end */
/* x import start */
@import \"x1\";
/* x import end */
"
        );

        let resynced = synchronize(&out, &y, &body(&["y3"]), 1);
        assert_eq!(region_body(&resynced, &x), Some(body(&["x1"])));
        assert_eq!(region_body(&resynced, &y), Some(body(&["y3"])));
    }

    #[test]
    fn insertion_on_another_regions_start_line_stays_above_it() {
        let text = "top\n/* y import start */\n@import \"y1\";\n/* y import end */\n";
        let out = synchronize(text, &owner("x"), &[], 2);
        assert_eq!(
            out,
            "top\n/* x import start */\n/* x import end */\n/* y import start */\n@import \"y1\";\n/* y import end */\n"
        );
    }

    #[test]
    fn insertion_skips_past_adjacent_regions() {
        let text = "\
/* y import start */
/* y import end */
/* z import start */
@import \"z1\";
/* z import end */
";
        // Line 2 is inside y; just below y is z's start line, which is outside z.
        let out = synchronize(text, &owner("x"), &[], 2);
        assert!(out.starts_with(
            "/* y import start */\n/* y import end */\n/* x import start */\n/* x import end */\n/* z import start */"
        ));

        // Line 4 is inside z, so the block lands after z's end marker.
        let out = synchronize(text, &owner("x"), &[], 4);
        assert!(out.ends_with("/* z import end */\n/* x import start */\n/* x import end */\n"));
    }

    #[test]
    fn missing_trailing_newline_is_preserved() {
        let text = "/* x import start */\n/* x import end */\n.end {}";
        let out = synchronize(text, &owner("x"), &body(&["a"]), 1);
        assert!(out.ends_with(".end {}"));
    }

    #[test]
    fn blank_runs_are_collapsed_to_two() {
        let text = "a\n\n\n\n\nb\n";
        let out = synchronize(text, &owner("x"), &[], 99);
        assert_eq!(out, "a\n\n\nb\n/* x import start */\n/* x import end */\n");
    }

    // === remove ===

    #[test]
    fn remove_with_body() {
        let text = "top\n/* x import start */\n@import \"a\";\n/* x import end */\nbottom\n";
        let out = remove(text, &owner("x"), true);
        assert_eq!(out, "top\nbottom\n");
    }

    #[test]
    fn remove_without_body_leaves_floating_imports() {
        let text = "top\n/* x import start */\n@import \"a\";\n/* x import end */\nbottom\n";
        let out = remove(text, &owner("x"), false);
        assert_eq!(out, "top\n@import \"a\";\nbottom\n");
    }

    #[test]
    fn remove_missing_region_is_noop() {
        let text = "top\n";
        let out = remove_region(text, &owner("x"), true);
        assert_eq!(out.action, RegionAction::Untouched);
        assert_eq!(out.text, text);
    }

    #[test]
    fn remove_collapses_blank_runs() {
        let text = "a\n\n/* x import start */\n/* x import end */\n\n\nb\n";
        assert_eq!(remove(text, &owner("x"), true), "a\n\n\nb\n");
    }

    #[test]
    fn region_body_reads_lines() {
        let text = "/* x import start */\n/* grp */\n@import \"grp/a\";\n/* x import end */\n";
        assert_eq!(
            region_body(text, &owner("x")),
            Some(vec!["/* grp */".to_string(), "@import \"grp/a\";".to_string()])
        );
        assert_eq!(region_body(text, &owner("y")), None);
    }

    // === floating imports ===

    #[test]
    fn strip_floating_skips_lines_inside_regions() {
        let text = "\
@import \"shared\";
/* x import start */
@import \"shared\";
/* x import end */
@import \"other\";
";
        let ids: BTreeSet<ImportId> = [ImportId::new("shared")].into_iter().collect();
        let (out, removed) = strip_floating_imports(text, &ids);
        assert_eq!(removed, 1);
        assert_eq!(
            out,
            "/* x import start */\n@import \"shared\";\n/* x import end */\n@import \"other\";\n"
        );
    }

    #[test]
    fn strip_floating_without_matches_returns_input() {
        let text = "@import \"kept\";\n\n\n\n";
        let ids: BTreeSet<ImportId> = [ImportId::new("other")].into_iter().collect();
        assert_eq!(strip_floating_imports(text, &ids), (text.to_string(), 0));
    }

    #[test]
    fn document_round_trips_text() {
        for text in [
            "", "\n", "\r\n", "a", "a\r", "a\n", "a\r\nb\r\n", "a\n\nb", "a\r\nb\nc", "a\nb\r\n",
        ] {
            assert_eq!(Document::parse(text).render(), text);
        }
    }

    #[test]
    fn rendered_block_snapshot() {
        let text = "@use \"sass:math\";\n\n.app { display: grid; }\n";
        let out = synchronize(
            text,
            &owner("components"),
            &[
                "@import \"button\";".to_string(),
                "/* forms */".to_string(),
                "@import \"forms/input\";".to_string(),
            ],
            2,
        );
        insta::assert_snapshot!(out, @r#"
        @use "sass:math";
        /* components import start */
        @import "button";
        /* forms */
        @import "forms/input";
        /* components import end */

        .app { display: grid; }
        "#);
    }
}

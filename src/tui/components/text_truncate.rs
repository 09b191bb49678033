//! Width- and height-limited text helpers for fixed-size terminal panes.
//!
//! Widths are measured in terminal columns, so wide characters such as CJK
//! ideographs count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_width` columns, ending with `...` when
/// anything was cut. Only the first line of `text` is kept.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim_end();
    if line.width() <= max_width {
        return line.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut kept = String::new();
    let mut used = 0_usize;
    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(char_width) > budget {
            break;
        }
        kept.push(ch);
        used = used.saturating_add(char_width);
    }
    kept.push_str(ELLIPSIS);
    kept
}

/// Breaks `text` into lines of at most `max_width` columns on whitespace.
///
/// Words longer than a full line are truncated rather than split.
pub(crate) fn wrap_to_width(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.width()
            } else {
                current.width().saturating_add(1).saturating_add(word.width())
            };
            if needed > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&truncate_to_width(word, max_width));
        }
        lines.push(current);
    }
    lines
}

/// Keeps at most `max_lines` lines, replacing the last kept line with `...`
/// when lines were dropped. A limit of zero disables clipping.
pub(crate) fn clip_lines(lines: &mut Vec<String>, max_lines: usize) {
    if max_lines == 0 || lines.len() <= max_lines {
        return;
    }
    lines.truncate(max_lines.saturating_sub(1));
    lines.push(ELLIPSIS.to_owned());
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{clip_lines, truncate_to_width, wrap_to_width};

    #[rstest]
    #[case::fits("Ani", 10, "Ani")]
    #[case::cut("Pelayanan cepat", 10, "Pelayan...")]
    #[case::tiny("Pelayanan", 2, "..")]
    #[case::zero("Pelayanan", 0, "")]
    #[case::first_line_only("baris satu\nbaris dua", 20, "baris satu")]
    #[case::wide_chars("你好世界", 5, "你...")]
    fn truncates_to_column_width(#[case] text: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate_to_width(text, width), expected);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_to_width("Dokter sangat ramah dan sabar", 12);

        assert_eq!(lines, vec!["Dokter", "sangat ramah", "dan sabar"]);
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        let lines = wrap_to_width("satu\n\ndua", 20);

        assert_eq!(lines, vec!["satu", "", "dua"]);
    }

    #[test]
    fn clip_marks_dropped_lines() {
        let mut lines: Vec<String> = ["a", "b", "c", "d"].map(str::to_owned).to_vec();

        clip_lines(&mut lines, 3);

        assert_eq!(lines, vec!["a", "b", "..."]);
    }

    #[test]
    fn clip_ignores_short_output_and_zero_limit() {
        let mut lines: Vec<String> = vec!["a".to_owned()];
        clip_lines(&mut lines, 0);
        clip_lines(&mut lines, 2);

        assert_eq!(lines, vec!["a"]);
    }
}

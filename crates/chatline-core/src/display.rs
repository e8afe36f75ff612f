//! Terminal-safe text: control characters made visible, widths in columns
//!
//! Entry text is kept verbatim in the transcript. Only what gets drawn goes
//! through here, so no escape sequence from a reply or a paste ever reaches
//! the terminal.

use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 4;

/// How a single char is drawn: `^[` for ESC, `^?` for DEL, `\u{9b}` for
/// C1 controls, the char itself otherwise. Tabs are handled by the caller.
fn push_visible(out: &mut String, c: char) {
    match c {
        '\u{7f}' => out.push_str("^?"),
        c if (c as u32) < 0x20 => {
            out.push('^');
            out.push(char::from(c as u8 + 0x40));
        }
        c if c.is_control() => out.extend(c.escape_default()),
        c => out.push(c),
    }
}

/// Make one source line safe to draw. Tabs expand to the next tab stop.
pub fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_STOP - column % TAB_STOP;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            let start = out.len();
            push_visible(&mut out, c);
            column += str_width(&out[start..]);
        }
    }
    out
}

/// Display form of a char in the single-line input box
pub fn visible_char(c: char) -> String {
    let mut out = String::new();
    if c == '\t' {
        out.push(' ');
    } else {
        push_visible(&mut out, c);
    }
    out
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Wrap an already sanitized line into rows of at most `width` columns.
///
/// A char wider than the whole row gets a row to itself.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for c in line.chars() {
        let w = char_width(c);
        if row_width + w > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
        row.push(c);
        row_width += w;
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Visible slice of an input value and the cursor column inside it, keeping
/// the cursor within `width` columns.
pub fn input_window(value: &str, cursor: usize, width: usize) -> (String, u16) {
    let cells: Vec<(String, usize)> = value
        .chars()
        .map(|c| {
            let shown = visible_char(c);
            let w = str_width(&shown);
            (shown, w)
        })
        .collect();
    let cursor = cursor.min(cells.len());

    // Scroll right until the cursor cell fits
    let mut start = 0;
    let mut before_cursor: usize = cells[..cursor].iter().map(|(_, w)| w).sum();
    while start < cursor && before_cursor + 1 > width {
        before_cursor -= cells[start].1;
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for (shown, w) in &cells[start..] {
        if used + w > width {
            break;
        }
        visible.push_str(shown);
        used += w;
    }

    (visible, before_cursor.min(u16::MAX as usize) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sequences_become_visible() {
        let shown = sanitize_line("hi\x1b[2Jthere");
        assert_eq!(shown, "hi^[[2Jthere");
        assert!(!shown.chars().any(|c| c.is_control()));

        assert_eq!(sanitize_line("bell\x07 del\x7f"), "bell^G del^?");
        assert_eq!(sanitize_line("csi\u{9b}"), "csi\\u{9b}");
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        assert_eq!(sanitize_line("col1\tcol2"), "col1    col2");
        assert_eq!(sanitize_line("a\tb"), "a   b");
        assert_eq!(sanitize_line("\t"), "    ");
    }

    #[test]
    fn test_markup_is_untouched() {
        assert_eq!(sanitize_line("<b>bold</b>"), "<b>bold</b>");
    }

    #[test]
    fn test_wrap_by_display_width() {
        let rows = wrap_line("一二三四五", 5);
        assert_eq!(rows, vec!["一二", "三四", "五"]);
        for row in &rows {
            assert!(str_width(row) <= 5);
        }

        assert_eq!(wrap_line("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_line("", 3), vec![""]);
    }

    #[test]
    fn test_wide_char_in_narrow_row() {
        assert_eq!(wrap_line("一a", 1), vec!["一", "a"]);
    }

    #[test]
    fn test_input_window_scrolls_by_columns() {
        let (shown, x) = input_window("hello", 5, 10);
        assert_eq!((shown.as_str(), x), ("hello", 5));

        // 6 wide chars = 12 columns, cursor at the end, 8 columns available
        let (shown, x) = input_window("一二三四五六", 6, 8);
        assert_eq!(shown, "四五六");
        assert_eq!(x, 6);
        assert!(str_width(&shown) <= 8);

        let (shown, x) = input_window("一二三四五六", 0, 8);
        assert_eq!(shown, "一二三四");
        assert_eq!(x, 0);
    }

    #[test]
    fn test_input_window_hides_controls() {
        let (shown, x) = input_window("a\x1bb", 3, 10);
        assert_eq!(shown, "a^[b");
        assert_eq!(x, 4);
    }
}

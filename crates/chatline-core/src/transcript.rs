//! Append-only chat transcript and its projection into display rows

use crate::display::{sanitize_line, wrap_line};
use crate::state::{ChatMessage, ChatRole};

const DEFAULT_WIDTH: u16 = 50;
const DEFAULT_HEIGHT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Role label ("You:" / "AI:")
    Header,
    Body,
    /// Blank row after each entry
    Spacer,
}

/// One display row produced from a transcript entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub role: ChatRole,
    pub kind: LineKind,
    pub text: String,
}

/// Ordered, append-only list of chat entries plus the scroll state of the
/// pane that shows them.
///
/// Entries are never edited or removed. Every append moves the scroll
/// offset to the bottom so the newest entry is visible.
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Vec<ChatMessage>,
    scroll: u16,
    width: u16,
    height: u16,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            scroll: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry with its text taken verbatim, then scroll to the bottom
    pub fn append(&mut self, content: impl Into<String>, role: ChatRole) {
        self.entries.push(ChatMessage {
            role,
            content: content.into(),
        });
        self.scroll_to_bottom();
    }

    /// Project every entry into rows no wider than `width` columns, with
    /// control characters made visible
    pub fn lines(&self, width: u16) -> Vec<TranscriptLine> {
        let width = width.max(1) as usize;
        let mut lines = Vec::new();

        for msg in &self.entries {
            lines.push(TranscriptLine {
                role: msg.role,
                kind: LineKind::Header,
                text: msg.role.label().to_string(),
            });
            for source_line in msg.content.split('\n') {
                let source_line = sanitize_line(source_line.trim_end_matches('\r'));
                for row in wrap_line(&source_line, width) {
                    lines.push(TranscriptLine {
                        role: msg.role,
                        kind: LineKind::Body,
                        text: row,
                    });
                }
            }
            lines.push(TranscriptLine {
                role: msg.role,
                kind: LineKind::Spacer,
                text: String::new(),
            });
        }

        lines
    }

    fn line_count(&self) -> usize {
        let width = self.width.max(1) as usize;
        self.entries
            .iter()
            .map(|msg| {
                let body: usize = msg
                    .content
                    .split('\n')
                    .map(|l| wrap_line(&sanitize_line(l.trim_end_matches('\r')), width).len())
                    .sum();
                body + 2
            })
            .sum()
    }

    /// Update the visible size of the transcript pane.
    ///
    /// A view pinned to the bottom stays pinned; otherwise the offset is
    /// clamped to the new maximum.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        let pinned = self.scroll >= self.max_scroll();
        self.width = width;
        self.height = height;
        if pinned {
            self.scroll_to_bottom();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Largest scroll offset that still fills the pane
    pub fn max_scroll(&self) -> u16 {
        let total = self.line_count().min(u16::MAX as usize) as u16;
        total.saturating_sub(self.height)
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll());
    }

    pub fn page_rows(&self) -> u16 {
        self.height.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order_and_roles() {
        let mut transcript = Transcript::new();
        transcript.append("hi", ChatRole::User);
        transcript.append("hello", ChatRole::Assistant);

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, ChatRole::User);
        assert_eq!(entries[0].content, "hi");
        assert_eq!(entries[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_lines_layout() {
        let mut transcript = Transcript::new();
        transcript.append("abcdefgh", ChatRole::User);

        let lines = transcript.lines(3);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["You:", "abc", "def", "gh", ""]);
        assert_eq!(lines[0].kind, LineKind::Header);
        assert_eq!(lines[1].kind, LineKind::Body);
        assert_eq!(lines[4].kind, LineKind::Spacer);
    }

    #[test]
    fn test_multiline_content_keeps_blank_lines() {
        let mut transcript = Transcript::new();
        transcript.append("one\r\n\ntwo", ChatRole::Assistant);

        let texts: Vec<String> = transcript.lines(10).into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["AI:", "one", "", "two", ""]);
    }

    #[test]
    fn test_markup_is_kept_literally() {
        let mut transcript = Transcript::new();
        transcript.append("<b>bold?</b>", ChatRole::User);
        assert_eq!(transcript.entries()[0].content, "<b>bold?</b>");
        assert_eq!(transcript.lines(80)[1].text, "<b>bold?</b>");
    }

    #[test]
    fn test_append_scrolls_to_max_extent() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(10, 4);
        for i in 0..5 {
            transcript.append(format!("message {}", i), ChatRole::User);
            assert_eq!(transcript.scroll(), transcript.max_scroll());
        }
        // 5 entries x 3 rows, 4 visible
        assert_eq!(transcript.max_scroll(), 11);
        assert_eq!(transcript.lines(10).len(), 15);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(10, 2);
        transcript.append("a", ChatRole::User);
        transcript.append("b", ChatRole::Assistant);
        assert_eq!(transcript.scroll(), 4);

        transcript.scroll_down(10);
        assert_eq!(transcript.scroll(), 4);
        transcript.scroll_up(3);
        assert_eq!(transcript.scroll(), 1);
        transcript.scroll_up(10);
        assert_eq!(transcript.scroll(), 0);

        // Scrolled away from the bottom, a new entry still jumps down
        transcript.append("c", ChatRole::User);
        assert_eq!(transcript.scroll(), transcript.max_scroll());
    }

    #[test]
    fn test_viewport_change_keeps_bottom_pinned() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(20, 3);
        for _ in 0..4 {
            transcript.append("x", ChatRole::User);
        }
        assert_eq!(transcript.scroll(), 9);

        transcript.set_viewport(20, 6);
        assert_eq!(transcript.scroll(), 6);

        transcript.scroll_up(4);
        transcript.set_viewport(20, 10);
        assert_eq!(transcript.scroll(), 2);
    }

    #[test]
    fn test_wide_chars_wrap_by_columns() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(20, 5);
        transcript.append("一二三四五六七八九十".repeat(4), ChatRole::Assistant);

        let body: Vec<String> = transcript
            .lines(20)
            .into_iter()
            .filter(|l| l.kind == LineKind::Body)
            .map(|l| l.text)
            .collect();
        assert_eq!(body.len(), 4);
        assert!(body.iter().all(|row| row == "一二三四五六七八九十"));
        // header + 4 rows + spacer, 5 visible
        assert_eq!(transcript.max_scroll(), 1);
    }

    #[test]
    fn test_control_chars_projected_visibly() {
        let mut transcript = Transcript::new();
        transcript.append("hi\x1b[2Jthere\tend", ChatRole::Assistant);

        assert_eq!(transcript.entries()[0].content, "hi\x1b[2Jthere\tend");
        let row = &transcript.lines(80)[1].text;
        assert_eq!(row, "hi^[[2Jthere    end");
        assert!(!row.chars().any(|c| c.is_control()));
    }

    #[test]
    fn test_short_transcript_does_not_scroll() {
        let mut transcript = Transcript::new();
        transcript.set_viewport(40, 20);
        transcript.append("hello", ChatRole::User);
        assert_eq!(transcript.max_scroll(), 0);
        assert_eq!(transcript.scroll(), 0);
    }
}

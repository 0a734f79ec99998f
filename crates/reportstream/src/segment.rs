use crate::SectionLabel;
use core::{iter::FusedIterator, iter::Peekable, ops::Range, str::Split};

/// One line of source text together with its section label.
///
/// Segments borrow from the text they were split from and remember where in
/// that text they start, so callers can recover the byte range without
/// re-scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    text: &'a str,
    start: usize,
    section: SectionLabel,
}

impl<'a> Segment<'a> {
    /// The segment's content, without the line terminator.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The section this segment belongs to.
    #[must_use]
    pub const fn section(&self) -> SectionLabel {
        self.section
    }

    /// Byte range of the segment within the source text.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// Number of Unicode scalar values in the segment.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if this is the final segment of the text.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.section == SectionLabel::Conclusion
    }
}

/// Iterator over the [`Segment`]s of a text. Created by [`split_segments`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    lines: Peekable<Split<'a, char>>,
    offset: usize,
}

/// Splits `text` on `'\n'` into ordered, labelled segments.
///
/// Blank lines are kept as empty segments and a trailing newline produces a
/// final empty segment. The empty string yields exactly one empty segment.
/// The last segment is labelled [`SectionLabel::Conclusion`], every other one
/// [`SectionLabel::Summary`].
///
/// # Example
///
/// ```
/// use reportstream::{SectionLabel, split_segments};
///
/// let segments: Vec<_> = split_segments("first\n\nlast").collect();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].text(), "");
/// assert_eq!(segments[1].section(), SectionLabel::Summary);
/// assert_eq!(segments[2].section(), SectionLabel::Conclusion);
/// ```
#[must_use]
pub fn split_segments(text: &str) -> Segments<'_> {
    Segments {
        lines: text.split('\n').peekable(),
        offset: 0,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.next()?;
        let section = SectionLabel::for_position(self.lines.peek().is_none());
        let start = self.offset;
        // +1 for the '\n' consumed by the split.
        self.offset += text.len() + 1;
        Some(Segment {
            text,
            start,
            section,
        })
    }
}

impl FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        split_segments(input).map(|s| s.text()).collect()
    }

    #[test]
    fn empty_text_is_one_conclusion_segment() {
        let segments: Vec<_> = split_segments("").collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text(), "");
        assert_eq!(segments[0].section(), SectionLabel::Conclusion);
        assert_eq!(segments[0].range(), 0..0);
    }

    #[test]
    fn single_line_is_conclusion() {
        let segments: Vec<_> = split_segments("only").collect();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_last());
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(texts("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(texts("a\n"), vec!["a", ""]);
        assert_eq!(texts("\n"), vec!["", ""]);
    }

    #[test]
    fn carriage_returns_stay_in_content() {
        assert_eq!(texts("a\r\nb"), vec!["a\r", "b"]);
    }

    #[test]
    fn only_last_segment_is_conclusion() {
        let labels: Vec<_> = split_segments("one\ntwo\nthree\nfour")
            .map(|s| s.section())
            .collect();
        assert_eq!(
            labels,
            vec![
                SectionLabel::Summary,
                SectionLabel::Summary,
                SectionLabel::Summary,
                SectionLabel::Conclusion,
            ]
        );
    }

    #[test]
    fn ranges_index_back_into_source() {
        let source = "שלום\nעולם\n\nend";
        for segment in split_segments(source) {
            assert_eq!(&source[segment.range()], segment.text());
        }
    }

    #[test]
    fn char_count_uses_code_points() {
        let segment = split_segments("טקסט").next().unwrap();
        assert_eq!(segment.char_count(), 4);
        assert_eq!(segment.text().len(), 8);
    }

    #[test]
    fn iterator_is_fused() {
        let mut segments = split_segments("a");
        assert!(segments.next().is_some());
        assert!(segments.next().is_none());
        assert!(segments.next().is_none());
    }
}

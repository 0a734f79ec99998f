use core::fmt;

/// Marks which part of a report a frame belongs to.
///
/// Every segment of a stream is labelled [`SectionLabel::Summary`] except the
/// final one, which is labelled [`SectionLabel::Conclusion`]. The label is
/// derived purely from the segment's position; see [`split_segments`].
///
/// [`split_segments`]: crate::split_segments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionLabel {
    /// Body of the report.
    Summary,
    /// The final segment of the report.
    Conclusion,
}

impl SectionLabel {
    /// Returns the label for a segment given whether it is the last one.
    #[must_use]
    pub const fn for_position(is_last: bool) -> Self {
        if is_last {
            Self::Conclusion
        } else {
            Self::Summary
        }
    }

    /// The wire name of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Conclusion => "Conclusion",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

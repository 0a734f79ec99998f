//! The progressive streaming responder.
//!
//! A [`ProgressiveResponder`] holds a static text and a [`CorrelationPool`].
//! Every call to [`ProgressiveResponder::frames`] (or `stream` with the
//! `futures` feature) starts an independent emission: the text is split into
//! segments, each segment is emitted one character at a time, and each segment
//! is closed by exactly one link frame carrying the next identifier from a
//! fresh [`LinkRotator`].

use crate::{CorrelationPool, LinkRotator, SectionLabel, StreamFrame, split_segments};
use core::{iter::FusedIterator, ops::Range, time::Duration};
use std::sync::Arc;

/// Default delay between two consecutive frames.
pub const DEFAULT_PACING: Duration = Duration::from_millis(10);

/// Turns a static text into ordered, section-tagged [`StreamFrame`]s.
///
/// The responder itself is immutable and cheap to clone; all per-emission
/// state lives in the [`Frames`] iterator it hands out.
#[derive(Clone, Debug)]
pub struct ProgressiveResponder {
    text: Arc<str>,
    pool: CorrelationPool,
    pacing: Duration,
}

impl ProgressiveResponder {
    /// Creates a responder for `text` using [`DEFAULT_PACING`].
    pub fn new(text: impl Into<Arc<str>>, pool: CorrelationPool) -> Self {
        Self {
            text: text.into(),
            pool,
            pacing: DEFAULT_PACING,
        }
    }

    /// Overrides the delay applied after every emitted frame. A zero delay is
    /// valid and is what tests use.
    #[must_use]
    pub const fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn pool(&self) -> &CorrelationPool {
        &self.pool
    }

    #[must_use]
    pub const fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Starts a new emission and returns its frames as a lazy iterator.
    ///
    /// Each call creates fresh segmentation and rotation state, so replaying
    /// produces a structurally identical sequence with link rotation starting
    /// again from the beginning of the pool.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    #[must_use]
    pub fn frames(&self) -> Frames {
        Frames::new(Arc::clone(&self.text), self.pool.rotator())
    }
}

/// Lazy, non-restartable sequence of frames for one emission.
///
/// Produced by [`ProgressiveResponder::frames`]. The length is known up front:
/// one frame per character plus one link frame per segment.
#[derive(Clone, Debug)]
pub struct Frames {
    text: Arc<str>,
    spans: std::vec::IntoIter<(Range<usize>, SectionLabel)>,
    current: Option<(Range<usize>, SectionLabel)>,
    rotator: LinkRotator,
    remaining: usize,
}

impl Frames {
    /// Prepares the emission of `text`, drawing link ids from `rotator`.
    pub fn new(text: Arc<str>, rotator: LinkRotator) -> Self {
        let mut remaining = 0;
        let spans: Vec<_> = split_segments(&text)
            .map(|segment| {
                remaining += segment.char_count() + 1;
                (segment.range(), segment.section())
            })
            .collect();

        Self {
            text,
            spans: spans.into_iter(),
            current: None,
            rotator,
            remaining,
        }
    }
}

impl Iterator for Frames {
    type Item = StreamFrame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((range, section)) = self.current.as_mut() {
                let section = *section;
                let frame = match self.text[range.clone()].chars().next() {
                    Some(character) => {
                        range.start += character.len_utf8();
                        StreamFrame::Character { character, section }
                    }
                    None => {
                        self.current = None;
                        StreamFrame::Link {
                            link_id: self.rotator.next_id(),
                            section,
                        }
                    }
                };
                self.remaining -= 1;
                return Some(frame);
            }

            self.current = Some(self.spans.next()?);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Frames {}

impl FusedIterator for Frames {}

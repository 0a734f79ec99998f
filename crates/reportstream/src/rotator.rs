use core::iter::FusedIterator;
use std::sync::Arc;

/// An ordered pool of candidate link identifiers.
///
/// The pool is immutable and cheap to clone, so a single instance can be
/// shared across every stream a service handles. Rotation state never lives
/// here: each stream calls [`CorrelationPool::rotator`] to get its own
/// [`LinkRotator`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorrelationPool {
    ids: Arc<[String]>,
}

impl CorrelationPool {
    /// Creates a pool from the given identifiers, preserving their order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The identifiers in pool order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns a fresh rotator positioned at the start of the pool.
    #[must_use]
    pub fn rotator(&self) -> LinkRotator {
        LinkRotator {
            pool: Arc::clone(&self.ids),
            cursor: 0,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CorrelationPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Per-stream rotation over a [`CorrelationPool`].
///
/// Each call to [`LinkRotator::next_id`] returns the first pool entry that has
/// not been handed out yet and marks it consumed. Entries behind the cursor
/// form the consumed set, so an identifier that appears twice in the pool is
/// only ever returned once. After the pool is exhausted every call returns
/// `None`.
///
/// # Example
///
/// ```
/// use reportstream::CorrelationPool;
///
/// let pool = CorrelationPool::new(["id1", "id2"]);
/// let mut rotator = pool.rotator();
/// assert_eq!(rotator.next_id().as_deref(), Some("id1"));
/// assert_eq!(rotator.next_id().as_deref(), Some("id2"));
/// assert_eq!(rotator.next_id(), None);
/// ```
#[derive(Clone, Debug)]
pub struct LinkRotator {
    pool: Arc<[String]>,
    cursor: usize,
}

impl LinkRotator {
    /// Returns the next unused identifier, or `None` once the pool is
    /// exhausted.
    pub fn next_id(&mut self) -> Option<String> {
        while let Some(candidate) = self.pool.get(self.cursor) {
            let consumed = &self.pool[..self.cursor];
            self.cursor += 1;
            if !consumed.contains(candidate) {
                return Some(candidate.clone());
            }
        }
        None
    }

    /// Returns `true` if no further identifiers will be yielded.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        let consumed = &self.pool[..self.cursor];
        self.pool[self.cursor..]
            .iter()
            .all(|candidate| consumed.contains(candidate))
    }
}

impl Iterator for LinkRotator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_id()
    }
}

impl FusedIterator for LinkRotator {}

use super::SleepProvider;
use crate::{ProgressiveResponder, StreamFrame};
use core::time::Duration;
use futures::{Stream, stream};

/// Turns an iterator into a stream that suspends for `pacing` after every
/// item it yields.
///
/// The first item is available immediately and a zero `pacing` never
/// suspends. The suspension after the last item
/// still happens before the stream reports completion, so a consumer observes
/// the same cadence for every item. The stream is lazy: nothing is pulled from
/// `items` until the stream is polled, and dropping the stream stops
/// production.
pub fn paced<I, S>(items: I, pacing: Duration) -> impl Stream<Item = I::Item> + Send + 'static
where
    I: Iterator + Send + 'static,
    I::Item: Send + 'static,
    S: SleepProvider + 'static,
{
    stream::unfold((items, false), move |(mut items, emitted)| async move {
        if emitted && !pacing.is_zero() {
            S::sleep_for(pacing).await;
        }
        items.next().map(|item| (item, (items, true)))
    })
}

impl ProgressiveResponder {
    /// Starts a new emission as a paced asynchronous stream.
    ///
    /// Frames are produced one at a time and the responder's pacing delay is
    /// applied after each one using `S`. Use `NoSleep` (or a zero pacing) to
    /// drain without delay.
    ///
    /// # Example
    ///
    /// ```
    /// use futures::{StreamExt, executor::block_on};
    /// use reportstream::{CorrelationPool, NoSleep, ProgressiveResponder};
    ///
    /// let responder = ProgressiveResponder::new("hi", CorrelationPool::new(["id1"]));
    /// let frames: Vec<_> = block_on(responder.stream::<NoSleep>().collect());
    /// assert_eq!(frames.len(), 3);
    /// ```
    pub fn stream<S>(&self) -> impl Stream<Item = StreamFrame> + Send + 'static
    where
        S: SleepProvider + 'static,
    {
        paced::<_, S>(self.frames(), self.pacing())
    }
}

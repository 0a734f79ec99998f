use core::{future::Future, time::Duration};

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// This allows paced streams to be generic over runtimes and lets tests swap
/// the pacing delay out entirely with [`NoSleep`].
pub trait SleepProvider {
    /// We require `Send` so that the future can be safely moved across threads
    type Sleep: Future<Output = ()> + Send;

    fn sleep_for(dur: Duration) -> Self::Sleep;
}

/// A [`SleepProvider`] that never suspends.
///
/// The requested duration is ignored and the returned future is immediately
/// ready. Useful for tests and for draining a stream as fast as possible.
pub struct NoSleep;
impl SleepProvider for NoSleep {
    type Sleep = core::future::Ready<()>;

    fn sleep_for(_dur: Duration) -> Self::Sleep {
        core::future::ready(())
    }
}

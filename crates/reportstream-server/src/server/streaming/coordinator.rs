use crate::server::telemetry::increment_frames_emitted;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reportstream::StreamFrame;
use reportstream_api::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// How a single emission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Every frame was handed to the response body.
    Completed { frames: usize },
    /// The client went away; remaining frames were never produced.
    Disconnected { frames: usize },
    /// The service shut down before the emission finished.
    Cancelled { frames: usize },
    /// The configured stream deadline elapsed.
    DeadlineExceeded,
}

impl StreamOutcome {
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Drives one emission into the response body channel.
///
/// Each frame is encoded as one line of JSON and sent to `resp_tx`. The paced
/// `frames` stream is only polled while the client is still connected, so
/// nothing further is produced once the body is dropped.
///
/// # Behavior
///
/// - Stops with [`StreamOutcome::Disconnected`] as soon as the receiver side is
///   dropped, whether that is noticed while waiting for the next frame or while
///   waiting for buffer capacity.
/// - Stops with [`StreamOutcome::Cancelled`] when `cancel` fires.
/// - Encoding failures are returned as errors; the body simply ends.
pub async fn feed_frames<S>(
    frames: S,
    resp_tx: mpsc::Sender<Bytes>,
    cancel: CancellationToken,
) -> Result<StreamOutcome>
where
    S: Stream<Item = StreamFrame> + Send,
{
    let mut frames = core::pin::pin!(frames);
    let mut sent = 0;

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(StreamOutcome::Cancelled { frames: sent }),
            () = resp_tx.closed() => return Ok(StreamOutcome::Disconnected { frames: sent }),
            next = frames.next() => next,
        };

        let Some(frame) = next else {
            return Ok(StreamOutcome::Completed { frames: sent });
        };

        let line = Bytes::from(frame.to_ndjson()?);

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(StreamOutcome::Cancelled { frames: sent }),
            sent_result = resp_tx.send(line) => {
                if sent_result.is_err() {
                    return Ok(StreamOutcome::Disconnected { frames: sent });
                }
            }
        }

        sent += 1;
        increment_frames_emitted(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use reportstream::{CorrelationPool, NoSleep, ProgressiveResponder, SectionLabel, TokioSleep};

    fn responder(text: &str) -> ProgressiveResponder {
        ProgressiveResponder::new(text, CorrelationPool::new(["id1", "id2"]))
    }

    #[tokio::test]
    async fn forwards_every_frame_as_a_json_line() {
        let responder = responder("ab\nc");
        let (tx, mut rx) = mpsc::channel(64);

        let outcome = feed_frames(responder.stream::<NoSleep>(), tx, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, StreamOutcome::Completed { frames: 5 });

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            assert_eq!(line.last(), Some(&b'\n'));
            lines.push(serde_json::from_slice::<StreamFrame>(&line).unwrap());
        }
        assert_eq!(lines, responder.frames().collect::<Vec<_>>());
        assert_eq!(lines[4].section(), SectionLabel::Conclusion);
    }

    #[tokio::test]
    async fn stops_when_the_client_disconnects() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let outcome = feed_frames(responder("abc").stream::<NoSleep>(), tx, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome, StreamOutcome::Disconnected { frames: 0 });
    }

    #[tokio::test]
    async fn stops_when_the_buffer_stays_full_and_the_client_leaves() {
        let (tx, mut rx) = mpsc::channel(1);
        let handle = tokio::spawn(feed_frames(
            responder("abcdef").stream::<NoSleep>(),
            tx,
            CancellationToken::new(),
        ));

        assert!(rx.recv().await.is_some());
        drop(rx);

        let outcome = handle.await.unwrap().unwrap();
        assert!(matches!(outcome, StreamOutcome::Disconnected { frames } if frames >= 1));
    }

    #[tokio::test(start_paused = true)]
    async fn disconnect_during_pacing_sleep_stops_promptly() {
        let responder = responder("abcdef").with_pacing(Duration::from_secs(60));
        let (tx, mut rx) = mpsc::channel(8);
        let start = tokio::time::Instant::now();
        let handle = tokio::spawn(feed_frames(
            responder.stream::<TokioSleep>(),
            tx,
            CancellationToken::new(),
        ));

        assert!(rx.recv().await.is_some());
        drop(rx);

        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome, StreamOutcome::Disconnected { frames: 1 });
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn cancellation_ends_the_stream() {
        let (tx, _rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = feed_frames(responder("abc").stream::<NoSleep>(), tx, cancel)
            .await
            .unwrap();
        assert_eq!(outcome, StreamOutcome::Cancelled { frames: 0 });
        assert!(!outcome.is_complete());
    }
}

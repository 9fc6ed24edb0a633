//! Progress reporting and cooperative cancellation for a single run.
//!
//! A [`StageControl`] is handed to every staged operation. It pushes
//! [`ProgressEvent`]s into an optional `mpsc` channel and carries the
//! [`CancellationToken`] the caller uses to abandon the run. Cancellation is
//! observed only at checkpoints and during stage pacing, never in the middle
//! of a stage's work, and once observed no further events are sent.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::OrchestrationError;

/// One checkpoint reached by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// In `[0, 100]`; never decreases within one run.
    pub percent: u8,
    pub label: String,
}

/// Progress sink and cancellation handle for one run.
#[derive(Debug)]
pub struct StageControl {
    sink: Option<mpsc::UnboundedSender<ProgressEvent>>,
    cancel: CancellationToken,
    last_percent: u8,
    labels: Vec<String>,
}

impl StageControl {
    /// No progress listener; cancellable only through [`StageControl::cancellation`].
    pub fn detached() -> Self {
        Self {
            sink: None,
            cancel: CancellationToken::new(),
            last_percent: 0,
            labels: Vec::new(),
        }
    }

    /// Reports progress into `sink`.
    pub fn with_progress(sink: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::detached()
        }
    }

    /// Creates a control together with the receiving end of its progress channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::with_progress(tx), rx)
    }

    /// Uses `token` for cancellation instead of a private one.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A clone of the token that cancels this run.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Labels reported since the current run began, in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Starts a new run on this control: progress may restart from zero and
    /// earlier labels are forgotten. Cancellation is not reset.
    pub(crate) fn begin_run(&mut self) {
        self.last_percent = 0;
        self.labels.clear();
    }

    /// Reports a checkpoint.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if the run has been cancelled; nothing
    /// is reported in that case.
    pub fn checkpoint(&mut self, percent: u8, label: &str) -> Result<(), OrchestrationError> {
        if self.cancel.is_cancelled() {
            return Err(OrchestrationError::Cancelled);
        }
        let percent = percent.min(100);
        debug_assert!(
            percent >= self.last_percent,
            "progress went backwards: {} -> {percent}",
            self.last_percent
        );
        self.last_percent = percent;
        self.labels.push(label.to_string());

        tracing::debug!(percent, stage = label, "checkpoint reached");
        if let Some(sink) = &self.sink {
            // A dropped receiver means nobody is listening; the run itself continues.
            let _ = sink.send(ProgressEvent {
                percent,
                label: label.to_string(),
            });
        }
        Ok(())
    }

    /// Waits `duration` on the tokio clock unless cancelled first.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if cancellation arrives before the wait ends.
    pub async fn pace(&self, duration: Duration) -> Result<(), OrchestrationError> {
        if duration.is_zero() {
            return self.ensure_active();
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(OrchestrationError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }

    /// # Errors
    ///
    /// [`OrchestrationError::Cancelled`] if the run has been cancelled.
    pub fn ensure_active(&self) -> Result<(), OrchestrationError> {
        if self.cancel.is_cancelled() {
            Err(OrchestrationError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for StageControl {
    fn default() -> Self {
        Self::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn checkpoints_are_forwarded_in_order() {
        let (mut control, mut rx) = StageControl::channel();
        control.checkpoint(10, "a").unwrap();
        control.checkpoint(50, "b").unwrap();
        drop(control);

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            seen.push((event.percent, event.label));
        }
        assert_eq!(seen, vec![(10, "a".to_string()), (50, "b".to_string())]);
    }

    #[tokio::test]
    async fn cancelled_control_stops_reporting() {
        let (mut control, mut rx) = StageControl::channel();
        control.checkpoint(10, "a").unwrap();
        control.cancellation().cancel();
        assert!(control.checkpoint(20, "b").unwrap_err().is_cancelled());
        drop(control);

        assert_eq!(rx.recv().await.map(|e| e.percent), Some(10));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn pace_waits_on_the_virtual_clock() {
        let control = StageControl::detached();
        let start = tokio::time::Instant::now();
        control.pace(Duration::from_secs(30)).await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(30) && waited < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn pace_is_interrupted_by_cancellation() {
        let control = StageControl::detached();
        let token = control.cancellation();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });
        let err = control.pace(Duration::from_secs(60)).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn a_new_run_restarts_progress_and_labels() {
        let (mut control, mut rx) = StageControl::channel();
        control.begin_run();
        control.checkpoint(100, "first done").unwrap();
        control.begin_run();
        control.checkpoint(15, "second started").unwrap();
        assert_eq!(control.labels().to_vec(), vec!["second started".to_string()]);
        drop(control);

        assert_eq!(rx.recv().await.map(|e| e.percent), Some(100));
        assert_eq!(rx.recv().await.map(|e| e.percent), Some(15));
    }

    #[test]
    fn shared_token_cancels_the_control() {
        let token = CancellationToken::new();
        let mut control = StageControl::detached().with_cancellation(token.clone());
        token.cancel();
        assert!(control.is_cancelled());
        assert!(control.checkpoint(0, "start").unwrap_err().is_cancelled());
    }

    #[test]
    fn reporting_without_listener_is_fine() {
        let mut control = StageControl::detached();
        control.checkpoint(100, "done").unwrap();
        assert_eq!(control.labels().to_vec(), vec!["done".to_string()]);
    }
}

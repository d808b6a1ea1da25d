//! Frame Pipeline
//!
//! Single-consumer stage between capture and evaluation. Frames are applied in
//! arrival order by one task, so run counters never see interleaved frames.

use landmarks::LandmarkSet;
use symptom_tracker::Snapshot;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::session::{Session, SessionSummary};
use crate::source::LandmarkSource;
use crate::SessionError;

/// Producer half: one item per captured frame, `None` when no face was found
pub type FrameSender = mpsc::Sender<Option<LandmarkSet>>;

/// Evaluation stage owning the session
pub struct FramePipeline {
    /// Channel receiver for incoming frames
    receiver: mpsc::Receiver<Option<LandmarkSet>>,
    session: Session,
    /// Latest snapshot for display, once someone subscribed
    snapshots: Option<watch::Sender<Snapshot>>,
}

impl FramePipeline {
    pub fn new(receiver: mpsc::Receiver<Option<LandmarkSet>>, session: Session) -> Self {
        Self {
            receiver,
            session,
            snapshots: None,
        }
    }

    /// Create a bounded channel pair for the pipeline
    pub fn channel(capacity: usize, session: Session) -> Result<(FrameSender, Self), SessionError> {
        if capacity == 0 {
            return Err(SessionError::Pipeline("queue capacity must be at least 1".into()));
        }
        info!("Creating frame pipeline: capacity={}", capacity);
        let (tx, rx) = mpsc::channel(capacity);
        Ok((tx, Self::new(rx, session)))
    }

    /// Receive the snapshot after every processed frame
    pub fn subscribe(&mut self) -> watch::Receiver<Snapshot> {
        match &self.snapshots {
            Some(tx) => tx.subscribe(),
            None => {
                let (tx, rx) = watch::channel(self.session.snapshot());
                self.snapshots = Some(tx);
                rx
            }
        }
    }

    /// Process frames until every sender is dropped
    pub async fn run(mut self) -> SessionSummary {
        info!("Starting frame pipeline");

        while let Some(frame) = self.receiver.recv().await {
            self.session.process_frame(frame.as_ref());
            if let Some(tx) = &self.snapshots {
                tx.send_replace(self.session.snapshot());
            }
        }

        debug!("Frame channel closed");
        let summary = self.session.summary();
        info!("Frame pipeline stopped after {} frames", summary.frames);
        summary
    }
}

/// Push every frame of `source` into the pipeline from a blocking thread.
///
/// Frames the source fails to deliver are logged and dropped; the count is
/// returned. Stops early if the pipeline has gone away.
pub fn feed_blocking<S: LandmarkSource>(source: &mut S, sender: &FrameSender) -> u64 {
    let mut rejected = 0;
    while let Some(frame) = source.next_frame() {
        match frame {
            Ok(landmarks) => {
                if sender.blocking_send(landmarks).is_err() {
                    debug!("Frame pipeline dropped");
                    break;
                }
            }
            Err(e) => {
                warn!("Dropping unreadable frame: {}", e);
                rejected += 1;
            }
        }
    }
    rejected
}

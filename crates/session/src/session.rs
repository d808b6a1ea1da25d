//! Frame-sequential counting session

use landmarks::LandmarkSet;
use metrics::counter;
use serde::Serialize;
use symptom_tracker::{FrameReport, Snapshot, SymptomConfig, SymptomTracker};
use tracing::{debug, info, warn};

use crate::source::{LandmarkSource, SourceError};
use crate::SessionError;

/// Session totals after the last processed frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Frames received, including rejected ones
    pub frames: u64,

    /// Frames with a detected face
    pub frames_with_face: u64,

    /// Frames the source could not deliver
    pub frames_rejected: u64,

    /// Per-symptom updates skipped for undefined ratios
    pub symptom_updates_skipped: u64,

    pub snapshot: Snapshot,
}

/// One counting session: a tracker plus frame statistics
#[derive(Debug, Clone, Default)]
pub struct Session {
    tracker: SymptomTracker,
    frames: u64,
    frames_with_face: u64,
    frames_rejected: u64,
    symptom_updates_skipped: u64,
}

impl Session {
    pub fn new(config: SymptomConfig) -> Result<Self, SessionError> {
        Ok(Self::with_tracker(SymptomTracker::new(config)?))
    }

    /// Session with the default thresholds and every counter at zero
    pub fn new_session() -> Self {
        Self::with_tracker(SymptomTracker::new_session())
    }

    pub fn with_tracker(tracker: SymptomTracker) -> Self {
        Self {
            tracker,
            frames: 0,
            frames_with_face: 0,
            frames_rejected: 0,
            symptom_updates_skipped: 0,
        }
    }

    /// Apply one frame. Frames without a face leave the tracker untouched.
    pub fn process_frame(&mut self, landmarks: Option<&LandmarkSet>) -> Option<FrameReport> {
        self.frames += 1;
        counter!("symptoms_frames_total").increment(1);

        let Some(landmarks) = landmarks else {
            counter!("symptoms_frames_without_face_total").increment(1);
            return None;
        };

        self.frames_with_face += 1;
        let report = self.tracker.update_all(landmarks);
        if report.has_skips() {
            self.symptom_updates_skipped += report.skipped.len() as u64;
            counter!("symptoms_updates_skipped_total").increment(report.skipped.len() as u64);
        }
        if report.has_events() {
            debug!(frame = self.frames, committed = ?report.committed, "Symptom events");
        }
        Some(report)
    }

    /// Count a frame the source failed to deliver
    pub fn record_rejected(&mut self, error: &SourceError) {
        warn!("Skipping frame {}: {}", self.frames + 1, error);
        self.frames += 1;
        self.frames_rejected += 1;
        counter!("symptoms_frames_total").increment(1);
        counter!("symptoms_frames_rejected_total").increment(1);
    }

    /// Drain `source` frame by frame
    pub fn run<S: LandmarkSource>(&mut self, source: &mut S) -> SessionSummary {
        info!("Session started");
        while let Some(frame) = source.next_frame() {
            match frame {
                Ok(landmarks) => {
                    self.process_frame(landmarks.as_ref());
                }
                Err(e) => self.record_rejected(&e),
            }
        }
        let summary = self.summary();
        info!(
            frames = summary.frames,
            events = summary.snapshot.total_events(),
            "Session finished"
        );
        summary
    }

    /// Zero the tracker and the frame statistics
    pub fn restart(&mut self) {
        self.tracker.reset_all();
        self.frames = 0;
        self.frames_with_face = 0;
        self.frames_rejected = 0;
        self.symptom_updates_skipped = 0;
    }

    pub fn tracker(&self) -> &SymptomTracker {
        &self.tracker
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tracker.snapshot()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.frames,
            frames_with_face: self.frames_with_face,
            frames_rejected: self.frames_rejected,
            symptom_updates_skipped: self.symptom_updates_skipped,
            snapshot: self.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{IterSource, JsonLinesSource};
    use landmarks::synthetic::SyntheticFace;
    use symptom_tracker::{SymptomKind, SymptomState};

    fn face(eye_aspect: f64) -> LandmarkSet {
        SyntheticFace::default().with_eye_aspect(eye_aspect).build().unwrap()
    }

    #[test]
    fn test_missing_face_skips_update() {
        let mut session = Session::new_session();
        session.process_frame(Some(&face(0.1)));
        assert!(session.process_frame(None).is_none());
        session.process_frame(None);

        // A face-less frame is not an inactive frame: the run stays open
        let blink = session.tracker().state(SymptomKind::Blink);
        assert_eq!(blink.consecutive_active_frames, 1);
        assert_eq!(blink.total_events, 0);

        session.process_frame(Some(&face(0.3)));
        assert_eq!(session.tracker().state(SymptomKind::Blink).total_events, 1);

        let summary = session.summary();
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.frames_with_face, 2);
    }

    #[test]
    fn test_run_over_source() {
        let frames = vec![Some(face(0.1)), None, Some(face(0.3)), Some(face(0.1)), Some(face(0.3))];
        let mut session = Session::new_session();
        let summary = session.run(&mut IterSource::new(frames));
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.frames_with_face, 4);
        assert_eq!(summary.frames_rejected, 0);
        assert_eq!(summary.snapshot.get(SymptomKind::Blink).map(|s| s.total_events), Some(2));
    }

    #[test]
    fn test_restart() {
        let mut session = Session::new_session();
        session.run(&mut IterSource::new(vec![Some(face(0.1)), Some(face(0.3))]));
        session.restart();
        let summary = session.summary();
        assert_eq!(summary.frames, 0);
        assert!(summary.snapshot.iter().all(|(_, s)| *s == SymptomState::default()));
    }

    struct Unreadable;

    impl std::io::Read for Unreadable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "is a directory"))
        }
    }

    #[test]
    fn test_run_stops_on_read_failure() {
        let mut source = JsonLinesSource::new(std::io::BufReader::new(Unreadable));
        let summary = Session::new_session().run(&mut source);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.frames_rejected, 1);
    }

    #[test]
    fn test_rejected_frames_counted() {
        let mut session = Session::new_session();
        session.record_rejected(&SourceError::Detector("camera unplugged".into()));
        let summary = session.summary();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.frames_rejected, 1);
        assert_eq!(summary.snapshot.total_events(), 0);
    }
}

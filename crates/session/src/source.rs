//! Landmark sources
//!
//! A source yields one item per frame: `Ok(Some(set))` when a face was
//! found, `Ok(None)` when not, `Err` for a frame that could not be read.
//! Only the first detected face of a frame is used.

use std::io::{BufRead, ErrorKind};

use landmarks::{LandmarkError, LandmarkSet};
use serde::Deserialize;
use thiserror::Error;

/// Frame source errors. None of these end a session.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading frames: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: invalid frame JSON: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Line {line}: {source}")]
    Landmarks {
        line: usize,
        source: LandmarkError,
    },

    #[error("Face detector failed: {0}")]
    Detector(String),
}

/// Per-frame landmark producer
pub trait LandmarkSource {
    /// Next frame, or `None` at end of stream
    fn next_frame(&mut self) -> Option<Result<Option<LandmarkSet>, SourceError>>;
}

/// Single-face policy: keep the first face, ignore the rest
pub fn first_face(faces: Vec<LandmarkSet>) -> Option<LandmarkSet> {
    faces.into_iter().next()
}

/// External face and landmark model.
///
/// The caller constructs it with its model (handle or path) and injects it
/// into a [`DetectorSource`].
pub trait FaceDetector {
    type Image;

    /// Landmarks for every face found in `image`, best first
    fn detect(&mut self, image: &Self::Image) -> Result<Vec<LandmarkSet>, SourceError>;
}

/// Runs an injected detector over a stream of images
pub struct DetectorSource<D, I> {
    detector: D,
    images: I,
}

impl<D, I> DetectorSource<D, I>
where
    D: FaceDetector,
    I: Iterator<Item = D::Image>,
{
    pub fn new(detector: D, images: I) -> Self {
        Self { detector, images }
    }
}

impl<D, I> LandmarkSource for DetectorSource<D, I>
where
    D: FaceDetector,
    I: Iterator<Item = D::Image>,
{
    fn next_frame(&mut self) -> Option<Result<Option<LandmarkSet>, SourceError>> {
        let image = self.images.next()?;
        Some(self.detector.detect(&image).map(first_face))
    }
}

/// In-memory frames, mostly for tests and demos
pub struct IterSource<I> {
    frames: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Option<LandmarkSet>>,
{
    pub fn new<T>(frames: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl<I> LandmarkSource for IterSource<I>
where
    I: Iterator<Item = Option<LandmarkSet>>,
{
    fn next_frame(&mut self) -> Option<Result<Option<LandmarkSet>, SourceError>> {
        self.frames.next().map(Ok)
    }
}

/// One recorded frame: one face, several faces, or `null`
#[derive(Deserialize)]
#[serde(untagged)]
enum FrameRecord {
    Face(Vec<[f64; 2]>),
    Faces(Vec<Vec<[f64; 2]>>),
}

/// Replays recorded landmarks, one JSON document per line.
///
/// Blank lines are skipped and do not count as frames. A line that is not
/// valid UTF-8 is reported and skipped; any other read error is reported once
/// and ends the stream.
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
    finished: bool,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
            finished: false,
        }
    }

    fn parse(&self, text: &str) -> Result<Option<LandmarkSet>, SourceError> {
        let line = self.line;
        let record: Option<FrameRecord> =
            serde_json::from_str(text).map_err(|source| SourceError::Parse { line, source })?;

        let face = match record {
            None => None,
            Some(FrameRecord::Face(points)) if points.is_empty() => None,
            Some(FrameRecord::Face(points)) => Some(points),
            Some(FrameRecord::Faces(faces)) => faces.into_iter().next(),
        };

        face.map(|points| {
            LandmarkSet::try_from(points).map_err(|source| SourceError::Landmarks { line, source })
        })
        .transpose()
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Option<Result<Option<LandmarkSet>, SourceError>> {
        if self.finished {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    self.line += 1;
                    let text = self.buf.trim();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(self.parse(text));
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line += 1;
                    return Some(Err(e.into()));
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

use log::trace;

use crate::Point3D;
use crate::sentence::Sentence;

/// Merges consecutive sentences that share a timestamp into single fixes.
///
/// A fix is closed as soon as a sentence with a different timestamp arrives.
/// `ingest` hands the closed fix back to the caller, which makes the
/// returned values the ordered output of the accumulator.
///
#[derive(Debug, Default)]
pub struct PointAccumulator {
    current: Option<Point3D>,
}

impl PointAccumulator {
    pub fn new() -> Self {
        PointAccumulator { current: None }
    }

    /// The fix that is currently being built, if any
    pub fn current(&self) -> Option<&Point3D> {
        self.current.as_ref()
    }

    /// Merges `sentence` into the current fix and returns the previous fix
    /// if `sentence` starts a new one.
    ///
    /// Sentences without a timestamp can not be attributed to any fix and
    /// are ignored. The caller is expected to have dropped invalid sentences.
    ///
    pub fn ingest(&mut self, sentence: &Sentence) -> Option<Point3D> {
        let timestamp = sentence.timestamp?;

        let closed = match self.current {
            Some(point) if point.timestamp == timestamp => None,
            _ => {
                trace!("Starting new point at {}", timestamp);
                self.current.replace(Point3D::new(timestamp))
            }
        };

        if let Some(point) = self.current.as_mut() {
            point.timestamp = timestamp;

            if let Some(latitude) = sentence.latitude {
                point.latitude = latitude;
            }
            if let Some(longitude) = sentence.longitude {
                point.longitude = longitude;
            }
            if let Some(altitude) = sentence.altitude {
                point.altitude = altitude;
            }
        }

        closed
    }

    /// Closes the accumulator and returns the last fix that was still in progress
    pub fn finish(self) -> Option<Point3D> {
        self.current
    }

    /// Collects all fixes of `sentences`, flushing the last one at the end
    pub fn collect<'a, I>(sentences: I) -> Vec<Point3D>
        where I: IntoIterator<Item = &'a Sentence>
    {
        let mut accumulator = PointAccumulator::new();
        let mut points: Vec<_> = sentences.into_iter()
            .filter(|sentence| sentence.is_valid)
            .filter_map(|sentence| accumulator.ingest(sentence))
            .collect();

        points.extend(accumulator.finish());
        points
    }
}

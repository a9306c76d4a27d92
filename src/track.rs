use std::fmt;

use ord_subset::OrdSubsetIterExt;

use crate::Point;
use crate::haversine::haversine_distance;

/// Key figures of a converted track
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackSummary {
    pub points: usize,
    /// Length along the path in kilometers
    pub distance: f64,
    pub min_altitude: Option<f64>,
    pub max_altitude: Option<f64>,
}

impl TrackSummary {
    pub fn from_points<T: Point>(points: &[T]) -> TrackSummary {
        let distance = points.iter().zip(points.iter().skip(1))
            .map(|(fix1, fix2)| haversine_distance(fix1, fix2))
            .fold(0., |total, leg| total + leg);

        TrackSummary {
            points: points.len(),
            distance,
            min_altitude: points.iter().map(|fix| fix.altitude()).ord_subset_min(),
            max_altitude: points.iter().map(|fix| fix.altitude()).ord_subset_max(),
        }
    }
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points, {:.3} km", self.points, self.distance)?;
        if let (Some(min), Some(max)) = (self.min_altitude, self.max_altitude) {
            write!(f, ", altitude {:.1} m .. {:.1} m", min, max)?;
        }
        Ok(())
    }
}

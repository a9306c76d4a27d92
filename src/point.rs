use chrono::NaiveTime;

pub trait Point {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    fn altitude(&self) -> f64;
}

/// A single fix of the ground track, merged from all sentences that share
/// the same `timestamp`.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub timestamp: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Point3D {
    pub fn new(timestamp: NaiveTime) -> Self {
        Point3D { timestamp, latitude: 0., longitude: 0., altitude: 0. }
    }
}

impl Point for Point3D {
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
    fn altitude(&self) -> f64 {
        self.altitude
    }
}

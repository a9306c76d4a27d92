extern crate chrono;
extern crate failure;
extern crate nmea;
extern crate ord_subset;

pub mod accumulator;
pub mod convert;
pub mod haversine;
pub mod kml;
mod point;
pub mod sentence;
pub mod track;

pub use crate::accumulator::PointAccumulator;
pub use crate::convert::{convert, ConvertOptions, Error};
pub use crate::point::{Point, Point3D};
pub use crate::sentence::{Sentence, SentenceType};
pub use crate::track::TrackSummary;

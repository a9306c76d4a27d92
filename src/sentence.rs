use std::fmt;

use chrono::NaiveTime;
use failure::Fail;
use nmea::ParseResult;
use nmea::sentences::FixType;
use nmea::sentences::rmc::RmcStatusOfFix;

#[derive(Debug, Fail, PartialEq)]
pub enum ParseError {
    #[fail(display = "empty line")]
    Empty,
    #[fail(display = "not an NMEA sentence: {}", _0)]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceType {
    GGA,
    RMC,
    GLL,
    Other,
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceType::GGA => f.write_str("GGA"),
            SentenceType::RMC => f.write_str("RMC"),
            SentenceType::GLL => f.write_str("GLL"),
            SentenceType::Other => f.write_str("other"),
        }
    }
}

/// One parsed NMEA sentence
///
/// Every positional field is optional: it is `None` when the sentence type
/// does not carry it, or when the receiver left it empty.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub sentence_type: SentenceType,
    pub timestamp: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub is_valid: bool,
}

impl Sentence {
    fn new(sentence_type: SentenceType) -> Self {
        Sentence {
            sentence_type,
            timestamp: None,
            latitude: None,
            longitude: None,
            altitude: None,
            is_valid: true,
        }
    }
}

/// Parses a single line of an NMEA log
///
/// Only `GGA`, `RMC` and `GLL` carry positions. Every other sentence the
/// `nmea` crate understands comes back without timestamp or position, so
/// it can never open a point on its own.
///
pub fn parse(line: &str) -> Result<Sentence, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let result = nmea::parse_str(line)
        .map_err(|error| ParseError::Malformed(format!("{:?}", error)))?;

    let sentence = match result {
        ParseResult::GGA(data) => Sentence {
            timestamp: data.fix_time,
            latitude: data.latitude,
            longitude: data.longitude,
            altitude: data.altitude.map(f64::from),
            is_valid: !matches!(data.fix_type, None | Some(FixType::Invalid)),
            ..Sentence::new(SentenceType::GGA)
        },
        ParseResult::RMC(data) => Sentence {
            timestamp: data.fix_time,
            latitude: data.lat,
            longitude: data.lon,
            is_valid: !matches!(data.status_of_fix, RmcStatusOfFix::Invalid),
            ..Sentence::new(SentenceType::RMC)
        },
        ParseResult::GLL(data) => Sentence {
            timestamp: Some(data.fix_time),
            latitude: data.latitude,
            longitude: data.longitude,
            is_valid: data.valid,
            ..Sentence::new(SentenceType::GLL)
        },
        _ => Sentence::new(SentenceType::Other),
    };

    Ok(sentence)
}

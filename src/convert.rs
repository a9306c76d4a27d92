use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use failure::Fail;
use log::{debug, info, trace};

use crate::Point3D;
use crate::accumulator::PointAccumulator;
use crate::kml::KmlWriter;
use crate::sentence;
use crate::track::TrackSummary;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "cannot open input {}: {}", path, cause)]
    InputUnavailable { path: String, #[cause] cause: io::Error },
    #[fail(display = "cannot create output {}: {}", path, cause)]
    OutputUnavailable { path: String, #[cause] cause: io::Error },
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// `<name>` of the KML document
    pub name: String,
    pub description: String,
    /// Emit the last point when the input ends
    pub flush_last: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            name: "stdin".to_string(),
            description: "Track converted from NMEA sentences".to_string(),
            flush_last: true,
        }
    }
}

impl ConvertOptions {
    /// Names the document after the input file, `GPSLOG13.TXT` becomes `GPSLOG13`
    pub fn for_input(path: &Path) -> Self {
        let name = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        ConvertOptions {
            name,
            description: format!("Track converted from {}", path.display()),
            ..ConvertOptions::default()
        }
    }
}

/// Opens `path` for reading, or standard input for `None` and `-`
///
/// The first chunk is read right away, so a source that opens but can not
/// be read (e.g. a directory) fails here, before any output exists.
///
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, Error> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!("Reading {}", path.display());
            let unavailable = |cause| Error::InputUnavailable {
                path: path.display().to_string(),
                cause,
            };

            let mut reader = BufReader::new(File::open(path).map_err(unavailable)?);
            reader.fill_buf().map_err(unavailable)?;
            Ok(Box::new(reader))
        }
        _ => {
            debug!("Reading standard input");
            let mut reader = BufReader::new(io::stdin());
            reader.fill_buf().map_err(|cause| Error::InputUnavailable {
                path: "stdin".to_string(),
                cause,
            })?;
            Ok(Box::new(reader))
        }
    }
}

/// Creates `path` for writing, or returns standard output for `None` and `-`
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!("Writing {}", path.display());
            let file = File::create(path).map_err(|cause| Error::OutputUnavailable {
                path: path.display().to_string(),
                cause,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Reads NMEA sentences line by line from `reader` and writes the resulting
/// KML path to `writer`
///
/// Lines that can not be parsed, and sentences the receiver marked as
/// invalid, are skipped.
///
pub fn convert<R: BufRead, W: Write>(mut reader: R, writer: W, options: &ConvertOptions) -> Result<TrackSummary, Error> {
    let mut kml = KmlWriter::new(writer, &options.name, &options.description)?;
    let mut accumulator = PointAccumulator::new();
    let mut points: Vec<Point3D> = Vec::new();

    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let sentence = match sentence::parse(&line) {
            Ok(sentence) => sentence,
            Err(error) => {
                trace!("line {}: {}", line_number, error);
                continue;
            }
        };

        if !sentence.is_valid {
            trace!("line {}: skipping invalid {} sentence", line_number, sentence.sentence_type);
            continue;
        }

        if let Some(point) = accumulator.ingest(&sentence) {
            kml.write_point(&point)?;
            points.push(point);
        }
    }

    match accumulator.finish() {
        Some(point) if options.flush_last => {
            kml.write_point(&point)?;
            points.push(point);
        }
        Some(point) => debug!("Dropping last point at {}", point.timestamp),
        None => {}
    }

    kml.finish()?;

    debug!("{} lines read", line_number);
    let summary = TrackSummary::from_points(&points);
    info!("{}", summary);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{convert, open_input, ConvertOptions, Error};

    const LOG: &str = "\
$GPGGA,120000,1000.000,N,02000.000,E,1,08,0.9,5.0,M,,M,,*58
$GPRMC,120000,A,1000.000,N,02000.000,E,0.0,0.0,010117,,*1B
$GPGGA,120001,1100.000,N,02100.000,E,1,08,0.9,6.0,M,,M,,*5A
";

    fn run(input: &str, options: &ConvertOptions) -> String {
        let mut output = Vec::new();
        convert(input.as_bytes(), &mut output, options).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn coordinates(kml: &str) -> Vec<&str> {
        kml.lines()
            .skip_while(|line| !line.contains("<coordinates>"))
            .skip(1)
            .take_while(|line| !line.contains("</coordinates>"))
            .map(str::trim)
            .collect()
    }

    #[test]
    fn flushes_last_point() {
        let kml = run(LOG, &ConvertOptions::default());
        assert_eq!(coordinates(&kml), vec!["20.000000,10.000000,5.0", "21.000000,11.000000,6.0"]);
    }

    #[test]
    fn drops_last_point() {
        let options = ConvertOptions { flush_last: false, ..ConvertOptions::default() };
        let kml = run(LOG, &options);
        assert_eq!(coordinates(&kml), vec!["20.000000,10.000000,5.0"]);
    }

    #[test]
    fn skips_garbage() {
        let input = format!("garbage\n\n{}\u{0}\u{1}$GP\n", LOG);
        let mut bytes = input.into_bytes();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);

        let mut output = Vec::new();
        let summary = convert(&bytes[..], &mut output, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.points, 2);
    }

    #[test]
    fn document_name() {
        let options = ConvertOptions::for_input(Path::new("logs/GPSLOG13.TXT"));
        assert_eq!(options.name, "GPSLOG13");
        assert!(options.flush_last);

        let kml = run("", &options);
        assert!(kml.contains("<name>GPSLOG13</name>"));
        assert!(coordinates(&kml).is_empty());
    }

    #[test]
    fn missing_input() {
        match open_input(Some(Path::new("does/not/exist.nmea"))) {
            Err(Error::InputUnavailable { path, .. }) => assert_eq!(path, "does/not/exist.nmea"),
            Err(error) => panic!("unexpected error: {}", error),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn directory_input() {
        let dir = std::env::temp_dir();
        match open_input(Some(dir.as_path())) {
            Err(Error::InputUnavailable { path, .. }) => assert_eq!(path, dir.display().to_string()),
            Err(error) => panic!("unexpected error: {}", error),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn time_only_sentences_are_not_points() {
        let input = "\
$GPZDA,120000.00,18,10,2026,00,00*6B
$GPGGA,120000.00,,,,,0,00,,,M,,M,,*4B
$GPGGA,120000,1000.000,N,02000.000,E,1,08,0.9,5.0,M,,M,,*58
";
        let kml = run(input, &ConvertOptions::default());
        assert_eq!(coordinates(&kml), vec!["20.000000,10.000000,5.0"]);
    }
}

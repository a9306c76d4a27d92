use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

use crate::Point;

const STYLE: &str = r##"    <Style id="yellowLineGreenPoly">
      <LineStyle>
        <color>7f00ffff</color>
        <width>4</width>
      </LineStyle>
      <PolyStyle>
        <color>7f00ff00</color>
      </PolyStyle>
    </Style>
    <Placemark>
      <name>Absolute Extruded</name>
      <description>Transparent green wall with yellow
    outlines</description>
      <styleUrl>#yellowLineGreenPoly</styleUrl>
      <LineString>
        <extrude>1</extrude>
        <tessellate>1</tessellate>
        <altitudeMode>absolute</altitudeMode>
        <coordinates>
"##;

const FOOTER: &str = r#"        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>
"#;

/// `lon,lat,alt` tuple of a single point inside a `<coordinates>` element
pub struct Coordinate<'a>(pub &'a dyn Point);

impl fmt::Display for Coordinate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // lat/lon always carry exactly six decimals (~0.1 m), altitude one
        write!(f, "{:.6},{:.6},{:.1}", self.0.longitude(), self.0.latitude(), self.0.altitude())
    }
}

/// Writes a KML document containing one extruded `<LineString>`
///
/// Points are written as they arrive, so the document is only complete
/// once `finish()` has been called.
///
pub struct KmlWriter<W: Write> {
    writer: W,
    points: usize,
}

impl<W: Write> KmlWriter<W> {
    /// Writes the document header up to the opening `<coordinates>` tag
    pub fn new(mut writer: W, name: &str, description: &str) -> io::Result<Self> {
        writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(writer, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
        writeln!(writer, "  <Document>")?;
        writeln!(writer, "    <name>{}</name>", escape(name))?;
        writeln!(writer, "    <description>{}</description>", escape(description))?;
        writer.write_all(STYLE.as_bytes())?;

        Ok(KmlWriter { writer, points: 0 })
    }

    pub fn write_point(&mut self, point: &dyn Point) -> io::Result<()> {
        self.points += 1;
        writeln!(self.writer, "     {}", Coordinate(point))
    }

    /// Number of points written so far
    pub fn points(&self) -> usize {
        self.points
    }

    /// Closes all open elements and returns the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.write_all(FOOTER.as_bytes())?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '<' | '>' | '&' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point3D;
    use chrono::NaiveTime;

    fn point(latitude: f64, longitude: f64, altitude: f64) -> Point3D {
        Point3D { latitude, longitude, altitude, ..Point3D::new(NaiveTime::from_hms_opt(0, 0, 0).unwrap()) }
    }

    #[test]
    fn coordinate_order_and_precision() {
        let p = point(41.123456, -73.987654, 123.45);
        assert_eq!(Coordinate(&p).to_string(), "-73.987654,41.123456,123.5");

        let p = point(10., 20., 5.);
        assert_eq!(Coordinate(&p).to_string(), "20.000000,10.000000,5.0");
    }

    #[test]
    fn document() {
        let mut kml = KmlWriter::new(Vec::new(), "GPSLOG13", "drive home").unwrap();
        kml.write_point(&point(10., 20., 5.)).unwrap();
        kml.write_point(&point(11., 21., 6.)).unwrap();
        assert_eq!(kml.points(), 2);

        let output = String::from_utf8(kml.finish().unwrap()).unwrap();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml"));
        assert!(output.contains("    <name>GPSLOG13</name>\n"));
        assert!(output.contains("<altitudeMode>absolute</altitudeMode>"));
        assert!(output.contains("<coordinates>\n     20.000000,10.000000,5.0\n     21.000000,11.000000,6.0\n        </coordinates>"));
        assert!(output.ends_with("</kml>\n"));
    }

    #[test]
    fn empty_document_is_well_formed() {
        let kml = KmlWriter::new(Vec::new(), "empty", "").unwrap();
        assert_eq!(kml.points(), 0);

        let output = String::from_utf8(kml.finish().unwrap()).unwrap();
        assert!(output.contains("<coordinates>\n        </coordinates>"));
    }

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape("GPSLOG13"), "GPSLOG13");
        assert_eq!(escape("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
    }
}

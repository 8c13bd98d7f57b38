//! Content-negotiated response readers.
//!
//! The declared MIME type of a response picks a [`ReaderKind`]; the reader
//! then consumes the body source to completion and returns it as text.
//! Readers take the source by value, so it is released exactly once whether
//! reading succeeds or fails part way through.

use mime::Mime;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The response decoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderKind {
    /// Reads the body as text. The fallback for every non-XML type.
    Json,

    /// Reads the body as UTF-8 text after dropping a byte-order mark.
    Xml,
}

impl ReaderKind {
    /// Maps a `Content-Type` value to a reader.
    ///
    /// `application/json` selects [`ReaderKind::Json`] and `application/xml`
    /// selects [`ReaderKind::Xml`], ignoring case and parameters. Anything
    /// else, including a missing or unparseable value, falls back to JSON.
    ///
    /// ```
    /// use vr_client::ReaderKind;
    ///
    /// assert_eq!(ReaderKind::for_content_type(Some("application/xml; charset=utf-8")), ReaderKind::Xml);
    /// assert_eq!(ReaderKind::for_content_type(Some("text/plain")), ReaderKind::Json);
    /// assert_eq!(ReaderKind::for_content_type(None), ReaderKind::Json);
    /// ```
    pub fn for_content_type(content_type: Option<&str>) -> Self {
        let Some(mime) = content_type.and_then(|ct| ct.trim().parse::<Mime>().ok()) else {
            return ReaderKind::Json;
        };
        if mime.essence_str().eq_ignore_ascii_case("application/xml") {
            ReaderKind::Xml
        } else {
            ReaderKind::Json
        }
    }

    /// Reads `body` to completion with this strategy.
    pub fn read<R: Read>(self, body: R, options: ReadOptions) -> io::Result<String> {
        match self {
            ReaderKind::Json => JsonReader {
                join_lines: options.join_lines,
            }
            .read(body),
            ReaderKind::Xml => XmlReader.read(body),
        }
    }
}

impl fmt::Display for ReaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderKind::Json => f.write_str("json"),
            ReaderKind::Xml => f.write_str("xml"),
        }
    }
}

/// Reader switches carried over from the transport configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// See [`JsonReader::join_lines`].
    pub join_lines: bool,
}

/// Materializes a response body into text.
pub trait ResponseReader {
    /// Consumes `body` fully and returns its text. `body` is dropped before
    /// this returns, on every path.
    fn read<R: Read>(&self, body: R) -> io::Result<String>;
}

/// Reads JSON bodies.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the read; the classifier judges what comes out.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader {
    /// Concatenate lines with their terminators removed instead of keeping
    /// the body as one blob. Newlines inside string values are lost.
    pub join_lines: bool,
}

impl ResponseReader for JsonReader {
    fn read<R: Read>(&self, body: R) -> io::Result<String> {
        if !self.join_lines {
            let mut body = body;
            let mut bytes = Vec::new();
            body.read_to_end(&mut bytes)?;
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        let mut text = String::new();
        for line in BufReader::new(body).split(b'\n') {
            let line = line?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line);
            text.push_str(&String::from_utf8_lossy(line));
        }
        Ok(text)
    }
}

/// Reads XML bodies, dropping a leading UTF-8 byte-order mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlReader;

impl ResponseReader for XmlReader {
    fn read<R: Read>(&self, body: R) -> io::Result<String> {
        let mut body = body;
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)?;
        drop(body);

        if bytes.starts_with(UTF8_BOM) {
            bytes.drain(..UTF8_BOM.len());
        }
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A body source that counts how often it is released and can fail
    /// after yielding a prefix.
    struct TrackedBody {
        inner: Cursor<Vec<u8>>,
        fail_after: Option<usize>,
        served: usize,
        drops: Arc<AtomicUsize>,
    }

    impl TrackedBody {
        fn new(bytes: &[u8], fail_after: Option<usize>) -> (Self, Arc<AtomicUsize>) {
            let drops = Arc::new(AtomicUsize::new(0));
            let body = Self {
                inner: Cursor::new(bytes.to_vec()),
                fail_after,
                served: 0,
                drops: drops.clone(),
            };
            (body, drops)
        }
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(limit) = self.fail_after {
                if self.served >= limit {
                    return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
                }
                let room = (limit - self.served).min(buf.len());
                let n = self.inner.read(&mut buf[..room])?;
                self.served += n;
                return Ok(n);
            }
            let n = self.inner.read(buf)?;
            self.served += n;
            Ok(n)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_content_type_dispatch() {
        let cases = [
            (Some("application/json"), ReaderKind::Json),
            (Some("application/json; charset=UTF-8"), ReaderKind::Json),
            (Some("APPLICATION/XML"), ReaderKind::Xml),
            (Some("application/xml;charset=utf-8"), ReaderKind::Xml),
            (Some("text/xml"), ReaderKind::Json),
            (Some("text/plain"), ReaderKind::Json),
            (Some("text/html"), ReaderKind::Json),
            (Some(""), ReaderKind::Json),
            (Some("not a mime type"), ReaderKind::Json),
            (None, ReaderKind::Json),
        ];
        for (content_type, expected) in cases {
            assert_eq!(
                ReaderKind::for_content_type(content_type),
                expected,
                "{:?}",
                content_type
            );
        }
    }

    #[test]
    fn test_json_reader_keeps_body_by_default() {
        let body = "{\n  \"name\": \"List A\"\r\n}\n";
        let text = JsonReader::default().read(body.as_bytes()).unwrap();
        assert_eq!(text, body);
    }

    #[test]
    fn test_json_reader_joins_lines_when_asked() {
        let body = "{\n  \"name\": \"List A\",\r\n  \"url\": \"http://x/1\"\n}\n";
        let text = JsonReader { join_lines: true }.read(body.as_bytes()).unwrap();
        assert_eq!(text, "{  \"name\": \"List A\",  \"url\": \"http://x/1\"}");
    }

    #[test]
    fn test_json_reader_replaces_invalid_utf8() {
        let body = b"{\"name\":\"caf\xe9\"}";
        let text = JsonReader::default().read(&body[..]).unwrap();
        assert_eq!(text, "{\"name\":\"caf\u{FFFD}\"}");

        let body = b"{\"name\":\r\n\"caf\xe9\"}\n";
        let text = JsonReader { join_lines: true }.read(&body[..]).unwrap();
        assert_eq!(text, "{\"name\":\"caf\u{FFFD}\"}");
    }

    #[test]
    fn test_xml_reader_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<list><name>A</name></list>\n");
        let text = XmlReader.read(bytes.as_slice()).unwrap();
        assert_eq!(text, "<list><name>A</name></list>\n");
    }

    #[test]
    fn test_xml_reader_rejects_invalid_utf8() {
        let err = XmlReader.read(&b"<a>\xFF</a>"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_body_released_once_on_success() {
        for kind in [ReaderKind::Json, ReaderKind::Xml] {
            for join_lines in [false, true] {
                let (body, drops) = TrackedBody::new(b"{\"name\":\"x\"}\n", None);
                let text = kind.read(body, ReadOptions { join_lines }).unwrap();
                assert!(text.starts_with("{\"name\""));
                assert_eq!(drops.load(Ordering::SeqCst), 1, "{kind} join={join_lines}");
            }
        }
    }

    #[test]
    fn test_body_released_once_when_reading_fails() {
        for kind in [ReaderKind::Json, ReaderKind::Xml] {
            for join_lines in [false, true] {
                let (body, drops) = TrackedBody::new(b"{\"name\":\n\"partial\"}", Some(10));
                let err = kind.read(body, ReadOptions { join_lines }).unwrap_err();
                assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
                assert_eq!(drops.load(Ordering::SeqCst), 1, "{kind} join={join_lines}");
            }
        }
    }
}

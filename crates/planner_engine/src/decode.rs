use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMarkup {
    pub markup: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode a plan body into UTF-8 using: BOM -> Content-Type charset -> chardetng guess.
pub fn decode_markup(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedMarkup, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let (name, value) = part.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']))
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedMarkup, DecodeError> {
    let (text, used, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: used.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedMarkup {
        markup: text.into_owned(),
        encoding_label: used.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parameter_is_case_insensitive() {
        assert_eq!(extract_charset("text/html; Charset=\"UTF-8\""), Some("UTF-8"));
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn header_charset_is_honored() {
        let decoded = decode_markup(b"caf\xe9", Some("text/html; charset=iso-8859-1")).unwrap();
        assert_eq!(decoded.markup, "café");
        assert_eq!(decoded.encoding_label, "windows-1252");
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_markup(b"\xef\xbb\xbf<p>\xc3\xa9</p>", Some("text/html; charset=latin1"))
            .unwrap();
        assert_eq!(decoded.markup, "<p>é</p>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn invalid_utf8_with_declared_charset_fails() {
        let err = decode_markup(b"ok \xc3\x28", Some("text/html; charset=utf-8")).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailure { .. }));
    }
}

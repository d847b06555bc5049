//! Input decoding with encoding auto-detection, and group size parsing.
//!
//! Turns raw bytes from a file, stdin, or an upload into text for the
//! grouping transform. No grouping logic here.

use std::io::Read;
use std::path::Path;

use crate::error::{InputError, InputResult};

/// Decoded text with the encoding that was used
#[derive(Debug, Clone)]
pub struct DecodedInput {
    /// Decoded text
    pub text: String,
    /// Detected or requested encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet.
///
/// Valid UTF-8 is reported as `utf-8` without consulting chardet, since
/// short inputs are easy to misdetect.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    normalize_encoding(&result.0)
}

/// Map chardet charset names onto labels `encoding_rs` understands.
fn normalize_encoding(charset: &str) -> String {
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        // GB18030 is a superset of both
        "gb2312" | "gbk" | "gb18030" => "gb18030".to_string(),
        other => {
            if encoding_rs::Encoding::for_label(other.as_bytes()).is_some() {
                other.to_string()
            } else {
                "utf-8".to_string()
            }
        }
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// Invalid sequences are replaced rather than rejected. A leading byte order
/// mark is dropped. Labels `encoding_rs` does not know fall back to UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> InputResult<String> {
    match lookup_encoding(encoding) {
        Some(enc) => {
            let (text, _, _) = enc.decode(bytes);
            Ok(text.into_owned())
        }
        // Fallback: UTF-8 with lossy conversion
        None => {
            let text = String::from_utf8_lossy(bytes);
            Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
        }
    }
}

/// Non-UTF-8 encoding for a label, `None` for UTF-8 and unknown labels.
fn lookup_encoding(label: &str) -> Option<&'static encoding_rs::Encoding> {
    match label.trim().to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => None,
        other => encoding_rs::Encoding::for_label(other.as_bytes()),
    }
}

/// Decode bytes with auto-detected encoding.
pub fn decode_auto(bytes: &[u8]) -> InputResult<DecodedInput> {
    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding)?;
    Ok(DecodedInput { text, encoding })
}

/// Decode bytes, using `encoding` when given and auto-detection otherwise.
pub fn decode_with(bytes: &[u8], encoding: Option<&str>) -> InputResult<DecodedInput> {
    match encoding {
        Some(label) => Ok(DecodedInput {
            text: decode_content(bytes, label)?,
            encoding: match lookup_encoding(label) {
                Some(_) => label.trim().to_lowercase(),
                None => "utf-8".to_string(),
            },
        }),
        None => decode_auto(bytes),
    }
}

/// Read raw input from a file, or from stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> InputResult<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(std::fs::read(p)?),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Reject inputs above `limit` bytes.
pub fn ensure_size(size: usize, limit: usize) -> InputResult<()> {
    if size > limit {
        return Err(InputError::TooLarge { size, limit });
    }
    Ok(())
}

/// Parse a group size typed by the user.
///
/// Only checks that the value is an integer; range checks belong to the
/// transform, so `"0"` and `"-3"` parse fine here.
///
/// # Example
/// ```
/// use numgroup::parse_group_size;
///
/// assert_eq!(parse_group_size(" 3 ").unwrap(), 3);
/// assert!(parse_group_size("three").is_err());
/// ```
pub fn parse_group_size(raw: &str) -> InputResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingGroupSize);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::InvalidGroupSize(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_group_size() {
        assert_eq!(parse_group_size("3").unwrap(), 3);
        assert_eq!(parse_group_size("  12\n").unwrap(), 12);
        assert_eq!(parse_group_size("-3").unwrap(), -3);
        assert_eq!(parse_group_size("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_group_size_errors() {
        assert!(matches!(parse_group_size(""), Err(InputError::MissingGroupSize)));
        assert!(matches!(parse_group_size("   "), Err(InputError::MissingGroupSize)));

        let err = parse_group_size("2.5").unwrap_err();
        assert!(matches!(err, InputError::InvalidGroupSize(ref v) if v == "2.5"));
        assert!(err.to_string().contains("invalid M"));
    }

    #[test]
    fn test_detect_utf8() {
        assert_eq!(detect_encoding(b"1\n2\n3"), "utf-8");
        assert_eq!(detect_encoding("第一行\n第二行".as_bytes()), "utf-8");
        assert_eq!(detect_encoding(b""), "utf-8");
    }

    #[test]
    fn test_normalize_encoding() {
        assert_eq!(normalize_encoding("GB2312"), "gb18030");
        assert_eq!(normalize_encoding("ISO-8859-1"), "iso-8859-1");
        assert_eq!(normalize_encoding("ascii"), "utf-8");
        assert_eq!(normalize_encoding("not-a-charset"), "utf-8");
        assert_eq!(normalize_encoding("Big5"), "big5");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_gbk_decoding() {
        // "中文" in GBK
        let bytes: &[u8] = &[0xD6, 0xD0, 0xCE, 0xC4];
        let decoded = decode_content(bytes, "gb18030").unwrap();
        assert_eq!(decoded, "中文");
    }

    #[test]
    fn test_bom_stripped() {
        let decoded = decode_content(b"\xEF\xBB\xBFa\nb", "utf-8").unwrap();
        assert_eq!(decoded, "a\nb");
    }

    #[test]
    fn test_unknown_encoding_label_falls_back_to_utf8() {
        assert_eq!(decode_content(b"1\n2", "klingon").unwrap(), "1\n2");
        assert_eq!(decode_content(b"a\xFFb", "klingon").unwrap(), "a\u{FFFD}b");

        let decoded = decode_with(b"x\ny", Some("klingon")).unwrap();
        assert_eq!(decoded.text, "x\ny");
        assert_eq!(decoded.encoding, "utf-8");
    }

    #[test]
    fn test_decode_with_explicit_label() {
        let decoded = decode_with(&[0xE9], Some("Windows-1252")).unwrap();
        assert_eq!(decoded.text, "é");
        assert_eq!(decoded.encoding, "windows-1252");

        let auto = decode_with(b"x\ny", None).unwrap();
        assert_eq!(auto.encoding, "utf-8");
    }

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1\n2\n").unwrap();

        let bytes = read_input(Some(file.path())).unwrap();
        assert_eq!(bytes, b"1\n2\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/definitely/not/here.txt"))).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn test_ensure_size() {
        assert!(ensure_size(10, 10).is_ok());
        assert!(matches!(
            ensure_size(11, 10),
            Err(InputError::TooLarge { size: 11, limit: 10 })
        ));
    }
}

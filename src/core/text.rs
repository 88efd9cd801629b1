use crate::utils::error::{KitError, Result};
use crate::utils::validation::validate_range;

const RADIX_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

pub fn is_not_blank(s: &str) -> bool {
    !is_blank(s)
}

pub fn is_empty_or_none(s: Option<&str>) -> bool {
    s.map_or(true, str::is_empty)
}

pub fn or_empty(s: Option<&str>) -> &str {
    s.unwrap_or("")
}

pub fn if_blank<'a>(s: &'a str, default: &'a str) -> &'a str {
    if is_blank(s) {
        default
    } else {
        s
    }
}

/// Left-pads to `len` chars.
pub fn pad_start(s: &str, len: usize, pad: char) -> String {
    let count = s.chars().count();
    if count >= len {
        return s.to_string();
    }
    let mut out: String = std::iter::repeat(pad).take(len - count).collect();
    out.push_str(s);
    out
}

pub fn pad_end(s: &str, len: usize, pad: char) -> String {
    let count = s.chars().count();
    let mut out = s.to_string();
    out.extend(std::iter::repeat(pad).take(len.saturating_sub(count)));
    out
}

/// Cuts `s` to at most `max` chars including the ellipsis.
pub fn truncate(s: &str, max: usize, ellipsis: &str) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let ellipsis_len = ellipsis.chars().count();
    if ellipsis_len > max {
        return s.chars().take(max).collect();
    }
    let keep = max - ellipsis_len;
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ellipsis);
    out
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_radix(value: i64, radix: u32) -> Result<String> {
    validate_range("radix", radix, 2, 36)?;

    if value == 0 {
        return Ok("0".to_string());
    }

    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(RADIX_DIGITS[(magnitude % radix as u64) as usize]);
        magnitude /= radix as u64;
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.reverse();

    String::from_utf8(digits).map_err(|e| KitError::parse(value.to_string(), e))
}

pub fn parse_radix(s: &str, radix: u32) -> Result<i64> {
    validate_range("radix", radix, 2, 36)?;
    i64::from_str_radix(s.trim(), radix).map_err(|e| KitError::parse(s, e))
}

/// `1234567` -> `1,234,567`.
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.trim()).map_err(|e| KitError::parse(s, e))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    Letter,
    Digit,
    Whitespace,
    Punctuation,
    Other,
}

pub fn classify(c: char) -> CharKind {
    if c.is_alphabetic() {
        CharKind::Letter
    } else if c.is_numeric() {
        CharKind::Digit
    } else if c.is_whitespace() {
        CharKind::Whitespace
    } else if c.is_ascii_punctuation() || is_general_punctuation(c) {
        CharKind::Punctuation
    } else {
        CharKind::Other
    }
}

fn is_general_punctuation(c: char) -> bool {
    matches!(c, '\u{2010}'..='\u{2027}' | '\u{3000}'..='\u{303F}' | '\u{FF01}'..='\u{FF0F}')
}

/// CJK unified ideographs, including extension A and compatibility ideographs.
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}'
    )
}

pub fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_checks() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(is_not_blank(" x "));
        assert!(is_empty_or_none(None));
        assert!(is_empty_or_none(Some("")));
        assert!(!is_empty_or_none(Some(" ")));
        assert_eq!(or_empty(None), "");
        assert_eq!(if_blank("  ", "fallback"), "fallback");
        assert_eq!(if_blank("value", "fallback"), "value");
    }

    #[test]
    fn test_padding_counts_chars() {
        assert_eq!(pad_start("7", 3, '0'), "007");
        assert_eq!(pad_start("1234", 3, '0'), "1234");
        assert_eq!(pad_end("é", 3, '.'), "é..");
        assert_eq!(pad_end("abc", 2, '.'), "abc");
    }

    #[test]
    fn test_truncate_and_case() {
        assert_eq!(truncate("hello world", 8, "..."), "hello...");
        assert_eq!(truncate("short", 8, "..."), "short");
        assert_eq!(truncate("hello", 2, "..."), "he");
        assert_eq!(truncate("hello", 3, "..."), "...");
        assert_eq!(truncate("hello", 0, "..."), "");
        assert_eq!(truncate("日本語テキスト", 3, ""), "日本語");
        assert_eq!(capitalize("rust"), "Rust");
        assert_eq!(decapitalize("Rust"), "rust");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_radix_conversion() {
        assert_eq!(to_radix(255, 16).unwrap(), "ff");
        assert_eq!(to_radix(-10, 2).unwrap(), "-1010");
        assert_eq!(to_radix(0, 36).unwrap(), "0");
        assert_eq!(to_radix(i64::MIN, 16).unwrap(), "-8000000000000000");
        assert!(to_radix(10, 1).is_err());
        assert_eq!(parse_radix("zz", 36).unwrap(), 1295);
        assert!(matches!(parse_radix("12", 2), Err(KitError::Parse { .. })));
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_234_567), "1,234,567");
        assert_eq!(format_grouped(-1_000), "-1,000");
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(from_hex("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(from_hex("xyz").is_err());
    }

    #[test]
    fn test_char_classification() {
        assert_eq!(classify('a'), CharKind::Letter);
        assert_eq!(classify('中'), CharKind::Letter);
        assert_eq!(classify('7'), CharKind::Digit);
        assert_eq!(classify(' '), CharKind::Whitespace);
        assert_eq!(classify('!'), CharKind::Punctuation);
        assert_eq!(classify('。'), CharKind::Punctuation);
        assert_eq!(classify('€'), CharKind::Other);
        assert!(is_cjk('中'));
        assert!(!is_cjk('a'));
        assert!(is_vowel('E'));
        assert!(!is_vowel('y'));
        assert!(is_word_char('_'));
        assert!(!is_word_char('-'));
    }
}

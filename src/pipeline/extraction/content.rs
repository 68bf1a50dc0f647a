//! Text recovery from binary transcript documents.
//!
//! This is a heuristic, not a full document-format parser: it only needs to
//! recover the labeled field/value text and the course table from documents
//! that are "mostly readable". Two strategies, tried in order:
//!
//! 1. Structural scan — walk `BT ... ET` text regions and collect the
//!    payloads of `(...) Tj` single-show and `[...] TJ` array-show
//!    operations.
//! 2. Printable fallback — keep printable ASCII plus the Turkish accented
//!    set, collapsing whitespace runs.

use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_text;
use super::ExtractionError;

/// Accented characters kept by the permissive fallback scan.
const ACCENTED_SET: &str = "çğıöşüÇĞİÖŞÜ";

/// How the text was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    StructuralScan,
    PrintableFallback,
}

/// Result of document text extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
}

impl ExtractedText {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Recover a flat text stream from raw document bytes.
///
/// Bytes are decoded as Latin-1 (every byte is a char, nothing can fail).
/// Fails with `NoReadableText` only when both strategies come back empty
/// after sanitization.
pub fn extract_document_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let content: String = bytes.iter().map(|&b| b as char).collect();

    let structural = scan_text_regions(&content);
    let (raw, method) = if structural.trim().is_empty() {
        (printable_fallback(&content), ExtractionMethod::PrintableFallback)
    } else {
        (structural, ExtractionMethod::StructuralScan)
    };

    let text = sanitize_text(&raw);
    if text.is_empty() {
        return Err(ExtractionError::NoReadableText);
    }

    tracing::info!(
        method = ?method,
        chars = text.len(),
        lines = text.lines().count(),
        "Document text recovered"
    );

    Ok(ExtractedText { text, method })
}

/// Collect show-text payloads from every `BT ... ET` region.
/// Payloads are joined with single spaces; regions are separated by newlines
/// so downstream line-oriented extraction sees one region per line.
fn scan_text_regions(content: &str) -> String {
    let mut regions = Vec::new();
    let mut pos = 0;

    while let Some(found) = find_token(content, pos, "BT") {
        let region_start = found + 2;
        let Some(end) = find_token(content, region_start, "ET") else {
            break;
        };
        let payload = show_text_payloads(&content[region_start..end]);
        if !payload.is_empty() {
            regions.push(payload);
        }
        pos = end + 2;
    }

    regions.join("\n")
}

/// Find a structural token at a word boundary (not embedded in other text).
fn find_token(content: &str, from: usize, token: &str) -> Option<usize> {
    let mut search = from;
    while let Some(rel) = content[search..].find(token) {
        let idx = search + rel;
        let before_ok = content[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        let after_ok = content[idx + token.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        if before_ok && after_ok {
            return Some(idx);
        }
        search = idx + token.len();
    }
    None
}

/// Extract the payloads of `(...) Tj` and `[...] TJ` operations in a region.
fn show_text_payloads(region: &str) -> String {
    let chars: Vec<char> = region.chars().collect();
    let mut payloads = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '(' => {
                let (literal, next) = read_string_literal(&chars, i);
                if operator_follows(&chars, next, "Tj") {
                    payloads.push(literal);
                }
                i = next;
            }
            '[' => {
                let (combined, next) = read_array_strings(&chars, i);
                if operator_follows(&chars, next, "TJ") && !combined.is_empty() {
                    payloads.push(combined);
                }
                i = next;
            }
            _ => i += 1,
        }
    }

    payloads.join(" ")
}

/// Read a parenthesized string literal starting at `open`. Handles `\(`,
/// `\)`, `\\` escapes and balanced nested parentheses. Returns the literal
/// and the index just past the closing paren.
fn read_string_literal(chars: &[char], open: usize) -> (String, usize) {
    let mut literal = String::new();
    let mut depth = 1;
    let mut i = open + 1;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                literal.push(chars[i + 1]);
                i += 2;
            }
            '(' => {
                depth += 1;
                literal.push('(');
                i += 1;
            }
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return (literal, i + 1);
                }
                literal.push(')');
                i += 1;
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }

    (literal, i)
}

/// Read a `[...]` array, concatenating its string elements (kerning numbers
/// between them are skipped). Returns the combined text and the index just
/// past the closing bracket.
fn read_array_strings(chars: &[char], open: usize) -> (String, usize) {
    let mut combined = String::new();
    let mut i = open + 1;

    while i < chars.len() {
        match chars[i] {
            '(' => {
                let (literal, next) = read_string_literal(chars, i);
                combined.push_str(&literal);
                i = next;
            }
            ']' => return (combined, i + 1),
            _ => i += 1,
        }
    }

    (combined, i)
}

/// Whether the named operator is the next token after optional whitespace.
fn operator_follows(chars: &[char], from: usize, operator: &str) -> bool {
    let mut i = from;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    let op: Vec<char> = operator.chars().collect();
    if i + op.len() > chars.len() {
        return false;
    }
    if chars[i..i + op.len()] != op[..] {
        return false;
    }
    // Token must end at the operator (next char not alphanumeric)
    chars
        .get(i + op.len())
        .map_or(true, |c| !c.is_ascii_alphanumeric())
}

/// Permissive scan: keep printable ASCII plus the accented set, collapse
/// whitespace runs. Runs containing a line break collapse to a single
/// newline so line structure survives for rule extraction.
fn printable_fallback(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut ws_run = false;
    let mut ws_had_newline = false;

    for c in content.chars() {
        if c == '\n' || c == '\r' || c == ' ' || c == '\t' {
            ws_run = true;
            ws_had_newline |= c == '\n' || c == '\r';
            continue;
        }
        let printable = ('!'..='~').contains(&c) || ACCENTED_SET.contains(c);
        if !printable {
            continue;
        }
        if ws_run && !out.is_empty() {
            out.push(if ws_had_newline { '\n' } else { ' ' });
        }
        ws_run = false;
        ws_had_newline = false;
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Structural scan ─────────────────────────────────────────────

    #[test]
    fn single_show_operation_recovered() {
        let result = extract_document_text(b"BT (Hello) Tj ET").unwrap();
        assert_eq!(result.text, "Hello");
        assert_eq!(result.method, ExtractionMethod::StructuralScan);
    }

    #[test]
    fn array_show_operation_recovered() {
        let result = extract_document_text(b"BT [(Hel) -250 (lo)] TJ ET").unwrap();
        assert_eq!(result.text, "Hello");
    }

    #[test]
    fn multiple_regions_on_separate_lines() {
        let result =
            extract_document_text(b"BT (First line) Tj ET 0 0 m BT (Second line) Tj ET").unwrap();
        assert_eq!(result.text, "First line\nSecond line");
    }

    #[test]
    fn payloads_within_region_space_separated() {
        let result = extract_document_text(b"BT (Hello) Tj 1 0 0 1 50 700 Tm (World) Tj ET").unwrap();
        assert_eq!(result.text, "Hello World");
    }

    #[test]
    fn escaped_parens_in_literal() {
        let result = extract_document_text(br"BT (a\(b\)c) Tj ET").unwrap();
        assert_eq!(result.text, "a(b)c");
    }

    #[test]
    fn nested_parens_balanced() {
        let result = extract_document_text(b"BT (outer (inner) text) Tj ET").unwrap();
        assert_eq!(result.text, "outer (inner) text");
    }

    #[test]
    fn literal_without_show_operator_ignored() {
        let result = extract_document_text(b"BT (skipped) /F1 12 Tf (shown) Tj ET").unwrap();
        assert_eq!(result.text, "shown");
    }

    #[test]
    fn bt_inside_word_not_a_region() {
        // "SUBTOTAL" contains BT but is not a region marker
        let result = extract_document_text(b"SUBTOTAL BT (Real) Tj ET").unwrap();
        assert_eq!(result.text, "Real");
    }

    #[test]
    fn unterminated_region_ignored() {
        let result = extract_document_text(b"BT (never closed) Tj");
        // No ET: structural scan finds nothing, fallback recovers the raw text
        let text = result.unwrap();
        assert_eq!(text.method, ExtractionMethod::PrintableFallback);
        assert!(text.text.contains("never closed"));
    }

    // ── Printable fallback ──────────────────────────────────────────

    #[test]
    fn plain_text_falls_back() {
        let result = extract_document_text("Öğrenci No: 180201045\nGANO: 3,42".as_bytes());
        // Bytes are decoded as Latin-1, so multi-byte UTF-8 Turkish letters
        // degrade, but the ASCII label/value text must survive.
        let text = result.unwrap();
        assert_eq!(text.method, ExtractionMethod::PrintableFallback);
        assert!(text.text.contains("renci No: 180201045"));
        assert!(text.text.contains("GANO: 3,42"));
    }

    #[test]
    fn fallback_preserves_line_structure() {
        let result = extract_document_text(b"Line one\n\nLine two   three").unwrap();
        assert_eq!(result.text, "Line one\nLine two three");
    }

    #[test]
    fn fallback_keeps_latin1_accented_set() {
        // 0xFC is u-umlaut in Latin-1; it is in the kept accented set
        let bytes = [b'G', b'u', 0xFC_u8, b'z'];
        let result = extract_document_text(&bytes).unwrap();
        assert_eq!(result.text, "Guüz");
    }

    // ── Failure modes ───────────────────────────────────────────────

    #[test]
    fn empty_document_rejected() {
        assert!(matches!(
            extract_document_text(b""),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn unreadable_bytes_rejected() {
        let bytes: Vec<u8> = (0u8..8).chain(std::iter::repeat(0x01).take(64)).collect();
        assert!(matches!(
            extract_document_text(&bytes),
            Err(ExtractionError::NoReadableText)
        ));
    }

    #[test]
    fn whitespace_only_rejected() {
        assert!(matches!(
            extract_document_text(b"   \n\t  \n"),
            Err(ExtractionError::NoReadableText)
        ));
    }
}

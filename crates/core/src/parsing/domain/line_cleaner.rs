/// Normalizes one line of OCR output before keyword matching.
///
/// Kill-list timestamps are frequently misread as letters (`O`, `Q`) and
/// separators come back as dashes of various kinds. Anything outside the
/// kill-list alphabet is dropped.
pub fn clean_ocr_line(line: &str) -> String {
    let line = line
        .replace(['O', 'Q'], "0")
        .replace("\u{e2}\u{20ac}\u{201d}", "-")
        .replace('\u{2014}', "-")
        .replace('=', "-");

    let kept: String = line.chars().filter(|&c| is_kill_list_char(c)).collect();
    kept.trim().to_string()
}

fn is_kill_list_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | ':' | '.' | ',' | '-')
}

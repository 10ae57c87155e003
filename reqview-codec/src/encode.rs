use std::fmt::Write;

/// Turns arbitrary message bytes into text that is safe to put in a text
/// widget. Valid UTF-8 is kept, `\n`, `\r` and `\t` stay literal, every
/// other control character and every byte of an invalid sequence becomes
/// `\xNN`.
pub fn to_display_text(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len());
    for chunk in input.utf8_chunks() {
        for ch in chunk.valid().chars() {
            match ch {
                '\n' | '\r' | '\t' => output.push(ch),
                ch if ch.is_control() => escape_char(&mut output, ch),
                ch => output.push(ch),
            }
        }
        for byte in chunk.invalid() {
            escape_byte(&mut output, *byte);
        }
    }
    output
}

fn escape_char(output: &mut String, ch: char) {
    let mut buffer = [0u8; 4];
    for byte in ch.encode_utf8(&mut buffer).as_bytes() {
        escape_byte(output, *byte);
    }
}

fn escape_byte(output: &mut String, byte: u8) {
    let _ = write!(output, "\\x{byte:02x}");
}

pub fn bytes_to_string_lossy(input: &[u8]) -> String {
    String::from_utf8_lossy(input).into_owned()
}

pub fn html_escape_str(input: &str) -> String {
    html_escape::encode_safe(input).to_string()
}

pub fn html_unescape_str(input: &str) -> String {
    html_escape::decode_html_entities(input).to_string()
}

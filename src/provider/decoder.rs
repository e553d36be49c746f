//! Decoder for the scrape provider's packer-obfuscated response
//!
//! The download page hides its HTML inside a self-invoking bootstrap of the
//! form `eval(function(h,u,n,t,e,r){...}("...", "...", "...", t, e, r))`.
//! Literal text is stored as delimited tokens in a custom numeral base and
//! reassembled character by character at load time. This module reverses
//! that scheme; it knows nothing about media semantics.

use crate::error::IgdlError;
use regex::Regex;
use tracing::debug;

/// Fixed ordered glyph set used by both directions of the base
/// conversion, sliced to the active radix.
const GLYPHS: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+/";

/// Call signature of the bootstrap's self-invocation; the six literal
/// arguments follow immediately after it.
const CALL_MARKER: &str = "decodeURIComponent(escape(r))}(";

/// Start of the service-reported error fragment
const ALERT_MARKER: &str = "getElementById(\"alert\").innerHTML = \"";

/// Start and trailing cut-off of the download-section fragment
const SECTION_MARKER: &str = "getElementById(\"download-section\").innerHTML = \"";
const SECTION_END: &str = "\"; document.getElementById(\"inputData\")";

/// The six positional values of one obfuscated response.
///
/// Parsed fresh from every response; the parameters rotate per request
/// and must never be cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscatedPayload {
    /// Token stream holding the hidden text (`h`)
    pub encoded_body: String,
    /// Rotating substitution alphabet (`n`); the delimiter character
    /// lives at `delimiter_index`
    pub dictionary: String,
    /// Radix the token digit strings are written in; always equals
    /// `delimiter_index` in this scheme
    pub source_radix: u32,
    /// Radix of the intermediate re-expression (`r`), effectively 10
    pub target_radix: u32,
    /// Position of the token delimiter inside `dictionary` (`e`)
    pub delimiter_index: usize,
    /// Value subtracted from each decoded magnitude before it becomes a
    /// code point (`t`)
    pub char_offset: i64,
}

/// Extract the six bootstrap arguments from a raw response body.
///
/// Fails with `DecodeError` when the call signature is absent, which
/// signals that the external format likely changed.
pub fn parse_payload(raw: &str) -> Result<ObfuscatedPayload, IgdlError> {
    let tail = raw
        .split(CALL_MARKER)
        .nth(1)
        .ok_or_else(|| IgdlError::DecodeError("obfuscated call signature not found".to_string()))?;

    let args_src = tail
        .split("))")
        .next()
        .unwrap_or("");

    let args: Vec<String> = args_src
        .split(',')
        .map(|v| v.trim().trim_matches('"').to_string())
        .collect();
    if args.len() < 6 {
        return Err(IgdlError::DecodeError(format!(
            "expected 6 bootstrap arguments, found {}",
            args.len()
        )));
    }

    // (h, u, n, t, e, r): the second argument is consumed by the
    // bootstrap's signature but never read.
    let char_offset: i64 = args[3]
        .parse()
        .map_err(|_| IgdlError::DecodeError(format!("non-numeric offset '{}'", args[3])))?;
    let delimiter_index: usize = args[4]
        .parse()
        .map_err(|_| IgdlError::DecodeError(format!("non-numeric delimiter index '{}'", args[4])))?;
    let target_radix: u32 = args[5].parse().unwrap_or(0);

    Ok(ObfuscatedPayload {
        encoded_body: args[0].clone(),
        dictionary: args[2].clone(),
        source_radix: delimiter_index as u32,
        target_radix,
        delimiter_index,
        char_offset,
    })
}

/// Convert a digit string between glyph-set radices.
///
/// Digits are read in reverse with positional weights as powers of the
/// source radix; unknown characters contribute nothing, as in the
/// original bootstrap. Returns `None` on magnitude overflow.
fn convert_base(digits: &str, from: u32, to: u32) -> Option<String> {
    let glyphs: Vec<char> = GLYPHS.chars().collect();
    let src = &glyphs[..from as usize];
    let dst = &glyphs[..to as usize];

    let mut magnitude: u128 = 0;
    for (pos, ch) in digits.chars().rev().enumerate() {
        if let Some(idx) = src.iter().position(|&c| c == ch) {
            let weight = (from as u128).checked_pow(pos as u32)?;
            magnitude = magnitude.checked_add((idx as u128).checked_mul(weight)?)?;
        }
    }

    let mut out = String::new();
    while magnitude > 0 {
        out.insert(0, dst[(magnitude % to as u128) as usize]);
        magnitude /= to as u128;
    }
    if out.is_empty() {
        out.push('0');
    }
    Some(out)
}

/// Run the numeral-decoding stage over a parsed payload, recovering the
/// hidden script text.
pub fn decode_payload(payload: &ObfuscatedPayload) -> Result<String, IgdlError> {
    if !(2..=64).contains(&payload.source_radix) {
        return Err(IgdlError::DecodeError(format!(
            "source radix {} out of range",
            payload.source_radix
        )));
    }
    // The bootstrap always re-expresses in decimal; tolerate a garbage
    // sixth argument the same way it does.
    let target_radix = if (2..=10).contains(&payload.target_radix) {
        payload.target_radix
    } else {
        10
    };

    let alphabet: Vec<char> = payload.dictionary.chars().collect();
    let delimiter = *alphabet.get(payload.delimiter_index).ok_or_else(|| {
        IgdlError::DecodeError(format!(
            "delimiter index {} outside dictionary of length {}",
            payload.delimiter_index,
            alphabet.len()
        ))
    })?;

    let mut out = String::new();
    for token in payload.encoded_body.split(delimiter).filter(|t| !t.is_empty()) {
        // Substitute each dictionary character with its zero-based index,
        // digit by digit, yielding a digit string in the source radix.
        let mut digits = String::new();
        for ch in token.chars() {
            match alphabet.iter().position(|&a| a == ch) {
                Some(idx) => digits.push_str(&idx.to_string()),
                None => digits.push(ch),
            }
        }

        let value_str = convert_base(&digits, payload.source_radix, target_radix)
            .ok_or_else(|| IgdlError::DecodeError("numeric overflow in payload".to_string()))?;
        let value: i64 = value_str.parse().map_err(|_| {
            IgdlError::DecodeError(format!("non-numeric decoded value '{}'", value_str))
        })?;

        let code_point = value - payload.char_offset;
        let ch = u32::try_from(code_point)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                IgdlError::DecodeError(format!("decoded code point {} out of range", code_point))
            })?;
        out.push(ch);
    }

    Ok(fix_utf8(out))
}

/// Best-effort repair of multi-byte characters.
///
/// The decode stage emits raw bytes as Latin-1-like code points; when
/// every code point fits a byte, reinterpret the sequence as UTF-8. On
/// any failure the uncorrected string is returned instead.
fn fix_utf8(s: String) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    for ch in s.chars() {
        let v = ch as u32;
        if v > 0xff {
            return s;
        }
        bytes.push(v as u8);
    }
    String::from_utf8(bytes).unwrap_or(s)
}

/// Collapse the literal backslash escapes the recovered fragments carry
fn collapse_escapes(s: &str) -> Result<String, IgdlError> {
    let re = Regex::new(r"\\(\\)?")?;
    Ok(re.replace_all(s, "").into_owned())
}

/// Recover the download-section HTML fragment from a raw scrape response.
///
/// Fails with `DecodeError` when any required marker is absent and with
/// `ProviderReported` when the recovered script carries a non-empty
/// `#alert` fragment — the service itself reporting a user-facing error
/// such as a private account or an invalid link.
pub fn decode(raw: &str) -> Result<String, IgdlError> {
    let payload = parse_payload(raw)?;
    debug!(
        body_len = payload.encoded_body.len(),
        radix = payload.source_radix,
        "decoding obfuscated payload"
    );
    let script = decode_payload(&payload)?;

    if let Some(tail) = script.split(ALERT_MARKER).nth(1) {
        let alert = tail.split("\";").next().unwrap_or("");
        if !alert.trim().is_empty() {
            return Err(IgdlError::ProviderReported(collapse_escapes(alert)?));
        }
    }

    let tail = script.split(SECTION_MARKER).nth(1).ok_or_else(|| {
        IgdlError::DecodeError("download section fragment not found".to_string())
    })?;
    let end = tail.find(SECTION_END).ok_or_else(|| {
        IgdlError::DecodeError("download section end marker not found".to_string())
    })?;
    collapse_escapes(&tail[..end])
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Test-only encoder producing byte-exact obfuscated responses.
    //!
    //! Inverse of the decode pipeline: each UTF-8 byte of the script is
    //! offset, written in base 9 over the alphabet "abcdefghij" (delimiter
    //! 'j' at index 9), and wrapped in the bootstrap call signature.

    const ALPHABET: &str = "abcdefghij";
    const OFFSET: i64 = 5;
    const RADIX: i64 = 9;

    /// Pack a plain script into a full obfuscated response body
    pub(crate) fn pack(script: &str) -> String {
        let alphabet: Vec<char> = ALPHABET.chars().collect();
        let delimiter = alphabet[RADIX as usize];

        let mut body = String::new();
        for &byte in script.as_bytes() {
            let mut v = byte as i64 + OFFSET;
            let mut token = String::new();
            while v > 0 {
                token.insert(0, alphabet[(v % RADIX) as usize]);
                v /= RADIX;
            }
            if token.is_empty() {
                token.push(alphabet[0]);
            }
            body.push_str(&token);
            body.push(delimiter);
        }

        format!(
            "<html><script>eval(function(h,u,n,t,e,r){{r=\"\";for(var i=0;i<h.length;i++){{/*...*/}}\
             return decodeURIComponent(escape(r))}}(\"{}\",\"{}\",\"{}\",{},{},{}))</script></html>",
            body, "unused", ALPHABET, OFFSET, RADIX, 10
        )
    }

    /// Wrap a download-section fragment in the script shape the real
    /// service emits, with an empty alert
    pub(crate) fn wrap_script(section_html: &str) -> String {
        format!(
            "setTimeout(function(){{\
             document.getElementById(\"alert\").innerHTML = \"\";\
             document.getElementById(\"download-section\").innerHTML = \"{}\"; \
             document.getElementById(\"inputData\").value = \"\";}}, 100);",
            section_html
        )
    }

    /// Same shape but with a populated alert fragment
    pub(crate) fn wrap_script_with_alert(alert: &str) -> String {
        format!(
            "setTimeout(function(){{\
             document.getElementById(\"alert\").innerHTML = \"{}\";\
             document.getElementById(\"download-section\").innerHTML = \"\"; \
             document.getElementById(\"inputData\").value = \"\";}}, 100);",
            alert
        )
    }
}

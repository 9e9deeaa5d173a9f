//! Character classification shared by the XPointer scanners.
//!
//! ASCII characters are classified through a 128-entry lookup table.
//! Anything above 0x7F is `NonAscii` and defers to the Unicode XID
//! properties for name-character decisions.

use unicode_xid::UnicodeXID;

/// Lexical class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CharClass {
    /// Anything without a dedicated class
    Other = 0,
    /// Space, tab, CR, LF
    Whitespace,
    /// `^` (escape introducer in scheme data)
    Caret,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `-`
    Minus,
    /// `.`
    Period,
    /// `/`
    Slash,
    /// `0`-`9`
    Digit,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `A`-`Z`, `a`-`z`
    Letter,
    /// `_`
    Underscore,
    /// Code point above 0x7F
    NonAscii,
}

const fn build_ascii_table() -> [CharClass; 128] {
    let mut table = [CharClass::Other; 128];

    table[b' ' as usize] = CharClass::Whitespace;
    table[b'\t' as usize] = CharClass::Whitespace;
    table[b'\n' as usize] = CharClass::Whitespace;
    table[b'\r' as usize] = CharClass::Whitespace;

    table[b'^' as usize] = CharClass::Caret;
    table[b'(' as usize] = CharClass::OpenParen;
    table[b')' as usize] = CharClass::CloseParen;
    table[b'-' as usize] = CharClass::Minus;
    table[b'.' as usize] = CharClass::Period;
    table[b'/' as usize] = CharClass::Slash;
    table[b':' as usize] = CharClass::Colon;
    table[b'=' as usize] = CharClass::Equal;
    table[b'_' as usize] = CharClass::Underscore;

    let mut c = b'0';
    while c <= b'9' {
        table[c as usize] = CharClass::Digit;
        c += 1;
    }

    let mut c = b'a';
    while c <= b'z' {
        table[c as usize] = CharClass::Letter;
        table[(c - b'a' + b'A') as usize] = CharClass::Letter;
        c += 1;
    }

    table
}

static ASCII_CLASSES: [CharClass; 128] = build_ascii_table();

/// Classify a character.
#[inline]
pub fn classify(ch: char) -> CharClass {
    if ch.is_ascii() {
        ASCII_CLASSES[ch as usize]
    } else {
        CharClass::NonAscii
    }
}

/// Can `ch` begin an NCName?
#[inline]
pub fn is_name_start(ch: char) -> bool {
    match classify(ch) {
        CharClass::Letter | CharClass::Underscore => true,
        CharClass::NonAscii => ch.is_xid_start(),
        _ => false,
    }
}

/// Can `ch` continue an NCName?
#[inline]
pub fn is_name_char(ch: char) -> bool {
    match classify(ch) {
        CharClass::Letter
        | CharClass::Underscore
        | CharClass::Digit
        | CharClass::Minus
        | CharClass::Period => true,
        CharClass::NonAscii => ch.is_xid_continue(),
        _ => false,
    }
}

/// Byte length of the NCName at the start of `input` (0 if there is none).
pub fn scan_ncname(input: &str) -> usize {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, ch)) if is_name_start(ch) => {}
        _ => return 0,
    }
    for (offset, ch) in chars {
        if !is_name_char(ch) {
            return offset;
        }
    }
    input.len()
}

/// Is the whole of `input` a single NCName?
pub fn is_ncname(input: &str) -> bool {
    !input.is_empty() && scan_ncname(input) == input.len()
}

//! String leaf rules.
//!
//! These operate on already-stringified leaves. The container transformers in
//! [`array`](crate::array) stringify each leaf with
//! [`coerce::to_string`](crate::coerce::to_string) and then call into here.
//!
//! Lengths and case mapping work on Unicode scalar values, never bytes.

/// Code point of the digit zero for every run of Unicode `Nd` (decimal digit)
/// characters. Each run is exactly ten code points long.
const DECIMAL_DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x10D40, 0x11066, 0x110F0, 0x11136,
    0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x116D0, 0x116DA, 0x11730, 0x118E0,
    0x11950, 0x11BF0, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16130, 0x16A60, 0x16AC0, 0x16B50,
    0x16D70, 0x1CCF0, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0,
    0x1E5F1, 0x1E950, 0x1FBF0,
];

/// Returns `true` for characters in the Unicode `Nd` category.
///
/// # Examples
///
/// ```rust
/// use varconv::text::is_decimal_digit;
///
/// assert!(is_decimal_digit('7'));
/// assert!(is_decimal_digit('٣')); // ARABIC-INDIC DIGIT THREE
/// assert!(is_decimal_digit('９')); // FULLWIDTH DIGIT NINE
/// assert!(!is_decimal_digit('½'));
/// assert!(!is_decimal_digit('x'));
/// ```
#[must_use]
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let cp = u32::from(c);
    match DECIMAL_DIGIT_ZEROS.binary_search(&cp) {
        Ok(_) => true,
        Err(0) => false,
        Err(i) => cp - DECIMAL_DIGIT_ZEROS[i - 1] < 10,
    }
}

/// First line of the text. Carriage returns are dropped before splitting on `\n`.
///
/// # Examples
///
/// ```rust
/// use varconv::text::first_line;
///
/// assert_eq!(first_line("a\r\nb\nc"), "a");
/// assert_eq!(first_line("\nsecond"), "");
/// ```
#[must_use]
pub fn first_line(s: &str) -> String {
    let mut line = String::new();
    for c in s.chars() {
        match c {
            '\r' => {}
            '\n' => break,
            other => line.push(other),
        }
    }
    line
}

/// Joins all lines with `separator`. Carriage returns are dropped.
///
/// # Examples
///
/// ```rust
/// use varconv::text::join_lines;
///
/// assert_eq!(join_lines("a\nb", "-"), "a-b");
/// assert_eq!(join_lines("a\r\nb\r\n", " "), "a b ");
/// ```
#[must_use]
pub fn join_lines(s: &str, separator: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\r' => {}
            '\n' => out.push_str(separator),
            other => out.push(other),
        }
    }
    out
}

/// Removes markup tags, keeping only the text between them.
///
/// - `<` followed by whitespace is kept as text; a trailing `<` is dropped
/// - `<!-- ... -->` comments are removed
/// - quoted attribute values may contain `>`
/// - a `<` inside a tag opens a nested level that needs its own `>`
/// - an unterminated tag swallows the rest of the input
/// - a stray `>` outside a tag is kept
///
/// # Examples
///
/// ```rust
/// use varconv::text::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// assert_eq!(strip_tags("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
/// assert_eq!(strip_tags("<a title=\"x>y\">link</a>"), "link");
/// assert_eq!(strip_tags("a<!-- hidden -->b"), "ab");
/// ```
#[must_use]
pub fn strip_tags(input: &str) -> String {
    enum State {
        Text,
        Tag { depth: usize, quote: Option<char> },
        Comment,
    }

    let mut out = String::with_capacity(input.len());
    let mut state = State::Text;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match &mut state {
            State::Text => {
                if c != '<' {
                    out.push(c);
                    continue;
                }
                match chars.peek().map(|&(_, next)| next) {
                    Some(next) if next.is_whitespace() => out.push(c),
                    Some(_) if input[i..].starts_with("<!--") => {
                        // skip "!--"
                        chars.nth(2);
                        state = State::Comment;
                    }
                    _ => {
                        state = State::Tag {
                            depth: 1,
                            quote: None,
                        }
                    }
                }
            }
            State::Tag { depth, quote } => match (*quote, c) {
                (Some(q), c) if c == q => *quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => *quote = Some(c),
                (None, '<') => *depth += 1,
                (None, '>') => {
                    *depth -= 1;
                    if *depth == 0 {
                        state = State::Text;
                    }
                }
                (None, _) => {}
            },
            State::Comment => {
                if c == '-' && input[i..].starts_with("-->") {
                    // skip "->"
                    chars.nth(1);
                    state = State::Text;
                }
            }
        }
    }

    out
}

/// Escapes the HTML-reserved characters `& < > " '`.
///
/// Existing entities are escaped again (`&amp;` becomes `&amp;amp;`).
///
/// # Examples
///
/// ```rust
/// use varconv::text::escape_special_chars;
///
/// assert_eq!(
///     escape_special_chars("<a href='x'>Tom & \"Jerry\"</a>"),
///     "&lt;a href=&#039;x&#039;&gt;Tom &amp; &quot;Jerry&quot;&lt;/a&gt;"
/// );
/// ```
#[must_use]
pub fn escape_special_chars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Strips leading and trailing space, `\t`, `\n`, `\r`, NUL and vertical tab.
///
/// Other whitespace (form feed, no-break space, ideographic space) is content.
///
/// # Examples
///
/// ```rust
/// use varconv::text::trim;
///
/// assert_eq!(trim("  x \t\n"), "x");
/// assert_eq!(trim("\0\x0By\r"), "y");
/// assert_eq!(trim("\u{a0}y\u{3000}"), "\u{a0}y\u{3000}");
/// ```
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Replaces every literal occurrence of `from` with `to`.
///
/// An empty `from` matches nothing and returns the input unchanged.
///
/// # Examples
///
/// ```rust
/// use varconv::text::replace;
///
/// assert_eq!(replace("a-b-c", "-", "+"), "a+b+c");
/// assert_eq!(replace("abc", "", "x"), "abc");
/// ```
#[must_use]
pub fn replace(s: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return s.to_string();
    }
    s.replace(from, to)
}

/// Removes every Unicode decimal digit (see [`is_decimal_digit`]).
///
/// # Examples
///
/// ```rust
/// use varconv::text::remove_numbers;
///
/// assert_eq!(remove_numbers("R2-D2 ٣"), "R-D ");
/// ```
#[must_use]
pub fn remove_numbers(s: &str) -> String {
    s.chars().filter(|c| !is_decimal_digit(*c)).collect()
}

/// Truncates to at most `max` Unicode scalar values.
///
/// # Examples
///
/// ```rust
/// use varconv::text::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 3), "hél");
/// assert_eq!(truncate_chars("hi", 3), "hi");
/// ```
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// [`truncate_chars`] with a signed limit; negative limits use their magnitude.
#[must_use]
pub fn str_max_length(s: &str, length: i64) -> String {
    let max = usize::try_from(length.unsigned_abs()).unwrap_or(usize::MAX);
    truncate_chars(s, max)
}

// Inline Template Source Map
//
// Maps offsets in the cooked text of a string or template literal back to
// offsets in the class file, through escape sequences.

/// Where each byte of an inline template's text came from in its class file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InlineSourceMap {
    /// Class-file offset of the literal's first content character.
    start: usize,
    /// Raw offset of every cooked byte, plus one trailing entry for the end
    /// of the literal. Empty when cooked and raw text are identical.
    raw_offsets: Vec<usize>,
}

impl InlineSourceMap {
    /// A literal whose text appears unchanged at `start`.
    pub fn identity(start: usize) -> Self {
        InlineSourceMap {
            start,
            raw_offsets: Vec::new(),
        }
    }

    /// Map for a literal whose contents (between the quotes) are `raw` in the
    /// class file and `cooked` once escapes are applied. Falls back to the
    /// identity map if `raw` does not decode to `cooked`.
    pub fn from_literal(start: usize, raw: &str, cooked: &str) -> Self {
        if raw == cooked {
            return Self::identity(start);
        }
        let mut decoded = String::with_capacity(raw.len());
        let mut raw_offsets = Vec::with_capacity(raw.len() + 1);
        decode_literal(raw, &mut decoded, &mut raw_offsets);
        if decoded != cooked {
            tracing::trace!(%raw, "inline template escapes could not be mapped");
            return Self::identity(start);
        }
        raw_offsets.push(raw.len());
        InlineSourceMap { start, raw_offsets }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Class-file offset of byte `offset` of the cooked template text.
    pub fn to_class_offset(&self, offset: usize) -> usize {
        match self.raw_offsets.get(offset) {
            Some(raw) => self.start + raw,
            None => match self.raw_offsets.last() {
                Some(&end) => self.start + end + (offset + 1 - self.raw_offsets.len()),
                None => self.start + offset,
            },
        }
    }
}

fn push_char(ch: char, raw_at: usize, out: &mut String, offsets: &mut Vec<usize>) {
    out.push(ch);
    offsets.resize(offsets.len() + ch.len_utf8(), raw_at);
}

fn decode_literal(raw: &str, out: &mut String, offsets: &mut Vec<usize>) {
    let mut chars = raw.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        match ch {
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    push_char('\\', at, out, offsets);
                    break;
                };
                match escaped {
                    'n' => push_char('\n', at, out, offsets),
                    'r' => push_char('\r', at, out, offsets),
                    't' => push_char('\t', at, out, offsets),
                    'b' => push_char('\u{8}', at, out, offsets),
                    'f' => push_char('\u{c}', at, out, offsets),
                    'v' => push_char('\u{b}', at, out, offsets),
                    '0' if !matches!(chars.peek(), Some((_, '0'..='9'))) => push_char('\0', at, out, offsets),
                    'x' => {
                        let code = take_hex(&mut chars, 2);
                        push_char(code.and_then(char::from_u32).unwrap_or('\u{fffd}'), at, out, offsets);
                    }
                    'u' => {
                        let ch = decode_unicode_escape(&mut chars);
                        push_char(ch, at, out, offsets);
                    }
                    // Line continuations produce nothing.
                    '\r' => {
                        if matches!(chars.peek(), Some((_, '\n'))) {
                            chars.next();
                        }
                    }
                    '\n' | '\u{2028}' | '\u{2029}' => {}
                    other => push_char(other, at, out, offsets),
                }
            }
            // Template literals normalize line endings.
            '\r' => {
                if matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                }
                push_char('\n', at, out, offsets);
            }
            other => push_char(other, at, out, offsets),
        }
    }
}

type CharIter<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn take_hex(chars: &mut CharIter<'_>, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        let (_, ch) = chars.next_if(|(_, c)| c.is_ascii_hexdigit())?;
        value = value * 16 + ch.to_digit(16)?;
    }
    Some(value)
}

/// Decode after `\u`: `{X..}`, or four digits with a following low
/// surrogate escape combined into one character.
fn decode_unicode_escape(chars: &mut CharIter<'_>) -> char {
    if chars.next_if(|(_, c)| *c == '{').is_some() {
        let mut value = 0u32;
        while let Some((_, ch)) = chars.next_if(|(_, c)| c.is_ascii_hexdigit()) {
            value = value.saturating_mul(16).saturating_add(ch.to_digit(16).unwrap_or(0));
        }
        chars.next_if(|(_, c)| *c == '}');
        return char::from_u32(value).unwrap_or('\u{fffd}');
    }
    let Some(high) = take_hex(chars, 4) else {
        return '\u{fffd}';
    };
    if (0xD800..0xDC00).contains(&high) {
        let mut lookahead = chars.clone();
        if lookahead.next().map(|(_, c)| c) == Some('\\') && lookahead.next().map(|(_, c)| c) == Some('u') {
            if let Some(low) = take_hex(&mut lookahead, 4).filter(|low| (0xDC00..0xE000).contains(low)) {
                *chars = lookahead;
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(combined).unwrap_or('\u{fffd}');
            }
        }
    }
    char::from_u32(high).unwrap_or('\u{fffd}')
}

#[cfg(test)]
mod tests {
    use super::*;

    mod inline_source_map_tests {
        use super::*;

        #[test]
        fn should_shift_plain_literals() {
            let map = InlineSourceMap::from_literal(10, "<p>{{x}}</p>", "<p>{{x}}</p>");
            assert_eq!(map.to_class_offset(0), 10);
            assert_eq!(map.to_class_offset(5), 15);
        }

        #[test]
        fn should_map_through_escape_sequences() {
            let raw = r#"<p title=\"a\">\n{{ missing }}</p>"#;
            let cooked = "<p title=\"a\">\n{{ missing }}</p>";
            let map = InlineSourceMap::from_literal(100, raw, cooked);

            let cooked_at = cooked.find("missing").unwrap();
            let raw_at = raw.find("missing").unwrap();
            assert_eq!(map.to_class_offset(cooked_at), 100 + raw_at);
            assert_eq!(map.to_class_offset(cooked.len()), 100 + raw.len());
        }

        #[test]
        fn should_map_unicode_escapes_and_line_continuations() {
            let raw = "\\u00e9\\u{1F600}\\\n{{x}}";
            let cooked = "\u{e9}\u{1F600}{{x}}";
            let map = InlineSourceMap::from_literal(0, raw, cooked);
            assert_eq!(map.to_class_offset(cooked.find("{{").unwrap()), raw.find("{{").unwrap());
        }

        #[test]
        fn should_fall_back_to_a_shift_when_the_text_disagrees() {
            let map = InlineSourceMap::from_literal(7, "a\\nb", "something else");
            assert_eq!(map, InlineSourceMap::identity(7));
            assert_eq!(map.to_class_offset(3), 10);
        }
    }
}

//! Scanner primitives.
//!
//! [`Cursor`] walks an input string left to right. Each `read_*` method either
//! consumes exactly the text it recognised and returns the value, or leaves the
//! cursor where it was and returns a [`ScanError`]. Nothing here allocates
//! except the string helpers at the bottom of the module.

use crate::error::ScanError;

/// A forward-only position in an input string.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the cursor in the original input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Moves the cursor forward by `n` bytes, clamped to the end of input.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - skip_whitespace(rest).len();
    }

    /// Consumes characters up to (not including) the first one matching `stop`,
    /// or the end of input.
    pub fn read_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(stop).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Reads a name terminated by `term` (or end of input), with leading and
    /// trailing whitespace removed. The terminator is not consumed.
    pub fn read_name(&mut self, term: char) -> &'a str {
        self.read_until(|c| c == term).trim()
    }

    /// Reads a decimal integer with an optional leading sign.
    pub fn read_integer(&mut self) -> Result<i32, ScanError> {
        let len = integer_len(self.rest());
        if len == 0 {
            return Err(ScanError::NoDigits);
        }
        let value = self.rest()[..len]
            .parse::<i32>()
            .map_err(|_| ScanError::OutOfRange)?;
        self.pos += len;
        Ok(value)
    }

    /// Reads a decimal floating point number: `[sign] digits [. digits] [e [sign] digits]`.
    pub fn read_float(&mut self) -> Result<f32, ScanError> {
        let len = float_len(self.rest());
        if len == 0 {
            return Err(ScanError::NoDigits);
        }
        let value = self.rest()[..len]
            .parse::<f32>()
            .map_err(|_| ScanError::NoDigits)?;
        if !value.is_finite() {
            return Err(ScanError::OutOfRange);
        }
        self.pos += len;
        Ok(value)
    }

    /// Reads `a{separator}b`, two integers joined by `separator`.
    pub fn read_integer_pair(&mut self, separator: char) -> Result<(i32, i32), ScanError> {
        let saved = self.pos;
        let a = self.read_integer()?;
        if !self.eat(separator) {
            self.pos = saved;
            return Err(ScanError::MissingSeparator(separator));
        }
        match self.read_integer() {
            Ok(b) => Ok((a, b)),
            Err(e) => {
                self.pos = saved;
                Err(e)
            }
        }
    }

    /// Reads `min-max`, two floats joined by `-`, requiring `min <= max`.
    pub fn read_float_range(&mut self) -> Result<(f32, f32), ScanError> {
        let saved = self.pos;
        let min = self.read_float()?;
        if !self.eat('-') {
            self.pos = saved;
            return Err(ScanError::MissingSeparator('-'));
        }
        let max = match self.read_float() {
            Ok(max) => max,
            Err(e) => {
                self.pos = saved;
                return Err(e);
            }
        };
        if min > max {
            self.pos = saved;
            return Err(ScanError::InvertedRange { min, max });
        }
        Ok((min, max))
    }

    /// Reads a display id: either `DPY-<n>` (case-insensitive) or a bare
    /// non-negative integer.
    pub fn read_display_id(&mut self) -> Result<u32, ScanError> {
        let saved = self.pos;
        let rest = self.rest();
        if rest.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("dpy-")) {
            self.pos += 4;
        }
        match self.read_integer() {
            Ok(id) if id >= 0 => Ok(id as u32),
            Ok(_) => {
                self.pos = saved;
                Err(ScanError::OutOfRange)
            }
            Err(e) => {
                self.pos = saved;
                Err(e)
            }
        }
    }
}

fn digits_len(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn sign_len(s: &str) -> usize {
    usize::from(s.starts_with(['+', '-']))
}

fn integer_len(s: &str) -> usize {
    let sign = sign_len(s);
    match digits_len(&s[sign..]) {
        0 => 0,
        n => sign + n,
    }
}

fn float_len(s: &str) -> usize {
    let mut len = sign_len(s);
    let whole = digits_len(&s[len..]);
    len += whole;
    let mut frac = 0;
    if s[len..].starts_with('.') {
        frac = digits_len(&s[len + 1..]);
        if whole > 0 || frac > 0 {
            len += 1 + frac;
        }
    }
    if whole == 0 && frac == 0 {
        return 0;
    }
    if s[len..].starts_with(['e', 'E']) {
        let exp_sign = sign_len(&s[len + 1..]);
        let exp = digits_len(&s[len + 1 + exp_sign..]);
        if exp > 0 {
            len += 1 + exp_sign + exp;
        }
    }
    len
}

/// Strips leading whitespace.
pub fn skip_whitespace(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_ascii_whitespace())
}

/// Strips trailing whitespace.
pub fn chop_whitespace(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_ascii_whitespace())
}

/// Splits `s` on `separator`, keeping empty tokens in place.
///
/// `"a,,b"` yields `["a", "", "b"]`; the token count is the vector length.
pub fn tokenize(s: &str, separator: char) -> Vec<&str> {
    s.split(separator).collect()
}

/// Returns `s` with all whitespace removed.
pub fn remove_spaces(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns `s` with every `from` replaced by `to`.
pub fn replace_characters(s: &str, from: char, to: char) -> String {
    s.chars().map(|c| if c == from { to } else { c }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integer_accepts_sign() {
        let mut c = Cursor::new("-42rest");
        assert_eq!(c.read_integer(), Ok(-42));
        assert_eq!(c.rest(), "rest");

        let mut c = Cursor::new("+7");
        assert_eq!(c.read_integer(), Ok(7));
        assert!(c.is_end());
    }

    #[test]
    fn test_read_integer_distinguishes_no_digits_from_overflow() {
        let mut c = Cursor::new("abc");
        assert_eq!(c.read_integer(), Err(ScanError::NoDigits));
        assert_eq!(c.position(), 0);

        let mut c = Cursor::new("-");
        assert_eq!(c.read_integer(), Err(ScanError::NoDigits));

        let mut c = Cursor::new("99999999999");
        assert_eq!(c.read_integer(), Err(ScanError::OutOfRange));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_read_float_forms() {
        for (input, expected, rest) in [
            ("1.5", 1.5, ""),
            ("-0.25x", -0.25, "x"),
            (".5", 0.5, ""),
            ("3.", 3.0, ""),
            ("2e3", 2000.0, ""),
            ("7e", 7.0, "e"),
        ] {
            let mut c = Cursor::new(input);
            assert_eq!(c.read_float(), Ok(expected), "{input}");
            assert_eq!(c.rest(), rest, "{input}");
        }
        assert_eq!(Cursor::new(".").read_float(), Err(ScanError::NoDigits));
        assert_eq!(Cursor::new("1e99").read_float(), Err(ScanError::OutOfRange));
    }

    #[test]
    fn test_read_integer_pair_requires_separator() {
        let mut c = Cursor::new("3,4");
        assert_eq!(c.read_integer_pair(','), Ok((3, 4)));

        let mut c = Cursor::new("3 4");
        assert_eq!(
            c.read_integer_pair(','),
            Err(ScanError::MissingSeparator(','))
        );
        assert_eq!(c.position(), 0);

        let mut c = Cursor::new("3,");
        assert_eq!(c.read_integer_pair(','), Err(ScanError::NoDigits));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_read_float_range_checks_order() {
        let mut c = Cursor::new("0.5-1.5");
        assert_eq!(c.read_float_range(), Ok((0.5, 1.5)));

        let mut c = Cursor::new("-1--0.5");
        assert_eq!(c.read_float_range(), Ok((-1.0, -0.5)));

        let mut c = Cursor::new("2-1");
        assert_eq!(
            c.read_float_range(),
            Err(ScanError::InvertedRange { min: 2.0, max: 1.0 })
        );
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_read_display_id_forms() {
        assert_eq!(Cursor::new("DPY-3").read_display_id(), Ok(3));
        assert_eq!(Cursor::new("dpy-12").read_display_id(), Ok(12));
        assert_eq!(Cursor::new("5").read_display_id(), Ok(5));
        assert_eq!(
            Cursor::new("DPY-").read_display_id(),
            Err(ScanError::NoDigits)
        );
        assert_eq!(
            Cursor::new("-2").read_display_id(),
            Err(ScanError::OutOfRange)
        );
    }

    #[test]
    fn test_read_name_stops_at_terminator_and_trims() {
        let mut c = Cursor::new("  mode = 1");
        assert_eq!(c.read_name('='), "mode");
        assert_eq!(c.rest(), "= 1");
    }

    #[test]
    fn test_whitespace_helpers_are_total() {
        assert_eq!(skip_whitespace("  \tx "), "x ");
        assert_eq!(chop_whitespace(" x \n"), " x");
        assert_eq!(skip_whitespace(""), "");
        assert_eq!(chop_whitespace("   "), "");

        let mut c = Cursor::new("   ");
        c.skip_whitespace();
        assert!(c.is_end());
    }

    #[test]
    fn test_tokenize_preserves_empty_tokens() {
        assert_eq!(tokenize("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(tokenize(",", ','), vec!["", ""]);
        assert_eq!(tokenize("solo", ',').len(), 1);
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(remove_spaces(" a b\tc "), "abc");
        assert_eq!(replace_characters("a/b/c", '/', '_'), "a_b_c");
    }
}

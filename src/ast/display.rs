use std::fmt;

pub struct DisplaySeparated<'a, T> {
    slice: &'a [T],
    sep: &'static str,
}

impl<'a, T: fmt::Display> fmt::Display for DisplaySeparated<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut delim = "";
        for t in self.slice {
            write!(f, "{}{}", delim, t)?;
            delim = self.sep;
        }
        Ok(())
    }
}

pub fn display_separated<'a, T: fmt::Display>(
    slice: &'a [T],
    sep: &'static str,
) -> DisplaySeparated<'a, T> {
    DisplaySeparated { slice, sep }
}

pub fn display_comma_separated<'a, T: fmt::Display>(slice: &'a [T]) -> DisplaySeparated<'a, T> {
    display_separated(slice, ", ")
}

/// Writes `s` with every occurrence of `quote` doubled.
pub struct EscapeQuoted<'a> {
    s: &'a str,
    quote: char,
}

impl<'a> fmt::Display for EscapeQuoted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.s.chars() {
            if c == self.quote {
                write!(f, "{}{}", c, c)?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

pub fn escape_quoted(s: &str, quote: char) -> EscapeQuoted<'_> {
    EscapeQuoted { s, quote }
}

/// Writes `s` re-escaping the characters a backslash-escaped literal
/// unescapes.
pub struct EscapeBackslash<'a>(&'a str);

impl<'a> fmt::Display for EscapeBackslash<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                '\r' => f.write_str("\\r")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

pub fn escape_backslash(s: &str) -> EscapeBackslash<'_> {
    EscapeBackslash(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated() {
        assert_eq!("1, 2, 3", display_comma_separated(&[1, 2, 3]).to_string());
        assert_eq!("a.b", display_separated(&["a", "b"], ".").to_string());
        assert_eq!("", display_comma_separated::<u8>(&[]).to_string());
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!("it''s", escape_quoted("it's", '\'').to_string());
        assert_eq!(r"a\'b\\", escape_backslash("a'b\\").to_string());
    }
}

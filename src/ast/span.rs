use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedNodeError;

/// A position in the source text. Lines and columns are 1-based; `0` marks an
/// unknown position, e.g. on synthesized nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl Location {
    pub const fn new(line: u64, column: u64) -> Self {
        Location { line, column }
    }

    pub const fn empty() -> Self {
        Location { line: 0, column: 0 }
    }

    pub fn is_unknown(&self) -> bool {
        self.line == 0
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_unknown() {
            return Ok(());
        }
        write!(f, " at Line: {}, Column: {}", self.line, self.column)
    }
}

/// A half-open range of source text: `start` is inclusive, `end` exclusive.
///
/// Deserializing rejects a known `end` that lies before a known `start`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SpanFields")]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

#[derive(Deserialize)]
struct SpanFields {
    start: Location,
    end: Location,
}

impl TryFrom<SpanFields> for Span {
    type Error = MalformedNodeError;

    fn try_from(SpanFields { start, end }: SpanFields) -> Result<Self, Self::Error> {
        if !start.is_unknown() && !end.is_unknown() && end < start {
            return Err(MalformedNodeError::new(
                "Span",
                format!(
                    "end {}:{} precedes start {}:{}",
                    end.line, end.column, start.line, start.column
                ),
            ));
        }
        Ok(Span { start, end })
    }
}

impl Span {
    /// Builds a span; a known `end` lying before `start` is clamped to `start`.
    pub fn new(start: Location, end: Location) -> Self {
        let end = if !end.is_unknown() && !start.is_unknown() && end < start {
            start
        } else {
            end
        };
        Span { start, end }
    }

    pub const fn empty() -> Self {
        Span {
            start: Location::empty(),
            end: Location::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_unknown() && self.end.is_unknown()
    }

    /// The smallest span covering both `self` and `other`. Unknown spans are
    /// ignored.
    pub fn union(&self, other: &Span) -> Span {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (_, true) => *self,
            _ => Span::new(
                self.start.min(other.start),
                self.end.max(other.end),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_ignores_empty_spans() {
        let a = Span::new(Location::new(1, 1), Location::new(1, 5));
        assert_eq!(a, a.union(&Span::empty()));
        assert_eq!(a, Span::empty().union(&a));
    }

    #[test]
    fn union_covers_both() {
        let a = Span::new(Location::new(1, 8), Location::new(1, 12));
        let b = Span::new(Location::new(1, 1), Location::new(1, 5));
        let u = a.union(&b);
        assert_eq!(Location::new(1, 1), u.start);
        assert_eq!(Location::new(1, 12), u.end);
    }

    #[test]
    fn end_never_precedes_start() {
        let s = Span::new(Location::new(2, 4), Location::new(1, 9));
        assert_eq!(s.start, s.end);
    }

    #[test]
    fn backwards_span_is_rejected_when_decoded() {
        let json = r#"{"start":{"line":1,"column":15},"end":{"line":1,"column":1}}"#;
        let err = serde_json::from_str::<Span>(json).unwrap_err();
        assert!(err.to_string().contains("malformed Span"), "{}", err);

        let json = r#"{"start":{"line":1,"column":15},"end":{"line":0,"column":0}}"#;
        let span: Span = serde_json::from_str(json).unwrap();
        assert!(span.end.is_unknown());
    }

    #[test]
    fn locations_order_by_line_then_column() {
        assert!(Location::new(1, 10) < Location::new(2, 1));
        assert!(Location::new(3, 2) > Location::new(3, 1));
    }
}

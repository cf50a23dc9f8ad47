/*!
This module encodes the capitalization of a lemma separately from its
characters. A lemma rule aligns lowercased strings only; the casing script
recorded here is replayed afterwards to restore the original capitalization.
*/
use std::error::Error;
use std::fmt::{self, Display, Write};
use std::iter;
use std::str::FromStr;

/// Whether a run of characters is uppercased or lowercased. Serialized as
/// `↑` and `↓`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseDirection {
    Up,
    Down,
}

impl CaseDirection {
    fn symbol(self) -> char {
        match self {
            CaseDirection::Up => '↑',
            CaseDirection::Down => '↓',
        }
    }
}

impl Display for CaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// The start of a case run. Offsets in the first half of the lemma count from
/// the start; offsets past the midpoint are negative and count from the end.
/// Anchoring the tail to the end keeps the span meaningful when the rule is
/// replayed against a reconstruction of different length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CasingSpan {
    pub direction: CaseDirection,
    pub offset: isize,
}

/// Ordered case runs of a lemma, each applying from its offset to the end of
/// the string, later spans overwriting earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CasingScript(Vec<CasingSpan>);

impl CasingScript {
    /// Records the case runs of `lemma` by scanning left to right and
    /// emitting a span at every case-class change. A character is `Up` when
    /// it differs from its own lowercased form.
    pub fn encode(lemma: &str) -> CasingScript {
        let len = lemma.chars().count();
        let mut spans = Vec::new();
        let mut previous: Option<CaseDirection> = None;
        for (i, c) in lemma.chars().enumerate() {
            let direction = if c.to_lowercase().eq(iter::once(c)) {
                CaseDirection::Down
            } else {
                CaseDirection::Up
            };
            if previous != Some(direction) {
                let offset = if i <= len / 2 {
                    i as isize
                } else {
                    i as isize - len as isize
                };
                spans.push(CasingSpan { direction, offset });
            }
            previous = Some(direction);
        }
        CasingScript(spans)
    }

    /// The recorded spans, in application order.
    pub fn spans(&self) -> &[CasingSpan] {
        &self.0
    }

    /// Replays the case runs against `lemma`. A `(Down, 0)` span is skipped
    /// since the reconstructed lemma is entirely lowercase already. Offsets
    /// out of range clamp to the nearest end of the current string instead of
    /// failing, and negative offsets index from the end. Each span is
    /// resolved against the string as it stands after the previous span,
    /// whose length may have changed through case expansion.
    pub fn apply(&self, lemma: &str) -> String {
        let mut lemma = lemma.to_string();
        for span in &self.0 {
            if span.direction == CaseDirection::Down && span.offset == 0 {
                continue;
            }
            let chars: Vec<char> = lemma.chars().collect();
            let len = chars.len() as isize;
            let start = if span.offset < 0 {
                (len + span.offset).max(0)
            } else {
                span.offset.min(len)
            } as usize;
            let mut recased: String = chars[..start].iter().collect();
            match span.direction {
                CaseDirection::Up => recased.extend(chars[start..].iter().flat_map(|c| c.to_uppercase())),
                CaseDirection::Down => recased.extend(chars[start..].iter().flat_map(|c| c.to_lowercase())),
            }
            lemma = recased;
        }
        lemma
    }
}

impl Display for CasingScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, span) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char('¦')?;
            }
            write!(f, "{}{}", span.direction.symbol(), span.offset)?;
        }
        Ok(())
    }
}

/// A record of the casing script could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCasingError {
    /// A `¦`-separated record with no content.
    EmptyRecord,
    /// A record starting with something other than `↑` or `↓`.
    BadDirection(char),
    /// The offset after the direction symbol is not an integer.
    BadOffset(String),
}

impl Display for ParseCasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCasingError::EmptyRecord => write!(f, "empty casing record"),
            ParseCasingError::BadDirection(c) => {
                write!(f, "casing record starts with {:?} instead of `↑` or `↓`", c)
            }
            ParseCasingError::BadOffset(s) => {
                write!(f, "could not parse {:?} as a casing offset", s)
            }
        }
    }
}

impl Error for ParseCasingError {}

impl FromStr for CasingScript {
    type Err = ParseCasingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(CasingScript::default());
        }
        let mut spans = Vec::new();
        for record in s.split('¦') {
            let mut chars = record.chars();
            let direction = match chars.next() {
                Some('↑') => CaseDirection::Up,
                Some('↓') => CaseDirection::Down,
                Some(other) => return Err(ParseCasingError::BadDirection(other)),
                None => return Err(ParseCasingError::EmptyRecord),
            };
            let offset = chars
                .as_str()
                .parse::<isize>()
                .map_err(|_| ParseCasingError::BadOffset(chars.as_str().to_string()))?;
            spans.push(CasingSpan { direction, offset });
        }
        Ok(CasingScript(spans))
    }
}

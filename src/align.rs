/*!
This module computes minimum edit scripts: the shortest sequence of delete and
insert operations turning a source string into a target string. There is no
substitution or match operation in this formulation. Shared characters are
never aligned here; the rule codec pre-aligns the longest common substring and
only hands the remaining prefix and suffix to this aligner, so the scripts stay
short in practice.
*/
use std::error::Error;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

/// A single operation of an edit script. The script keeps an implicit cursor
/// into the source string; every operation either advances it or emits a
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Consume one source character without emitting anything. Serialized as
    /// `-`.
    Delete,
    /// Emit the given character without consuming the source. Serialized as
    /// `+` followed by the character.
    Insert(char),
    /// Copy one source character to the output. Serialized as `→`. The
    /// aligner never produces this operation, but the decoder accepts it so
    /// that hand-written rules stay usable.
    Keep,
}

/// An ordered sequence of `EditOp`. Replaying the script against the source
/// string it was computed from reproduces the target string exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EditScript(pub(crate) Vec<EditOp>);

impl EditScript {
    /// The operations of this script, in replay order.
    pub fn ops(&self) -> &[EditOp] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of source characters this script consumes when replayed.
    /// `Delete` and `Keep` advance the source cursor, `Insert` does not.
    pub fn source_len(&self) -> usize {
        self.0
            .iter()
            .filter(|op| matches!(op, EditOp::Delete | EditOp::Keep))
            .count()
    }

    /// Replays the script against `source`, appending the emitted characters
    /// to `out`. Fails if the script consumes more characters than `source`
    /// holds.
    pub(crate) fn replay(&self, source: &[char], out: &mut String) -> Result<(), ReplayError> {
        let mut cursor = 0usize;
        for op in &self.0 {
            match op {
                EditOp::Delete => {
                    if cursor >= source.len() {
                        return Err(ReplayError {
                            needed: self.source_len(),
                            available: source.len(),
                        });
                    }
                    cursor += 1;
                }
                EditOp::Keep => match source.get(cursor) {
                    Some(c) => {
                        out.push(*c);
                        cursor += 1;
                    }
                    None => {
                        return Err(ReplayError {
                            needed: self.source_len(),
                            available: source.len(),
                        })
                    }
                },
                EditOp::Insert(c) => out.push(*c),
            }
        }
        Ok(())
    }

    /// Replays the script against `source` and returns the emitted string.
    ///
    /// ```rust
    /// use lemru::min_edit_script;
    ///
    /// let script = min_edit_script("omu", "ům");
    /// assert_eq!(script.to_string(), "---+ů+m");
    /// assert_eq!(script.apply("omu").unwrap(), "ům");
    /// ```
    pub fn apply(&self, source: &str) -> Result<String, ReplayError> {
        let source: Vec<char> = source.chars().collect();
        let mut out = String::new();
        self.replay(&source, &mut out)?;
        Ok(out)
    }
}

impl Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.0 {
            match op {
                EditOp::Delete => f.write_char('-')?,
                EditOp::Keep => f.write_char('→')?,
                EditOp::Insert(c) => {
                    f.write_char('+')?;
                    f.write_char(*c)?;
                }
            }
        }
        Ok(())
    }
}

/// The script string contained a token outside the `-`/`+c`/`→` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseScriptError {
    /// A character that is not one of the three operation markers.
    UnexpectedToken(char),
    /// A trailing `+` with no character after it.
    MissingInsertArgument,
}

impl Display for ParseScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseScriptError::UnexpectedToken(c) => {
                write!(f, "unexpected token {:?} in edit script", c)
            }
            ParseScriptError::MissingInsertArgument => {
                write!(f, "edit script ends with `+` but no character to insert")
            }
        }
    }
}

impl Error for ParseScriptError {}

impl FromStr for EditScript {
    type Err = ParseScriptError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ops = Vec::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            match c {
                '-' => ops.push(EditOp::Delete),
                '→' => ops.push(EditOp::Keep),
                '+' => match chars.next() {
                    Some(arg) => ops.push(EditOp::Insert(arg)),
                    None => return Err(ParseScriptError::MissingInsertArgument),
                },
                other => return Err(ParseScriptError::UnexpectedToken(other)),
            }
        }
        Ok(EditScript(ops))
    }
}

/// The script consumed more source characters than were available during a
/// replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayError {
    pub(crate) needed: usize,
    pub(crate) available: usize,
}

impl Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edit script consumes {} source characters but only {} are available",
            self.needed, self.available
        )
    }
}

impl Error for ReplayError {}

/// Computes the minimum edit script turning `source` into `target`.
///
/// This is a dynamic program over a `(len(source)+1) x (len(target)+1)` grid
/// where cell `(i, j)` holds the cheapest script turning `source[..i]` into
/// `target[..j]`. The delete branch is evaluated before the insert branch and
/// a cell is only overwritten on a strict improvement, so ties resolve the
/// same way on every call. Rule strings are persisted as vocabulary keys and
/// compared byte for byte, which makes this stability part of the contract.
///
/// Total over all inputs, including empty strings. Positions are Unicode
/// scalar values, not bytes.
pub fn min_edit_script(source: &str, target: &str) -> EditScript {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    min_edit_script_chars(&source, &target)
}

pub(crate) fn min_edit_script_chars(source: &[char], target: &[char]) -> EditScript {
    let unreached = source.len() + target.len() + 1;
    let mut grid: Vec<Vec<(usize, EditScript)>> =
        vec![vec![(unreached, EditScript::default()); target.len() + 1]; source.len() + 1];
    grid[0][0] = (0, EditScript::default());
    for i in 0..=source.len() {
        for j in 0..=target.len() {
            if i == 0 && j == 0 {
                continue;
            }
            if i > 0 && grid[i - 1][j].0 < grid[i][j].0 {
                let cost = grid[i - 1][j].0 + 1;
                let mut script = grid[i - 1][j].1.clone();
                script.0.push(EditOp::Delete);
                grid[i][j] = (cost, script);
            }
            if j > 0 && grid[i][j - 1].0 < grid[i][j].0 {
                let cost = grid[i][j - 1].0 + 1;
                let mut script = grid[i][j - 1].1.clone();
                script.0.push(EditOp::Insert(target[j - 1]));
                grid[i][j] = (cost, script);
            }
        }
    }
    std::mem::take(&mut grid[source.len()][target.len()].1)
}

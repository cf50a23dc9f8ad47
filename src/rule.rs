/*!
This module implements the lemma rule codec: a compact, reversible string
describing how to turn an inflected surface form into its dictionary lemma.

A rule has the shape `casing ";" body`. The casing part is the `CasingScript`
of the lemma. The body is either `a` followed by the literal lowercase lemma
(no character run is shared between form and lemma) or `d` followed by two
`¦`-separated edit scripts, one for the part of the form before the longest
common substring and one for the part after it. The shared substring itself is
never encoded; applying the rule recovers it verbatim from the form, which is
what lets one rule generalize to forms of a different length.
*/
use crate::align::{min_edit_script_chars, EditScript, ParseScriptError, ReplayError};
use crate::casing::{CasingScript, ParseCasingError};
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// Characters with a structural meaning inside a rule string.
pub(crate) const RESERVED: [char; 7] = [';', '¦', '↑', '↓', '+', '-', '→'];

/// What to do when a lemma contains one of the reserved delimiter characters.
/// The encoding has no escaping mechanism, so such a lemma can produce a rule
/// that no longer parses back (a `¦` inserted into a `d` body splits it into
/// three scripts). Only the lemma matters: form characters are consumed, never
/// embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorPolicy {
    /// Encode the lemma as-is. This keeps rule strings byte-identical across
    /// runs and matches what `gen_lemma_rule` does; a colliding lemma
    /// degrades into the `apply_lemma_rule` fallback at decode time.
    Accept,
    /// Refuse the lemma with an `EncodeError` instead of emitting a rule
    /// that may not round-trip.
    Reject,
}

impl Default for SeparatorPolicy {
    fn default() -> Self {
        Self::Accept
    }
}

#[derive(Debug)]
pub struct ParseSeparatorPolicyError<S: Debug + Display>(S);

impl<S: Debug + Display> Display for ParseSeparatorPolicyError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse the {} into a `SeparatorPolicy`", self.0)
    }
}
impl<S: Debug + Display> Error for ParseSeparatorPolicyError<S> {}

impl FromStr for SeparatorPolicy {
    type Err = ParseSeparatorPolicyError<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "accept" => Ok(SeparatorPolicy::Accept),
            "reject" => Ok(SeparatorPolicy::Reject),
            _ => Err(ParseSeparatorPolicyError(String::from(s))),
        }
    }
}

/// The lemma could not be encoded under the requested `SeparatorPolicy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The lemma contains a reserved delimiter character.
    ReservedCharacter { character: char, lemma: String },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::ReservedCharacter { character, lemma } => write!(
                f,
                "lemma {:?} contains the reserved delimiter {:?}",
                lemma, character
            ),
        }
    }
}

impl Error for EncodeError {}

/// A structural defect found while decoding a rule string. These are exactly
/// the failures `apply_lemma_rule` recovers from; anything else propagates as
/// a programming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// No `;` between the casing part and the body.
    MissingSeparator,
    /// The body starts with something other than `a` or `d` (or is empty).
    UnknownRuleKind(Option<char>),
    /// A `d` body whose `¦` split did not yield exactly two edit scripts.
    ScriptCount(usize),
    /// One of the edit scripts did not parse.
    Script(ParseScriptError),
    /// The casing part did not parse.
    Casing(ParseCasingError),
    /// The edit scripts consume more characters than the form holds.
    Replay(ReplayError),
}

impl Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::MissingSeparator => {
                write!(f, "rule has no `;` separating casing from body")
            }
            RuleError::UnknownRuleKind(Some(c)) => {
                write!(f, "rule body starts with {:?} instead of `a` or `d`", c)
            }
            RuleError::UnknownRuleKind(None) => write!(f, "rule body is empty"),
            RuleError::ScriptCount(n) => write!(
                f,
                "rule body holds {} edit scripts instead of exactly 2",
                n
            ),
            RuleError::Script(err) => write!(f, "invalid edit script in rule: {}", err),
            RuleError::Casing(err) => write!(f, "invalid casing part in rule: {}", err),
            RuleError::Replay(err) => write!(f, "rule does not fit the form: {}", err),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RuleError::Script(err) => Some(err),
            RuleError::Casing(err) => Some(err),
            RuleError::Replay(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseScriptError> for RuleError {
    fn from(err: ParseScriptError) -> Self {
        RuleError::Script(err)
    }
}

impl From<ParseCasingError> for RuleError {
    fn from(err: ParseCasingError) -> Self {
        RuleError::Casing(err)
    }
}

impl From<ReplayError> for RuleError {
    fn from(err: ReplayError) -> Self {
        RuleError::Replay(err)
    }
}

/// Encodes the transformation from `form` to `lemma` as a rule string.
///
/// The form is lowercased up front; the capitalization of the lemma is
/// recorded as a casing script and both strings are then compared in
/// lowercase. The longest common substring is found by a brute-force scan,
/// lemma index outer and form index inner, keeping the first maximal match.
/// That choice is arbitrary but deterministic, and it must stay put: rule
/// strings are persisted as vocabulary keys, so two runs over the same corpus
/// have to produce identical bytes.
///
/// Total over all inputs. See `SeparatorPolicy` for the one caveat about
/// lemmas containing delimiter characters.
///
/// ```rust
/// use lemru::gen_lemma_rule;
///
/// assert_eq!(gen_lemma_rule("domu", "dům"), "↓0;d¦---+ů+m");
/// assert_eq!(gen_lemma_rule("dogs", "dog"), "↓0;d¦-");
/// assert_eq!(gen_lemma_rule("Katzen", "Katze"), "↑0¦↓1;d¦-");
/// ```
pub fn gen_lemma_rule(form: &str, lemma: &str) -> String {
    let form: Vec<char> = form.to_lowercase().chars().collect();
    let casing = CasingScript::encode(lemma);
    let lemma: Vec<char> = lemma.to_lowercase().chars().collect();

    let (mut best, mut best_form, mut best_lemma) = (0usize, 0usize, 0usize);
    for l in 0..lemma.len() {
        for f in 0..form.len() {
            let mut run = 0;
            while f + run < form.len() && l + run < lemma.len() && form[f + run] == lemma[l + run]
            {
                run += 1;
            }
            if run > best {
                best = run;
                best_form = f;
                best_lemma = l;
            }
        }
    }

    let mut rule = casing.to_string();
    rule.push(';');
    if best == 0 {
        rule.push('a');
        rule.extend(&lemma);
    } else {
        rule.push('d');
        rule.push_str(
            &min_edit_script_chars(&form[..best_form], &lemma[..best_lemma]).to_string(),
        );
        rule.push('¦');
        rule.push_str(
            &min_edit_script_chars(&form[best_form + best..], &lemma[best_lemma + best..])
                .to_string(),
        );
    }
    rule
}

/// `gen_lemma_rule` with an explicit `SeparatorPolicy`. Under
/// `SeparatorPolicy::Reject` a lemma containing a reserved delimiter is
/// refused instead of encoded.
pub fn try_gen_lemma_rule(
    form: &str,
    lemma: &str,
    policy: SeparatorPolicy,
) -> Result<String, EncodeError> {
    if policy == SeparatorPolicy::Reject {
        if let Some(character) = lemma.chars().find(|c| RESERVED.contains(c)) {
            return Err(EncodeError::ReservedCharacter {
                character,
                lemma: lemma.to_string(),
            });
        }
    }
    Ok(gen_lemma_rule(form, lemma))
}

/// Decodes `rule` against `form` and returns the lemma, or a `RuleError`
/// naming the structural defect when the rule does not parse or does not fit
/// the form.
pub fn try_apply_lemma_rule(form: &str, rule: &str) -> Result<String, RuleError> {
    let (casing_part, body) = rule.split_once(';').ok_or(RuleError::MissingSeparator)?;
    let casing: CasingScript = casing_part.parse()?;
    let lemma = if let Some(literal) = body.strip_prefix('a') {
        literal.to_string()
    } else if let Some(scripts) = body.strip_prefix('d') {
        rebuild_lemma(form, scripts)?
    } else {
        return Err(RuleError::UnknownRuleKind(body.chars().next()));
    };
    Ok(casing.apply(&lemma))
}

/// Decodes `rule` against `form`, falling back to `form` unchanged when the
/// rule is structurally invalid. A single bad rule coming out of a tagger
/// must not abort an entire output sequence, so this is the variant the
/// inference path calls; `try_apply_lemma_rule` reports the defect instead.
///
/// ```rust
/// use lemru::apply_lemma_rule;
///
/// assert_eq!(apply_lemma_rule("domu", "↓0;d¦---+ů+m"), "dům");
/// // Structurally broken rules fall back to the form itself.
/// assert_eq!(apply_lemma_rule("running", "garbage-not-a-rule"), "running");
/// ```
pub fn apply_lemma_rule(form: &str, rule: &str) -> String {
    try_apply_lemma_rule(form, rule).unwrap_or_else(|_| form.to_string())
}

/// Replays the two edit scripts of a `d` body against the lowercased form.
/// The first script rewrites the head of the form, the second its tail, and
/// the region neither consumes is copied verbatim in between. That region is
/// the shared substring the encoder left out.
fn rebuild_lemma(form: &str, scripts: &str) -> Result<String, RuleError> {
    let form: Vec<char> = form.to_lowercase().chars().collect();
    let parts: Vec<&str> = scripts.split('¦').collect();
    if parts.len() != 2 {
        return Err(RuleError::ScriptCount(parts.len()));
    }
    let head: EditScript = parts[0].parse()?;
    let tail: EditScript = parts[1].parse()?;

    let tail_start = form
        .len()
        .checked_sub(tail.source_len())
        .ok_or(RuleError::Replay(ReplayError {
            needed: tail.source_len(),
            available: form.len(),
        }))?;
    let head_len = head.source_len();
    if head_len > tail_start {
        return Err(RuleError::Replay(ReplayError {
            needed: head_len,
            available: tail_start,
        }));
    }

    let mut lemma = String::new();
    head.replay(&form[..tail_start], &mut lemma)?;
    lemma.extend(&form[head_len..tail_start]);
    tail.replay(&form[tail_start..], &mut lemma)?;
    Ok(lemma)
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::{Arbitrary, Gen, TestResult};
    use quickcheck_macros::quickcheck as quickcheck_test;
    use rstest::rstest;

    #[rstest]
    #[case("domu", "dům", "↓0;d¦---+ů+m")]
    #[case("dogs", "dog", "↓0;d¦-")]
    #[case("dog", "Dog", "↑0¦↓1;d¦")]
    #[case("Katzen", "Katze", "↑0¦↓1;d¦-")]
    #[case("xyz", "abc", "↓0;aabc")]
    #[case("went", "go", "↓0;ago")]
    #[case("", "", ";a")]
    fn test_gen_lemma_rule(#[case] form: &str, #[case] lemma: &str, #[case] expected: &str) {
        assert_eq!(gen_lemma_rule(form, lemma), expected);
    }

    #[rstest]
    #[case("domu", "dům")]
    #[case("dogs", "dog")]
    #[case("dog", "Dog")]
    #[case("Katzen", "Katze")]
    #[case("xyz", "abc")]
    #[case("went", "go")]
    #[case("koček", "kočka")]
    #[case("Häusern", "Haus")]
    #[case("children", "child")]
    #[case("DDR", "DDR")]
    #[case("McDonaldovi", "McDonald")]
    #[case("ŘEKL", "říci")]
    #[case("was", "be")]
    #[case("", "")]
    #[case("", "abc")]
    #[case("abc", "")]
    fn test_round_trip(#[case] form: &str, #[case] lemma: &str) {
        let rule = gen_lemma_rule(form, lemma);
        assert_eq!(apply_lemma_rule(form, &rule), lemma, "rule was {:?}", rule);
    }

    #[test]
    fn test_literal_rule_ignores_the_form() {
        // An `a` body carries the whole lemma; the form plays no part.
        let rule = gen_lemma_rule("xyz", "abc");
        for form in ["xyz", "running", "", "úplně"] {
            assert_eq!(apply_lemma_rule(form, &rule), "abc");
        }
    }

    #[test]
    fn test_case_rule_generalizes_to_other_forms() {
        // Capitalization recorded on one word transfers to another of the
        // same shared length.
        let rule = gen_lemma_rule("dog", "Dog");
        assert_eq!(apply_lemma_rule("cat", &rule), "Cat");
    }

    #[test]
    fn test_suffix_rule_generalizes_to_other_forms() {
        let rule = gen_lemma_rule("dogs", "dog");
        assert_eq!(apply_lemma_rule("cats", &rule), "cat");
    }

    #[rstest]
    #[case("garbage-not-a-rule")]
    #[case("")]
    #[case("↓0;")]
    #[case("↓0;zabc")]
    #[case("↓0;d¦¦")]
    #[case("↓0;d-")]
    #[case("↓0;d--------¦")]
    #[case("x0;d¦")]
    #[case("↓0;d+¦")]
    fn test_malformed_rules_fall_back_to_the_form(#[case] rule: &str) {
        assert_eq!(apply_lemma_rule("running", rule), "running");
    }

    #[rstest]
    #[case("garbage-not-a-rule", RuleError::MissingSeparator)]
    #[case("↓0;", RuleError::UnknownRuleKind(None))]
    #[case("↓0;zabc", RuleError::UnknownRuleKind(Some('z')))]
    #[case("↓0;d¦¦", RuleError::ScriptCount(3))]
    #[case("↓0;d-", RuleError::ScriptCount(1))]
    #[case(
        "↓0;d+¦",
        RuleError::Script(ParseScriptError::MissingInsertArgument)
    )]
    #[case(
        "x0;d¦",
        RuleError::Casing(ParseCasingError::BadDirection('x'))
    )]
    fn test_try_apply_names_the_defect(#[case] rule: &str, #[case] expected: RuleError) {
        assert_eq!(try_apply_lemma_rule("running", rule), Err(expected));
    }

    #[test]
    fn test_scripts_longer_than_the_form_are_a_replay_error() {
        let res = try_apply_lemma_rule("ab", "↓0;d--------¦");
        assert!(matches!(res, Err(RuleError::Replay(_))));
    }

    #[test]
    fn test_reject_policy_refuses_reserved_lemmas() {
        let res = try_gen_lemma_rule("a¦b", "a¦c", SeparatorPolicy::Reject);
        assert_eq!(
            res,
            Err(EncodeError::ReservedCharacter {
                character: '¦',
                lemma: String::from("a¦c"),
            })
        );
        // The form alone never collides: its characters are not embedded.
        assert!(try_gen_lemma_rule("a¦b", "ab", SeparatorPolicy::Reject).is_ok());
    }

    #[test]
    fn test_accept_policy_encodes_reserved_lemmas() {
        let rule = try_gen_lemma_rule("ab", "a¦c", SeparatorPolicy::Accept).unwrap();
        assert_eq!(rule, gen_lemma_rule("ab", "a¦c"));
    }

    #[test]
    fn test_separator_policy_from_str() {
        assert_eq!("accept".parse::<SeparatorPolicy>().unwrap(), SeparatorPolicy::Accept);
        assert_eq!("Reject".parse::<SeparatorPolicy>().unwrap(), SeparatorPolicy::Reject);
        assert!("escape".parse::<SeparatorPolicy>().is_err());
    }

    /// A word over an alphabet realistic for morphological data, without the
    /// reserved delimiter characters.
    #[derive(Debug, Clone)]
    struct Word(String);

    impl Arbitrary for Word {
        fn arbitrary(g: &mut Gen) -> Self {
            const ALPHABET: &[char] = &[
                'a', 'á', 'b', 'c', 'č', 'd', 'e', 'é', 'ě', 'f', 'g', 'h', 'i', 'í', 'j', 'k',
                'l', 'm', 'n', 'ň', 'o', 'ó', 'p', 'r', 'ř', 's', 'š', 't', 'u', 'ú', 'ů', 'v',
                'w', 'x', 'y', 'z', 'ž', 'ä', 'ö', 'ü', 'A', 'B', 'C', 'Č', 'D', 'E', 'H',
                'K', 'M', 'N', 'O', 'P', 'R', 'Š', 'T', 'U', 'V', 'Z', 'Ž',
            ];
            let len = usize::arbitrary(g) % 13;
            let word: String = (0..len).map(|_| *g.choose(ALPHABET).unwrap()).collect();
            Word(word)
        }
    }

    #[quickcheck_test]
    fn propertie_round_trip(form: Word, lemma: Word) -> bool {
        let rule = gen_lemma_rule(&form.0, &lemma.0);
        apply_lemma_rule(&form.0, &rule) == lemma.0
    }

    #[quickcheck_test]
    fn propertie_identity(word: Word) -> TestResult {
        if word.0.is_empty() {
            return TestResult::discard();
        }
        let rule = gen_lemma_rule(&word.0, &word.0);
        TestResult::from_bool(apply_lemma_rule(&word.0, &rule) == word.0)
    }

    #[quickcheck_test]
    fn propertie_apply_never_panics_on_garbage(form: Word, rule: String) -> bool {
        // Whatever the rule string, apply falls back instead of failing.
        let _ = apply_lemma_rule(&form.0, &rule);
        true
    }
}

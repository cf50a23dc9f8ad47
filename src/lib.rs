/*!
This library implements the lemma-rule codec used by neural morphological
taggers: a deterministic, reversible string encoding of the transformation
turning an inflected surface form into its dictionary lemma. Encoding every
(form, lemma) pair of a corpus this way collapses an open lemma vocabulary
into a small closed set of rules, so a tagger can predict lemmas with an
ordinary softmax over rule ids and decode the winning rule against the
surface form at output time.

# RULE ANATOMY
A rule string has two `;`-separated parts:
* The *casing part* records where upper/lowercase runs start inside the
    lemma, as `¦`-separated `↑`/`↓` records. Offsets in the first half of the
    lemma count from its start; offsets past the midpoint are negative and
    count from its end, which keeps the record valid when the rule is applied
    to a word of different length.
* The *body* is either `a` followed by the literal lowercase lemma (used when
    form and lemma share no character run at all) or `d` followed by two
    `¦`-separated minimum edit scripts, one rewriting the part of the form
    before the longest substring shared with the lemma and one rewriting the
    part after it. The shared substring is never encoded; it is recovered
    verbatim from the form when the rule is applied. `-` deletes one form
    character and `+c` inserts the character `c`.

For example, the Czech form *domu* with lemma *dům* encodes as
`↓0;d¦---+ů+m`: all lowercase, empty prefix script, and a suffix script
rewriting *omu* into *ům* after the shared *d*.

# Terminology
* A *form* is the surface word as it appears in running text.
* A *lemma* is its dictionary base form.
* A *rule* is the encoded transformation between the two. Equal
    transformations produce byte-identical rule strings, which is what makes
    rules usable as vocabulary keys: the suffix rule of *dogs*→*dog* is the
    same string as the one of *cats*→*cat*.
* The *rule vocabulary* maps every rule observed often enough in a corpus to
    a dense integer id, with ids `0` and `1` reserved for `<pad>` and
    `<unk>`.

Both codec operations are pure functions without shared state and are safe to
call from any number of threads.
*/

mod align;
mod casing;
mod config;
mod rule;
mod vocab;

// The public api starts here
pub use align::{min_edit_script, EditOp, EditScript, ParseScriptError, ReplayError};

pub use casing::{CaseDirection, CasingScript, CasingSpan, ParseCasingError};

pub use rule::{
    apply_lemma_rule, gen_lemma_rule, try_apply_lemma_rule, try_gen_lemma_rule, EncodeError,
    RuleError, SeparatorPolicy,
};

pub use config::{CodecConfig, CodecConfigBuilder, DefaultCodecConfig};

pub use vocab::{RuleVocab, PAD, UNK};

/// Main entrypoint for corpus loading. This function encodes every (form,
/// lemma) pair of the parallel slices into its lemma rule and builds the rule
/// vocabulary, keeping the rules observed at least `rule_min` times. Instead
/// of taking in the raw parameters, this function takes a `CodecConfig`
/// struct and uses sensible defaults.
///
/// * `forms`: surface forms of the corpus, in order
/// * `lemmas`: their lemmas, parallel to `forms`
/// * `config`: separator policy and minimum rule count
///
/// #Example
/// ```rust
/// use lemru::{build_rule_vocab_conf, CodecConfigBuilder, SeparatorPolicy, UNK};
///
/// let forms = vec!["dogs", "cats", "went"];
/// let lemmas = vec!["dog", "cat", "go"];
/// let config = CodecConfigBuilder::default()
///     .separators(SeparatorPolicy::Accept)
///     .rule_min(2)
///     .build();
///
/// let vocab = build_rule_vocab_conf(&forms, &lemmas, config).unwrap();
/// // The shared suffix rule of dogs->dog and cats->cat clears the threshold,
/// // the one-off literal rule of went->go does not.
/// assert_eq!(vocab.encode("dogs", "dog"), 2);
/// assert_eq!(vocab.encode("went", "go"), UNK);
/// assert_eq!(vocab.decode("cats", 2), "cat");
/// ```
pub fn build_rule_vocab_conf<Policy>(
    forms: &[&str],
    lemmas: &[&str],
    config: CodecConfig<Policy>,
) -> Result<RuleVocab, EncodeError>
where
    Policy: Into<SeparatorPolicy>,
{
    let (policy, rule_min) = config.into();
    RuleVocab::try_from_pairs(forms, lemmas, policy, rule_min)
}

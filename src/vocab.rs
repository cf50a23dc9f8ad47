/*!
This module holds the vocabulary of rule strings a dataset loader builds while
reading a training corpus. Every distinct rule is interned under a dense
integer id so the tagger can treat lemmatization as classification over rule
ids; at inference time the predicted id is decoded back against the surface
form. Rule strings persist across training and inference runs inside the
serialized vocabulary, which is why the codec guarantees byte-identical
encoding.
*/
use crate::rule::{apply_lemma_rule, gen_lemma_rule, try_gen_lemma_rule, EncodeError, SeparatorPolicy};
use ahash::HashMap as AHashMap;
use itertools::multizip;
use serde::{Deserialize, Serialize};

/// Id of the padding sentinel `<pad>`.
pub const PAD: usize = 0;
/// Id of the unknown-rule sentinel `<unk>`.
pub const UNK: usize = 1;

const PAD_RULE: &str = "<pad>";
const UNK_RULE: &str = "<unk>";

/// A bidirectional mapping between rule strings and dense ids. Ids `0` and
/// `1` are always `<pad>` and `<unk>`; real rules start at `2` in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleVocab {
    rules: Vec<String>,
    rules_map: AHashMap<String, usize>,
}

impl RuleVocab {
    /// An empty vocabulary holding only the two sentinels.
    pub fn new() -> Self {
        let mut vocab = RuleVocab {
            rules: Vec::new(),
            rules_map: AHashMap::default(),
        };
        vocab.add_rule(PAD_RULE);
        vocab.add_rule(UNK_RULE);
        vocab
    }

    /// Builds a vocabulary from parallel slices of forms and lemmas,
    /// generating the rule of every pair and keeping, in first-occurrence
    /// order, each rule observed at least `rule_min` times. A `rule_min` of
    /// zero behaves like one: everything observed is kept. Rules below the
    /// threshold stay out of the vocabulary and map to `UNK`, the same way a
    /// rare rule is not worth a softmax output of its own.
    pub fn from_pairs(forms: &[&str], lemmas: &[&str], rule_min: usize) -> Self {
        let observed = multizip((forms.iter(), lemmas.iter()))
            .map(|(form, lemma)| gen_lemma_rule(form, lemma))
            .collect();
        Self::from_observed(observed, rule_min)
    }

    /// Like `from_pairs`, with an explicit `SeparatorPolicy` applied to every
    /// lemma before encoding.
    pub fn try_from_pairs(
        forms: &[&str],
        lemmas: &[&str],
        policy: SeparatorPolicy,
        rule_min: usize,
    ) -> Result<Self, EncodeError> {
        let observed = multizip((forms.iter(), lemmas.iter()))
            .map(|(form, lemma)| try_gen_lemma_rule(form, lemma, policy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_observed(observed, rule_min))
    }

    fn from_observed(observed: Vec<String>, rule_min: usize) -> Self {
        let mut counts: AHashMap<&str, usize> = AHashMap::default();
        for rule in &observed {
            *counts.entry(rule.as_str()).or_insert(0) += 1;
        }
        let threshold = rule_min.max(1);
        let mut vocab = Self::new();
        for rule in &observed {
            if counts[rule.as_str()] >= threshold {
                vocab.add_rule(rule);
            }
        }
        vocab
    }

    /// Interns `rule` and returns its id. Already-known rules keep their
    /// original id.
    pub fn add_rule(&mut self, rule: &str) -> usize {
        if let Some(&id) = self.rules_map.get(rule) {
            return id;
        }
        let id = self.rules.len();
        self.rules.push(rule.to_string());
        self.rules_map.insert(rule.to_string(), id);
        id
    }

    /// The id of `rule`, or `UNK` when the rule was never interned.
    pub fn rule_to_id(&self, rule: &str) -> usize {
        self.rules_map.get(rule).copied().unwrap_or(UNK)
    }

    /// The rule behind `id`, or `None` for out-of-range ids.
    pub fn id_to_rule(&self, id: usize) -> Option<&str> {
        self.rules.get(id).map(String::as_str)
    }

    /// Encodes a (form, lemma) pair and looks the rule up, `UNK` when the
    /// vocabulary does not hold it.
    pub fn encode(&self, form: &str, lemma: &str) -> usize {
        self.rule_to_id(&gen_lemma_rule(form, lemma))
    }

    /// Decodes the rule behind `id` against `form`. Sentinel and out-of-range
    /// ids fall back to the form unchanged, matching the fail-soft behavior
    /// of `apply_lemma_rule`.
    pub fn decode(&self, form: &str, id: usize) -> String {
        if id == PAD || id == UNK {
            return form.to_string();
        }
        match self.id_to_rule(id) {
            Some(rule) => apply_lemma_rule(form, rule),
            None => form.to_string(),
        }
    }

    /// Number of entries, sentinels included.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The interned rule strings, sentinels first, in id order.
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(String::as_str)
    }
}

impl Default for RuleVocab {
    fn default() -> Self {
        Self::new()
    }
}

/*
 * This module contains some quality of life structs and alias. Most importantly, it contains the
 * `CodecConfig` struct, which implements the default trait. This config can be passed to the
 * `build_rule_vocab_conf` function to simplify its arguments.
*/
use crate::rule::SeparatorPolicy;
use either::Either as LeftOrRight;
use std::fmt::{Debug, Display};

/// Reasonable default configuration for encoding a corpus.
pub type DefaultCodecConfig = CodecConfig<SeparatorPolicy>;

impl DefaultCodecConfig {
    pub fn new() -> Self {
        Self {
            separators: SeparatorPolicy::Accept,
            rule_min: 1,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
/// Config struct used to simplify the inputs of parameters to the corpus
/// encoding entrypoint. It implements the default trait.
pub struct CodecConfig<Policy>
where
    Policy: Into<SeparatorPolicy>,
{
    /// What to do with lemmas containing reserved delimiter characters. The
    /// default accepts them, which keeps the encoding byte-stable across
    /// runs.
    separators: Policy,
    /// Minimum number of occurrences a rule needs before it earns an id of
    /// its own. Rules below the threshold map to `<unk>`. Zero behaves like
    /// one.
    rule_min: usize,
}

impl Default for DefaultCodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<Policy> From<CodecConfig<Policy>> for (SeparatorPolicy, usize)
where
    Policy: Into<SeparatorPolicy>,
{
    fn from(value: CodecConfig<Policy>) -> Self {
        (value.separators.into(), value.rule_min)
    }
}

impl<Policy> Display for CodecConfig<Policy>
where
    Policy: Into<SeparatorPolicy> + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = format!(
            "Separator policy: {:?}\n Minimum rule occurrences: {}",
            self.separators, self.rule_min
        );
        write!(f, "{}", string)
    }
}

/// This builder can be used to build and customize a `CodecConfig` structure.
pub struct CodecConfigBuilder<Policy>
where
    Policy: Into<SeparatorPolicy>,
{
    separators: LeftOrRight<Policy, SeparatorPolicy>,
    rule_min: usize,
}

impl Default for CodecConfigBuilder<SeparatorPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Policy> CodecConfigBuilder<Policy>
where
    Policy: Into<SeparatorPolicy>,
{
    pub fn separators(mut self, separators: Policy) -> Self {
        self.separators = LeftOrRight::Left(separators);
        self
    }
    pub fn rule_min(mut self, rule_min: usize) -> Self {
        self.rule_min = rule_min;
        self
    }
    pub fn new() -> Self {
        Self {
            separators: LeftOrRight::Right(SeparatorPolicy::Accept),
            rule_min: 1,
        }
    }
    pub fn build(self) -> CodecConfig<SeparatorPolicy> {
        CodecConfig {
            separators: self.separators.either_into(),
            rule_min: self.rule_min,
        }
    }
}

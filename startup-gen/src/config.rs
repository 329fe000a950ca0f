use crate::error::{Error, Result};
use crate::slot::NVIC_VECTORS;

/// How many trailing characters to drop from an enumerator to get its handler base name.
///
/// The defaults follow the CMSIS convention: `WWDG_IRQn = 0` becomes `WWDG_IRQ` and
/// `NonMaskableInt_IRQn = -14` becomes `NonMaskableInt_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub non_negative: usize,
    pub negative: usize,
}

impl Default for SuffixRule {
    fn default() -> SuffixRule {
        SuffixRule {
            non_negative: 1,
            negative: 4,
        }
    }
}

impl SuffixRule {
    /// Strip the suffix for an enumerator with value `irqn`, counting characters. Returns `None`
    /// when nothing would be left of the name.
    pub fn strip<'a>(&self, ident: &'a str, irqn: i64) -> Option<&'a str> {
        let count = if irqn >= 0 { self.non_negative } else { self.negative };
        let end = match count {
            0 => ident.len(),
            n => ident.char_indices().rev().nth(n - 1)?.0,
        };
        match &ident[..end] {
            "" => None,
            base => Some(base),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Synthesize `IRQ<n>_IRQHandler` names for NVIC slots the header leaves unnamed.
    pub emit_unused: bool,
    /// Use the CMSIS short names for the core exceptions that have one.
    pub short_core_names: bool,
    /// Number of NVIC vectors to emit instead of the count implied by the header.
    pub requested_vectors: Option<u16>,
    pub suffix_rule: SuffixRule,
}

impl Config {
    pub fn emit_unused(mut self, value: bool) -> Config {
        self.emit_unused = value;
        self
    }

    pub fn short_core_names(mut self, value: bool) -> Config {
        self.short_core_names = value;
        self
    }

    pub fn requested_vectors(mut self, count: u16) -> Result<Config> {
        if count > NVIC_VECTORS {
            return Err(Error::VectorCountOutOfRange(count));
        }
        self.requested_vectors = Some(count);
        Ok(self)
    }

    pub fn suffix_rule(mut self, rule: SuffixRule) -> Config {
        self.suffix_rule = rule;
        self
    }
}

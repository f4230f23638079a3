//! Translation options
//!
//! Options are plain data so a host can keep them in its own configuration file:
//!
//! ```
//! use cfgdsl::{Recovery, Substitution, TranslateOptions};
//!
//! let options = TranslateOptions::default()
//!     .with_recovery(Recovery::Strict)
//!     .with_substitution(Substitution::Textual);
//! assert_eq!(options.max_depth, 128);
//! ```

use serde::{Deserialize, Serialize};

/// Default block nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How the scanner and parser treat malformed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recovery {
    /// Skip unrecognized characters, unterminated literals and stray tokens
    #[default]
    Tolerant,
    /// Reject every anomaly with an error
    Strict,
}

impl Recovery {
    /// True for [`Recovery::Strict`]
    pub fn is_strict(self) -> bool {
        self == Recovery::Strict
    }
}

/// How variable names inside `$...$` are replaced by their bound values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Substitution {
    /// Only whitespace-delimited tokens that exactly name a binding, dotted
    /// paths (`server.port`) reach into namespace tables
    #[default]
    WholeToken,
    /// Raw text replacement of every binding name, in binding order.
    /// A name that occurs inside another token is replaced too.
    Textual,
}

/// Options for a single translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Malformed input policy
    pub recovery: Recovery,
    /// Expression variable substitution
    pub substitution: Substitution,
    /// Deepest block nesting accepted by the parser
    pub max_depth: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            recovery: Recovery::default(),
            substitution: Substitution::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateOptions {
    /// Tolerant defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict recovery, other options default
    pub fn strict() -> Self {
        Self::default().with_recovery(Recovery::Strict)
    }

    /// Sets the malformed input policy
    pub fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Sets how expression variables are substituted
    pub fn with_substitution(mut self, substitution: Substitution) -> Self {
        self.substitution = substitution;
        self
    }

    /// Sets the block nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

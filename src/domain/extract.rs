//! Splitting pasted free-form text into unit codes.
//!
//! Every policy treats a run of delimiters as one separator, trims each token,
//! drops empty tokens and keeps source order. Extraction never fails.

use crate::error::HandoverError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Leading list markers removed when `strip_bullets` is on
const BULLETS: &[char] = &['-', '*', '•', '·', '–'];

/// Which characters separate codes in pasted text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitPolicy {
    /// Newlines only
    Lines,
    /// Newlines, `,` and the Arabic comma `،`
    #[default]
    LinesAndCommas,
    /// Any whitespace run, plus both commas
    Whitespace,
}

impl SplitPolicy {
    fn is_delimiter(self, c: char) -> bool {
        match self {
            Self::Lines => c == '\n' || c == '\r',
            Self::LinesAndCommas => matches!(c, '\n' | '\r' | ',' | '،'),
            Self::Whitespace => c.is_whitespace() || c == ',' || c == '،',
        }
    }
}

impl FromStr for SplitPolicy {
    type Err = HandoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "lines-and-commas" => Ok(Self::LinesAndCommas),
            "whitespace" => Ok(Self::Whitespace),
            _ => Err(HandoverError::InvalidSplitPolicy(format!(
                "'{}'. Valid policies: lines, lines-and-commas, whitespace",
                s
            ))),
        }
    }
}

/// Tokenizer for the paste area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extractor {
    pub policy: SplitPolicy,
    pub strip_bullets: bool,
}

impl Extractor {
    pub fn new(policy: SplitPolicy) -> Self {
        Self {
            policy,
            strip_bullets: false,
        }
    }

    pub fn with_bullet_stripping(mut self) -> Self {
        self.strip_bullets = true;
        self
    }

    /// Splits `raw` into non-empty, trimmed codes in source order
    pub fn extract(&self, raw: &str) -> Vec<String> {
        raw.split(|c| self.policy.is_delimiter(c))
            .map(|token| self.clean(token))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn clean<'a>(&self, token: &'a str) -> &'a str {
        let token = token.trim();
        if self.strip_bullets {
            token.trim_start_matches(BULLETS).trim()
        } else {
            token
        }
    }
}

/// Extracts with the default policy
pub fn extract(raw: &str) -> Vec<String> {
    Extractor::default().extract(raw)
}

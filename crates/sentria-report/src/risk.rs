// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quantitative risk model: seven bounded sub-scores summing to 0-100,
//! bucketed into four risk bands.
//!
//! The model is described to the generator inside the prompt templates; this
//! module is the single source of truth for the ranges and thresholds both
//! the prompts and any downstream consumers refer to.

use std::fmt;

/// Maximum value of the Reach (R) sub-score.
pub const REACH_MAX: u8 = 20;
/// Maximum value of the Velocity (V) sub-score.
pub const VELOCITY_MAX: u8 = 15;
/// Maximum value of the Sentiment (S) sub-score.
pub const SENTIMENT_MAX: u8 = 15;
/// Maximum value of the Safety (H) sub-score.
pub const SAFETY_MAX: u8 = 20;
/// Maximum value of the Legal (L) sub-score.
pub const LEGAL_MAX: u8 = 10;
/// Maximum value of the VIP/Policy (P) sub-score.
pub const VIP_POLICY_MAX: u8 = 10;
/// Maximum value of the Evidence (E) sub-score.
pub const EVIDENCE_MAX: u8 = 10;

/// The seven weighted sub-scores of the risk assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSubscores {
    /// Mention volume / spread, 0-20.
    pub reach: u8,
    /// Escalation speed, 0-15.
    pub velocity: u8,
    /// Negativity / intensity, 0-15.
    pub sentiment: u8,
    /// Safety implications, 0-20.
    pub safety: u8,
    /// Legal sensitivity, 0-10.
    pub legal: u8,
    /// VIP / policy sensitivity, 0-10.
    pub vip_policy: u8,
    /// Strength of negative evidence, 0-10.
    pub evidence: u8,
}

impl RiskSubscores {
    /// Total risk score in [0, 100]. Out-of-range sub-scores are clamped to
    /// their stated maxima before summing.
    pub fn total(&self) -> u8 {
        self.reach.min(REACH_MAX)
            + self.velocity.min(VELOCITY_MAX)
            + self.sentiment.min(SENTIMENT_MAX)
            + self.safety.min(SAFETY_MAX)
            + self.legal.min(LEGAL_MAX)
            + self.vip_policy.min(VIP_POLICY_MAX)
            + self.evidence.min(EVIDENCE_MAX)
    }

    /// Risk band for the total score.
    pub fn band(&self) -> RiskBand {
        RiskBand::from_total(self.total())
    }
}

/// Risk band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    /// 0-29.
    Low,
    /// 30-59.
    Medium,
    /// 60-79.
    High,
    /// 80-100.
    Critical,
}

impl RiskBand {
    /// Buckets a total score into its band.
    pub fn from_total(total: u8) -> Self {
        match total {
            0..=29 => RiskBand::Low,
            30..=59 => RiskBand::Medium,
            60..=79 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
            RiskBand::Critical => "critical",
        };
        f.write_str(s)
    }
}

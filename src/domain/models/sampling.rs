//! Sampling parameters and the retry temperature-escalation policy.

use serde::{Deserialize, Serialize};

/// Sampling parameters handed to a provider adapter for one generation.
///
/// Temperature is the only field the acquisition loop varies; the remaining
/// fields are provider-appropriate constants that adapters may override with
/// their own schema defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Sampling temperature for this attempt.
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Nucleus sampling parameter, where the provider schema supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Top-k sampling parameter, where the provider schema supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: EscalationPolicy::default().base,
            max_tokens: 200,
            top_p: None,
            top_k: None,
        }
    }
}

/// Temperature escalation across retry attempts.
///
/// A model that keeps proposing illegal moves is often stuck in a degenerate
/// completion mode; raising the sampling temperature on each retry increases
/// the chance of escaping it. For attempt index `i`:
///
/// - `i == 0`: temperature is exactly `base`.
/// - `i > 0`: temperature is `base + base^(k / i)`.
///
/// With `base < 1` the exponent term grows toward `base + base` as attempts
/// accumulate, so the sequence is monotonically non-decreasing. The `i == 0`
/// case is explicit: the exponent formula divides by `i`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EscalationPolicy {
    /// Base temperature used on the first attempt.
    pub base: f64,

    /// Exponent numerator `k` in `base^(k / i)`.
    pub k: f64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self { base: 0.6, k: 10.0 }
    }
}

impl EscalationPolicy {
    /// Temperature for the given zero-based attempt index.
    pub fn temperature(&self, attempt: u32) -> f64 {
        if attempt == 0 {
            self.base
        } else {
            self.base + self.base.powf(self.k / f64::from(attempt))
        }
    }

    /// Sampling parameters for the given attempt, with the supplied
    /// token budget and no provider-specific overrides.
    pub fn sampling_for(&self, attempt: u32, max_tokens: u32) -> SamplingConfig {
        SamplingConfig {
            temperature: self.temperature(attempt),
            max_tokens,
            top_p: None,
            top_k: None,
        }
    }
}

//! Platform detection from a header set.
//!
//! Classification is a pure scoring function: each header may match one
//! platform's distinctive header list and may carry an Instagram-only
//! keyword. The result lists every signal so callers can show why a
//! decision was made.

use std::collections::HashSet;

use metamerge_core::fields::{ACCOUNT_USERNAME, FOLLOWS, PROFILE_VISITS, SAVES};
use metamerge_core::{Platform, UnknownPlatformPolicy};
use serde::Serialize;

use crate::defaults::{FACEBOOK_HEADERS, INSTAGRAM_HEADERS, INSTAGRAM_KEYWORDS};
use crate::error::IngestError;
use crate::normalize::normalize;

const HEADER_WEIGHT: f64 = 1.0;
const STRONG_WEIGHT: f64 = 2.0;

/// Confidence at or above which a contrary detection is reported even
/// without a strong signal.
const CONFLICT_CONFIDENCE: f64 = 0.75;

/// Canonical names that, present as headers, only occur in Instagram data.
const INSTAGRAM_CANONICAL_KEYS: &[&str] = &[ACCOUNT_USERNAME, SAVES, PROFILE_VISITS, FOLLOWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Header,
    StrongKeyword,
    CanonicalKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub header: String,
    pub platform: Platform,
    pub kind: SignalKind,
}

impl Signal {
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.kind != SignalKind::Header
    }

    fn weight(&self) -> f64 {
        if self.is_strong() {
            STRONG_WEIGHT
        } else {
            HEADER_WEIGHT
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// `None` when no header matched either platform.
    pub platform: Option<Platform>,
    /// Winning score over total score, in `0.0..=1.0`.
    pub confidence: f64,
    pub facebook_score: f64,
    pub instagram_score: f64,
    pub matched_signals: Vec<Signal>,
}

impl Classification {
    #[must_use]
    pub fn has_strong_signal(&self) -> bool {
        self.matched_signals.iter().any(Signal::is_strong)
    }
}

/// Score a header set against both platforms.
///
/// Instagram wins when its weighted score is higher, when it matched while
/// Facebook did not, or when any strong signal is present. Otherwise any
/// Facebook match makes it Facebook. With no matches at all the platform is
/// `None` and the caller applies its [`UnknownPlatformPolicy`].
#[must_use]
pub fn classify<S: AsRef<str>>(headers: &[S]) -> Classification {
    let facebook: HashSet<String> = FACEBOOK_HEADERS.iter().map(|h| normalize(h)).collect();
    let instagram: HashSet<String> = INSTAGRAM_HEADERS.iter().map(|h| normalize(h)).collect();
    let keywords: Vec<String> = INSTAGRAM_KEYWORDS.iter().map(|k| normalize(k)).collect();

    let mut signals = Vec::new();
    for header in headers {
        let header = header.as_ref();
        let key = normalize(header);
        if key.is_empty() {
            continue;
        }

        if facebook.contains(&key) {
            signals.push(signal(header, Platform::Facebook, SignalKind::Header));
        } else if instagram.contains(&key) {
            signals.push(signal(header, Platform::Instagram, SignalKind::Header));
        }

        if INSTAGRAM_CANONICAL_KEYS.contains(&header.trim()) {
            signals.push(signal(header, Platform::Instagram, SignalKind::CanonicalKey));
        } else if keywords.iter().any(|k| key.contains(k.as_str())) {
            signals.push(signal(header, Platform::Instagram, SignalKind::StrongKeyword));
        }
    }

    let score = |platform: Platform| -> f64 {
        signals
            .iter()
            .filter(|s| s.platform == platform)
            .map(Signal::weight)
            .sum()
    };
    let facebook_score = score(Platform::Facebook);
    let instagram_score = score(Platform::Instagram);
    let strong = signals.iter().any(Signal::is_strong);

    let platform = if instagram_score > facebook_score
        || (instagram_score > 0.0 && facebook_score <= 0.0)
        || strong
    {
        Some(Platform::Instagram)
    } else if facebook_score > 0.0 {
        Some(Platform::Facebook)
    } else {
        None
    };

    let total = facebook_score + instagram_score;
    let confidence = match platform {
        Some(Platform::Facebook) if total > 0.0 => facebook_score / total,
        Some(Platform::Instagram) if total > 0.0 => instagram_score / total,
        _ => 0.0,
    };

    Classification {
        platform,
        confidence,
        facebook_score,
        instagram_score,
        matched_signals: signals,
    }
}

fn signal(header: &str, platform: Platform, kind: SignalKind) -> Signal {
    Signal {
        header: header.to_string(),
        platform,
        kind,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Hint,
    Detected,
    Fallback,
}

/// The platform an ingestion run will use, and how it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformDecision {
    pub platform: Platform,
    pub source: DecisionSource,
    pub warning: Option<String>,
}

/// Combine a classification with the caller's hint and fallback policy.
///
/// A hint always wins; if the headers argue convincingly for the other
/// platform the decision carries a warning instead of failing.
///
/// # Errors
///
/// Returns [`IngestError::UnknownPlatform`] when there is no hint, nothing
/// was detected, and the policy is [`UnknownPlatformPolicy::Reject`].
pub fn resolve_platform<S: AsRef<str>>(
    classification: &Classification,
    hint: Option<Platform>,
    policy: UnknownPlatformPolicy,
    headers: &[S],
) -> Result<PlatformDecision, IngestError> {
    if let Some(platform) = hint {
        let warning = match classification.platform {
            Some(detected)
                if detected != platform
                    && (classification.has_strong_signal()
                        || classification.confidence >= CONFLICT_CONFIDENCE) =>
            {
                let message = format!(
                    "selected {platform} but headers look like {detected} (confidence {:.2})",
                    classification.confidence
                );
                tracing::warn!(
                    selected = %platform,
                    detected = %detected,
                    confidence = classification.confidence,
                    "platform hint contradicts detected headers"
                );
                Some(message)
            }
            _ => None,
        };
        return Ok(PlatformDecision {
            platform,
            source: DecisionSource::Hint,
            warning,
        });
    }

    if let Some(platform) = classification.platform {
        return Ok(PlatformDecision {
            platform,
            source: DecisionSource::Detected,
            warning: None,
        });
    }

    let platform = match policy {
        UnknownPlatformPolicy::AssumeFacebook => Platform::Facebook,
        UnknownPlatformPolicy::AssumeInstagram => Platform::Instagram,
        UnknownPlatformPolicy::Reject => {
            return Err(IngestError::UnknownPlatform {
                headers: headers
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    };
    tracing::debug!(%platform, "no platform signals, applying fallback");
    Ok(PlatformDecision {
        platform,
        source: DecisionSource::Fallback,
        warning: None,
    })
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;

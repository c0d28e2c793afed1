//! Keyword vocabularies used by the deterministic summary fallback.

pub const FINDING_KEYWORDS: &[&str] = &["found", "result", "discovered", "stable", "unstable"];

pub const ERROR_KEYWORDS: &[&str] = &["error", "failed"];

/// Lines longer than this are assumed to be prose rather than a distillable
/// fact and are skipped by [`crate::summary::extract_key_points`].
pub const KEY_POINT_LINE_LIMIT: usize = 200;

/// Maximum number of bullet points [`crate::summary::extract_key_points`] will
/// emit before truncating the rest.
pub const KEY_POINT_CAP: usize = 20;

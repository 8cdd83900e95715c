//! Motion-verb vocabulary.
//!
//! The eight motion commands are the heart of the language: four interpolation kinds
//! (point-to-point, linear, circular, spline), each in an absolute and a relative
//! (`_REL`) form.
//!
//! ## Notes
//! - `SPL` is the canonical spelling of the spline verb (not `SPLINE`).
//! - Relative verbs interpret their target's coordinates as increments from the current
//!   pose; the parser does not care, but the executor does.
//!
//! ## Examples
//! ```rust
//! use mova_core::lang::motion::{self, MotionId};
//!
//! assert_eq!(motion::from_str("PTP_REL"), Some(MotionId::PtpRel));
//! assert!(motion::info_for(MotionId::PtpRel).relative);
//! assert_eq!(motion::info_for(MotionId::PtpRel).base, MotionId::Ptp);
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every motion verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionId {
    Ptp,
    Lin,
    Circ,
    Spl,
    PtpRel,
    LinRel,
    CircRel,
    SplRel,
}

/// Metadata for a motion verb.
#[derive(Debug, Clone, Copy)]
pub struct MotionInfo {
    pub id: MotionId,
    pub canonical: &'static str,
    /// `true` for `_REL` (incremental-coordinate) variants.
    pub relative: bool,
    /// The absolute verb this variant interpolates like (`PTP_REL` → `PTP`).
    pub base: MotionId,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all motion verbs.
pub const MOTIONS: &[MotionInfo] = &[
    info(MotionId::Ptp, "PTP", false, MotionId::Ptp),
    info(MotionId::Lin, "LIN", false, MotionId::Lin),
    info(MotionId::Circ, "CIRC", false, MotionId::Circ),
    info(MotionId::Spl, "SPL", false, MotionId::Spl),
    info(MotionId::PtpRel, "PTP_REL", true, MotionId::Ptp),
    info(MotionId::LinRel, "LIN_REL", true, MotionId::Lin),
    info(MotionId::CircRel, "CIRC_REL", true, MotionId::Circ),
    info(MotionId::SplRel, "SPL_REL", true, MotionId::Spl),
];

/// Canonical spelling.
pub fn as_str(id: MotionId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: MotionId) -> &'static MotionInfo {
    MOTIONS.iter().find(|m| m.id == id).expect("motion info missing")
}

/// Lookup by spelling (case-sensitive).
pub fn from_str(s: &str) -> Option<MotionId> {
    MOTIONS.iter().find(|m| m.canonical == s).map(|m| m.id)
}

const fn info(id: MotionId, canonical: &'static str, relative: bool, base: MotionId) -> MotionInfo {
    MotionInfo {
        id,
        canonical,
        relative,
        base,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rel_variants_map_to_base() {
        for m in MOTIONS {
            if m.relative {
                assert!(!info_for(m.base).relative, "{:?} base must be absolute", m.id);
                assert_eq!(format!("{}_REL", as_str(m.base)), m.canonical);
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// What to do with the projected winding of Floor and Roof surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindingPolicy {
    /// Report the winding, never change it. Only the start vertex moves.
    #[default]
    Preserve,
    /// Reverse every surface of a zone whose floors and roofs are clockwise
    /// viewed from outside.
    ///
    /// Degenerate windings do not count, and a zone whose floors and roofs
    /// disagree is left untouched.
    ReverseClockwise,
}

/// Options for a canonicalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Floor/Roof winding policy.
    pub winding: WindingPolicy,
    /// Process zones on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            winding: WindingPolicy::Preserve,
            parallel: true,
        }
    }
}

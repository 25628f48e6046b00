//! Net result of a committed review session.

use serde::{Deserialize, Serialize};
use std::fmt;

use sift_common::FrameIndex;

/// Net flag changes applied by a session commit.
///
/// `included` and `excluded` are disjoint and ascending; together they
/// cover exactly the indices whose committed flag changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Indices that flipped from excluded to included.
    pub included: Vec<FrameIndex>,
    /// Indices that flipped from included to excluded.
    pub excluded: Vec<FrameIndex>,
    /// Included count after the commit.
    pub remaining: usize,
}

impl ChangeReport {
    /// True if the commit changed at least one flag.
    pub fn has_changes(&self) -> bool {
        !(self.included.is_empty() && self.excluded.is_empty())
    }

    /// Included count before the commit, reconstructed from the deltas.
    pub fn previous_included(&self) -> usize {
        self.remaining + self.excluded.len() - self.included.len()
    }

    /// 1-based ordinals of the newly included frames.
    pub fn included_ordinals(&self) -> Vec<usize> {
        self.included.iter().map(|i| i.ordinal()).collect()
    }

    /// 1-based ordinals of the newly excluded frames.
    pub fn excluded_ordinals(&self) -> Vec<usize> {
        self.excluded.iter().map(|i| i.ordinal()).collect()
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} newly included, {} newly excluded, {} remaining",
            self.included.len(),
            self.excluded.len(),
            self.remaining
        )
    }
}

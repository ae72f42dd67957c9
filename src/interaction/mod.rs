use serde::{Deserialize, Serialize};

/// Which state the navigation controls drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavigationMode {
    /// Pan/zoom move the fetched window.
    #[default]
    Window,
    /// Pan moves a visual sub-range over already-loaded rows.
    SubRange,
}

impl NavigationMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Window => Self::SubRange,
            Self::SubRange => Self::Window,
        }
    }
}

/// Raw drag-selection span as reported by the pointer, in either order.
///
/// `(0, 0)` is the cleared state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftSelection {
    pub draft_start: f64,
    pub draft_end: f64,
}

impl DraftSelection {
    #[must_use]
    pub fn new(draft_start: f64, draft_end: f64) -> Self {
        Self {
            draft_start,
            draft_end,
        }
    }

    /// Zero-width spans, an unset end and non-finite bounds cannot be committed.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !self.draft_start.is_finite()
            || !self.draft_end.is_finite()
            || self.draft_start == self.draft_end
            || self.draft_end == 0.0
    }

    /// Ordered `(start, end)` with `start < end`, or `None` when degenerate.
    #[must_use]
    pub fn normalized(self) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }
        Some(if self.draft_start <= self.draft_end {
            (self.draft_start, self.draft_end)
        } else {
            (self.draft_end, self.draft_start)
        })
    }

    #[must_use]
    pub fn is_cleared(self) -> bool {
        self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//! Geometry probing — how far the lane must travel before the head card
//! has fully left the viewport.

/// Anything that can report the current step (one card width plus the gap
/// after it).  `0.0` means the layout is not measurable yet.
pub trait GeometryProbe {
    fn measure(&self) -> f64;
}

/// Lane geometry as it was actually rendered on the last frame.
///
/// The lane widget writes this while drawing, so probing reads render
/// output rather than recomputing the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneMetrics {
    /// Width of the first rendered item card, `None` when no item card was
    /// drawn (empty list or placeholders only).
    pub first_card_width: Option<u16>,
    /// Columns between two adjacent cards.
    pub gap: u16,
}

impl GeometryProbe for LaneMetrics {
    fn measure(&self) -> f64 {
        match self.first_card_width {
            Some(width) => f64::from(width) + f64::from(self.gap),
            None => 0.0,
        }
    }
}

#[cfg(test)]
impl GeometryProbe for f64 {
    fn measure(&self) -> f64 {
        *self
    }
}

//! Sequential box layout.
//!
//! Arranges children in a single row or column. Children with a desired
//! dimension along the main axis get exactly that; the rest share the
//! remaining space equally. The cross axis uses the desired dimension when
//! present and the full content extent otherwise.

use mullion_core::Rect;

use super::{LayoutContext, LayoutEngine};

/// Direction of a [`BoxLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// A layout engine that stacks children along one axis.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    orientation: Orientation,
    spacing: f32,
}

impl BoxLayout {
    /// Create a box layout with the given orientation and no spacing.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0.0,
        }
    }

    /// Create a horizontal box layout.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a vertical box layout.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the gap between consecutive children (builder pattern).
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// The gap between consecutive children.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }
}

impl LayoutEngine for BoxLayout {
    fn arrange(&mut self, area: Rect, ctx: &mut LayoutContext<'_>) {
        let count = ctx.child_count();
        if count == 0 {
            return;
        }

        let main_extent = match self.orientation {
            Orientation::Horizontal => area.width(),
            Orientation::Vertical => area.height(),
        };

        // First pass: how much of the main axis is spoken for by desired
        // dimensions, and how many children float.
        let mut fixed_total = 0.0;
        let mut floating = 0usize;
        for i in 0..count {
            let (dw, dh) = ctx.desired_size(i);
            let desired = match self.orientation {
                Orientation::Horizontal => dw,
                Orientation::Vertical => dh,
            };
            match desired {
                Some(size) => fixed_total += size,
                None => floating += 1,
            }
        }

        let spacing_total = self.spacing * (count.saturating_sub(1)) as f32;
        let remaining = (main_extent - fixed_total - spacing_total).max(0.0);
        let share = if floating > 0 {
            remaining / floating as f32
        } else {
            0.0
        };

        // Second pass: place children sequentially.
        let mut cursor = match self.orientation {
            Orientation::Horizontal => area.left(),
            Orientation::Vertical => area.top(),
        };
        for i in 0..count {
            let (dw, dh) = ctx.desired_size(i);
            let rect = match self.orientation {
                Orientation::Horizontal => {
                    let width = dw.unwrap_or(share);
                    let height = dh.unwrap_or(area.height());
                    Rect::new(cursor, area.top(), width, height)
                }
                Orientation::Vertical => {
                    let width = dw.unwrap_or(area.width());
                    let height = dh.unwrap_or(share);
                    Rect::new(area.left(), cursor, width, height)
                }
            };
            ctx.set_child_bounds(i, rect);
            cursor += match self.orientation {
                Orientation::Horizontal => rect.width(),
                Orientation::Vertical => rect.height(),
            } + self.spacing;
        }
    }
}

#![forbid(unsafe_code)]

//! Geometric primitives and the viewport queries the layout engine needs.
//!
//! Tabs are laid out along a single *dragging axis*: vertical in portrait,
//! horizontal in landscape. The perpendicular *orthogonal axis* carries
//! swipe-to-close gestures. [`Viewport`] answers every extent and padding
//! question in terms of those two axes so nothing downstream has to care
//! about orientation.

use crate::error::{Result, TabStackError};

/// Screen orientation of the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Tabs are dragged vertically.
    #[default]
    Portrait,
    /// Tabs are dragged horizontally.
    Landscape,
}

/// A screen axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[must_use]
    pub const fn orthogonal(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Padding on each edge, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Create padding with explicit edges.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create uniform padding on all edges.
    #[must_use]
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Padding at the leading edge of `axis`.
    #[must_use]
    pub const fn leading(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Padding at the trailing edge of `axis`.
    #[must_use]
    pub const fn trailing(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    fn is_valid(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// A point projected onto the dragging and orthogonal axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPoint {
    /// Coordinate along the dragging axis.
    pub axis: f32,
    /// Coordinate along the orthogonal axis.
    pub orthogonal: f32,
}

/// Size, padding and orientation of the area the switcher occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub padding: Sides,
    /// Extent of the toolbar overlapping the leading edge of the dragging axis.
    pub toolbar_offset: f32,
    pub orientation: Orientation,
}

impl Viewport {
    /// Create a portrait viewport without padding or toolbar.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: Sides::new(0.0, 0.0, 0.0, 0.0),
            toolbar_offset: 0.0,
            orientation: Orientation::Portrait,
        }
    }

    /// Set the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    /// Set the toolbar offset.
    #[must_use]
    pub const fn with_toolbar_offset(mut self, offset: f32) -> Self {
        self.toolbar_offset = offset;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The axis tabs are dragged along.
    #[must_use]
    pub const fn dragging_axis(&self) -> Axis {
        match self.orientation {
            Orientation::Portrait => Axis::Vertical,
            Orientation::Landscape => Axis::Horizontal,
        }
    }

    /// Size along `axis`.
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Size along the dragging axis.
    #[must_use]
    pub const fn drag_extent(&self) -> f32 {
        self.extent(self.dragging_axis())
    }

    /// Size along the orthogonal axis.
    #[must_use]
    pub const fn orthogonal_extent(&self) -> f32 {
        self.extent(self.dragging_axis().orthogonal())
    }

    /// Screen coordinate (along the dragging axis) of tab position 0.
    #[must_use]
    pub const fn content_origin(&self) -> f32 {
        self.padding.leading(self.dragging_axis()) + self.toolbar_offset
    }

    /// Space left for tabs along the dragging axis.
    #[must_use]
    pub fn available_extent(&self) -> f32 {
        let axis = self.dragging_axis();
        self.drag_extent()
            - self.toolbar_offset
            - self.padding.leading(axis)
            - self.padding.trailing(axis)
    }

    /// Anchor where accordion compression of floating tabs begins.
    #[must_use]
    pub fn attached_position(&self) -> f32 {
        self.available_extent() / 2.0
    }

    /// Project a raw screen point onto the dragging/orthogonal axes.
    #[must_use]
    pub const fn project(&self, x: f32, y: f32) -> AxisPoint {
        match self.dragging_axis() {
            Axis::Vertical => AxisPoint {
                axis: y,
                orthogonal: x,
            },
            Axis::Horizontal => AxisPoint {
                axis: x,
                orthogonal: y,
            },
        }
    }

    /// Check that every dimension is finite and leaves room for tabs.
    ///
    /// # Errors
    /// `InvalidArgument` naming the first unusable dimension.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(TabStackError::invalid(format!(
                "viewport width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(TabStackError::invalid(format!(
                "viewport height must be positive, got {}",
                self.height
            )));
        }
        if !self.padding.is_valid() {
            return Err(TabStackError::invalid(format!(
                "viewport padding must be finite and non-negative, got {:?}",
                self.padding
            )));
        }
        if !(self.toolbar_offset.is_finite() && self.toolbar_offset >= 0.0) {
            return Err(TabStackError::invalid(format!(
                "toolbar offset must be finite and non-negative, got {}",
                self.toolbar_offset
            )));
        }
        if self.available_extent() <= 0.0 {
            return Err(TabStackError::invalid(format!(
                "no space left for tabs: extent {} minus toolbar and padding",
                self.drag_extent()
            )));
        }
        Ok(())
    }
}

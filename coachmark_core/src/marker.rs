// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker descriptors.
//!
//! A [`MarkerDescriptor`] describes *where* one coach-mark step points: the
//! geometry of the region that should show through the overlay. It says
//! nothing about the explanatory content, which the host provides separately
//! through [`DataSource::content_view`](crate::sequencer::DataSource::content_view).

use kurbo::{Point, Rect, Size};

/// Which cutout shape a marker uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Circular spotlight.
    Circle,
    /// Rounded-rectangle cutout.
    Rectangle,
}

/// Geometry of one highlight target, in overlay coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerDescriptor {
    /// A circular spotlight of `radius` around `center`.
    Circle {
        /// Center of the spotlight.
        center: Point,
        /// Radius of the spotlight at rest.
        radius: f64,
    },
    /// A rounded-rectangle cutout with its top-left corner at `origin`.
    Rectangle {
        /// Top-left corner of the cutout at rest.
        origin: Point,
        /// Width and height of the cutout.
        size: Size,
    },
}

impl MarkerDescriptor {
    /// Radius used by [`circle_at`](Self::circle_at).
    pub const DEFAULT_RADIUS: f64 = 30.0;

    /// Creates a circular marker.
    #[must_use]
    pub fn circle(center: impl Into<Point>, radius: f64) -> Self {
        Self::Circle {
            center: center.into(),
            radius,
        }
    }

    /// Creates a circular marker with [`DEFAULT_RADIUS`](Self::DEFAULT_RADIUS).
    #[must_use]
    pub fn circle_at(center: impl Into<Point>) -> Self {
        Self::circle(center, Self::DEFAULT_RADIUS)
    }

    /// Creates a rectangular marker.
    #[must_use]
    pub fn rectangle(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self::Rectangle {
            origin: origin.into(),
            size: size.into(),
        }
    }

    /// Creates a rectangular marker covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self::rectangle(rect.origin(), rect.size())
    }

    /// Returns the shape variant.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
        }
    }

    /// Returns the bounding box of the highlighted region at rest.
    #[must_use]
    pub fn target_bounds(&self) -> Rect {
        match *self {
            Self::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Self::Rectangle { origin, size } => Rect::from_origin_size(origin, size),
        }
    }
}

impl Default for MarkerDescriptor {
    /// A circle of [`DEFAULT_RADIUS`](Self::DEFAULT_RADIUS) at the origin.
    fn default() -> Self {
        Self::circle_at(Point::ORIGIN)
    }
}

// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal-mask geometry.
//!
//! An overlay is clipped by a mask made of two subpaths: the full overlay
//! bounds and a *cutout* where the highlighted target sits. Filled with the
//! even-odd rule, the bounds are opaque and the cutout is not, so the target
//! underneath shows through.
//!
//! Each [`MarkerDescriptor`] yields a [`RevealPair`]: the mask at rest and the
//! mask at the peak of the breathing effect. The two variants expand
//! differently:
//!
//! - **Circle**: the expanded radius is `radius + effect_height`.
//! - **Rectangle**: the expanded cutout keeps its size and corner radius and
//!   moves *up* by `effect_height`.
//!
//! Both paths of a pair are built with the same element structure, so
//! [`RevealAnimation`] can interpolate them element by element.

use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape, Size, Vec2};

use crate::animation::RevealAnimation;
use crate::config::AnimationConfig;
use crate::marker::MarkerDescriptor;
use crate::time::HostTime;

/// Corner radius of rectangular cutouts.
///
/// `kurbo` clamps radii to half the shorter side, so cutouts narrower than
/// twice this value get proportionally rounder corners.
pub const CORNER_RADIUS: f64 = 4.0;

/// Flattening tolerance for rounded-rect corners.
const TOLERANCE: f64 = 0.1;

/// Control-point distance for a quarter circle drawn as one cubic.
const KAPPA: f64 = 0.552_284_749_830_793_6;

/// How overlapping subpaths of a [`Mask`] combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// A point is covered when its winding number is non-zero.
    #[default]
    NonZero,
    /// A point is covered when its winding number is odd.
    EvenOdd,
}

/// A clip mask: a path plus the rule used to fill it.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    /// The mask outline, in layer coordinates.
    pub path: BezPath,
    /// Fill rule applied to `path`.
    pub fill_rule: FillRule,
}

impl Mask {
    /// Creates a mask.
    #[must_use]
    pub fn new(path: BezPath, fill_rule: FillRule) -> Self {
        Self { path, fill_rule }
    }

    /// Returns whether the mask keeps the layer's pixels at `pt`.
    #[must_use]
    pub fn covers(&self, pt: Point) -> bool {
        let winding = self.path.winding(pt);
        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// The hole cut into an overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutout {
    /// Circular spotlight.
    Circle(Circle),
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
}

impl Cutout {
    /// Returns whether `pt` lies inside the cutout.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(circle) => circle.contains(pt),
            Self::RoundedRect(rect) => rect.contains(pt),
        }
    }

    fn append_to(&self, path: &mut BezPath) {
        match self {
            Self::Circle(circle) => append_circle(path, *circle),
            Self::RoundedRect(rect) => path.extend(rect.path_elements(TOLERANCE)),
        }
    }
}

/// Geometry of one reveal mask: overlay bounds with a cutout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealMask {
    /// Overlay bounds, with the origin at the layer's top-left corner.
    pub bounds: Rect,
    /// The hole.
    pub cutout: Cutout,
}

impl RevealMask {
    /// The mask at rest for `marker` on an overlay of `size`.
    #[must_use]
    pub fn resting(marker: &MarkerDescriptor, size: Size) -> Self {
        Self::expanded(marker, size, 0.0)
    }

    /// The mask at the peak of an effect of `effect_height`.
    #[must_use]
    pub fn expanded(marker: &MarkerDescriptor, size: Size, effect_height: f64) -> Self {
        let cutout = match *marker {
            MarkerDescriptor::Circle { center, radius } => {
                Cutout::Circle(Circle::new(center, radius + effect_height))
            }
            MarkerDescriptor::Rectangle { origin, size } => {
                let origin = origin - Vec2::new(0.0, effect_height);
                Cutout::RoundedRect(RoundedRect::from_rect(
                    Rect::from_origin_size(origin, size),
                    CORNER_RADIUS,
                ))
            }
        };
        Self {
            bounds: Rect::from_origin_size(Point::ORIGIN, size),
            cutout,
        }
    }

    /// Builds the mask outline: the cutout followed by the bounds.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.cutout.append_to(&mut path);
        path.extend(self.bounds.path_elements(TOLERANCE));
        path
    }

    /// Builds the even-odd [`Mask`] for this geometry.
    #[must_use]
    pub fn to_mask(&self) -> Mask {
        Mask::new(self.to_path(), FillRule::EvenOdd)
    }

    /// Returns whether the content beneath the overlay shows through at `pt`.
    #[must_use]
    pub fn reveals(&self, pt: Point) -> bool {
        self.bounds.contains(pt) && self.cutout.contains(pt)
    }
}

/// Resting and expanded masks for one marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPair {
    /// The mask at rest.
    pub resting: RevealMask,
    /// The mask at the peak of the effect.
    pub expanded: RevealMask,
}

/// Computes the resting and expanded masks for `marker` on an overlay of
/// `size`.
#[must_use]
pub fn reveal_pair(marker: &MarkerDescriptor, size: Size, config: &AnimationConfig) -> RevealPair {
    RevealPair {
        resting: RevealMask::resting(marker, size),
        expanded: RevealMask::expanded(marker, size, config.effect_height),
    }
}

/// Builds the breathing animation for `marker`, starting at `begin`.
#[must_use]
pub fn reveal_animation(
    marker: &MarkerDescriptor,
    size: Size,
    config: &AnimationConfig,
    begin: HostTime,
) -> RevealAnimation {
    let pair = reveal_pair(marker, size, config);
    RevealAnimation::new(
        pair.resting.to_path(),
        pair.expanded.to_path(),
        config,
        begin,
    )
}

/// Appends `circle` as four cubic quarter arcs.
///
/// `kurbo`'s own circle flattening picks the segment count from the radius;
/// a fixed count keeps paths of different radii interpolable.
fn append_circle(path: &mut BezPath, circle: Circle) {
    let c = circle.center;
    let r = circle.radius;
    let k = KAPPA * r;
    path.move_to(c + Vec2::new(r, 0.0));
    path.curve_to(c + Vec2::new(r, k), c + Vec2::new(k, r), c + Vec2::new(0.0, r));
    path.curve_to(
        c + Vec2::new(-k, r),
        c + Vec2::new(-r, k),
        c + Vec2::new(-r, 0.0),
    );
    path.curve_to(
        c + Vec2::new(-r, -k),
        c + Vec2::new(-k, -r),
        c + Vec2::new(0.0, -r),
    );
    path.curve_to(c + Vec2::new(k, -r), c + Vec2::new(r, -k), c + Vec2::new(r, 0.0));
    path.close_path();
}

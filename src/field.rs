//! Lanes, underground slots and bounding boxes shared by the spawner and the
//! run state.

use crate::constants::{MOLE_SLOT_OFFSET, UNDERGROUND_Y};
use serde::{Deserialize, Serialize};

/// One of the three parallel horizontal bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lane {
    Ground,
    Sky,
    Underground,
}

impl Lane {
    /// Order used by multi-lane patterns: ground first, then sky, then underground.
    pub const ALL: [Lane; 3] = [Lane::Ground, Lane::Sky, Lane::Underground];

    pub fn index(self) -> usize {
        match self {
            Lane::Ground => 0,
            Lane::Sky => 1,
            Lane::Underground => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lane::Ground => "ground",
            Lane::Sky => "sky",
            Lane::Underground => "underground",
        }
    }
}

/// Discrete vertical positions inside the underground lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoleSlot {
    Top,
    Middle,
    Bottom,
}

impl MoleSlot {
    pub const ALL: [MoleSlot; 3] = [MoleSlot::Top, MoleSlot::Middle, MoleSlot::Bottom];

    /// Position from the top, 0 to 2.
    pub fn index(self) -> usize {
        match self {
            MoleSlot::Top => 0,
            MoleSlot::Middle => 1,
            MoleSlot::Bottom => 2,
        }
    }

    /// World y of the slot's center line.
    pub fn y(self) -> f64 {
        match self {
            MoleSlot::Top => UNDERGROUND_Y - MOLE_SLOT_OFFSET,
            MoleSlot::Middle => UNDERGROUND_Y,
            MoleSlot::Bottom => UNDERGROUND_Y + MOLE_SLOT_OFFSET,
        }
    }

    /// One slot up, saturating at `Top`.
    pub fn up(self) -> MoleSlot {
        match self {
            MoleSlot::Top | MoleSlot::Middle => MoleSlot::Top,
            MoleSlot::Bottom => MoleSlot::Middle,
        }
    }

    /// One slot down, saturating at `Bottom`.
    pub fn down(self) -> MoleSlot {
        match self {
            MoleSlot::Top => MoleSlot::Middle,
            MoleSlot::Middle | MoleSlot::Bottom => MoleSlot::Bottom,
        }
    }
}

/// Where an object's (x, y) sits on its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// (x, y) is the middle of the bottom edge.
    BottomCenter,
    /// (x, y) is the center of the box.
    Center,
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    pub fn from_anchor(x: f64, y: f64, width: f64, height: f64, anchor: Anchor) -> Self {
        let half_w = width / 2.0;
        let (top, bottom) = match anchor {
            Anchor::BottomCenter => (y - height, y),
            Anchor::Center => (y - height / 2.0, y + height / 2.0),
        };
        Self {
            left: x - half_w,
            top,
            right: x + half_w,
            bottom,
        }
    }

    /// Strict overlap: boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mole_slot_positions() {
        assert_eq!(MoleSlot::Top.y(), 450.0);
        assert_eq!(MoleSlot::Middle.y(), 500.0);
        assert_eq!(MoleSlot::Bottom.y(), 550.0);
    }

    #[test]
    fn test_mole_slot_steps_saturate() {
        assert_eq!(MoleSlot::Top.up(), MoleSlot::Top);
        assert_eq!(MoleSlot::Middle.up(), MoleSlot::Top);
        assert_eq!(MoleSlot::Bottom.up(), MoleSlot::Middle);
        assert_eq!(MoleSlot::Top.down(), MoleSlot::Middle);
        assert_eq!(MoleSlot::Middle.down(), MoleSlot::Bottom);
        assert_eq!(MoleSlot::Bottom.down(), MoleSlot::Bottom);
    }

    #[test]
    fn test_aabb_anchors() {
        let bottom = Aabb::from_anchor(100.0, 400.0, 40.0, 50.0, Anchor::BottomCenter);
        assert_eq!(bottom.left, 80.0);
        assert_eq!(bottom.right, 120.0);
        assert_eq!(bottom.top, 350.0);
        assert_eq!(bottom.bottom, 400.0);

        let center = Aabb::from_anchor(100.0, 400.0, 40.0, 50.0, Anchor::Center);
        assert_eq!(center.top, 375.0);
        assert_eq!(center.bottom, 425.0);
        assert_eq!(center.width(), 40.0);
        assert_eq!(center.height(), 50.0);
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::from_anchor(0.0, 0.0, 10.0, 10.0, Anchor::Center);
        let touching = Aabb::from_anchor(10.0, 0.0, 10.0, 10.0, Anchor::Center);
        let overlapping = Aabb::from_anchor(9.0, 0.0, 10.0, 10.0, Anchor::Center);
        let apart = Aabb::from_anchor(0.0, 30.0, 10.0, 10.0, Anchor::Center);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_lane_order() {
        assert_eq!(Lane::ALL[0], Lane::Ground);
        assert_eq!(Lane::ALL[1], Lane::Sky);
        assert_eq!(Lane::ALL[2], Lane::Underground);
        for (i, lane) in Lane::ALL.iter().enumerate() {
            assert_eq!(lane.index(), i);
        }
    }
}

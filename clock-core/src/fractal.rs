//! Recursive hand-tree geometry.
//!
//! [`generate`] computes the full fractal for one frame: every node
//! draws up to three hands from its center, and each hand tip becomes
//! the center of a child node rotated by the parent's angle and scaled
//! down by the length decay. Segments are collected into one layer per
//! depth so the renderer can stroke whole layers back-to-front.

use crate::angles::{Hand, HandAngles};
use crate::config::{FractalVariant, MAX_DEPTH_LIMIT};
use crate::types::Depth;
use glam::DVec2;

/// Length multiplier applied to all arms at each recursion level.
pub const LENGTH_DECAY: f64 = 0.7;

/// Arm length per hand, in face-width units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmLengths {
    pub second: f64,
    pub minute: f64,
    pub hour: f64,
}

impl ArmLengths {
    /// The conventional face proportions: long thin second and minute
    /// hands, a short hour hand.
    pub const CLASSIC: ArmLengths = ArmLengths {
        second: 0.4,
        minute: 0.4,
        hour: 0.175,
    };

    /// Returns the arm length for the given hand.
    #[inline]
    pub fn of(&self, hand: Hand) -> f64 {
        match hand {
            Hand::Second => self.second,
            Hand::Minute => self.minute,
            Hand::Hour => self.hour,
        }
    }

    /// All three arms scaled by `factor`.
    #[inline]
    pub fn scaled(&self, factor: f64) -> ArmLengths {
        ArmLengths {
            second: self.second * factor,
            minute: self.minute * factor,
            hour: self.hour * factor,
        }
    }
}

/// A single stroked hand: one line from a node center to a hand tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

/// All segments of one frame, grouped into one layer per depth.
///
/// Layer `0` holds the three primary hands from the clock center;
/// layer `d` holds the hands emanating from depth `d - 1` tips. With
/// branch factor `b`, layer `d` holds exactly `b^(d+1)` segments.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTree {
    layers: Vec<Vec<Segment>>,
}

impl SegmentTree {
    fn with_max_depth(max_depth: Depth, branch_factor: usize) -> Self {
        let layers = (0..=max_depth)
            .map(|d| Vec::with_capacity(branch_factor.pow(d as u32 + 1)))
            .collect();
        Self { layers }
    }

    /// Number of layers, `max_depth + 1`.
    pub fn depth_count(&self) -> usize {
        self.layers.len()
    }

    /// The segments recorded at one depth.
    pub fn layer(&self, depth: Depth) -> &[Segment] {
        &self.layers[depth]
    }

    /// Total segment count across all layers.
    pub fn total_segments(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }
}

/// One pending node of the traversal: a fractal branch point.
#[derive(Clone, Copy, Debug)]
struct Branch {
    center: DVec2,
    base_angle: f64,
    depth: Depth,
    arms: ArmLengths,
}

/// Generates the fractal segment tree for one frame.
///
/// The traversal uses an explicit work stack instead of call-stack
/// recursion, but visits nodes in exactly the depth-first pre-order of
/// the recursive formulation: at every node the second branch (if
/// included), then the minute branch, then the hour branch (if
/// included). Per-layer segment order is therefore stable and the
/// whole function is a pure function of its inputs.
///
/// `max_depth` is clamped to [`MAX_DEPTH_LIMIT`] as a last line of
/// defense; the configuration boundary is expected to have clamped it
/// already.
///
/// ### Parameters
/// - `angles` - Hand angles for this frame.
/// - `variant` - Which hands are drawn and recursed into.
/// - `max_depth` - Deepest layer to produce; layer count is `max_depth + 1`.
/// - `center` - Clock center in world units.
/// - `arms` - Root arm lengths; children decay by `decay` per level.
/// - `decay` - Per-level arm length multiplier (conventionally
///   [`LENGTH_DECAY`]).
///
/// ### Returns
/// The [`SegmentTree`] with `max_depth + 1` layers.
pub fn generate(
    angles: &HandAngles,
    variant: FractalVariant,
    max_depth: Depth,
    center: DVec2,
    arms: ArmLengths,
    decay: f64,
) -> SegmentTree {
    let max_depth = max_depth.min(MAX_DEPTH_LIMIT);
    let mut tree = SegmentTree::with_max_depth(max_depth, variant.branch_factor());

    let mut stack = vec![Branch {
        center,
        base_angle: 0.0,
        depth: 0,
        arms,
    }];

    while let Some(branch) = stack.pop() {
        let child_arms = branch.arms.scaled(decay);
        let mut children: [Option<Branch>; 3] = [None, None, None];

        for (slot, hand) in Hand::DRAW_ORDER.into_iter().enumerate() {
            if !variant.includes(hand) {
                continue;
            }

            let angle = angles.of(hand) + branch.base_angle;
            let tip = branch.center
                + DVec2::new(angle.sin(), angle.cos()) * branch.arms.of(hand);

            tree.layers[branch.depth].push(Segment {
                start: branch.center,
                end: tip,
            });

            if branch.depth < max_depth {
                children[slot] = Some(Branch {
                    center: tip,
                    base_angle: angle,
                    depth: branch.depth + 1,
                    arms: child_arms,
                });
            }
        }

        // Push in reverse so the second-hand child is popped first,
        // preserving the second, minute, hour traversal order.
        for child in children.into_iter().rev().flatten() {
            stack.push(child);
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angles::{ClockTime, compute_angles};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    /// Angles used by the hand-position scenarios: second at 12,
    /// minute at 3, hour at 6.
    fn cardinal_angles() -> HandAngles {
        HandAngles {
            second: 0.0,
            minute: PI / 2.0,
            hour: PI,
        }
    }

    #[test]
    fn depth_one_all_hands_matches_hand_positions() {
        let tree = generate(
            &cardinal_angles(),
            FractalVariant::All,
            1,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        assert_eq!(tree.depth_count(), 2);

        // Root layer: three hands from the origin, in second,
        // minute, hour order.
        let root = tree.layer(0);
        assert_eq!(root.len(), 3);
        assert!(close(root[0].start, DVec2::ZERO));
        assert!(close(root[0].end, DVec2::new(0.0, 0.4)));
        assert!(close(root[1].end, DVec2::new(0.4, 0.0)));
        assert!(close(root[2].end, DVec2::new(0.0, -0.175)));

        // Each root tip spawns three decayed sub-hands.
        let leaf = tree.layer(1);
        assert_eq!(leaf.len(), 9);

        // First leaf segment: the second-hand child of the second-hand
        // branch. Base angle 0 + second angle 0, arm 0.4 * 0.7.
        assert!(close(leaf[0].start, DVec2::new(0.0, 0.4)));
        assert!(close(leaf[0].end, DVec2::new(0.0, 0.4 + 0.4 * LENGTH_DECAY)));

        // Fourth leaf segment: the second-hand child of the minute
        // branch, rotated by the minute angle.
        let base = PI / 2.0;
        let expected = DVec2::new(0.4, 0.0)
            + DVec2::new(base.sin(), base.cos()) * (0.4 * LENGTH_DECAY);
        assert!(close(leaf[3].start, DVec2::new(0.4, 0.0)));
        assert!(close(leaf[3].end, expected));
    }

    #[test]
    fn layer_counts_follow_the_branch_factor() {
        let (angles, _) = compute_angles(ClockTime::new(10, 9, 8, 0.7), true);

        for (variant, b) in [
            (FractalVariant::All, 3usize),
            (FractalVariant::NoSecond, 2),
            (FractalVariant::NoHour, 2),
        ] {
            let tree = generate(
                &angles,
                variant,
                4,
                DVec2::ZERO,
                ArmLengths::CLASSIC,
                LENGTH_DECAY,
            );

            assert_eq!(tree.depth_count(), 5);
            for d in 0..=4usize {
                assert_eq!(
                    tree.layer(d).len(),
                    b.pow(d as u32 + 1),
                    "variant {variant:?}, depth {d}"
                );
            }
        }
    }

    #[test]
    fn no_second_variant_skips_the_second_hand_entirely() {
        // Second at 12, minute at 3, hour at 6: with the second hand
        // omitted, no root segment ends straight up.
        let tree = generate(
            &cardinal_angles(),
            FractalVariant::NoSecond,
            2,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        let root = tree.layer(0);
        assert_eq!(root.len(), 2);
        assert!(close(root[0].end, DVec2::new(0.4, 0.0)), "minute first");
        assert!(close(root[1].end, DVec2::new(0.0, -0.175)), "hour second");
    }

    #[test]
    fn every_child_starts_at_a_parent_tip() {
        let (angles, _) = compute_angles(ClockTime::new(7, 23, 45, 0.31), true);
        let tree = generate(
            &angles,
            FractalVariant::All,
            3,
            DVec2::new(1.5, -2.0),
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        for d in 1..tree.depth_count() {
            let parents = tree.layer(d - 1);
            for seg in tree.layer(d) {
                assert!(
                    parents.iter().any(|p| close(p.end, seg.start)),
                    "depth {d} segment detached from parent layer"
                );
            }
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let (angles, _) = compute_angles(ClockTime::new(23, 59, 59, 0.999), true);

        let first = generate(
            &angles,
            FractalVariant::All,
            5,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );
        let second = generate(
            &angles,
            FractalVariant::All,
            5,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        assert_eq!(first, second);
    }

    #[test]
    fn zero_depth_produces_only_the_primary_hands() {
        let (angles, _) = compute_angles(ClockTime::new(4, 20, 0, 0.0), true);

        let all = generate(
            &angles,
            FractalVariant::All,
            0,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );
        assert_eq!(all.depth_count(), 1);
        assert_eq!(all.layer(0).len(), 3);

        let no_hour = generate(
            &angles,
            FractalVariant::NoHour,
            0,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );
        assert_eq!(no_hour.layer(0).len(), 2);
    }

    #[test]
    fn absurd_depth_is_clamped_instead_of_exploding() {
        let (angles, _) = compute_angles(ClockTime::new(1, 2, 3, 0.4), true);

        let tree = generate(
            &angles,
            FractalVariant::NoHour,
            usize::MAX,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        assert_eq!(tree.depth_count(), MAX_DEPTH_LIMIT + 1);
    }

    #[test]
    fn offset_center_translates_the_whole_tree() {
        let (angles, _) = compute_angles(ClockTime::new(3, 33, 3, 0.125), true);
        let offset = DVec2::new(10.0, -4.5);

        let at_origin = generate(
            &angles,
            FractalVariant::All,
            2,
            DVec2::ZERO,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );
        let shifted = generate(
            &angles,
            FractalVariant::All,
            2,
            offset,
            ArmLengths::CLASSIC,
            LENGTH_DECAY,
        );

        for d in 0..at_origin.depth_count() {
            for (a, b) in at_origin.layer(d).iter().zip(shifted.layer(d)) {
                assert!(close(a.start + offset, b.start));
                assert!(close(a.end + offset, b.end));
            }
        }
    }
}

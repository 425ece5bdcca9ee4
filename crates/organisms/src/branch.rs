//! Bounded recursive branch growth for the branching-network morphology.
//!
//! Growth is expressed with an explicit stack, but segments come out in the
//! same pre-order a recursive formulation would produce: a segment, then
//! everything grown from its left child, then its right child, then its
//! optional straight child. Drawing order follows this list.

use glam::DVec2;

/// One straight piece of a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
    /// Nominal stroke width in design units (before outline inflation).
    pub width: f64,
    /// Remaining depth; trunks carry `max_depth`, leaves carry 1.
    pub depth: u32,
}

/// Growth parameters.
///
/// Every segment of length `L`, width `W`, remaining depth `d` forks into two
/// children at `angle ± spread` with `L · decay`, `W · width_decay`, and, when
/// `d > straight_threshold`, a third straight child with `L · straight_decay`,
/// `W · straight_width_decay`. Growth stops at depth 0 or below `min_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchParams {
    /// Trunk directions in degrees (y axis points down).
    pub trunk_angles: Vec<f64>,
    pub trunk_length: f64,
    pub trunk_width: f64,
    pub max_depth: u32,
    pub min_length: f64,
    /// Fork half-angle in radians.
    pub spread: f64,
    pub decay: f64,
    pub width_decay: f64,
    pub straight_decay: f64,
    pub straight_width_decay: f64,
    pub straight_threshold: u32,
}

impl Default for BranchParams {
    /// The mould network: four trunks, five levels deep.
    fn default() -> Self {
        Self {
            trunk_angles: vec![30.0, 120.0, 210.0, 310.0],
            trunk_length: 110.0,
            trunk_width: 16.0,
            max_depth: 5,
            min_length: 15.0,
            spread: 0.6,
            decay: 0.65,
            width_decay: 0.7,
            straight_decay: 0.5,
            straight_width_decay: 0.6,
            straight_threshold: 2,
        }
    }
}

impl BranchParams {
    /// Children per segment at the widest point of the tree (2 or 3).
    pub fn branch_factor(&self) -> usize {
        if self.max_depth > self.straight_threshold {
            3
        } else {
            2
        }
    }
}

/// A branch waiting to be emitted.
#[derive(Debug, Clone, Copy)]
struct Pending {
    origin: DVec2,
    angle: f64,
    length: f64,
    width: f64,
    depth: u32,
}

/// Grows every trunk from `origin` and returns the flattened segment list.
pub fn grow(origin: DVec2, params: &BranchParams) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();
    for &deg in &params.trunk_angles {
        stack.push(Pending {
            origin,
            angle: deg.to_radians(),
            length: params.trunk_length,
            width: params.trunk_width,
            depth: params.max_depth,
        });
        while let Some(b) = stack.pop() {
            if b.depth == 0 || b.length < params.min_length {
                continue;
            }
            let end = b.origin + DVec2::from_angle(b.angle) * b.length;
            segments.push(Segment {
                start: b.origin,
                end,
                width: b.width,
                depth: b.depth,
            });
            // Reverse order so the left child is popped first.
            if b.depth > params.straight_threshold {
                stack.push(Pending {
                    origin: end,
                    angle: b.angle,
                    length: b.length * params.straight_decay,
                    width: b.width * params.straight_width_decay,
                    depth: b.depth - 1,
                });
            }
            for side in [1.0, -1.0] {
                stack.push(Pending {
                    origin: end,
                    angle: b.angle + side * params.spread,
                    length: b.length * params.decay,
                    width: b.width * params.width_decay,
                    depth: b.depth - 1,
                });
            }
        }
    }
    segments
}

/// Upper bound on the number of segments `trunks` trees can produce:
/// `trunks · (b^D − 1) / (b − 1)`, or `trunks · D` when `b = 1`. Saturates
/// at `usize::MAX`.
pub fn max_segments(trunks: usize, branch_factor: usize, depth: u32) -> usize {
    match branch_factor {
        _ if depth == 0 => 0,
        0 => trunks,
        1 => trunks.saturating_mul(depth as usize),
        b => match b.checked_pow(depth) {
            Some(pow) => trunks.saturating_mul((pow - 1) / (b - 1)),
            None => usize::MAX,
        },
    }
}

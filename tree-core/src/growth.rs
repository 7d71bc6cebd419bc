//! Growth rounds of the branching process.
//!
//! A round takes the current frontier and returns a fresh vector of
//! children. For each parent, in frontier order:
//! 1. [`branch_maybe`] draws once to decide whether the parent forks, with
//!    a probability ramped between the trunk and twig branchability.
//! 2. It then builds one or two children, each drawing once for its own
//!    heading jitter. Children attach at the parent's end, inherit its
//!    color, and take their length and width from the depth ramps.
//!
//! Depth is the round index shared by the whole frontier, normalized by
//! the total number of iterations.

use crate::{config::TreeConfig, interp::lerp, segment::Segment};
use glam::DVec2;
use rand::Rng;

/// Normalized depth `iteration / iterations` of a round.
///
/// Returns `0.0` when `iterations` is zero, where no round ever runs.
#[inline]
pub fn normalized_depth(iteration: u32, iterations: u32) -> f64 {
    if iterations == 0 {
        0.0
    } else {
        iteration as f64 / iterations as f64
    }
}

/// Builds the trunk segment for `cfg`.
///
/// The trunk starts at `cfg.position` and extends `cfg.trunk_length`
/// towards negative y.
pub fn trunk<C: Clone>(cfg: &TreeConfig<C>) -> Segment<C> {
    let start = cfg.position;
    let end = start + DVec2::new(0.0, -cfg.trunk_length);
    Segment::new(start, end, cfg.trunk_width, cfg.color.clone())
}

/// Grows the children of a single frontier segment.
///
/// Draws one `f64` from `rng` for the fork decision and then one more per
/// child for its heading jitter, in that order.
///
/// ### Parameters
/// - `parent` - Frontier segment the children attach to.
/// - `cfg` - Parameter set providing the ramps and jitter ranges.
/// - `iteration` - Index of the current round.
/// - `rng` - Random source shared by the whole generation run.
///
/// ### Returns
/// One child, or two if the parent forked.
pub fn branch_maybe<C: Clone>(
    parent: &Segment<C>,
    cfg: &TreeConfig<C>,
    iteration: u32,
    rng: &mut impl Rng,
) -> Vec<Segment<C>> {
    let t = normalized_depth(iteration, cfg.iterations);

    let forked = rng.random::<f64>() < lerp(cfg.trunk_branchability, cfg.twig_branchability, t);
    let (count, angle_range) = if forked {
        (2, cfg.branched.max_angle_delta)
    } else {
        (1, cfg.max_angle_delta)
    };

    let length = lerp(cfg.trunk_length, cfg.twig_length, t);
    let width = lerp(cfg.trunk_width, cfg.twig_width, t);
    let start = parent.end();

    (0..count)
        .map(|_| {
            let angle = parent.heading() + rng.random::<f64>() * angle_range - angle_range / 2.0;
            let end = start + DVec2::from_angle(angle) * length;
            Segment::new(start, end, width, parent.color().clone())
        })
        .collect()
}

/// Runs one growth round over `frontier`.
///
/// ### Returns
/// All children of the round, grouped by parent in frontier order. The
/// result is the next frontier.
pub fn grow_round<C: Clone>(
    frontier: &[Segment<C>],
    cfg: &TreeConfig<C>,
    iteration: u32,
    rng: &mut impl Rng,
) -> Vec<Segment<C>> {
    let mut next = Vec::with_capacity(frontier.len() * 2);
    for parent in frontier {
        next.extend(branch_maybe(parent, cfg, iteration, rng));
    }

    tracing::trace!(
        iteration,
        frontier = frontier.len(),
        forks = next.len() - frontier.len(),
        "growth round"
    );

    next
}

use crate::{
    config::TreeConfig,
    growth::{grow_round, trunk},
    render::Painter,
    segment::Segment,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A fully generated tree.
///
/// Holds the parameter set it was grown from and every segment in render
/// order: the trunk first, then each round's children in frontier order.
/// The tree is immutable after construction; rendering it any number of
/// times issues the same draw calls.
#[derive(Clone, Debug)]
pub struct Tree<C> {
    config: TreeConfig<C>,
    segments: Vec<Segment<C>>,
}

impl<C: Clone> Tree<C> {
    /// Grows a tree from `config`, drawing all randomness from `rng`.
    ///
    /// The trunk seeds the frontier, then `config.iterations` rounds of
    /// [`grow_round`] each replace the frontier with its children. The
    /// last frontier is dropped once its segments are in the output.
    ///
    /// ### Parameters
    /// - `config` - Parameter set for this run; kept by the tree.
    /// - `rng` - Random source, consumed in frontier order.
    ///
    /// ### Returns
    /// The generated [`Tree`].
    pub fn new(config: TreeConfig<C>, rng: &mut impl Rng) -> Self {
        let root = trunk(&config);
        let mut segments = vec![root.clone()];

        let mut frontier = vec![root];
        for iteration in 0..config.iterations {
            let next = grow_round(&frontier, &config, iteration, rng);
            segments.extend(next.iter().cloned());
            frontier = next;
        }

        tracing::debug!(
            iterations = config.iterations,
            segments = segments.len(),
            "tree generated"
        );

        Self { config, segments }
    }

    /// Grows a tree from `config` using a [`StdRng`] seeded with `seed`.
    ///
    /// The same seed and config always produce the same tree.
    pub fn from_seed(config: TreeConfig<C>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }
}

impl<C> Tree<C> {
    pub fn config(&self) -> &TreeConfig<C> {
        &self.config
    }

    /// All segments in render order.
    pub fn segments(&self) -> &[Segment<C>] {
        &self.segments
    }

    /// The first segment, grown straight up from the configured position.
    pub fn trunk(&self) -> &Segment<C> {
        &self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`: a tree has at least its trunk.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Draws the tree onto `painter`.
    ///
    /// Switches the painter to round caps once, then draws every segment in
    /// order. The tree itself is untouched, so repeated calls are identical.
    pub fn render<P: Painter<C> + ?Sized>(&self, painter: &mut P) {
        painter.set_round_caps();
        for segment in &self.segments {
            segment.draw(painter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        growth::branch_maybe,
        render::{DrawCall, RecordingPainter},
    };
    use approx::assert_relative_eq;
    use glam::DVec2;
    use std::f64::consts::{PI, TAU};

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Rgb(u8, u8, u8);

    const BARK: Rgb = Rgb(0x74, 0x72, 0x6e);

    fn cfg(iterations: u32, branchability: f64) -> TreeConfig<Rgb> {
        let mut cfg = TreeConfig::with_color(BARK);
        cfg.iterations = iterations;
        cfg.trunk_branchability = branchability;
        cfg.twig_branchability = branchability;
        cfg
    }

    /// Smallest absolute angle between two headings.
    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    /// Parent index of segment `k` in a tree where every segment forked.
    ///
    /// Each round doubles the frontier, so the layout matches a binary heap.
    fn forked_parent(k: usize) -> usize {
        (k - 1) / 2
    }

    #[test]
    fn zero_iterations_is_trunk_only() {
        let tree = Tree::from_seed(cfg(0, 0.5), 42);

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        let trunk = tree.trunk();
        assert_eq!(trunk.start(), DVec2::new(500.0, 1000.0));
        assert_eq!(trunk.end(), DVec2::new(500.0, 880.0));
        assert_eq!(trunk.width(), 40.0);
        assert_eq!(*trunk.color(), BARK);
    }

    #[test]
    fn no_branchability_yields_connected_polyline() {
        for n in [0, 1, 5, 30] {
            for seed in 0..4 {
                let tree = Tree::from_seed(cfg(n, 0.0), seed);
                let segs = tree.segments();

                assert_eq!(segs.len(), n as usize + 1);
                for pair in segs.windows(2) {
                    assert_eq!(pair[1].start(), pair[0].end());
                }
            }
        }
    }

    #[test]
    fn full_branchability_doubles_every_round() {
        for n in 1..=8u32 {
            let tree = Tree::from_seed(cfg(n, 1.0), u64::from(n));
            assert_eq!(tree.len(), (1usize << (n + 1)) - 1);
        }
    }

    #[test]
    fn full_branchability_round_sizes() {
        let n = 5;
        let tree = Tree::from_seed(cfg(n, 1.0), 9);

        // Round i spans [2^(i+1) - 1, 2^(i+2) - 1) and its length follows the ramp.
        let c = tree.config();
        for i in 0..n {
            let lo = (1usize << (i + 1)) - 1;
            let hi = (1usize << (i + 2)) - 1;
            let t = i as f64 / n as f64;
            let expected_len = c.trunk_length + t * (c.twig_length - c.trunk_length);
            let expected_width = c.trunk_width + t * (c.twig_width - c.trunk_width);
            for seg in &tree.segments()[lo..hi] {
                assert_relative_eq!(seg.length(), expected_len, max_relative = 1e-3);
                assert_relative_eq!(seg.width(), expected_width);
            }
        }
    }

    #[test]
    fn every_child_attaches_to_its_own_parent() {
        let mut forked = 0;
        let mut single = 0;

        for seed in 0..8 {
            let config = cfg(8, 0.5);
            let tree = Tree::from_seed(config.clone(), seed);
            let segs = tree.segments();

            // Regrow from the same stream, keeping track of each child's parent.
            let mut rng = StdRng::seed_from_u64(seed);
            let mut frontier = vec![trunk(&config)];
            let mut cursor = 1;
            for iteration in 0..config.iterations {
                let mut next = Vec::new();
                for parent in &frontier {
                    let children = branch_maybe(parent, &config, iteration, &mut rng);
                    if children.len() == 2 {
                        forked += 1;
                    } else {
                        single += 1;
                    }
                    for child in children {
                        assert_eq!(segs[cursor], child);
                        assert_eq!(segs[cursor].start(), parent.end());
                        cursor += 1;
                        next.push(child);
                    }
                }
                frontier = next;
            }
            assert_eq!(cursor, segs.len());
        }

        assert!(forked > 0 && single > 0, "expected trees mixing forks and continuations");
    }

    #[test]
    fn small_lengths_keep_ramp_precision_far_from_origin() {
        let mut c = cfg(10, 0.0);
        c.trunk_length = 0.01;
        c.twig_length = 0.001;

        let tree = Tree::from_seed(c.clone(), 21);
        assert_eq!(tree.trunk().start(), DVec2::new(500.0, 1000.0));

        for (i, seg) in tree.segments()[1..].iter().enumerate() {
            let t = i as f64 / c.iterations as f64;
            let expected = c.trunk_length + t * (c.twig_length - c.trunk_length);
            assert_relative_eq!(seg.length(), expected, max_relative = 1e-8);
        }
    }

    #[test]
    fn unforked_children_stay_within_jitter() {
        let mut c = cfg(12, 0.0);
        c.max_angle_delta = PI / 3.0;

        for seed in 0..20 {
            let tree = Tree::from_seed(c.clone(), seed);
            for pair in tree.segments().windows(2) {
                let d = angle_diff(pair[1].heading(), pair[0].heading());
                assert!(d <= c.max_angle_delta / 2.0 + 1e-4, "jitter {d} too large");
            }
        }
    }

    #[test]
    fn forked_children_stay_within_branched_jitter() {
        let mut c = cfg(6, 1.0);
        c.max_angle_delta = 0.0;
        c.branched.max_angle_delta = PI / 2.0;

        for seed in 0..10 {
            let tree = Tree::from_seed(c.clone(), seed);
            let segs = tree.segments();

            for child in 1..segs.len() {
                let parent = forked_parent(child);
                assert_eq!(segs[child].start(), segs[parent].end());
                let d = angle_diff(segs[child].heading(), segs[parent].heading());
                assert!(d <= c.branched.max_angle_delta / 2.0 + 1e-4, "jitter {d} too large");
            }
        }
    }

    #[test]
    fn color_is_propagated_everywhere() {
        let tree = Tree::from_seed(cfg(10, 0.4), 3);
        assert!(tree.segments().iter().all(|s| *s.color() == BARK));
    }

    #[test]
    fn same_seed_same_tree() {
        let a = Tree::from_seed(cfg(10, 0.4), 1234);
        let b = Tree::from_seed(cfg(10, 0.4), 1234);

        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn explicit_rng_matches_from_seed() {
        let mut rng = StdRng::seed_from_u64(77);
        let a = Tree::new(cfg(7, 0.3), &mut rng);
        let b = Tree::from_seed(cfg(7, 0.3), 77);

        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn render_sets_round_caps_then_draws_in_order() {
        let tree = Tree::from_seed(cfg(4, 0.5), 5);
        let mut painter = RecordingPainter::new();

        tree.render(&mut painter);

        assert_eq!(painter.calls.len(), tree.len() + 1);
        assert_eq!(painter.calls[0], DrawCall::RoundCaps);
        for (call, seg) in painter.calls[1..].iter().zip(tree.segments()) {
            assert_eq!(
                *call,
                DrawCall::Line {
                    start: seg.start(),
                    end: seg.end(),
                    width: seg.width(),
                    color: *seg.color(),
                }
            );
        }
    }

    #[test]
    fn render_is_idempotent() {
        let tree = Tree::from_seed(cfg(9, 0.4), 8);
        let mut first = RecordingPainter::new();
        let mut second = RecordingPainter::new();

        tree.render(&mut first);
        tree.render(&mut second);

        assert_eq!(first.calls, second.calls);
        assert_eq!(first.line_count(), tree.len());
    }
}

//! The tree node and its concurrent contract.
//!
//! Every node is shared by all worker threads. Visit and evaluation
//! statistics are atomic accumulators; the children list is written
//! exactly once, by whichever worker wins the expansion interlock, and
//! published through the release/acquire pair on `expand_state`.
//! Evaluations are stored from Black's perspective throughout; the
//! accessors mirror on demand.

use std::cell::UnsafeCell;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{
    AtomicBool, AtomicI32, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

use rand::Rng;
use rand_distr::{Beta, Distribution};

use gz_core::{Color, SearchConfig, Vertex, PASS};

use crate::atomic::{AtomicF32, AtomicF64};
use crate::evaluator::{Ensemble, EvalError, Evaluator};
use crate::position::Position;
use crate::slot::ChildSlot;
use crate::stats;

/// Virtual losses added to a node for every worker that has selected it
/// and not yet backed its playout out, steering other workers toward
/// different branches.
pub const VIRTUAL_LOSS_COUNT: i32 = 3;

/// Node liveness. A node is invalidated only by the external superko
/// check, which runs before workers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeStatus {
    Invalid = 0,
    Pruned = 1,
    Active = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ExpandState {
    Initial = 0,
    Expanding = 1,
    Expanded = 2,
}

/// Evaluation reported out of a successful expansion, already
/// normalized to Black's perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafEval {
    pub eval: f32,
    pub variance: f32,
}

/// A position in the search tree, reached from the root by a unique
/// move sequence.
pub struct Node {
    vertex: Vertex,
    policy: f32,
    net_eval: AtomicF32,
    net_variance: AtomicF32,
    visits: AtomicU32,
    virtual_loss: AtomicI32,
    black_evals: AtomicF64,
    squared_eval_diff: AtomicF64,
    status: AtomicU8,
    expand_state: AtomicU8,
    // Prior-ratio threshold the children were last built with. The
    // sentinel 2.0 means "never expanded"; 0.0 means fully expanded.
    min_psa_ratio_children: AtomicF32,
    // Posterior override sampled by selection: (mean, variance) packed
    // into one word, with a separate presence flag since (0.0, 0.0) is
    // a representable distribution.
    distribution: AtomicU64,
    distribution_set: AtomicBool,
    // Telemetry only; stores race and stale values are acceptable.
    policy_explored: AtomicF32,
    children: UnsafeCell<Vec<ChildSlot>>,
}

// Safety: the children vector is the only non-atomic shared field. It is
// mutated solely by the thread holding the `Expanding` interlock (or
// through `&mut self`), and readers first observe `Expanded` with
// acquire ordering, so reads never race with the writes they see.
unsafe impl Sync for Node {}

impl Node {
    pub fn new(vertex: Vertex, policy: f32) -> Self {
        Node {
            vertex,
            policy,
            net_eval: AtomicF32::new(0.0),
            net_variance: AtomicF32::new(0.0),
            visits: AtomicU32::new(0),
            virtual_loss: AtomicI32::new(0),
            black_evals: AtomicF64::new(0.0),
            squared_eval_diff: AtomicF64::new(0.0),
            status: AtomicU8::new(NodeStatus::Active as u8),
            expand_state: AtomicU8::new(ExpandState::Initial as u8),
            min_psa_ratio_children: AtomicF32::new(2.0),
            distribution: AtomicU64::new(0),
            distribution_set: AtomicBool::new(false),
            policy_explored: AtomicF32::new(0.0),
            children: UnsafeCell::new(Vec::new()),
        }
    }

    /// The move that leads to this node, or `PASS`.
    #[inline]
    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    #[inline]
    pub fn get_policy(&self) -> f32 {
        self.policy
    }

    #[inline]
    pub fn get_visits(&self) -> u32 {
        self.visits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn first_visit(&self) -> bool {
        self.get_visits() == 0
    }

    // ---- expansion handshake -------------------------------------------

    fn load_expand_state(&self, order: Ordering) -> ExpandState {
        match self.expand_state.load(order) {
            0 => ExpandState::Initial,
            1 => ExpandState::Expanding,
            _ => ExpandState::Expanded,
        }
    }

    /// CAS `Initial -> Expanding`. Success grants exclusive rights to
    /// build the children list.
    pub(crate) fn acquire_expanding(&self) -> bool {
        self.expand_state
            .compare_exchange(
                ExpandState::Initial as u8,
                ExpandState::Expanding as u8,
                Ordering::Acquire,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// `Expanding -> Expanded`, releasing the children writes.
    pub(crate) fn expand_done(&self) {
        let previous = self
            .expand_state
            .swap(ExpandState::Expanded as u8, Ordering::Release);
        debug_assert_eq!(previous, ExpandState::Expanding as u8);
    }

    /// `Expanding -> Initial`; abandons expansion (terminal position or
    /// evaluator failure) and lets another worker retry.
    pub(crate) fn expand_cancel(&self) {
        let previous = self
            .expand_state
            .swap(ExpandState::Initial as u8, Ordering::Release);
        debug_assert_eq!(previous, ExpandState::Expanding as u8);
    }

    /// Spin until the node is `Expanded`. Bounded by the evaluator
    /// latency of whichever worker holds the interlock.
    pub fn wait_expanded(&self) {
        while self.load_expand_state(Ordering::Acquire) == ExpandState::Expanding {
            std::hint::spin_loop();
        }
        debug_assert_eq!(
            self.load_expand_state(Ordering::Acquire),
            ExpandState::Expanded
        );
    }

    pub(crate) fn is_expanding(&self) -> bool {
        self.load_expand_state(Ordering::Relaxed) == ExpandState::Expanding
    }

    /// Whether a `create_children` call with this threshold could add
    /// children.
    pub fn expandable(&self, min_psa_ratio: f32) -> bool {
        let current = self.min_psa_ratio_children.load(Ordering::Relaxed);
        if current == 0.0 {
            // Fully expanded nodes can never have gone back to Initial.
            debug_assert_ne!(
                self.load_expand_state(Ordering::Relaxed),
                ExpandState::Initial
            );
        }
        min_psa_ratio < current
    }

    /// Whether any children have been linked.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.min_psa_ratio_children.load(Ordering::Relaxed) <= 1.0
    }

    // ---- children access -----------------------------------------------

    /// The children list.
    ///
    /// Callers must have observed `Expanded` (selection does so through
    /// `wait_expanded`) or otherwise know no expansion is in flight;
    /// the handshake is what makes this read race-free.
    pub fn get_children(&self) -> &[ChildSlot] {
        debug_assert_ne!(
            self.load_expand_state(Ordering::Relaxed),
            ExpandState::Expanding
        );
        unsafe { &*self.children.get() }
    }

    fn children_mut(&mut self) -> &mut Vec<ChildSlot> {
        self.children.get_mut()
    }

    // ---- status --------------------------------------------------------

    fn load_status(&self) -> NodeStatus {
        match self.status.load(Ordering::Relaxed) {
            0 => NodeStatus::Invalid,
            1 => NodeStatus::Pruned,
            _ => NodeStatus::Active,
        }
    }

    /// Mark the node illegal (superko); irreversible.
    pub fn invalidate(&self) {
        self.status.store(NodeStatus::Invalid as u8, Ordering::Relaxed);
    }

    /// Toggle between `Active` and `Pruned`; invalid nodes stay invalid.
    pub fn set_active(&self, active: bool) {
        if self.valid() {
            let next = if active {
                NodeStatus::Active
            } else {
                NodeStatus::Pruned
            };
            self.status.store(next as u8, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn valid(&self) -> bool {
        self.load_status() != NodeStatus::Invalid
    }

    #[inline]
    pub fn active(&self) -> bool {
        self.load_status() == NodeStatus::Active
    }

    // ---- expansion -----------------------------------------------------

    /// Expand this node: evaluate the position, enumerate legal moves,
    /// prune by prior ratio, and publish the children list.
    ///
    /// Returns `Ok(None)` when nothing was expanded: the position is
    /// terminal, another worker holds the interlock, or children at
    /// this threshold already exist. An evaluator error returns the
    /// node to `Initial` before propagating.
    pub fn create_children<P, E>(
        &self,
        nodecount: &AtomicUsize,
        position: &P,
        evaluator: &E,
        min_psa_ratio: f32,
        cfg: &SearchConfig,
    ) -> Result<Option<LeafEval>, EvalError>
    where
        P: Position,
        E: Evaluator<P>,
    {
        // No successors in a final state.
        if position.passes() >= 2 {
            return Ok(None);
        }

        if !self.acquire_expanding() {
            return Ok(None);
        }

        // Another expansion may have covered this threshold already.
        if !self.expandable(min_psa_ratio) {
            self.expand_done();
            return Ok(None);
        }

        let raw = evaluator
            .get_output(position, Ensemble::Average)
            .map_err(|err| {
                self.expand_cancel();
                err
            })?;

        // The net returns winrate from the side to move; the tree keys
        // everything on Black.
        let to_move = position.side_to_move();
        let stm_eval = raw.winrate;
        let net_eval = match to_move {
            Color::Black => stm_eval,
            Color::White => 1.0 - stm_eval,
        };
        self.net_eval.store(net_eval, Ordering::Relaxed);
        self.net_variance.store(raw.variance, Ordering::Relaxed);

        let board_size = position.board_size();
        let intersections = board_size * board_size;
        debug_assert_eq!(raw.policy.len(), intersections);

        let mut nodelist: Vec<(f32, Vertex)> = Vec::new();
        let mut legal_sum = 0.0f32;
        for i in 0..intersections {
            let x = i % board_size;
            let y = i / board_size;
            let vertex = position.vertex(x, y);
            if position.is_move_legal(to_move, vertex) {
                nodelist.push((raw.policy[i], vertex));
                legal_sum += raw.policy[i];
            }
        }

        // Always try passes if we're not trying to be clever.
        let mut allow_pass = cfg.dumb_pass;

        // Few enough intersections left that pass must stay in the mix.
        if nodelist.len() <= board_size.max(5) {
            allow_pass = true;
        }

        // If we're clever, only try passing if we're winning on the net
        // score and on the board count.
        if !allow_pass && stm_eval > 0.8 {
            let relative_score = match to_move {
                Color::Black => position.final_score(),
                Color::White => -position.final_score(),
            };
            if relative_score >= 0 {
                allow_pass = true;
            }
        }

        if allow_pass {
            nodelist.push((raw.policy_pass, PASS));
            legal_sum += raw.policy_pass;
        }

        if legal_sum > f32::MIN_POSITIVE {
            // Re-normalize after removing illegal moves.
            for entry in &mut nodelist {
                entry.0 /= legal_sum;
            }
        } else {
            // Can happen with fresh randomized nets.
            let uniform = 1.0 / nodelist.len() as f32;
            for entry in &mut nodelist {
                entry.0 = uniform;
            }
        }

        self.link_nodelist(nodecount, nodelist, min_psa_ratio);
        self.expand_done();

        Ok(Some(LeafEval {
            eval: net_eval,
            variance: raw.variance,
        }))
    }

    /// Install children below the current prior-ratio cutoff.
    ///
    /// Children already present (priors at or above the old cutoff) are
    /// left alone, so a later call with a looser ratio only appends.
    fn link_nodelist(
        &self,
        nodecount: &AtomicUsize,
        mut nodelist: Vec<(f32, Vertex)>,
        min_psa_ratio: f32,
    ) {
        debug_assert!(min_psa_ratio < self.min_psa_ratio_children.load(Ordering::Relaxed));

        if nodelist.is_empty() {
            return;
        }

        // Best to worst, so the highest priors land first.
        nodelist.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(CmpOrdering::Equal));

        let max_psa = nodelist[0].0;
        let old_min_psa = max_psa * self.min_psa_ratio_children.load(Ordering::Relaxed);
        let new_min_psa = max_psa * min_psa_ratio;

        // Safety: we hold the expansion interlock (or exclusive access
        // during the top-level reset), so no reader can observe these
        // writes before `expand_done` releases them.
        let children = unsafe { &mut *self.children.get() };
        if new_min_psa > 0.0 {
            children.reserve(nodelist.iter().filter(|n| n.0 >= new_min_psa).count());
        } else {
            children.reserve(nodelist.len());
        }

        let mut skipped_children = false;
        for &(policy, vertex) in &nodelist {
            if policy < new_min_psa {
                skipped_children = true;
            } else if policy < old_min_psa {
                children.push(ChildSlot::new(vertex, policy));
                nodecount.fetch_add(1, Ordering::Relaxed);
            }
        }

        let next_ratio = if skipped_children { min_psa_ratio } else { 0.0 };
        self.min_psa_ratio_children.store(next_ratio, Ordering::Relaxed);
    }

    // ---- back-propagation ----------------------------------------------

    /// Record one playout outcome, `eval` in Black's perspective.
    ///
    /// Welford's online recurrence keeps a running M2; with relaxed
    /// atomics racing updates make the variance estimate approximate
    /// but still convergent.
    pub fn update(&self, eval: f32) {
        let old_sum = self.black_evals.load(Ordering::Relaxed);
        let old_visits = self.visits.load(Ordering::Relaxed);
        let old_delta = if old_visits > 0 {
            f64::from(eval) - old_sum / f64::from(old_visits)
        } else {
            0.0
        };

        self.visits.fetch_add(1, Ordering::Relaxed);
        self.accumulate_eval(eval);

        let new_delta =
            f64::from(eval) - (old_sum + f64::from(eval)) / f64::from(old_visits + 1);
        self.squared_eval_diff
            .fetch_add(old_delta * new_delta, Ordering::Relaxed);

        // Feed the Thompson posterior from the aggregate so it narrows
        // as evidence accumulates.
        let visits = self.visits.load(Ordering::Relaxed);
        if visits >= 2 {
            let mean = self.black_evals.load(Ordering::Relaxed) / f64::from(visits);
            let sample_var =
                self.squared_eval_diff.load(Ordering::Relaxed) / f64::from(visits - 1);
            self.set_distribution(mean as f32, (sample_var / f64::from(visits)) as f32);
        }
    }

    fn accumulate_eval(&self, eval: f32) {
        self.black_evals.fetch_add(f64::from(eval), Ordering::Relaxed);
    }

    /// Apply the pending-visitor penalty on the way down.
    pub fn virtual_loss(&self) {
        self.virtual_loss.fetch_add(VIRTUAL_LOSS_COUNT, Ordering::Relaxed);
    }

    /// Reverse it on the way back up.
    pub fn virtual_loss_undo(&self) {
        self.virtual_loss.fetch_sub(VIRTUAL_LOSS_COUNT, Ordering::Relaxed);
    }

    // ---- evaluation accessors ------------------------------------------

    /// Sample variance of the back-propagated evaluations, or `default`
    /// below two visits.
    pub fn get_eval_variance(&self, default: f32) -> f32 {
        let visits = self.get_visits();
        if visits > 1 {
            (self.squared_eval_diff.load(Ordering::Relaxed) / f64::from(visits - 1)) as f32
        } else {
            default
        }
    }

    /// Mean evaluation for `color`, counting `virtual_loss` pending
    /// visitors as losses for the side asking.
    pub fn get_raw_eval(&self, color: Color, virtual_loss: i32) -> f32 {
        let visits = i64::from(self.get_visits()) + i64::from(virtual_loss);
        debug_assert!(visits > 0);
        let mut black_evals = self.black_evals.load(Ordering::Relaxed);
        if color == Color::White {
            // Black wins equal White losses.
            black_evals += f64::from(virtual_loss);
        }
        let eval = (black_evals / visits as f64) as f32;
        if color == Color::White {
            1.0 - eval
        } else {
            eval
        }
    }

    /// Mean evaluation for `color` with the current virtual losses
    /// applied.
    pub fn get_eval(&self, color: Color) -> f32 {
        self.get_raw_eval(color, self.virtual_loss.load(Ordering::Relaxed))
    }

    /// The evaluator's value for this position from `color`'s view.
    pub fn get_net_eval(&self, color: Color) -> f32 {
        let eval = self.net_eval.load(Ordering::Relaxed);
        match color {
            Color::Black => eval,
            Color::White => 1.0 - eval,
        }
    }

    pub fn get_net_variance(&self) -> f32 {
        self.net_variance.load(Ordering::Relaxed)
    }

    /// Lower confidence bound of the winrate. Nodes below two visits
    /// rank far last, deeper-tied by visit count.
    pub fn get_eval_lcb(&self, color: Color) -> f32 {
        let visits = self.get_visits();
        if visits < 2 {
            return -1e6 + visits as f32;
        }
        let mean = self.get_raw_eval(color, 0);
        let stddev = (self.get_eval_variance(1.0) / visits as f32).sqrt();
        let z = stats::t_quantile(visits - 1);
        mean - z * stddev
    }

    // ---- posterior distribution ----------------------------------------

    /// Publish a (mean, variance) posterior override, Black POV.
    pub fn set_distribution(&self, mean: f32, variance: f32) {
        self.distribution
            .store(pack_floats(mean, variance), Ordering::Relaxed);
        self.distribution_set.store(true, Ordering::Relaxed);
    }

    pub fn has_distribution(&self) -> bool {
        self.distribution_set.load(Ordering::Relaxed)
    }

    /// The posterior sampled by selection: the override when present,
    /// the raw net output otherwise. White sees the mirrored mean.
    pub fn get_distribution(&self, color: Color) -> (f32, f32) {
        let (mean, variance) = if self.has_distribution() {
            unpack_floats(self.distribution.load(Ordering::Relaxed))
        } else {
            (
                self.net_eval.load(Ordering::Relaxed),
                self.net_variance.load(Ordering::Relaxed),
            )
        };
        match color {
            Color::Black => (mean, variance),
            Color::White => (1.0 - mean, variance),
        }
    }

    /// Beta parameters moment-matched to the selection posterior.
    pub fn get_beta_param(&self, color: Color) -> (f32, f32) {
        let (mean, variance) = self.get_distribution(color);
        beta_param(mean, variance)
    }

    /// Beta parameters moment-matched to the raw net output.
    pub fn get_net_beta_param(&self, color: Color) -> (f32, f32) {
        beta_param(self.get_net_eval(color), self.get_net_variance())
    }

    /// Last `policy_explored` recorded by selection. Telemetry; may lag
    /// the stores of other workers.
    pub fn get_policy_explored(&self) -> f32 {
        self.policy_explored.load(Ordering::Relaxed)
    }

    // ---- selection -----------------------------------------------------

    /// Pick the child to descend into.
    ///
    /// Unexplored children are tried with probability equal to their
    /// remaining policy mass; otherwise every visited child draws one
    /// Thompson sample from its Beta posterior and the argmax wins.
    /// Children mid-expansion are avoided unless nothing else exists.
    /// The winner is inflated before being returned.
    pub fn uct_select_child<R: Rng>(&self, color: Color, rng: &mut R) -> Option<&Node> {
        self.wait_expanded();
        let children = self.get_children();

        let mut policy_explored = 0.0f32;
        let mut num_unexplored = 0usize;
        let mut best: Option<&ChildSlot> = None;

        for child in children {
            if !child.valid() {
                continue;
            }
            if child.get_visits() > 0 {
                policy_explored += child.get_policy();
            } else {
                num_unexplored += 1;
                if best.is_some() || child.is_expanding() {
                    continue;
                }
                // Children are linked best-first, so the first valid
                // unexplored slot is the highest-prior candidate.
                best = Some(child);
            }
        }

        // Guard against explored mass not summing to one exactly.
        if num_unexplored == 0 {
            policy_explored = 1.0;
        }

        if best.is_none() || rng.gen::<f64>() < f64::from(policy_explored) {
            let mut best_value = f64::MIN;
            for child in children {
                if !child.active() || child.get_visits() == 0 {
                    continue;
                }

                if child.is_expanding() {
                    // Never pick a node someone is expanding if it can
                    // be helped; we would spin on it.
                    if -1.0 > best_value {
                        best_value = -1.0;
                        best = Some(child);
                    }
                    continue;
                }

                let (success, failure) = child.get_beta_param(color);
                let value = match Beta::new(success, failure) {
                    Ok(dist) => f64::from(dist.sample(rng)),
                    // Saturated posterior that moment matching cannot
                    // express; score it by its mean.
                    Err(_) => f64::from(child.get_distribution(color).0),
                };
                if value > best_value {
                    best_value = value;
                    best = Some(child);
                }
            }
        } else if let Some(chosen) = best {
            // A brand new child is being visited; count its policy as
            // explored from here on.
            policy_explored += chosen.get_policy();
        }

        self.policy_explored.store(policy_explored, Ordering::Relaxed);

        let chosen = best?;
        chosen.inflate();
        chosen.node()
    }

    // ---- final move selection ------------------------------------------

    /// Best root child under the final-move comparator, with the LCB
    /// visit floor derived from the most-visited child.
    pub fn get_best_root_child(&self, color: Color, cfg: &SearchConfig) -> Option<&Node> {
        self.wait_expanded();
        let children = self.get_children();
        debug_assert!(!children.is_empty());

        let max_visits = children.iter().map(ChildSlot::get_visits).max().unwrap_or(0);
        let lcb_min_visits = cfg.lcb_min_visit_ratio * max_visits as f32;

        let best = children
            .iter()
            .max_by(|a, b| node_cmp(a, b, color, lcb_min_visits))?;
        best.inflate();
        best.node()
    }

    /// Driver-side: order children best first. Requires quiesced
    /// workers, which `&mut` enforces.
    pub fn sort_children(&mut self, color: Color, lcb_min_visits: f32) {
        self.children_mut()
            .sort_by(|a, b| node_cmp(b, a, color, lcb_min_visits));
    }

    /// First (highest-prior) child, inflated.
    pub fn get_first_child(&self) -> Option<&Node> {
        let child = self.get_children().first()?;
        child.inflate();
        child.node()
    }

    // ---- lifecycle (driver-side, workers quiesced) ---------------------

    /// Detach the subtree reached by `vertex`, for reuse as the next
    /// root after the move is played.
    pub fn find_child(&mut self, vertex: Vertex) -> Option<Box<Node>> {
        let slot = self
            .children_mut()
            .iter_mut()
            .find(|slot| slot.vertex() == vertex)?;
        slot.inflate();
        slot.take_node()
    }

    /// Inflate every child, e.g. ahead of the superko invalidation scan.
    pub fn inflate_all_children(&mut self) {
        for slot in self.children_mut() {
            slot.inflate();
        }
    }

    /// Size of the subtree, resetting still-expandable nodes back to
    /// `Initial` so a reused tree can widen its children lists.
    pub fn count_nodes_and_clear_expand_state(&mut self) -> usize {
        if self.expandable(0.0) {
            self.expand_state
                .store(ExpandState::Initial as u8, Ordering::Relaxed);
        }
        let children = self.children_mut();
        let mut nodecount = children.len();
        for slot in children.iter_mut() {
            if let Some(child) = slot.node_mut() {
                nodecount += child.count_nodes_and_clear_expand_state();
            }
        }
        nodecount
    }
}

/// Moment-match a Beta distribution to `(mean, variance)`.
pub fn beta_param(mean: f32, variance: f32) -> (f32, f32) {
    let var = variance.max(1e-9);
    let k = mean * (1.0 - mean) / var - 1.0;
    (1.0 + mean * k, 1.0 + (1.0 - mean) * k)
}

/// Final-move ordering, ascending; callers reverse for best-first.
///
/// Candidates clearing the LCB visit floor are ranked by their lower
/// confidence bound; otherwise by visits, then prior (both unvisited),
/// then mean evaluation.
fn node_cmp(a: &ChildSlot, b: &ChildSlot, color: Color, lcb_min_visits: f32) -> CmpOrdering {
    let a_visits = a.get_visits();
    let b_visits = b.get_visits();

    // LCB needs at least two visits.
    let lcb_min_visits = lcb_min_visits.max(2.0);
    if (a_visits as f32) > lcb_min_visits && (b_visits as f32) > lcb_min_visits {
        let a_lcb = a.get_eval_lcb(color);
        let b_lcb = b.get_eval_lcb(color);
        if a_lcb != b_lcb {
            return a_lcb.partial_cmp(&b_lcb).unwrap_or(CmpOrdering::Equal);
        }
    }

    if a_visits != b_visits {
        return a_visits.cmp(&b_visits);
    }

    // Neither has visits: rank on the prior.
    if a_visits == 0 {
        return a
            .get_policy()
            .partial_cmp(&b.get_policy())
            .unwrap_or(CmpOrdering::Equal);
    }

    a.get_eval(color)
        .partial_cmp(&b.get_eval(color))
        .unwrap_or(CmpOrdering::Equal)
}

fn pack_floats(lo: f32, hi: f32) -> u64 {
    u64::from(lo.to_bits()) | (u64::from(hi.to_bits()) << 32)
}

fn unpack_floats(packed: u64) -> (f32, f32) {
    (
        f32::from_bits(packed as u32),
        f32::from_bits((packed >> 32) as u32),
    )
}

//! Lazily inflated child slots.
//!
//! A freshly linked child is just its `(vertex, policy)` prior pair;
//! that is all selection needs until the child is visited. The first
//! worker that actually descends into the child inflates the slot with
//! a one-shot CAS. Inflation is monotonic: once the pointer is set it
//! never changes, and the slot owns the node until the slot is dropped.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use gz_core::{Color, Vertex};

use crate::node::Node;

/// One entry in a node's children list.
#[derive(Debug)]
pub struct ChildSlot {
    vertex: Vertex,
    policy: f32,
    node: AtomicPtr<Node>,
}

impl ChildSlot {
    pub(crate) fn new(vertex: Vertex, policy: f32) -> Self {
        ChildSlot {
            vertex,
            policy,
            node: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// The move this child plays.
    #[inline]
    pub fn vertex(&self) -> Vertex {
        self.vertex
    }

    #[inline]
    pub fn is_inflated(&self) -> bool {
        !self.node.load(Ordering::Acquire).is_null()
    }

    /// Promote the slot to a full node. Idempotent; concurrent callers
    /// race on a CAS and the losers free their allocation.
    pub fn inflate(&self) {
        if self.is_inflated() {
            return;
        }
        let fresh = Box::into_raw(Box::new(Node::new(self.vertex, self.policy)));
        if let Err(_raced) = self.node.compare_exchange(
            ptr::null_mut(),
            fresh,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            // Another worker inflated first; ours is unreachable.
            drop(unsafe { Box::from_raw(fresh) });
        }
    }

    /// The inflated node, if any.
    #[inline]
    pub fn node(&self) -> Option<&Node> {
        let p = self.node.load(Ordering::Acquire);
        if p.is_null() {
            None
        } else {
            // Safety: the pointer was published by `inflate` and is only
            // freed when the slot itself is dropped, which requires
            // exclusive access.
            Some(unsafe { &*p })
        }
    }

    pub(crate) fn node_mut(&mut self) -> Option<&mut Node> {
        let p = *self.node.get_mut();
        if p.is_null() {
            None
        } else {
            Some(unsafe { &mut *p })
        }
    }

    /// Detach and return the owned node, leaving the slot deflated.
    pub(crate) fn take_node(&mut self) -> Option<Box<Node>> {
        let p = std::mem::replace(self.node.get_mut(), ptr::null_mut());
        if p.is_null() {
            None
        } else {
            Some(unsafe { Box::from_raw(p) })
        }
    }

    /// Prior probability; reads through to the node once inflated.
    #[inline]
    pub fn get_policy(&self) -> f32 {
        match self.node() {
            Some(node) => node.get_policy(),
            None => self.policy,
        }
    }

    /// Visit count; a deflated child has never been visited.
    #[inline]
    pub fn get_visits(&self) -> u32 {
        self.node().map_or(0, Node::get_visits)
    }

    /// Not invalidated by the superko check. Deflated children are valid.
    #[inline]
    pub fn valid(&self) -> bool {
        self.node().map_or(true, Node::valid)
    }

    /// Neither invalidated nor pruned.
    #[inline]
    pub fn active(&self) -> bool {
        self.node().map_or(true, Node::active)
    }

    /// Whether another worker currently holds the expansion interlock.
    pub(crate) fn is_expanding(&self) -> bool {
        self.node().map_or(false, Node::is_expanding)
    }

    pub fn get_eval(&self, color: Color) -> f32 {
        self.node().map_or(0.0, |node| node.get_eval(color))
    }

    pub fn get_eval_lcb(&self, color: Color) -> f32 {
        match self.node() {
            Some(node) => node.get_eval_lcb(color),
            None => -1e6,
        }
    }

    pub fn get_beta_param(&self, color: Color) -> (f32, f32) {
        self.node().map_or((1.0, 1.0), |node| node.get_beta_param(color))
    }

    pub fn get_distribution(&self, color: Color) -> (f32, f32) {
        self.node()
            .map_or((0.5, 1.0), |node| node.get_distribution(color))
    }
}

impl Drop for ChildSlot {
    fn drop(&mut self) {
        let p = *self.node.get_mut();
        if !p.is_null() {
            drop(unsafe { Box::from_raw(p) });
        }
    }
}

//! Move operators over depot-anchored routes.
//!
//! A neighborhood is the set of routes reachable by one elementary move.
//! Both operators act on a pair of interior positions `1 <= i < j <= n-2`
//! and never touch the depot endpoints, so each yields exactly
//! `C(n-2, 2)` candidates for a route of length `n`.
//!
//! Generators are purely combinatorial: no feasibility filtering happens
//! here.

use rand::Rng;

use crate::problem::{NodeId, Route};

/// An elementary move operator.
///
/// The order of [`Neighborhood::STANDARD`] matters to the descent
/// engines: swaps are exhausted before reversals are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Exchange the nodes at positions `i` and `j`.
    Swap,
    /// Reverse the segment `[i..=j]` in place (2-opt).
    Reversal,
}

impl Neighborhood {
    /// Swap first, then reversal.
    pub const STANDARD: [Neighborhood; 2] = [Neighborhood::Swap, Neighborhood::Reversal];

    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Swap => "swap",
            Neighborhood::Reversal => "reversal",
        }
    }

    /// Interior position pairs `(i, j)`, `i < j`, in generation order.
    pub fn moves(route_len: usize) -> impl Iterator<Item = (usize, usize)> {
        let last = route_len.saturating_sub(1);
        (1..last).flat_map(move |i| (i + 1..last).map(move |j| (i, j)))
    }

    /// Number of neighbors of a route of length `route_len`: `C(n-2, 2)`.
    pub fn size(route_len: usize) -> usize {
        let interior = route_len.saturating_sub(2);
        interior * interior.saturating_sub(1) / 2
    }

    /// Applies the move at `(i, j)` in place.
    ///
    /// Both operators are involutions, so applying the same move twice
    /// restores the route.
    pub fn apply(self, route: &mut [NodeId], i: usize, j: usize) {
        match self {
            Neighborhood::Swap => route.swap(i, j),
            Neighborhood::Reversal => route[i..=j].reverse(),
        }
    }

    /// All neighbors of `route`, materialized.
    pub fn neighbors(self, route: &[NodeId]) -> Vec<Route> {
        Self::moves(route.len())
            .map(|(i, j)| {
                let mut neighbor = route.to_vec();
                self.apply(&mut neighbor, i, j);
                neighbor
            })
            .collect()
    }

    /// One neighbor drawn uniformly at random, or `None` if the route has
    /// fewer than two interior positions.
    pub fn random_neighbor<R: Rng>(self, route: &[NodeId], rng: &mut R) -> Option<Route> {
        let (i, j) = random_pair(route.len(), rng)?;
        let mut neighbor = route.to_vec();
        self.apply(&mut neighbor, i, j);
        Some(neighbor)
    }
}

impl std::fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every route obtained by exchanging two interior positions.
pub fn swap_neighborhood(route: &[NodeId]) -> Vec<Route> {
    Neighborhood::Swap.neighbors(route)
}

/// Every route obtained by reversing one interior segment.
pub fn reversal_neighborhood(route: &[NodeId]) -> Vec<Route> {
    Neighborhood::Reversal.neighbors(route)
}

/// Uniformly random interior pair `(i, j)` with `i < j`.
pub(crate) fn random_pair<R: Rng>(route_len: usize, rng: &mut R) -> Option<(usize, usize)> {
    let interior = route_len.saturating_sub(2);
    if interior < 2 {
        return None;
    }
    let a = rng.random_range(1..=interior);
    let mut b = rng.random_range(1..interior);
    if b >= a {
        b += 1;
    }
    Some((a.min(b), a.max(b)))
}

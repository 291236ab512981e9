use std::collections::VecDeque;

use bit_set::BitSet;
use log::debug;

use crate::color::{ConflictGraph, VertexId, nb_colors};


/** computes the Kempe chain of `start` for colors (c1, c2): the vertices colored c1 or c2
reachable from `start` through vertices colored c1 or c2 (breadth-first, in adjacency order).
The vertex `excluded` is never entered (it is the vertex we try to recolor).
*/
pub fn kempe_chain(
    inst: &ConflictGraph,
    coloring: &[usize],
    start: VertexId,
    c1: usize,
    c2: usize,
    excluded: VertexId,
) -> Vec<VertexId> {
    let in_chain = |v: VertexId| v != excluded && (coloring[v] == c1 || coloring[v] == c2);
    let mut res = Vec::new();
    if !in_chain(start) { return res; }
    let mut visited = BitSet::with_capacity(inst.nb_vertices());
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some(v) = queue.pop_front() {
        res.push(v);
        for w in inst.neighbors(v) {
            if in_chain(*w) && visited.insert(*w) {
                queue.push_back(*w);
            }
        }
    }
    res
}

/// exchanges colors c1 and c2 on the chain (applying it twice restores the coloring)
fn swap_colors(coloring: &mut [usize], chain: &[VertexId], c1: usize, c2: usize) {
    for v in chain {
        if coloring[*v] == c1 { coloring[*v] = c2; }
        else if coloring[*v] == c2 { coloring[*v] = c1; }
    }
}

/** a Kempe interchange applied to a coloring.
It is undone when dropped, unless it has been committed.
*/
struct ChainSwap<'a> {
    coloring: &'a mut [usize],
    chain: Vec<VertexId>,
    c1: usize,
    c2: usize,
    committed: bool,
}

impl<'a> ChainSwap<'a> {
    fn apply(coloring: &'a mut [usize], chain: Vec<VertexId>, c1: usize, c2: usize) -> Self {
        swap_colors(coloring, &chain, c1, c2);
        Self { coloring, chain, c1, c2, committed: false }
    }

    fn color(&self, v: VertexId) -> usize { self.coloring[v] }

    /// keeps the swap, and recolors v (outside the chain) with c
    fn commit_with(mut self, v: VertexId, c: usize) {
        self.coloring[v] = c;
        self.committed = true;
    }
}

impl<'a> Drop for ChainSwap<'a> {
    fn drop(&mut self) {
        if !self.committed {
            swap_colors(self.coloring, &self.chain, self.c1, self.c2);
        }
    }
}


/** tries to move v (colored m) to color t.
 - if no neighbor of v uses t: recolor v directly.
 - otherwise, swap (t,m) on the Kempe chain of the first neighbor colored t, and recolor v
   if t is now free around v. The swap is only kept if the color class m shrinks.
returns true iff v has been recolored.
*/
fn try_recolor(inst: &ConflictGraph, coloring: &mut [usize], v: VertexId, t: usize, m: usize) -> bool {
    let u = match inst.neighbors(v).iter().find(|u| coloring[**u] == t) {
        None => {
            coloring[v] = t;
            debug!("kempe: {} moved from {} to {}", inst.name(v), m, t);
            return true;
        }
        Some(u) => *u,
    };
    let chain = kempe_chain(inst, coloring, u, t, m, v);
    let nb_t = chain.iter().filter(|w| coloring[**w] == t).count();
    let nb_m = chain.len() - nb_t;
    let swap = ChainSwap::apply(coloring, chain, t, m);
    // after the swap, nb_t vertices enter class m, nb_m leave it, and v leaves it as well
    if nb_t > nb_m || inst.neighbors(v).iter().any(|w| swap.color(*w) == t) {
        return false; // dropping the swap reverts it
    }
    swap.commit_with(v, t);
    debug!(
        "kempe: {} moved from {} to {} (chain of {} vertices)",
        inst.name(v), m, t, nb_t + nb_m
    );
    true
}

/// recolors one vertex of the color class m, returns false if none can be
fn shrink_color_class(inst: &ConflictGraph, coloring: &mut [usize], m: usize) -> bool {
    let nodes_with_max: Vec<VertexId> = (0..inst.nb_vertices())
        .filter(|v| coloring[*v] == m)
        .collect();
    for v in nodes_with_max {
        for t in 1..m {
            if try_recolor(inst, coloring, v, t, m) {
                return true;
            }
        }
    }
    false
}

/** Kempe chain interchange post-pass.
Repeatedly tries to empty the highest color class M:
 1. for each vertex colored M (by increasing vertex id, i.e. exam input order),
 2. for each target color t < M, try to move it to t (directly or through a Kempe chain swap),
 3. restart after each success, stop as soon as no vertex of class M can be moved.

Each success removes at least one vertex from class M, so the procedure terminates.
The coloring stays valid and never uses more colors than initially.
returns true iff the coloring has been modified.
*/
pub fn kempe_chains(inst: &ConflictGraph, coloring: &mut [usize]) -> bool {
    let initial_colors = nb_colors(coloring);
    let mut changed = false;
    loop {
        let m = nb_colors(coloring);
        if m <= 1 || !shrink_color_class(inst, coloring, m) {
            break;
        }
        changed = true;
    }
    if changed {
        debug!("kempe chains: {} -> {} colors", initial_colors, nb_colors(coloring));
    }
    changed
}

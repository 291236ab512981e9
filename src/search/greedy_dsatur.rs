use std::cmp::{Ordering, max, Ord};

use priority_queue::PriorityQueue;
use bit_set::BitSet;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::{ConflictGraph, Coloring, VertexId};

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
    /// last tie-break: the larger, the earlier the vertex is chosen (unique per vertex)
    rank: usize,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat.cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** tie-break ranks following the lexicographic order of the exam identifiers
(the smallest identifier gets the largest rank) */
fn lexicographic_ranks(inst: &ConflictGraph) -> Vec<usize> {
    let n = inst.nb_vertices();
    let mut order: Vec<VertexId> = (0..n).collect();
    order.sort_by(|a, b| inst.name(*a).cmp(inst.name(*b)));
    let mut ranks = vec![0; n];
    for (pos, v) in order.into_iter().enumerate() {
        ranks[v] = n - pos;
    }
    ranks
}

/** tie-break ranks drawn as a random permutation: among any set of tied vertices,
each one is equally likely to be picked first */
fn random_ranks<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut ranks: Vec<usize> = (0..n).collect();
    ranks.shuffle(rng);
    ranks
}

/** implements a greedy DSATUR algorithm.
    1. choose an uncolored exam that sees the most colors (break ties by the largest degree,
       then by the lexicographic order of its identifier, or randomly if a generator is given)
    2. give it the first color available (colors start at 1)
    3. mark all its uncolored neighbors seeing this color
    4. repeat until a proper coloring is found

The static degree is computed once and never updated. The procedure never backtracks.

parameters:
 - inst: reference to a conflict graph
 - rng: if Some, random tie-breaks, otherwise deterministic ones
*/
pub fn greedy_dsatur<R: Rng + ?Sized>(inst: &ConflictGraph, rng: Option<&mut R>) -> Coloring {
    let n: usize = inst.nb_vertices();
    let ranks = match rng {
        None => lexicographic_ranks(inst),
        Some(r) => random_ranks(n, r),
    };
    let mut remaining_vertices: PriorityQueue<VertexId, DSatInfo> = PriorityQueue::with_capacity(n);
    for (i, rank) in ranks.into_iter().enumerate() {
        remaining_vertices.push(i, DSatInfo { dsat: 0, degree: inst.degree(i), rank });
    }
    let mut colors: Coloring = vec![0; n]; // colors[v] -> color assigned to vertex v (0: none)
    let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n]; // adj_colors[v] -> colors v sees
    let mut last_color: usize = 0;
    while let Some((current_vertex, _)) = remaining_vertices.pop() {
        // assign it a color
        let mut color: usize = 1;
        while adj_colors[current_vertex].contains(color) { color += 1; }
        colors[current_vertex] = color;
        last_color = max(last_color, color); // update nb colors
        // update saturation degree information
        for conflict_vertex in inst.neighbors(current_vertex).iter()
        .filter(|conflict_vertex| colors[**conflict_vertex] == 0) {
            if !adj_colors[*conflict_vertex].contains(color) {
                adj_colors[*conflict_vertex].insert(color);
                remaining_vertices.change_priority_by(conflict_vertex, |p| { p.dsat += 1; });
            }
        }
    }
    log::debug!("dsatur: {} vertices colored with {} colors", n, last_color);
    colors
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::color::{checker, CheckerResult, nb_colors};
    use crate::search::random_graph;

    fn no_rng() -> Option<&'static mut StdRng> { None }

    #[test]
    fn test_empty() {
        let exams: [&str; 0] = [];
        let conflicts: [(&str, &str); 0] = [];
        let inst = ConflictGraph::new(&exams, &conflicts);
        let colors = greedy_dsatur(&inst, no_rng());
        assert!(colors.is_empty());
        assert_eq!(nb_colors(&colors), 0);
    }

    #[test]
    fn test_isolated_vertices() {
        let exams: Vec<String> = (1..=10).map(|i| format!("E{}", i)).collect();
        let conflicts: [(&str, &str); 0] = [];
        let inst = ConflictGraph::new(&exams, &conflicts);
        assert_eq!(greedy_dsatur(&inst, no_rng()), vec![1; 10]);
    }

    #[test]
    fn test_single_conflict() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B")]);
        let colors = greedy_dsatur(&inst, no_rng());
        assert_ne!(colors[0], colors[1]);
        assert!(nb_colors(&colors) <= 2);
        // A and B have the largest degree, A is first lexicographically
        assert_eq!(colors, vec![1, 2, 1]);
    }

    #[test]
    fn test_triangle() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let colors = greedy_dsatur(&inst, no_rng());
        assert_eq!(checker(&inst, &colors), CheckerResult::Ok(3));
    }

    #[test]
    fn test_lexicographic_tie_break() {
        // inserted in reverse order: the first colored vertex must be "a"
        let inst = ConflictGraph::new(&["c", "b", "a"], &[("c", "b"), ("b", "a"), ("a", "c")]);
        let colors = greedy_dsatur(&inst, no_rng());
        assert_eq!(colors, vec![3, 2, 1]);
    }

    #[test]
    fn test_bipartite_even_cycle() {
        let exams: Vec<String> = (0..8).map(|i| format!("v{}", i)).collect();
        let conflicts: Vec<(String, String)> = (0..8)
            .map(|i| (exams[i].clone(), exams[(i + 1) % 8].clone()))
            .collect();
        let inst = ConflictGraph::new(&exams, &conflicts);
        // DSATUR is exact on bipartite graphs
        assert_eq!(checker(&inst, &greedy_dsatur(&inst, no_rng())), CheckerResult::Ok(2));
    }

    #[test]
    fn test_deterministic() {
        let inst = random_graph(40, 0.3, 7);
        let c1 = greedy_dsatur(&inst, no_rng());
        let c2 = greedy_dsatur(&inst, no_rng());
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_random_graphs_valid_and_dense() {
        for seed in 0..10 {
            let inst = random_graph(30, 0.25, seed);
            let colors = greedy_dsatur(&inst, no_rng());
            assert!(matches!(checker(&inst, &colors), CheckerResult::Ok(_)));
            let mut rng = StdRng::seed_from_u64(seed);
            let colors = greedy_dsatur(&inst, Some(&mut rng));
            assert!(matches!(checker(&inst, &colors), CheckerResult::Ok(_)));
        }
    }

    #[test]
    fn test_seeded_reproducible() {
        let inst = random_graph(40, 0.3, 3);
        let c1 = greedy_dsatur(&inst, Some(&mut StdRng::seed_from_u64(11)));
        let c2 = greedy_dsatur(&inst, Some(&mut StdRng::seed_from_u64(11)));
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_random_tie_breaks_vary_with_seed() {
        // all vertices of a cycle tie: the first one picked fixes which half gets color 1
        let exams: Vec<String> = (0..8).map(|i| format!("v{}", i)).collect();
        let conflicts: Vec<(String, String)> = (0..8)
            .map(|i| (exams[i].clone(), exams[(i + 1) % 8].clone()))
            .collect();
        let inst = ConflictGraph::new(&exams, &conflicts);
        let mut colorings = BTreeSet::new();
        for seed in 0..32 {
            let colors = greedy_dsatur(&inst, Some(&mut StdRng::seed_from_u64(seed)));
            assert_eq!(checker(&inst, &colors), CheckerResult::Ok(2));
            colorings.insert(colors);
        }
        assert_eq!(colorings.len(), 2);
        assert!(colorings.contains(&greedy_dsatur(&inst, no_rng())));
    }
}

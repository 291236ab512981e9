use std::collections::HashMap;

use bit_set::BitSet;
use log::info;

/** Vertex Id (position of the exam in the deduplicated exam list) */
pub type VertexId = usize;

/** Coloring of a conflict graph.
coloring[v] is the (1-based) color of vertex v, 0 means "uncolored".
*/
pub type Coloring = Vec<usize>;

/** Solution of a graph coloring problem
(represented as a partition: solution[c] contains the vertices of color c+1).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** models an exam conflict graph (undirected, no self-loops) */
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    /// exam identifier of each vertex (input order, no duplicates)
    names: Vec<String>,
    /// nb edges
    m: usize,
    /// nb conflicting pairs dropped (self-pair or unknown exam)
    dropped: usize,
    /// adj_list[i]: list of vertices adjacent to i (sorted)
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}

impl ConflictGraph {

    /** builds the graph from a list of exams and a list of conflicting pairs.
    Duplicated exams are collapsed (first occurrence wins), blank exams are ignored.
    Self-pairs and pairs referring to an unknown exam are silently dropped.
    */
    pub fn new<S, A, B>(exams: &[S], conflicts: &[(A, B)]) -> Self
    where S: AsRef<str>, A: AsRef<str>, B: AsRef<str> {
        let mut names: Vec<String> = Vec::with_capacity(exams.len());
        let mut index: HashMap<String, VertexId> = HashMap::with_capacity(exams.len());
        for e in exams {
            let e = e.as_ref().trim();
            if e.is_empty() || index.contains_key(e) { continue; }
            index.insert(e.to_string(), names.len());
            names.push(e.to_string());
        }
        let n = names.len();
        let mut adj_list: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        let mut adj_matrix: Vec<BitSet> = vec![BitSet::default(); n];
        let mut m = 0;
        let mut dropped = 0;
        for (a, b) in conflicts {
            let (u, v) = match (index.get(a.as_ref().trim()), index.get(b.as_ref().trim())) {
                (Some(u), Some(v)) if u != v => (*u, *v),
                _ => { dropped += 1; continue; } // self-pair or out of the exam set
            };
            if adj_matrix[u].contains(v) { continue; }
            adj_matrix[u].insert(v);
            adj_matrix[v].insert(u);
            adj_list[u].push(v);
            adj_list[v].push(u);
            m += 1;
        }
        for l in adj_list.iter_mut() { l.sort_unstable(); }
        Self { names, m, dropped, adj_list, adj_matrix }
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.names.len() }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// number of conflicting pairs ignored while building the graph (duplicates excluded)
    pub fn nb_dropped_conflicts(&self) -> usize { self.dropped }

    /// list of vertices adjacent to vertex u (increasing order)
    pub fn neighbors(&self, u: VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// static degree of u
    pub fn degree(&self, u: VertexId) -> usize { self.adj_list[u].len() }

    /// true iff u and v conflict. O(1)
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// exam identifier of vertex u
    pub fn name(&self, u: VertexId) -> &str { &self.names[u] }

    /// exam identifiers, in vertex order
    pub fn names(&self) -> &[String] { &self.names }

    /// logs statistics of the instance
    pub fn display_statistics(&self) {
        info!("\t{} \t vertices", self.nb_vertices());
        info!("\t{} \t edges", self.nb_edges());
        let degrees = (0..self.nb_vertices()).map(|i| self.degree(i));
        if let (Some(min), Some(max)) = (degrees.clone().min(), degrees.max()) {
            info!("\t{} \t min degree", min);
            info!("\t{} \t max degree", max);
        }
    }
}


/// number of colors used by a coloring (0 for an empty coloring)
pub fn nb_colors(coloring: &[usize]) -> usize {
    coloring.iter().copied().max().unwrap_or(0)
}

/// transforms a coloring into a partition (one vector of vertices per color)
pub fn coloring_to_solution(coloring: &[usize]) -> Solution {
    let mut res: Solution = vec![vec![]; nb_colors(coloring)];
    for (v, c) in coloring.iter().enumerate() {
        if *c > 0 { res[c - 1].push(v); }
    }
    res
}


/** result of the solution checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the coloring is valid, and uses the given number of colors
    Ok(usize),
    /// the coloring does not have one color per vertex
    WrongSize(usize, usize),
    /// vertex is not colored
    Uncolored(VertexId),
    /// both endpoints of an edge share a color
    Conflict(VertexId, VertexId),
    /// some color between 1 and the maximum color is not used
    MissingColor(usize),
}

/**
checks that a coloring is complete, valid, and uses colors 1..K without gaps.
*/
pub fn checker(inst: &ConflictGraph, coloring: &[usize]) -> CheckerResult {
    if coloring.len() != inst.nb_vertices() {
        return CheckerResult::WrongSize(coloring.len(), inst.nb_vertices());
    }
    if let Some(v) = coloring.iter().position(|c| *c == 0) {
        return CheckerResult::Uncolored(v);
    }
    let solution = coloring_to_solution(coloring);
    for (c, class) in solution.iter().enumerate() {
        if class.is_empty() {
            return CheckerResult::MissingColor(c + 1);
        }
        for (i, u) in class.iter().enumerate() {
            if let Some(v) = class[i + 1..].iter().find(|v| inst.are_adjacent(*u, **v)) {
                return CheckerResult::Conflict(*u, *v);
            }
        }
    }
    CheckerResult::Ok(solution.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_graph() {
        let inst = ConflictGraph::new(
            &["A", "B", "C", "B"],
            &[("A", "B"), ("B", "A"), ("C", "C"), ("A", "Z"), (" C ", "B")],
        );
        assert_eq!(inst.nb_vertices(), 3);
        assert_eq!(inst.nb_edges(), 2);
        assert_eq!(inst.nb_dropped_conflicts(), 2);
        assert_eq!(inst.names(), &["A", "B", "C"]);
        assert_eq!(inst.neighbors(1), &[0, 2]);
        assert!(inst.are_adjacent(0, 1));
        assert!(inst.are_adjacent(1, 0));
        assert!(!inst.are_adjacent(2, 2));
        assert_eq!(inst.neighbors(0), &[1]);
        assert_eq!(inst.neighbors(2), &[1]);
    }

    #[test]
    fn test_adjacency_symmetric_irreflexive() {
        let inst = ConflictGraph::new(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("d", "d"), ("a", "d")],
        );
        for u in 0..inst.nb_vertices() {
            assert!(!inst.are_adjacent(u, u));
            for v in inst.neighbors(u) {
                assert!(inst.neighbors(*v).contains(&u));
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let exams: [&str; 0] = [];
        let conflicts: [(&str, &str); 0] = [];
        let inst = ConflictGraph::new(&exams, &conflicts);
        assert_eq!(inst.nb_vertices(), 0);
        assert_eq!(checker(&inst, &[]), CheckerResult::Ok(0));
        inst.display_statistics();
    }

    #[test]
    fn test_checker() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B")]);
        assert_eq!(checker(&inst, &[1, 2, 1]), CheckerResult::Ok(2));
        assert_eq!(checker(&inst, &[1, 1, 2]), CheckerResult::Conflict(0, 1));
        assert_eq!(checker(&inst, &[1, 2, 0]), CheckerResult::Uncolored(2));
        assert_eq!(checker(&inst, &[1, 3, 1]), CheckerResult::MissingColor(2));
        assert_eq!(checker(&inst, &[1, 2]), CheckerResult::WrongSize(2, 3));
        // a conflict in a later color class
        let inst = ConflictGraph::new(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        assert_eq!(checker(&inst, &[1, 2, 2, 2]), CheckerResult::Conflict(2, 3));
        assert_eq!(checker(&inst, &[1, 2, 1, 2]), CheckerResult::Ok(2));
    }

    #[test]
    fn test_coloring_to_solution() {
        assert_eq!(coloring_to_solution(&[2, 1, 2, 3]), vec![vec![1], vec![0, 2], vec![3]]);
        assert_eq!(nb_colors(&[]), 0);
    }
}

//! Coloring algorithms for the exam conflict graph.

/// greedy DSATUR algorithm
pub mod greedy_dsatur;

/// Kempe chain interchange post-pass
pub mod kempe_chains;

/// randomized multi-trial search (DSATUR + Kempe chains)
pub mod multi_trial;


/// random graph with n vertices ("E000", "E001", ...) and edge probability p
#[cfg(test)]
pub(crate) fn random_graph(n: usize, p: f64, seed: u64) -> crate::color::ConflictGraph {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let exams: Vec<String> = (0..n).map(|i| format!("E{:03}", i)).collect();
    let mut conflicts = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p) { conflicts.push((exams[i].clone(), exams[j].clone())); }
        }
    }
    crate::color::ConflictGraph::new(&exams, &conflicts)
}

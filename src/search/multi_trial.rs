use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::color::{ConflictGraph, Coloring, CheckerResult, checker, nb_colors};
use crate::search::greedy_dsatur::greedy_dsatur;
use crate::search::kempe_chains::kempe_chains;


/** best coloring found by the multi-trial search */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// coloring (1-based colors)
    pub coloring: Coloring,
    /// number of colors used by the coloring
    pub nb_colors: usize,
    /// number of colors of the DSATUR pass that produced it (before the Kempe chains)
    pub dsatur_colors: usize,
    /// trial that produced it (None: deterministic fallback)
    pub best_trial: Option<usize>,
    /// number of trials run
    pub nb_trials: usize,
}

/// DSATUR followed by the Kempe chain post-pass. Returns (coloring, colors before the post-pass)
fn run_trial<R: Rng + ?Sized>(inst: &ConflictGraph, rng: Option<&mut R>) -> (Coloring, usize) {
    let mut coloring = greedy_dsatur(inst, rng);
    let dsatur_colors = nb_colors(&coloring);
    kempe_chains(inst, &mut coloring);
    (coloring, dsatur_colors)
}

/** keeps the valid coloring with the fewest colors among trial results
(coloring, colors before the post-pass), ties keeping the first one.
Invalid colorings are discarded. If none remains, a plain deterministic DSATUR coloring
is returned.
*/
fn select_best(inst: &ConflictGraph, trials: Vec<(Coloring, usize)>) -> SearchResult {
    let nb_trials = trials.len();
    let mut best: Option<SearchResult> = None;
    for (trial, (coloring, dsatur_colors)) in trials.into_iter().enumerate() {
        let k = match checker(inst, &coloring) {
            CheckerResult::Ok(k) => k,
            e => {
                warn!("trial {}: invalid coloring discarded ({:?})", trial, e);
                continue;
            }
        };
        debug!("trial {}: {} colors (dsatur: {})", trial, k, dsatur_colors);
        if best.as_ref().map_or(true, |b| k < b.nb_colors) {
            best = Some(SearchResult {
                coloring,
                nb_colors: k,
                dsatur_colors,
                best_trial: Some(trial),
                nb_trials,
            });
        }
    }
    best.unwrap_or_else(|| {
        warn!("no valid trial, falling back to a deterministic DSATUR coloring");
        let coloring = greedy_dsatur::<StdRng>(inst, None);
        let k = nb_colors(&coloring);
        SearchResult { coloring, nb_colors: k, dsatur_colors: k, best_trial: None, nb_trials }
    })
}

/** runs `nb_trials` times (at least once) the DSATUR + Kempe chains pipeline and keeps
the coloring with the fewest colors (ties keep the first one found).
 - the first trial uses the deterministic (lexicographic) tie-break
 - the following trials draw their tie-breaks from rng, so a seeded generator makes
   the whole search reproducible

Trials producing an invalid coloring are discarded. If none remains, a plain
deterministic DSATUR coloring is returned.
*/
pub fn multi_trial_search<R: Rng + ?Sized>(
    inst: &ConflictGraph,
    nb_trials: usize,
    rng: &mut R,
) -> SearchResult {
    let nb_trials = nb_trials.max(1);
    let mut trials = Vec::with_capacity(nb_trials);
    trials.push(run_trial::<R>(inst, None));
    for _ in 1..nb_trials {
        trials.push(run_trial(inst, Some(&mut *rng)));
    }
    let res = select_best(inst, trials);
    info!(
        "best coloring: {} colors (trial {:?} out of {})",
        res.nb_colors, res.best_trial, res.nb_trials
    );
    res
}


#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;

    use crate::search::random_graph;

    #[test]
    fn test_empty_graph() {
        let exams: [&str; 0] = [];
        let conflicts: [(&str, &str); 0] = [];
        let inst = ConflictGraph::new(&exams, &conflicts);
        let res = multi_trial_search(&inst, 5, &mut StdRng::seed_from_u64(0));
        assert!(res.coloring.is_empty());
        assert_eq!(res.nb_colors, 0);
        assert_eq!(res.best_trial, Some(0));
    }

    #[test]
    fn test_zero_trials_runs_once() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B")]);
        let res = multi_trial_search(&inst, 0, &mut StdRng::seed_from_u64(0));
        assert_eq!(res.nb_trials, 1);
        assert_eq!(res.coloring, vec![1, 2, 1]);
    }

    #[test]
    fn test_never_worse_than_first_trial() {
        for seed in 0..10 {
            let inst = random_graph(40, 0.35, seed);
            let single = multi_trial_search(&inst, 1, &mut StdRng::seed_from_u64(seed));
            let multi = multi_trial_search(&inst, 10, &mut StdRng::seed_from_u64(seed));
            assert!(multi.nb_colors <= single.nb_colors);
            assert!(multi.nb_colors <= multi.dsatur_colors);
            assert_eq!(checker(&inst, &multi.coloring), CheckerResult::Ok(multi.nb_colors));
        }
    }

    #[test]
    fn test_seed_reproducibility() {
        let inst = random_graph(50, 0.3, 42);
        let r1 = multi_trial_search(&inst, 8, &mut StdRng::seed_from_u64(1234));
        let r2 = multi_trial_search(&inst, 8, &mut StdRng::seed_from_u64(1234));
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_triangle_uses_three_colors() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let res = multi_trial_search(&inst, 4, &mut StdRng::seed_from_u64(3));
        assert_eq!(res.nb_colors, 3);
    }

    #[test]
    fn test_select_best_keeps_first_of_fewest_colors() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B")]);
        let res = select_best(&inst, vec![
            (vec![1, 2, 3], 3),
            (vec![1, 1, 2], 2), // invalid
            (vec![2, 1, 2], 2),
            (vec![1, 2, 1], 2),
        ]);
        assert_eq!(res.coloring, vec![2, 1, 2]);
        assert_eq!(res.nb_colors, 2);
        assert_eq!(res.best_trial, Some(2));
        assert_eq!(res.nb_trials, 4);
    }

    #[test]
    fn test_select_best_falls_back_to_dsatur() {
        let inst = ConflictGraph::new(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let res = select_best(&inst, vec![
            (vec![1, 1, 2], 2),
            (vec![1, 2], 2),
            (vec![1, 2, 0], 2),
        ]);
        assert_eq!(res.best_trial, None);
        assert_eq!(res.nb_trials, 3);
        assert_eq!(res.coloring, greedy_dsatur::<StdRng>(&inst, None));
        assert_eq!(checker(&inst, &res.coloring), CheckerResult::Ok(3));
        assert_eq!(res.dsatur_colors, 3);
    }
}

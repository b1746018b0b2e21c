//! Integration tests for the Hansel evidence structure.
//!
//! Purpose
//! -------
//! - Validate the end-to-end evidence pipeline: construction, ingestion of
//!   observations, derived probabilities, and evidence spending during a
//!   simulated traversal.
//! - Exercise the structure through its public `hansel::evidence` surface
//!   only, including caller-owned storage.
//!
//! Coverage
//! --------
//! - `evidence::Hansel`:
//!   - Construction errors (empty alphabet, shape mismatch).
//!   - `add_observation` / `get_observation` cell isolation.
//!   - Spanning support, conditional, and marginal values on a small
//!     nucleotide alphabet.
//!   - Lookback windowing in `get_edge_weights_at`.
//!   - Reweighting feeding back into edge weights.
//! - `evidence::HanselView`:
//!   - Bulk population of a borrowed buffer before and after construction.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of index, tensor, and option building blocks;
//!   these are covered by unit tests.
//! - Python bindings; those are exercised from the Python package.
//! - Randomized invariants; see `tests/property_invariants.rs`.
use approx::assert_relative_eq;
use hansel::evidence::{Hansel, HanselError, HanselOptions, HanselView, Site};
use ndarray::Array4;

/// Purpose
/// -------
/// Build the reference structure used across scenarios.
///
/// Returns
/// -------
/// - Alphabet `{A, C, G, T, _}` with unsymbol `_`, positions `[1, 3, 5]`,
///   lookback order 2, zero evidence.
fn nucleotides() -> Hansel<char, u64> {
    Hansel::new(
        vec!['A', 'C', 'G', 'T', '_'],
        &['_'],
        vec![1, 3, 5],
        HanselOptions::new(Some(2)).unwrap(),
    )
    .unwrap()
}

/// Purpose
/// -------
/// Record one read: every ordered pair of its `(position, symbol)` entries,
/// earlier position first, bracketed by the sentinels.
fn record_read(h: &mut Hansel<char, u64>, read: &[(u64, char)]) {
    let mut sites: Vec<(Site<u64>, char)> = vec![(Site::Head, '_')];
    sites.extend(read.iter().map(|&(p, s)| (Site::At(p), s)));
    sites.push((Site::Tail, '_'));
    for (k, (i, a)) in sites.iter().enumerate() {
        for (j, b) in &sites[k + 1..] {
            h.add_observation(a, b, *i, *j).unwrap();
        }
    }
}

#[test]
// Purpose
// -------
// Reproduce the reference scenario on spanning support and conditionals.
//
// Given
// -----
// - add_observation(A, C, 1, 3) ×3 and add_observation(G, C, 1, 3) ×1.
//
// Expect
// ------
// - spanning_support(C, 1, 3) == 4.
// - conditional(A, 1, C, 3) == log10(3/3) == 0 since A only ever led to C;
//   likewise conditional(G, 1, C, 3) == 0.
// - marginal(C, 3) == 0 since all evidence at 3 supports C.
fn spanning_support_and_conditional_on_reference_scenario() {
    let mut h = nucleotides();
    for _ in 0..3 {
        h.add_observation(&'A', &'C', 1, 3).unwrap();
    }
    h.add_observation(&'G', &'C', 1, 3).unwrap();

    assert_eq!(h.get_spanning_support(&'C', 1, 3).unwrap(), 4.0);
    assert_relative_eq!(h.get_conditional_of_at(&'A', 1, &'C', 3).unwrap(), 0.0);
    assert_relative_eq!(h.get_conditional_of_at(&'G', 1, &'C', 3).unwrap(), 0.0);
    assert_relative_eq!(h.get_marginal_of_at(&'C', 3).unwrap(), 0.0);
    assert_eq!(h.observations(), 4);
}

#[test]
// Purpose
// -------
// Reproduce the reference conditional of log10(3/4) by giving A a second
// destination at 3.
//
// Given
// -----
// - A→C (1→3) ×3, A→G (1→3) ×1, G→C (1→3) ×1.
//
// Expect
// ------
// - conditional(A, 1, C, 3) == log10(3/4); spanning_support(C, 1, 3) == 4.
fn conditional_matches_three_quarters() {
    let mut h = nucleotides();
    for _ in 0..3 {
        h.add_observation(&'A', &'C', 1, 3).unwrap();
    }
    h.add_observation(&'A', &'G', 1, 3).unwrap();
    h.add_observation(&'G', &'C', 1, 3).unwrap();

    assert_eq!(h.get_spanning_support(&'C', 1, 3).unwrap(), 4.0);
    assert_relative_eq!(h.get_conditional_of_at(&'A', 1, &'C', 3).unwrap(), (0.75_f64).log10());
}

#[test]
// Purpose
// -------
// Ensure construction and zero-evidence failures are explicit.
//
// Expect
// ------
// - Empty alphabet → Configuration.
// - Marginal at a position without evidence → InsufficientEvidence.
// - Storage of the wrong shape → ShapeMismatch.
fn construction_and_empty_evidence_fail_explicitly() {
    let empty = Hansel::<char, u64>::new(vec![], &[], vec![1], HanselOptions::default());
    assert!(matches!(empty, Err(HanselError::Configuration { .. })));

    let h = nucleotides();
    assert!(matches!(
        h.get_marginal_of_at(&'A', 5),
        Err(HanselError::InsufficientEvidence { .. })
    ));

    let wrong = Hansel::with_counts(
        vec!['A', 'C'],
        &[],
        vec![1_u64, 2],
        Array4::<f64>::zeros((2, 2, 3, 3)),
        HanselOptions::default(),
    );
    assert!(matches!(wrong, Err(HanselError::ShapeMismatch { expected: [2, 2, 4, 4], .. })));
}

#[test]
// Purpose
// -------
// Verify the lookback window: far path entries must not influence weights.
//
// Given
// -----
// - L = 2, positions [1, 3, 5] plus sentinels.
// - Path `[(Head, _), (1, A), (3, C)]`, deciding 5.
// - Near evidence (1→5, 3→5) favors G; far evidence (Head→5) massively
//   favors T.
//
// Expect
// ------
// - Weights equal those computed from the near entries alone.
fn edge_weights_ignore_entries_beyond_lookback() {
    let mut h = nucleotides();
    for _ in 0..3 {
        h.add_observation(&'A', &'G', 1, 5).unwrap();
        h.add_observation(&'C', &'G', 3, 5).unwrap();
    }
    h.add_observation(&'C', &'T', 3, 5).unwrap();
    for _ in 0..100 {
        h.add_observation(&'A', &'T', Site::Head, 5).unwrap();
    }

    let long = [(Site::Head, '_'), (Site::At(1), 'A'), (Site::At(3), 'C')];
    let near = [(Site::At(1), 'A'), (Site::At(3), 'C')];
    let from_long = h.get_edge_weights_at(5, &long).unwrap();
    let from_near = h.get_edge_weights_at(5, &near).unwrap();

    assert_relative_eq!(from_long[&'G'], (6.0_f64 / 7.0).log10());
    assert_relative_eq!(from_long[&'T'], (1.0_f64 / 7.0).log10());
    for symbol in ['A', 'C', 'G', 'T'] {
        assert_eq!(from_long[&symbol], from_near[&symbol]);
    }
    assert!(!from_long.contains_key(&'_'));
}

#[test]
// Purpose
// -------
// Simulate a traversal that rejects a branch and spends its evidence.
//
// Given
// -----
// - Reads ACG ×3 and ATG ×2 over positions [1, 3, 5].
// - Path `[(1, A)]`, deciding 3.
//
// Expect
// ------
// - Initially C is preferred (3 vs 2).
// - After spending all A→C (1→3) evidence, T carries all the weight and C
//   drops to -inf; the structure reports itself as weighted.
fn reweighting_redirects_traversal() {
    let mut h = nucleotides();
    for _ in 0..3 {
        record_read(&mut h, &[(1, 'A'), (3, 'C'), (5, 'G')]);
    }
    for _ in 0..2 {
        record_read(&mut h, &[(1, 'A'), (3, 'T'), (5, 'G')]);
    }
    let path = [(Site::At(1), 'A')];

    let before = h.get_edge_weights_at(3, &path).unwrap();
    assert_relative_eq!(before[&'C'], (0.6_f64).log10());
    assert_relative_eq!(before[&'T'], (0.4_f64).log10());

    h.reweight_observation(&'A', &'C', 1, 3, 1.0).unwrap();
    let after = h.get_edge_weights_at(3, &path).unwrap();

    assert_relative_eq!(after[&'T'], 0.0);
    assert_eq!(after[&'C'], f64::NEG_INFINITY);
    assert!(h.is_weighted());
}

#[test]
// Purpose
// -------
// Ensure sentinel rows carry boundary evidence like any other slot.
//
// Given
// -----
// - Reads ACG ×3 and TCG ×1 recorded with sentinels.
//
// Expect
// ------
// - Raw cells touching the sentinels hold one count per read.
// - Nothing reaches 1 from a real symbol, so its total is zero and edge
//   weights from a Head-only path fail.
// - Everything reaching Tail ends in `_`, so its total is zero too.
// - 5 is supported by 1 and 3 on every read: total 8.
fn sentinel_evidence_follows_unsymbol_rules() {
    let mut h = nucleotides();
    for _ in 0..3 {
        record_read(&mut h, &[(1, 'A'), (3, 'C'), (5, 'G')]);
    }
    record_read(&mut h, &[(1, 'T'), (3, 'C'), (5, 'G')]);

    assert_eq!(h.get_observation(&'_', &'A', Site::Head, 1).unwrap(), 3.0);
    assert_eq!(h.get_total_at(1).unwrap(), 0.0);
    assert!(matches!(
        h.get_edge_weights_at(1, &[(Site::Head, '_')]),
        Err(HanselError::InsufficientEvidence { .. })
    ));
    assert_eq!(h.get_observation(&'G', &'_', 5, Site::Tail).unwrap(), 4.0);
    assert_eq!(h.get_total_at(Site::Tail).unwrap(), 0.0);
    assert_eq!(h.get_total_at(5).unwrap(), 8.0);
}

#[test]
// Purpose
// -------
// Verify caller-owned storage: values written before construction are
// visible, writes through the structure land in the caller's buffer.
//
// Given
// -----
// - A zeroed `[2, 2, 4, 4]` buffer with `H[A, B, 1, 2] = 5` pre-written.
//
// Expect
// ------
// - The structure reads 5 at (A, B, 1, 2) and gives the marginal of B at 2
//   as 0; after one more observation the caller's buffer holds 6.
fn borrowed_storage_is_shared_with_the_caller() {
    let mut buffer = Array4::<f64>::zeros((2, 2, 4, 4));
    buffer[[0, 1, 1, 2]] = 5.0;

    {
        let mut h: HanselView<'_, char, u64> = Hansel::with_counts(
            vec!['A', 'B'],
            &[],
            vec![10, 20],
            buffer.view_mut(),
            HanselOptions::default(),
        )
        .unwrap();

        assert_eq!(h.get_observation(&'A', &'B', 10, 20).unwrap(), 5.0);
        assert_relative_eq!(h.get_marginal_of_at(&'B', 20).unwrap(), 0.0);
        h.add_observation(&'A', &'B', 10, 20).unwrap();
        h.counts_mut()[[1, 0, 1, 2]] += 2.0;
    }

    assert_eq!(buffer[[0, 1, 1, 2]], 6.0);
    assert_eq!(buffer[[1, 0, 1, 2]], 2.0);
}

#[test]
// Purpose
// -------
// Ensure caller-supplied real-valued counts with a dominant self-slot do not
// erase genuine cross-position evidence.
//
// Given
// -----
// - Storage with `H[A, C, 3, 3] = 1e17` (self-slot) and `H[A, C, 1, 3] = 1`.
//
// Expect
// ------
// - `counts_at(3)[C] == 1`, `counts_at(3)[A] == 0`, marginal of C at 3 is 0.
fn dominant_self_slot_does_not_cancel_support() {
    let mut storage = Array4::<f64>::zeros((2, 2, 4, 4));
    storage[[0, 1, 2, 2]] = 1e17;
    storage[[0, 1, 1, 2]] = 1.0;
    let h = Hansel::with_counts(
        vec!['A', 'C'],
        &[],
        vec![1_u32, 3],
        storage,
        HanselOptions::default(),
    )
    .unwrap();

    let counts = h.get_counts_at(3).unwrap();

    assert_eq!(counts[&'C'], 1.0);
    assert_eq!(counts[&'A'], 0.0);
    assert_relative_eq!(h.get_marginal_of_at(&'C', 3).unwrap(), 0.0);
}

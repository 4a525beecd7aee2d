// ─────────────────────────────────────────────────────────────────────
// NumPro Core — Property-Based Tests (proptest) for numpro-rank
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for numpro-rank using proptest.
//!
//! Covers: column-stochastic transition matrices, stationarity and
//! normalisation of the ranking, descending order of ranked pages.

use ndarray::Array2;
use numpro_math::linalg::{inf_norm, matrix_vector_product};
use numpro_rank::pagerank::{build_transition_matrix, rank, ranked_pages};
use proptest::collection::vec;
use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Random link matrix without self-links; every node links somewhere.
fn link_matrix() -> impl Strategy<Value = Array2<u8>> {
    (2usize..10).prop_flat_map(|n| {
        vec(any::<bool>(), n * n).prop_map(move |bits| {
            let mut links = Array2::zeros((n, n));
            for i in 0..n {
                for j in 0..n {
                    if i != j && bits[i * n + j] {
                        links[[i, j]] = 1u8;
                    }
                }
            }
            // Guarantee an out-link for every node: j -> j+1.
            for j in 0..n {
                links[[(j + 1) % n, j]] = 1;
            }
            links
        })
    })
}

proptest! {
    /// Every column of Ã sums to one.
    #[test]
    fn transition_columns_stochastic(links in link_matrix(), rho in 0.0f64..=1.0) {
        let a = build_transition_matrix(&links, rho).unwrap();
        for j in 0..a.ncols() {
            let s: f64 = a.column(j).sum();
            prop_assert!((s - 1.0).abs() < 1e-12, "column {} sums to {}", j, s);
        }
    }

    /// The ranking is a probability vector fixed by Ã.
    #[test]
    fn rank_is_stationary_distribution(links in link_matrix(), rho in 0.05f64..0.95) {
        let p = rank(&links, rho).unwrap();
        prop_assert!((p.sum() - 1.0).abs() < 1e-10, "sum = {}", p.sum());
        for &v in p.iter() {
            prop_assert!(v > 0.0, "non-positive score {}", v);
        }

        let a = build_transition_matrix(&links, rho).unwrap();
        let ap = matrix_vector_product(&a, &p).unwrap();
        prop_assert!(inf_norm(&(&ap - &p)) < 1e-9, "‖Ãp - p‖ = {}", inf_norm(&(&ap - &p)));
    }

    /// Ranked pages come out in non-increasing score order.
    #[test]
    fn ranked_pages_descending(links in link_matrix(), rho in 0.05f64..0.95) {
        let labels: Vec<String> = (0..links.nrows()).map(|i| format!("node{i}")).collect();
        let pages = ranked_pages(&labels, &links, rho).unwrap();
        prop_assert_eq!(pages.len(), labels.len());
        for pair in pages.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn two_node_cycle_is_uniform() {
    let links = ndarray::array![[0u8, 1], [1, 0]];
    let p = rank(&links, 0.0).unwrap();
    assert!((p[0] - 0.5).abs() < 1e-12);
    assert!((p[1] - 0.5).abs() < 1e-12);
}

/// Collects `field = value` pairs of every event.
struct EventRecorder {
    events: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S: Subscriber> Layer<S> for EventRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Vec::new();
        event.record(&mut FieldVisitor(&mut fields));
        self.events.lock().unwrap().push(fields);
    }
}

#[test]
fn ranking_emits_stationary_vector_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventRecorder {
        events: events.clone(),
    });

    let links = ndarray::array![[0u8, 1, 1], [1, 0, 0], [0, 1, 0]];
    let p = tracing::subscriber::with_default(subscriber, || rank(&links, 0.15).unwrap());
    assert!((p.sum() - 1.0).abs() < 1e-12);

    let events = events.lock().unwrap();
    let ranked = events
        .iter()
        .find(|fields| {
            fields
                .iter()
                .any(|(k, v)| k == "message" && v == "stationary vector computed")
        })
        .expect("ranking must emit a stationary-vector event");
    let field = |name: &str| {
        ranked
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    };
    assert_eq!(field("nodes").as_deref(), Some("3"));
    assert_eq!(field("rank_boundary").as_deref(), Some("2"));
}

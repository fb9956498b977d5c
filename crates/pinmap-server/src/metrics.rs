// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

/// Per-route request counters and latency samples.
#[derive(Default)]
pub struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, Vec<u64>>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);
        let mut latency_map = self.latency_ns.lock().await;
        latency_map
            .entry(route.to_string())
            .or_default()
            .push(latency.as_nanos() as u64);
    }

    /// Plaintext rendering for the metrics endpoint.
    pub(crate) async fn render_text(&self) -> String {
        let counts = self.counts.lock().await;
        let mut rows: Vec<_> = counts
            .iter()
            .map(|((route, status), count)| (route.clone(), *status, *count))
            .collect();
        drop(counts);
        rows.sort();
        let mut out = String::new();
        for (route, status, count) in rows {
            out.push_str(&format!(
                "pinmap_requests_total{{route=\"{route}\",status=\"{status}\"}} {count}\n"
            ));
        }
        let latency_map = self.latency_ns.lock().await;
        let mut routes: Vec<_> = latency_map.keys().cloned().collect();
        routes.sort();
        for route in routes {
            if let Some(samples) = latency_map.get(&route) {
                if samples.is_empty() {
                    continue;
                }
                let total: u64 = samples.iter().copied().sum();
                let mean_us = total / samples.len() as u64 / 1_000;
                out.push_str(&format!(
                    "pinmap_request_latency_mean_us{{route=\"{route}\"}} {mean_us}\n"
                ));
            }
        }
        out
    }
}

//! Seeded random topology generation.
//!
//! The generator walks the upper triangle of the adjacency matrix. For each
//! pair `(i, j)` with `i < j` it takes one draw to test locality
//! (`a % (j - i) == 0`) and, only when that passes, a second draw to test
//! density (`b % 100 < percent_edge`). Close indices pass the locality test
//! more often, which gives the graph its call-locality shape.
//!
//! Both draws come from the same stream, so the exact sequence of draws
//! fixes the graph for a given seed. Whether the second draw happens depends
//! only on the first, never on `percent_edge`; raising the percentage can
//! only add edges.
//!
//! The stream is ChaCha8 seeded through `seed_from_u64`, whose output is
//! fixed across platforms and releases, so a seed names the same topology
//! everywhere.

use log::{debug, info};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::topology::types::{Service, ServiceGraph};

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Seed for the random stream
    pub seed: i64,
    /// Number of services; non-positive values give an empty graph
    pub num_services: i64,
    /// Chance in percent that a locality-eligible pair gets an edge
    pub percent_edge: i64,
}

impl GeneratorParams {
    pub fn generate(&self) -> ServiceGraph {
        generate(self.seed, self.num_services, self.percent_edge)
    }
}

/// Generate a random service DAG.
///
/// # Arguments
/// * `seed` - Seed for the random stream; equal seeds give equal graphs
/// * `num_services` - Number of services, treated as zero when negative
/// * `percent_edge` - Edge percentage; `<= 0` gives no edges, `>= 100` keeps
///   every pair that passes the locality test
///
/// # Returns
/// The generated graph, with services indexed `0..num_services`
pub fn generate(seed: i64, num_services: i64, percent_edge: i64) -> ServiceGraph {
    let count = usize::try_from(num_services).unwrap_or(0);
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);

    let mut services: Vec<Service> = (0..count).map(Service::new).collect();

    for i in 0..count {
        for j in (i + 1)..count {
            let gap = (j - i) as u64;
            if draw(&mut rng) % gap == 0 && ((draw(&mut rng) % 100) as i64) < percent_edge {
                debug!("Adding edge {} -> {}", i, j);
                services[i].add_edge(j);
            }
        }
    }

    let graph = ServiceGraph::from_services(services);
    info!(
        "Generated topology with {} services and {} edges (seed {}, {}% edges)",
        graph.len(),
        graph.edge_count(),
        seed,
        percent_edge
    );
    graph
}

/// Draw a non-negative 63-bit integer from the stream.
fn draw(rng: &mut ChaCha8Rng) -> u64 {
    rng.next_u64() >> 1
}

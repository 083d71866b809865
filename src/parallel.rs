//! Order-preserving parallel map over records.
//!
//! Every record gets its own `StdRng`, seeded from a value drawn from the
//! caller's random source in record order. Draws are independent per record
//! and do not depend on which worker runs the record.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::error::Result;

/// Map `transform` over `records` on `worker_count` threads.
///
/// Output order matches input order. An error aborts the map; a degenerate
/// input error is tagged with the index of the failing record.
pub fn parallel_map<T, U, F, R>(
    records: &[T],
    worker_count: usize,
    rng: &mut R,
    transform: F,
) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T, &mut StdRng) -> Result<U> + Sync,
    R: Rng + ?Sized,
{
    let seeds: Vec<u64> = (0..records.len()).map(|_| rng.gen()).collect();

    let pool = ThreadPoolBuilder::new().num_threads(worker_count).build()?;

    pool.install(|| {
        records
            .par_iter()
            .zip(seeds.par_iter())
            .enumerate()
            .map(|(index, (record, &seed))| {
                let mut record_rng = StdRng::seed_from_u64(seed);
                transform(record, &mut record_rng).map_err(|e| e.at_record(index))
            })
            .collect()
    })
}

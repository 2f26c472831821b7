//! Random sampling for large series.

use std::collections::HashSet;

/// Draw `limit` distinct elements uniformly at random.
///
/// Inputs no longer than `limit` are returned whole. Otherwise the output
/// follows the order indices were drawn in, not input order.
pub fn sample_data<T: Clone>(rows: &[T], limit: usize) -> Vec<T> {
    sample_data_with_rng(rows, limit, &mut fastrand::Rng::new())
}

/// [`sample_data`] with a caller-supplied generator.
pub fn sample_data_with_rng<T: Clone>(rows: &[T], limit: usize, rng: &mut fastrand::Rng) -> Vec<T> {
    if rows.len() <= limit {
        return rows.to_vec();
    }

    let mut picked = HashSet::with_capacity(limit);
    let mut sample = Vec::with_capacity(limit);
    while sample.len() < limit {
        let index = rng.usize(0..rows.len());
        if picked.insert(index) {
            sample.push(rows[index].clone());
        }
    }

    sample
}

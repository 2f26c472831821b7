//! Correlation, aggregation and sampling utilities.

mod aggregate;
mod correlation;
mod sampling;

pub use aggregate::{aggregate_data, aggregate_groups, AggregateBucket};
pub use correlation::{calculate_correlation, correlation_matrix, CorrelationMatrix};
pub use sampling::{sample_data, sample_data_with_rng};

pub mod aggregate;
pub mod ballot;

pub use aggregate::{aggregate, aggregate_with, summarize};
pub use ballot::{Ballot, BallotState};

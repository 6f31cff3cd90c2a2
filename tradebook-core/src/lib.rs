pub mod aggregator;
pub mod filter;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod series;

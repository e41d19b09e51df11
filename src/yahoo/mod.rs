// =============================================================================
// Yahoo Finance Chart API — fetch layer
// =============================================================================
//
// The only network-facing collaborator of the report pipeline. Fetches the
// daily chart for a Taiwan-listed ticker and hands back three parallel
// arrays: date labels, nullable closes, nullable volumes.

pub mod client;

pub use client::{RawSeries, YahooClient};

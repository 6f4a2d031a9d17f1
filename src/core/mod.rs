//! Core data structures: time series and score lists.

pub mod score_list;
pub mod time_series;

pub use score_list::ScoreList;
pub use time_series::TimeSeries;

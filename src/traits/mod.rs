//! Core trait abstractions.
//!
//! [`FromConfig`] for configuration-driven construction, [`MonthSeries`]
//! for safe month lookups on result series, and [`EmissionsRepository`]
//! for the injected data source.

mod from_config;
mod month_series;
mod repository;

pub use from_config::FromConfig;
pub use month_series::MonthSeries;
pub use repository::EmissionsRepository;

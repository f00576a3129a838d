//! GitHub statistics for the profile page.
//!
//! Everything here is decorative widget data: a contribution count, a star
//! total, a language breakdown, a repo grid. Any transport or auth failure
//! therefore degrades to "no data" with a warning log — the page renders
//! without the widget rather than erroring.

pub mod github;

pub use github::{GitHubStats, LanguageShare, RepoSummary, StatsClient};

//! Rank-based dispersion tests and normality checking
//!
//! Benchmark reruns rarely follow a known distribution, so comparisons between
//! runs use rank statistics:
//!
//! - [`mann_whitney`]: two-sample U test with the probability-of-superiority
//!   effect size
//! - [`kruskal_wallis`]: k-sample H test with tie correction and
//!   epsilon-squared effect size
//! - [`dunn`]: pairwise post-hoc comparisons with Šidák adjustment
//! - [`shapiro_wilk`]: W test (AS R94) for deciding whether parametric summaries
//!   of a run are trustworthy
//!
//! # Examples
//!
//! ```rust
//! use robust_hypothesis::{dunn, kruskal_wallis};
//!
//! let runs = [
//!     vec![10.1, 10.3, 10.2, 10.4],
//!     vec![10.2, 10.1, 10.5, 10.3],
//!     vec![14.0, 14.2, 13.9, 14.1],
//! ];
//! let test = kruskal_wallis(&runs);
//! assert!(test.is_significant(0.05));
//!
//! let post_hoc = dunn(&test);
//! assert_eq!(post_hoc.comparisons().len(), 3);
//! ```

pub mod dunn;
pub mod kruskal_wallis;
pub mod mann_whitney;
pub mod ranks;
pub mod shapiro_wilk;

// Re-exports
pub use dunn::{dunn, Dunn, DunnComparison};
pub use kruskal_wallis::{kruskal_wallis, KruskalWallis};
pub use mann_whitney::{mann_whitney, MannWhitney};
pub use ranks::{rank, Ranking};
pub use shapiro_wilk::{shapiro_wilk, ShapiroWilk};

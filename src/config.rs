//! Benchmark configuration: the fixed set of input sizes and thread counts.
//!
//! JSON shape (optional override, `--config`):
//! {
//!   "input_sizes": [32, 64, 128],
//!   "thread_counts": [2, 4, 8],
//!   "title": "Speedup of PSRS"      // optional
//! }

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;

/// Problem scale, in millions of elements.
pub type InputSize = u32;

/// Parallelism degree of one run.
pub type ThreadCount = u32;

/// One measured duration as written by the benchmark driver.
pub type Timing = u64;

const DEFAULT_TITLE: &str = "Speedup of PSRS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BenchConfig {
    pub input_sizes: Vec<InputSize>,
    pub thread_counts: Vec<ThreadCount>,

    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl BenchConfig {
    /// The sizes and thread counts the benchmark driver runs in `auto` mode.
    pub fn reference() -> Self {
        let mut input_sizes = vec![32];
        input_sizes.extend((1..=5).map(|i| i * 64));
        Self::new(input_sizes, (1..=10).map(|i| i * 2).collect())
    }

    pub fn new(input_sizes: Vec<InputSize>, thread_counts: Vec<ThreadCount>) -> Self {
        Self {
            input_sizes,
            thread_counts,
            title: default_title(),
        }
    }

    pub fn from_json_file(path: &str) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
        let config: BenchConfig =
            serde_json::from_str(&text).with_context(|| format!("parse config file {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Both lists must hold positive, strictly ascending values.
    /// An empty size list is allowed (nothing to report); an empty thread list is not.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.thread_counts.is_empty() {
            bail!("config must list at least one thread count");
        }
        check_ascending("input_sizes", &self.input_sizes)?;
        check_ascending("thread_counts", &self.thread_counts)?;
        Ok(())
    }

    pub fn contains_size(&self, size: InputSize) -> bool {
        self.input_sizes.binary_search(&size).is_ok()
    }

    pub fn contains_threads(&self, threads: ThreadCount) -> bool {
        self.thread_counts.binary_search(&threads).is_ok()
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::reference()
    }
}

fn check_ascending(field: &str, values: &[u32]) -> anyhow::Result<()> {
    if values.contains(&0) {
        bail!("{} must be positive: {:?}", field, values);
    }
    if let Some(w) = values.windows(2).find(|w| w[0] >= w[1]) {
        bail!(
            "{} must be strictly ascending: {} is followed by {}",
            field,
            w[0],
            w[1]
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_matches_driver_runs() {
        let config = BenchConfig::reference();
        assert_eq!(config.input_sizes, vec![32, 64, 128, 192, 256, 320]);
        assert_eq!(
            config.thread_counts,
            vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20]
        );
        assert_eq!(config.title, "Speedup of PSRS");
        config.validate().unwrap();
    }

    #[test]
    fn rejects_unsorted_and_zero_values() {
        assert!(BenchConfig::new(vec![64, 32], vec![2]).validate().is_err());
        assert!(BenchConfig::new(vec![32, 32], vec![2]).validate().is_err());
        assert!(BenchConfig::new(vec![32], vec![0, 2]).validate().is_err());
        assert!(BenchConfig::new(vec![32], vec![]).validate().is_err());
        BenchConfig::new(vec![], vec![2]).validate().unwrap();
    }

    #[test]
    fn loads_json_with_default_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, r#"{ "input_sizes": [8, 16], "thread_counts": [1, 2, 4] }"#).unwrap();

        let config = BenchConfig::from_json_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config, BenchConfig::new(vec![8, 16], vec![1, 2, 4]));
        assert!(config.contains_size(16));
        assert!(!config.contains_threads(3));
    }

    #[test]
    fn json_override_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, r#"{ "input_sizes": [16, 8], "thread_counts": [2] }"#).unwrap();

        let err = BenchConfig::from_json_file(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("strictly ascending"), "{err}");
    }
}

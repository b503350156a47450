use crate::config::{BenchConfig, InputSize, ThreadCount, Timing};
use std::collections::BTreeMap;

/// How a file name in the results directory is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// `sequential...`; `size` is set when the name is `sequential <size>.txt`.
    Sequential { size: Option<InputSize> },
    /// `parallel <size> <threads>.txt`
    Parallel {
        size: InputSize,
        threads: ThreadCount,
    },
    Unrecognized,
}

/// A classified file together with the timing extracted from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    Sequential {
        size: Option<InputSize>,
        timing: Timing,
    },
    Parallel {
        size: InputSize,
        threads: ThreadCount,
        timing: Timing,
    },
    Unrecognized,
}

/// One baseline measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialRecord {
    pub file: String,
    pub size: Option<InputSize>,
    pub timing: Timing,
}

/// Trials per thread count, ascending.
pub type TrialsByThreads = BTreeMap<ThreadCount, Vec<Timing>>;

/// Everything collected from one results directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregate {
    /// Baselines in file-encounter order.
    pub sequential: Vec<SequentialRecord>,
    /// size -> threads -> trials (encounter order).
    pub parallel: BTreeMap<InputSize, TrialsByThreads>,
}

impl Aggregate {
    /// Every configured (size, threads) pair starts with an empty trial list.
    pub fn seeded(config: &BenchConfig) -> Self {
        let parallel = config
            .input_sizes
            .iter()
            .map(|&size| {
                let by_threads = config
                    .thread_counts
                    .iter()
                    .map(|&threads| (threads, Vec::new()))
                    .collect();
                (size, by_threads)
            })
            .collect();
        Self {
            sequential: Vec::new(),
            parallel,
        }
    }

    pub fn record_sequential(&mut self, record: SequentialRecord) {
        self.sequential.push(record);
    }

    pub fn record_parallel(&mut self, size: InputSize, threads: ThreadCount, timing: Timing) {
        self.parallel
            .entry(size)
            .or_default()
            .entry(threads)
            .or_default()
            .push(timing);
    }

    pub fn trials(&self, size: InputSize, threads: ThreadCount) -> &[Timing] {
        self.parallel
            .get(&size)
            .and_then(|by_threads| by_threads.get(&threads))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn parallel_count(&self, size: InputSize) -> usize {
        self.parallel
            .get(&size)
            .map(|by_threads| by_threads.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sequential.is_empty() && self.parallel.values().all(|t| t.values().all(Vec::is_empty))
    }
}

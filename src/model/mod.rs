//! Aggregation model: match baselines to input sizes and derive speedups.

use crate::config::{BenchConfig, InputSize, ThreadCount, Timing};
use crate::error::{Error, Result};
use crate::logs::{Aggregate, SequentialRecord};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

/// Baseline followed by every parallel trial (thread count ascending, then trial order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub size: InputSize,
    pub values: Vec<Timing>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedupPoint {
    pub threads: ThreadCount,
    pub speedup: f64,
}

/// One point per parallel trial, in the same order as the summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupSeries {
    pub size: InputSize,
    pub points: Vec<SpeedupPoint>,
}

/// How baselines were paired with input sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineMatch {
    /// Every sequential log is named `sequential <size>.txt`.
    ByName,
    /// Timings sorted ascending and paired with sizes in order.
    ByPosition,
}

impl fmt::Display for BaselineMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineMatch::ByName => write!(f, "by file name"),
            BaselineMatch::ByPosition => write!(f, "by sorted position"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baselines {
    pub matching: BaselineMatch,
    /// One timing per configured input size, in size order.
    pub timings: Vec<Timing>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub baseline_match: BaselineMatch,
    pub thread_counts: Vec<ThreadCount>,
    pub rows: Vec<SummaryRow>,
    pub series: Vec<SpeedupSeries>,
}

impl Report {
    /// Rows as a nested list literal, e.g. `[[100, 50], [200, 40]]`.
    pub fn summary_literal(&self) -> String {
        let rows: Vec<&Vec<Timing>> = self.rows.iter().map(|r| &r.values).collect();
        format!("{:?}", rows)
    }
}

/// Pair each configured input size with its baseline timing.
///
/// When every sequential log names its size (`sequential <size>.txt`) the pairing
/// is by name. Otherwise the timings are sorted ascending and matched to the
/// sizes by position, which assumes baselines grow with input size.
pub fn resolve_baselines(sequential: &[SequentialRecord], sizes: &[InputSize]) -> Result<Baselines> {
    let all_sized = !sequential.is_empty() && sequential.iter().all(|r| r.size.is_some());
    let baselines = if all_sized {
        Baselines {
            matching: BaselineMatch::ByName,
            timings: resolve_by_name(sequential, sizes)?,
        }
    } else {
        if sequential.iter().any(|r| r.size.is_some()) {
            warn!("some sequential logs carry no input size; matching all baselines by sorted position");
        }
        Baselines {
            matching: BaselineMatch::ByPosition,
            timings: resolve_by_position(sequential, sizes)?,
        }
    };
    Ok(baselines)
}

fn resolve_by_position(sequential: &[SequentialRecord], sizes: &[InputSize]) -> Result<Vec<Timing>> {
    let mut timings: Vec<Timing> = sequential.iter().map(|r| r.timing).collect();
    timings.sort_unstable();

    if timings.len() < sizes.len() {
        return Err(Error::MissingBaseline {
            reason: format!(
                "found {} sequential logs for {} input sizes",
                timings.len(),
                sizes.len()
            ),
        });
    }
    if timings.len() > sizes.len() {
        warn!(
            "ignoring {} surplus sequential timings (largest: {:?})",
            timings.len() - sizes.len(),
            &timings[sizes.len()..]
        );
        timings.truncate(sizes.len());
    }
    Ok(timings)
}

fn resolve_by_name(sequential: &[SequentialRecord], sizes: &[InputSize]) -> Result<Vec<Timing>> {
    let mut by_size: BTreeMap<InputSize, &SequentialRecord> = BTreeMap::new();
    for record in sequential {
        let Some(size) = record.size else { continue };
        if let Some(prev) = by_size.insert(size, record) {
            return Err(Error::DuplicateBaseline {
                size,
                first: prev.file.clone(),
                second: record.file.clone(),
            });
        }
    }

    sizes
        .iter()
        .map(|size| {
            by_size
                .get(size)
                .map(|r| r.timing)
                .ok_or_else(|| Error::MissingBaseline {
                    reason: format!("no sequential log for input size {}", size),
                })
        })
        .collect()
}

/// Build summary rows and speedup series for every configured input size.
///
/// Every configured (size, threads) pair must have at least one non-zero trial.
pub fn build_report(aggregate: Aggregate, config: &BenchConfig) -> Result<Report> {
    let baselines = resolve_baselines(&aggregate.sequential, &config.input_sizes)?;

    let mut rows = Vec::with_capacity(config.input_sizes.len());
    let mut series = Vec::with_capacity(config.input_sizes.len());

    for (&size, &baseline) in config.input_sizes.iter().zip(&baselines.timings) {
        let mut values = vec![baseline];
        let mut points = Vec::new();

        for &threads in &config.thread_counts {
            let trials = aggregate.trials(size, threads);
            if trials.is_empty() {
                return Err(Error::ZeroOrMissingDenominator {
                    size,
                    threads,
                    reason: "no parallel trials recorded",
                });
            }
            for &timing in trials {
                if timing == 0 {
                    return Err(Error::ZeroOrMissingDenominator {
                        size,
                        threads,
                        reason: "parallel timing is zero",
                    });
                }
                values.push(timing);
                points.push(SpeedupPoint {
                    threads,
                    speedup: baseline as f64 / timing as f64,
                });
            }
        }

        debug!(
            "size {}: baseline {}, {} parallel trials",
            size,
            baseline,
            points.len()
        );
        rows.push(SummaryRow { size, values });
        series.push(SpeedupSeries { size, points });
    }

    Ok(Report {
        title: config.title.clone(),
        baseline_match: baselines.matching,
        thread_counts: config.thread_counts.clone(),
        rows,
        series,
    })
}

use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::logs::parse::{classify, extract};
use crate::logs::row::{Aggregate, LogEntry, LogKind, SequentialRecord};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Builds an `Aggregate` one file at a time.
pub struct Collector<'a> {
    config: &'a BenchConfig,
    aggregate: Aggregate,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a BenchConfig) -> Self {
        Self {
            config,
            aggregate: Aggregate::seeded(config),
        }
    }

    /// Classify `file`, read it only if it is a results file, and record its timing.
    pub fn add<F>(&mut self, file: &str, read: &mut F) -> Result<()>
    where
        F: FnMut(&str) -> io::Result<String>,
    {
        let kind = classify(file)?;
        if kind == LogKind::Unrecognized {
            debug!("skipping unrecognized file {:?}", file);
            return Ok(());
        }

        let text = read(file).map_err(|source| {
            if source.kind() == io::ErrorKind::InvalidData {
                // Not UTF-8 text, so there is no timing line to parse.
                Error::MalformedContent {
                    file: file.to_string(),
                    line: timing_line(kind),
                    value: None,
                }
            } else {
                Error::Io {
                    file: file.to_string(),
                    source,
                }
            }
        })?;

        match extract(kind, file, &text)? {
            LogEntry::Sequential { size, timing } => {
                if let Some(size) = size {
                    self.check_size(file, size)?;
                }
                debug!("{:?}: sequential timing {}", file, timing);
                self.aggregate.record_sequential(SequentialRecord {
                    file: file.to_string(),
                    size,
                    timing,
                });
            }
            LogEntry::Parallel {
                size,
                threads,
                timing,
            } => {
                self.check_size(file, size)?;
                if !self.config.contains_threads(threads) {
                    return Err(Error::UnknownConfiguration {
                        file: file.to_string(),
                        what: "thread count",
                        value: threads,
                    });
                }
                debug!(
                    "{:?}: parallel timing {} (size {}, {} threads)",
                    file, timing, size, threads
                );
                self.aggregate.record_parallel(size, threads, timing);
            }
            LogEntry::Unrecognized => {}
        }
        Ok(())
    }

    /// Feed every name through `add` and hand back the finished aggregate.
    pub fn collect<I, S, F>(mut self, files: I, mut read: F) -> Result<Aggregate>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&str) -> io::Result<String>,
    {
        for file in files {
            self.add(file.as_ref(), &mut read)?;
        }
        Ok(self.finish())
    }

    pub fn finish(self) -> Aggregate {
        self.aggregate
    }

    fn check_size(&self, file: &str, size: u32) -> Result<()> {
        if self.config.contains_size(size) {
            Ok(())
        } else {
            Err(Error::UnknownConfiguration {
                file: file.to_string(),
                what: "input size",
                value: size,
            })
        }
    }
}

fn timing_line(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Parallel { .. } => "last",
        _ => "first",
    }
}

/// Collect every results file directly inside `dir`.
///
/// Names are visited in sorted order so repeated runs see the same trial order.
pub fn collect_dir(dir: &Path, config: &BenchConfig) -> Result<Aggregate> {
    let dir_err = |source| Error::Io {
        file: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => debug!("skipping non UTF-8 file name {:?}", name),
        }
    }
    files.sort();

    let aggregate =
        Collector::new(config).collect(&files, |file: &str| fs::read_to_string(dir.join(file)))?;

    if aggregate.is_empty() {
        warn!("no sequential or parallel logs found in {}", dir.display());
    }
    info!(
        "collected {} sequential and {} parallel timings from {}",
        aggregate.sequential.len(),
        config
            .input_sizes
            .iter()
            .map(|&size| aggregate.parallel_count(size))
            .sum::<usize>(),
        dir.display()
    );
    Ok(aggregate)
}

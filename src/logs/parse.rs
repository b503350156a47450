use crate::config::{InputSize, ThreadCount, Timing};
use crate::error::{Error, Result};
use crate::logs::row::{LogEntry, LogKind};
use regex::Regex;
use std::sync::LazyLock;

const SEQUENTIAL_PREFIX: &str = "sequential";
const PARALLEL_PREFIX: &str = "parallel";

// The driver writes `sequential <size>.txt`; other sequential names carry no size.
static SEQUENTIAL_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sequential (\d+)\.txt$").unwrap());

/// Classify a results file by name alone.
///
/// Expected names:
/// sequential <size>.txt      (any other `sequential...` name is accepted without a size)
/// parallel <size> <threads>.txt
///
/// Names with neither prefix are `Unrecognized`, not an error.
pub fn classify(file: &str) -> Result<LogKind> {
    if file.starts_with(SEQUENTIAL_PREFIX) {
        let size = match SEQUENTIAL_SIZE_RE.captures(file) {
            Some(caps) => Some(caps[1].parse::<InputSize>().map_err(|_| {
                Error::MalformedFileName {
                    file: file.to_string(),
                    reason: format!("bad input size {:?}", &caps[1]),
                }
            })?),
            None => None,
        };
        return Ok(LogKind::Sequential { size });
    }
    if file.starts_with(PARALLEL_PREFIX) {
        let (size, threads) = parse_parallel_name(file)?;
        return Ok(LogKind::Parallel { size, threads });
    }
    Ok(LogKind::Unrecognized)
}

/// Parse "parallel 64 8.txt" into (64, 8).
fn parse_parallel_name(file: &str) -> Result<(InputSize, ThreadCount)> {
    let malformed = |reason: String| Error::MalformedFileName {
        file: file.to_string(),
        reason,
    };

    let rest = file
        .strip_prefix("parallel ")
        .and_then(|s| s.strip_suffix(".txt"))
        .ok_or_else(|| malformed("expected `parallel <size> <threads>.txt`".to_string()))?;

    let tokens: Vec<&str> = rest.split(' ').collect();
    let [size, threads] = tokens.as_slice() else {
        return Err(malformed(format!(
            "expected 2 space-separated tokens, found {}",
            tokens.len()
        )));
    };

    let size = size
        .parse::<InputSize>()
        .map_err(|_| malformed(format!("bad input size {:?}", size)))?;
    let threads = threads
        .parse::<ThreadCount>()
        .map_err(|_| malformed(format!("bad thread count {:?}", threads)))?;
    Ok((size, threads))
}

/// Timing on the first line (sequential logs).
pub fn first_line_timing(file: &str, text: &str) -> Result<Timing> {
    parse_timing(file, "first", text.lines().next())
}

/// Timing on the last line (parallel logs put per-phase lines before the total).
pub fn last_line_timing(file: &str, text: &str) -> Result<Timing> {
    parse_timing(file, "last", text.lines().last())
}

fn parse_timing(file: &str, which: &'static str, line: Option<&str>) -> Result<Timing> {
    let malformed = |value: Option<&str>| Error::MalformedContent {
        file: file.to_string(),
        line: which,
        value: value.map(str::to_string),
    };
    let line = line.ok_or_else(|| malformed(None))?;
    line.trim().parse::<Timing>().map_err(|_| malformed(Some(line)))
}

/// Pull the timing out of a classified file's content.
pub fn extract(kind: LogKind, file: &str, text: &str) -> Result<LogEntry> {
    Ok(match kind {
        LogKind::Sequential { size } => LogEntry::Sequential {
            size,
            timing: first_line_timing(file, text)?,
        },
        LogKind::Parallel { size, threads } => LogEntry::Parallel {
            size,
            threads,
            timing: last_line_timing(file, text)?,
        },
        LogKind::Unrecognized => LogEntry::Unrecognized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_by_prefix() {
        assert_eq!(
            classify("sequential 64.txt").unwrap(),
            LogKind::Sequential { size: Some(64) }
        );
        assert_eq!(
            classify("sequential_a.txt").unwrap(),
            LogKind::Sequential { size: None }
        );
        assert_eq!(
            classify("parallel 32 2.txt").unwrap(),
            LogKind::Parallel {
                size: 32,
                threads: 2
            }
        );
        assert_eq!(classify("psrs 32 4.txt").unwrap(), LogKind::Unrecognized);
        assert_eq!(classify(".DS_Store").unwrap(), LogKind::Unrecognized);
    }

    #[test]
    fn missing_thread_token_is_malformed_name() {
        let err = classify("parallel 32.txt").unwrap_err();
        assert!(
            matches!(&err, Error::MalformedFileName { file, .. } if file == "parallel 32.txt"),
            "{err:?}"
        );
    }

    #[test]
    fn oversized_sequential_size_is_malformed_name() {
        let err = classify("sequential 99999999999.txt").unwrap_err();
        match err {
            Error::MalformedFileName { file, reason } => {
                assert_eq!(file, "sequential 99999999999.txt");
                assert!(reason.contains("99999999999"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_bad_parallel_names() {
        for name in [
            "parallel 32 2 1.txt",
            "parallel 32  2.txt",
            "parallel x 2.txt",
            "parallel 32 2.log",
            "parallel.txt",
        ] {
            assert!(
                matches!(classify(name), Err(Error::MalformedFileName { .. })),
                "{name}"
            );
        }
    }

    #[test]
    fn parallel_timing_comes_from_last_line() {
        let text = "p.0: 11\np.1: 12\np.2: 13\np.3: 14\np.4: 15\np.5: 16\n81\n";
        assert_eq!(last_line_timing("parallel 32 2.txt", text).unwrap(), 81);
        assert_eq!(last_line_timing("f", "5\n50").unwrap(), 50);
    }

    #[test]
    fn sequential_timing_comes_from_first_line() {
        assert_eq!(first_line_timing("f", "100\nignored\n").unwrap(), 100);
        assert_eq!(first_line_timing("f", " 100 \r\n").unwrap(), 100);
    }

    #[test]
    fn non_integer_last_line_is_malformed_content() {
        let err = last_line_timing("parallel 32 2.txt", "5\nabc\n").unwrap_err();
        match err {
            Error::MalformedContent { file, line, value } => {
                assert_eq!(file, "parallel 32 2.txt");
                assert_eq!(line, "last");
                assert_eq!(value.as_deref(), Some("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_malformed_content() {
        assert!(matches!(
            first_line_timing("sequential 32.txt", ""),
            Err(Error::MalformedContent { value: None, .. })
        ));
        assert!(matches!(
            last_line_timing("parallel 32 2.txt", ""),
            Err(Error::MalformedContent { value: None, .. })
        ));
    }

    #[test]
    fn extract_keeps_classification() {
        let kind = classify("parallel 64 8.txt").unwrap();
        assert_eq!(
            extract(kind, "parallel 64 8.txt", "1\n2\n3").unwrap(),
            LogEntry::Parallel {
                size: 64,
                threads: 8,
                timing: 3
            }
        );
        assert_eq!(
            extract(LogKind::Unrecognized, "notes.md", "").unwrap(),
            LogEntry::Unrecognized
        );
    }
}

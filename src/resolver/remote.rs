//! Fetching wheels from the package index
//!
//! The index is reached through the [`WheelFetcher`] trait so the resolver
//! never depends on a particular download tool. Remote fetches are the only
//! parallel work in a build; they run on a bounded rayon pool and come back
//! in declaration order.

use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;

use crate::error::{Result, fs};
use crate::progress::FetchProgress;

/// Default number of concurrent downloads
pub const DEFAULT_JOBS: usize = 4;

/// Failure reported by a [`WheelFetcher`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("no matching distribution found for '{requirement}'")]
    NotFound { requirement: String },

    #[error("network failure: {message}")]
    Network { message: String },
}

/// Downloads a single wheel for a requirement
pub trait WheelFetcher: Send + Sync {
    /// Fetch the wheel for `name` with an optional version constraint and
    /// return its local path
    fn fetch(&self, name: &str, constraint: Option<&str>) -> std::result::Result<PathBuf, FetchError>;
}

/// One queued download
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub name: &'a str,
    pub constraint: Option<&'a str>,
}

/// Run all requests on a pool of `jobs` threads
///
/// The returned vector is index-aligned with `requests`, whatever order the
/// downloads finish in.
pub fn fetch_all(
    fetcher: &dyn WheelFetcher,
    requests: &[FetchRequest<'_>],
    jobs: usize,
    progress: &FetchProgress,
) -> Result<Vec<std::result::Result<PathBuf, FetchError>>> {
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .thread_name(|i| format!("pychub-fetch-{}", i))
        .build()
        .map_err(|e| fs::io_error(format!("Failed to start download pool: {}", e)))?;

    let results = pool.install(|| {
        requests
            .par_iter()
            .map(|request| {
                progress.started(request.name);
                let result = fetcher.fetch(request.name, request.constraint);
                match &result {
                    Ok(path) => tracing::debug!(
                        name = request.name,
                        path = %path.display(),
                        "Fetched wheel"
                    ),
                    Err(e) => tracing::debug!(name = request.name, error = %e, "Fetch failed"),
                }
                progress.finished();
                result
            })
            .collect()
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Sleeps longer for earlier requests so completion order is reversed
    struct SlowFirstFetcher {
        total: usize,
        calls: AtomicUsize,
    }

    impl WheelFetcher for SlowFirstFetcher {
        fn fetch(
            &self,
            name: &str,
            _constraint: Option<&str>,
        ) -> std::result::Result<PathBuf, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index: usize = name.trim_start_matches("pkg").parse().unwrap_or(0);
            std::thread::sleep(Duration::from_millis(((self.total - index) * 10) as u64));
            if name == "pkg2" {
                return Err(FetchError::NotFound {
                    requirement: name.to_string(),
                });
            }
            Ok(PathBuf::from(format!("{}-1.0-py3-none-any.whl", name)))
        }
    }

    #[test]
    fn test_fetch_all_preserves_order() {
        let names: Vec<String> = (0..6).map(|i| format!("pkg{}", i)).collect();
        let requests: Vec<FetchRequest<'_>> = names
            .iter()
            .map(|n| FetchRequest {
                name: n,
                constraint: None,
            })
            .collect();
        let fetcher = SlowFirstFetcher {
            total: names.len(),
            calls: AtomicUsize::new(0),
        };

        let results = fetch_all(&fetcher, &requests, 3, &FetchProgress::hidden()).unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 6);
        assert_eq!(results.len(), 6);
        for (i, result) in results.iter().enumerate() {
            if i == 2 {
                assert!(matches!(result, Err(FetchError::NotFound { .. })));
            } else {
                assert_eq!(
                    result.as_ref().unwrap(),
                    &PathBuf::from(format!("pkg{}-1.0-py3-none-any.whl", i))
                );
            }
        }
    }

    #[test]
    fn test_fetch_all_empty() {
        let fetcher = SlowFirstFetcher {
            total: 0,
            calls: AtomicUsize::new(0),
        };
        let results = fetch_all(&fetcher, &[], 4, &FetchProgress::hidden()).unwrap();
        assert!(results.is_empty());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}

pub mod python;

use crate::core::ComplexityMetrics;
use crate::errors::Result;

pub use python::PythonComplexityEstimator;

/// Per-file complexity estimation, dispatched on the file's extension.
///
/// Only Python is parsed structurally; every other language yields the empty
/// record.
pub struct ComplexityEstimator {
    python: PythonComplexityEstimator,
}

impl ComplexityEstimator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            python: PythonComplexityEstimator::new()?,
        })
    }

    pub fn supports(path: &str) -> bool {
        path.ends_with(".py")
    }

    pub fn estimate_file(&mut self, path: &str, source: &str) -> ComplexityMetrics {
        if Self::supports(path) {
            self.python.estimate(source)
        } else {
            ComplexityMetrics::empty()
        }
    }
}

/// One-shot Python estimate with a fresh parser.
pub fn estimate(source: &str) -> ComplexityMetrics {
    match PythonComplexityEstimator::new() {
        Ok(mut estimator) => estimator.estimate(source),
        Err(e) => {
            tracing::warn!("Python parser unavailable: {}", e);
            ComplexityMetrics::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_python_files_get_empty_record() {
        let mut estimator = ComplexityEstimator::new().unwrap();
        let metrics = estimator.estimate_file("index.js", "function f() { if (x) {} }");
        assert!(metrics.is_empty());
    }

    #[test]
    fn test_python_dispatch() {
        let mut estimator = ComplexityEstimator::new().unwrap();
        let metrics = estimator.estimate_file("pkg/mod.py", "def f():\n    return 1\n");
        assert_eq!(metrics.function_count, Some(1));
    }

    #[test]
    fn test_supports_only_python() {
        assert!(ComplexityEstimator::supports("a/b.py"));
        assert!(!ComplexityEstimator::supports("a/b.pyc"));
        assert!(!ComplexityEstimator::supports("setup.cfg"));
    }
}

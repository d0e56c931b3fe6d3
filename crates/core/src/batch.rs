//! Sequential batch processing with consistent error reporting.

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::error;

/// Result of a batch operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if self.failed > 0 {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Run `op` on every file in order. A failing file does not stop the batch.
///
/// `op` returns `Ok(false)` for a soft failure that was already reported.
pub fn run_batch<T, F>(label: &str, items: &[T], mut op: F) -> BatchResult
where
    T: AsRef<Path>,
    F: FnMut(&Path) -> Result<bool>,
{
    let mut result = BatchResult::default();
    for item in items {
        let path = item.as_ref();
        match op(path).with_context(|| format!("Failed to process {}", path.display())) {
            Ok(ok) => result.record(ok),
            Err(e) => {
                error!("{e:?}");
                result.failed += 1;
            }
        }
    }

    println!("{label}: {} succeeded, {} failed", result.succeeded, result.failed);
    result
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let mut seen = Vec::new();
        let result = run_batch("test", &["a.sfd", "b.sfd", "c.sfd"], |path| {
            seen.push(path.to_path_buf());
            match path.to_str() {
                Some("a.sfd") => Err(anyhow!("boom")),
                Some("b.sfd") => Ok(false),
                _ => Ok(true),
            }
        });

        assert_eq!(seen.len(), 3);
        assert_eq!(result, BatchResult { succeeded: 1, failed: 2 });
        assert_eq!(result.total(), 3);
        assert!(!result.all_succeeded());
        assert!(result.ok_or_bail("test").is_err());
    }

    #[test]
    fn test_empty_batch_succeeds() {
        let result = run_batch::<&str, _>("test", &[], |_| Ok(true));
        assert!(result.all_succeeded());
        assert!(result.ok_or_bail("test").is_ok());
    }
}

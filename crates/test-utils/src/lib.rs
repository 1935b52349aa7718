//! Test support for the noise grid workspace.
//!
//! - [`fixtures`]: lattices, the 1971-2010 reference period, survey points
//! - [`generators`]: synthetic noise fields written as Envira files
//! - [`paths`]: committed test grids and scratch directories
//!
//! Used as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Route `tracing` output through the test harness.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`, so extrapolation
/// warnings show up in failing tests. Only the first call in a test binary
/// installs the subscriber.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Resolve a committed grid file or skip the current test.
///
/// Expands to the file's `PathBuf`. When [`find_test_file`] finds nothing the
/// enclosing test prints a notice and returns early.
///
/// ```ignore
/// #[test]
/// fn test_lnight_peak() {
///     let path = test_utils::require_test_file!("GP2018 - Lnight y2016.dat");
///     let grid = Grid::load_one(path).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "skipping: grid file '{}' not found in crates/*/testdata or ${}",
                    $name,
                    $crate::TEST_DATA_ENV
                );
                return;
            }
        }
    }};
}

/// Assert that two levels differ by at most `epsilon`.
///
/// NaN on either side always fails.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(58.0004, 58.0, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon): (f64, f64, f64) = ($left, $right, $epsilon);
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "levels differ: {} vs {} (diff {} > {})",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_within_tolerance() {
        assert_approx_eq!(50.0 + 10.0 * 2.0f64.log10(), 53.0103, 1e-4);
        assert_approx_eq!(-0.5, -0.5000001, 1e-6);
    }

    #[test]
    #[should_panic(expected = "levels differ")]
    fn test_assert_approx_eq_outside_tolerance() {
        assert_approx_eq!(58.4, 58.0, 0.1);
    }

    #[test]
    #[should_panic(expected = "levels differ")]
    fn test_assert_approx_eq_nan() {
        assert_approx_eq!(f64::NAN, 58.0, 1.0);
    }

    #[test]
    fn test_init_test_logging_twice() {
        super::init_test_logging();
        super::init_test_logging();
    }
}

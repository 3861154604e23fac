/// Checks that a numerical value is in the provided interval `[a,b]` and returns
/// early with [`Error::InvalidConfiguration`](crate::error::Error::InvalidConfiguration) if not
///
/// NaN is never in the interval.
///
/// ### Example
/// ```
/// # use rl_harness::{ensure_interval, error::Result};
/// fn check(epsilon: f64) -> Result<()> {
///     ensure_interval!(epsilon, 0.0, 1.0);
///     Ok(())
/// }
/// assert!(check(0.5).is_ok());
/// assert!(check(2.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::error::Error::InvalidConfiguration {
                name: stringify!($var).to_string(),
                reason: format!(
                    "Must be in the interval [{}, {}], got {}.",
                    $a, $b, $var
                ),
            });
        }
    };
}

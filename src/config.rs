//! Printing configuration.

use std::cell::Cell;
use std::fmt;

/// Options controlling how arrays are rendered by `Display`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PrintOptions {
    /// Number of fractional digits printed for floating-point values.
    /// Trailing zeros are trimmed after rounding.
    pub precision: usize,
}

impl PrintOptions {
    /// Options with the given precision.
    pub const fn with_precision(precision: usize) -> Self {
        Self { precision }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self { precision: 8 }
    }
}

impl fmt::Display for PrintOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrintOptions(precision={})", self.precision)
    }
}

thread_local! {
    static PRINT_OPTIONS: Cell<PrintOptions> = Cell::new(PrintOptions::default());
}

/// Current print options of this thread.
///
/// # Examples
///
/// ```
/// # use ndufunc::print_options;
/// assert_eq!(print_options().precision, 8);
/// ```
pub fn print_options() -> PrintOptions {
    PRINT_OPTIONS.with(Cell::get)
}

/// Replace the print options of this thread.
pub fn set_print_options(options: PrintOptions) {
    log::debug!("set {}", options);
    PRINT_OPTIONS.with(|cell| cell.set(options));
}

/// Restores the previous options when dropped, also during unwinding.
struct Restore(PrintOptions);

impl Drop for Restore {
    fn drop(&mut self) {
        PRINT_OPTIONS.with(|cell| cell.set(self.0));
    }
}

/// Run `f` with `options` in effect, then restore the previous options.
///
/// # Examples
///
/// ```
/// # use ndufunc::{with_print_options, Array, PrintOptions};
/// let a = Array::from_vec(vec![1.0 / 3.0], [1]).unwrap();
/// let text = with_print_options(PrintOptions::with_precision(3), || a.to_string());
/// assert_eq!(text, "[0.333]");
/// ```
pub fn with_print_options<R>(options: PrintOptions, f: impl FnOnce() -> R) -> R {
    let _restore = Restore(print_options());
    PRINT_OPTIONS.with(|cell| cell.set(options));
    f()
}

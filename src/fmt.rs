//! `Display` for arrays, in the layout of NumPy's `str`.

use crate::config::print_options;
use crate::{Array, Element};
use std::fmt;

/// Pad formatted elements to a common width.
///
/// Floating-point values are aligned on the decimal point, everything else
/// is right-aligned.
fn align(cells: Vec<String>, decimal: bool) -> Vec<String> {
    if decimal {
        let split = |s: &str| s.find('.').map(|i| (i, s.len() - i - 1));
        let (int_width, frac_width) = cells
            .iter()
            .filter_map(|s| split(s))
            .fold((0, 0), |(iw, fw), (i, f)| (iw.max(i), fw.max(f)));
        let width = int_width + 1 + frac_width;
        return cells
            .iter()
            .map(|s| match split(s) {
                Some((i, f)) => format!(
                    "{}{}{}",
                    " ".repeat(int_width - i),
                    s,
                    " ".repeat(frac_width - f)
                ),
                None => format!("{:>width$}", s, width = width),
            })
            .collect();
    }
    let width = cells.iter().map(String::len).max().unwrap_or(0);
    cells
        .iter()
        .map(|s| format!("{:>width$}", s, width = width))
        .collect()
}

fn render(out: &mut String, dims: &[usize], depth: usize, cells: &[String], pos: &mut usize) {
    let ndim = dims.len();
    let innermost = depth + 1 == ndim;
    out.push('[');
    for i in 0..dims[depth] {
        if i > 0 {
            if innermost {
                out.push(' ');
            } else {
                out.push_str(&"\n".repeat(ndim - depth - 1));
                out.push_str(&" ".repeat(depth + 1));
            }
        }
        if innermost {
            out.push_str(&cells[*pos]);
            *pos += 1;
        } else {
            render(out, dims, depth + 1, cells, pos);
        }
    }
    out.push(']');
}

impl<T: Element> fmt::Display for Array<T> {
    /// Nested bracketed rows with elements padded to a common width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ndufunc::Array;
    /// let a = Array::from_vec((0..6).collect::<Vec<i32>>(), [2, 3]).unwrap();
    /// assert_eq!(a.to_string(), "[[0 1 2]\n [3 4 5]]");
    /// let b = Array::from_vec(vec![0.5, 1.0, 2.0], [3]).unwrap();
    /// assert_eq!(b.to_string(), "[0.5 1.  2. ]");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = print_options().precision;
        let cells: Vec<String> = self.iter().map(|v| v.format(precision)).collect();
        if self.ndim() == 0 {
            return f.write_str(&cells[0]);
        }
        if self.size() == 0 {
            return f.write_str("[]");
        }
        let cells = align(cells, T::DTYPE.is_float());
        let mut out = String::new();
        let mut pos = 0;
        render(&mut out, self.shape().as_slice(), 0, &cells, &mut pos);
        f.write_str(&out)
    }
}

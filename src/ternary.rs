/// A compact conditional expression.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads it over five lines, and the
/// boundary tables in the cost matrix and the energy functions (first
/// row, last row, first column, last column) read far better as a
/// column of one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

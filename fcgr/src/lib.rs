pub mod cgr;
pub mod grid;
pub mod matrix;
pub mod ratios;
pub mod sequence;

#[doc(hidden)]
pub mod _internal_test_data;

pub(crate) mod centers;
pub(crate) mod compute;
pub(crate) mod ratios;

// Domain layer: lookup models and the fetcher port.

pub mod model;
pub mod ports;

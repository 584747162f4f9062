//! ABI infrastructure - alloy-based decoding, constructor encoding, artifact scanning

mod decoder;
mod encoder;
mod scanner;

pub use decoder::{format_dyn_sol_value, AlloyAbiDecoder};
pub use encoder::{coerce_constructor_args, deployment_code};
pub use scanner::ArtifactScanner;

mod errors;
mod gate;
#[cfg(test)]
mod tests;

pub use errors::StartupError;
pub use gate::{run_startup, StartupOutcome};

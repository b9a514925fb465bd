// Infrastructure layer module
// PostgreSQL adapters and the process-local stores

pub mod memory;
pub mod repositories;

// API layer module (adapters for controllers)
// Handlers, middleware and routing over the domain and infrastructure layers

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::router;

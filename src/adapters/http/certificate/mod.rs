//! Certificate HTTP adapter: the gated PDF download.

pub mod handlers;
pub mod routes;

pub use handlers::CertificateAppState;
pub use routes::certificate_routes;

//! PDF rendering adapters.

mod printpdf_renderer;

pub use printpdf_renderer::PrintpdfCertificateRenderer;

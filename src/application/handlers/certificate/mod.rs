//! Certificate issuance handlers.

mod issue_certificate;

pub use issue_certificate::{IssueCertificateCommand, IssueCertificateHandler, IssuedCertificate};

//! QuizCert - Payment-gated quiz certificate issuance service
//!
//! This crate turns an unauthenticated quiz result into a paid,
//! verifiably-issued PDF certificate: the client submits `{name, email,
//! score}`, pays through a hosted Stripe Checkout session, and downloads a
//! certificate once payment is confirmed via webhook or status polling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

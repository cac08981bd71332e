pub mod attestation;
pub mod config;
pub mod score;

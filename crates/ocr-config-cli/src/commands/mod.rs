// Command modules for CLI

/// Build a configuration record from a build file
pub mod build;

/// Recover a shared secret from a built record
pub mod decrypt;

/// Network profile listing
pub mod profiles;

/// Sample oracle identities
pub mod sample;

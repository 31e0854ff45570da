#![doc = include_str!("../README.md")]

pub mod common;
pub use common::*;

/// Generated gRPC bindings for the `routeguide` package.
pub mod proto {
    tonic::include_proto!("routeguide");

    /// Encoded file descriptor set for the `routeguide` package, used to
    /// register gRPC server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("routeguide_descriptor");
}

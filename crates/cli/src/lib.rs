//! Public library modules for the CLI crate
pub mod fs_apply;
pub mod organize;

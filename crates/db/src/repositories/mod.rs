//! Repositories: one zero-sized struct per table, methods take the pool.

pub mod image_repo;

pub use image_repo::ImageRepo;

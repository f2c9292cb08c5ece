// Domain entities.
pub mod asset;
pub mod file_info;
pub mod pipeline;
pub mod task;

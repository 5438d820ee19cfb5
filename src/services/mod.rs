//! External collaborators: metadata readers.

pub mod ffprobe;
pub mod metadata;

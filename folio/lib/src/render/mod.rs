//! Rendering helpers shared by the output modules.

pub mod link;

//! Data models for PoseStudio

mod category;
mod pose;

pub use category::{Category, CategorySummary};
pub use pose::Pose;

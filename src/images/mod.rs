//! Pose image downloads.
//!
//! Saves a pose's image to a local directory, naming the file after the
//! pose and the format sniffed from the downloaded bytes.

mod download;

pub use download::{ImageDownloader, image_file_name};

pub mod archive;
pub mod crypto;
pub mod date;
pub mod digest;
pub mod duration;
pub mod file;
pub mod gzip;
pub mod progression;
pub mod reflect;
pub mod sequence;
pub mod text;

pub use crate::domain::model::{CopyProgress, EntryProgress, Lap, PathParts};
pub use crate::domain::ports::{NoProgress, ProgressListener};
pub use crate::utils::error::Result;

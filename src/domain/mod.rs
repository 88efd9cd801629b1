// Value types and seam traits shared by the core modules.

pub mod model;
pub mod ports;

pub mod hover;
pub mod objectid;
pub mod scan;
pub mod timestamp;

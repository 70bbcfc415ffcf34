pub mod notice;
pub mod summary;

pub use notice::{Notice, NoticeLevel, Notices};
pub use summary::{Summary, PLACEHOLDER};

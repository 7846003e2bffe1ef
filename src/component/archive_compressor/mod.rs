//! 資料夾封存元件
//!
//! 透過 7-Zip 做兩層 tar+gzip 封存，或逐一壓成 zip 並在驗證後刪除來源

mod bulk_zipper;
mod main;
mod seven_zip;
mod tar_gzipper;

pub use bulk_zipper::{BulkZipSummary, BulkZipper, RecoveryChoice};
pub use main::ArchiveCompressor;
pub use seven_zip::{ArchiveFormat, Archiver, SevenZip};
pub use tar_gzipper::{TarGzipSummary, TarGzipper};

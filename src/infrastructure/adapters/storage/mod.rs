//! Storage Adapter - 文件系统资源存储

mod file_asset_store;

pub use file_asset_store::FileAssetStore;

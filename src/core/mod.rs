pub mod batch;
pub mod catalog;
pub mod composer;
pub mod engine;
pub mod pipeline;
pub mod qualifier;
pub mod recommender;
pub mod seed;
pub mod spreadsheet;

pub use crate::domain::model::{BatchReport, BatchRow, RelatedKeywordRecord, SupplyCount};
pub use crate::domain::ports::{
    ConfigProvider, KeywordSource, Pipeline, Recommender, Storage, SupplySource,
};
pub use crate::utils::error::Result;

pub mod etl;
pub mod flatten;
pub mod pipeline;
pub mod serialize;
pub mod translate;

pub use crate::domain::model::{
    Cell, OutputFormat, PageTables, Record, RecordSet, Row, TableGrid,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TableDetector};
pub use crate::utils::error::Result;

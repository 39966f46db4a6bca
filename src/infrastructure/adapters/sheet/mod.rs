//! Sheet Adapter - 表格数据来源实现

mod csv_file_source;
mod csv_rows;
mod http_sheet_client;

pub use csv_file_source::CsvFileSource;
pub use csv_rows::parse_csv;
pub use http_sheet_client::*;

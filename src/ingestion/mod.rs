pub mod reader;
pub mod rejection_log;
pub mod row;

pub use reader::{CsvRowReader, ParsedRow};
pub use rejection_log::RejectionLog;
pub use row::{PlayerRow, RejectedRow, RowRejection};

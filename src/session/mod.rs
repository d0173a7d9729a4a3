pub mod context;
pub mod history;
pub mod notice;
pub mod store;

pub use context::SessionContext;
pub use history::{parse_history_csv, HistoryError, HistoryLog, PredictionRecord, CSV_COLUMNS};
pub use notice::{Notice, NoticeKind, NoticeLevel};
pub use store::{SessionError, SessionStore};

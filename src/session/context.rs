use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::history::HistoryLog;
use super::notice::Notice;
use crate::advice::Condition;
use crate::pipeline::extraction::LabValues;

/// Per-session state handed to every handler by reference.
///
/// Created when a session starts and dropped when it ends; nothing here
/// outlives the session or is shared with another one.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
    history: HistoryLog,
    ocr_values: Option<LabValues>,
    last_condition: Option<Condition>,
    notices: Vec<Notice>,
}

impl SessionContext {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_active: now,
            history: HistoryLog::new(),
            ocr_values: None,
            last_condition: None,
            notices: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// Values recognized by the most recent report scan.
    pub fn ocr_values(&self) -> Option<&LabValues> {
        self.ocr_values.as_ref()
    }

    pub fn set_ocr_values(&mut self, values: LabValues) {
        self.ocr_values = Some(values);
    }

    pub fn last_condition(&self) -> Option<Condition> {
        self.last_condition
    }

    pub fn set_last_condition(&mut self, condition: Condition) {
        self.last_condition = Some(condition);
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Hand all queued notices to the caller, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

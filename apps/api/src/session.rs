use serde::{Deserialize, Serialize};

use crate::progress::models::ProgressRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the follow-up conversation. The remote model is stateless, so
/// the full ordered history is resent on every chat call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Per-session mutable state. There is exactly one session per process;
/// nothing here survives a restart except what the archive holds.
#[derive(Debug, Default)]
pub struct Session {
    /// Markdown of the most recently generated or loaded analysis report.
    pub report: Option<String>,
    /// Follow-up conversation grounded on `report`. Cleared whenever a new
    /// report is generated or an archived one is loaded.
    pub chat_history: Vec<ChatTurn>,
    /// Accumulated progress table built up from CSV/JSON uploads.
    pub table: Vec<ProgressRecord>,
    /// Chart rows the model extracted from the last analyzed work files.
    pub chart: Option<Vec<ProgressRecord>>,
}

impl Session {
    /// Installs a freshly generated report. Chat history restarts from
    /// scratch; the chart rows were already stored by the analysis flow.
    pub fn install_report(&mut self, report: String) {
        self.report = Some(report);
        self.chat_history.clear();
    }

    /// Installs a report loaded from the archive. Archived reports carry no
    /// chart data, so the chart state is dropped along with the chat history.
    pub fn load_archived(&mut self, report: String) {
        self.report = Some(report);
        self.chat_history.clear();
        self.chart = None;
    }
}

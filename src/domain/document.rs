use crate::domain::{
    board::{Board, BoardConfig},
    form::Form,
};
use serde::{Deserialize, Serialize};

/// Everything that is persisted: the form and the board.
///
/// Unknown top-level keys are kept in `extra` so an older or newer build's
/// data is never dropped on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub form: Form,
    #[serde(default)]
    pub lanes: Board,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// What [`Document::repair`] had to fix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repair {
    pub lanes_added: usize,
    pub duplicates_dropped: usize,
}

impl Repair {
    pub fn is_clean(&self) -> bool {
        self.lanes_added == 0 && self.duplicates_dropped == 0
    }
}

impl Document {
    /// Empty form, every configured lane present and empty
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            form: Form::default(),
            lanes: Board::new(config),
            extra: serde_json::Map::new(),
        }
    }

    /// Brings a loaded document up to the configured schema
    pub fn repair(&mut self, config: &BoardConfig) -> Repair {
        Repair {
            lanes_added: self.lanes.ensure_lanes(config),
            duplicates_dropped: self.lanes.dedupe(config),
        }
    }
}

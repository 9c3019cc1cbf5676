//! # Handover Core
//!
//! State model and report rendering for drafting unit-handover reports.
//!
//! Units are placed into named lanes on a board, either from pasted text or
//! by dragging, and the current form and board are rendered into a fixed-format
//! text report. State is written through to a key-value store on every change.
//! Nothing here depends on a particular UI.

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod session;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use config::{ExtractionConfig, HandoverConfig};
pub use domain::{
    board::{Board, BoardConfig, InsertEdge, LaneId, LaneSpec},
    document::Document,
    drag::{DragEvent, DragMachine, MoveRequest},
    extract::{extract, Extractor, SplitPolicy},
    form::{Form, FormField},
    unit::{Unit, UnitId},
};
pub use error::{HandoverError, Result};
pub use report::{build_report, ReportLabels};
pub use session::{Change, ChangeKind, ChangeListener, HandoverSession, Notice};
pub use storage::{DocumentStore, KeyValueStore, MemoryStore};
pub use view::ReportPanel;

#[cfg(feature = "file-storage")]
pub use storage::FileStore;

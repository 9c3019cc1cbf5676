pub mod board;
pub mod document;
pub mod drag;
pub mod extract;
pub mod form;
pub mod unit;

pub use board::{Board, BoardConfig, InsertEdge, LaneId, LaneSpec};
pub use document::{Document, Repair};
pub use drag::{drop_index, DragEvent, DragMachine, DragState, MoveRequest};
pub use extract::{extract, Extractor, SplitPolicy};
pub use form::{Form, FormField};
pub use unit::{Unit, UnitId};

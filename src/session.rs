//! The single owner of the in-memory document.
//!
//! Every mutation runs to completion in one call: change the document, write
//! it through to storage, then notify subscribers.

use crate::{
    clock,
    config::HandoverConfig,
    domain::{Document, FormField, InsertEdge, LaneId, MoveRequest, Unit, UnitId},
    error::{HandoverError, Result},
    report::build_report,
    storage::{DocumentStore, KeyValueStore},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// What a mutation touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Form(FormField),
    UnitsAdded { lane: LaneId, count: usize },
    UnitRemoved(UnitId),
    UnitEdited(UnitId),
    UnitMoved { unit: UnitId, to: LaneId },
    Reset,
}

/// Notification sent to subscribers after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    /// Refresh the report even if its text box has focus.
    /// Set for everything except typing into a text field.
    pub force: bool,
    /// Whether the write to storage landed
    pub persisted: bool,
}

pub trait ChangeListener: Send {
    /// Returns `false` once the listener is gone; it is then dropped.
    fn on_change(&mut self, change: &Change) -> bool;
}

impl ChangeListener for UnboundedSender<Change> {
    fn on_change(&mut self, change: &Change) -> bool {
        self.send(change.clone()).is_ok()
    }
}

/// Non-fatal outcome of adding pasted text, shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added(usize),
    NothingToAdd,
}

pub struct HandoverSession<S> {
    config: HandoverConfig,
    store: DocumentStore<S>,
    doc: Document,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl<S: KeyValueStore> HandoverSession<S> {
    /// Validates the config and loads the stored document
    pub async fn open(config: HandoverConfig, store: S) -> Result<Self> {
        config.validate()?;
        let store = DocumentStore::new(store, config.storage_key.clone(), config.board.clone());
        let doc = store.load().await;
        info!(
            key = %config.storage_key,
            lanes = config.board.lanes.len(),
            units = doc.lanes.unit_count(),
            "opened handover session"
        );

        Ok(Self {
            config,
            store,
            doc,
            listeners: Vec::new(),
        })
    }

    pub fn config(&self) -> &HandoverConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    /// The report for the current state
    pub fn report(&self) -> String {
        build_report(&self.doc, &self.config.board, &self.config.labels)
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Subscribes through a channel and returns its receiving end
    pub fn subscribe_channel(&mut self) -> UnboundedReceiver<Change> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribe(tx);
        rx
    }

    fn check_lane(&self, lane: &LaneId) -> Result<()> {
        if self.config.board.contains(lane) {
            Ok(())
        } else {
            Err(HandoverError::UnknownLane(lane.to_string()))
        }
    }

    async fn commit(&mut self, kind: ChangeKind, force: bool) {
        let persisted = self.store.save(&self.doc).await;
        self.notify(kind, force, persisted);
    }

    fn notify(&mut self, kind: ChangeKind, force: bool, persisted: bool) {
        let change = Change {
            kind,
            force,
            persisted,
        };
        let before = self.listeners.len();
        self.listeners.retain_mut(|listener| listener.on_change(&change));
        if self.listeners.len() < before {
            debug!(dropped = before - self.listeners.len(), "dropped closed listeners");
        }
    }

    /// Splits pasted text into codes and adds them to a lane
    pub async fn add_extracted(&mut self, lane: &LaneId, raw: &str) -> Result<Notice> {
        self.check_lane(lane)?;
        let codes = self.config.extraction.extractor().extract(raw);
        if codes.is_empty() {
            debug!(%lane, "nothing to add from pasted text");
            return Ok(Notice::NothingToAdd);
        }

        let count = self.add_units(lane, codes).await?.len();
        Ok(Notice::Added(count))
    }

    /// Adds already-split codes at the configured edge
    /// An empty batch changes nothing and notifies nobody.
    pub async fn add_units(&mut self, lane: &LaneId, codes: Vec<String>) -> Result<Vec<UnitId>> {
        self.check_lane(lane)?;
        if codes.is_empty() {
            return Ok(Vec::new());
        }
        let ids = self
            .doc
            .lanes
            .add_units(lane, codes, self.config.extraction.insert)?;
        debug!(%lane, count = ids.len(), "added units");

        let kind = ChangeKind::UnitsAdded {
            lane: lane.clone(),
            count: ids.len(),
        };
        self.commit(kind, true).await;
        Ok(ids)
    }

    /// Adds a blank card at the top of a lane, ready for typing
    pub async fn add_empty_unit(&mut self, lane: &LaneId) -> Result<UnitId> {
        self.check_lane(lane)?;
        let id = self.doc.lanes.add_empty_unit(lane, InsertEdge::Prepend)?;
        debug!(%lane, unit = %id, "added empty unit");

        let kind = ChangeKind::UnitsAdded {
            lane: lane.clone(),
            count: 1,
        };
        self.commit(kind, true).await;
        Ok(id)
    }

    /// Removes a unit. A stale id changes nothing and persists nothing.
    pub async fn remove_unit(&mut self, id: &UnitId) -> Option<Unit> {
        let removed = self.doc.lanes.remove_unit(id)?;
        debug!(unit = %id, "removed unit");
        self.commit(ChangeKind::UnitRemoved(id.clone()), true).await;
        Some(removed)
    }

    /// Edits a unit's text while the user types
    pub async fn set_unit_text(&mut self, id: &UnitId, text: &str) -> bool {
        if !self.doc.lanes.set_unit_text(id, text) {
            return false;
        }
        self.commit(ChangeKind::UnitEdited(id.clone()), false).await;
        true
    }

    /// Moves a unit to a position in a lane; see [`crate::domain::Board::move_unit`]
    pub async fn move_unit(
        &mut self,
        id: &UnitId,
        from: &LaneId,
        to: &LaneId,
        index: Option<usize>,
    ) -> Result<bool> {
        self.check_lane(from)?;
        self.check_lane(to)?;
        if !self.doc.lanes.move_unit(id, from, to, index)? {
            return Ok(false);
        }
        debug!(unit = %id, %from, %to, ?index, "moved unit");

        let kind = ChangeKind::UnitMoved {
            unit: id.clone(),
            to: to.clone(),
        };
        self.commit(kind, true).await;
        Ok(true)
    }

    /// The quick-move sheet: sends a unit to the top of another lane
    pub async fn quick_move(&mut self, id: &UnitId, from: &LaneId, to: &LaneId) -> Result<bool> {
        if from == to {
            self.check_lane(from)?;
            return Ok(false);
        }
        self.move_unit(id, from, to, Some(0)).await
    }

    /// Applies the result of a finished drag
    pub async fn apply_drop(&mut self, request: MoveRequest) -> Result<bool> {
        self.move_unit(&request.unit, &request.from, &request.to, request.index)
            .await
    }

    /// Updates a form field while the user types
    pub async fn set_field(&mut self, field: FormField, value: &str) {
        self.doc.form.set(field, value);
        self.commit(ChangeKind::Form(field), false).await;
    }

    async fn stamp(&mut self, field: FormField) -> String {
        let now = clock::now_clock_time();
        self.doc.form.set(field, now.clone());
        debug!(%field, time = %now, "stamped time");
        self.commit(ChangeKind::Form(field), true).await;
        now
    }

    /// Sets the receive time to the current local time
    pub async fn stamp_receive_time(&mut self) -> String {
        self.stamp(FormField::RecvTime).await
    }

    /// Sets the handover time to the current local time
    pub async fn stamp_handover_time(&mut self) -> String {
        self.stamp(FormField::HandoverTime).await
    }

    /// Clears the form and every lane, and removes the stored document
    pub async fn reset(&mut self) {
        self.doc = self.store.default_document();
        let persisted = self.store.clear().await;
        info!(key = %self.config.storage_key, persisted, "reset handover document");
        self.notify(ChangeKind::Reset, true, persisted);
    }
}

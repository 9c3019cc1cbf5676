//! Drag-and-drop interaction as a small state machine.
//!
//! The presentation layer feeds pointer events in; a completed drop comes out
//! as a [`MoveRequest`] that the session applies to the board.

use crate::domain::{board::LaneId, unit::UnitId};

/// A move produced by a completed drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub unit: UnitId,
    pub from: LaneId,
    pub to: LaneId,
    /// Position in the target lane, counted without the dragged unit
    pub index: Option<usize>,
}

/// Current hover target while dragging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    pub lane: LaneId,
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        unit: UnitId,
        source: LaneId,
        hover: Option<Hover>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    PointerDown { unit: UnitId, lane: LaneId },
    PointerOverLane { lane: LaneId, index: Option<usize> },
    Drop,
    Cancel,
}

impl DragEvent {
    /// Builds a hover event from the pointer position and the vertical
    /// midpoints of the target lane's cards, in lane order and without the
    /// dragged card itself.
    pub fn over_lane(lane: LaneId, midpoints: &[f64], pointer_y: f64) -> Self {
        Self::PointerOverLane {
            lane,
            index: Some(drop_index(midpoints, pointer_y)),
        }
    }
}

/// Insertion index for a drop at `pointer_y`.
///
/// Inserts before the first card whose midpoint lies below the pointer, or
/// at the end when none does.
pub fn drop_index(midpoints: &[f64], pointer_y: f64) -> usize {
    midpoints
        .iter()
        .position(|&mid| pointer_y < mid)
        .unwrap_or(midpoints.len())
}

#[derive(Debug, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Advances the machine. Returns a move only for a drop onto a lane.
    pub fn handle(&mut self, event: DragEvent) -> Option<MoveRequest> {
        match event {
            DragEvent::PointerDown { unit, lane } => {
                self.state = DragState::Dragging {
                    unit,
                    source: lane,
                    hover: None,
                };
                None
            }
            DragEvent::PointerOverLane { lane, index } => {
                if let DragState::Dragging { hover, .. } = &mut self.state {
                    *hover = Some(Hover { lane, index });
                }
                None
            }
            DragEvent::Drop => match std::mem::take(&mut self.state) {
                DragState::Dragging {
                    unit,
                    source,
                    hover: Some(hover),
                } => Some(MoveRequest {
                    unit,
                    from: source,
                    to: hover.lane,
                    index: hover.index,
                }),
                _ => None,
            },
            DragEvent::Cancel => {
                self.state = DragState::Idle;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(id: &str) -> LaneId {
        LaneId::from(id)
    }

    #[test]
    fn test_drop_index_midpoint_policy() {
        let mids = [10.0, 30.0, 50.0];
        assert_eq!(drop_index(&mids, 0.0), 0);
        assert_eq!(drop_index(&mids, 15.0), 1);
        assert_eq!(drop_index(&mids, 30.0), 2);
        assert_eq!(drop_index(&mids, 49.9), 2);
        assert_eq!(drop_index(&mids, 80.0), 3);
        assert_eq!(drop_index(&[], 5.0), 0);
    }

    #[test]
    fn test_scripted_drag_produces_move() {
        let mut machine = DragMachine::new();
        let unit = UnitId::from("u1");

        assert!(machine
            .handle(DragEvent::PointerDown {
                unit: unit.clone(),
                lane: lane("heli"),
            })
            .is_none());
        assert!(machine.is_dragging());

        machine.handle(DragEvent::over_lane(lane("sandy"), &[10.0, 30.0], 20.0));
        machine.handle(DragEvent::over_lane(lane("paleto"), &[10.0, 30.0], 5.0));

        let request = machine.handle(DragEvent::Drop).unwrap();
        assert_eq!(
            request,
            MoveRequest {
                unit,
                from: lane("heli"),
                to: lane("paleto"),
                index: Some(0),
            }
        );
        assert_eq!(machine.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_without_hover_does_nothing() {
        let mut machine = DragMachine::new();
        machine.handle(DragEvent::PointerDown {
            unit: UnitId::from("u1"),
            lane: lane("heli"),
        });

        assert!(machine.handle(DragEvent::Drop).is_none());
        assert!(!machine.is_dragging());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut machine = DragMachine::new();
        machine.handle(DragEvent::PointerDown {
            unit: UnitId::from("u1"),
            lane: lane("heli"),
        });
        machine.handle(DragEvent::PointerOverLane {
            lane: lane("sandy"),
            index: None,
        });

        assert!(machine.handle(DragEvent::Cancel).is_none());
        assert!(machine.handle(DragEvent::Drop).is_none());
    }

    #[test]
    fn test_events_while_idle_are_ignored() {
        let mut machine = DragMachine::new();
        assert!(machine
            .handle(DragEvent::PointerOverLane {
                lane: lane("sandy"),
                index: Some(1),
            })
            .is_none());
        assert!(machine.handle(DragEvent::Drop).is_none());
        assert_eq!(machine.state(), &DragState::Idle);
    }

    #[test]
    fn test_pointer_down_while_dragging_restarts() {
        let mut machine = DragMachine::new();
        machine.handle(DragEvent::PointerDown {
            unit: UnitId::from("u1"),
            lane: lane("heli"),
        });
        machine.handle(DragEvent::PointerOverLane {
            lane: lane("sandy"),
            index: None,
        });
        machine.handle(DragEvent::PointerDown {
            unit: UnitId::from("u2"),
            lane: lane("sandy"),
        });
        machine.handle(DragEvent::PointerOverLane {
            lane: lane("heli"),
            index: None,
        });

        let request = machine.handle(DragEvent::Drop).unwrap();
        assert_eq!(request.unit, UnitId::from("u2"));
        assert_eq!(request.from, lane("sandy"));
        assert_eq!(request.to, lane("heli"));
    }
}

use crate::{
    domain::unit::{Unit, UnitId},
    error::{HandoverError, Result},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    str::FromStr,
};
use tracing::warn;

/// Identifier of a lane, e.g. `heli`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneId(String);

impl LaneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LaneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declaration of a lane: its id and the title shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSpec {
    pub id: LaneId,
    pub title: String,
}

impl LaneSpec {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: LaneId::from(id),
            title: title.to_string(),
        }
    }
}

/// The fixed lane set, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub lanes: Vec<LaneSpec>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            lanes: vec![
                LaneSpec::new("heli", "وحدات هيلي"),
                LaneSpec::new("great_ocean", "وحدات نقاط قريت اوشن"),
                LaneSpec::new("sandy", "وحدات نقاط ساندي"),
                LaneSpec::new("paleto", "وحدات نقاط شلال بوليتو"),
            ],
        }
    }
}

impl BoardConfig {
    /// Looks up a lane declaration by id
    pub fn lane(&self, id: &LaneId) -> Option<&LaneSpec> {
        self.lanes.iter().find(|lane| &lane.id == id)
    }

    pub fn contains(&self, id: &LaneId) -> bool {
        self.lane(id).is_some()
    }
}

/// Which end of a lane new units go to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertEdge {
    #[default]
    Append,
    Prepend,
}

impl FromStr for InsertEdge {
    type Err = HandoverError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            _ => Err(HandoverError::InvalidInsertEdge(s.to_string())),
        }
    }
}

/// Lane membership and order of every unit.
///
/// Serialized as a JSON object keyed by lane id. Keys that are not part of the
/// configured lane set survive a load/save cycle untouched. A lane whose value
/// is not a list of units is read as missing, so repair back-fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    lanes: BTreeMap<LaneId, Vec<Unit>>,
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<LaneId, serde_json::Value>>::deserialize(deserializer)?;

        let mut lanes = BTreeMap::new();
        for (lane, value) in raw.unwrap_or_default() {
            match serde_json::from_value::<Vec<Unit>>(value) {
                Ok(units) => {
                    lanes.insert(lane, units);
                }
                Err(err) => warn!(%lane, error = %err, "discarding unreadable lane"),
            }
        }
        Ok(Self { lanes })
    }
}

impl Board {
    /// Creates a board with every configured lane present and empty
    pub fn new(config: &BoardConfig) -> Self {
        let mut board = Self::default();
        board.ensure_lanes(config);
        board
    }

    /// Back-fills missing configured lanes with empty sequences.
    /// Returns how many lanes were added.
    pub fn ensure_lanes(&mut self, config: &BoardConfig) -> usize {
        let mut added = 0;
        for spec in &config.lanes {
            if !self.lanes.contains_key(&spec.id) {
                self.lanes.insert(spec.id.clone(), Vec::new());
                added += 1;
            }
        }
        added
    }

    /// Drops repeated unit ids, keeping the first occurrence.
    ///
    /// Configured lanes are scanned in declaration order, then any extra lanes.
    /// Returns how many units were dropped.
    pub fn dedupe(&mut self, config: &BoardConfig) -> usize {
        let extra = self.lanes.keys().filter(|id| !config.contains(id));
        let mut order: Vec<LaneId> = config.lanes.iter().map(|l| l.id.clone()).collect();
        order.extend(extra.cloned());

        let mut seen = HashSet::new();
        let mut dropped = 0;
        for lane in order {
            if let Some(units) = self.lanes.get_mut(&lane) {
                let before = units.len();
                units.retain(|unit| seen.insert(unit.id.clone()));
                dropped += before - units.len();
            }
        }
        dropped
    }

    pub fn has_lane(&self, lane: &LaneId) -> bool {
        self.lanes.contains_key(lane)
    }

    /// Units of a lane in order; empty for an unknown lane
    pub fn units(&self, lane: &LaneId) -> &[Unit] {
        self.lanes.get(lane).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn lane_ids(&self) -> impl Iterator<Item = &LaneId> {
        self.lanes.keys()
    }

    /// Total units across all lanes
    pub fn unit_count(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    /// Finds the lane and position holding a unit
    pub fn locate(&self, id: &UnitId) -> Option<(&LaneId, usize)> {
        self.lanes.iter().find_map(|(lane, units)| {
            units
                .iter()
                .position(|unit| &unit.id == id)
                .map(|pos| (lane, pos))
        })
    }

    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.lanes
            .values()
            .flat_map(|units| units.iter())
            .find(|unit| &unit.id == id)
    }

    fn lane_mut(&mut self, lane: &LaneId) -> Result<&mut Vec<Unit>> {
        self.lanes
            .get_mut(lane)
            .ok_or_else(|| HandoverError::UnknownLane(lane.to_string()))
    }

    /// Creates one unit per code and inserts the batch at the given edge.
    ///
    /// Input order is kept on both edges. Duplicate texts become separate
    /// units. Returns the new ids in insertion order.
    pub fn add_units<I, S>(
        &mut self,
        lane: &LaneId,
        codes: I,
        edge: InsertEdge,
    ) -> Result<Vec<UnitId>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target = self.lane_mut(lane)?;
        let fresh: Vec<Unit> = codes.into_iter().map(Unit::new).collect();
        let ids = fresh.iter().map(|unit| unit.id.clone()).collect();

        match edge {
            InsertEdge::Append => target.extend(fresh),
            InsertEdge::Prepend => {
                target.splice(0..0, fresh);
            }
        }
        Ok(ids)
    }

    /// Adds a unit with no text
    pub fn add_empty_unit(&mut self, lane: &LaneId, edge: InsertEdge) -> Result<UnitId> {
        let target = self.lane_mut(lane)?;
        let unit = Unit::empty();
        let id = unit.id.clone();
        match edge {
            InsertEdge::Append => target.push(unit),
            InsertEdge::Prepend => target.insert(0, unit),
        }
        Ok(id)
    }

    /// Removes a unit wherever it is. A stale id is a no-op.
    pub fn remove_unit(&mut self, id: &UnitId) -> Option<Unit> {
        self.lanes.values_mut().find_map(|units| {
            units
                .iter()
                .position(|unit| &unit.id == id)
                .map(|pos| units.remove(pos))
        })
    }

    /// Moves a unit from one lane to a position in another (or the same) lane.
    ///
    /// `target_index` is clamped to the target length after removal; `None`
    /// appends. Same lane with no index does nothing. A unit that is not in
    /// `from` is left alone and `Ok(false)` is returned.
    pub fn move_unit(
        &mut self,
        id: &UnitId,
        from: &LaneId,
        to: &LaneId,
        target_index: Option<usize>,
    ) -> Result<bool> {
        if !self.has_lane(to) {
            return Err(HandoverError::UnknownLane(to.to_string()));
        }
        let source = self.lane_mut(from)?;
        if from == to && target_index.is_none() {
            return Ok(false);
        }

        let Some(pos) = source.iter().position(|unit| &unit.id == id) else {
            return Ok(false);
        };
        let unit = source.remove(pos);

        let target = self.lane_mut(to)?;
        let index = target_index.map_or(target.len(), |i| i.min(target.len()));
        target.insert(index, unit);
        Ok(true)
    }

    /// Replaces a unit's text in place. A stale id is a no-op.
    pub fn set_unit_text(&mut self, id: &UnitId, text: impl Into<String>) -> bool {
        let found = self
            .lanes
            .values_mut()
            .flat_map(|units| units.iter_mut())
            .find(|unit| &unit.id == id);
        match found {
            Some(unit) => {
                unit.set_text(text);
                true
            }
            None => false,
        }
    }
}

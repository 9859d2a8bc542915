mod blackout;
mod error;
mod extras;
mod payload;
mod policy;
mod pricing;
mod ranges;
mod validate;

pub use error::{EngineError, Violation};
pub use payload::effective_nightly_price;
pub use policy::{
    persisted_refund_rules, validate_hold_amount, validate_hold_cutoff, validate_hold_limit,
};

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use ulid::Ulid;

use crate::calendar::{self, ImportError, ImportSummary};
use crate::model::*;
use crate::notify::{NotifyHub, SessionEvent};
use crate::service::{CalendarStore, InventoryStore};

/// Save lifecycle of a configuration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Draft,
    Validating,
    Invalid,
    Ready,
    Saving,
    Saved,
    SaveFailed,
}

/// Result of a save attempt that reached the collaborator boundary or was
/// stopped by validation. Transport failures surface as `EngineError`.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(InventoryId),
    Invalid(Vec<Violation>),
}

/// Everything configured for one selected room.
#[derive(Debug, Clone)]
pub struct RoomConfig {
    pub room: Room,
    /// Rooms offered for sale — mirrored into every range in normal mode.
    pub front_rooms_count: Option<u32>,
    /// Selected meal plans; empty means "all reference meal plans".
    pub meal_plans: Vec<MealPlanId>,
    /// Selected occupancy tiers; empty means "all of 1..=max_persons".
    pub occupancies: Vec<u8>,
    /// Weekdays priced with the weekend bucket; empty = no weekend pricing.
    pub weekend_days: Vec<Weekday>,
    pub ranges: Vec<DateRange>,
    prices: HashMap<PriceKey, u32>,
    extras: HashMap<ExtraKey, u32>,
    /// Per-room stored blackout list; the session-level set is the union.
    pub blackout_dates: Vec<NaiveDate>,
}

impl RoomConfig {
    pub fn new(room: Room) -> Self {
        Self {
            room,
            front_rooms_count: None,
            meal_plans: Vec::new(),
            occupancies: Vec::new(),
            weekend_days: Vec::new(),
            ranges: Vec::new(),
            prices: HashMap::new(),
            extras: HashMap::new(),
            blackout_dates: Vec::new(),
        }
    }

    /// Occupancy tiers the grid is edited and validated over; empty
    /// selection resolves to every tier up to the room's ceiling.
    pub fn resolved_occupancies(&self) -> Vec<u8> {
        if self.occupancies.is_empty() {
            (1..=self.room.max_persons).collect()
        } else {
            self.occupancies.clone()
        }
    }

    /// True if any weekday is priced with the weekend bucket.
    pub fn has_weekend(&self) -> bool {
        !self.weekend_days.is_empty()
    }
}

/// One inventory-configuration session: the orchestrator owning the pricing
/// grid, extra costs, policies, blackout dates and the availability
/// calendar for all selected rooms, plus the save state machine.
pub struct InventorySession {
    id: Ulid,
    mode: InventoryMode,
    inventory_id: Option<InventoryId>,
    header: InventoryHeader,
    /// Reference meal plans fetched at session start.
    meal_plans: Vec<MealPlan>,
    /// Selected rooms in selection order — validation walks this order.
    rooms: Vec<RoomConfig>,
    /// Normal mode: room-independent source of truth for date ranges,
    /// projected into every selected room.
    aggregate_ranges: Vec<(NaiveDate, NaiveDate)>,
    /// Normal mode: global weekend-day set, projected likewise.
    aggregate_weekend: Vec<Weekday>,
    refundable: bool,
    refund_rules: Vec<RefundRule>,
    hold: HoldBookingPolicy,
    blackout_dates: Vec<NaiveDate>,
    /// date → rooms available, per room.
    calendar: HashMap<RoomId, BTreeMap<NaiveDate, u32>>,
    state: SaveState,
    notify: Arc<NotifyHub>,
}

impl InventorySession {
    pub fn new(mode: InventoryMode, meal_plans: Vec<MealPlan>, notify: Arc<NotifyHub>) -> Self {
        let id = Ulid::new();
        tracing::debug!("session {id} opened ({} meal plans)", meal_plans.len());
        Self {
            id,
            mode,
            inventory_id: None,
            header: InventoryHeader::default(),
            meal_plans,
            rooms: Vec::new(),
            aggregate_ranges: Vec::new(),
            aggregate_weekend: Vec::new(),
            refundable: false,
            refund_rules: Vec::new(),
            hold: HoldBookingPolicy::default(),
            blackout_dates: Vec::new(),
            calendar: HashMap::new(),
            state: SaveState::Draft,
            notify,
        }
    }

    // ── Accessors ────────────────────────────────────────────

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn mode(&self) -> InventoryMode {
        self.mode
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn inventory_id(&self) -> Option<InventoryId> {
        self.inventory_id
    }

    pub fn meal_plans(&self) -> &[MealPlan] {
        &self.meal_plans
    }

    pub fn rooms(&self) -> &[RoomConfig] {
        &self.rooms
    }

    pub fn room(&self, room_id: RoomId) -> Option<&RoomConfig> {
        self.rooms.iter().find(|c| c.room.id == room_id)
    }

    pub fn header(&self) -> &InventoryHeader {
        &self.header
    }

    /// Header fields carry no cross-field invariants; edit in place.
    /// Editing returns the session to `Draft`.
    pub fn header_mut(&mut self) -> &mut InventoryHeader {
        self.state = SaveState::Draft;
        &mut self.header
    }

    pub fn refundable(&self) -> bool {
        self.refundable
    }

    pub fn set_refundable(&mut self, refundable: bool) {
        self.refundable = refundable;
    }

    pub fn refund_rules(&self) -> &[RefundRule] {
        &self.refund_rules
    }

    pub fn hold(&self) -> &HoldBookingPolicy {
        &self.hold
    }

    pub fn blackout_dates(&self) -> &[NaiveDate] {
        &self.blackout_dates
    }

    pub fn aggregate_ranges(&self) -> &[(NaiveDate, NaiveDate)] {
        &self.aggregate_ranges
    }

    pub fn aggregate_weekend_days(&self) -> &[Weekday] {
        &self.aggregate_weekend
    }

    /// Meal plans a room's grid is edited and validated over (empty
    /// selection resolves to the full reference list).
    pub fn resolved_meal_plans(&self, config: &RoomConfig) -> Vec<MealPlanId> {
        if config.meal_plans.is_empty() {
            self.meal_plans.iter().map(|m| m.id).collect()
        } else {
            config.meal_plans.clone()
        }
    }

    fn room_index(&self, room_id: RoomId) -> Result<usize, EngineError> {
        self.rooms
            .iter()
            .position(|c| c.room.id == room_id)
            .ok_or(EngineError::RoomNotFound(room_id))
    }

    fn room_config_mut(&mut self, room_id: RoomId) -> Result<&mut RoomConfig, EngineError> {
        let idx = self.room_index(room_id)?;
        self.state = SaveState::Draft;
        Ok(&mut self.rooms[idx])
    }

    // ── Save state machine ───────────────────────────────────

    /// Explicit save: `Draft → Validating → {Invalid, Ready} → Saving →
    /// {Saved, SaveFailed}`. Validation collects every violation; zero
    /// violations flattens the session into the line-item payload and hands
    /// it to the inventory-write collaborator. A transport failure leaves
    /// all in-memory state untouched so the user can retry.
    pub async fn save(&mut self, store: &dyn InventoryStore) -> Result<SaveOutcome, EngineError> {
        self.state = SaveState::Validating;
        let violations = self.validate();
        self.notify.send(
            self.id,
            SessionEvent::Validated {
                violations: violations.len(),
            },
        );

        if !violations.is_empty() {
            self.state = SaveState::Invalid;
            metrics::counter!(crate::observability::VALIDATION_FAILURES_TOTAL).increment(1);
            if let Some(first) = violations.first() {
                tracing::debug!("session {}: validation failed: {first}", self.id);
            }
            return Ok(SaveOutcome::Invalid(violations));
        }

        self.state = SaveState::Ready;
        let payload = self.build_payload();
        self.state = SaveState::Saving;
        self.notify.send(self.id, SessionEvent::SaveStarted);

        let start = std::time::Instant::now();
        match store.save(&payload).await {
            Ok(inventory_id) => {
                metrics::counter!(crate::observability::SAVES_TOTAL).increment(1);
                metrics::histogram!(crate::observability::SAVE_DURATION_SECONDS)
                    .record(start.elapsed().as_secs_f64());
                self.inventory_id = Some(inventory_id);
                self.state = SaveState::Saved;
                tracing::info!(
                    "session {}: inventory {inventory_id} saved ({} line items)",
                    self.id,
                    payload.items.len()
                );
                self.notify
                    .send(self.id, SessionEvent::Saved { inventory_id });
                Ok(SaveOutcome::Saved(inventory_id))
            }
            Err(e) => {
                metrics::counter!(crate::observability::SAVE_FAILURES_TOTAL).increment(1);
                self.state = SaveState::SaveFailed;
                tracing::warn!("session {}: save failed: {e}", self.id);
                self.notify.send(
                    self.id,
                    SessionEvent::SaveFailed {
                        reason: e.to_string(),
                    },
                );
                Err(EngineError::Storage(e.to_string()))
            }
        }
    }

    // ── Availability calendar ────────────────────────────────

    /// Parse a CSV of `room_id,date,no_of_room` rows (or `date,no_of_room`
    /// with `fixed_room` supplied) and merge the result into the calendar.
    /// Only dates present in the file are touched.
    pub fn import_calendar(
        &mut self,
        data: &str,
        fixed_room: Option<RoomId>,
    ) -> Result<ImportSummary, ImportError> {
        let summary = calendar::parse_csv(data, fixed_room)?;
        calendar::merge_entries(&mut self.calendar, &summary.entries);
        self.notify.send(
            self.id,
            SessionEvent::CalendarImported {
                rows: summary.entries.len(),
                dropped: summary.dropped,
            },
        );
        Ok(summary)
    }

    pub fn room_calendar(&self, room_id: RoomId) -> Option<&BTreeMap<NaiveDate, u32>> {
        self.calendar.get(&room_id)
    }

    /// Direct single-day edit of the availability calendar.
    pub fn set_room_count(&mut self, room_id: RoomId, date: NaiveDate, count: u32) {
        self.calendar.entry(room_id).or_default().insert(date, count);
    }

    /// Push the in-memory calendar to the calendar collaborator. Requires a
    /// previously saved inventory.
    pub async fn push_calendar(&self, store: &dyn CalendarStore) -> Result<usize, EngineError> {
        let inventory_id = self.inventory_id.ok_or(EngineError::NotSaved)?;
        let rows: Vec<CalendarEntry> = self
            .calendar
            .iter()
            .flat_map(|(room_id, days)| {
                days.iter().map(|(date, count)| CalendarEntry {
                    room_id: *room_id,
                    date: *date,
                    no_of_room: *count,
                })
            })
            .collect();
        store
            .update(inventory_id, &rows)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        Ok(rows.len())
    }

    /// Fetch the stored calendar and merge it over the in-memory one.
    pub async fn load_calendar(&mut self, store: &dyn CalendarStore) -> Result<usize, EngineError> {
        let inventory_id = self.inventory_id.ok_or(EngineError::NotSaved)?;
        let rows = store
            .fetch(inventory_id)
            .await
            .map_err(|e| EngineError::Storage(e.to_string()))?;
        calendar::merge_entries(&mut self.calendar, &rows);
        Ok(rows.len())
    }
}

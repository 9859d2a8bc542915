use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Backend-assigned room identifier.
pub type RoomId = u64;

/// Backend-assigned meal-plan identifier.
pub type MealPlanId = u64;

/// Backend-assigned inventory identifier.
pub type InventoryId = u64;

/// Inventory type. `Normal` requires a per-room rooms count and full
/// weekday/weekend completeness; `Confirm` supplies the count per date range
/// and runs fewer mandatory checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryMode {
    Normal,
    Confirm,
}

/// Pricing bucket for a calendar day. Which weekdays count as "weekend" is
/// room-configurable via the weekend-day set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    #[serde(rename = "week_days")]
    Weekday,
    #[serde(rename = "weekend_days")]
    Weekend,
}

impl DayType {
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Weekday => "week_days",
            DayType::Weekend => "weekend_days",
        }
    }
}

/// Guest category for extra-cost cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestKind {
    /// Extra adult on an additional bed.
    #[serde(rename = "adult")]
    AdultExtraBed,
    /// Child sharing existing beds.
    #[serde(rename = "child")]
    ChildWithoutBed,
    /// Child with an additional bed.
    #[serde(rename = "child_with_bed")]
    ChildWithBed,
}

impl GuestKind {
    pub const ALL: [GuestKind; 3] = [
        GuestKind::AdultExtraBed,
        GuestKind::ChildWithoutBed,
        GuestKind::ChildWithBed,
    ];
}

/// Reference-data meal plan (e.g. "CP", "MAP").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: MealPlanId,
    pub name: String,
}

/// Room identity and capacity limits as fetched from the hotel master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub max_adults: u8,
    pub max_children: u8,
    pub max_infants: u8,
    /// Max total occupancy, kept `>= max_adults + max_children`.
    pub max_persons: u8,
}

impl Room {
    /// Lowest admissible occupancy ceiling for this room.
    pub fn occupancy_floor(&self) -> u8 {
        self.max_adults.saturating_add(self.max_children)
    }
}

/// A single contiguous inclusive date interval tied to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub id: Ulid,
    pub room_id: RoomId,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Rooms available for this interval — explicit in confirm mode only.
    pub rooms_count: Option<u32>,
}

impl DateRange {
    pub fn new(room_id: RoomId, from: NaiveDate, to: NaiveDate) -> Self {
        debug_assert!(from <= to, "DateRange from must not be after to");
        Self {
            id: Ulid::new(),
            room_id,
            from,
            to,
            rooms_count: None,
        }
    }

    /// Closed-interval overlap test: both interval ends are inclusive, so
    /// ranges sharing a boundary day overlap.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from <= to && self.to >= from
    }

    pub fn same_interval(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.from == from && self.to == to
    }
}

/// Key of one price cell in the normalized pricing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceKey {
    pub range_id: Ulid,
    pub day_type: DayType,
    /// Occupancy tier: number of paying persons the price is quoted for.
    pub occupancy: u8,
    pub meal_plan: MealPlanId,
}

/// Key of one extra-cost cell. Extra costs are room-scoped, not
/// date-range-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtraKey {
    pub day_type: DayType,
    pub guest_kind: GuestKind,
    pub meal_plan: MealPlanId,
}

/// One flattened priced record of the persistence payload — the
/// authoritative normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub room_id: RoomId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub person: u8,
    pub meal_type: MealPlanId,
    pub amount: u32,
    #[serde(rename = "type")]
    pub day_type: DayType,
    pub rooms_count: u32,
}

/// One stored extra-cost row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraCostRow {
    pub room_id: RoomId,
    pub guest_kind: GuestKind,
    pub meal_type: MealPlanId,
    #[serde(rename = "type")]
    pub day_type: DayType,
    pub amount: u32,
}

/// One refund rule as entered: an absolute amount refundable up to
/// `days_before_checkin` days before check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundRule {
    pub days_before_checkin: u16,
    pub amount: f64,
}

/// Persisted refund rule with the derived percentage-of-price
/// representation. `percentage` is `None` when no positive effective price
/// was available to derive it from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRefundRule {
    pub days_before_checkin: u16,
    pub percentage: Option<f64>,
    pub amount: f64,
}

/// Whether a hold amount is an absolute value or a percentage of price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldType {
    Flat,
    Percentage,
}

/// Hold-booking policy: guests may hold an unpaid booking up to
/// `cutoff_days` before check-in, for at most `limit_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldBookingPolicy {
    pub enabled: bool,
    pub hold_type: HoldType,
    pub amount: Option<f64>,
    pub cutoff_days: Option<u16>,
    pub limit_hours: Option<u32>,
}

impl Default for HoldBookingPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            hold_type: HoldType::Flat,
            amount: None,
            cutoff_days: None,
            limit_hours: None,
        }
    }
}

/// Top-level inventory header fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryHeader {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub hotel: Option<String>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    /// Explicit nightly price; first candidate for the effective price used
    /// in refund-percentage derivation.
    pub price: Option<u32>,
}

/// Per-room/day availability row as exchanged with the calendar service and
/// the CSV importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub no_of_room: u32,
}

/// Per-room detail row of a stored inventory, used for hydration and
/// emitted back in the save payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRoomDetail {
    pub room: Room,
    pub rooms_count: Option<u32>,
    pub weekend_days: Vec<Weekday>,
    /// Selected meal plans; empty means "all".
    pub meal_plans: Vec<MealPlanId>,
    /// Selected occupancy tiers; empty means "all".
    pub occupancies: Vec<u8>,
    pub blackout_dates: Vec<NaiveDate>,
}

/// Inventory + rooms + grid response of the inventory-read service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredInventory {
    pub id: InventoryId,
    pub mode: InventoryMode,
    pub header: InventoryHeader,
    pub refundable: bool,
    pub refund_rules: Vec<RefundRule>,
    pub hold: HoldBookingPolicy,
    pub rooms: Vec<StoredRoomDetail>,
    pub grid: Vec<LineItem>,
    pub extras: Vec<ExtraCostRow>,
}

/// Flattened persistence payload handed to the inventory-write service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPayload {
    /// `None` on create; set on update.
    pub id: Option<InventoryId>,
    pub mode: InventoryMode,
    pub header: InventoryHeader,
    pub refundable: bool,
    pub refund_rules: Vec<PersistedRefundRule>,
    pub hold: HoldBookingPolicy,
    pub blackout_dates: Vec<NaiveDate>,
    pub rooms: Vec<StoredRoomDetail>,
    pub extras: Vec<ExtraCostRow>,
    pub items: Vec<LineItem>,
}

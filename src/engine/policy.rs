use crate::limits::*;
use crate::model::*;

use super::{EngineError, InventorySession, SaveState, Violation};

// ── Refund rules ─────────────────────────────────────────────

impl InventorySession {
    /// Append a refund rule. Rules are only meaningful while the inventory
    /// is flagged refundable, but may be edited regardless.
    pub fn add_refund_rule(
        &mut self,
        days_before_checkin: u16,
        amount: f64,
    ) -> Result<(), EngineError> {
        if days_before_checkin < 1 {
            return Err(EngineError::InvalidRefundRule(
                "days before check-in must be at least 1",
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::InvalidRefundRule(
                "amount must be a non-negative number",
            ));
        }
        if self.refund_rules.len() >= MAX_REFUND_RULES {
            return Err(EngineError::LimitExceeded("too many refund rules"));
        }
        self.state = SaveState::Draft;
        self.refund_rules.push(RefundRule {
            days_before_checkin,
            amount,
        });
        Ok(())
    }

    pub fn remove_refund_rule(&mut self, index: usize) -> Result<RefundRule, EngineError> {
        if index >= self.refund_rules.len() {
            return Err(EngineError::IndexOutOfBounds {
                what: "refund rule",
                index,
            });
        }
        self.state = SaveState::Draft;
        Ok(self.refund_rules.remove(index))
    }
}

/// Map refund rules to their persisted form against an effective nightly
/// price. Rules without a positive `days_before_checkin` are filtered out;
/// the derived percentage is `None` when no positive price is available,
/// otherwise clamped to `[0, 100]`.
pub fn persisted_refund_rules(
    rules: &[RefundRule],
    effective_price: u32,
) -> Vec<PersistedRefundRule> {
    rules
        .iter()
        .filter(|r| r.days_before_checkin > 0)
        .map(|r| {
            let percentage = if effective_price == 0 {
                None
            } else {
                Some((r.amount / effective_price as f64 * 100.0).clamp(0.0, 100.0))
            };
            PersistedRefundRule {
                days_before_checkin: r.days_before_checkin,
                percentage,
                amount: r.amount,
            }
        })
        .collect()
}

// ── Hold-booking policy ──────────────────────────────────────

/// A flat hold amount may not exceed the nightly price; a percentage may
/// not exceed 100.
pub fn validate_hold_amount(
    amount: f64,
    hold_type: HoldType,
    nightly_price: u32,
) -> Result<(), EngineError> {
    match hold_type {
        HoldType::Flat if amount > nightly_price as f64 => Err(EngineError::ExceedsPrice {
            amount,
            nightly_price,
        }),
        HoldType::Percentage if amount > 100.0 => Err(EngineError::PercentageOutOfRange(amount)),
        _ => Ok(()),
    }
}

pub fn validate_hold_cutoff(days: u16) -> Result<(), EngineError> {
    if days > MAX_HOLD_CUTOFF_DAYS {
        Err(EngineError::MaxDaysExceeded(days))
    } else {
        Ok(())
    }
}

/// The hold-validity window may not outlive the advance-cutoff window.
pub fn validate_hold_limit(hours: u32, cutoff_days: u16) -> Result<(), EngineError> {
    let max_hours = cutoff_days as u32 * HOURS_PER_DAY;
    if hours > max_hours {
        Err(EngineError::LimitExceedsCutOff { hours, max_hours })
    } else {
        Ok(())
    }
}

/// Full policy check, recomputed from scratch on every call: required
/// fields only while enabled, plus the three cross-field invariants.
pub(super) fn hold_violations(hold: &HoldBookingPolicy, nightly_price: u32) -> Vec<Violation> {
    let mut out = Vec::new();
    if !hold.enabled {
        return out;
    }

    match hold.amount {
        None => out.push(Violation::MissingHoldField("amount")),
        Some(amount) => match validate_hold_amount(amount, hold.hold_type, nightly_price) {
            Err(EngineError::ExceedsPrice {
                amount,
                nightly_price,
            }) => out.push(Violation::HoldAmountExceedsPrice {
                amount,
                nightly_price,
            }),
            Err(EngineError::PercentageOutOfRange(p)) => {
                out.push(Violation::HoldPercentageOutOfRange(p))
            }
            _ => {}
        },
    }

    match hold.cutoff_days {
        None | Some(0) => out.push(Violation::MissingHoldField("advance cutoff days")),
        Some(days) => {
            if validate_hold_cutoff(days).is_err() {
                out.push(Violation::HoldCutoffExceeded(days));
            }
        }
    }

    match hold.limit_hours {
        None | Some(0) => out.push(Violation::MissingHoldField("validity hours")),
        Some(hours) => {
            if let Some(days) = hold.cutoff_days
                && days > 0
                && let Err(EngineError::LimitExceedsCutOff { hours, max_hours }) =
                    validate_hold_limit(hours, days)
            {
                out.push(Violation::HoldLimitExceedsCutoff { hours, max_hours });
            }
        }
    }

    out
}

impl InventorySession {
    /// Toggle the hold policy. Turning it off clears amount, cutoff and
    /// limit; the required-field checks only apply while it is on.
    pub fn set_hold_enabled(&mut self, enabled: bool) {
        self.state = SaveState::Draft;
        self.hold.enabled = enabled;
        if !enabled {
            self.hold.amount = None;
            self.hold.cutoff_days = None;
            self.hold.limit_hours = None;
        }
    }

    /// Switching between flat and percentage re-runs the amount check.
    pub fn set_hold_type(&mut self, hold_type: HoldType) -> Result<(), EngineError> {
        self.state = SaveState::Draft;
        self.hold.hold_type = hold_type;
        if let Some(amount) = self.hold.amount {
            validate_hold_amount(amount, hold_type, self.nightly_price_hint())?;
        }
        Ok(())
    }

    /// The value is stored even when invalid — the error is the inline,
    /// field-scoped message; the same check re-runs at validation time.
    pub fn set_hold_amount(&mut self, amount: Option<f64>) -> Result<(), EngineError> {
        if let Some(a) = amount
            && (!a.is_finite() || a < 0.0)
        {
            return Err(EngineError::NonNumericAmount(a.to_string()));
        }
        self.state = SaveState::Draft;
        self.hold.amount = amount;
        if let Some(a) = amount {
            validate_hold_amount(a, self.hold.hold_type, self.nightly_price_hint())?;
        }
        Ok(())
    }

    pub fn set_hold_cutoff(&mut self, days: Option<u16>) -> Result<(), EngineError> {
        self.state = SaveState::Draft;
        self.hold.cutoff_days = days;
        if let Some(days) = days {
            validate_hold_cutoff(days)?;
            if let Some(hours) = self.hold.limit_hours {
                validate_hold_limit(hours, days)?;
            }
        }
        Ok(())
    }

    pub fn set_hold_limit(&mut self, hours: Option<u32>) -> Result<(), EngineError> {
        self.state = SaveState::Draft;
        self.hold.limit_hours = hours;
        if let Some(hours) = hours
            && let Some(days) = self.hold.cutoff_days
        {
            validate_hold_limit(hours, days)?;
        }
        Ok(())
    }
}

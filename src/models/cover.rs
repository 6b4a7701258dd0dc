//! In-memory shift cover model
//!
//! A [`ShiftSlot`] never stores its current cover. It keeps an append-only
//! list of [`CoverChange`]s and derives the cover from it, falling back to
//! its default person while no change applies. Dated lookups follow the same
//! rule as the stored mutation log: latest date first, then append order.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};
use crate::api::{ApiError, Outcome};

/// Name of the sentinel person covering a slot nobody changed yet
pub const DEFAULT_PERSON_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new(DEFAULT_PERSON_NAME)
    }
}

/// Half-open time window `[start, stop)` during which a shift runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl ShiftWindow {
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> Self {
        Self { start, stop }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.stop
    }
}

/// One entry of a slot's cover log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverChange {
    new_person: Option<Person>,
    date: Option<NaiveDate>,
}

impl CoverChange {
    pub fn new_person(&self) -> Option<&Person> {
        self.new_person.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Undated changes apply since the beginning
    fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlot {
    pub name: String,
    pub ordering: i64,
    window: Option<ShiftWindow>,
    default_person: Person,
    changes: Vec<CoverChange>,
}

impl ShiftSlot {
    pub fn new(name: impl Into<String>, ordering: i64) -> Self {
        Self {
            name: name.into(),
            ordering,
            window: None,
            default_person: Person::default(),
            changes: Vec::new(),
        }
    }

    pub fn with_window(mut self, window: ShiftWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_default_person(mut self, person: Person) -> Self {
        self.default_person = person;
        self
    }

    pub fn window(&self) -> Option<&ShiftWindow> {
        self.window.as_ref()
    }

    /// The cover log, oldest first
    pub fn changes(&self) -> &[CoverChange] {
        &self.changes
    }

    /// Current cover, or `None` when the slot is uncovered
    pub fn cover(&self) -> Option<&Person> {
        match self.changes.last() {
            Some(change) => change.new_person(),
            None => Some(&self.default_person),
        }
    }

    /// Cover on `date`.
    ///
    /// The change with the latest date on or before `date` decides; on equal
    /// dates the one appended last wins. Undated changes count as dated at
    /// the beginning of time. With no applicable change the default person
    /// holds the slot.
    pub fn cover_on(&self, date: NaiveDate) -> Option<&Person> {
        let latest = self
            .changes
            .iter()
            .enumerate()
            .filter(|(_, change)| change.effective_date() <= date)
            .max_by_key(|(position, change)| (change.effective_date(), *position));

        match latest {
            Some((_, change)) => change.new_person(),
            None => Some(&self.default_person),
        }
    }

    /// Cover a dated change has to respect: the cover on that date, or the
    /// current cover for undated changes
    fn cover_for(&self, date: Option<NaiveDate>) -> Option<&Person> {
        match date {
            Some(date) => self.cover_on(date),
            None => self.cover(),
        }
    }

    pub fn is_covered(&self) -> bool {
        self.cover().is_some()
    }

    /// Whether the slot runs at `at`; slots without a window never do
    pub fn is_active(&self, at: NaiveDateTime) -> bool {
        self.window.map_or(false, |window| window.contains(at))
    }

    /// Leave the slot uncovered from `date` on. Removing from a slot that is
    /// already uncovered then is a no-op.
    pub fn remove_cover(&mut self, date: Option<NaiveDate>) {
        if self.cover_for(date).is_none() {
            debug!(shift = %self.name, "Cover already removed");
            return;
        }
        self.changes.push(CoverChange { new_person: None, date });
    }

    /// Cover a slot that is uncovered on `date` (or now, when undated).
    ///
    /// Setting the person who already holds the slot succeeds without
    /// appending to the log; any other holder has to be removed first.
    pub fn set_cover(&mut self, person: Person, date: Option<NaiveDate>) -> Outcome<()> {
        match self.cover_for(date).cloned() {
            Some(current) if current == person => Outcome::ok(()).with_message("Cover unchanged"),
            Some(current) => {
                warn!(shift = %self.name, current = %current.name, requested = %person.name, "Shift already covered");
                Outcome::fail(ApiError::ShiftAlreadyCovered { current: current.name })
            }
            None => {
                self.changes.push(CoverChange { new_person: Some(person), date });
                Outcome::ok(()).with_message("Cover set")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid timestamp")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, d).expect("valid date")
    }

    #[test]
    fn test_fresh_slot_is_covered_by_default_person() {
        let slot = ShiftSlot::new("Morning", 1);
        assert!(slot.is_covered());
        assert_eq!(slot.cover(), Some(&Person::default()));
        assert!(slot.changes().is_empty());
    }

    #[test]
    fn test_remove_cover_uncovers() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(None);
        assert!(!slot.is_covered());
        assert_eq!(slot.changes().len(), 1);

        slot.remove_cover(None);
        assert_eq!(slot.changes().len(), 1);
    }

    #[test]
    fn test_set_cover_on_covered_slot_is_rejected() {
        let mut slot = ShiftSlot::new("Morning", 1);
        let outcome = slot.set_cover(Person::new("alice"), None);

        assert!(!outcome.is_success());
        assert_matches!(
            outcome.errors(),
            [ApiError::ShiftAlreadyCovered { current }] if current == DEFAULT_PERSON_NAME
        );
        assert_eq!(slot.cover(), Some(&Person::default()));
    }

    #[test]
    fn test_set_cover_after_remove() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(None);

        assert!(slot.set_cover(Person::new("alice"), None).is_success());
        assert_eq!(slot.cover(), Some(&Person::new("alice")));

        let outcome = slot.set_cover(Person::new("bob"), None);
        assert_matches!(outcome.errors(), [ApiError::ShiftAlreadyCovered { current }] if current == "alice");
    }

    #[test]
    fn test_setting_same_cover_twice_does_not_grow_the_log() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(None);
        assert!(slot.set_cover(Person::new("alice"), None).is_success());
        let logged = slot.changes().len();

        let outcome = slot.set_cover(Person::new("alice"), None);
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), Some("Cover unchanged"));
        assert_eq!(slot.changes().len(), logged);
    }

    #[test]
    fn test_cover_on_uses_last_change_up_to_date() {
        let mut slot = ShiftSlot::new("Evening", 2);
        slot.remove_cover(Some(day(3)));
        assert!(slot.set_cover(Person::new("alice"), Some(day(5))).is_success());

        assert_eq!(slot.cover_on(day(1)), Some(&Person::default()));
        assert_eq!(slot.cover_on(day(4)), None);
        assert_eq!(slot.cover_on(day(5)), Some(&Person::new("alice")));
        assert_eq!(slot.cover(), Some(&Person::new("alice")));
    }

    #[test]
    fn test_is_active_is_half_open() {
        let slot = ShiftSlot::new("Day", 1).with_window(ShiftWindow::new(at(9), at(17)));

        assert!(!slot.is_active(at(8)));
        assert!(slot.is_active(at(9)));
        assert!(slot.is_active(at(12)));
        assert!(!slot.is_active(at(17)));
    }

    #[test]
    fn test_slot_without_window_is_never_active() {
        let slot = ShiftSlot::new("Any", 1);
        assert!(!slot.is_active(at(12)));
    }

    #[test]
    fn test_custom_default_person() {
        let slot = ShiftSlot::new("Night", 3).with_default_person(Person::new("carol"));
        assert_eq!(slot.cover(), Some(&Person::new("carol")));
    }

    #[test]
    fn test_backdated_change_does_not_hide_later_dated_ones() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(Some(day(3)));
        assert!(slot.set_cover(Person::new("alice"), Some(day(10))).is_success());
        slot.remove_cover(Some(day(1)));

        assert_eq!(slot.changes().len(), 3);
        assert_eq!(slot.cover_on(day(2)), None);
        assert_eq!(slot.cover_on(day(5)), None);
        assert_eq!(slot.cover_on(day(12)), Some(&Person::new("alice")));
    }

    #[test]
    fn test_same_date_changes_resolve_to_last_appended() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(Some(day(3)));
        assert!(slot.set_cover(Person::new("alice"), Some(day(3))).is_success());

        assert_eq!(slot.cover_on(day(3)), Some(&Person::new("alice")));
    }

    #[test]
    fn test_dated_set_cover_respects_holder_on_that_date() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(Some(day(10)));

        let outcome = slot.set_cover(Person::new("alice"), Some(day(3)));

        assert_matches!(
            outcome.errors(),
            [ApiError::ShiftAlreadyCovered { current }] if current == DEFAULT_PERSON_NAME
        );
        assert_eq!(slot.changes().len(), 1);
        assert_eq!(slot.cover_on(day(5)), Some(&Person::default()));
    }

    #[test]
    fn test_dated_repeats_are_no_ops() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(Some(day(3)));
        assert!(slot.set_cover(Person::new("alice"), Some(day(5))).is_success());

        let outcome = slot.set_cover(Person::new("alice"), Some(day(7)));
        assert_eq!(outcome.message(), Some("Cover unchanged"));

        // Nobody holds the slot on day 4 yet.
        slot.remove_cover(Some(day(4)));
        assert_eq!(slot.changes().len(), 2);
    }

    #[test]
    fn test_undated_changes_apply_from_the_beginning() {
        let mut slot = ShiftSlot::new("Morning", 1);
        slot.remove_cover(None);
        assert!(slot.set_cover(Person::new("alice"), Some(day(5))).is_success());

        assert_eq!(slot.cover_on(day(1)), None);
        assert_eq!(slot.cover_on(day(5)), Some(&Person::new("alice")));
    }
}

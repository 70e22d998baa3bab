use crate::booked::{parse_batch, MalformedPolicy, ParseError, ParsedBatch};
use crate::calendar::{generate_grid, BookedDateSet, CalendarDate, CalendarViewState};
use crate::clock::{Clock, Zone};
use crate::models::{CalendarView, LoadOutcome};
use crate::source::{BookedDatesSource, SourceError};
use chrono::Local;
use tracing::{error, info};

/// Owns the month cursor and the booked dates of one calendar view.
///
/// Booked dates are fetched on `load` only; navigating re-renders from the
/// cached set.
#[derive(Debug, Clone)]
pub struct CalendarController {
    state: CalendarViewState,
    booked: BookedDateSet,
    zone: Zone,
    policy: MalformedPolicy,
}

impl CalendarController {
    pub fn new(state: CalendarViewState, zone: Zone, policy: MalformedPolicy) -> Self {
        Self {
            state,
            booked: BookedDateSet::new(),
            zone,
            policy,
        }
    }

    pub fn from_clock(clock: &impl Clock, zone: Zone, policy: MalformedPolicy) -> Self {
        Self::new(CalendarViewState::from_date(clock.today()), zone, policy)
    }

    pub async fn load<S: BookedDatesSource>(&mut self, source: &S) -> LoadOutcome {
        let fetched = source.fetch().await;
        self.install(fetched)
    }

    /// Replaces the booked set with the result of a fetch. Any failure leaves
    /// an empty set behind so the calendar still renders.
    pub fn install(&mut self, fetched: Result<Vec<String>, SourceError>) -> LoadOutcome {
        let parsed = match fetched {
            Ok(raws) => self.parse(&raws),
            Err(err) => {
                error!("failed to fetch booked dates: {err}");
                self.booked = BookedDateSet::new();
                return LoadOutcome::Degraded {
                    reason: err.to_string(),
                };
            }
        };

        match parsed {
            Ok(ParsedBatch { dates, skipped }) => {
                info!(booked = dates.len(), skipped, "loaded booked dates");
                let booked = dates.len();
                self.booked = dates;
                LoadOutcome::Loaded { booked, skipped }
            }
            Err(err) => {
                error!("rejected booked dates: {err}");
                self.booked = BookedDateSet::new();
                LoadOutcome::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn parse(&self, raws: &[String]) -> Result<ParsedBatch, ParseError> {
        match self.zone {
            Zone::Local => parse_batch(raws, &Local, self.policy),
            Zone::Fixed(offset) => parse_batch(raws, &offset, self.policy),
        }
    }

    pub fn state(&self) -> CalendarViewState {
        self.state
    }

    pub fn view(&self) -> CalendarView {
        self.view_of(self.state)
    }

    /// Renders any month against the cached booked dates without moving the
    /// cursor.
    pub fn view_of(&self, state: CalendarViewState) -> CalendarView {
        let cells = generate_grid(&state, &self.booked);
        CalendarView {
            year: state.year(),
            month: state.month(),
            label: state.label(),
            booked_in_month: cells.iter().filter(|cell| cell.is_booked).count(),
            cells,
        }
    }

    pub fn next(&mut self) -> CalendarView {
        self.state.advance();
        self.view()
    }

    pub fn prev(&mut self) -> CalendarView {
        self.state.retreat();
        self.view()
    }

    pub fn reset_to(&mut self, clock: &impl Clock) -> CalendarView {
        self.state = CalendarViewState::from_date(clock.today());
        self.view()
    }

    pub fn booked_dates(&self) -> Vec<CalendarDate> {
        self.booked.sorted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Placement;
    use crate::clock::FixedClock;
    use crate::source::StaticSource;
    use chrono::{FixedOffset, NaiveDate};

    fn utc() -> Zone {
        Zone::Fixed(FixedOffset::east_opt(0).unwrap())
    }

    fn clock(year: i32, month: u32, day: u32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn source(dates: &[&str]) -> StaticSource {
        StaticSource(dates.iter().map(|date| date.to_string()).collect())
    }

    fn booked_days(view: &CalendarView) -> Vec<u32> {
        view.cells
            .iter()
            .filter(|cell| cell.is_booked)
            .map(|cell| cell.day_number)
            .collect()
    }

    #[test]
    fn initial_month_comes_from_clock() {
        let controller =
            CalendarController::from_clock(&clock(2025, 1, 14), utc(), MalformedPolicy::Skip);
        let view = controller.view();
        assert_eq!((view.year, view.month), (2025, 0));
        assert_eq!(view.label, "January 2025");
        assert_eq!(view.booked_in_month, 0);
    }

    #[tokio::test]
    async fn load_then_navigate_highlights_bookings() {
        let mut controller =
            CalendarController::from_clock(&clock(2024, 2, 10), utc(), MalformedPolicy::Skip);
        let outcome = controller
            .load(&source(&["2024-03-15", "2024-04-02T09:30:00", "garbage"]))
            .await;
        assert_eq!(outcome, LoadOutcome::Loaded { booked: 2, skipped: 1 });

        let february = controller.view();
        assert_eq!(february.label, "February 2024");
        assert!(booked_days(&february).is_empty());

        let march = controller.next();
        assert_eq!(booked_days(&march), vec![15]);
        assert_eq!(march.booked_in_month, 1);

        let april = controller.next();
        assert_eq!(booked_days(&april), vec![2]);

        let back = controller.prev();
        assert_eq!(back, march);
    }

    #[test]
    fn fetch_failure_degrades_to_empty_set() {
        let mut controller =
            CalendarController::from_clock(&clock(2024, 3, 1), utc(), MalformedPolicy::Skip);
        controller.install(Ok(vec!["2024-03-15".to_string()]));
        assert_eq!(controller.booked_dates().len(), 1);

        let outcome = controller.install(Err(SourceError::Io(std::io::Error::other("down"))));
        assert!(matches!(outcome, LoadOutcome::Degraded { .. }));
        assert!(controller.booked_dates().is_empty());

        let view = controller.view();
        assert_eq!(view.cells.len() % 7, 0);
        assert!(view.cells.iter().all(|cell| !cell.is_booked));
    }

    #[test]
    fn abort_policy_degrades_on_malformed_entry() {
        let mut controller =
            CalendarController::from_clock(&clock(2024, 3, 1), utc(), MalformedPolicy::Abort);
        let outcome = controller.install(Ok(vec!["2024-03-15".to_string(), "soon".to_string()]));
        assert_eq!(
            outcome,
            LoadOutcome::Degraded {
                reason: "malformed booked date \"soon\"".to_string()
            }
        );
        assert!(controller.booked_dates().is_empty());
    }

    #[test]
    fn offsets_resolve_in_controller_zone() {
        let zone = Zone::Fixed(FixedOffset::east_opt(10 * 3600).unwrap());
        let mut controller =
            CalendarController::from_clock(&clock(2024, 3, 1), zone, MalformedPolicy::Skip);
        controller.install(Ok(vec!["2024-03-15T20:00:00Z".to_string()]));

        assert_eq!(booked_days(&controller.view()), vec![16]);
    }

    #[test]
    fn view_of_leaves_cursor_alone() {
        let mut controller =
            CalendarController::from_clock(&clock(2024, 3, 1), utc(), MalformedPolicy::Skip);
        controller.install(Ok(vec!["2025-01-01".to_string()]));

        let january = controller.view_of(CalendarViewState::new(2025, 0));
        assert_eq!(january.cells[3].placement, Placement::CurrentMonth);
        assert!(january.cells[3].is_booked);
        assert_eq!(controller.state(), CalendarViewState::new(2024, 2));
    }

    #[test]
    fn reset_returns_to_clock_month() {
        let today = clock(2024, 3, 1);
        let mut controller = CalendarController::from_clock(&today, utc(), MalformedPolicy::Skip);
        controller.next();
        controller.next();
        controller.prev();
        assert_eq!(controller.state(), CalendarViewState::new(2024, 3));

        let view = controller.reset_to(&today);
        assert_eq!((view.year, view.month), (2024, 2));
    }
}

//! # Almanac event scheduler
//!
//! Sequences rise, set and transit times of the tracked bodies, Easter Sundays, equinoxes
//! and solstices into a single stream ordered by Julian Day (UT).
//!
//! ## Design
//!
//! Work items are kept in a min-priority queue keyed by Julian Day. A task either emits a
//! finished [`Event`] or computes new events and schedules its own next occurrence:
//!
//! - the daily rise/set task for day D is keyed half a day before D. It solves every tracked
//!   body on its three-sample window (rise and set to the minute, transit to the second),
//!   then slides each window by one day (dropping D−1, appending D+2 with a single nutation
//!   evaluation shared by all bodies). Crossings that converge on another day are left to
//!   that day's task;
//! - the Easter task of year Y runs on March 1st of Y and reschedules itself for Y+1;
//! - each season task of year Y reschedules the same season of Y+1 at the instant just found.
//!
//! Solver failures are logged with `warn!` and skipped, domain exclusions (circumpolar,
//! never rising, indeterminate) with `debug!`. A body whose position failed is not solved
//! again until its window holds three valid samples.
//!
//! The stream never ends: consume it with [`Scheduler::events_until`].

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    almagest::Almagest,
    almagest_errors::AlmagestError,
    constants::{Body, JulianDay, DAYS_PER_MINUTE, DAYS_PER_SECOND},
    earth_orientation::Nutation,
    equinox::{equinox, equinox_approx, Season},
    observers::Observer,
    riseset::{rise, settime, transit, RiseSetOutcome, RiseSetWindow},
    time::{
        calendar::{easter, julian_day_number, lt_to_str, Calendar, TimeLevel},
        dynamical::dt_to_ut,
        zone::TimeZone,
    },
};

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Rise(Body),
    Set(Body),
    Transit(Body),
    Easter,
    Season(Season),
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Rise(body) => write!(f, "{body} rise"),
            EventKind::Set(body) => write!(f, "{body} set"),
            EventKind::Transit(body) => write!(f, "{body} transit"),
            EventKind::Easter => write!(f, "Easter"),
            EventKind::Season(season @ (Season::Spring | Season::Autumn)) => {
                write!(f, "{season} equinox")
            }
            EventKind::Season(season) => write!(f, "{season} solstice"),
        }
    }
}

/// An almanac event at a Julian Day in Universal Time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub jd: JulianDay,
    pub kind: EventKind,
}

impl Event {
    /// Render the event as a line of almanac in the given time zone.
    ///
    /// Rise, set and transit are printed to the minute, seasons to the second and Easter
    /// as a date only.
    pub fn to_local_string(&self, zone: &TimeZone) -> String {
        let level = match self.kind {
            EventKind::Rise(_) | EventKind::Set(_) | EventKind::Transit(_) => TimeLevel::Minute,
            EventKind::Season(_) => TimeLevel::Second,
            EventKind::Easter => TimeLevel::Day,
        };
        let (local, name) = zone.ut_to_lt(self.jd);
        format!("{} {}", lt_to_str(local, name, level), self.kind)
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    RiseSet,
    Easter(i32),
    Season(i32, Season),
    Emit(Event),
}

#[derive(Debug, Clone, Copy)]
struct Task {
    jd: JulianDay,
    seq: u64,
    action: Action,
}

impl Eq for Task {}
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties on the Julian Day keep insertion order
        self.jd
            .total_cmp(&other.jd)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}
impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

type Solver =
    fn(JulianDay, &RiseSetWindow, &Observer, f64) -> Result<RiseSetOutcome, AlmagestError>;

#[derive(Debug, Clone)]
struct BodyTrack {
    body: Body,
    window: RiseSetWindow,
    /// Samples of the window still invalid after a position failure
    samples_missing: u8,
}

/// Iterator returned by [`Scheduler::events_until`].
pub struct EventsUntil<'s, 'a> {
    scheduler: &'s mut Scheduler<'a>,
    stop_jd: JulianDay,
}

impl Iterator for EventsUntil<'_, '_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.scheduler.next_event_until(self.stop_jd)
    }
}

/// Time-ordered generator of almanac events. See the module documentation.
pub struct Scheduler<'a> {
    almagest: &'a Almagest,
    start: JulianDay,
    tracks: Vec<BodyTrack>,
    queue: BinaryHeap<Reverse<Task>>,
    seq: u64,
}

impl<'a> Scheduler<'a> {
    /// Prepare the event stream from January 1st, 0h UT, of `start_year`.
    ///
    /// The rise/set windows of every tracked body are filled for the days around the start.
    pub fn new(almagest: &'a Almagest, start_year: i32) -> Self {
        let start = julian_day_number(start_year, 1, 1.0, Calendar::Gregorian);
        let nan = (f64::NAN, f64::NAN, f64::NAN);

        let mut scheduler = Scheduler {
            almagest,
            start,
            tracks: almagest
                .env()
                .bodies
                .iter()
                .map(|&body| BodyTrack {
                    body,
                    window: RiseSetWindow::new([nan; 3]),
                    samples_missing: 3,
                })
                .collect(),
            queue: BinaryHeap::new(),
            seq: 0,
        };

        if !scheduler.tracks.is_empty() {
            for day in [start - 1.0, start, start + 1.0] {
                scheduler.slide_windows(day);
            }
            scheduler.push(start - 0.5, Action::RiseSet);
        }

        scheduler.push(
            julian_day_number(start_year, 3, 1.0, Calendar::Gregorian),
            Action::Easter(start_year),
        );
        for season in Season::ALL {
            scheduler.push(start, Action::Season(start_year, season));
        }

        scheduler
    }

    /// First instant of the stream, Julian Day in UT.
    pub fn start(&self) -> JulianDay {
        self.start
    }

    /// The next event in time order.
    pub fn next_event(&mut self) -> Option<Event> {
        self.next_event_until(f64::INFINITY)
    }

    /// Events in ascending Julian Day up to `stop_jd` (inclusive).
    ///
    /// Events after `stop_jd` stay queued and are returned by later calls.
    pub fn events_until(&mut self, stop_jd: JulianDay) -> EventsUntil<'_, 'a> {
        EventsUntil {
            scheduler: self,
            stop_jd,
        }
    }

    fn next_event_until(&mut self, stop_jd: JulianDay) -> Option<Event> {
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(task)| task.jd <= stop_jd)
        {
            let Reverse(task) = self.queue.pop()?;
            match task.action {
                Action::Emit(event) if event.jd >= self.start => return Some(event),
                Action::Emit(_) => {}
                Action::RiseSet => self.run_rise_set(task.jd + 0.5),
                Action::Easter(year) => self.run_easter(year),
                Action::Season(year, season) => self.run_season(task.jd, year, season),
            }
        }
        None
    }

    fn push(&mut self, jd: JulianDay, action: Action) {
        self.seq += 1;
        self.queue.push(Reverse(Task {
            jd,
            seq: self.seq,
            action,
        }));
    }

    fn emit(&mut self, jd: JulianDay, kind: EventKind) {
        self.push(jd, Action::Emit(Event { jd, kind }));
    }

    /// Append the sample of day `jd` (0h TD) to every window.
    fn slide_windows(&mut self, jd: JulianDay) {
        let almagest = self.almagest;
        let nutation = Nutation::at(jd);

        for track in self.tracks.iter_mut() {
            match almagest.apparent_equatorial(track.body, jd, &nutation) {
                Ok((ra, dec, altitude)) => {
                    track.window.slide(ra, dec, altitude);
                    track.samples_missing = track.samples_missing.saturating_sub(1);
                }
                Err(err) => {
                    warn!("{} position at JD {jd}: {err}", track.body);
                    track.window.slide(f64::NAN, f64::NAN, f64::NAN);
                    track.samples_missing = 3;
                }
            }
        }
    }

    fn run_rise_set(&mut self, day: JulianDay) {
        let almagest = self.almagest;
        let observer = almagest.observer();
        let mut found = Vec::new();

        for track in self.tracks.iter().filter(|t| t.samples_missing == 0) {
            let solvers: [(Solver, EventKind, f64); 3] = [
                (rise, EventKind::Rise(track.body), DAYS_PER_MINUTE),
                (settime, EventKind::Set(track.body), DAYS_PER_MINUTE),
                (transit, EventKind::Transit(track.body), DAYS_PER_SECOND),
            ];

            for (solver, kind, delta) in solvers {
                match solver(day, &track.window, observer, delta) {
                    Ok(RiseSetOutcome::Found(jd)) => found.push((jd, kind)),
                    Ok(outcome) => debug!("{kind} on JD {day}: {outcome:?}"),
                    Err(err) => warn!("{kind} on JD {day}: {err}"),
                }
            }
        }

        for (jd, kind) in found {
            self.emit(jd, kind);
        }
        self.slide_windows(day + 2.0);
        self.push(day + 0.5, Action::RiseSet);
    }

    fn run_easter(&mut self, year: i32) {
        let (month, day) = easter(year, Calendar::Gregorian);
        self.emit(
            julian_day_number(year, month, day as f64, Calendar::Gregorian),
            EventKind::Easter,
        );
        self.push(
            julian_day_number(year + 1, 3, 1.0, Calendar::Gregorian),
            Action::Easter(year + 1),
        );
    }

    fn run_season(&mut self, now: JulianDay, year: i32, season: Season) {
        let almagest = self.almagest;
        let sun = almagest.sun();
        let next = match equinox(&sun, equinox_approx(year, season), season, DAYS_PER_SECOND) {
            Ok(jde) => {
                let jd = dt_to_ut(jde);
                self.emit(jd, EventKind::Season(season));
                jd.max(now)
            }
            Err(err) => {
                warn!("{season} {year}: {err}");
                now
            }
        };
        self.push(next, Action::Season(year + 1, season));
    }
}

#[cfg(test)]
mod scheduler_test {
    use super::*;
    use crate::{env_state::AlmagestEnv, time::calendar::hms_to_fday};
    use approx::assert_abs_diff_eq;

    fn almagest_with(bodies: Vec<Body>) -> Almagest {
        Almagest::new(AlmagestEnv::new(
            Observer::default(),
            TimeZone::utc(),
            bodies,
        ))
    }

    #[test]
    fn test_task_order() {
        let mut heap = BinaryHeap::new();
        for (seq, jd) in [(1, 10.0), (2, 5.0), (3, 10.0), (4, -1.0)] {
            heap.push(Reverse(Task {
                jd,
                seq,
                action: Action::RiseSet,
            }));
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|Reverse(t)| t.seq)).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_event_labels() {
        let utc = TimeZone::utc();
        let spring = Event {
            jd: 2460389.5 + hms_to_fday(3, 6, 21.5),
            kind: EventKind::Season(Season::Spring),
        };
        assert_eq!(
            spring.to_local_string(&utc),
            "2024-03-20 03:06:21 UTC Spring equinox"
        );

        let easter = Event {
            jd: julian_day_number(1991, 3, 31.0, Calendar::Gregorian),
            kind: EventKind::Easter,
        };
        assert_eq!(easter.to_local_string(&utc), "1991-03-31 Easter");

        assert_eq!(EventKind::Season(Season::Winter).to_string(), "Winter solstice");
        assert_eq!(EventKind::Transit(Body::Mars).to_string(), "Mars transit");
    }

    #[test]
    fn test_sun_days() {
        let almagest = almagest_with(vec![Body::Sun]);
        let mut scheduler = almagest.scheduler(2024);
        let start = scheduler.start();
        let events: Vec<Event> = scheduler.events_until(start + 3.0).collect();

        assert_eq!(events.len(), 9);
        assert!(events.windows(2).all(|w| w[0].jd <= w[1].jd));
        assert!(events.iter().all(|e| e.jd >= start && e.jd <= start + 3.0));

        let kinds: Vec<EventKind> = events.iter().take(3).map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Rise(Body::Sun),
                EventKind::Transit(Body::Sun),
                EventKind::Set(Body::Sun)
            ]
        );
        // Sunrise at Greenwich early January is a little after 8h UT
        assert_abs_diff_eq!(events[0].jd - start, 8.1 / 24.0, epsilon = 0.1 / 24.0);
    }

    #[test]
    fn test_transit_to_the_second() {
        let almagest = almagest_with(vec![Body::Sun]);
        let mut scheduler = almagest.scheduler(2024);
        let start = scheduler.start();
        let noon = scheduler
            .events_until(start + 1.0)
            .find(|e| e.kind == EventKind::Transit(Body::Sun))
            .unwrap();

        let window = RiseSetWindow::new([start - 1.0, start, start + 1.0].map(|jd| {
            almagest
                .apparent_equatorial(Body::Sun, jd, &Nutation::at(jd))
                .unwrap()
        }));
        let observer = almagest.observer();
        let fine = transit(start, &window, observer, DAYS_PER_SECOND).unwrap();
        assert_eq!(Some(noon.jd), fine.jd());

        let coarse = transit(start, &window, observer, DAYS_PER_MINUTE).unwrap();
        assert_abs_diff_eq!(noon.jd, coarse.jd().unwrap(), epsilon = DAYS_PER_MINUTE);
    }

    #[test]
    fn test_yearly_events() {
        let almagest = almagest_with(Vec::new());
        let mut scheduler = almagest.scheduler(1991);
        let start = scheduler.start();
        let events: Vec<Event> = scheduler.events_until(start + 366.0).collect();

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Season(Season::Spring),
                EventKind::Easter,
                EventKind::Season(Season::Summer),
                EventKind::Season(Season::Autumn),
                EventKind::Season(Season::Winter),
            ]
        );
        assert_eq!(
            events[1].jd,
            julian_day_number(1991, 3, 31.0, Calendar::Gregorian)
        );

        let sun = almagest.sun();
        let spring = equinox(
            &sun,
            equinox_approx(1991, Season::Spring),
            Season::Spring,
            DAYS_PER_SECOND,
        )
        .unwrap();
        assert_eq!(events[0].jd, dt_to_ut(spring));

        // The stream continues after the stop instant
        let next = scheduler.next_event().unwrap();
        assert_eq!(next.kind, EventKind::Season(Season::Spring));
        assert!(next.jd > start + 366.0);
    }
}

//! Day-by-day itinerary built from a fixed three-slot template.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::iter::FusedIterator;

pub const MORNING: &str = "Local sightseeing & breakfast";
pub const AFTERNOON: &str = "Popular attractions & lunch";
pub const EVENING: &str = "Leisure activities / shopping";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryDay {
    /// 1-based
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub evening: &'static str,
}

/// Lazy sequence of itinerary days. Cloning restarts from the same position.
#[derive(Debug, Clone)]
pub struct Itinerary {
    next: u32,
    days: u32,
    start_date: Option<NaiveDate>,
}

/// Itinerary of `days` entries, dated from `start_date` when known.
pub fn build_itinerary(days: u32, start_date: Option<NaiveDate>) -> Itinerary {
    Itinerary {
        next: 0,
        days,
        start_date,
    }
}

impl Iterator for Itinerary {
    type Item = ItineraryDay;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.days {
            return None;
        }
        let index = self.next;
        self.next += 1;

        Some(ItineraryDay {
            day: index + 1,
            date: self
                .start_date
                .and_then(|start| start.checked_add_days(Days::new(u64::from(index)))),
            morning: MORNING,
            afternoon: AFTERNOON,
            evening: EVENING,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.days - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Itinerary {}

impl FusedIterator for Itinerary {}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EventId;

/// Event type used when the caller does not name one.
pub const DEFAULT_EVENT_TYPE: &str = "discovery";

/// A historical event on a world's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: EventId,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: String,
    /// Free-form date, e.g. `Year 312 of the Second Age`.
    pub date: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only list of events, kept sorted by date string.
///
/// The ordering is plain lexicographic comparison of the raw `date` text:
/// `"Year 10"` sorts before `"Year 9"`. Events with equal dates keep their
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and re-sort the whole list.
    pub fn insert(&mut self, event: TimelineEvent) {
        self.events.push(event);
        self.events.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// All events in date-string order.
    pub fn entries(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Events of one type, in timeline order.
    pub fn of_type<'a>(&'a self, event_type: &'a str) -> impl Iterator<Item = &'a TimelineEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }

    /// Highest event id present, if any.
    pub fn max_id(&self) -> Option<EventId> {
        self.events.iter().map(|e| e.id).max()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64, event_type: &str, date: &str) -> TimelineEvent {
        TimelineEvent {
            id: EventId(id),
            event_type: event_type.to_string(),
            description: format!("event {id}"),
            date: date.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sorts_lexicographically_not_numerically() {
        let mut timeline = Timeline::new();
        timeline.insert(event(1, "war", "Year 50 of the First Age"));
        timeline.insert(event(2, "war", "Year 5 of the First Age"));
        timeline.insert(event(3, "war", "Year 500 of the First Age"));

        let dates: Vec<&str> = timeline.entries().iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "Year 5 of the First Age",
                "Year 50 of the First Age",
                "Year 500 of the First Age",
            ]
        );

        let mut timeline = Timeline::new();
        timeline.insert(event(1, "war", "Year 50"));
        timeline.insert(event(2, "war", "Year 5 BCE"));
        timeline.insert(event(3, "war", "Year 500"));
        let ids: Vec<u64> = timeline.entries().iter().map(|e| e.id.value()).collect();
        // "Year 5 " < "Year 50" < "Year 500" because ' ' < '0'
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn numeric_years_with_more_digits_can_sort_first() {
        let mut timeline = Timeline::new();
        timeline.insert(event(1, "founding", "Year 9"));
        timeline.insert(event(2, "founding", "Year 10"));
        let dates: Vec<&str> = timeline.entries().iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["Year 10", "Year 9"]);
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.insert(event(1, "a", "Year 1"));
        timeline.insert(event(2, "b", "Year 1"));
        timeline.insert(event(3, "c", "Year 0"));
        let ids: Vec<u64> = timeline.entries().iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn filter_by_type() {
        let mut timeline = Timeline::new();
        timeline.insert(event(1, "battle", "Year 3"));
        timeline.insert(event(2, "discovery", "Year 2"));
        timeline.insert(event(3, "battle", "Year 1"));
        let battles: Vec<u64> = timeline.of_type("battle").map(|e| e.id.value()).collect();
        assert_eq!(battles, vec![3, 1]);
        assert_eq!(timeline.max_id(), Some(EventId(3)));
        assert_eq!(timeline.len(), 3);
    }
}

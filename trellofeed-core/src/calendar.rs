//! Calendar aggregation and ICS serialization.

use crate::event::CalendarEvent;
use icalendar::{Component, EventLike};

/// Product identifier emitted in the calendar header.
pub const PRODID: &str = "-//sveder.com/trello_to_ical//EN";

/// iCalendar format version.
pub const VERSION: &str = "2.0";

/// One feed's calendar document: fixed metadata plus the mapped events
/// in pipeline order. Built fresh per render and discarded after
/// serialization.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub prodid: &'static str,
    pub version: &'static str,
    pub events: Vec<CalendarEvent>,
}

/// Aggregate mapped events into a calendar document.
///
/// Events keep their input order; nothing is deduplicated or dropped. An
/// empty event list still yields a valid calendar with metadata only.
pub fn build_calendar(events: Vec<CalendarEvent>) -> Calendar {
    Calendar {
        prodid: PRODID,
        version: VERSION,
        events,
    }
}

impl Calendar {
    /// Serialize to iCalendar text, suitable as a `text/calendar` body.
    pub fn to_ics(&self) -> String {
        let mut cal = icalendar::Calendar::new();

        for event in &self.events {
            let mut ics_event = icalendar::Event::new();
            ics_event.uid(&event.uid);
            ics_event.summary(&event.summary);
            ics_event.description(&event.description);
            ics_event.starts(event.start);
            ics_event.ends(event.end);
            // DTSTAMP is required by RFC 5545. Pin it to the event start
            // so identical inputs serialize to identical bytes.
            ics_event.add_property("DTSTAMP", event.start.format("%Y%m%dT%H%M%SZ").to_string());
            cal.push(ics_event.done());
        }

        let cal = cal.done();
        pin_header(&cal.to_string(), self.prodid, self.version)
    }
}

/// Rewrite the header lines the icalendar crate emits on its own:
/// replace its PRODID and VERSION with ours and drop CALSCALE:GREGORIAN
/// (it is the default).
fn pin_header(ics: &str, prodid: &str, version: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(prodid);
            result.push_str("\r\n");
            continue;
        }

        if line.starts_with("VERSION:") {
            result.push_str("VERSION:");
            result.push_str(version);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_event(uid: &str) -> CalendarEvent {
        CalendarEvent {
            uid: uid.to_string(),
            summary: "Trello Item: Short...".to_string(),
            description: "https://t/c1".to_string(),
            start: Utc.with_ymd_and_hms(2999, 1, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2999, 1, 1, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_calendar_is_valid() {
        let ics = build_calendar(vec![]).to_ics();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//sveder.com/trello_to_ical//EN\r\n"));
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn events_appear_in_input_order() {
        let cal = build_calendar(vec![make_event("a1"), make_event("b2")]);
        let ics = cal.to_ics();

        let first = ics.find("UID:a1").expect("first uid missing");
        let second = ics.find("UID:b2").expect("second uid missing");
        assert!(first < second);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn event_fields_are_serialized() {
        let ics = build_calendar(vec![make_event("c1trello_to_ical")]).to_ics();

        assert!(ics.contains("UID:c1trello_to_ical\r\n"));
        assert!(ics.contains("SUMMARY:Trello Item: Short...\r\n"));
        assert!(ics.contains("DESCRIPTION:https://t/c1\r\n"));
        assert!(ics.contains("DTSTART:29990101T100000Z\r\n"));
        assert!(ics.contains("DTEND:29990101T103000Z\r\n"));
    }

    #[test]
    fn calscale_default_is_dropped() {
        let ics = build_calendar(vec![]).to_ics();
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn serialization_is_deterministic() {
        let events = vec![make_event("a1")];
        let first = build_calendar(events.clone()).to_ics();
        let second = build_calendar(events).to_ics();
        assert_eq!(first, second);
    }
}

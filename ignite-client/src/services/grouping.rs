//! Start-time grouping for list display
//!
//! Sessions sharing an identical start instant form one section; sections
//! are ordered ascending by start time. The output always replaces a
//! previous aggregate in full; nothing here merges into existing state.

use crate::models::Session;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// One display section: every session starting at the same instant
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSection {
    pub start_time: NaiveDateTime,
    pub sessions: Vec<Session>,
}

/// Group sessions by exact start time into ascending sections.
///
/// Within a section, sessions keep the relative order in which they
/// appeared in the input. The API already emits sessions chronologically,
/// but the BTreeMap makes the ascending order hold regardless.
pub fn group_sessions(sessions: Vec<Session>) -> Vec<ScheduleSection> {
    let mut by_start: BTreeMap<NaiveDateTime, Vec<Session>> = BTreeMap::new();

    for session in sessions {
        by_start
            .entry(session.schedule.start_date_time)
            .or_default()
            .push(session);
    }

    by_start
        .into_iter()
        .map(|(start_time, sessions)| ScheduleSection {
            start_time,
            sessions,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_wire_datetime;
    use std::collections::HashMap;

    fn session_at(id: i64, start: &str) -> Session {
        let mut session = Session {
            session_id: id,
            name: format!("s{id}"),
            ..Session::default()
        };
        if let Some(start) = parse_wire_datetime(start) {
            session.schedule.start_date_time = start;
        }
        session
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(group_sessions(Vec::new()).is_empty());
    }

    #[test]
    fn sections_are_ascending_with_unique_start_times() {
        let input = vec![
            session_at(1, "2015-09-03T11:00:00"),
            session_at(2, "2015-09-03T09:00:00"),
            session_at(3, "2015-09-03T11:00:00"),
            session_at(4, "2015-09-03T10:00:00"),
        ];

        let sections = group_sessions(input);

        assert_eq!(sections.len(), 3);
        for pair in sections.windows(2) {
            assert!(pair[0].start_time < pair[1].start_time);
        }
    }

    #[test]
    fn sessions_within_a_section_keep_encounter_order() {
        let input = vec![
            session_at(1, "2015-09-03T09:00:00"),
            session_at(2, "2015-09-03T09:00:00"),
            session_at(3, "2015-09-03T09:00:00"),
        ];

        let sections = group_sessions(input);
        assert_eq!(sections.len(), 1);
        let ids: Vec<_> = sections[0].sessions.iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn grouping_preserves_the_session_multiset() {
        // duplicates across pages are legal; the group must keep them all
        let input = vec![
            session_at(1, "2015-09-03T09:00:00"),
            session_at(1, "2015-09-03T09:00:00"),
            session_at(2, "2015-09-03T10:00:00"),
            session_at(3, "2015-09-04T09:00:00"),
        ];

        let mut expected: HashMap<i64, usize> = HashMap::new();
        for session in &input {
            *expected.entry(session.session_id).or_default() += 1;
        }

        let sections = group_sessions(input);

        let mut actual: HashMap<i64, usize> = HashMap::new();
        for section in &sections {
            for session in &section.sessions {
                *actual.entry(session.session_id).or_default() += 1;
                assert_eq!(session.schedule.start_date_time, section.start_time);
            }
        }
        assert_eq!(actual, expected);
    }

    #[test]
    fn default_start_times_group_into_the_epoch_section() {
        let input = vec![
            Session::default(),
            session_at(2, "2015-09-03T10:00:00"),
            Session::default(),
        ];

        let sections = group_sessions(input);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].start_time, crate::models::epoch());
        assert_eq!(sections[0].sessions.len(), 2);
    }
}

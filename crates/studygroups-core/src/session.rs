//! Caller-held group snapshot and the edits applied to it.
//!
//! The validator only decides; [`Session::try_move`] is the one place a
//! validated move is carried out.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::matcher::{select_leader, MatchOutcome};
use crate::models::{find_common_slots, Group, MemberDetail, Person};
use crate::validate::{check_move, MoveDecision, MoveRequest};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub groups: Vec<Group>,
    pub people: Vec<Person>,
}

impl From<MatchOutcome> for Session {
    fn from(outcome: MatchOutcome) -> Self {
        Self {
            groups: outcome.groups,
            people: outcome.people,
        }
    }
}

impl Session {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Check only; the session is left untouched.
    pub fn check(&self, request: &MoveRequest, config: &Config) -> MoveDecision {
        check_move(request, &self.groups, &self.people, config).into()
    }

    /// Validate `request` and, when allowed, apply it.
    ///
    /// The person is removed from the source and appended to the
    /// destination. Both groups get fresh common slots. If the person led
    /// the source group, a new source leader is picked with the same rule
    /// the matcher uses.
    pub fn try_move(&mut self, request: &MoveRequest, config: &Config) -> MoveDecision {
        let result = check_move(request, &self.groups, &self.people, config);
        match &result {
            Ok(common) => {
                self.apply(request, common.clone());
                debug!(person = %request.person_id, "Moved person");
                info!(
                    from = %request.from_group_id,
                    to = %request.to_group_id,
                    "Member moved"
                );
            }
            Err(rejection) => debug!(person = %request.person_id, %rejection, "Move rejected"),
        }
        result.into()
    }

    fn apply(&mut self, request: &MoveRequest, to_common: Vec<String>) {
        let person_id = request.person_id.as_str();
        let mut detail = self.person(person_id).map(MemberDetail::from);

        if let Some(from) = self.groups.iter_mut().find(|g| g.id == request.from_group_id) {
            from.members.retain(|m| m != person_id);
            // Fall back to the old entry if the roster no longer has this person.
            detail = detail.or(from.member_details.remove(person_id));
            if from.leader.as_deref() == Some(person_id) {
                from.leader = None;
            }
        }

        if let Some(to) = self.groups.iter_mut().find(|g| g.id == request.to_group_id) {
            to.members.push(person_id.to_string());
            to.common_availabilities = to_common;
            if let Some(detail) = detail {
                to.member_details.insert(person_id.to_string(), detail);
            }
        }

        self.refresh_group(&request.from_group_id);
    }

    /// Recompute common slots and fill an empty leader seat from live
    /// membership.
    fn refresh_group(&mut self, group_id: &str) {
        let Some(index) = self.groups.iter().position(|g| g.id == group_id) else {
            return;
        };
        let group = &self.groups[index];
        let members: Vec<&Person> = group
            .members
            .iter()
            .filter_map(|id| self.people.iter().find(|p| &p.id == id))
            .collect();

        let common = find_common_slots(members.iter().map(|p| &p.availability));
        let leader = match group.leader {
            Some(ref id) => Some(id.clone()),
            None => select_leader(members.iter().copied(), &group.study_key()).map(|p| p.id.clone()),
        };

        let group = &mut self.groups[index];
        group.common_availabilities = common;
        group.leader = leader;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::build_group;
    use crate::models::Availability;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn person(id: &str, slots: &[&str], willing: bool) -> Person {
        let availability: Availability = slots.iter().map(|s| (s.to_string(), true)).collect();
        Person {
            id: id.to_string(),
            first: id.to_string(),
            last: "X".to_string(),
            gender: "male".to_string(),
            email: String::new(),
            phone: String::new(),
            year: String::new(),
            program: String::new(),
            religion: String::new(),
            next_study: Some("trust".to_string()),
            willing_to_lead: willing,
            already_led: Vec::new(),
            availability,
        }
    }

    fn session() -> Session {
        let people = vec![
            person("a", &["Mon", "Tue"], true),
            person("b", &["Mon", "Tue", "Wed"], false),
            person("c", &["Mon", "Tue", "Wed"], true),
            person("d", &["Mon", "Wed"], false),
            person("e", &["Mon", "Wed"], false),
        ];
        let g1 = build_group(
            "G1".to_string(),
            "trust",
            "male",
            &[&people[0], &people[1], &people[2]],
            vec!["Mon".to_string(), "Tue".to_string()],
        );
        let g2 = build_group(
            "G2".to_string(),
            "trust",
            "male",
            &[&people[3], &people[4]],
            vec!["Mon".to_string(), "Wed".to_string()],
        );
        Session {
            groups: vec![g1, g2],
            people,
        }
    }

    #[test]
    fn test_try_move_applies_valid_move() {
        let mut s = session();
        let decision = s.try_move(&MoveRequest::new("b", "G1", "G2"), &Config::default());
        assert!(decision.valid);

        let g1 = s.group("G1").unwrap();
        let g2 = s.group("G2").unwrap();
        assert_eq!(g1.members, vec!["a", "c"]);
        assert_eq!(g2.members, vec!["d", "e", "b"]);
        assert_eq!(g2.common_availabilities, vec!["Mon", "Wed"]);
        assert_eq!(g1.common_availabilities, vec!["Mon", "Tue"]);
        assert!(g2.member_details.contains_key("b"));
        assert!(!g1.member_details.contains_key("b"));
    }

    #[test]
    fn test_moving_the_leader_reelects_source_leader() {
        let mut s = session();
        assert_eq!(s.group("G1").unwrap().leader.as_deref(), Some("a"));

        let decision = s.try_move(&MoveRequest::new("a", "G1", "G2"), &Config::default());
        assert!(decision.valid);
        assert_eq!(s.group("G1").unwrap().leader.as_deref(), Some("c"));
        assert_eq!(s.group("G1").unwrap().common_availabilities, vec!["Mon", "Tue", "Wed"]);
        assert_eq!(s.group("G2").unwrap().leader, None);
    }

    #[test]
    fn test_rejected_move_leaves_session_unchanged() {
        let mut s = session();
        let before = s.clone();
        let decision = s.try_move(&MoveRequest::new("d", "G2", "G1"), &Config::default());
        assert!(!decision.valid);
        assert_eq!(
            decision.reason.as_deref(),
            Some("Source group would be too small (min 2 people)")
        );
        assert_eq!(s, before);
    }

    #[test]
    fn test_move_of_non_member_is_refused() {
        let mut s = session();
        let before = s.clone();
        // d sits in G2; naming G1 as the source must not duplicate d in G2.
        let decision = s.try_move(&MoveRequest::new("d", "G1", "G2"), &Config::default());
        assert!(!decision.valid);
        assert_eq!(decision.reason.as_deref(), Some("Person or group not found"));
        assert_eq!(s, before);
        assert_eq!(s.group("G2").unwrap().members, vec!["d", "e"]);
    }

    /// Shared buffer for capturing formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_info_log_omits_person_id() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        let mut s = session();
        let decision = tracing::subscriber::with_default(subscriber, || {
            s.try_move(&MoveRequest::new("b", "G1", "G2"), &Config::default())
        });
        assert!(decision.valid);

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Member moved"));
        assert!(output.contains("G1"));
        assert!(!output.contains("person"));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let s = session();
        let decision = s.check(&MoveRequest::new("b", "G1", "G2"), &Config::default());
        assert_eq!(decision.common_slots, Some(vec!["Mon".to_string(), "Wed".to_string()]));
        assert_eq!(s.group("G2").unwrap().members.len(), 2);
    }
}

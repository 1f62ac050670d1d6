//! Slot availability and common-slot intersection.
//!
//! A respondent's free-text answer for a time-slot column counts as "free"
//! only when it names a weekday. The predicate runs once, in the normalizer;
//! grouping and move validation both intersect the resulting flags, so the
//! two can never disagree about who is free when.

use std::collections::{BTreeMap, BTreeSet};

/// Slot label -> free on that slot.
pub type Availability = BTreeMap<String, bool>;

/// True when `value` mentions at least one of `weekdays` (case-insensitive).
///
/// Anything else, including text like "anytime" or "evenings", is not free.
pub fn names_weekday(value: &str, weekdays: &[String]) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    let lower = value.to_lowercase();
    weekdays.iter().any(|day| lower.contains(day.as_str()))
}

/// Labels of every slot all of the given people are free on, sorted.
///
/// An empty input yields an empty list rather than "every slot".
pub fn find_common_slots<'a, I>(availabilities: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Availability>,
{
    let mut iter = availabilities.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut common: BTreeSet<&str> = free_slots(first).collect();
    for avail in iter {
        if common.is_empty() {
            break;
        }
        common.retain(|slot| avail.get(*slot).copied().unwrap_or(false));
    }

    common.into_iter().map(str::to_string).collect()
}

fn free_slots(avail: &Availability) -> impl Iterator<Item = &str> {
    avail
        .iter()
        .filter(|(_, free)| **free)
        .map(|(slot, _)| slot.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn avail(pairs: &[(&str, bool)]) -> Availability {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_names_weekday_matches_plural_and_case() {
        let days = Config::default().weekdays;
        assert!(names_weekday("Fridays", &days));
        assert!(names_weekday("MONDAYS, wednesdays", &days));
        assert!(names_weekday("  Sunday evening ", &days));
    }

    #[test]
    fn test_names_weekday_ignores_non_day_text() {
        let days = Config::default().weekdays;
        assert!(!names_weekday("", &days));
        assert!(!names_weekday("   ", &days));
        assert!(!names_weekday("anytime", &days));
        assert!(!names_weekday("weekends", &days));
        assert!(!names_weekday("nan", &days));
    }

    #[test]
    fn test_find_common_slots_empty_input() {
        let none: Vec<Availability> = Vec::new();
        assert!(find_common_slots(&none).is_empty());
    }

    #[test]
    fn test_find_common_slots_intersection_sorted() {
        let a = avail(&[("Slot C", true), ("Slot A", true), ("Slot B", false)]);
        let b = avail(&[("Slot A", true), ("Slot C", true), ("Slot B", true)]);
        let c = avail(&[("Slot C", true), ("Slot A", true)]);

        assert_eq!(find_common_slots([&a, &b, &c]), vec!["Slot A", "Slot C"]);
    }

    #[test]
    fn test_find_common_slots_missing_slot_is_not_free() {
        let a = avail(&[("Slot A", true)]);
        let b = avail(&[("Slot B", true)]);
        assert!(find_common_slots([&a, &b]).is_empty());
    }

    #[test]
    fn test_find_common_slots_single_person() {
        let a = avail(&[("Slot B", true), ("Slot A", true), ("Slot C", false)]);
        assert_eq!(find_common_slots([&a]), vec!["Slot A", "Slot B"]);
    }
}

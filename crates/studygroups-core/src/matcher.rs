//! Group matcher.
//!
//! Buckets eligible people by (gender, next study) and forms at most one
//! group per bucket: sizes are tried from largest to smallest, combinations
//! of each size are walked in lexicographic order over the bucket, and the
//! first combination sharing a free slot wins. The search then stops for
//! that bucket, so a bucket of twelve compatible people yields one group of
//! five and leaves seven unmatched.
//!
//! This is a greedy first-fit, not an optimal partition.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{find_common_slots, Group, MemberDetail, Person};
use crate::utils::capitalize;

// ============================================================================
// Combinations
// ============================================================================

/// Lexicographic `k`-combinations of `0..n` as index vectors,
/// `[0, 1, 2], [0, 1, 3], ...`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost position that can still move forward.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

// ============================================================================
// Buckets and Leaders
// ============================================================================

/// Eligible people sharing one (gender, next study) pair, in roster order.
#[derive(Debug, Clone)]
pub struct Bucket<'p> {
    pub gender: String,
    pub study: String,
    pub members: Vec<&'p Person>,
}

/// First member willing to lead who has not already led `study`.
pub fn select_leader<'p, I>(members: I, study: &str) -> Option<&'p Person>
where
    I: IntoIterator<Item = &'p Person>,
{
    members.into_iter().find(|m| m.can_lead(study))
}

// ============================================================================
// Matcher
// ============================================================================

/// Result of one matching run: the groups formed and every person from the
/// roster, unchanged.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub groups: Vec<Group>,
    pub people: Vec<Person>,
}

impl MatchOutcome {
    pub fn eligible_count(&self) -> usize {
        self.people.iter().filter(|p| p.is_eligible()).count()
    }

    /// Ids filtered out before bucketing (blank gender or no study left).
    pub fn excluded(&self) -> Vec<&str> {
        self.people
            .iter()
            .filter(|p| !p.is_eligible())
            .map(|p| p.id.as_str())
            .collect()
    }

    /// Eligible ids that did not end up in any group.
    pub fn unmatched(&self) -> Vec<&str> {
        let placed: HashSet<&str> = self
            .groups
            .iter()
            .flat_map(|g| g.members.iter().map(String::as_str))
            .collect();
        self.people
            .iter()
            .filter(|p| p.is_eligible() && !placed.contains(p.id.as_str()))
            .map(|p| p.id.as_str())
            .collect()
    }
}

pub struct GroupMatcher<'c> {
    config: &'c Config,
}

impl<'c> GroupMatcher<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Group eligible people by exact (gender, next study), keeping buckets
    /// in order of first appearance.
    pub fn buckets<'p>(&self, people: &'p [Person]) -> Vec<Bucket<'p>> {
        let mut buckets: Vec<Bucket<'p>> = Vec::new();
        let mut index: HashMap<(&'p str, &'p str), usize> = HashMap::new();

        for person in people.iter().filter(|p| p.is_eligible()) {
            let Some(study) = person.next_study.as_deref() else {
                continue;
            };
            let key = (person.gender.as_str(), study);
            match index.get(&key) {
                Some(&i) => buckets[i].members.push(person),
                None => {
                    index.insert(key, buckets.len());
                    buckets.push(Bucket {
                        gender: person.gender.clone(),
                        study: study.to_string(),
                        members: vec![person],
                    });
                }
            }
        }

        buckets
    }

    /// Run one matching pass over `people`.
    pub fn match_cohort(&self, people: Vec<Person>) -> MatchOutcome {
        let mut groups = Vec::new();

        for bucket in self.buckets(&people) {
            debug!(
                gender = %bucket.gender,
                study = %bucket.study,
                size = bucket.members.len(),
                "Matching bucket"
            );
            let id = format!("G{}", groups.len() + 1);
            if let Some(group) = self.form_group(&bucket, id) {
                debug!(group = %group.id, members = group.size(), leader = ?group.leader, "Group formed");
                groups.push(group);
            } else {
                debug!(gender = %bucket.gender, study = %bucket.study, "No valid combination in bucket");
            }
        }

        let outcome = MatchOutcome { groups, people };
        info!(
            people = outcome.people.len(),
            eligible = outcome.eligible_count(),
            groups = outcome.groups.len(),
            unmatched = outcome.unmatched().len(),
            "Matching complete"
        );
        outcome
    }

    /// First valid group for a bucket, trying the largest size first.
    fn form_group(&self, bucket: &Bucket<'_>, id: String) -> Option<Group> {
        let largest = self.config.max_group_size.min(bucket.members.len());
        let smallest = self.config.min_group_size.max(1);
        if largest < smallest {
            return None;
        }

        for size in (smallest..=largest).rev() {
            if let Some((picked, common)) = self.first_fit(&bucket.members, size) {
                let members: Vec<&Person> = picked.iter().map(|&i| bucket.members[i]).collect();
                return Some(build_group(id, &bucket.study, &bucket.gender, &members, common));
            }
        }
        None
    }

    /// First `size`-combination of `members` with a shared free slot.
    fn first_fit(&self, members: &[&Person], size: usize) -> Option<(Vec<usize>, Vec<String>)> {
        for (tried, combo) in Combinations::new(members.len(), size).enumerate() {
            if tried >= self.config.search_limit {
                warn!(
                    size,
                    bucket = members.len(),
                    limit = self.config.search_limit,
                    "Combination search limit reached"
                );
                return None;
            }
            let common = find_common_slots(combo.iter().map(|&i| &members[i].availability));
            if !common.is_empty() {
                return Some((combo, common));
            }
        }
        None
    }
}

/// Assemble a group record from its members, in the given order.
pub fn build_group(
    id: String,
    study: &str,
    gender: &str,
    members: &[&Person],
    common_availabilities: Vec<String>,
) -> Group {
    let leader = select_leader(members.iter().copied(), study).map(|p| p.id.clone());
    let member_details: BTreeMap<String, MemberDetail> = members
        .iter()
        .map(|m| (m.id.clone(), MemberDetail::from(*m)))
        .collect();

    Group {
        id,
        faith_study: capitalize(study),
        gender: capitalize(gender),
        leader,
        members: members.iter().map(|m| m.id.clone()).collect(),
        common_availabilities,
        member_details,
    }
}

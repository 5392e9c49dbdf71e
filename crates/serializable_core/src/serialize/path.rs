//! Relation path parsing and grouping.
//!
//! # Invariants
//! - Input path specifications are never mutated; consumption is tracked
//!   with a side vector of processed markers.
//! - Groups come out in the order their head first appeared.
//! - Specs sharing a head always land in one group.

/// Reserved separator between relation segments, e.g. `posts__comments`.
pub const PATH_DELIMITER: &str = "__";

/// Specs for one immediate relation and the sub-paths requested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup<'a> {
    head: &'a str,
    joins: Vec<&'a str>,
}

impl<'a> PathGroup<'a> {
    /// Relation name resolved on the current record.
    pub fn head(&self) -> &'a str {
        self.head
    }

    /// Nested path specs handed to the related record(s).
    pub fn joins(&self) -> &[&'a str] {
        &self.joins
    }
}

/// Splits a spec at its first delimiter into `(head, remainder)`.
///
/// `remainder` is empty when the spec names a single relation.
pub fn split_path(spec: &str) -> (&str, &str) {
    spec.split_once(PATH_DELIMITER).unwrap_or((spec, ""))
}

/// Partitions path specs into per-relation groups.
///
/// The first unprocessed spec picks the head; every later spec that starts
/// with `head__` contributes its remainder to the same group. A later spec
/// equal to the bare head is absorbed without adding a join.
pub fn group_path_specs<'a>(path_specs: &[&'a str]) -> Vec<PathGroup<'a>> {
    let mut processed = vec![false; path_specs.len()];
    let mut groups = Vec::new();

    for (index, &spec) in path_specs.iter().enumerate() {
        if processed[index] {
            continue;
        }
        processed[index] = true;

        let (head, remainder) = split_path(spec);
        let mut joins = Vec::new();
        if !remainder.is_empty() {
            joins.push(remainder);
        }

        for (later_index, &later) in path_specs.iter().enumerate().skip(index + 1) {
            if processed[later_index] {
                continue;
            }
            if later == head {
                processed[later_index] = true;
                continue;
            }
            if let Some(join) = strip_head(later, head) {
                processed[later_index] = true;
                if !join.is_empty() {
                    joins.push(join);
                }
            }
        }

        groups.push(PathGroup { head, joins });
    }

    groups
}

fn strip_head<'a>(spec: &'a str, head: &str) -> Option<&'a str> {
    spec.strip_prefix(head)?.strip_prefix(PATH_DELIMITER)
}

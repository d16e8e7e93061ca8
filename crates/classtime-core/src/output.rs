//! Reconstruction of candidate solutions into presentation-ready form.
//!
//! A candidate solution arrives as a flat, unordered collection of
//! [`Fact`]s. [`SolutionView::from_facts`] keeps the recognized output
//! predicates (`class`, `jointed`, `conflict`), builds typed record
//! sets, and can reassemble them into a weekday-by-period
//! [`ScheduleGrid`] where transitively joint courses collapse into a
//! single display label.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::fact::Fact;
use crate::model::{Period, Weekday};

fn weekday_term(fact: &Fact, i: usize) -> Weekday {
    let n = fact.num_term(i);
    match Weekday::from_ordinal(n) {
        Some(weekday) => weekday,
        None => panic!("fact '{fact}': {n} is not a weekday ordinal"),
    }
}

fn period_term(fact: &Fact, i: usize) -> Period {
    let n = fact.num_term(i);
    match Period::from_ordinal(n) {
        Some(period) => period,
        None => panic!("fact '{fact}': {n} is not a period ordinal"),
    }
}

/// One scheduled class in a candidate solution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassData {
    pub course_id: String,
    pub offering_group: String,
    pub weekday: Weekday,
    pub period: Period,
}

impl ClassData {
    /// Builds from a `class/4` fact (a trailing fixed marker from
    /// echoed input facts is tolerated and ignored).
    ///
    /// # Panics
    ///
    /// Panics when the fact has the wrong name or shape: that is a
    /// mismatch between the rule base and this code, not bad user
    /// input.
    pub fn from_fact(fact: &Fact) -> Self {
        assert!(
            fact.predicate == "class" && (fact.terms.len() == 4 || fact.terms.len() == 5),
            "cannot reconstruct a scheduled class from fact '{fact}'"
        );
        Self {
            course_id: fact.str_term(0).to_string(),
            offering_group: fact.str_term(1).to_string(),
            weekday: weekday_term(fact, 2),
            period: period_term(fact, 3),
        }
    }
}

/// A pair of courses taught jointly within an offering group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointedData {
    pub course_id_a: String,
    pub course_id_b: String,
    pub offering_group: String,
}

impl JointedData {
    /// Builds from a `jointed/3` fact.
    ///
    /// # Panics
    ///
    /// Panics under the same contract as [`ClassData::from_fact`].
    pub fn from_fact(fact: &Fact) -> Self {
        assert!(
            fact.predicate == "jointed" && fact.terms.len() == 3,
            "cannot reconstruct a jointed pair from fact '{fact}'"
        );
        Self {
            course_id_a: fact.str_term(0).to_string(),
            course_id_b: fact.str_term(1).to_string(),
            offering_group: fact.str_term(2).to_string(),
        }
    }
}

/// Two classes flagged as conflicting in the same timeslot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConflictData {
    pub course_id_a: String,
    pub offering_group_a: String,
    pub course_id_b: String,
    pub offering_group_b: String,
    pub weekday: Weekday,
    pub period: Period,
}

impl ConflictData {
    /// Builds from a `conflict/6` fact.
    ///
    /// # Panics
    ///
    /// Panics under the same contract as [`ClassData::from_fact`].
    pub fn from_fact(fact: &Fact) -> Self {
        assert!(
            fact.predicate == "conflict" && fact.terms.len() == 6,
            "cannot reconstruct a conflict from fact '{fact}'"
        );
        Self {
            course_id_a: fact.str_term(0).to_string(),
            offering_group_a: fact.str_term(1).to_string(),
            course_id_b: fact.str_term(2).to_string(),
            offering_group_b: fact.str_term(3).to_string(),
            weekday: weekday_term(fact, 4),
            period: period_term(fact, 5),
        }
    }
}

/// Union-find over course slots, used to collapse transitively joint
/// courses into one display group.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut node = x;
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return;
        }
        let (root, parent) = if self.size[root_x] >= self.size[root_y] {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };
        self.parent[root] = parent;
        self.size[parent] += self.size[root];
    }
}

/// Joint display groups, keyed by (offering group, course id).
struct JointGroups {
    ids: BTreeMap<(String, String), usize>,
    roots: Vec<usize>,
    labels: BTreeMap<usize, String>,
}

impl JointGroups {
    fn build(jointed: &BTreeSet<JointedData>) -> Self {
        let mut ids = BTreeMap::new();
        for pair in jointed {
            for course in [&pair.course_id_a, &pair.course_id_b] {
                let next = ids.len();
                ids.entry((pair.offering_group.clone(), course.clone()))
                    .or_insert(next);
            }
        }

        let mut uf = UnionFind::new(ids.len());
        for pair in jointed {
            let a = ids[&(pair.offering_group.clone(), pair.course_id_a.clone())];
            let b = ids[&(pair.offering_group.clone(), pair.course_id_b.clone())];
            uf.union(a, b);
        }

        let roots: Vec<usize> = (0..ids.len()).map(|i| uf.find(i)).collect();
        let mut members: BTreeMap<usize, BTreeSet<&str>> = BTreeMap::new();
        for ((_, course), &id) in &ids {
            members.entry(roots[id]).or_default().insert(course);
        }
        let labels = members
            .into_iter()
            .map(|(root, courses)| {
                let label = courses.into_iter().collect::<Vec<_>>().join(" - ");
                (root, label)
            })
            .collect();

        Self { ids, roots, labels }
    }

    /// Group root and combined label for a course, when it is joint.
    fn lookup(&self, offering_group: &str, course_id: &str) -> Option<(usize, &str)> {
        let id = self
            .ids
            .get(&(offering_group.to_string(), course_id.to_string()))?;
        let root = self.roots[*id];
        Some((root, self.labels[&root].as_str()))
    }
}

/// A weekday-by-period grid of display labels.
///
/// Cells hold zero or more labels; a joint group appears as a single
/// combined label, rendered once per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    cells: BTreeMap<Weekday, BTreeMap<Period, Vec<String>>>,
}

impl ScheduleGrid {
    /// Display labels scheduled on the given slot.
    pub fn labels(&self, weekday: Weekday, period: Period) -> &[String] {
        self.cells
            .get(&weekday)
            .and_then(|row| row.get(&period))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn push(&mut self, weekday: Weekday, period: Period, label: String) {
        self.cells
            .entry(weekday)
            .or_default()
            .entry(period)
            .or_default()
            .push(label);
    }
}

/// Typed view over one candidate solution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolutionView {
    pub classes: BTreeSet<ClassData>,
    pub jointed: BTreeSet<JointedData>,
    pub conflicts: BTreeSet<ConflictData>,
}

impl SolutionView {
    /// Builds the view from a candidate solution's facts. Predicates
    /// other than `class`, `jointed` and `conflict` are ignored.
    pub fn from_facts(facts: &[Fact]) -> Self {
        let mut view = SolutionView::default();
        for fact in facts {
            match fact.predicate.as_str() {
                "class" => {
                    view.classes.insert(ClassData::from_fact(fact));
                }
                "jointed" => {
                    view.jointed.insert(JointedData::from_fact(fact));
                }
                "conflict" => {
                    view.conflicts.insert(ConflictData::from_fact(fact));
                }
                _ => {}
            }
        }
        view
    }

    /// Reassembles the classes into a display grid.
    ///
    /// A course that belongs to a joint group renders as the group's
    /// combined label (members sorted, joined with `" - "`), once per
    /// slot; every other class renders as `"course (group)"`.
    pub fn schedule_grid(&self) -> ScheduleGrid {
        let joint = JointGroups::build(&self.jointed);
        let mut grid = ScheduleGrid::default();
        let mut rendered: BTreeSet<(Weekday, Period, String, usize)> = BTreeSet::new();

        for class in &self.classes {
            match joint.lookup(&class.offering_group, &class.course_id) {
                Some((root, label)) => {
                    let key = (
                        class.weekday,
                        class.period,
                        class.offering_group.clone(),
                        root,
                    );
                    if rendered.insert(key) {
                        grid.push(class.weekday, class.period, label.to_string());
                    }
                }
                None => {
                    let label = format!("{} ({})", class.course_id, class.offering_group);
                    grid.push(class.weekday, class.period, label);
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_fact(course: &str, group: &str, weekday: i64, period: i64) -> Fact {
        Fact::parse(&format!(r#"class("{course}","{group}",{weekday},{period})"#)).unwrap()
    }

    fn jointed_fact(a: &str, b: &str, group: &str) -> Fact {
        Fact::parse(&format!(r#"jointed("{a}","{b}","{group}")"#)).unwrap()
    }

    #[test]
    fn test_class_data_from_fact() {
        let class = ClassData::from_fact(&class_fact("mac111", "bcc", 0, 2));
        assert_eq!(class.course_id, "mac111");
        assert_eq!(class.offering_group, "bcc");
        assert_eq!(class.weekday, Weekday::Monday);
        assert_eq!(class.period, Period::Afternoon1);
    }

    #[test]
    fn test_class_data_tolerates_fixed_marker() {
        let fact = Fact::parse(r#"class("mac111","bcc",0,0,1)"#).unwrap();
        let class = ClassData::from_fact(&fact);
        assert_eq!(class.course_id, "mac111");
    }

    #[test]
    #[should_panic(expected = "cannot reconstruct a scheduled class")]
    fn test_class_data_wrong_arity_is_a_contract_violation() {
        let fact = Fact::parse(r#"class("mac111","bcc")"#).unwrap();
        ClassData::from_fact(&fact);
    }

    #[test]
    #[should_panic(expected = "is not a weekday ordinal")]
    fn test_class_data_out_of_range_weekday_is_a_contract_violation() {
        ClassData::from_fact(&class_fact("mac111", "bcc", 7, 0));
    }

    #[test]
    fn test_unknown_predicates_are_ignored() {
        let facts = vec![
            class_fact("mac111", "bcc", 0, 0),
            Fact::parse(r#"lecturer("mac111","bcc","profA")"#).unwrap(),
            Fact::parse("heuristic_applied").unwrap(),
        ];
        let view = SolutionView::from_facts(&facts);
        assert_eq!(view.classes.len(), 1);
        assert!(view.jointed.is_empty());
        assert!(view.conflicts.is_empty());
    }

    #[test]
    fn test_non_joint_label_carries_the_offering_group() {
        let view = SolutionView::from_facts(&[class_fact("mac111", "bcc", 1, 3)]);
        let grid = view.schedule_grid();
        assert_eq!(
            grid.labels(Weekday::Tuesday, Period::Afternoon2),
            ["mac111 (bcc)"]
        );
        assert!(grid.labels(Weekday::Tuesday, Period::Morning1).is_empty());
    }

    #[test]
    fn test_transitively_joint_courses_render_as_one_label() {
        let facts = vec![
            class_fact("mac111", "ime", 0, 0),
            class_fact("mac222", "ime", 0, 0),
            class_fact("mac333", "ime", 0, 0),
            jointed_fact("mac111", "mac222", "ime"),
            jointed_fact("mac222", "mac333", "ime"),
        ];
        let grid = SolutionView::from_facts(&facts).schedule_grid();
        assert_eq!(
            grid.labels(Weekday::Monday, Period::Morning1),
            ["mac111 - mac222 - mac333"]
        );
    }

    #[test]
    fn test_joint_grouping_is_scoped_to_the_offering_group() {
        let facts = vec![
            class_fact("mac111", "ime", 0, 0),
            class_fact("mac222", "ime", 0, 0),
            class_fact("mac111", "poli", 0, 0),
            jointed_fact("mac111", "mac222", "ime"),
        ];
        let grid = SolutionView::from_facts(&facts).schedule_grid();
        let mut labels = grid.labels(Weekday::Monday, Period::Morning1).to_vec();
        labels.sort();
        assert_eq!(labels, ["mac111 (poli)", "mac111 - mac222"]);
    }

    #[test]
    fn test_joint_label_renders_once_per_slot_but_on_every_slot() {
        let facts = vec![
            class_fact("mac111", "ime", 0, 0),
            class_fact("mac222", "ime", 0, 0),
            class_fact("mac111", "ime", 2, 4),
            class_fact("mac222", "ime", 2, 4),
            jointed_fact("mac111", "mac222", "ime"),
        ];
        let grid = SolutionView::from_facts(&facts).schedule_grid();
        assert_eq!(
            grid.labels(Weekday::Monday, Period::Morning1),
            ["mac111 - mac222"]
        );
        assert_eq!(
            grid.labels(Weekday::Wednesday, Period::Night1),
            ["mac111 - mac222"]
        );
    }

    #[test]
    fn test_lowered_fixed_class_reconstructs_to_the_same_tuple() {
        use crate::convert::Conventions;
        use crate::input::{InputRecord, WorkloadData};

        let workload = WorkloadData::new(
            "mac111",
            "profA",
            "ime",
            "",
            "seg 8:00",
            "",
            &Conventions::default(),
        )
        .unwrap();
        let fact = workload
            .to_facts()
            .into_iter()
            .find(|f| f.predicate == "class")
            .unwrap();

        let class = ClassData::from_fact(&fact);
        assert_eq!(class.course_id, "mac111");
        assert_eq!(class.offering_group, "ime");
        assert_eq!(class.weekday, Weekday::Monday);
        assert_eq!(class.period, Period::Morning1);
    }

    #[test]
    fn test_conflicts_are_collected() {
        let fact =
            Fact::parse(r#"conflict("mac111","bcc","mac222","ime",4,5)"#).unwrap();
        let view = SolutionView::from_facts(&[fact]);
        let conflict = view.conflicts.iter().next().unwrap();
        assert_eq!(conflict.course_id_a, "mac111");
        assert_eq!(conflict.offering_group_b, "ime");
        assert_eq!(conflict.weekday, Weekday::Friday);
        assert_eq!(conflict.period, Period::Night2);
    }
}

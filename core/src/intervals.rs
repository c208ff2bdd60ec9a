use crate::models::{IntervalStep, IntervalTable};

/// Standardprogresjon: 7 uker × 3 økter.
/// Uke 1–3 bygger volum med intervaller, uke 4–6 blander inn sammenhengende løp,
/// uke 7 er nedtrapping mot løpet.
pub const DEFAULT_PROGRESSION: [IntervalStep; 21] = [
    // Uke 1
    IntervalStep::new(1.0, 2.0),
    IntervalStep::new(2.0, 2.0),
    IntervalStep::new(3.0, 2.0),
    // Uke 2
    IntervalStep::new(4.0, 3.0),
    IntervalStep::new(5.0, 3.0),
    IntervalStep::new(8.0, 5.0),
    // Uke 3
    IntervalStep::new(6.0, 3.0),
    IntervalStep::new(8.0, 3.0),
    IntervalStep::new(10.0, 3.0),
    // Uke 4
    IntervalStep::new(6.0, 2.0),
    IntervalStep::new(28.0, 0.0),
    IntervalStep::new(7.0, 2.0),
    // Uke 5
    IntervalStep::new(5.0, 1.5),
    IntervalStep::new(32.0, 0.0),
    IntervalStep::new(8.0, 2.0),
    // Uke 6
    IntervalStep::new(4.0, 1.0),
    IntervalStep::new(35.0, 0.0),
    IntervalStep::new(9.0, 2.0),
    // Uke 7 (taper)
    IntervalStep::new(4.0, 1.5),
    IntervalStep::new(20.0, 0.0),
    IntervalStep::new(2.0, 1.0),
];

/// Planen varer 7 uker; justeringer og prediksjon regner mot denne.
pub const PLAN_WEEKS: u32 = 7;

impl Default for IntervalTable {
    fn default() -> Self {
        IntervalTable::new(DEFAULT_PROGRESSION.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_three_sessions_per_week() {
        let t = IntervalTable::default();
        assert_eq!(t.len(), 21);
        assert_eq!(t.len() as u32, PLAN_WEEKS * crate::models::SESSIONS_PER_WEEK);
    }

    #[test]
    fn continuous_days_are_the_middle_sessions_of_weeks_4_to_7() {
        let t = IntervalTable::default();
        let continuous: Vec<u32> = (1..=21)
            .filter(|i| t.step(*i).map(|s| s.is_continuous()).unwrap_or(false))
            .collect();
        assert_eq!(continuous, vec![11, 14, 17, 20]);
        assert_eq!(t.step(0), None);
        assert_eq!(t.step(22), None);
    }
}

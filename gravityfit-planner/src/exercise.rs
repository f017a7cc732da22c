use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Strength,
    Cardio,
    Flexibility,
}

impl ExerciseKind {
    /// Timed exercises scale their duration; strength exercises scale load.
    pub fn is_timed(&self) -> bool {
        matches!(self, ExerciseKind::Cardio | ExerciseKind::Flexibility)
    }
}

/// Unscaled catalog entry. `base` is kilograms for strength work and
/// minutes for timed work.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub kind: ExerciseKind,
    pub base: u32,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

const fn strength(name: &'static str, load_kg: u32, sets: u32, reps: u32) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        kind: ExerciseKind::Strength,
        base: load_kg,
        sets: Some(sets),
        reps: Some(reps),
    }
}

const fn timed(name: &'static str, kind: ExerciseKind, minutes: u32) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        kind,
        base: minutes,
        sets: None,
        reps: None,
    }
}

pub static CATALOG: [ExerciseTemplate; 6] = [
    strength("Squats", 60, 3, 12),
    strength("Push-ups", 0, 3, 15),
    strength("Deadlifts", 80, 3, 8),
    timed("Cardio Run", ExerciseKind::Cardio, 30),
    strength("Resistance Band", 25, 3, 15),
    timed("Yoga Flow", ExerciseKind::Flexibility, 20),
];

/// Day 1 through day 7.
pub const SESSION_LABELS: [&str; 7] = [
    "Full Body Strength",
    "Cardio Focus",
    "Upper Body",
    "Active Recovery",
    "Lower Body",
    "HIIT Training",
    "Flexibility & Recovery",
];

/// Exercises for a session, chosen by the first keyword its label contains.
pub fn select_for(label: &str) -> Vec<&'static ExerciseTemplate> {
    let first_of = |kind: ExerciseKind, n: usize| -> Vec<&'static ExerciseTemplate> {
        CATALOG.iter().filter(|e| e.kind == kind).take(n).collect()
    };
    match label {
        l if l.contains("Strength") => first_of(ExerciseKind::Strength, 3),
        l if l.contains("Cardio") => first_of(ExerciseKind::Cardio, 2),
        l if l.contains("Recovery") => first_of(ExerciseKind::Flexibility, 2),
        _ => CATALOG.iter().take(4).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(label: &str) -> Vec<&'static str> {
        select_for(label).iter().map(|e| e.name).collect()
    }

    #[test]
    fn strength_day_takes_first_three_strength_entries() {
        assert_eq!(
            names("Full Body Strength"),
            vec!["Squats", "Push-ups", "Deadlifts"]
        );
    }

    #[test]
    fn cardio_and_recovery_days_are_capped_by_catalog() {
        assert_eq!(names("Cardio Focus"), vec!["Cardio Run"]);
        assert_eq!(names("Active Recovery"), vec!["Yoga Flow"]);
        assert_eq!(names("Flexibility & Recovery"), vec!["Yoga Flow"]);
    }

    #[test]
    fn other_days_take_catalog_prefix() {
        for label in ["Upper Body", "Lower Body", "HIIT Training"] {
            assert_eq!(
                names(label),
                vec!["Squats", "Push-ups", "Deadlifts", "Cardio Run"]
            );
        }
    }
}

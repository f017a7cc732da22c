//! Weekly workout plan synthesis.
//!
//! [`generate_plan`] is deterministic and stateless: the same intensity index
//! and gravity fraction always expand the fixed exercise catalog into the
//! same seven sessions. Callers validate ranges first; the generator never
//! fails.

pub mod exercise;
pub use exercise::{select_for, ExerciseKind, ExerciseTemplate, CATALOG, SESSION_LABELS};

pub mod plan;
pub use plan::{DeviceSetpoint, ExerciseInstance, Session, WeeklyPlan};

pub const LOW_GRAVITY_NOTES: [&str; 2] = [
    "Low gravity: Focus on resistance training to maintain bone density",
    "Increase repetitions to compensate for reduced load",
];

pub const HIGH_GRAVITY_NOTES: [&str; 3] = [
    "High gravity: Reduce impact exercises to prevent injury",
    "Monitor heart rate closely during cardio activities",
    "Allow extra recovery time between sets",
];

pub const HIGH_INTENSITY_NOTE: &str = "High intensity: Ensure proper warm-up and cool-down";
pub const LOW_INTENSITY_NOTE: &str = "Low intensity: Focus on form and technique";

/// 0.55 at intensity 1 up to 1.0 at intensity 10.
pub fn intensity_scale(intensity_index: u8) -> f64 {
    0.5 + intensity_index as f64 * 0.05
}

/// Halves the distance from Earth gravity; 1.0 when no fraction is given.
pub fn gravity_scale(gravity_fraction: Option<f64>) -> f64 {
    match gravity_fraction {
        Some(g) => 1.0 + (g - 1.0) * 0.5,
        None => 1.0,
    }
}

pub fn generate_plan(intensity_index: u8, gravity_fraction: Option<f64>) -> WeeklyPlan {
    let intensity = intensity_scale(intensity_index);
    let gravity = gravity_scale(gravity_fraction);

    let mut device_setpoints = Vec::new();
    let sessions: Vec<Session> = SESSION_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let exercises = select_for(label)
                .into_iter()
                .map(|template| {
                    let exercise = scale(template, intensity, gravity);
                    if let Some(setpoint_kg) = exercise.device_setpoint_kg {
                        device_setpoints.push(DeviceSetpoint {
                            exercise: exercise.name.clone(),
                            setpoint_kg,
                            base_load_kg: template.base,
                        });
                    }
                    exercise
                })
                .collect();

            let base_minutes = (30 + intensity_index as u32 * 3) as f64;
            Session {
                day_number: i as u8 + 1,
                label: (*label).to_string(),
                duration_minutes: (base_minutes * gravity).floor() as u32,
                exercises,
            }
        })
        .collect();

    let total_weekly_volume_minutes = sessions.iter().map(|s| s.duration_minutes).sum();

    WeeklyPlan {
        intensity_index,
        gravity_fraction,
        total_weekly_volume_minutes,
        sessions,
        device_setpoints,
        safety_notes: safety_notes(intensity_index, gravity_fraction),
    }
}

fn scale(template: &ExerciseTemplate, intensity: f64, gravity: f64) -> ExerciseInstance {
    let scaled = (template.base as f64 * intensity * gravity).floor() as u32;
    if template.kind.is_timed() {
        return ExerciseInstance {
            name: template.name.to_string(),
            kind: template.kind,
            duration_minutes: scaled,
            sets: None,
            reps: None,
            load_kg: None,
            device_setpoint_kg: None,
        };
    }
    ExerciseInstance {
        name: template.name.to_string(),
        kind: template.kind,
        duration_minutes: 0,
        sets: template.sets,
        reps: template
            .reps
            .map(|reps| (reps as f64 / intensity.sqrt()).floor() as u32),
        load_kg: Some(scaled),
        device_setpoint_kg: Some(scaled),
    }
}

fn safety_notes(intensity_index: u8, gravity_fraction: Option<f64>) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();
    match gravity_fraction {
        Some(g) if g < 0.5 => notes.extend(LOW_GRAVITY_NOTES.iter().map(|s| s.to_string())),
        Some(g) if g > 1.5 => notes.extend(HIGH_GRAVITY_NOTES.iter().map(|s| s.to_string())),
        _ => {}
    }
    if intensity_index >= 8 {
        notes.push(HIGH_INTENSITY_NOTE.to_string());
    } else if intensity_index <= 3 {
        notes.push(LOW_INTENSITY_NOTE.to_string());
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_match_documented_ranges() {
        assert!((intensity_scale(1) - 0.55).abs() < 1e-12);
        assert_eq!(intensity_scale(10), 1.0);
        assert_eq!(gravity_scale(None), 1.0);
        assert_eq!(gravity_scale(Some(1.0)), 1.0);
        assert_eq!(gravity_scale(Some(0.0)), 0.5);
    }

    #[test]
    fn mid_intensity_without_gravity() {
        let plan = generate_plan(5, None);
        assert_eq!(plan.sessions.len(), 7);
        for (i, s) in plan.sessions.iter().enumerate() {
            assert_eq!(s.day_number as usize, i + 1);
            assert_eq!(s.label, SESSION_LABELS[i]);
            // 30 + 5 * 3, gravity scale 1.0
            assert_eq!(s.duration_minutes, 45);
        }
        let sum: u32 = plan.sessions.iter().map(|s| s.duration_minutes).sum();
        assert_eq!(plan.total_weekly_volume_minutes, sum);
        assert_eq!(plan.total_weekly_volume_minutes, 315);
        assert!(plan.safety_notes.is_empty());
    }

    #[test]
    fn strength_exercises_are_scaled() {
        let plan = generate_plan(5, None);
        let squats = &plan.sessions[0].exercises[0];
        assert_eq!(squats.name, "Squats");
        assert_eq!(squats.duration_minutes, 0);
        assert_eq!(squats.sets, Some(3));
        // floor(60 * 0.75), floor(12 / sqrt(0.75))
        assert_eq!(squats.load_kg, Some(45));
        assert_eq!(squats.reps, Some(13));
        assert_eq!(squats.device_setpoint_kg, squats.load_kg);

        let deadlifts = &plan.sessions[0].exercises[2];
        assert_eq!(deadlifts.load_kg, Some(60));
        assert_eq!(deadlifts.reps, Some(9));
    }

    #[test]
    fn timed_exercises_carry_duration_only() {
        let plan = generate_plan(5, None);
        let run = &plan.sessions[1].exercises[0];
        assert_eq!(run.kind, ExerciseKind::Cardio);
        assert_eq!(run.duration_minutes, 22);
        assert_eq!(run.load_kg, None);
        assert_eq!(run.sets, None);

        let yoga = &plan.sessions[6].exercises[0];
        assert_eq!(yoga.kind, ExerciseKind::Flexibility);
        assert_eq!(yoga.duration_minutes, 15);
    }

    #[test]
    fn one_setpoint_per_strength_instance() {
        let plan = generate_plan(7, Some(0.8));
        let strength_instances = plan
            .sessions
            .iter()
            .flat_map(|s| &s.exercises)
            .filter(|e| e.kind == ExerciseKind::Strength)
            .count();
        // day 1 has three, days 3, 5 and 6 three each
        assert_eq!(strength_instances, 12);
        assert_eq!(plan.device_setpoints.len(), strength_instances);
        assert_eq!(plan.device_setpoints[0].exercise, "Squats");
        assert_eq!(plan.device_setpoints[0].base_load_kg, 60);
    }

    #[test]
    fn gravity_shrinks_sessions() {
        let earth = generate_plan(10, Some(1.0));
        let light = generate_plan(10, Some(0.0));
        assert_eq!(earth.sessions[0].duration_minutes, 60);
        assert_eq!(light.sessions[0].duration_minutes, 30);
        assert_eq!(light.total_weekly_volume_minutes, 210);
    }

    #[test]
    fn low_gravity_notes_only() {
        for i in 1..=10 {
            for g in [0.0, 0.1, 0.25, 0.49] {
                let notes = generate_plan(i, Some(g)).safety_notes;
                assert_eq!(&notes[..2], &LOW_GRAVITY_NOTES[..]);
                assert!(HIGH_GRAVITY_NOTES.iter().all(|n| !notes.iter().any(|x| x == n)));
            }
        }
    }

    #[test]
    fn high_gravity_notes_when_fraction_exceeds_range() {
        let notes = generate_plan(5, Some(1.6)).safety_notes;
        assert_eq!(notes, HIGH_GRAVITY_NOTES.to_vec());
    }

    #[test]
    fn intensity_notes() {
        assert_eq!(generate_plan(8, None).safety_notes, vec![HIGH_INTENSITY_NOTE]);
        assert_eq!(generate_plan(3, None).safety_notes, vec![LOW_INTENSITY_NOTE]);
        let both = generate_plan(9, Some(0.2)).safety_notes;
        assert_eq!(both.len(), 3);
        assert_eq!(both[2], HIGH_INTENSITY_NOTE);
    }
}

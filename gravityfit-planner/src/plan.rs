use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;

/// A generated week of training. Request-scoped; never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub intensity_index: u8,
    #[serde(default)]
    pub gravity_fraction: Option<f64>,
    pub total_weekly_volume_minutes: u32,
    pub sessions: Vec<Session>,
    pub device_setpoints: Vec<DeviceSetpoint>,
    pub safety_notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub day_number: u8,
    pub label: String,
    pub duration_minutes: u32,
    pub exercises: Vec<ExerciseInstance>,
}

/// One scaled exercise. Strength work carries sets/reps/load and a device
/// setpoint equal to the load; timed work only a duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInstance {
    pub name: String,
    pub kind: ExerciseKind,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_kg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_setpoint_kg: Option<u32>,
}

/// Target for a resistance device, one per strength exercise in the week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSetpoint {
    pub exercise: String,
    pub setpoint_kg: u32,
    pub base_load_kg: u32,
}

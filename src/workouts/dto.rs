use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::workouts::repo::{Workout, WorkoutDetail};

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutSet {
    pub reps: i32,
    pub weight: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutExercise {
    pub exercise_id: Uuid,
    pub sets: Vec<CreateWorkoutSet>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<CreateWorkoutExercise>,
}

impl CreateWorkoutRequest {
    /// Upstream validation: the statistics engine assumes non-negative
    /// numeric fields, so reject anything else at the write boundary.
    pub fn validate(&self) -> Result<(), String> {
        if self.duration_minutes.is_some_and(|d| d < 0) {
            return Err("duration_minutes must be non-negative".into());
        }
        for entry in &self.exercises {
            for set in &entry.sets {
                if set.reps < 0 {
                    return Err("reps must be non-negative".into());
                }
                if !set.weight.is_finite() || set.weight < 0.0 {
                    return Err("weight must be a non-negative number".into());
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedWorkoutResponse {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct WorkoutListItem {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

impl From<Workout> for WorkoutListItem {
    fn from(w: Workout) -> Self {
        Self {
            id: w.id,
            started_at: w.started_at,
            duration_minutes: w.duration_minutes,
            notes: w.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SetDto {
    pub reps: i32,
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct WorkoutExerciseDto {
    pub exercise_id: Uuid,
    pub sets: Vec<SetDto>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutDetails {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub exercises: Vec<WorkoutExerciseDto>,
}

impl From<WorkoutDetail> for WorkoutDetails {
    fn from(d: WorkoutDetail) -> Self {
        Self {
            id: d.workout.id,
            started_at: d.workout.started_at,
            duration_minutes: d.workout.duration_minutes,
            notes: d.workout.notes,
            exercises: d
                .exercises
                .into_iter()
                .map(|e| WorkoutExerciseDto {
                    exercise_id: e.exercise_id,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| SetDto {
                            reps: s.reps,
                            weight: s.weight,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn request(duration: Option<i32>, sets: Vec<(i32, f64)>) -> CreateWorkoutRequest {
        CreateWorkoutRequest {
            started_at: datetime!(2026-03-14 10:00 UTC),
            duration_minutes: duration,
            notes: None,
            exercises: vec![CreateWorkoutExercise {
                exercise_id: Uuid::new_v4(),
                sets: sets
                    .into_iter()
                    .map(|(reps, weight)| CreateWorkoutSet { reps, weight })
                    .collect(),
            }],
        }
    }

    #[test]
    fn accepts_well_formed_payload() {
        assert!(request(Some(45), vec![(10, 50.0), (8, 55.0)]).validate().is_ok());
        assert!(request(None, vec![]).validate().is_ok());
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(request(Some(-1), vec![]).validate().is_err());
    }

    #[test]
    fn rejects_negative_reps() {
        assert!(request(None, vec![(-5, 20.0)]).validate().is_err());
    }

    #[test]
    fn rejects_negative_or_non_finite_weight() {
        assert!(request(None, vec![(5, -20.0)]).validate().is_err());
        assert!(request(None, vec![(5, f64::NAN)]).validate().is_err());
        assert!(request(None, vec![(5, f64::INFINITY)]).validate().is_err());
    }
}

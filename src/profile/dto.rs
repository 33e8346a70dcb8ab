use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::profile::stats::{FavoriteExercise, ProfileStats};

#[derive(Debug, Serialize)]
pub struct ProfileStatsResponse {
    pub user_id: Uuid,
    pub total_workouts: u32,
    pub current_streak: u32,
    /// Distinct workout days, most recent first.
    pub workout_days: Vec<Date>,
    pub last_workout_date: Option<Date>,
    pub total_duration_minutes: i64,
    pub total_exercises_used: u32,
    pub total_sets: u32,
    pub total_reps: i64,
    pub total_volume: f64,
    pub heaviest_weight: f64,
    pub favorite_exercise: Option<FavoriteExercise>,
}

impl ProfileStatsResponse {
    pub fn from_stats(user_id: Uuid, stats: ProfileStats) -> Self {
        Self {
            user_id,
            total_workouts: stats.total_workouts,
            current_streak: stats.current_streak,
            last_workout_date: stats.workout_days.first().copied(),
            workout_days: stats.workout_days,
            total_duration_minutes: stats.total_duration_minutes,
            total_exercises_used: stats.total_exercises_used,
            total_sets: stats.total_sets,
            total_reps: stats.total_reps,
            total_volume: stats.total_volume,
            heaviest_weight: stats.heaviest_weight,
            favorite_exercise: stats.favorite_exercise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use time::macros::date;

    use crate::profile::stats::compute_profile_stats;

    #[test]
    fn empty_history_serializes_with_absent_fields() {
        let user_id = Uuid::new_v4();
        let stats = compute_profile_stats(&[], &HashMap::new(), date!(2026 - 03 - 14));
        let response = ProfileStatsResponse::from_stats(user_id, stats);

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["total_workouts"], 0);
        assert_eq!(json["current_streak"], 0);
        assert!(json["workout_days"].as_array().expect("array").is_empty());
        assert!(json["last_workout_date"].is_null());
        assert!(json["favorite_exercise"].is_null());
    }
}

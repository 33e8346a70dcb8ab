//! Profile statistics: day-key normalization, streak computation and the
//! single-pass aggregation over a user's workout history.
//!
//! Everything here is a pure function of its inputs. Callers fetch the
//! history (most recent workout first), build the exercise index, read the
//! clock once and hand all three in; nothing in this module does I/O.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::exercises::repo::Exercise;
use crate::workouts::repo::WorkoutDetail;

/// The favorite exercise with its resolved display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteExercise {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub total_workouts: u32,
    pub current_streak: u32,
    /// Distinct workout days, most recent first.
    pub workout_days: Vec<Date>,
    pub total_duration_minutes: i64,
    pub total_exercises_used: u32,
    pub total_sets: u32,
    pub total_reps: i64,
    pub total_volume: f64,
    pub heaviest_weight: f64,
    pub favorite_exercise: Option<FavoriteExercise>,
}

/// Collapses workout start instants to calendar days, deduplicated and sorted
/// most recent first. Days are taken in UTC: one fixed zone for everyone, so
/// two starts on the same UTC day always map to the same key.
pub fn workout_day_keys<I>(starts: I) -> Vec<Date>
where
    I: IntoIterator<Item = OffsetDateTime>,
{
    let mut days: Vec<Date> = starts
        .into_iter()
        .map(|ts| ts.to_offset(UtcOffset::UTC).date())
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    days
}

/// Length of the consecutive-day run ending at the most recent workout day.
///
/// A streak only counts as live when the most recent day is `today` or
/// yesterday; anything older reports 0. `days` must be distinct and sorted
/// descending, as produced by [`workout_day_keys`].
pub fn current_streak(days: &[Date], today: Date) -> u32 {
    let Some(&most_recent) = days.first() else {
        return 0;
    };
    if most_recent != today && Some(most_recent) != today.previous_day() {
        return 0;
    }

    let mut streak = 1u32;
    let mut expected = most_recent.previous_day();
    for &day in &days[1..] {
        if Some(day) != expected {
            break;
        }
        streak += 1;
        expected = day.previous_day();
    }
    streak
}

/// One pass over the full history, most recent workout first.
///
/// `today` is the caller's single clock read for this invocation.
/// A favorite whose id is missing from `exercise_index` is reported as
/// absent; partial statistics beat no statistics.
pub fn compute_profile_stats(
    workouts: &[WorkoutDetail],
    exercise_index: &HashMap<Uuid, Exercise>,
    today: Date,
) -> ProfileStats {
    let workout_days = workout_day_keys(workouts.iter().map(|d| d.workout.started_at));
    let streak = current_streak(&workout_days, today);

    let mut total_duration_minutes = 0i64;
    let mut total_sets = 0u32;
    let mut total_reps = 0i64;
    let mut total_volume = 0f64;
    let mut heaviest_weight = 0f64;
    // Occurrence count per exercise id, plus the rank at which the id was
    // first seen. Ties resolve to the lowest rank, i.e. the exercise that
    // appeared first in the most-recent-workout-first traversal.
    let mut frequency: HashMap<Uuid, (u32, usize)> = HashMap::new();

    for detail in workouts {
        total_duration_minutes += i64::from(detail.workout.duration_minutes.unwrap_or(0));
        for entry in &detail.exercises {
            let next_rank = frequency.len();
            let slot = frequency.entry(entry.exercise_id).or_insert((0, next_rank));
            slot.0 += 1;

            for set in &entry.sets {
                total_sets += 1;
                total_reps += i64::from(set.reps);
                total_volume += f64::from(set.reps) * set.weight;
                if set.weight > heaviest_weight {
                    heaviest_weight = set.weight;
                }
            }
        }
    }

    let favorite_exercise = frequency
        .iter()
        .max_by_key(|(_, &(count, rank))| (count, Reverse(rank)))
        .and_then(|(id, _)| exercise_index.get(id))
        .map(|e| FavoriteExercise {
            id: e.id,
            name: e.name.clone(),
            category: e.category.clone(),
        });

    ProfileStats {
        total_workouts: workouts.len() as u32,
        current_streak: streak,
        total_exercises_used: frequency.len() as u32,
        workout_days,
        total_duration_minutes,
        total_sets,
        total_reps,
        total_volume,
        heaviest_weight,
        favorite_exercise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::repo::{Workout, WorkoutExercise, WorkoutSet};
    use time::macros::{date, datetime};
    use time::Duration;

    const TODAY: Date = date!(2026 - 03 - 14);

    fn at_noon(day: Date) -> OffsetDateTime {
        day.midnight().assume_utc() + Duration::hours(12)
    }

    fn entry(exercise_id: Uuid, sets: &[(i32, f64)]) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id,
            sets: sets
                .iter()
                .map(|&(reps, weight)| WorkoutSet { reps, weight })
                .collect(),
        }
    }

    fn workout_at(
        started_at: OffsetDateTime,
        duration: Option<i32>,
        exercises: Vec<WorkoutExercise>,
    ) -> WorkoutDetail {
        WorkoutDetail {
            workout: Workout {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                started_at,
                duration_minutes: duration,
                notes: None,
                created_at: started_at,
            },
            exercises,
        }
    }

    fn index_of(entries: &[(Uuid, &str, &str)]) -> HashMap<Uuid, Exercise> {
        entries
            .iter()
            .map(|&(id, name, category)| {
                (
                    id,
                    Exercise {
                        id,
                        user_id: Uuid::new_v4(),
                        name: name.into(),
                        category: category.into(),
                        created_at: datetime!(2026-01-01 0:00 UTC),
                    },
                )
            })
            .collect()
    }

    // --- day-key normalizer ---

    #[test]
    fn day_keys_dedup_and_sort_descending() {
        let d1 = date!(2026 - 03 - 10);
        let d2 = date!(2026 - 03 - 11);
        let d3 = date!(2026 - 03 - 12);
        let starts = vec![
            at_noon(d1),
            d1.midnight().assume_utc() + Duration::hours(21),
            at_noon(d3),
            at_noon(d2),
            at_noon(d2),
        ];
        assert_eq!(workout_day_keys(starts), vec![d3, d2, d1]);
    }

    #[test]
    fn day_keys_empty_input_yields_empty() {
        assert_eq!(workout_day_keys(Vec::new()), Vec::<Date>::new());
    }

    #[test]
    fn day_keys_collapse_ignores_time_of_day() {
        let day = date!(2026 - 03 - 10);
        let starts = vec![
            day.midnight().assume_utc(),
            day.midnight().assume_utc() + Duration::hours(23) + Duration::minutes(59),
        ];
        assert_eq!(workout_day_keys(starts), vec![day]);
    }

    // --- streak ---

    #[test]
    fn streak_zero_for_empty_days() {
        assert_eq!(current_streak(&[], TODAY), 0);
    }

    #[test]
    fn streak_zero_when_last_activity_is_stale() {
        assert_eq!(current_streak(&[TODAY - Duration::days(2)], TODAY), 0);
        let days = [
            TODAY - Duration::days(5),
            TODAY - Duration::days(6),
            TODAY - Duration::days(7),
        ];
        assert_eq!(current_streak(&days, TODAY), 0);
    }

    #[test]
    fn streak_counts_until_first_gap() {
        let days = [
            TODAY,
            TODAY - Duration::days(1),
            TODAY - Duration::days(2),
            TODAY - Duration::days(4),
        ];
        assert_eq!(current_streak(&days, TODAY), 3);
    }

    #[test]
    fn streak_today_only_is_one() {
        assert_eq!(current_streak(&[TODAY], TODAY), 1);
    }

    #[test]
    fn streak_yesterday_only_is_one() {
        assert_eq!(current_streak(&[TODAY - Duration::days(1)], TODAY), 1);
    }

    #[test]
    fn streak_starting_yesterday_keeps_counting() {
        let days = [
            TODAY - Duration::days(1),
            TODAY - Duration::days(2),
            TODAY - Duration::days(3),
        ];
        assert_eq!(current_streak(&days, TODAY), 3);
    }

    // --- aggregation ---

    #[test]
    fn empty_history_yields_zeroes_and_no_favorite() {
        let stats = compute_profile_stats(&[], &HashMap::new(), TODAY);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.current_streak, 0);
        assert!(stats.workout_days.is_empty());
        assert_eq!(stats.total_duration_minutes, 0);
        assert_eq!(stats.total_exercises_used, 0);
        assert_eq!(stats.total_sets, 0);
        assert_eq!(stats.total_reps, 0);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.heaviest_weight, 0.0);
        assert!(stats.favorite_exercise.is_none());
    }

    #[test]
    fn worked_example_totals_and_streak() {
        // Three workouts on two distinct days: today, today and yesterday.
        let bench = Uuid::new_v4();
        let workouts = vec![
            workout_at(at_noon(TODAY), Some(60), vec![entry(bench, &[(10, 50.0)])]),
            workout_at(
                TODAY.midnight().assume_utc() + Duration::hours(8),
                Some(45),
                vec![entry(bench, &[(8, 55.0)])],
            ),
            workout_at(
                at_noon(TODAY - Duration::days(1)),
                None,
                vec![entry(bench, &[(12, 80.0)])],
            ),
        ];
        let index = index_of(&[(bench, "Bench Press", "Chest")]);

        let stats = compute_profile_stats(&workouts, &index, TODAY);
        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.workout_days, vec![TODAY, TODAY - Duration::days(1)]);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.total_duration_minutes, 105);
        assert_eq!(stats.total_exercises_used, 1);
        assert_eq!(stats.total_sets, 3);
        assert_eq!(stats.total_reps, 30);
        assert_eq!(stats.total_volume, 1900.0);
        assert_eq!(stats.heaviest_weight, 80.0);
        assert_eq!(
            stats.favorite_exercise,
            Some(FavoriteExercise {
                id: bench,
                name: "Bench Press".into(),
                category: "Chest".into(),
            })
        );
    }

    #[test]
    fn favorite_counts_once_per_workout_entry_not_per_set() {
        // Squat shows up in two workouts; deadlift once but with many sets.
        let squat = Uuid::new_v4();
        let deadlift = Uuid::new_v4();
        let workouts = vec![
            workout_at(
                at_noon(TODAY),
                Some(30),
                vec![entry(squat, &[(5, 100.0)])],
            ),
            workout_at(
                at_noon(TODAY - Duration::days(1)),
                Some(30),
                vec![entry(
                    deadlift,
                    &[(5, 140.0), (5, 140.0), (5, 140.0), (5, 140.0)],
                )],
            ),
            workout_at(
                at_noon(TODAY - Duration::days(2)),
                Some(30),
                vec![entry(squat, &[(5, 105.0)])],
            ),
        ];
        let index = index_of(&[(squat, "Squat", "Legs"), (deadlift, "Deadlift", "Back")]);

        let stats = compute_profile_stats(&workouts, &index, TODAY);
        assert_eq!(stats.favorite_exercise.unwrap().id, squat);
    }

    #[test]
    fn favorite_tie_breaks_to_first_encountered() {
        // Both appear in exactly two workouts. Rows comes first in the
        // most-recent-first traversal and must win even though curls carry
        // far more reps and volume.
        let rows = Uuid::new_v4();
        let curls = Uuid::new_v4();
        let workouts = vec![
            workout_at(
                at_noon(TODAY),
                Some(30),
                vec![entry(rows, &[(5, 60.0)]), entry(curls, &[(20, 30.0)])],
            ),
            workout_at(
                at_noon(TODAY - Duration::days(1)),
                Some(30),
                vec![entry(curls, &[(20, 30.0)]), entry(rows, &[(5, 60.0)])],
            ),
        ];
        let index = index_of(&[(rows, "Barbell Row", "Back"), (curls, "Curl", "Arms")]);

        let stats = compute_profile_stats(&workouts, &index, TODAY);
        assert_eq!(stats.favorite_exercise.unwrap().id, rows);
    }

    #[test]
    fn favorite_absent_when_metadata_is_missing() {
        let unknown = Uuid::new_v4();
        let workouts = vec![workout_at(
            at_noon(TODAY),
            Some(20),
            vec![entry(unknown, &[(10, 40.0)])],
        )];

        let stats = compute_profile_stats(&workouts, &HashMap::new(), TODAY);
        assert!(stats.favorite_exercise.is_none());
        // The rest of the aggregates still come through.
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.total_exercises_used, 1);
        assert_eq!(stats.total_volume, 400.0);
    }

    #[test]
    fn volume_is_invariant_under_set_and_exercise_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let index = index_of(&[(a, "A", "x"), (b, "B", "y")]);

        let forward = vec![workout_at(
            at_noon(TODAY),
            Some(40),
            vec![
                entry(a, &[(10, 50.0), (8, 55.0)]),
                entry(b, &[(12, 80.0)]),
            ],
        )];
        let shuffled = vec![workout_at(
            at_noon(TODAY),
            Some(40),
            vec![
                entry(b, &[(12, 80.0)]),
                entry(a, &[(8, 55.0), (10, 50.0)]),
            ],
        )];

        let lhs = compute_profile_stats(&forward, &index, TODAY);
        let rhs = compute_profile_stats(&shuffled, &index, TODAY);
        assert_eq!(lhs.total_volume, rhs.total_volume);
        assert_eq!(lhs.total_reps, rhs.total_reps);
        assert_eq!(lhs.heaviest_weight, rhs.heaviest_weight);
    }

    #[test]
    fn missing_duration_counts_as_zero() {
        let a = Uuid::new_v4();
        let workouts = vec![
            workout_at(at_noon(TODAY), Some(50), vec![entry(a, &[(5, 20.0)])]),
            workout_at(at_noon(TODAY - Duration::days(1)), None, vec![]),
        ];
        let stats = compute_profile_stats(&workouts, &index_of(&[(a, "A", "x")]), TODAY);
        assert_eq!(stats.total_duration_minutes, 50);
    }

    #[test]
    fn distinct_exercise_count_spans_workouts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let workouts = vec![
            workout_at(
                at_noon(TODAY),
                Some(30),
                vec![entry(a, &[(5, 10.0)]), entry(b, &[(5, 10.0)])],
            ),
            workout_at(
                at_noon(TODAY - Duration::days(1)),
                Some(30),
                vec![entry(b, &[(5, 10.0)]), entry(c, &[(5, 10.0)])],
            ),
        ];
        let index = index_of(&[(a, "A", "x"), (b, "B", "y"), (c, "C", "z")]);
        let stats = compute_profile_stats(&workouts, &index, TODAY);
        assert_eq!(stats.total_exercises_used, 3);
        // b appears in both workouts and wins outright.
        assert_eq!(stats.favorite_exercise.unwrap().id, b);
    }
}

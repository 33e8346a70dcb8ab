use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::workouts::dto::CreateWorkoutRequest;

#[derive(Debug, Clone, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub started_at: OffsetDateTime,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

/// One set as the statistics engine sees it.
#[derive(Debug, Clone)]
pub struct WorkoutSet {
    pub reps: i32,
    pub weight: f64,
}

/// One exercise entry within a workout, with its sets in recorded order.
#[derive(Debug, Clone)]
pub struct WorkoutExercise {
    pub exercise_id: Uuid,
    pub sets: Vec<WorkoutSet>,
}

/// A workout with its full nested detail.
#[derive(Debug, Clone)]
pub struct WorkoutDetail {
    pub workout: Workout,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, FromRow)]
struct WorkoutExerciseRow {
    id: Uuid,
    workout_id: Uuid,
    exercise_id: Uuid,
}

#[derive(Debug, FromRow)]
struct SetRow {
    workout_exercise_id: Uuid,
    reps: i32,
    weight: f64,
}

impl Workout {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        req: &CreateWorkoutRequest,
    ) -> anyhow::Result<Workout> {
        let mut tx = db.begin().await?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (user_id, started_at, duration_minutes, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, started_at, duration_minutes, notes, created_at
            "#,
        )
        .bind(user_id)
        .bind(req.started_at)
        .bind(req.duration_minutes)
        .bind(&req.notes)
        .fetch_one(&mut *tx)
        .await?;

        for (position, entry) in req.exercises.iter().enumerate() {
            let entry_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO workout_exercises (workout_id, exercise_id, position)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(workout.id)
            .bind(entry.exercise_id)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await?;

            for (set_position, set) in entry.sets.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO sets (workout_exercise_id, reps, weight, position)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(entry_id)
                .bind(set.reps)
                .bind(set.weight)
                .bind(set_position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(workout)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Workout>> {
        let rows = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, user_id, started_at, duration_minutes, notes, created_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY started_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get_detail(
        db: &PgPool,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> anyhow::Result<Option<WorkoutDetail>> {
        let workout = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, user_id, started_at, duration_minutes, notes, created_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(workout_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        let Some(workout) = workout else {
            return Ok(None);
        };

        let entry_rows = sqlx::query_as::<_, WorkoutExerciseRow>(
            r#"
            SELECT id, workout_id, exercise_id
            FROM workout_exercises
            WHERE workout_id = $1
            ORDER BY position
            "#,
        )
        .bind(workout_id)
        .fetch_all(db)
        .await?;

        let set_rows = sqlx::query_as::<_, SetRow>(
            r#"
            SELECT s.workout_exercise_id, s.reps, s.weight
            FROM sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            WHERE we.workout_id = $1
            ORDER BY s.position
            "#,
        )
        .bind(workout_id)
        .fetch_all(db)
        .await?;

        let exercises = assemble_entries(entry_rows, set_rows)
            .remove(&workout.id)
            .unwrap_or_default();

        Ok(Some(WorkoutDetail { workout, exercises }))
    }

    /// The whole history of one user with nested detail, most recent workout
    /// first. This ordering is what the profile engine's tie-break and
    /// "most recent day" logic rely on.
    pub async fn list_full_history(
        db: &PgPool,
        user_id: Uuid,
    ) -> anyhow::Result<Vec<WorkoutDetail>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, user_id, started_at, duration_minutes, notes, created_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY started_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let entry_rows = sqlx::query_as::<_, WorkoutExerciseRow>(
            r#"
            SELECT we.id, we.workout_id, we.exercise_id
            FROM workout_exercises we
            JOIN workouts w ON w.id = we.workout_id
            WHERE w.user_id = $1
            ORDER BY we.workout_id, we.position
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let set_rows = sqlx::query_as::<_, SetRow>(
            r#"
            SELECT s.workout_exercise_id, s.reps, s.weight
            FROM sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            JOIN workouts w ON w.id = we.workout_id
            WHERE w.user_id = $1
            ORDER BY s.workout_exercise_id, s.position
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        let mut by_workout = assemble_entries(entry_rows, set_rows);
        Ok(workouts
            .into_iter()
            .map(|w| {
                let exercises = by_workout.remove(&w.id).unwrap_or_default();
                WorkoutDetail {
                    workout: w,
                    exercises,
                }
            })
            .collect())
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, workout_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM workouts WHERE id = $1 AND user_id = $2"#)
            .bind(workout_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn assemble_entries(
    entry_rows: Vec<WorkoutExerciseRow>,
    set_rows: Vec<SetRow>,
) -> HashMap<Uuid, Vec<WorkoutExercise>> {
    let mut sets_by_entry: HashMap<Uuid, Vec<WorkoutSet>> = HashMap::new();
    for row in set_rows {
        sets_by_entry
            .entry(row.workout_exercise_id)
            .or_default()
            .push(WorkoutSet {
                reps: row.reps,
                weight: row.weight,
            });
    }

    let mut by_workout: HashMap<Uuid, Vec<WorkoutExercise>> = HashMap::new();
    for row in entry_rows {
        let sets = sets_by_entry.remove(&row.id).unwrap_or_default();
        by_workout
            .entry(row.workout_id)
            .or_default()
            .push(WorkoutExercise {
                exercise_id: row.exercise_id,
                sets,
            });
    }
    by_workout
}

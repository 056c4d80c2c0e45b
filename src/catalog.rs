/// Stable ordinal key identifying one catalog entry.
///
/// Correlates a timer with its display slot and catalog metadata.
pub type WorkoutId = usize;

/// One read-only workout routine
#[derive(Debug, Clone)]
pub struct Workout {
    /// Display name
    pub name: String,

    /// Total duration in minutes
    pub duration_min: u32,

    /// Exercise descriptions, e.g. "Bench Press - 4x8"
    pub exercises: Vec<String>,
}

impl Workout {
    pub fn new(name: impl Into<String>, duration_min: u32, exercises: &[&str]) -> Self {
        Workout {
            name: name.into(),
            duration_min,
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Total duration in seconds, the starting value of a countdown
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_min) * 60
    }
}

/// Immutable workout catalog, indexed by ordinal position.
///
/// The catalog owns every duration; displays are pure output sinks and are
/// never consulted for timer configuration.
#[derive(Debug, Clone)]
pub struct WorkoutCatalog {
    workouts: Vec<Workout>,
}

impl WorkoutCatalog {
    pub fn new(workouts: Vec<Workout>) -> Self {
        WorkoutCatalog { workouts }
    }

    /// Look up a workout by identifier
    pub fn get(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.get(id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkoutId, &Workout)> {
        self.workouts.iter().enumerate()
    }
}

impl Default for WorkoutCatalog {
    /// The stock Aura Gym weekly split
    fn default() -> Self {
        WorkoutCatalog::new(vec![
            Workout::new(
                "Chest & Triceps",
                45,
                &[
                    "Bench Press - 4x8",
                    "Incline Dumbbell - 4x10",
                    "Dips - 3xMax",
                    "Triceps Pushdown - 3x12",
                ],
            ),
            Workout::new(
                "Back & Biceps",
                45,
                &[
                    "Deadlift - 4x6",
                    "Pull-Ups - 4xMax",
                    "Bent-over Row - 4x8",
                    "Bicep Curl - 3x12",
                ],
            ),
            Workout::new(
                "Shoulders",
                45,
                &[
                    "Overhead Press - 4x8",
                    "Lateral Raises - 3x15",
                    "Face Pulls - 3x15",
                ],
            ),
            Workout::new(
                "Legs",
                45,
                &["Squats - 5x5", "Leg Press - 4x10", "Hamstring Curl - 3x12"],
            ),
            Workout::new(
                "Core & Abs",
                30,
                &[
                    "Plank 3x60s",
                    "Hanging Leg Raise - 4x12",
                    "Russian Twists - 3x20",
                ],
            ),
            Workout::new(
                "Full Body Functional",
                45,
                &[
                    "Kettlebell Swings - 4x12",
                    "Burpees - 3x15",
                    "Farmer Carry - 3x60s",
                ],
            ),
        ])
    }
}

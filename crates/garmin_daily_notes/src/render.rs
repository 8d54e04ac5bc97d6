//! Markdown rendering of a day's health record.

use std::fmt::Write as _;

use garmin_bridge_client::{ExerciseEntry, HealthRecord};

/// Heading that marks the generated block inside a daily note.
pub const SECTION_MARKER: &str = "## Garmin Data";

/// Render the `## Garmin Data` block for a record.
pub fn render_section(record: &HealthRecord) -> String {
    let mut section = format!("{SECTION_MARKER}\n\n");

    if let Some(score) = record.sleep_score {
        let _ = writeln!(section, "**Sleep Score:** {score}");
    }

    if let (Some(start), Some(end)) = (&record.sleep_start_time, &record.sleep_end_time) {
        let _ = writeln!(section, "**Sleep Time:** {start} - {end}");
    }

    if !record.exercises.is_empty() {
        section.push_str("\n**Exercises:**\n");
        for exercise in &record.exercises {
            section.push_str(&exercise_line(exercise));
            section.push('\n');
        }
    }

    section.push('\n');
    section
}

fn exercise_line(exercise: &ExerciseEntry) -> String {
    let mut line = format!(
        "- {} at {} ({} min)",
        exercise.activity_type,
        exercise.start_time,
        whole_minutes(exercise.duration_seconds)
    );
    if let Some(calories) = exercise.calories {
        let _ = write!(line, " - {calories} cal");
    }
    if let Some(km) = exercise.distance_km {
        let _ = write!(line, " - {km:.1} km");
    }
    line
}

/// Seconds to minutes, rounding half up. Saturates for absurd durations.
fn whole_minutes(seconds: f64) -> u64 {
    (seconds / 60.0).round() as u64
}

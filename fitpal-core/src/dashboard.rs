//! Text rendering of the session's totals and entries.

use serde::Serialize;
use std::fmt;

use crate::models::MealType;
use crate::progress::Progress;
use crate::tracker::Tracker;

/// Width of the text progress bar, in cells.
const BAR_WIDTH: usize = 20;

/// Read-only view over a tracker and the daily goal.
pub struct Dashboard<'a> {
    tracker: &'a Tracker,
    goal: u32,
}

/// Totals shown on the dashboard, in a serializable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub consumed: u64,
    pub burned: u64,
    pub net: i64,
    pub goal: u32,
    pub remaining: u64,
    pub percentage: f64,
    pub meals: usize,
    pub workouts: usize,
}

impl<'a> Dashboard<'a> {
    pub fn new(tracker: &'a Tracker, goal: u32) -> Self {
        Self { tracker, goal }
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(self.tracker.total_consumed(), self.goal)
    }

    pub fn summary(&self) -> DashboardSummary {
        let progress = self.progress();
        DashboardSummary {
            consumed: progress.consumed,
            burned: self.tracker.total_burned(),
            net: self.tracker.net_calories(),
            goal: self.goal,
            remaining: progress.remaining,
            percentage: progress.percentage,
            meals: self.tracker.meals().len(),
            workouts: self.tracker.workouts().len(),
        }
    }

    fn write_bar(&self, f: &mut fmt::Formatter<'_>, progress: &Progress) -> fmt::Result {
        let empty = progress.ring_offset(BAR_WIDTH as f64).round() as usize;
        let filled = BAR_WIDTH.saturating_sub(empty);
        writeln!(
            f,
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            progress.percentage
        )
    }

    fn write_meals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today's Meals")?;
        writeln!(f, "{}", "-".repeat(13))?;

        if self.tracker.meals().is_empty() {
            return writeln!(f, "No meals logged yet.");
        }

        for meal_type in MealType::ALL {
            let meals = self.tracker.meals_by_type(meal_type);
            if meals.is_empty() {
                continue;
            }
            writeln!(f, "{}", meal_type.label())?;
            for meal in meals {
                writeln!(f, "  {} {:<30} {:>6} kcal", meal.id, meal.description, meal.calories)?;
            }
        }
        Ok(())
    }

    fn write_workouts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Today's Workouts")?;
        writeln!(f, "{}", "-".repeat(16))?;

        if self.tracker.workouts().is_empty() {
            return writeln!(f, "No workouts logged yet.");
        }

        for workout in self.tracker.workouts() {
            writeln!(
                f,
                "  {} {:<30} {:>6} kcal",
                workout.id, workout.description, workout.calories_burned
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = self.progress();

        writeln!(f, "Consumed: {} kcal", progress.consumed)?;
        self.write_bar(f, &progress)?;
        writeln!(f, "{} kcal remaining", progress.remaining)?;
        writeln!(f, "Goal: {} kcal", self.goal)?;
        writeln!(f)?;
        writeln!(f, "Burned: {} kcal", self.tracker.total_burned())?;
        writeln!(f, "Net: {} kcal", self.tracker.net_calories())?;
        writeln!(f)?;
        self.write_meals(f)?;
        writeln!(f)?;
        self.write_workouts(f)
    }
}

//! Interactive session: one tracker, the two entry forms and an optional
//! estimator, driven by one command line at a time.

use clap::{Parser, Subcommand};
use fitpal_core::{
    Dashboard, Estimator, MealForm, MealType, TextGenerator, Tracker, WorkoutForm,
};

use crate::commands::OutputFormat;

const OFFLINE: &str = "Estimation is disabled in this session. Please enter calories with --calories.";

/// A line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "fitpal>")]
struct SessionLine {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Log a meal: meal --type lunch --calories 450 turkey sandwich
    Meal {
        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "breakfast")]
        meal_type: MealType,

        /// Calories in kcal
        #[arg(long, short, conflicts_with = "estimate")]
        calories: Option<u32>,

        /// Ask the estimation service for the calories
        #[arg(long, short)]
        estimate: bool,

        /// Food description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Log a workout: workout --estimate 30 minute run
    Workout {
        /// Calories burned in kcal
        #[arg(long, short, conflicts_with = "estimate")]
        calories: Option<u32>,

        /// Ask the estimation service for the calories burned
        #[arg(long, short)]
        estimate: bool,

        /// Workout description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Show totals, goal progress and all entries
    Dashboard {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List logged meals
    Meals {
        /// Only meals of this type
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: Option<MealType>,
    },

    /// List logged workouts
    Workouts,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Result of handling one line.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Output(String),
    Quit,
}

pub struct Session<G> {
    tracker: Tracker,
    meal_form: MealForm,
    workout_form: WorkoutForm,
    estimator: Option<Estimator<G>>,
    goal: u32,
}

impl<G: TextGenerator> Session<G> {
    pub fn new(estimator: Option<Estimator<G>>, goal: u32) -> Self {
        Self {
            tracker: Tracker::new(),
            meal_form: MealForm::new(),
            workout_form: WorkoutForm::new(),
            estimator,
            goal,
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Handle one input line. Errors are returned as output text.
    pub async fn handle(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Output(String::new());
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => return Outcome::Output(e),
        };

        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => return Outcome::Output(e.render().to_string()),
        };

        let output = match parsed.action {
            Action::Meal {
                meal_type,
                calories,
                estimate,
                description,
            } => self.log_meal(meal_type, calories, estimate, &description).await,
            Action::Workout {
                calories,
                estimate,
                description,
            } => self.log_workout(calories, estimate, &description).await,
            Action::Dashboard { format } => self.dashboard(format),
            Action::Meals { meal_type } => self.list_meals(meal_type),
            Action::Workouts => self.list_workouts(),
            Action::Quit => return Outcome::Quit,
        };

        Outcome::Output(output)
    }

    async fn log_meal(
        &mut self,
        meal_type: MealType,
        calories: Option<u32>,
        estimate: bool,
        description: &[String],
    ) -> String {
        let form = &mut self.meal_form;
        form.set_description(description.join(" "));
        form.set_meal_type(meal_type);
        form.set_calories(calories);

        let mut output = String::new();
        if estimate {
            let Some(estimator) = self.estimator.as_ref() else {
                form.cancel();
                return OFFLINE.to_string();
            };
            match form.request_estimate(estimator).await {
                Ok(kcal) => output.push_str(&format!("Estimated {} kcal\n", kcal)),
                Err(e) => {
                    form.cancel();
                    return e.to_string();
                }
            }
        }

        match form.submit(&mut self.tracker) {
            Ok(entry) => {
                output.push_str(&format!(
                    "Logged {} {}: {} ({} kcal)",
                    entry.meal_type, entry.id, entry.description, entry.calories
                ));
                output
            }
            Err(e) => {
                form.cancel();
                e.to_string()
            }
        }
    }

    async fn log_workout(
        &mut self,
        calories: Option<u32>,
        estimate: bool,
        description: &[String],
    ) -> String {
        let form = &mut self.workout_form;
        form.set_description(description.join(" "));
        form.set_calories_burned(calories);

        let mut output = String::new();
        if estimate {
            let Some(estimator) = self.estimator.as_ref() else {
                form.cancel();
                return OFFLINE.to_string();
            };
            match form.request_estimate(estimator).await {
                Ok(kcal) => output.push_str(&format!("Estimated {} kcal burned\n", kcal)),
                Err(e) => {
                    form.cancel();
                    return e.to_string();
                }
            }
        }

        match form.submit(&mut self.tracker) {
            Ok(entry) => {
                output.push_str(&format!(
                    "Logged workout {}: {} ({} kcal)",
                    entry.id, entry.description, entry.calories_burned
                ));
                output
            }
            Err(e) => {
                form.cancel();
                e.to_string()
            }
        }
    }

    fn dashboard(&self, format: OutputFormat) -> String {
        let dashboard = Dashboard::new(&self.tracker, self.goal);
        match format {
            OutputFormat::Text => dashboard.to_string(),
            OutputFormat::Json => serde_json::to_string_pretty(&dashboard.summary())
                .unwrap_or_else(|e| format!("Failed to serialize dashboard: {}", e)),
        }
    }

    fn list_meals(&self, meal_type: Option<MealType>) -> String {
        let meals = match meal_type {
            Some(t) => self.tracker.meals_by_type(t),
            None => self.tracker.meals().iter().collect(),
        };
        if meals.is_empty() {
            return "No meals logged yet.".to_string();
        }

        let mut output = String::new();
        for meal in &meals {
            output.push_str(&format!(
                "  {} {:10} {} ({} kcal)\n",
                meal.id, meal.meal_type, meal.description, meal.calories
            ));
        }
        output.push_str(&format!("\nTotal: {} meal(s)", meals.len()));
        output
    }

    fn list_workouts(&self) -> String {
        let workouts = self.tracker.workouts();
        if workouts.is_empty() {
            return "No workouts logged yet.".to_string();
        }

        let mut output = String::new();
        for workout in workouts {
            output.push_str(&format!(
                "  {} {} ({} kcal)\n",
                workout.id, workout.description, workout.calories_burned
            ));
        }
        output.push_str(&format!("\nTotal: {} workout(s)", workouts.len()));
        output
    }
}

/// Split a line on whitespace. Single or double quotes group words into one
/// argument and are removed.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote.", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

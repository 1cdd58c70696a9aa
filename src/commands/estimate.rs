use clap::{Args, Subcommand};
use fitpal_core::{Estimator, MealForm, WorkoutForm};

use crate::config::Config;

#[derive(Args)]
pub struct EstimateCommand {
    #[command(subcommand)]
    pub command: EstimateSubcommand,
}

#[derive(Subcommand)]
pub enum EstimateSubcommand {
    /// Estimate the calories in a food description
    Food {
        /// Food description, e.g. "2 eggs, 1 slice of toast"
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Estimate the calories burned by a workout
    Workout {
        /// Workout description, e.g. "30 minute run"
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
}

impl EstimateCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let estimator = Estimator::gemini(&config.estimation_config()?)?;

        let calories = match &self.command {
            EstimateSubcommand::Food { description } => {
                let mut form = MealForm::new();
                form.set_description(description.join(" "));
                form.request_estimate(&estimator).await?
            }
            EstimateSubcommand::Workout { description } => {
                let mut form = WorkoutForm::new();
                form.set_description(description.join(" "));
                form.request_estimate(&estimator).await?
            }
        };

        println!("{} kcal", calories);
        Ok(())
    }
}

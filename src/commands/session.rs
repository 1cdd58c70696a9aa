use clap::Args;
use fitpal_core::Estimator;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::session::{Outcome, Session};

#[derive(Args)]
pub struct SessionCommand {
    /// Start without the estimation service; calories must be entered manually
    #[arg(long)]
    pub offline: bool,
}

impl SessionCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let estimator = if self.offline {
            tracing::info!("starting offline session");
            None
        } else {
            Some(Estimator::gemini(&config.estimation_config()?)?)
        };

        let mut session = Session::new(estimator, config.daily_goal.value);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("fitpal session. Type 'help' for commands, 'quit' to exit.");
        loop {
            print!("fitpal> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match session.handle(&line).await {
                Outcome::Output(text) => {
                    if !text.is_empty() {
                        println!("{}", text.trim_end());
                    }
                }
                Outcome::Quit => break,
            }
        }

        Ok(())
    }
}

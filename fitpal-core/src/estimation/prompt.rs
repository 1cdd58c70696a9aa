//! Instructions sent to the text-generation model.

/// Prompt asking for the calories contained in a food description.
pub fn food_prompt(description: &str) -> String {
    format!(
        "You are a calorie estimation expert. Analyze the following food description and \
         provide only a single integer representing the estimated total calories. \
         Do not include any other text, units, or explanations. Food: \"{}\"",
        description.trim()
    )
}

/// Prompt asking for the calories burned by a workout description.
pub fn workout_prompt(description: &str) -> String {
    format!(
        "You are a fitness expert. Analyze the following workout description and \
         provide only a single integer representing the estimated total calories burned. \
         Assume an average person's weight and intensity. \
         Do not include any other text, units, or explanations. Workout: \"{}\"",
        description.trim()
    )
}

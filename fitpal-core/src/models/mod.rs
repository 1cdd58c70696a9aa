mod entry_id;
mod meal_entry;
mod meal_type;
mod workout_entry;

pub use entry_id::EntryId;
pub use meal_entry::MealEntry;
pub use meal_type::MealType;
pub use workout_entry::WorkoutEntry;

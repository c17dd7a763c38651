pub mod conflicts;
pub mod core;
pub mod data;
pub mod exams;
pub mod reports;
pub mod rooms;
pub mod seating;
pub mod students;

//! quizmark-report — HTML and CSV rendering of session reports.

pub mod csv;
pub mod html;

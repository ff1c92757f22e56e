//! quizmark-core — quiz model, attempt state machine, scoring, and content
//! validation.
//!
//! This crate defines the fundamental data model and evaluation logic that
//! the rest of the quizmark system builds on. It is deliberately UI-agnostic:
//! front-ends drive a [`session::QuizSession`] through the
//! [`session::AnswerSource`] and [`session::SessionObserver`] seams.

pub mod attempt;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod statistics;

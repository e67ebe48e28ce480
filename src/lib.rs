//! Translator & Critic: a small web front-end that sends text to the
//! Mentorpiece model API for translation and, on request, has a second model
//! grade the result.

pub mod llm;
pub mod routes;
pub mod settings;
pub mod state;
pub mod translate;
pub mod views;

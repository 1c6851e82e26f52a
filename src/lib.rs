//! CorBas - linguistic annotation service for corpus analysis.
//!
//! Annotates English text with part of speech, dependency structure, lemmas
//! and USAS semantic-domain codes, and highlights phrases in PDFs.

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod models;
pub mod server;
pub mod services;

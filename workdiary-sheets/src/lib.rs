//! Google Sheets backend for the work diary.

pub mod client;
pub mod requests;
pub mod responses;
pub mod url;

pub use client::SheetsClient;

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod bundled;
pub mod bundled_rest;
pub mod local_storage;
pub mod rest;

//! Social mention monitoring glue: fetch mentions, classify them for
//! sentiment and lead potential, and push qualified leads into the CRM.

pub mod analysis;
pub mod config;
pub mod crm;
pub mod error;
pub mod mentions;
pub mod personas;
pub mod pipeline;
pub mod web;

pub use error::{Error, Result};

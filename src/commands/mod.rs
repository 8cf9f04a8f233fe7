//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler

pub mod expand;

pub use expand::{execute_expand, ExpandOptions};

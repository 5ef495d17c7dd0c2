pub mod memory;
pub mod repositories_impl;

//! Attack simulations. Every test here must end in a refusal.

pub mod certificates;
pub mod tampering;

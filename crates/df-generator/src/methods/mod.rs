//! Generator methods.

pub mod coprime_sum;
pub mod enhanced;
pub mod lcm_offset;
pub mod partition;
pub mod power_offset;
pub mod sequence;

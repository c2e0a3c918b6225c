pub mod access_timing;
pub mod access_type;
pub mod bank_split;
pub mod compiler;
pub mod cycle_pattern_register;
pub mod occupancy;
pub mod slot_allocator;
pub mod timing_range;

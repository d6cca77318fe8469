pub mod load;
pub mod memory;
pub mod platform;
pub mod ticks;
pub mod volumes;

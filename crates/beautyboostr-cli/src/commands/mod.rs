pub mod add;
pub mod browse;

//! Default value functions for serde deserialization.

pub fn cost_multiplier() -> i32 {
    1000
}

pub fn max_mprim_offset() -> f64 {
    0.0
}

pub fn graph_log() -> String {
    "bhuja::graph".to_string()
}

pub fn expands_log() -> String {
    "bhuja::expand".to_string()
}

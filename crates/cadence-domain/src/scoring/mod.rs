mod classifier;
mod value_objects;

#[cfg(test)]
mod classifier_test;

pub use classifier::ScoreClassifier;
pub use value_objects::{ScoringThresholds, ThresholdProfile, TrafficLight};

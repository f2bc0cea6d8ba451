use super::value_objects::{ScoringThresholds, TrafficLight};

/// Maps a percentage score to a traffic-light status.
/// Pure and total; threshold validity is guaranteed at write time.
pub struct ScoreClassifier;

impl ScoreClassifier {
    pub fn classify(score: f64, thresholds: &ScoringThresholds) -> TrafficLight {
        if score <= thresholds.red_max() {
            TrafficLight::Red
        } else if score <= thresholds.orange_max() {
            TrafficLight::Orange
        } else {
            TrafficLight::Green
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::classifier::ScoreClassifier;
    use super::super::value_objects::{ScoringThresholds, TrafficLight};

    fn thresholds() -> ScoringThresholds {
        ScoringThresholds::new(33.0, 80.0).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        let t = thresholds();
        assert_eq!(ScoreClassifier::classify(0.0, &t), TrafficLight::Red);
        assert_eq!(ScoreClassifier::classify(33.0, &t), TrafficLight::Red);
        assert_eq!(ScoreClassifier::classify(34.0, &t), TrafficLight::Orange);
        assert_eq!(ScoreClassifier::classify(80.0, &t), TrafficLight::Orange);
        assert_eq!(ScoreClassifier::classify(81.0, &t), TrafficLight::Green);
        assert_eq!(ScoreClassifier::classify(100.0, &t), TrafficLight::Green);
    }

    #[test]
    fn test_classify_is_monotone() {
        let t = thresholds();
        let mut last = TrafficLight::Red;
        for score in 0..=100 {
            let tier = ScoreClassifier::classify(score as f64, &t);
            // Tiers only ever move upward as the score climbs
            let rank = |s: TrafficLight| match s {
                TrafficLight::Red => 0,
                TrafficLight::Orange => 1,
                TrafficLight::Green => 2,
            };
            assert!(rank(tier) >= rank(last));
            last = tier;
        }
    }

    #[test]
    fn test_classify_fractional_scores() {
        let t = thresholds();
        assert_eq!(ScoreClassifier::classify(33.5, &t), TrafficLight::Orange);
        assert_eq!(ScoreClassifier::classify(80.5, &t), TrafficLight::Green);
    }
}

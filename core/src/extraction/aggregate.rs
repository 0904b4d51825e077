use super::codes::ConceptCode;
use super::values::extract_numeric;
use crate::content::ContentItem;
use crate::types::MeasurementStats;

/// Collects every numeric value with the code across `nodes`
///
/// Unlike [`find_first`](super::locator::find_first) this is a multi-match
/// pass. Non-numeric and unparsable entries are skipped.
pub fn collect_values<'a, N, I>(nodes: I, code: ConceptCode) -> Vec<f64>
where
    N: ContentItem + 'a,
    I: IntoIterator<Item = &'a N>,
{
    nodes
        .into_iter()
        .filter(|node| {
            node.concept_code()
                .map(|c| code.matches(&c))
                .unwrap_or(false)
        })
        .filter_map(extract_numeric)
        .collect()
}

/// Summarizes repeated same-coded measurements
///
/// Returns min/max/avg rounded to three decimals, or all-`None` with a zero
/// count when nothing numeric matched.
pub fn aggregate<'a, N, I>(nodes: I, code: ConceptCode) -> MeasurementStats
where
    N: ContentItem + 'a,
    I: IntoIterator<Item = &'a N>,
{
    MeasurementStats::from_values(&collect_values(nodes, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;
    use crate::extraction::codes::{KVP, XRAY_TUBE_CURRENT};

    #[test]
    fn test_aggregate_three_values() {
        let nodes = vec![
            ContentNode::num(KVP, "80", "kV"),
            ContentNode::num(KVP, "90", "kV"),
            ContentNode::num(KVP, "100", "kV"),
        ];
        let stats = aggregate(&nodes, KVP);
        assert_eq!(stats.min, Some(80.0));
        assert_eq!(stats.max, Some(100.0));
        assert_eq!(stats.avg, Some(90.0));
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_aggregate_no_matches_is_undefined() {
        let nodes = vec![ContentNode::num(XRAY_TUBE_CURRENT, "100", "mA")];
        let stats = aggregate(&nodes, KVP);
        assert_eq!(stats, MeasurementStats::default());
        assert!(stats.min.is_none() && stats.max.is_none() && stats.avg.is_none());
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_aggregate_count_ignores_order_and_noise() {
        let forward = vec![
            ContentNode::num(KVP, "28", "kV"),
            ContentNode::num(XRAY_TUBE_CURRENT, "100", "mA"),
            ContentNode::num(KVP, "30", "kV"),
            ContentNode::num(KVP, "bad", "kV"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(aggregate(&forward, KVP).count, 2);
        assert_eq!(aggregate(&forward, KVP), aggregate(&reversed, KVP));
    }

    #[test]
    fn test_aggregate_rounds_average() {
        let nodes = vec![
            ContentNode::num(KVP, "1", ""),
            ContentNode::num(KVP, "1", ""),
            ContentNode::num(KVP, "2", ""),
        ];
        assert_eq!(aggregate(&nodes, KVP).avg, Some(1.333));
    }
}

use crate::roadmap::models::{OverallProgress, RoadmapStage};

/// Fills missing `orderIndex` values at every level with the position index.
pub fn normalize_order_indices(stages: &mut [RoadmapStage]) {
    for (stage_idx, stage) in stages.iter_mut().enumerate() {
        stage.order_index.get_or_insert(stage_idx as i32);
        for (area_idx, area) in stage.areas.iter_mut().enumerate() {
            area.order_index.get_or_insert(area_idx as i32);
            for (item_idx, item) in area.items.iter_mut().enumerate() {
                item.order_index.get_or_insert(item_idx as i32);
            }
        }
    }
}

/// Sets the `check` flag of one item addressed by nested indices.
pub fn set_item_check(
    stages: &mut [RoadmapStage],
    stage_idx: usize,
    area_idx: usize,
    item_idx: usize,
    checked: bool,
) -> Result<(), String> {
    let item = stages
        .get_mut(stage_idx)
        .and_then(|s| s.areas.get_mut(area_idx))
        .and_then(|a| a.items.get_mut(item_idx))
        .ok_or_else(|| "Invalid indices".to_string())?;
    item.check = checked;
    Ok(())
}

/// Counts items across all stages. An item is completed when checked or at
/// 100% progress, and in progress when strictly between 0% and 100%.
pub fn compute_overall_progress(stages: &[RoadmapStage]) -> OverallProgress {
    let mut progress = OverallProgress::default();

    for item in stages
        .iter()
        .flat_map(|s| &s.areas)
        .flat_map(|a| &a.items)
    {
        progress.total_items += 1;
        let pct = item
            .progress
            .as_ref()
            .map(|p| p.progress_percentage)
            .unwrap_or(0.0);
        if item.check || pct >= 100.0 {
            progress.completed_items += 1;
        } else if pct > 0.0 {
            progress.in_progress_items += 1;
        }
    }

    if progress.total_items > 0 {
        progress.percentage_complete = ((progress.completed_items as f64
            / progress.total_items as f64)
            * 100.0)
            .round() as u8;
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stages() -> Vec<RoadmapStage> {
        serde_json::from_value(json!([
            {
                "id": "s1", "name": "Foundations",
                "areas": [
                    {"id": "a1", "name": "Python", "items": [
                        {"id": "i1", "name": "Syntax", "check": true},
                        {"id": "i2", "name": "Data structures", "progress": {"progressPercentage": 40}},
                        {"id": "i3", "name": "Testing", "progress": {"progressPercentage": 100}}
                    ]}
                ]
            },
            {
                "id": "s2", "name": "Applied", "orderIndex": 7,
                "areas": [
                    {"id": "a2", "name": "ML", "items": [
                        {"id": "i4", "name": "Regression"},
                        {"id": "i5", "name": "Classification", "orderIndex": 9},
                        {"id": "i6", "name": "Clustering"}
                    ]}
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_overall_progress_counts() {
        let progress = compute_overall_progress(&stages());
        assert_eq!(progress.total_items, 6);
        assert_eq!(progress.completed_items, 2);
        assert_eq!(progress.in_progress_items, 1);
        assert_eq!(progress.percentage_complete, 33);
    }

    #[test]
    fn test_empty_roadmap_is_zero_percent() {
        assert_eq!(compute_overall_progress(&[]), OverallProgress::default());
    }

    #[test]
    fn test_set_item_check_updates_progress() {
        let mut stages = stages();
        set_item_check(&mut stages, 1, 0, 2, true).unwrap();
        set_item_check(&mut stages, 0, 0, 0, false).unwrap();

        assert!(stages[1].areas[0].items[2].check);
        assert!(!stages[0].areas[0].items[0].check);
        let progress = compute_overall_progress(&stages);
        assert_eq!(progress.completed_items, 2);
    }

    #[test]
    fn test_set_item_check_rejects_out_of_range() {
        let mut stages = stages();
        for (s, a, i) in [(2, 0, 0), (0, 1, 0), (0, 0, 3)] {
            assert_eq!(
                set_item_check(&mut stages, s, a, i, true),
                Err("Invalid indices".to_string())
            );
        }
    }

    #[test]
    fn test_normalize_keeps_existing_indices() {
        let mut stages = stages();
        normalize_order_indices(&mut stages);

        assert_eq!(stages[0].order_index, Some(0));
        assert_eq!(stages[1].order_index, Some(7));
        assert_eq!(stages[1].areas[0].order_index, Some(0));
        let items: Vec<_> = stages[1].areas[0].items.iter().map(|i| i.order_index).collect();
        assert_eq!(items, vec![Some(0), Some(9), Some(2)]);
    }
}

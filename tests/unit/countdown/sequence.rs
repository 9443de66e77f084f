use super::*;

fn values(plan: &FramePlan) -> Vec<i64> {
    plan.frames().iter().map(|f| f.remaining_secs).collect()
}

#[test]
fn far_future_clamps_to_max_distance() {
    let plan = FramePlan::new(MAX_DISTANCE_SECS + 1_000, 0);
    assert_eq!(plan.distance(), 8_639_999);
    assert_eq!(plan.len(), 60);
    assert_eq!(plan.frames()[0].remaining_secs, 8_639_999);
    assert_eq!(plan.frames()[59].remaining_secs, 8_639_940);
}

#[test]
fn under_a_minute_renders_one_frame_per_second() {
    let now = 1_700_000_000;
    let plan = FramePlan::new(now + 45, now);
    assert_eq!(plan.distance(), 45);
    assert_eq!(plan.len(), 45);
    assert_eq!(values(&plan), (1..=45).rev().collect::<Vec<_>>());
}

#[test]
fn expired_target_renders_single_zero_frame() {
    let now = 1_700_000_000;
    let plan = FramePlan::new(now - 5, now);
    assert_eq!(plan.distance(), 0);
    assert_eq!(values(&plan), vec![0]);
}

#[test]
fn target_equal_to_now_renders_single_zero_frame() {
    let plan = FramePlan::new(42, 42);
    assert_eq!(plan.distance(), 0);
    assert_eq!(values(&plan), vec![0]);
}

#[test]
fn an_hour_away_renders_default_budget() {
    let now = 1_700_000_000;
    let plan = FramePlan::new(now + 3_600, now);
    assert_eq!(plan.len(), DEFAULT_FRAME_BUDGET as usize);
    assert_eq!(values(&plan), (3_541..=3_600).rev().collect::<Vec<_>>());
}

#[test]
fn exactly_one_minute_uses_budget() {
    let plan = FramePlan::new(60, 0);
    assert_eq!(plan.len(), 60);
    assert_eq!(plan.frames()[59].remaining_secs, 1);
}

#[test]
fn indices_are_dense_and_match_values() {
    let plan = FramePlan::new(10_000, 0);
    for (i, f) in plan.frames().iter().enumerate() {
        assert_eq!(f.index, FrameIndex(i as u32));
        assert_eq!(f.remaining_secs, plan.distance() - i as i64);
        assert!(f.remaining_secs >= 0);
    }
}

#[test]
fn epoch_zero_end_time_is_expired() {
    let plan = FramePlan::new(0, unix_now());
    assert_eq!(values(&plan), vec![0]);
}

#[test]
fn extreme_inputs_do_not_overflow() {
    let plan = FramePlan::new(i64::MAX, i64::MIN);
    assert_eq!(plan.distance(), MAX_DISTANCE_SECS);
    let plan = FramePlan::new(i64::MIN, i64::MAX);
    assert_eq!(values(&plan), vec![0]);
}

#[test]
fn custom_budget_replaces_sixty() {
    let plan = FramePlan::with_budget(100, 0, 5);
    assert_eq!(values(&plan), vec![100, 99, 98, 97, 96]);
    let plan = FramePlan::with_budget(3, 0, 5);
    assert_eq!(values(&plan), vec![3, 2, 1]);
    let plan = FramePlan::with_budget(100, 0, 0);
    assert_eq!(plan.len(), 1);
}

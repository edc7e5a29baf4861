use std::collections::BTreeSet;

use super::*;
use crate::ManualScheduler;

/// 记录所有可视变化的假页面
#[derive(Debug, Default)]
struct RecordingSurface {
    classes: Vec<BTreeSet<&'static str>>,
    indicators: Vec<bool>,
    indicator_builds: usize,
    hidden: bool,
}

impl Surface for RecordingSurface {
    fn place_item(&mut self, item: usize, from: Option<Position>, to: Position) {
        if self.classes.len() <= item {
            self.classes.resize(item + 1, BTreeSet::new());
        }
        let classes = &mut self.classes[item];
        match from {
            Some(from) => {
                assert!(classes.remove(from.class_name()), "stale class on item {item}");
            }
            None => classes.clear(),
        }
        classes.insert(to.class_name());
    }

    fn build_indicators(&mut self, count: usize, active: usize) {
        self.indicator_builds += 1;
        self.indicators = (0..count).map(|index| index == active).collect();
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        self.indicators[index] = active;
    }

    fn page_hidden(&self) -> bool {
        self.hidden
    }
}

type TestDisplay = RotatingDisplay<RecordingSurface, ManualScheduler>;

fn create(start_offset: usize) -> TestDisplay {
    RotatingDisplay::new(
        RecordingSurface::default(),
        ManualScheduler::new(),
        POSITION_COUNT,
        start_offset,
        CarouselConfig::default(),
    )
    .expect("display should be created")
}

fn create_without_autoplay(start_offset: usize) -> TestDisplay {
    RotatingDisplay::new(
        RecordingSurface::default(),
        ManualScheduler::new(),
        POSITION_COUNT,
        start_offset,
        CarouselConfig {
            autoplay: false,
            ..Default::default()
        },
    )
    .expect("display should be created")
}

/// every slot is occupied exactly once and the surface agrees with the state
fn assert_bijection(display: &TestDisplay) {
    let occupied: BTreeSet<_> = (0..display.item_count())
        .map(|item| display.position_of(item).expect("item has a position"))
        .collect();
    assert_eq!(occupied.len(), POSITION_COUNT);

    for item in 0..display.item_count() {
        let expect = display.position_of(item).expect("item has a position");
        let classes = &display.surface().classes[item];
        assert_eq!(classes.len(), 1, "item {item} has {classes:?}");
        assert!(classes.contains(expect.class_name()));
    }
}

fn active_indicators(display: &TestDisplay) -> Vec<usize> {
    display
        .surface()
        .indicators
        .iter()
        .enumerate()
        .filter(|(_, active)| **active)
        .map(|(index, _)| index)
        .collect()
}

fn settle(display: &mut TestDisplay) {
    display.advance(display.config().transition_ms as u64);
}

#[test]
fn test_initial_layout_for_every_offset() {
    for k in 0..POSITION_COUNT {
        let display = create(k);
        assert_eq!(display.current_index(), k);
        for i in 0..POSITION_COUNT {
            assert_eq!(
                display.position_of(i),
                Some(Position::from_index((i + 5 - k) % 5)),
                "offset {k}, item {i}"
            );
        }
        assert_bijection(&display);
        assert!(!display.is_animating());
    }
}

#[test]
fn test_initial_indicator_is_always_zero() {
    let display = create(3);
    assert_eq!(display.surface().indicator_builds, 1);
    assert_eq!(display.surface().indicators.len(), POSITION_COUNT);
    assert_eq!(active_indicators(&display), vec![0]);
}

#[test]
fn test_rejects_wrong_item_count() {
    let result = RotatingDisplay::new(
        RecordingSurface::default(),
        ManualScheduler::new(),
        4,
        0,
        CarouselConfig::default(),
    );
    assert!(matches!(
        result,
        Err(CarouselError::UnsupportedItemCount { found: 4 })
    ));
}

#[test]
fn test_rejects_out_of_range_offset() {
    let result = RotatingDisplay::new(
        RecordingSurface::default(),
        ManualScheduler::new(),
        POSITION_COUNT,
        5,
        CarouselConfig::default(),
    );
    assert!(matches!(result, Err(CarouselError::InvalidStartOffset(5))));
}

#[test]
fn test_rejects_jump_step_outlasting_transition() {
    let result = RotatingDisplay::new(
        RecordingSurface::default(),
        ManualScheduler::new(),
        POSITION_COUNT,
        0,
        CarouselConfig {
            transition_ms: 300,
            jump_step_ms: 400,
            autoplay: false,
            ..Default::default()
        },
    );
    assert!(matches!(
        result,
        Err(CarouselError::JumpStepTooLong { .. })
    ));
}

#[test]
fn test_next_three_times_from_two() {
    let mut display = create_without_autoplay(2);
    let mut seen = Vec::new();
    for _ in 0..3 {
        display.next();
        seen.push(display.current_index());
        settle(&mut display);
    }
    assert_eq!(seen, vec![3, 4, 0]);
}

#[test]
fn test_forward_step_shifts_every_item_left() {
    let mut display = create_without_autoplay(0);
    let before: Vec<_> = (0..5).map(|i| display.position_of(i).unwrap()).collect();
    display.rotate_step(Direction::Forward);
    for (item, position) in before.into_iter().enumerate() {
        assert_eq!(
            display.position_of(item),
            Some(position.shifted(Direction::Forward))
        );
    }
    assert_bijection(&display);
}

#[test]
fn test_mixed_steps_keep_bijection_and_index() {
    let mut display = create_without_autoplay(1);
    let moves = [
        Direction::Forward,
        Direction::Forward,
        Direction::Backward,
        Direction::Forward,
        Direction::Backward,
        Direction::Backward,
        Direction::Backward,
        Direction::Forward,
        Direction::Backward,
    ];
    let mut expect = 1i64;
    for direction in moves {
        display.rotate_step(direction);
        expect += match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        assert_eq!(display.current_index() as i64, expect.rem_euclid(5));
        assert_bijection(&display);
        assert_eq!(active_indicators(&display), vec![display.current_index()]);
        settle(&mut display);
    }
}

#[test]
fn test_backward_steps_wrap() {
    let mut display = create_without_autoplay(1);
    for expect in [0, 4, 3, 2] {
        display.prev();
        assert_eq!(display.current_index(), expect);
        settle(&mut display);
    }
}

#[test]
fn test_rotate_while_animating_is_noop() {
    let mut display = create_without_autoplay(2);
    display.next();
    assert!(display.is_animating());
    let positions: Vec<_> = (0..5).map(|i| display.position_of(i)).collect();

    display.next();
    display.prev();
    assert_eq!(display.current_index(), 3);
    assert_eq!(
        (0..5).map(|i| display.position_of(i)).collect::<Vec<_>>(),
        positions
    );

    display.advance(699);
    assert!(display.is_animating());
    display.advance(1);
    assert!(!display.is_animating());
    display.next();
    assert_eq!(display.current_index(), 4);
}

#[test]
fn test_jump_takes_shorter_backward_path() {
    let mut display = create_without_autoplay(0);
    display.jump_to(3);
    // first step is immediate
    assert_eq!(display.current_index(), 4);

    display.advance(100);
    assert_eq!(display.current_index(), 3);
    assert!(display.is_animating());
    assert_bijection(&display);
    assert_eq!(active_indicators(&display), vec![3]);

    // cool-down restarts with the last step
    display.advance(699);
    assert!(display.is_animating());
    display.advance(1);
    assert!(!display.is_animating());
}

#[test]
fn test_jump_never_exceeds_two_steps() {
    for start in 0..5 {
        for target in 0..5 {
            let mut display = create_without_autoplay(start);
            let (steps, _) = shortest_path(start, target, 5);
            assert!(steps <= 2, "{start} -> {target} takes {steps}");

            display.jump_to(target as i64);
            let mut moves = if start == target { 0 } else { 1 };
            let mut last = display.current_index();
            for _ in 0..10 {
                display.advance(100);
                if display.current_index() != last {
                    moves += 1;
                    last = display.current_index();
                }
            }
            assert!(moves <= 2);
            assert_eq!(display.current_index(), target);
            assert_bijection(&display);
        }
    }
}

#[test]
fn test_jump_forward_direction() {
    let mut display = create_without_autoplay(1);
    display.jump_to(3);
    assert_eq!(display.current_index(), 2);
    display.advance(100);
    assert_eq!(display.current_index(), 3);
}

#[test]
fn test_jump_to_current_or_while_animating_is_noop() {
    let mut display = create_without_autoplay(2);
    display.jump_to(2);
    assert!(!display.is_animating());

    display.jump_to(7);
    assert!(!display.is_animating());

    display.next();
    display.jump_to(0);
    assert_eq!(display.current_index(), 3);
}

#[test]
fn test_jump_wraps_out_of_range_targets() {
    let mut display = create_without_autoplay(0);
    display.jump_to(-1);
    assert_eq!(display.current_index(), 4);
    settle(&mut display);

    display.jump_to(11);
    display.advance(1000);
    assert_eq!(display.current_index(), 1);
}

#[test]
fn test_jump_blocks_external_steps_until_done() {
    let mut display = create_without_autoplay(0);
    display.jump_to(2);
    display.advance(50);
    display.next();
    display.advance(50);
    assert_eq!(display.current_index(), 2);
}

#[test]
fn test_item_click_on_side_slots() {
    let mut display = create_without_autoplay(0);
    // offset 0: item 1 is on the left, item 4 on the right
    assert_eq!(display.position_of(1), Some(Position::Left));
    assert_eq!(display.position_of(4), Some(Position::FarRight));
    assert_eq!(display.position_of(3), Some(Position::Right));

    display.item_clicked(0);
    display.item_clicked(4);
    assert!(!display.is_animating());

    display.item_clicked(1);
    assert_eq!(display.current_index(), 4);
    settle(&mut display);

    let right = (0..5)
        .find(|i| display.position_of(*i) == Some(Position::Right))
        .expect("someone is on the right");
    display.item_clicked(right);
    assert_eq!(display.current_index(), 0);
}

#[test]
fn test_indicator_click_jumps() {
    let mut display = create_without_autoplay(0);
    display.indicator_clicked(1);
    assert_eq!(display.current_index(), 1);
}

#[test]
fn test_keys() {
    let mut display = create_without_autoplay(0);
    assert!(display.key_pressed("ArrowRight"));
    assert_eq!(display.current_index(), 1);
    settle(&mut display);
    assert!(display.key_pressed("ArrowLeft"));
    assert_eq!(display.current_index(), 0);
    assert!(!display.key_pressed("Enter"));
}

#[test]
fn test_swipe_left_goes_forward() {
    let mut display = create_without_autoplay(0);
    display.swipe_started(300.0, 200.0);
    assert!(display.is_swiping());
    display.swipe_ended(220.0, 195.0);
    assert_eq!(display.current_index(), 1);
    assert!(!display.is_swiping());
}

#[test]
fn test_swipe_below_threshold_or_cancelled() {
    let mut display = create_without_autoplay(0);
    display.swipe_started(0.0, 0.0);
    display.swipe_ended(40.0, 0.0);
    assert!(!display.is_animating());

    display.swipe_started(0.0, 0.0);
    display.swipe_cancelled();
    display.swipe_ended(200.0, 0.0);
    assert!(!display.is_animating());
    assert_eq!(display.current_index(), 0);
}

#[test]
fn test_autoplay_advances_every_interval() {
    let mut display = create(2);
    assert!(display.is_autoplaying());
    display.advance(3999);
    assert_eq!(display.current_index(), 2);
    display.advance(1);
    assert_eq!(display.current_index(), 3);
    display.advance(4000);
    assert_eq!(display.current_index(), 4);
}

#[test]
fn test_autoplay_tick_while_animating_is_noop() {
    let mut display = create(0);
    display.advance(3500);
    display.next();
    assert_eq!(display.current_index(), 1);
    // tick at 4000 lands inside the cool-down
    display.advance(600);
    assert_eq!(display.current_index(), 1);
    display.advance(3900);
    assert_eq!(display.current_index(), 2);
}

#[test]
fn test_autoplay_skips_hidden_page() {
    let mut display = create(0);
    display.surface_mut().hidden = true;
    display.advance(8000);
    assert_eq!(display.current_index(), 0);
    display.surface_mut().hidden = false;
    display.advance(4000);
    assert_eq!(display.current_index(), 1);
}

#[test]
fn test_hover_cancels_and_restarts_autoplay() {
    let mut display = create(0);
    display.advance(3000);
    display.pointer_entered();
    assert!(!display.is_autoplaying());
    display.advance(10000);
    assert_eq!(display.current_index(), 0);

    display.pointer_left();
    // countdown starts over instead of resuming
    display.advance(3999);
    assert_eq!(display.current_index(), 0);
    display.advance(1);
    assert_eq!(display.current_index(), 1);
}

#[test]
fn test_resume_never_stacks_intervals() {
    let mut display = create(0);
    display.resume_autoplay();
    display.visibility_changed(false);
    display.pointer_left();
    assert_eq!(display.scheduler().interval_count(), 1);

    display.visibility_changed(true);
    assert_eq!(display.scheduler().interval_count(), 0);
    display.pause_autoplay();
    assert_eq!(display.scheduler().interval_count(), 0);
}

#[test]
fn test_disabled_autoplay_stays_off_after_hover_and_visibility() {
    let mut display = create_without_autoplay(0);
    display.pointer_entered();
    display.pointer_left();
    display.visibility_changed(true);
    display.visibility_changed(false);
    assert!(!display.is_autoplaying());
    assert_eq!(display.scheduler().interval_count(), 0);

    display.advance(20000);
    assert_eq!(display.current_index(), 0);
}

#[test]
fn test_disabled_autoplay_can_be_resumed() {
    let mut display = create_without_autoplay(0);
    assert!(!display.is_autoplaying());
    display.advance(20000);
    assert_eq!(display.current_index(), 0);
    display.resume_autoplay();
    display.advance(4000);
    assert_eq!(display.current_index(), 1);
}

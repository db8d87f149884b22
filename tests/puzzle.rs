mod tests {
    use embassy_time::{Duration, Instant};
    use fill_sequence_lock::{
        FillSnapshot, Puzzle, PuzzleEvent, PuzzleTimings, RenderCommand, STAGE_COUNT, StageState,
        StageVisual, Violation,
    };

    const FILL_MS: u64 = 32_000;
    const DWELL_MS: u64 = 2_000;
    const BLINK_MS: u64 = 1_200;

    const NONE: [bool; STAGE_COUNT] = [false; STAGE_COUNT];

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn only(stage: usize) -> [bool; STAGE_COUNT] {
        let mut pressed = NONE;
        pressed[stage] = true;
        pressed
    }

    fn events(puzzle: &mut Puzzle) -> Vec<PuzzleEvent> {
        core::iter::from_fn(|| puzzle.pop_event()).collect()
    }

    fn assert_fresh(puzzle: &Puzzle) {
        assert_eq!(puzzle.current_stage(), 0);
        assert!(!puzzle.lock_energized());
        assert!(puzzle.accepts_input());
        for stage in puzzle.stages() {
            assert_eq!(stage.state(), StageState::Idle);
            assert_eq!(stage.press_start(), None);
            assert!(!stage.is_held());
        }
    }

    /// Press `stage` at `start`, hold it until it fills and let the success
    /// cue finish. Returns the time of the tick that ended the cue.
    fn fill_stage(puzzle: &mut Puzzle, stage: usize, start: u64) -> u64 {
        let command = puzzle.tick(at(start), only(stage));
        assert!(matches!(command, RenderCommand::Stages(_)), "{:?}", command);
        let command = puzzle.tick(at(start + FILL_MS), only(stage));
        assert_eq!(command, RenderCommand::Success { stage, lit: true });
        let end = start + FILL_MS + BLINK_MS;
        assert_eq!(puzzle.tick(at(end), only(stage)), RenderCommand::Clear);
        end
    }

    #[test]
    fn test_new_puzzle_prompts_every_stage() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        assert_fresh(&puzzle);
        assert_eq!(
            puzzle.tick(at(0), NONE),
            RenderCommand::Stages([StageVisual::IdlePrompt; STAGE_COUNT])
        );
    }

    #[test]
    fn test_scenario_a_full_hold_completes_first_stage() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());

        let command = puzzle.tick(at(1_000), only(0));
        assert_eq!(puzzle.stage(0).map(|s| s.state()), Some(StageState::Filling));
        assert_eq!(
            command.visual(0),
            Some(StageVisual::Filling(FillSnapshot {
                filled_rows: 0,
                edge_elapsed: Duration::from_millis(0),
            }))
        );
        assert_eq!(command.visual(1), Some(StageVisual::IdlePrompt));

        let command = puzzle.tick(at(1_000 + FILL_MS / 2), only(0));
        match command.visual(0) {
            Some(StageVisual::Filling(snapshot)) => assert_eq!(snapshot.filled_rows, 16),
            other => panic!("unexpected visual {:?}", other),
        }

        let command = puzzle.tick(at(1_000 + FILL_MS), only(0));
        assert_eq!(command, RenderCommand::Success { stage: 0, lit: true });
        assert_eq!(puzzle.stage(0).map(|s| s.state()), Some(StageState::Complete));
        assert_eq!(puzzle.current_stage(), 1);
        assert!(!puzzle.lock_energized());
        assert_eq!(events(&mut puzzle), [PuzzleEvent::StageComplete { stage: 0 }]);
    }

    #[test]
    fn test_success_cue_blinks_then_clears() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        puzzle.tick(at(0), only(0));
        puzzle.tick(at(FILL_MS), only(0));
        assert!(!puzzle.accepts_input());

        let phases = [
            (100, true),
            (250, false),
            (450, true),
            (650, false),
            (800, true),
            (1_199, false),
        ];
        for (offset, lit) in phases {
            assert_eq!(
                puzzle.tick(at(FILL_MS + offset), only(0)),
                RenderCommand::Success { stage: 0, lit },
                "offset {}",
                offset
            );
        }
        assert_eq!(puzzle.tick(at(FILL_MS + BLINK_MS), only(0)), RenderCommand::Clear);
        assert!(puzzle.accepts_input());
        assert!(!puzzle.lock_energized());
    }

    #[test]
    fn test_scenario_b_out_of_order_press_resets() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());

        assert_eq!(
            puzzle.tick(at(500), only(1)),
            RenderCommand::Failure { stage: 1 }
        );
        assert_eq!(
            events(&mut puzzle),
            [PuzzleEvent::Violation {
                stage: 1,
                violation: Violation::OutOfOrder { expected: 0 },
            }]
        );
        assert!(!puzzle.accepts_input());

        // Input is ignored for the whole dwell
        assert_eq!(
            puzzle.tick(at(1_500), only(0)),
            RenderCommand::Failure { stage: 1 }
        );
        assert_eq!(
            puzzle.tick(at(500 + DWELL_MS - 1), NONE),
            RenderCommand::Failure { stage: 1 }
        );

        assert_eq!(puzzle.tick(at(500 + DWELL_MS), NONE), RenderCommand::Clear);
        assert_eq!(events(&mut puzzle), [PuzzleEvent::Reset]);
        assert_fresh(&puzzle);
    }

    #[test]
    fn test_scenario_c_early_release_resets_progress() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());

        puzzle.tick(at(0), only(0));
        puzzle.tick(at(FILL_MS / 2), only(0));
        let progress = puzzle.fill_progress(0, at(FILL_MS / 2));
        assert!((progress - 0.5).abs() < 1e-6);

        assert_eq!(
            puzzle.tick(at(FILL_MS / 2 + 10), NONE),
            RenderCommand::Failure { stage: 0 }
        );
        assert_eq!(
            events(&mut puzzle),
            [PuzzleEvent::Violation {
                stage: 0,
                violation: Violation::EarlyRelease,
            }]
        );

        let end = FILL_MS / 2 + 10 + DWELL_MS;
        assert_eq!(puzzle.tick(at(end), NONE), RenderCommand::Clear);
        assert_fresh(&puzzle);
        assert_eq!(puzzle.fill_progress(0, at(end)), 0.0);
    }

    #[test]
    fn test_scenario_d_lock_opens_once_after_last_cue() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let mut t = 0;
        let mut unlocked = 0;

        for stage in 0..STAGE_COUNT {
            assert_eq!(puzzle.current_stage(), stage);
            assert!(!puzzle.lock_energized());
            t = fill_stage(&mut puzzle, stage, t) + 100;
            unlocked += events(&mut puzzle)
                .iter()
                .filter(|e| **e == PuzzleEvent::Unlocked)
                .count();
        }

        assert!(puzzle.is_solved());
        assert!(puzzle.lock_energized());
        assert_eq!(unlocked, 1);

        // Completed stages keep rendering as full
        assert_eq!(
            puzzle.tick(at(t), NONE),
            RenderCommand::Stages([StageVisual::Complete; STAGE_COUNT])
        );
        assert!(events(&mut puzzle).is_empty());
    }

    #[test]
    fn test_lock_stays_closed_until_final_cue_ends() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let mut t = 0;
        for stage in 0..STAGE_COUNT - 1 {
            t = fill_stage(&mut puzzle, stage, t) + 100;
        }
        let last = STAGE_COUNT - 1;
        puzzle.tick(at(t), only(last));
        puzzle.tick(at(t + FILL_MS), only(last));
        assert_eq!(puzzle.current_stage(), STAGE_COUNT);
        assert!(!puzzle.lock_energized());
        puzzle.tick(at(t + FILL_MS + 600), NONE);
        assert!(!puzzle.lock_energized());
        puzzle.tick(at(t + FILL_MS + BLINK_MS), NONE);
        assert!(puzzle.lock_energized());
    }

    #[test]
    fn test_press_on_completed_stage_is_violation() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let t = fill_stage(&mut puzzle, 0, 0);
        let _ = events(&mut puzzle);

        // Release is harmless once complete
        assert!(matches!(puzzle.tick(at(t + 100), NONE), RenderCommand::Stages(_)));
        assert!(events(&mut puzzle).is_empty());

        assert_eq!(
            puzzle.tick(at(t + 200), only(0)),
            RenderCommand::Failure { stage: 0 }
        );
        assert_eq!(
            events(&mut puzzle),
            [PuzzleEvent::Violation {
                stage: 0,
                violation: Violation::AlreadyComplete,
            }]
        );
    }

    #[test]
    fn test_holding_completed_stage_keeps_it_complete() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let t = fill_stage(&mut puzzle, 0, 0);

        for offset in [100, 5_000, 60_000] {
            let command = puzzle.tick(at(t + offset), only(0));
            assert_eq!(command.visual(0), Some(StageVisual::Complete));
            assert_eq!(command.visual(1), Some(StageVisual::IdlePrompt));
        }
        assert_eq!(puzzle.current_stage(), 1);
        assert_eq!(puzzle.fill_progress(0, at(t + 60_000)), 1.0);
    }

    #[test]
    fn test_every_out_of_order_stage_resets() {
        for stage in 1..STAGE_COUNT {
            let mut puzzle = Puzzle::new(&PuzzleTimings::default());
            assert_eq!(puzzle.tick(at(0), only(stage)), RenderCommand::Failure { stage });
            assert_eq!(
                events(&mut puzzle),
                [PuzzleEvent::Violation {
                    stage,
                    violation: Violation::OutOfOrder { expected: 0 },
                }]
            );
            assert_eq!(puzzle.tick(at(DWELL_MS), NONE), RenderCommand::Clear);
            assert_eq!(events(&mut puzzle), [PuzzleEvent::Reset]);
            assert_fresh(&puzzle);
        }
    }

    #[test]
    fn test_skipping_ahead_mid_sequence_resets() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let t = fill_stage(&mut puzzle, 0, 0);
        let t = fill_stage(&mut puzzle, 1, t + 100);
        assert_eq!(puzzle.current_stage(), 2);
        events(&mut puzzle);

        assert_eq!(
            puzzle.tick(at(t + 100), only(3)),
            RenderCommand::Failure { stage: 3 }
        );
        assert_eq!(
            events(&mut puzzle),
            [PuzzleEvent::Violation {
                stage: 3,
                violation: Violation::OutOfOrder { expected: 2 },
            }]
        );
        assert_eq!(puzzle.tick(at(t + 100 + DWELL_MS), NONE), RenderCommand::Clear);
        assert_fresh(&puzzle);
    }

    #[test]
    fn test_press_other_stage_while_filling_is_violation() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        puzzle.tick(at(0), only(0));
        puzzle.tick(at(4_000), only(0));

        let mut pressed = only(0);
        pressed[2] = true;
        assert_eq!(
            puzzle.tick(at(5_000), pressed),
            RenderCommand::Failure { stage: 2 }
        );
    }

    #[test]
    fn test_release_exactly_at_fill_completes() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        puzzle.tick(at(0), only(0));
        puzzle.tick(at(FILL_MS - 10), only(0));
        assert_eq!(
            puzzle.tick(at(FILL_MS), NONE),
            RenderCommand::Success { stage: 0, lit: true }
        );
        assert_eq!(puzzle.current_stage(), 1);
    }

    #[test]
    fn test_fill_progress_is_monotonic_while_held() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        puzzle.tick(at(0), only(0));
        let mut previous = 0.0;
        for ms in (0..FILL_MS).step_by(700) {
            puzzle.tick(at(ms), only(0));
            let progress = puzzle.fill_progress(0, at(ms));
            assert!(progress >= previous);
            assert!((0.0..=1.0).contains(&progress));
            previous = progress;
        }
    }

    #[test]
    fn test_edge_timer_restarts_on_each_new_row() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        let row_ms = FILL_MS / 32;
        puzzle.tick(at(0), only(0));

        let snapshot = |command: RenderCommand| match command.visual(0) {
            Some(StageVisual::Filling(snapshot)) => snapshot,
            other => panic!("unexpected visual {:?}", other),
        };

        let first = snapshot(puzzle.tick(at(row_ms), only(0)));
        assert_eq!(first.filled_rows, 1);
        assert_eq!(first.edge_elapsed, Duration::from_millis(0));

        let half = snapshot(puzzle.tick(at(row_ms + 500), only(0)));
        assert_eq!(half.filled_rows, 1);
        assert_eq!(half.edge_elapsed, Duration::from_millis(500));

        let second = snapshot(puzzle.tick(at(2 * row_ms), only(0)));
        assert_eq!(second.filled_rows, 2);
        assert_eq!(second.edge_elapsed, Duration::from_millis(0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        fill_stage(&mut puzzle, 0, 0);
        puzzle.tick(at(40_000), only(1));

        puzzle.reset();
        assert_fresh(&puzzle);
        puzzle.reset();
        assert_fresh(&puzzle);
        assert_eq!(puzzle.fill_progress(1, at(40_000)), 0.0);
    }

    #[test]
    fn test_reset_cancels_running_cue() {
        let mut puzzle = Puzzle::new(&PuzzleTimings::default());
        puzzle.tick(at(0), only(3));
        assert!(puzzle.cue().is_some());
        puzzle.reset();
        assert!(puzzle.cue().is_none());
        assert!(matches!(puzzle.tick(at(10), NONE), RenderCommand::Stages(_)));
    }

    #[test]
    fn test_custom_timings_shorten_fill() {
        let timings = PuzzleTimings {
            fill: Duration::from_millis(3_200),
            ..PuzzleTimings::default()
        };
        let mut puzzle = Puzzle::new(&timings);
        puzzle.tick(at(0), only(0));
        match puzzle.tick(at(1_600), only(0)).visual(0) {
            Some(StageVisual::Filling(snapshot)) => assert_eq!(snapshot.filled_rows, 16),
            other => panic!("unexpected visual {:?}", other),
        }
        assert_eq!(
            puzzle.tick(at(3_200), only(0)),
            RenderCommand::Success { stage: 0, lit: true }
        );
    }
}

//! Contract Tests for the Session Controller
//!
//! Stage ordering, short-circuit verdicts and the restore-once exit gate,
//! exercised with recording doubles for every collaborator.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use bisect_helper::models::{BuildErrorPolicy, Session, StepOutcome, Target, Verdict};
use bisect_helper::report;
use bisect_helper::SessionController;
use std::path::PathBuf;
use test_utils::{EventLog, RecordingPatches, RecordingRunner, ScriptedBuild, ScriptedJudge};

type Controller = SessionController<RecordingPatches, ScriptedBuild, RecordingRunner, ScriptedJudge>;

struct Harness {
    log: EventLog,
    session: Session,
    patches: RecordingPatches,
    build: ScriptedBuild,
    runner: RecordingRunner,
    answer: Verdict,
}

impl Harness {
    fn native() -> Self {
        Self::with_target(Target::Native {
            platform: "COCO".to_string(),
        })
    }

    fn with_target(target: Target) -> Self {
        let log = EventLog::default();
        Self {
            session: Session::new(target),
            patches: RecordingPatches::new(&log),
            build: ScriptedBuild::new(&log),
            runner: RecordingRunner::new(&log),
            answer: Verdict::Good,
            log,
        }
    }

    fn with_patches(mut self) -> Self {
        self.session.patches = vec![PathBuf::from("one.patch"), PathBuf::from("two.patch")];
        self
    }

    fn run(self) -> (Verdict, EventLog, Controller) {
        let judge = ScriptedJudge::new(&self.log, self.answer);
        let mut controller =
            SessionController::new(self.session, self.patches, self.build, self.runner, judge);
        let verdict = controller.run();
        (verdict, self.log, controller)
    }
}

#[test]
fn test_full_run_order() {
    let mut harness = Harness::native().with_patches();
    harness.answer = Verdict::Bad;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Bad);
    assert_eq!(
        log.events(),
        vec![
            "driver",
            "check",
            "apply",
            "build",
            "command",
            "session ./fujinet -c /tmp/fnconfig.ini",
            "judge",
            "restore",
        ]
    );
}

#[test]
fn test_no_restore_without_patches() {
    let (verdict, log, controller) = Harness::native().run();

    assert_eq!(verdict, Verdict::Good);
    assert!(!log.contains("check"));
    assert!(!log.contains("apply"));
    assert!(!log.contains("restore"));
    assert!(!controller.session().restore_required());
}

#[test]
fn test_missing_driver_short_circuits() {
    let mut harness = Harness::native().with_patches();
    harness.build.driver = StepOutcome::Finish(Verdict::Skip);

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Skip);
    assert_eq!(log.events(), vec!["driver"]);
}

#[test]
fn test_no_restore_without_patches_on_any_target() {
    for target in [Target::Esp32, Target::Native { platform: "ATARI".to_string() }] {
        for build_only in [false, true] {
            let mut harness = Harness::with_target(target.clone());
            harness.session.build_only = build_only;
            let (_, log, _) = harness.run();
            assert!(!log.contains("restore"), "{:?} build_only={}", target, build_only);
        }
    }
}

#[test]
fn test_failed_check_never_applies() {
    let mut harness = Harness::native().with_patches();
    harness.patches.fail_check = true;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Skip);
    assert_eq!(log.events(), vec!["driver", "check"]);
}

#[test]
fn test_failed_apply_still_restores_once() {
    let mut harness = Harness::native().with_patches();
    harness.patches.fail_apply = true;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Skip);
    assert_eq!(log.events(), vec!["driver", "check", "apply", "restore"]);
}

#[test]
fn test_restore_exactly_once_on_every_exit() {
    let exits: [fn(&mut Harness); 6] = [
        |h| h.build.build = StepOutcome::Finish(Verdict::Bad),
        |h| h.build.build = StepOutcome::Finish(Verdict::Skip),
        |h| h.build.command_fails = true,
        |h| h.runner.fail = true,
        |h| h.session.build_only = true,
        |h| h.answer = Verdict::Skip,
    ];

    for (i, exit) in exits.iter().enumerate() {
        let mut harness = Harness::native().with_patches();
        exit(&mut harness);
        let (_, log, _) = harness.run();
        assert_eq!(log.count("restore"), 1, "exit path {}", i);
        assert_eq!(log.events().last().map(String::as_str), Some("restore"));
    }
}

#[test]
fn test_finish_gate_is_idempotent() {
    let harness = Harness::native().with_patches();
    let (_, log, mut controller) = harness.run();

    controller.finish(Verdict::Good);
    controller.finish(Verdict::Bad);
    assert_eq!(log.count("restore"), 1);
}

#[test]
fn test_build_verdict_passed_through() {
    for verdict in [Verdict::Bad, Verdict::Skip] {
        let mut harness = Harness::native();
        harness.build.build = StepOutcome::Finish(verdict);
        let (result, log, _) = harness.run();
        assert_eq!(result, verdict);
        assert!(!log.contains("judge"));
    }
}

#[test]
fn test_compile_only_success_is_good_without_session() {
    let mut harness = Harness::native();
    harness.session.build_only = true;
    harness.answer = Verdict::Bad;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Good);
    assert_eq!(log.events(), vec!["driver", "build"]);
}

#[test]
fn test_esp32_upload_stage() {
    let (verdict, log, controller) = Harness::with_target(Target::Esp32).run();
    assert_eq!(verdict, Verdict::Good);
    assert!(log.contains("upload"));
    // Without patches the operator's working tree is never reverted
    assert!(!controller.session().restore_required());
    assert!(!log.contains("restore"));

    let mut harness = Harness::with_target(Target::Esp32);
    harness.session.skip_fs = true;
    let (_, log, _) = harness.run();
    assert!(!log.contains("upload"));
}

#[test]
fn test_upload_failure_short_circuits() {
    let mut harness = Harness::with_target(Target::Esp32);
    harness.session.policy = BuildErrorPolicy::BadOnFail;
    harness.build.upload = StepOutcome::Finish(Verdict::Bad);

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Bad);
    assert!(!log.contains("command"));
}

#[test]
fn test_missing_runtime_config_is_skip() {
    let mut harness = Harness::native();
    harness.build.command_fails = true;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Skip);
    assert!(!log.contains("judge"));
}

#[test]
fn test_session_failure_falls_through_to_judgment() {
    let mut harness = Harness::native();
    harness.runner.fail = true;
    harness.answer = Verdict::Bad;

    let (verdict, log, _) = harness.run();

    assert_eq!(verdict, Verdict::Bad);
    assert!(log.contains("judge"));
}

#[test]
fn test_judgment_is_the_verdict() {
    for answer in Verdict::ALL {
        let mut harness = Harness::native();
        harness.answer = answer;
        let (verdict, _, _) = harness.run();
        assert_eq!(verdict, answer);
    }
}

#[test]
fn test_banner_width_defaults_and_overrides() {
    let harness = Harness::native();
    let judge = ScriptedJudge::new(&harness.log, Verdict::Good);
    let controller = SessionController::new(
        harness.session,
        harness.patches,
        harness.build,
        harness.runner,
        judge,
    );
    assert_eq!(controller.banner_width(), report::DEFAULT_WIDTH);
    assert_eq!(controller.with_banner_width(72).banner_width(), 72);
}

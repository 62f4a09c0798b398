use crate::harness::{Expectation, HarnessCase};
use oit_smoke_core::ScriptDelivery;

#[test]
fn test_stub_exit_zero_is_success() {
    HarnessCase::new("stub_exit_zero")
        .stub_exits(0)
        .expect_status(0)
        .expect(Expectation::WindowSize {
            width: 800,
            height: 512,
        })
        .expect(Expectation::FlagPresent("--sequencestring".into()))
        .expect(Expectation::Delivery(ScriptDelivery::Inline))
        .expect_script_verbatim()
        .run()
        .expect("passing stub should pass");
}

#[test]
fn test_stub_exit_seven_reports_one() {
    HarnessCase::new("stub_exit_seven")
        .stub_exits(7)
        .expect_status(1)
        .expect_diagnostic("exited with status 7")
        .run()
        .unwrap();
}

#[test]
fn test_high_exit_code_reports_one() {
    HarnessCase::new("stub_exit_255")
        .stub_exits(255)
        .expect_status(1)
        .expect_diagnostic("status 255")
        .run()
        .unwrap();
}

#[test]
fn test_signal_reports_one() {
    HarnessCase::new("stub_sigkill")
        .stub_killed_by(9)
        .expect_status(1)
        .expect_diagnostic("terminated by signal 9")
        .run()
        .unwrap();
}

#[test]
fn test_abort_signal_reports_one() {
    HarnessCase::new("stub_sigabrt")
        .stub_killed_by(6)
        .expect_status(1)
        .expect_diagnostic("signal 6")
        .run()
        .unwrap();
}

#[test]
fn test_missing_program_reports_one() {
    HarnessCase::new("missing_program")
        .program_missing()
        .expect_status(1)
        .expect_diagnostic("program not found")
        .expect(Expectation::StubNotLaunched)
        .run()
        .unwrap();
}

#[test]
fn test_custom_window_size_is_passed() {
    HarnessCase::new("custom_window")
        .window_size(1920, 1080)
        .expect_status(0)
        .expect(Expectation::WindowSize {
            width: 1920,
            height: 1080,
        })
        .run()
        .unwrap();
}

#[test]
fn test_custom_tables_reach_stub() {
    HarnessCase::new("custom_tables")
        .with_tables(&["simple", "weighted"], &["noaa"])
        .expect_status(0)
        .expect_script_verbatim()
        .run()
        .unwrap();
}

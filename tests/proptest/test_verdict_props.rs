//! Property-based tests for verdict parsing and the exit-code mapping

use bisect_helper::judge::{Judge, PromptJudge};
use bisect_helper::models::{BuildErrorPolicy, Verdict};
use proptest::prelude::*;
use std::io::Cursor;

fn verdict() -> impl Strategy<Value = Verdict> {
    prop_oneof![Just(Verdict::Good), Just(Verdict::Bad), Just(Verdict::Skip)]
}

fn policy() -> impl Strategy<Value = BuildErrorPolicy> {
    prop_oneof![
        Just(BuildErrorPolicy::SkipOnFail),
        Just(BuildErrorPolicy::BadOnFail)
    ]
}

proptest! {
    #[test]
    fn test_exit_code_always_in_protocol(v in verdict()) {
        prop_assert!([0, 1, 125].contains(&v.exit_code()));
        prop_assert_eq!(Verdict::from_exit_code(v.exit_code()), Some(v));
    }

    #[test]
    fn test_other_codes_map_to_nothing(code in any::<i32>()) {
        prop_assume!(![0, 1, 125].contains(&code));
        prop_assert_eq!(Verdict::from_exit_code(code), None);
    }

    #[test]
    fn test_answer_parsing_doesnt_panic(s in "\\PC*") {
        let _ = Verdict::from_answer(&s);
    }

    #[test]
    fn test_answer_decided_by_first_letter(
        lead in "[ \\t]{0,3}",
        first in "[gbsGBS]",
        rest in "[a-z]{0,10}",
    ) {
        let answer = format!("{}{}{}\n", lead, first, rest);
        let expected = match first.to_ascii_lowercase().as_str() {
            "g" => Verdict::Good,
            "b" => Verdict::Bad,
            _ => Verdict::Skip,
        };
        prop_assert_eq!(Verdict::from_answer(&answer), Some(expected));
    }

    #[test]
    fn test_prompt_always_terminates(lines in prop::collection::vec("[^\\n]{0,12}", 0..8)) {
        let input = lines.join("\n");
        let mut judge = PromptJudge::new(Cursor::new(input), Vec::new());
        let v = judge.judge();
        prop_assert!(Verdict::ALL.contains(&v));
    }

    #[test]
    fn test_compile_only_failure_always_bad(p in policy()) {
        prop_assert_eq!(p.classify_failure(true), Verdict::Bad);
    }
}

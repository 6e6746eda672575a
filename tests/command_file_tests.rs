mod common;

use common::test_utils::TestFile;
use cuckoo_rs::{
    CommandError, CuckooFilterConfig, CuckooFilterConfigBuilder, Response,
    parse_commands, process_file, run_commands,
};

fn seeded_template() -> CuckooFilterConfig {
    CuckooFilterConfigBuilder::default()
        .seed(Some(17))
        .build()
        .expect("Failed to build template")
}

const SAMPLE: &str = "\
videos 10
add alice videoA
add alice videoB
check alice videoA
check alice videoB
check alice videoC
check bob videoA
add bob videoC
check bob videoC
";

#[test]
fn test_process_file_writes_answers() {
    let input = TestFile::with_contents("sample_in", SAMPLE);
    let output = TestFile::new("sample_out");

    let report = process_file(&input.path(), &output.path(), seeded_template())
        .expect("Processing should succeed");

    assert_eq!(
        output.read(),
        "Ok\nOk\nOk\nProbably\nProbably\nNo\nNo\nOk\nProbably"
    );
    assert_eq!(report.responses.len(), 8);
    assert_eq!(report.users, 2);
    assert_eq!(report.exhausted, 0);
}

#[test]
fn test_output_has_no_trailing_newline() {
    let file = parse_commands(SAMPLE).unwrap();
    let rendered = run_commands(&file, seeded_template()).unwrap().render();
    assert!(!rendered.ends_with('\n'));
    assert_eq!(rendered.lines().count(), file.commands.len() + 1);
}

#[test]
fn test_trailing_newline_does_not_repeat_last_record() {
    let with_newline =
        parse_commands("videos 5\nadd a x\ncheck a x\n").unwrap();
    let without = parse_commands("videos 5\nadd a x\ncheck a x").unwrap();

    assert_eq!(with_newline, without);
    let report = run_commands(&with_newline, seeded_template()).unwrap();
    assert_eq!(report.responses, vec![Response::Ok, Response::Probably]);
}

#[test]
fn test_tokens_may_span_lines() {
    let file =
        parse_commands("videos\n3 add\talice  videoA check alice\nvideoA")
            .unwrap();
    let report = run_commands(&file, seeded_template()).unwrap();
    assert_eq!(report.render(), "Ok\nOk\nProbably");
}

#[test]
fn test_non_utf8_items_are_processed_as_bytes() {
    let input = TestFile::with_bytes(
        "raw_bytes_in",
        b"videos 10\nadd alice vid\xffeo\ncheck alice vid\xffeo\n\
          check alice video\nadd \xfe\xffbob x\ncheck \xfe\xffbob x\n",
    );
    let output = TestFile::new("raw_bytes_out");

    let report = process_file(&input.path(), &output.path(), seeded_template())
        .expect("Non UTF-8 items should be processed");

    assert_eq!(output.read(), "Ok\nOk\nProbably\nNo\nOk\nProbably");
    assert_eq!(report.users, 2);
}

#[test]
fn test_missing_input_is_io_error() {
    let input = TestFile::new("missing_in");
    let output = TestFile::new("missing_out");

    let result = process_file(&input.path(), &output.path(), seeded_template());
    assert!(matches!(result, Err(CommandError::Io(_))));
    assert!(!output.path().exists());
}

#[test]
fn test_negative_item_count_rejected() {
    let input = TestFile::with_contents("negative_in", "videos -1\nadd a b\n");
    let output = TestFile::new("negative_out");

    let result = process_file(&input.path(), &output.path(), seeded_template());
    assert!(matches!(result, Err(CommandError::InvalidItemCount { .. })));
}

#[test]
fn test_full_user_filter_still_answers_ok() {
    let mut text = String::from("videos 0\n");
    for n in 0..12 {
        text.push_str(&format!("add alice video_{n}\n"));
    }
    let template = CuckooFilterConfigBuilder::default()
        .max_kicks(20)
        .seed(Some(5))
        .build()
        .unwrap();

    let file = parse_commands(&text).unwrap();
    let report = run_commands(&file, template).unwrap();
    assert!(report.responses.iter().all(|r| *r == Response::Ok));
    assert_eq!(report.exhausted, 8);
}

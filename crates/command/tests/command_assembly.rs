use std::cell::RefCell;
use std::time::Duration;

use ffwrap_command::global::{with_log_level, with_overwrite, with_progress};
use ffwrap_command::options::{
    with_codec, with_duration, with_file_size_limit, with_format, with_pixel_format, with_size,
    with_stream_loop,
};
use ffwrap_command::{
    Codec, Command, File, FileFormat, GlobalOptions, LogLevel, OptionError, PixelFormat, Role,
    RunError, RunOutput, Runner, StreamSpecifier, HIDE_BANNER,
};
use proptest::prelude::*;

/// Records what it was asked to run instead of starting a process.
#[derive(Default)]
struct RecordingRunner {
    calls: RefCell<Vec<(Vec<String>, Vec<(String, String)>)>>,
}

impl Runner for RecordingRunner {
    fn run(&self, args: &[String], env: &[(String, String)]) -> Result<RunOutput, RunError> {
        self.calls.borrow_mut().push((args.to_vec(), env.to_vec()));
        Ok(RunOutput::default())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[test]
fn transcode_request_serializes_in_fixed_order() {
    let global = GlobalOptions::from([with_overwrite(true), with_log_level(LogLevel::Error)]);
    let input = File::input(
        "in.mkv",
        [
            with_stream_loop(0),
            with_duration(Duration::from_secs(4) + Duration::from_millis(100)),
        ],
    );
    let output = File::output(
        "out.mp4",
        [
            with_format(FileFormat::Mp4),
            with_codec(StreamSpecifier::video(0), Codec::LibX264),
            with_size(StreamSpecifier::video(0), 1920, 1080),
            with_pixel_format(StreamSpecifier::video(0), PixelFormat::Yuv420p),
            with_codec(StreamSpecifier::audio(None), Codec::Aac),
        ],
    );

    let cmd = Command::build(&global, [output, input]).unwrap();
    assert_eq!(
        cmd.args(),
        [
            "-hide_banner",
            "-y",
            "-loglevel",
            "error",
            "-stream_loop",
            "0",
            "-t",
            "00:00:4.100000",
            "-i",
            "in.mkv",
            "-f",
            "mp4",
            "-c:v:0",
            "libx264",
            "-s:v:0",
            "1920x1080",
            "-pix_fmt:v:0",
            "yuv420p",
            "-c:a",
            "aac",
            "out.mp4",
        ]
    );
}

#[test]
fn one_input_one_output_without_globals_has_no_global_segment() {
    let input = File::input("a.wav", []);
    let output = File::output("b.flac", []);
    let expected: Vec<String> = std::iter::once(HIDE_BANNER.to_string())
        .chain(input.flags())
        .chain(output.flags())
        .collect();

    let cmd = Command::build(&GlobalOptions::new(), [&input, &output]).unwrap();
    assert_eq!(cmd.args(), expected.as_slice());
}

#[test]
fn errors_from_globals_and_every_file_are_reported_together() {
    let global = GlobalOptions::from([with_progress("")]);
    let files = [
        File::output("first.mp4", [with_stream_loop(1)]),
        File::input("second.mkv", [with_file_size_limit(10)]),
        File::output("fine.mp4", []),
    ];

    let err = Command::build(&global, &files).unwrap_err();

    assert_eq!(err.global().map(|g| g.len()), Some(1));
    let offenders: Vec<_> = err
        .files()
        .iter()
        .map(|f| (f.path.as_str(), f.role))
        .collect();
    assert_eq!(
        offenders,
        [("first.mp4", Role::Output), ("second.mkv", Role::Input)]
    );
    assert_eq!(
        err.files()[0].errors.errors(),
        [OptionError::role_mismatch("-stream_loop", Role::Input)]
    );

    let rendered = err.to_string();
    assert!(rendered.contains("first.mp4"));
    assert!(rendered.contains("second.mkv"));
    assert!(rendered.contains("-progress"));
}

#[test]
fn run_hands_args_and_no_color_env_to_the_runner() {
    let cmd = Command::build(
        &GlobalOptions::new(),
        [File::input("in.mkv", []), File::output("out.mkv", [])],
    )
    .unwrap();

    let runner = RecordingRunner::default();
    cmd.run_with(&runner).unwrap();

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (args, env) = &calls[0];
    assert_eq!(args.first().map(String::as_str), Some("-hide_banner"));
    assert!(env
        .iter()
        .any(|(k, v)| k == "AV_LOG_FORCE_NOCOLOR" && v == "TRUE"));
}

#[test]
fn failed_build_never_reaches_the_runner() {
    let runner = RecordingRunner::default();
    let result = Command::build(
        &GlobalOptions::new(),
        [File::output("out.mp4", [with_stream_loop(-1)])],
    )
    .map(|cmd| cmd.run_with(&runner));

    assert!(result.is_err());
    assert!(runner.calls.borrow().is_empty());
}

proptest! {
    #[test]
    fn role_partition_preserves_relative_order(roles in proptest::collection::vec(any::<bool>(), 0..12)) {
        let files: Vec<File> = roles
            .iter()
            .enumerate()
            .map(|(i, is_input)| {
                if *is_input {
                    File::input(format!("in{i}"), [])
                } else {
                    File::output(format!("out{i}"), [])
                }
            })
            .collect();

        let cmd = Command::build(&GlobalOptions::new(), &files).unwrap();
        let args = cmd.args();
        prop_assert_eq!(&args[0], HIDE_BANNER);

        let input_paths: Vec<&str> = args
            .windows(2)
            .filter(|w| w[0] == "-i")
            .map(|w| w[1].as_str())
            .collect();
        let expected_inputs: Vec<String> = files
            .iter()
            .filter(|f| f.role() == Role::Input)
            .map(|f| f.path().to_string())
            .collect();
        prop_assert_eq!(input_paths, expected_inputs);

        let first_output = args.iter().position(|a| a.starts_with("out"));
        let last_input = args.iter().rposition(|a| a.starts_with("in"));
        if let (Some(first_output), Some(last_input)) = (first_output, last_input) {
            prop_assert!(last_input < first_output);
        }
    }
}

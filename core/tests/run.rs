mod common;

use std::io::Read;

use command_dispatch_core::{App, Error};
use common::SharedBuffer;

fn failing_app(err: fn() -> Error, stderr: &SharedBuffer) -> App {
    App::new("testApp")
        .with_action(move |_| Err(err()))
        .with_stderr(stderr.clone())
}

#[test]
fn test_run_error_output() {
    let cases: Vec<(fn() -> Error, &str)> = vec![
        // empty error should not produce any output
        (Error::silent, ""),
        // non-empty error is printed with newline appended
        (|| Error::msg("foo"), "foo\n"),
    ];

    for (i, (err, expected)) in cases.into_iter().enumerate() {
        let stderr = SharedBuffer::default();
        let app = failing_app(err, &stderr);

        let code = app.run(["testApp"]);
        assert_ne!(code, 0, "Case {i}");
        assert_eq!(stderr.contents(), expected, "Case {i}");
    }
}

#[test]
fn test_run_error_handler() {
    // custom error handler is invoked if provided
    let stderr = SharedBuffer::default();
    let app = failing_app(Error::silent, &stderr).with_error_handler(|ctx, err| {
        let _ = ctx.errorf(format_args!("Error: {err}\n"));
        13
    });
    assert_eq!(app.run(["testApp"]), 13);
    assert_eq!(stderr.contents(), "Error: \n");

    // default behavior is used if no handler is installed
    let stderr = SharedBuffer::default();
    let app = failing_app(|| Error::msg("foo"), &stderr);
    assert_eq!(app.run(["testApp"]), 1);
    assert_eq!(stderr.contents(), "foo\n");
}

#[test]
fn test_successful_run_writes_nothing_to_stderr() {
    let stderr = SharedBuffer::default();
    let app = App::new("testApp")
        .with_action(|_| Ok(()))
        .with_stderr(stderr.clone());

    assert_eq!(app.run(["testApp"]), 0);
    assert_eq!(stderr.contents(), "");
}

#[test]
fn test_io_errors_from_actions_are_reported() {
    let stderr = SharedBuffer::default();
    let app = App::new("testApp")
        .with_action(|_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into())
        })
        .with_stderr(stderr.clone());

    assert_eq!(app.run(["testApp"]), 1);
    assert_eq!(stderr.contents(), "no such file\n");
}

#[test]
fn test_stdin_is_readable_from_context() {
    let stdout = SharedBuffer::default();
    let app = App::new("cat")
        .with_stdin(std::io::Cursor::new(b"piped".to_vec()))
        .with_stdout(stdout.clone())
        .with_action(|ctx| {
            let mut input = String::new();
            ctx.stdin().read_to_string(&mut input)?;
            ctx.printf(format_args!("{input}"))?;
            Ok(())
        });

    assert_eq!(app.run(["cat"]), 0);
    assert_eq!(stdout.contents(), "piped");
}

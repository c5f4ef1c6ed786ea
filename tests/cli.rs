use std::path::Path;
use std::process::{Command, Output};

fn rgr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rgr"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .unwrap()
}

fn demo(name: &str) -> String {
    Path::new("demos").join(name).to_string_lossy().into_owned()
}

#[test]
fn missing_script_is_a_usage_error() {
    let output = rgr(&[]);
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn unreadable_script() {
    let output = rgr(&["demos/no_such_program.rgr"]);
    assert_eq!(output.status.code(), Some(66));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn runs_a_program() {
    let output = rgr(&[&demo("hello.rgr")]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Hello World\nTest code\n45\n54\nSOME TIME\n"
    );
}

#[test]
fn syntax_error_keeps_earlier_output() {
    let output = rgr(&[&demo("bad_terminator.rgr")]);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "first\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 3"), "stderr was {:?}", stderr);
}

#[test]
fn runtime_error_exit_code() {
    let output = rgr(&[&demo("bad_comparison.rgr")]);
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "start\n");
    assert!(!output.stderr.is_empty());
}

#[test]
fn ast_flag_prints_without_running() {
    let output = rgr(&["--ast", &demo("hello.rgr")]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "(import arguments)\n\
         (put \"Hello World\")\n\
         (put \"Test code\")\n\
         (var x int 45)\n\
         (var y int 54)\n\
         (put x)\n\
         (put y)\n\
         (if (> x 10) (put \"SOME TIME\"))\n"
    );
}

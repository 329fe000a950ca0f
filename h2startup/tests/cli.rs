use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const HEADER: &str = "\
typedef enum {
  NonMaskableInt_IRQn = -14,
  Odd_IRQn = -20,
  WWDG_IRQn = 0,
  PVD_IRQn = 1,
} IRQn_Type;
";

fn h2startup<P: AsRef<Path>>(dir: P, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_h2startup"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run h2startup")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stm32x.h"), HEADER).unwrap();
    dir
}

#[test]
fn no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = h2startup(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn writes_c_module_next_to_cwd() {
    let dir = workspace();
    let output = h2startup(dir.path(), &["stm32x.h"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let module = fs::read_to_string(dir.path().join("startup_stm32x.c")).unwrap();
    assert!(module.contains("        [ 1] = PVD_IRQHandler\n"));
    // -20 has no slot and is reported
    assert!(stderr(&output).contains("Odd_IRQn"));
}

#[test]
fn options_reach_the_generator() {
    let dir = workspace();
    let output = h2startup(dir.path(), &["-i", "-s", "-n", "4", "stm32x.h"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let module = fs::read_to_string(dir.path().join("startup_stm32x.c")).unwrap();
    assert!(module.contains("        CX( 2) = NMI_Handler\n"));
    assert!(module.contains("        [ 3] = IRQ3_IRQHandler\n"));
    assert!(module.contains("    4 NVIC IRQ vectors (MCU defines 2).\n"));
}

#[test]
fn rust_format_writes_module_and_linker_fragment() {
    let dir = workspace();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let output = h2startup(dir.path(), &["-f", "rust", "-o", "out", "stm32x.h"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(out.join("startup_stm32x.rs").exists());
    let script = fs::read_to_string(out.join("startup_stm32x.x")).unwrap();
    assert!(script.contains("PROVIDE(WWDG_IRQHandler = Default_Handler);"));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = h2startup(dir.path(), &["nothere.h"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("nothere.h file not found"));
}

#[test]
fn unwritable_output() {
    let dir = workspace();
    let output = h2startup(dir.path(), &["-o", "missing/dir", "stm32x.h"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot create file"));
}

#[test]
fn options_without_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = h2startup(dir.path(), &["-i"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("file not specified"));
}

#[test]
fn bad_vector_counts() {
    let dir = workspace();
    for args in [&["-n", "497", "stm32x.h"][..], &["-n", "x", "stm32x.h"], &["-n", "-1", "stm32x.h"], &["-n"]].iter() {
        let output = h2startup(dir.path(), args);
        assert_eq!(output.status.code(), Some(4), "{:?}", args);
    }
    assert!(!dir.path().join("startup_stm32x.c").exists());
}

#[test]
fn invalid_option() {
    let dir = workspace();
    let output = h2startup(dir.path(), &["-x", "stm32x.h"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn invalid_identifier_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.h"), "  Bad-Name_IRQn = 0,\n}\n").unwrap();
    let output = h2startup(dir.path(), &["bad.h"]);
    assert_eq!(output.status.code(), Some(3));
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn drawpp_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("drawpp").expect("binary exists");
    // Keep the user's real config out of the tests.
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn png_size(path: &Path) -> (i32, i32) {
    let mut file = std::fs::File::open(path).unwrap();
    let surface = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    (surface.width(), surface.height())
}

#[test]
fn drawpp_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Render turtle-style drawing scripts to PNG",
        ))
        .stdout(predicate::str::contains("--legacy-strokes"));
}

#[test]
fn script_argument_is_required() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn renders_script_to_png_and_prints_positions() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("star.dpp");
    std::fs::write(
        &script,
        "cursor pen 20 20\npen.color red\npen.thickness 3\npen.line 30\npen.move 30\npen.position\n",
    )
    .unwrap();
    let output = temp.path().join("out/star.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .args(["--width", "64", "--height", "48"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pen: (50.00, 20.00) heading 0.00° thickness 3 color red",
        ));

    assert_eq!(png_size(&output), (64, 48));
}

#[test]
fn canvas_size_comes_from_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("drawpp");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[canvas]\nwidth = 40\nheight = 30\n",
    )
    .unwrap();

    let script = temp.path().join("empty.dpp");
    std::fs::write(&script, "# nothing to draw\n").unwrap();
    let output = temp.path().join("empty.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(png_size(&output), (40, 30));
}

#[test]
fn explicit_config_flag_overrides_default_location() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[canvas]\nwidth = 12\nheight = 7\n").unwrap();
    let script = temp.path().join("blank.dpp");
    std::fs::write(&script, "").unwrap();
    let output = temp.path().join("blank.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .arg("-o")
        .arg(&output)
        .arg("--legacy-strokes")
        .assert()
        .success();

    assert_eq!(png_size(&output), (12, 7));
}

#[test]
fn script_errors_name_the_line() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("broken.dpp");
    std::fs::write(&script, "cursor pen 0 0\npen.line 10\npen.wiggle 3\n").unwrap();
    let output = temp.path().join("broken.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("unknown cursor command 'wiggle'"));

    assert!(!output.exists());
}

#[test]
fn loops_and_variables_reach_the_binary() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("steps.dpp");
    std::fs::write(
        &script,
        "cursor pen 0 0\nfor i = 1 to 3\n  pen.move (i * 10)\n  if i != 2\n    pen.position\n  end\nend\n",
    )
    .unwrap();
    let output = temp.path().join("steps.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .args(["--width", "80", "--height", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pen: (10.00, 0.00)"))
        .stdout(predicate::str::contains("pen: (30.00, 0.00)").not())
        .stdout(predicate::str::contains("pen: (60.00, 0.00)"));
}

#[test]
fn oversized_script_canvas_is_rejected() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("huge.dpp");
    std::fs::write(&script, "canvas 100000 100000
").unwrap();
    let output = temp.path().join("huge.png");

    drawpp_cmd(temp.path())
        .arg(&script)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1"))
        .stderr(predicate::str::contains("1-16384"));

    assert!(!output.exists());
}

#[test]
fn missing_script_reports_path() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(temp.path())
        .arg(temp.path().join("nope.dpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use nbclean_notebook::Notebook;
use nbclean_test_utils::{lecture_notebook, scenario_notebook, write_notebook};
use predicates::prelude::*;

#[test]
fn clear_tagged_outputs_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_notebook(dir.path(), "scenario.ipynb", &scenario_notebook());

    let mut cmd = cargo_bin_cmd!("nbclean");
    cmd.arg("clear").arg(dir.path()).arg("--tag").arg("hide_output");
    cmd.assert().success();

    let nb = Notebook::read(&path).unwrap();
    assert!(nb.cells[0].outputs().unwrap().is_empty());
    assert_eq!(nb.cells[1..], scenario_notebook().cells[1..]);
}

#[test]
fn remove_and_replace_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_notebook(dir.path(), "lecture.ipynb", &lecture_notebook());

    cargo_bin_cmd!("nbclean")
        .args(["remove", "--tag", "remove"])
        .arg(&path)
        .assert()
        .success();
    cargo_bin_cmd!("nbclean")
        .arg("replace")
        .arg(&path)
        .assert()
        .success();

    let nb = Notebook::read(&path).unwrap();
    assert_eq!(nb.len(), lecture_notebook().len() - 1);
    assert!(nb.cells.iter().all(|c| !c.source().contains("### SOLUTION BEGIN")));
}

#[test]
fn remove_without_criterion_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_notebook(dir.path(), "a.ipynb", &scenario_notebook());

    cargo_bin_cmd!("nbclean")
        .arg("remove")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least one removal criterion"));
}

#[test]
fn unknown_clear_kind_lists_valid_kinds() {
    let dir = tempfile::tempdir().unwrap();
    write_notebook(dir.path(), "a.ipynb", &scenario_notebook());

    cargo_bin_cmd!("nbclean")
        .arg("clear")
        .arg(dir.path())
        .args(["--kind", "everything"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output_text").and(predicate::str::contains("everything")));
}

#[test]
fn missing_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("nbclean")
        .arg("clear")
        .arg(dir.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path not found"));
}

#[test]
fn create_tests_writes_next_to_notebook() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("week1");
    let path = write_notebook(&sub, "lecture.ipynb", &lecture_notebook());

    cargo_bin_cmd!("nbclean")
        .arg("create-tests")
        .arg(dir.path())
        .args(["--tag", "test", "--output-dir", "autograder"])
        .assert()
        .success();

    assert_eq!(std::fs::read_dir(sub.join("autograder")).unwrap().count(), 1);
    let nb = Notebook::read(&path).unwrap();
    assert!(nb
        .cells
        .iter()
        .any(|c| c.source().starts_with("_ = ok.grade('autograder/")));
}

#[test]
fn keep_going_reports_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_notebook(dir.path(), "good.ipynb", &scenario_notebook());
    std::fs::write(dir.path().join("bad.ipynb"), "{").unwrap();

    cargo_bin_cmd!("nbclean")
        .args(["--keep-going", "clear"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 succeeded, 1 failed"))
        .stderr(predicate::str::contains("bad.ipynb"));
}

#[test]
fn invalid_settings_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_notebook(dir.path(), "a.ipynb", &scenario_notebook());
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[run]\nmax_lines = 3\n").unwrap();

    cargo_bin_cmd!("nbclean")
        .arg("clear")
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid settings"));
}

#[test]
fn run_reports_missing_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_notebook(dir.path(), "a.ipynb", &scenario_notebook());
    let config = dir.path().join("nbclean.toml");
    std::fs::write(&config, "[run]\nprogram = \"nbclean-missing-engine\"\n").unwrap();

    cargo_bin_cmd!("nbclean")
        .arg("run")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to start nbclean-missing-engine"));

    assert_eq!(Notebook::read(&path).unwrap(), scenario_notebook());
}

#[test]
fn empty_directory_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("nbclean")
        .arg("clear")
        .arg(dir.path())
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn run_writes_executed_copies_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let lectures = dir.path().join("lectures");
    let intro = write_notebook(&lectures, "intro.ipynb", &scenario_notebook());
    write_notebook(&lectures.join("week2"), "loops.ipynb", &lecture_notebook());
    let config = dir.path().join("nbclean.toml");
    std::fs::write(&config, "[run]\nprogram = \"cat\"\nargs = []\n").unwrap();
    let built = lectures.join("built");

    let run = || {
        let mut cmd = cargo_bin_cmd!("nbclean");
        cmd.arg("run")
            .arg(&lectures)
            .arg("--output-dir")
            .arg(&built)
            .arg("--config")
            .arg(&config);
        cmd
    };

    run().assert().success();
    assert_eq!(Notebook::read(built.join("intro-exe.ipynb")).unwrap(), scenario_notebook());
    assert_eq!(
        Notebook::read(built.join("week2").join("loops-exe.ipynb")).unwrap(),
        lecture_notebook()
    );
    assert_eq!(Notebook::read(&intro).unwrap(), scenario_notebook());

    run()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("output directory already exists"));

    run().arg("--overwrite").assert().success();
    assert!(!built.join("intro-exe-exe.ipynb").exists());
    assert!(built.join("intro-exe.ipynb").exists());
}

#[test]
fn overwrite_requires_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("nbclean")
        .arg("run")
        .arg(dir.path())
        .arg("--overwrite")
        .assert()
        .code(2);
}

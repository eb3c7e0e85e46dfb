use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;

pub fn crewscore() -> Command {
    cargo_bin_cmd!("crewscore")
}

/// Initialize a store and register a minimal roster: one age group
/// ("Juniors"), the given crews, and one juror ("Kim", PIN 1234).
#[allow(dead_code)]
pub fn setup_store(dir: &Path, crews: &[&str]) {
    crewscore().current_dir(dir).arg("init").assert().success();

    crewscore()
        .current_dir(dir)
        .args(["roster", "set-age-groups", "Juniors"])
        .assert()
        .success();

    for crew in crews {
        crewscore()
            .current_dir(dir)
            .args(["roster", "add-crew", "--age-group", "Juniors", crew])
            .assert()
            .success();
    }

    crewscore()
        .current_dir(dir)
        .args(["roster", "add-juror", "Kim", "1234"])
        .assert()
        .success();
}

#[macro_use]
mod common;

use assert_cmd::Command;

#[cfg(test)]
mod native {
    tests! {
        clock in native is OK
        "true"
    }
}

#[test]
fn readline_reads_lines_until_eof() {
    Command::cargo_bin("shale").unwrap()
        .arg("tests/target/native/readline.shale")
        .write_stdin("hi\n")
        .assert()
        .success()
        .stdout("hi\nnull\n");
}

#[test]
fn readchar_reads_single_characters() {
    Command::cargo_bin("shale").unwrap()
        .arg("tests/target/native/readchar.shale")
        .write_stdin("ab")
        .assert()
        .success()
        .stdout("a\nb\nnull\n");
}

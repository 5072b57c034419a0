//! On-disk fixtures: git repositories, patches and fake build drivers

use git2::{Repository, Signature};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const ORIGINAL: &str = "line one\nline two\nline three\n";
pub const PATCHED: &str = "line one\nline 2\nline three\n";

/// Unified diff turning ORIGINAL into PATCHED
pub const GOOD_PATCH: &str = "\
--- a/firmware.txt
+++ b/firmware.txt
@@ -1,3 +1,3 @@
 line one
-line two
+line 2
 line three
";

/// Unified diff whose context matches nothing in the fixture
pub const BAD_PATCH: &str = "\
--- a/firmware.txt
+++ b/firmware.txt
@@ -1,3 +1,3 @@
 something else
-entirely
+different
 here
";

/// Whether the git command line is usable here
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Initialise a repository in `dir` with `firmware.txt` committed
pub fn init_repo(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();
    fs::write(dir.join("firmware.txt"), ORIGINAL).unwrap();

    let sig = Signature::now("Bisect Tester", "bisect@example.com").unwrap();
    let tree_id = {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("firmware.txt")).unwrap();
        index.write().unwrap();
        index.write_tree().unwrap()
    };
    {
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }
    repo
}

pub fn write_patch(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn read_firmware(dir: &Path) -> String {
    fs::read_to_string(dir.join("firmware.txt")).unwrap()
}

/// Write an executable script
pub fn write_script(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// `./build.sh` that logs its arguments to `build.log` and exits with `code`
pub fn write_build_driver(dir: &Path, code: i32) {
    write_script(
        &dir.join("build.sh"),
        &format!(
            "#!/bin/sh\nset -e\necho \"$@\" >> build.log\n\
             [ -f firmware.txt ] && cp firmware.txt built.txt\nexit {}\n",
            code
        ),
    );
}

/// Lines of `build.log`, one per driver invocation
pub fn build_log(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("build.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

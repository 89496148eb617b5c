// Shared test helpers: fake test corpora and stub compilers.
#![allow(dead_code)]
//
// The stub compilers are small shell scripts standing in for `z++`: they
// write the fixed-named `a.*` artifacts into their working directory and
// exit with whatever code the scenario calls for.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A stub compiler that mirrors the real corpus convention: inputs with
/// "failing" in their path are rejected with exit code 1, everything else
/// compiles cleanly and produces `a.asm`, `a.o` and a runnable `a.out`.
///
/// The first stdout line echoes the input path (the harness strips it);
/// the second survives into the companion file.
pub const FULL_STUB: &str = r#"src="$2"
echo "compiling $src"
case "$src" in
  *failing*)
    echo "error: rejected" >&2
    exit 1
    ;;
esac
echo "note: debug build"
printf 'asm-text' > a.asm
printf 'obj-bytes' > a.o
cat > a.out <<'PROG'
#!/bin/sh
echo "hello from program"
exit 0
PROG
chmod +x a.out
exit 0
"#;

/// A stub compiler that accepts everything with exit code 0 and produces
/// no artifacts. Unexpected-success scenarios use it on failing-marked inputs.
pub const ACCEPT_ALL_STUB: &str = r#"echo "compiling $2"
exit 0
"#;

/// A stub compiler that always exits with an out-of-contract code.
pub const BAD_CODE_STUB: &str = r#"echo "compiling $2"
echo "internal compiler error" >&2
exit 7
"#;

/// A stub compiler that hangs longer than any timeout used in the tests.
pub const HANGING_STUB: &str = r#"sleep 30
exit 0
"#;

/// Writes an executable stub compiler script into `dir` and returns its path.
#[cfg(unix)]
pub fn write_stub_compiler(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write stub compiler");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark stub compiler executable");
    path
}

/// Creates a small test corpus:
///
/// ```text
/// <root>/basic/hello.cpp
/// <root>/basic/math.cpp
/// <root>/failing/bad_syntax.cpp
/// ```
pub fn setup_testbase() -> TempDir {
    let root = tempdir().expect("Failed to create testbase directory");
    write_test_source(root.path(), "basic/hello.cpp");
    write_test_source(root.path(), "basic/math.cpp");
    write_test_source(root.path(), "failing/bad_syntax.cpp");
    root
}

/// Adds one source file (with placeholder content) under the corpus root.
pub fn write_test_source(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create corpus subdirectory");
    fs::write(&path, "int main() { return 0; }\n").expect("Failed to write test source");
    path
}

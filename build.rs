use std::process::Command;

/// Run git and return trimmed stdout, or "unknown" when git or the repo is
/// unavailable (e.g. building from a source tarball).
fn git_output(args: &[&str]) -> String {
    match Command::new("git").args(args).output() {
        Ok(out) if out.status.success() => String::from_utf8(out.stdout)
            .unwrap_or_else(|_| "unknown".to_string())
            .trim()
            .to_string(),
        _ => "unknown".to_string(),
    }
}

fn main() {
    // Stamp the build with the current commit so startup logs and debug
    // reports can name the exact build.
    println!(
        "cargo:rustc-env=GIT_HASH={}",
        git_output(&["rev-parse", "--short", "HEAD"])
    );
    println!(
        "cargo:rustc-env=GIT_HASH_FULL={}",
        git_output(&["rev-parse", "HEAD"])
    );

    // rerun build script if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
}

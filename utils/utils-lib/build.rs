type BuildResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> BuildResult {
    // GIT_VERSION from the environment takes precedence, e.g. for builds outside of a checkout.
    println!("cargo:rerun-if-env-changed=GIT_VERSION");
    if std::env::var_os("GIT_VERSION").is_some() {
        return Ok(());
    }

    let output = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output();
    if let Ok(output) = output {
        if output.status.success() {
            let revision = String::from_utf8(output.stdout)?;
            println!("cargo:rustc-env=GIT_VERSION={}", revision.trim());
        }
    }

    let git_path = std::path::Path::new("../../.git");
    if git_path.exists() {
        println!("cargo:rerun-if-changed=../../.git/HEAD");
    }

    Ok(())
}

// Companion program lookup, launch, and termination via the process table.

use anyhow::{Context, Result, anyhow};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use sysinfo::System;

/// Scans the process table for an exact name match.
pub fn is_program_running(name: &str) -> bool {
    let mut system = System::new();
    system.refresh_all();

    system
        .processes()
        .values()
        .any(|process| process.name().to_string_lossy() == name)
}

/// Kills every process whose name matches. Failures are ignored; the next
/// status probe reports whatever survived.
pub fn kill_program(name: &str) {
    let mut system = System::new();
    system.refresh_all();

    for process in system.processes().values() {
        if process.name().to_string_lossy() == name && !process.kill() {
            debug!("kill signal not delivered to pid {}", process.pid());
        }
    }
}

/// Kills a single PID if it still exists.
pub fn kill_pid(pid: u32) {
    let mut system = System::new();
    system.refresh_all();

    if let Some(process) = system.process(sysinfo::Pid::from_u32(pid)) {
        process.kill();
    }
}

/// Resolves the program to launch: the first absolute candidate that exists,
/// otherwise a PATH lookup of the bare name.
pub fn find_program(name: &str, candidates: &[PathBuf]) -> Option<PathBuf> {
    for candidate in candidates {
        if candidate.is_absolute() {
            if candidate.exists() {
                return Some(candidate.clone());
            }
            continue;
        }
        if let Some(resolved) = search_path(candidate) {
            return Some(resolved);
        }
    }
    search_path(Path::new(name))
}

fn search_path(name: &Path) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|full| full.is_file())
}

/// Launches the companion program detached from the UI, stdio discarded.
pub fn launch_program(name: &str, candidates: &[PathBuf]) -> Result<()> {
    let program =
        find_program(name, candidates).ok_or_else(|| anyhow!("no launchable candidate for {}", name))?;

    let mut cmd = Command::new(&program);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // Windows-specific: hide console window
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
    }

    cmd.spawn()
        .context(format!("Failed to launch {}", program.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn existing_absolute_candidate_wins() {
        let path = env::temp_dir().join(format!("svc-toggle-candidate-{}", std::process::id()));
        fs::write(&path, b"").unwrap();

        let found = find_program("ignored-name", std::slice::from_ref(&path));
        assert_eq!(found, Some(path.clone()));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_candidates_yield_none() {
        let missing = env::temp_dir().join("svc-toggle-no-such-binary");
        assert_eq!(find_program("svc-toggle-no-such-binary", &[missing]), None);
    }

    #[cfg(unix)]
    #[test]
    fn bare_name_falls_back_to_path_lookup() {
        assert!(find_program("sh", &[]).is_some());
    }

    #[test]
    fn unknown_program_is_not_running() {
        assert!(!is_program_running("svc-toggle-no-such-process"));
    }

    #[test]
    fn launching_unresolvable_program_errors() {
        assert!(launch_program("svc-toggle-no-such-binary", &[]).is_err());
    }
}

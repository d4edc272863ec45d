// Handles all interactions with the OS service manager (`sc` / `systemctl`).

use anyhow::{Context, Result};
use std::process::Command;

pub enum ServiceAction {
    Start,
    Stop,
}

impl ServiceAction {
    fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
        }
    }
}

/// Asks the service manager whether the unit is currently running.
/// A spawn failure or unrecognized output counts as not running.
#[cfg(target_os = "windows")]
pub fn is_service_running(service: &str) -> bool {
    match Command::new("sc").args(["query", service]).output() {
        Ok(output) => parse_sc_state(&String::from_utf8_lossy(&output.stdout)),
        Err(_) => false,
    }
}

#[cfg(not(target_os = "windows"))]
pub fn is_service_running(service: &str) -> bool {
    match Command::new("systemctl")
        .args(["is-active", service])
        .output()
    {
        Ok(output) => parse_active_state(&String::from_utf8_lossy(&output.stdout)),
        Err(_) => false,
    }
}

#[cfg(target_os = "windows")]
pub fn control_service(service: &str, action: ServiceAction) -> Result<()> {
    let action_str = action.as_str();

    // Captured rather than inherited so the command cannot write over the
    // alternate screen.
    let output = Command::new("sc")
        .args([action_str, service])
        .output()
        .context(format!("Failed to {} service {}", action_str, service))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "sc {} {} returned non-zero status",
            action_str,
            service
        ))
    }
}

#[cfg(not(target_os = "windows"))]
pub fn control_service(service: &str, action: ServiceAction) -> Result<()> {
    let action_str = action.as_str();

    let output = Command::new("systemctl")
        .args([action_str, service])
        .output()
        .context(format!("Failed to {} service {}", action_str, service))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "systemctl {} {} returned non-zero status",
            action_str,
            service
        ))
    }
}

/// The PID the service manager still reports for the unit, if any.
/// Used after a stop to clean up a unit that refused to exit in time.
#[cfg(target_os = "windows")]
pub fn leftover_pid(service: &str) -> Option<u32> {
    let output = Command::new("sc").args(["queryex", service]).output().ok()?;
    parse_sc_pid(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(target_os = "windows"))]
pub fn leftover_pid(service: &str) -> Option<u32> {
    let output = Command::new("systemctl")
        .args(["show", "-p", "MainPID", "--value", service])
        .output()
        .ok()?;
    parse_main_pid(&String::from_utf8_lossy(&output.stdout))
}

// `sc query` reports state as e.g. "        STATE              : 4  RUNNING".
#[cfg(any(target_os = "windows", test))]
fn parse_sc_state(stdout: &str) -> bool {
    stdout
        .lines()
        .find(|line| line.contains("STATE"))
        .map(|line| line.contains("RUNNING"))
        .unwrap_or(false)
}

// `sc queryex` adds a "        PID                : 4668" line.
#[cfg(any(target_os = "windows", test))]
fn parse_sc_pid(stdout: &str) -> Option<u32> {
    let line = stdout.lines().find(|line| line.contains("PID"))?;
    let (_, value) = line.split_once(':')?;
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(pid) => Some(pid),
    }
}

#[cfg(any(not(target_os = "windows"), test))]
fn parse_active_state(stdout: &str) -> bool {
    stdout.trim() == "active"
}

// `systemctl show -p MainPID --value` prints a bare PID, 0 meaning none.
#[cfg(any(not(target_os = "windows"), test))]
fn parse_main_pid(stdout: &str) -> Option<u32> {
    match stdout.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(pid) => Some(pid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SC_QUERY_RUNNING: &str = "\
SERVICE_NAME: WpcMonSvc
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 4  RUNNING
                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXIT_CODE    : 0  (0x0)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0
";

    const SC_QUERY_STOPPED: &str = "\
SERVICE_NAME: WpcMonSvc
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 1  STOPPED
        WIN32_EXIT_CODE    : 0  (0x0)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0
";

    const SC_QUERYEX: &str = "\
SERVICE_NAME: WpcMonSvc
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 4  RUNNING
                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXIT_CODE    : 0  (0x0)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0
        PID                : 4668
        FLAGS              :
";

    #[test]
    fn sc_state_running() {
        assert!(parse_sc_state(SC_QUERY_RUNNING));
    }

    #[test]
    fn sc_state_stopped() {
        assert!(!parse_sc_state(SC_QUERY_STOPPED));
    }

    #[test]
    fn sc_state_without_output_is_stopped() {
        // `sc` prints an error blob with no STATE line for unknown services.
        assert!(!parse_sc_state(""));
        assert!(!parse_sc_state(
            "[SC] EnumQueryServicesStatus:OpenService FAILED 1060"
        ));
    }

    #[test]
    fn sc_pid_extracted() {
        assert_eq!(parse_sc_pid(SC_QUERYEX), Some(4668));
    }

    #[test]
    fn sc_pid_zero_means_none() {
        assert_eq!(parse_sc_pid("        PID                : 0"), None);
    }

    #[test]
    fn sc_pid_missing_or_garbled_means_none() {
        assert_eq!(parse_sc_pid(SC_QUERY_STOPPED), None);
        assert_eq!(parse_sc_pid("        PID                : oops"), None);
    }

    #[test]
    fn active_state_parsing() {
        assert!(parse_active_state("active\n"));
        assert!(!parse_active_state("inactive\n"));
        assert!(!parse_active_state("failed\n"));
        assert!(!parse_active_state(""));
    }

    #[test]
    fn main_pid_parsing() {
        assert_eq!(parse_main_pid("742\n"), Some(742));
        assert_eq!(parse_main_pid("0\n"), None);
        assert_eq!(parse_main_pid(""), None);
    }
}

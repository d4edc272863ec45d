// The stop/start transition for the service/program pair, run off the UI thread.

use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use super::config::Config;
use super::model::{PairStatus, ToggleAction};
use super::process;
use super::service::{self, ServiceAction};

/// Settle time after asking the service manager to start the unit.
const START_SETTLE: Duration = Duration::from_secs(2);
/// Settle time after asking the service manager to stop the unit.
const STOP_SETTLE: Duration = Duration::from_secs(3);

/// Probes both halves of the pair.
pub fn probe(config: &Config) -> PairStatus {
    PairStatus {
        service_running: service::is_service_running(&config.service_name),
        program_running: process::is_program_running(&config.program_name),
    }
}

/// Runs one transition. Every step is best effort; the caller re-probes
/// afterwards to see what actually happened.
fn run_transition(config: &Config, action: ToggleAction) {
    match action {
        ToggleAction::Stop => {
            process::kill_program(&config.program_name);
            if let Err(err) = service::control_service(&config.service_name, ServiceAction::Stop) {
                warn!("stopping {}: {:#}", config.service_name, err);
            }
            thread::sleep(STOP_SETTLE);
            // The service manager may still hold a PID for a unit that
            // refused to stop in time.
            if let Some(pid) = service::leftover_pid(&config.service_name) {
                process::kill_pid(pid);
            }
        }
        ToggleAction::Start => {
            if let Err(err) = service::control_service(&config.service_name, ServiceAction::Start) {
                warn!("starting {}: {:#}", config.service_name, err);
            }
            thread::sleep(START_SETTLE);
            if let Err(err) = process::launch_program(&config.program_name, &config.program_candidates)
            {
                warn!("launching {}: {:#}", config.program_name, err);
            }
        }
    }
}

/// Claims the busy flag and runs the opposite-state transition on a worker
/// thread, reporting the final status over `events`. Returns false when a
/// toggle is already in flight; that request is dropped.
pub fn spawn_toggle(config: Config, busy: Arc<AtomicBool>, events: Sender<PairStatus>) -> bool {
    if busy.swap(true, Ordering::SeqCst) {
        return false;
    }

    thread::spawn(move || {
        let action = ToggleAction::for_status(probe(&config));
        run_transition(&config, action);
        let _ = events.send(probe(&config));
        busy.store(false, Ordering::SeqCst);
    });

    true
}

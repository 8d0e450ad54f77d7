//! Background watcher lifecycle: spawning, stopping and signal handling.
//!
//! A background watcher is the same binary started as
//! `care watch --daemon-run`, detached from the terminal. Its PID is kept in
//! `care-watch.pid` inside the data directory; the file doubles as the
//! "is a watcher running" marker the one-shot commands consult.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use std::time::Duration;

pub const PID_FILE: &str = "care-watch.pid";

/// Runs the watcher until it exits or a shutdown signal arrives.
///
/// The signal only notifies the watcher, which then flushes today's stats
/// before returning.
pub async fn run_with_signal_handling() -> Result<()> {
    // A foreground watcher registers itself too, so commands reach it.
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !is_running() {
        std::fs::write(&pid_path, std::process::id().to_string())?;
    }

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigtermHandler))?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(|_| msg_error_anyhow!(Message::FailedToCreateSigintHandler))?;
        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
        std::mem::forget(shutdown_tx);
    }

    let monitor_handle = tokio::spawn(async move {
        let mut monitor = Monitor::new().map_err(|e| Message::MonitorError(e.to_string()))?;
        monitor.run(shutdown_rx).await.map_err(|e| Message::MonitorError(e.to_string()))
    });

    match monitor_handle.await {
        Ok(Ok(())) => msg_info!(Message::MonitorExitedNormally),
        Ok(Err(e)) => msg_error!(e),
        Err(e) => msg_error!(Message::MonitorTaskPanicked(e.to_string())),
    }

    if read_pid(&pid_path) == Some(std::process::id()) {
        let _ = std::fs::remove_file(&pid_path);
    }

    Ok(())
}

/// Whether a watcher is registered in the PID file and still alive.
pub fn is_running() -> bool {
    let Ok(pid_path) = DataStorage::new().get_path(PID_FILE) else {
        return false;
    };
    read_pid(&pid_path).is_some_and(process_alive)
}

/// Spawns the watcher as a detached background process.
/// A watcher that is already running is stopped first.
pub fn spawn() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_internal() {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                let _ = std::fs::remove_file(&pid_path);
            }
            // Let the old watcher flush its stats.
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    let current_exe = std::env::current_exe().map_err(|_| msg_error_anyhow!(Message::FailedToGetCurrentExecutable))?;

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let mut command = std::process::Command::new(current_exe);
        command
            .args(["watch", "--daemon-run"])
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null());
        // SAFETY: setsid is async-signal-safe and touches no shared state.
        unsafe {
            command.pre_exec(|| {
                nix::unistd::setsid()?;
                Ok(())
            });
        }
        let child = command.spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe)
            .args(["watch", "--daemon-run"])
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Finds and stops the running watcher.
pub fn stop() -> Result<()> {
    if !is_running() {
        // A leftover file from a crashed watcher.
        let pid_path = DataStorage::new().get_path(PID_FILE)?;
        if pid_path.exists() {
            std::fs::remove_file(pid_path)?;
        }
        msg_info!(Message::WatcherNotRunning);
        return Ok(());
    }
    stop_internal()
}

fn stop_internal() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        msg_bail_anyhow!(Message::WatcherNotRunningPidNotFound);
    }

    let pid = read_pid(&pid_path).ok_or_else(|| msg_error_anyhow!(Message::InvalidPidFileContent))?;
    let killed = kill_process(pid)?;

    // The watcher may already have removed its own file on shutdown.
    if pid_path.exists() {
        std::fs::remove_file(pid_path)?;
    }

    if killed {
        msg_info!(Message::WatcherStopped(pid));
        Ok(())
    } else {
        msg_bail_anyhow!(Message::WatcherFailedToStop(pid));
    }
}

fn read_pid(path: &std::path::Path) -> Option<u32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

#[cfg(unix)]
pub fn process_alive(pid: u32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_ok()
}

#[cfg(windows)]
pub fn process_alive(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
    use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;

    // Exit code reported for a process that has not exited yet.
    const STILL_ACTIVE: u32 = 259;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            return false;
        }
        let mut exit_code = 0;
        let queried = GetExitCodeProcess(handle, &mut exit_code);
        CloseHandle(handle);
        queried != 0 && exit_code == STILL_ACTIVE
    }
}

#[cfg(not(any(unix, windows)))]
pub fn process_alive(_pid: u32) -> bool {
    true
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == 87 {
                // ERROR_INVALID_PARAMETER: no such process
                return Ok(false);
            }
            msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        }
        std::thread::sleep(Duration::from_millis(100));
        Ok(true)
    }
}

/// SIGTERM first so the watcher can flush, SIGKILL after a second.
#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let target = Pid::from_raw(pid as i32);
    if kill(target, None).is_err() {
        return Ok(false);
    }

    kill(target, Signal::SIGTERM)?;
    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));
        if kill(target, None).is_err() {
            return Ok(true);
        }
    }

    kill(target, Signal::SIGKILL)?;
    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}

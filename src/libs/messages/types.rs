#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleCare,
    ConfigReloaded,
    ConfigReloadFailed(String),
    InvalidTimeOfDay(String),

    // === PROMPTS ===
    PromptWorkStart,
    PromptWorkEnd,
    PromptWeekendBlock,
    PromptWaterReminder,
    PromptStatusAnimation,
    PromptBreakReminder,
    PromptBreakInterval,
    PromptIdleReset,

    // === CONTROL MESSAGES ===
    CareEnabled,
    CarePaused,
    SnoozedUntil(String), // HH:MM
    SnoozeResumed,
    CodingAllowedToday,
    CommandQueued(String),

    // === MENU ===
    MenuTitle,
    MenuPause,
    MenuResume,
    MenuResumeNotifications,
    MenuSnooze(u64), // minutes
    MenuOpenReport,
    MenuAllowToday,
    MenuOpenSettings,

    // === REPORT MESSAGES ===
    ReportHeader(String), // date key
    ReportWritten(String), // path
    ReportOpenFailed(String),
    ReportClosed,
    StatsHeader,
    NoStatsRecorded,

    // === MONITOR MESSAGES ===
    MonitorStarted {
        work_start: String,
        work_end: String,
    },
    MonitorExitedNormally,
    MonitorShuttingDown,
    MonitorError(String),
    MonitorTaskPanicked(String),
    KeyboardListenFailed(String),
    UndoSimulationFailed(String),
    NotificationFailed(String),
    EvaluationFailed(String),
    StatsFlushed(String), // date key

    // === WATCHER / DAEMON MESSAGES ===
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherNotRunning,
    WatcherNotRunningPidNotFound,
    WatcherStartingForeground,
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherFailedToStop(u32),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    DaemonModeNotSupported,
    FailedToGetCurrentExecutable,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
    InvalidPidFileContent,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),
    ProcessTerminationNotSupported,
}

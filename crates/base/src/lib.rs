pub mod logging;
pub use logging::{
    FileLogger, StderrLogger, StdoutLogger, Timestamp, default_level, init_file_logger,
    init_stderr_logger, init_stdout_logger,
};

// Downstream crates log through base::log::* without a direct dependency.
pub use log;

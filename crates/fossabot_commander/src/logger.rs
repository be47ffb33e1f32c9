use log::Level;

/// Structured fields attached to a log record, in insertion order
pub type Fields = serde_json::Map<String, serde_json::Value>;

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &Fields);
}

impl<F> Logger for F
where
    F: Fn(Level, &str, &Fields) + Send + Sync,
{
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        (self)(level, message, fields)
    }
}

/// Forwards records to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl LogFacade {
    const TARGET: &'static str = "fossabot_commander";
}

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str, fields: &Fields) {
        if fields.is_empty() {
            log::log!(target: Self::TARGET, level, "{}", message);
            return;
        }

        match serde_json::to_string(fields) {
            Ok(fields) => log::log!(target: Self::TARGET, level, "{} {}", message, fields),
            Err(..) => log::log!(target: Self::TARGET, level, "{}", message),
        }
    }
}

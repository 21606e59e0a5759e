use log::{Level, Log, Metadata, Record};

use std::sync::Arc;

/// Logging handle passed into components. Without an injected sink it forwards
/// to whatever logger is installed behind the `log` facade.
#[derive(Clone)]
pub struct Logger {
    target: &'static str,
    sink: Option<Arc<dyn Log>>
}

impl Logger {
    pub fn new(target: &'static str) -> Self {
        Logger{target, sink: None}
    }

    pub fn with_sink(target: &'static str, sink: Arc<dyn Log>) -> Self {
        Logger{target, sink: Some(sink)}
    }

    pub fn target(&self) -> &'static str {self.target}

    pub fn debug(&self, msg: &str) {self.log(Level::Debug, msg)}
    pub fn info(&self, msg: &str) {self.log(Level::Info, msg)}
    pub fn warn(&self, msg: &str) {self.log(Level::Warn, msg)}
    pub fn error(&self, msg: &str) {self.log(Level::Error, msg)}

    fn log(&self, level: Level, msg: &str) {
        let sink: &dyn Log = match &self.sink {
            Some(sink) => sink.as_ref(),
            None => {
                if level > log::max_level() {return;}
                log::logger()
            }
        };
        if !sink.enabled(&Metadata::builder().level(level).target(self.target).build()) {return;}
        sink.log(&Record::builder()
            .level(level)
            .target(self.target)
            .args(format_args!("{}", msg))
            .build()
        );
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
        .field("target", &self.target)
        .field("injected", &self.sink.is_some())
        .finish()
    }
}

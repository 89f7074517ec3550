//! Test logger that records what each test thread logs.
//!
//! Records are also forwarded to an `env_logger` test logger, so `RUST_LOG`
//! still prints them alongside the test output.
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct Capture {
    inner: env_logger::Logger,
}

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Installs the capturing logger once per test binary.
pub(crate) fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let inner = env_logger::Builder::from_default_env().is_test(true).build();
        if log::set_logger(Box::leak(Box::new(Capture { inner }))).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Drains the records the current thread logged at `level`.
pub(crate) fn take(level: Level) -> Vec<String> {
    RECORDS.with(|r| {
        let mut records = r.borrow_mut();
        let (hit, rest): (Vec<_>, Vec<_>) = records.drain(..).partition(|(l, _)| *l == level);
        *records = rest;
        hit.into_iter().map(|(_, msg)| msg).collect()
    })
}

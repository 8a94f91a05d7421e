//! CLI command implementations

pub mod complete;
pub mod generate_config;
pub mod segment;

use std::cell::{Cell, RefCell};

use anyhow::Result;
use streamcut_core::StreamSegmenter;

use crate::config::MarkerConfig;
use crate::output::OutputFormatter;

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

/// Counts of units emitted during one run
#[derive(Debug, Default)]
pub(crate) struct UnitCounters {
    pub sentences: Cell<usize>,
    pub regions: Cell<usize>,
}

/// Build a segmenter whose callbacks write through `formatter`.
///
/// Callbacks cannot return errors, so the first formatter failure is parked
/// in `failure` for the caller to surface once the stream is done.
pub(crate) fn routed_segmenter<'a>(
    markers: &'a [MarkerConfig],
    formatter: &'a RefCell<Box<dyn OutputFormatter>>,
    counters: &'a UnitCounters,
    failure: &'a RefCell<Option<anyhow::Error>>,
) -> Result<StreamSegmenter<'a>> {
    let mut builder = StreamSegmenter::builder().sentence_callback(move |text| {
        counters.sentences.set(counters.sentences.get() + 1);
        if let Err(err) = formatter.borrow_mut().sentence(text) {
            failure.borrow_mut().get_or_insert(err);
        }
    });
    for marker in markers {
        let label = marker.name.as_str();
        builder = builder.marker(marker.start.clone(), marker.end.clone(), move |text| {
            counters.regions.set(counters.regions.get() + 1);
            if let Err(err) = formatter.borrow_mut().region(label, text) {
                failure.borrow_mut().get_or_insert(err);
            }
        });
    }
    Ok(builder.build()?)
}

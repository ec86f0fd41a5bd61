//! Simulated results dialog

use crate::host::{Instrument, ResultsDialog};
use crate::report::dialog::DialogChoice;
use crate::sandbox::instrument::SandboxInstrument;
use std::cell::RefCell;
use std::rc::Rc;

/// Results pages for sandbox instruments
///
/// Discarding resets the instrument, keeping leaves it alone. Either way the
/// page closes and the answer is recorded.
#[derive(Debug, Default)]
pub struct SandboxResultsDialog {
    pages: RefCell<Vec<Rc<SandboxInstrument>>>,
    answers: RefCell<Vec<(String, DialogChoice)>>,
}

impl SandboxResultsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop a results page for `instrument`
    pub fn open(&self, instrument: Rc<SandboxInstrument>) {
        let mut pages = self.pages.borrow_mut();
        if !pages.iter().any(|page| page.id() == instrument.id()) {
            pages.push(instrument);
        }
    }

    /// Every answer given so far, in order
    pub fn answers(&self) -> Vec<(String, DialogChoice)> {
        self.answers.borrow().clone()
    }

    fn close(&self, instrument_id: &str) -> Option<Rc<SandboxInstrument>> {
        let mut pages = self.pages.borrow_mut();
        let index = pages.iter().position(|page| page.id() == instrument_id)?;
        Some(pages.remove(index))
    }

    fn record(&self, instrument_id: &str, choice: DialogChoice) {
        self.answers
            .borrow_mut()
            .push((instrument_id.to_string(), choice));
    }
}

impl ResultsDialog for SandboxResultsDialog {
    fn open_pages(&self) -> Vec<String> {
        self.pages
            .borrow()
            .iter()
            .map(|page| page.id().to_string())
            .collect()
    }

    fn keep(&self, instrument_id: &str) {
        if self.close(instrument_id).is_some() {
            self.record(instrument_id, DialogChoice::Keep);
        }
    }

    fn discard(&self, instrument_id: &str) {
        if let Some(instrument) = self.close(instrument_id) {
            instrument.reset();
            self.record(instrument_id, DialogChoice::Discard);
        }
    }
}

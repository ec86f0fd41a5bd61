//! Results dialog handling
//!
//! Deploying an instrument can make the host pop a results page that blocks
//! until the player picks keep or discard. The overlay answers those pages
//! itself on every redraw: data for a subject still below its cap is kept,
//! data for a capped subject is thrown away.

use crate::host::{ResearchLedger, ResultsDialog, Vessel};
use serde::Serialize;
use tracing::debug;

/// Answer given on a results page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogChoice {
    Keep,
    Discard,
}

/// Answer every open results page for instruments on `vessel`
///
/// Only instruments holding data are considered; pages are answered in
/// experiment-id order, like the overlay lists them. A subject the ledger
/// doesn't know yet counts as uncapped. Returns the answers given.
pub fn answer_results(
    vessel: &dyn Vessel,
    ledger: &dyn ResearchLedger,
    dialog: &dyn ResultsDialog,
) -> Vec<(String, DialogChoice)> {
    let open = dialog.open_pages();
    if open.is_empty() {
        return Vec::new();
    }

    let mut instruments = vessel.instruments();
    instruments.sort_by(|a, b| a.experiment_id().cmp(b.experiment_id()));

    let mut answers = Vec::new();
    for instrument in &instruments {
        if !open.iter().any(|id| id == instrument.id()) {
            continue;
        }
        let Some(data) = instrument.held_data() else {
            continue;
        };
        let capped = ledger
            .subject(&data.subject)
            .map_or(false, |subject| subject.is_capped());

        let choice = if capped {
            dialog.discard(instrument.id());
            DialogChoice::Discard
        } else {
            dialog.keep(instrument.id());
            DialogChoice::Keep
        };
        debug!(instrument_id = %instrument.id(), subject = %data.subject, ?choice, "Answered results page");
        answers.push((instrument.id().to_string(), choice));
    }
    answers
}

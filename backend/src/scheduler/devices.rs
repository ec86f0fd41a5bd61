//! Transmission device selection
//!
//! Devices are a contended resource: one job each, and every instrument on
//! the vessel wants one. A device is claimed simply by transmitting on it, so
//! selection only ever considers devices that are not busy.

use crate::host::TransmissionDevice;
use std::cmp::Ordering;
use std::rc::Rc;

/// Idle device with the lowest resource cost
///
/// Ties go to the device listed first. Returns `None` when every device is busy.
///
/// # Example
///
/// ```
/// use science_manager_core::sandbox::{SandboxLedger, SandboxTransmitter};
/// use science_manager_core::host::TransmissionDevice;
/// use science_manager_core::scheduler::cheapest_idle;
/// use std::rc::Rc;
///
/// let ledger = Rc::new(SandboxLedger::new());
/// let devices: Vec<Rc<dyn TransmissionDevice>> = vec![
///     Rc::new(SandboxTransmitter::new("dish", 5.0, Rc::clone(&ledger))),
///     Rc::new(SandboxTransmitter::new("whip", 2.0, Rc::clone(&ledger))),
///     Rc::new(SandboxTransmitter::new("relay", 8.0, Rc::clone(&ledger))),
/// ];
///
/// assert_eq!(cheapest_idle(&devices).map(|d| d.id()), Some("whip"));
/// ```
pub fn cheapest_idle(devices: &[Rc<dyn TransmissionDevice>]) -> Option<&Rc<dyn TransmissionDevice>> {
    devices.iter().filter(|device| !device.is_busy()).min_by(|a, b| {
        a.resource_cost()
            .partial_cmp(&b.resource_cost())
            .unwrap_or(Ordering::Equal)
    })
}

/// Number of devices free to take a job
pub fn idle_count(devices: &[Rc<dyn TransmissionDevice>]) -> usize {
    devices.iter().filter(|device| !device.is_busy()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::{SandboxLedger, SandboxTransmitter};

    fn devices(ledger: &Rc<SandboxLedger>) -> Vec<Rc<SandboxTransmitter>> {
        vec![
            Rc::new(SandboxTransmitter::new("dish", 5.0, Rc::clone(ledger))),
            Rc::new(SandboxTransmitter::new("whip", 5.0, Rc::clone(ledger))),
            Rc::new(SandboxTransmitter::new("relay", 8.0, Rc::clone(ledger))),
        ]
    }

    fn as_dyn(devices: &[Rc<SandboxTransmitter>]) -> Vec<Rc<dyn TransmissionDevice>> {
        devices
            .iter()
            .map(|d| Rc::clone(d) as Rc<dyn TransmissionDevice>)
            .collect()
    }

    #[test]
    fn test_equal_cost_goes_to_first_listed() {
        let ledger = Rc::new(SandboxLedger::new());
        let concrete = devices(&ledger);
        let devices = as_dyn(&concrete);

        assert_eq!(cheapest_idle(&devices).map(|d| d.id()), Some("dish"));
    }

    #[test]
    fn test_busy_devices_are_skipped() {
        let ledger = Rc::new(SandboxLedger::new());
        let concrete = devices(&ledger);
        let devices = as_dyn(&concrete);
        assert_eq!(idle_count(&devices), 3);

        concrete[0].set_busy(true);
        concrete[1].set_busy(true);
        assert_eq!(idle_count(&devices), 1);
        assert_eq!(cheapest_idle(&devices).map(|d| d.id()), Some("relay"));

        concrete[2].set_busy(true);
        assert_eq!(idle_count(&devices), 0);
        assert!(cheapest_idle(&devices).is_none());
    }
}

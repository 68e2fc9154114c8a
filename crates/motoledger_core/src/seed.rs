//! Fixed sample records for `initLedger`.

use crate::record::VehicleRecord;

/// Number of sample records written by `initLedger`.
pub const SAMPLE_RECORD_COUNT: usize = 10;

const SAMPLES: [(&str, &str, &str, &str, &str, &str); SAMPLE_RECORD_COUNT] = [
    ("Honda", "Activa", "gold", "567SDA12", "100CC", "Sandhya"),
    ("Vespa", "Activa", "red", "345VLS67", "150CC", "Lakshmi"),
    ("Bajaj", "AXv", "blue", "135AB79", "150CC", "Satwik"),
    ("HeroHonda", "Infinit", "grey", "145HG45", "100CC", "Prabhu"),
    ("Yamaha", "", "metallic", "179NF68", "150CC", "Syed"),
    ("TVS", "", "green", "236KJ12", "150CC", "Anand"),
    ("Honda", "Kinetic", "silver", "934DS21", "150CC", "Seshu"),
    ("", "", "yellow", "689LK12", "100CC", "Pavan"),
    ("Honda", "Kinetic", "black", "123MHK45", "100CC", "Vani"),
    ("", "Pleasure", "white", "4566VMS78", "50CC", "Madhuri"),
];

/// Returns the sample records in seeding order.
pub fn sample_records() -> Vec<VehicleRecord> {
    SAMPLES
        .iter()
        .map(|&(make, model, color, vin, engine_cc, owner)| {
            VehicleRecord::new(make, model, color, vin, engine_cc, owner)
        })
        .collect()
}

use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const CHECKOUT_HEADER: &[&str] = &[
    "customer",
    "name",
    "origin",
    "destination",
    "distance_km",
    "duration",
    "date",
    "time",
    "vehicle_id",
    "vehicle",
    "rate",
    "method",
    "card_number",
    "card_holder",
    "card_expiry",
    "card_cvv",
];

/// Writes `rows` valid cash checkouts for distinct customers.
pub fn generate_checkout_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(CHECKOUT_HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            &format!("user-{i}"),
            "Jane Mwangi",
            "Westlands",
            "Kilimani",
            "10",
            "45 min",
            "2025-07-01",
            "09:30",
            "1",
            "Canter truck",
            "14240",
            "cash",
            "",
            "",
            "",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

//! Prompt text sent to the generation model.

use std::fmt::Write;

use marque_catalog::VehicleRecord;
use marque_import::SuggestScope;

/// Field contract every reply must follow.
const RECORD_SCHEMA: &str = "\
Respond with a JSON array only. Each element is an object with exactly these keys:
  \"Manufacturer\" (string), \"Model\" (string),
  \"Generation\" (string of digits only, e.g. \"8\" not \"8th gen\"),
  \"Model_Code\" (string, the chassis or platform code),
  \"Start_Year\" (integer), \"End_Year\" (four-digit year string, or \"Present\").";

/// Cap on existing records echoed back to the model.
const MAX_LISTED: usize = 200;

/// One-line description of a record, e.g. `Toyota Supra gen 5 (J29, 2019-Present)`.
pub fn describe(record: &VehicleRecord) -> String {
    format!(
        "{} {} gen {} ({}, {}-{})",
        record.manufacturer,
        record.model,
        record.generation,
        record.model_code,
        record.start_year,
        record.end_year
    )
}

/// Prompt for a starter catalog.
pub fn initialize_prompt() -> String {
    format!(
        "You are building a catalog of passenger vehicle model generations.\n\
         List the generations of the best-selling current models from at least \
         five major manufacturers, including each model's previous generation.\n\n\
         {RECORD_SCHEMA}"
    )
}

/// Prompt asking for records missing from `current` within `scope`.
pub fn suggest_prompt(scope: &SuggestScope, current: &[VehicleRecord]) -> String {
    let mut prompt = String::from(
        "You maintain a catalog of passenger vehicle model generations.\n",
    );
    let _ = writeln!(
        prompt,
        "Scope: manufacturer = {}, model = {}.",
        scope.manufacturer, scope.model
    );

    let known: Vec<&VehicleRecord> = current.iter().filter(|r| scope.contains(r)).collect();
    if known.is_empty() {
        prompt.push_str("The catalog has no entries in this scope yet.\n");
    } else {
        prompt.push_str("The catalog already contains:\n");
        for record in known.iter().take(MAX_LISTED) {
            let _ = writeln!(prompt, "- {}", describe(record));
        }
        if known.len() > MAX_LISTED {
            let _ = writeln!(prompt, "- ... and {} more", known.len() - MAX_LISTED);
        }
    }

    prompt.push_str(
        "\nSuggest generations in this scope that are missing from the catalog. \
         Do not repeat any listed entry. Return an empty array if nothing is missing.\n\n",
    );
    prompt.push_str(RECORD_SCHEMA);
    prompt
}

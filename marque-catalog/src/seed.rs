//! Built-in starter dataset, used when nothing has been persisted yet or the
//! stored snapshot can't be read.

use crate::types::VehicleRecord;

/// The seed records, already in canonical sort order with unique keys.
pub fn seed_dataset() -> Vec<VehicleRecord> {
    [
        ("BMW", "3 Series", "6", "F30", 2012, "2019"),
        ("BMW", "3 Series", "7", "G20", 2018, "Present"),
        ("BMW", "5 Series", "7", "G30", 2017, "2023"),
        ("BMW", "X5", "4", "G05", 2018, "Present"),
        ("Ford", "F-150", "14", "P702", 2021, "Present"),
        ("Ford", "Mustang", "6", "S550", 2015, "2023"),
        ("Ford", "Mustang", "7", "S650", 2024, "Present"),
        ("Honda", "Accord", "10", "CV", 2018, "2022"),
        ("Honda", "Civic", "10", "FC", 2016, "2021"),
        ("Honda", "Civic", "11", "FL", 2022, "Present"),
        ("Toyota", "Camry", "8", "XV70", 2017, "Present"),
        ("Toyota", "Corolla", "11", "E170", 2013, "2019"),
        ("Toyota", "Corolla", "12", "E210", 2019, "Present"),
        ("Toyota", "Prius", "4", "XW50", 2015, "2022"),
        ("Toyota", "RAV4", "5", "XA50", 2019, "Present"),
        ("Toyota", "Supra", "5", "J29", 2019, "Present"),
        ("Volkswagen", "Golf", "7", "5G", 2012, "2019"),
        ("Volkswagen", "Golf", "8", "CD", 2019, "Present"),
    ]
    .into_iter()
    .map(|(manufacturer, model, generation, code, start, end)| {
        VehicleRecord::new(manufacturer, model, generation, code, start, end)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::sort::sort_dataset;

    #[test]
    fn seed_is_sorted() {
        let seed = seed_dataset();
        assert_eq!(sort_dataset(&seed), seed);
    }

    #[test]
    fn seed_keys_are_unique() {
        let seed = seed_dataset();
        let keys: HashSet<_> = seed.iter().map(|r| r.key()).collect();
        assert_eq!(keys.len(), seed.len());
    }

    #[test]
    fn seed_generations_are_digit_only() {
        assert!(
            seed_dataset()
                .iter()
                .all(|r| r.generation.chars().all(|c| c.is_ascii_digit()))
        );
    }
}

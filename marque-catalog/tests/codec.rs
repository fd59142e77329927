use marque_catalog::*;

const HEADER: &str = "Manufacturer,Model,Generation,Model_Code,Start_Year,End_Year";

#[test]
fn round_trip_reproduces_seed_dataset() {
    let seed = seed_dataset();
    let decoded = from_text(&to_text(&seed)).unwrap();
    assert_eq!(decoded, seed);
}

#[test]
fn header_only_is_format_error() {
    let err = from_text(&format!("{HEADER}\n")).unwrap_err();
    assert!(matches!(err, CodecError::Format(_)));
}

#[test]
fn blank_lines_do_not_count_as_data() {
    let err = from_text(&format!("\n{HEADER}\n\n   \n")).unwrap_err();
    assert!(matches!(err, CodecError::Format(_)));
}

#[test]
fn missing_columns_is_format_error() {
    let text = "Manufacturer,Model,Start_Year\nToyota,Corolla,2019\n";
    let err = from_text(text).unwrap_err();
    match err {
        CodecError::Format(msg) => {
            assert!(msg.contains("Generation"));
            assert!(msg.contains("Model_Code"));
            assert!(msg.contains("End_Year"));
        }
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn non_integer_start_year_names_line() {
    let text = format!("{HEADER}\nToyota,Corolla,Mk5,E210,abc,Present\n");
    let err = from_text(&text).unwrap_err();
    match err {
        CodecError::RowParse { line, value, row } => {
            assert_eq!(line, 2);
            assert_eq!(value, "abc");
            assert_eq!(row, "Toyota,Corolla,Mk5,E210,abc,Present");
        }
        other => panic!("expected RowParse, got {other:?}"),
    }
}

#[test]
fn parse_error_after_valid_rows_aborts_everything() {
    let text = format!(
        "{HEADER}\nToyota,Supra,5,J29,2019,Present\nHonda,Civic,11,FL,20x2,Present\n"
    );
    let err = from_text(&text).unwrap_err();
    assert!(matches!(err, CodecError::RowParse { line: 3, .. }));
}

#[test]
fn short_rows_are_skipped() {
    let text = format!("{HEADER}\nToyota,Supra,5\nToyota,Corolla,Mk12,E210,2019,Present\n");
    let records = from_text(&text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].model, "Corolla");
}

#[test]
fn generation_is_normalized_and_fields_trimmed() {
    let text = format!("{HEADER}\n  Toyota , Corolla ,Mk12, E210 , 2019 ,Present \n");
    let records = from_text(&text).unwrap();
    assert_eq!(
        records[0],
        VehicleRecord::new("Toyota", "Corolla", "12", "E210", 2019, "Present")
    );
}

#[test]
fn generation_without_digits_is_kept() {
    let text = format!("{HEADER}\nFord,Model T,Generation V,T,1908,1927\n");
    let records = from_text(&text).unwrap();
    assert_eq!(records[0].generation, "Generation V");
}

#[test]
fn columns_resolved_by_name() {
    let text = "Notes,End_Year,Start_Year,Model_Code,Generation,Model,Manufacturer\n\
                imported,2023,2017,G30,7,5 Series,BMW\n";
    let records = from_text(text).unwrap();
    assert_eq!(
        records,
        vec![VehicleRecord::new("BMW", "5 Series", "7", "G30", 2017, "2023")]
    );
}

#[test]
fn bom_and_crlf_are_accepted() {
    let text = format!("\u{feff}{HEADER}\r\nHonda,Civic,11,FL,2022,Present\r\n");
    let records = from_text(&text).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].end_year, "Present");
}

#[test]
fn decode_keeps_duplicates_and_input_order() {
    let text = format!(
        "{HEADER}\nToyota,Supra,5,J29,2019,Present\nBMW,X5,4,G05,2018,Present\nToyota,Supra,5,J29,2019,Present\n"
    );
    let records = from_text(&text).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].manufacturer, "BMW");
}

#[test]
fn full_width_empty_row_is_row_parse_error() {
    let text = format!("{HEADER}\nToyota,Supra,5,J29,2019,Present\n,,,,,\n");
    let err = from_text(&text).unwrap_err();
    match err {
        CodecError::RowParse { line, value, .. } => {
            assert_eq!(line, 3);
            assert_eq!(value, "");
        }
        other => panic!("expected RowParse, got {other:?}"),
    }
}

#[test]
fn only_empty_fields_row_is_not_silently_accepted() {
    let err = from_text(&format!("{HEADER}\n,,,,,\n")).unwrap_err();
    assert!(matches!(err, CodecError::RowParse { line: 2, .. }));
}

#[test]
fn error_line_counts_every_blank_line_kind() {
    let bad = "Honda,Civic,11,FL,20x2,Present";

    let after_empty = format!("{HEADER}\n\n{bad}\n");
    assert!(matches!(
        from_text(&after_empty).unwrap_err(),
        CodecError::RowParse { line: 3, .. }
    ));

    let after_spaces = format!("{HEADER}\n   \n{bad}\n");
    assert!(matches!(
        from_text(&after_spaces).unwrap_err(),
        CodecError::RowParse { line: 3, .. }
    ));

    let after_two_empty = format!("{HEADER}\n\n\n{bad}\n");
    assert!(matches!(
        from_text(&after_two_empty).unwrap_err(),
        CodecError::RowParse { line: 4, .. }
    ));

    let crlf = format!("{HEADER}\r\n\r\nToyota,Supra,5,J29,2019,Present\r\n{bad}\r\n");
    assert!(matches!(
        from_text(&crlf).unwrap_err(),
        CodecError::RowParse { line: 4, .. }
    ));
}

//! End-to-end checks of the behaviour writer components rely on

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

use sheetwright_core::diagnostics::{AxisKinds, AxisRequirement};
use sheetwright_core::limits::{MAX_CELL_NAME_LENGTH, MAX_SHEETNAME_LENGTH};
use sheetwright_core::{
    cell_ref, endian, strerror, validate_sheet_name, CustomProperties, DateTime, ErrorCode,
    MemoryReporter, PropertyValue, Severity, SheetNames, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

#[test]
fn every_code_has_a_distinct_description() {
    let mut seen = HashSet::new();
    for code in ErrorCode::ALL {
        let text = strerror(code.code());
        assert!(!text.is_empty());
        assert!(seen.insert(text), "duplicate description for {code:?}");
    }
    assert_eq!(seen.len(), ErrorCode::MAX_ERRNO as usize);
}

#[test]
fn failures_propagate_unchanged_with_question_mark() {
    fn add_two(names: &mut SheetNames, a: &str, b: &str) -> sheetwright_core::Result<()> {
        names.register(a)?;
        names.register(b)?;
        Ok(())
    }

    let mut names = SheetNames::new();
    assert_eq!(
        add_two(&mut names, "Data", "DATA"),
        Err(ErrorCode::SheetnameAlreadyUsed)
    );
    assert_eq!(names.len(), 1);
}

#[test]
fn iso8601_is_twenty_characters() {
    for dt in [
        DateTime::new(1900, 1, 1, 0, 0, 0.0),
        DateTime::new(2016, 12, 12, 23, 0, 0.0),
        DateTime::new(9999, 12, 31, 23, 59, 59.999),
    ] {
        let text = dt.to_iso8601();
        assert_eq!(text.len(), 20, "{text}");
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], "T");
        assert!(text.ends_with('Z'));
    }
    assert_eq!(
        DateTime::new(2016, 12, 12, 23, 0, 0.0).to_iso8601(),
        "2016-12-12T23:00:00Z"
    );
}

proptest! {
    #[test]
    fn iso8601_shape_holds_for_all_valid_fields(
        year in 1900..=9999i32,
        month in 1..=12i32,
        day in 1..=31i32,
        hour in 0..=23i32,
        min in 0..=59i32,
        sec in 0.0..60.0f64,
    ) {
        let text = DateTime::new(year, month, day, hour, min, sec).to_iso8601();
        prop_assert_eq!(text.len(), 20);

        let bytes = text.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            match i {
                4 | 7 => prop_assert_eq!(*b, b'-'),
                10 => prop_assert_eq!(*b, b'T'),
                13 | 16 => prop_assert_eq!(*b, b':'),
                19 => prop_assert_eq!(*b, b'Z'),
                _ => prop_assert!(b.is_ascii_digit(), "{}", text),
            }
        }
        prop_assert_eq!(&text[..4], format!("{year:04}"));
        prop_assert_eq!(&text[17..19], format!("{:02}", sec.trunc() as i64));
    }
}

#[test]
fn serial_dates_keep_the_1900_leap_year_bug() {
    assert_eq!(DateTime::date(1900, 1, 1).to_excel_serial(), 1.0);
    assert_eq!(DateTime::date(1900, 3, 1).to_excel_serial(), 61.0);
}

#[test]
fn byte_order_conversions_are_inverses() {
    for x in [0u16, 1, 0x00FF, 0xFF00, 0x1234, u16::MAX] {
        assert_eq!(endian::u16_to_network(endian::u16_to_host(x)), x);
        assert_eq!(endian::u16_to_host(endian::u16_to_network(x)), x);
    }
    for x in [0u32, 1, 0xDEAD_BEEF, u32::MAX] {
        assert_eq!(endian::u32_to_network(endian::u32_to_host(x)), x);
        assert_eq!(endian::u32_to_host(endian::u32_to_network(x)), x);
    }
}

#[test]
fn sheet_name_rules() {
    let mut names = SheetNames::new();
    names.register("Budget").unwrap();

    assert_eq!(names.register(""), Err(ErrorCode::ParameterIsEmpty));
    assert_eq!(
        names.register(&"x".repeat(32)),
        Err(ErrorCode::SheetnameLengthExceeded)
    );
    assert_eq!(
        names.register("Q*1"),
        Err(ErrorCode::InvalidSheetnameCharacter)
    );
    assert_eq!(
        names.register("'Q1"),
        Err(ErrorCode::SheetnameStartEndApostrophe)
    );
    assert_eq!(names.register("bUdGeT"), Err(ErrorCode::SheetnameAlreadyUsed));

    let ok = "Quarter 1 Budget 2024 Final 123";
    let ok = format!("{ok}{}", "x".repeat(MAX_SHEET_NAME_LEN - ok.len()));
    assert_eq!(ok.len(), 31);
    assert_eq!(validate_sheet_name(&ok, names.iter()), Ok(()));
    assert!(ok.len() * 4 + 2 < MAX_SHEETNAME_LENGTH);
}

#[test]
fn long_string_property_is_rejected_without_adding() {
    let reporter = MemoryReporter::new();
    let mut props = CustomProperties::new();

    let result = props.set_with_reporter("Notes", "a".repeat(256), &reporter);

    assert_eq!(result, Err(ErrorCode::StringLengthExceeded255));
    assert!(props.is_empty());
    assert_eq!(reporter.entries()[0].0, Severity::Warning);
}

#[test]
fn properties_keep_insertion_order() {
    let mut props = CustomProperties::new();
    props.set("Author", "Jane").unwrap();
    props.set("Company", "Acme").unwrap();
    props.set("Manager", "Bob").unwrap();

    let pairs: Vec<_> = props
        .iter()
        .map(|p| (p.name(), p.value().as_str().unwrap()))
        .collect();
    assert_eq!(
        pairs,
        vec![("Author", "Jane"), ("Company", "Acme"), ("Manager", "Bob")]
    );
    assert_eq!(
        props.get("Company").map(|p| p.value()),
        Some(&PropertyValue::String("Acme".into()))
    );
}

#[test]
fn references_at_the_grid_edge() {
    let last = cell_ref::cell_name_abs(MAX_ROWS - 1, MAX_COLS - 1).unwrap();
    assert_eq!(last, "$XFD$1048576");
    assert!(last.len() < MAX_CELL_NAME_LENGTH);

    assert_eq!(
        cell_ref::cell_name(MAX_ROWS, 0),
        Err(ErrorCode::WorksheetIndexOutOfRange)
    );
}

#[test]
fn wrong_axis_calls_are_skipped_with_a_warning() {
    let reporter = MemoryReporter::new();
    let mut applied = false;

    let accepted = AxisRequirement::Category.check(
        AxisKinds::value(),
        "chart_axis_set_interval_unit",
        &reporter,
    );
    if accepted {
        applied = true;
    }

    assert!(!applied);
    assert_eq!(
        reporter.messages(),
        vec!["[WARNING]: chart_axis_set_interval_unit() is only valid for category axes"]
    );
}

//! Conversion between polars `DataFrame`s and typed encounter tables.
//!
//! The analytics table arrives as a dynamically typed frame. Lifting it into
//! an [`EncounterTable`] is where the schema contract is enforced: every
//! required column must be present (key columns are checked first) and every
//! cell must be readable as its column's type.

use polars::prelude::*;

use enc_model::{
    DISTINCT_DIAGNOSIS_COUNT, EncounterRecord, EncounterTable, FACILITY_ID, FLAG_REASON,
    FlaggedTable, INPUT_COLUMNS, PATIENT_ID, QualityError, TOTAL_COST, TOTAL_ENCOUNTERS,
    YEAR_MONTH,
};

use crate::polars::{any_to_count, any_to_f64, any_to_string, any_to_string_non_empty};

/// Fail with [`QualityError::MissingColumn`] for the first required column
/// the frame lacks, in schema order.
pub fn ensure_input_columns(df: &DataFrame) -> Result<(), QualityError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    for column in INPUT_COLUMNS {
        if !names.iter().any(|name| name == column) {
            return Err(QualityError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Lift a frame into a typed table, preserving row order.
pub fn table_from_frame(df: &DataFrame) -> Result<EncounterTable, QualityError> {
    ensure_input_columns(df)?;

    let patient = column(df, PATIENT_ID)?;
    let facility = column(df, FACILITY_ID)?;
    let month = column(df, YEAR_MONTH)?;
    let encounters = column(df, TOTAL_ENCOUNTERS)?;
    let cost = column(df, TOTAL_COST)?;
    let diagnoses = column(df, DISTINCT_DIAGNOSIS_COUNT)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(EncounterRecord {
            patient_id: text_cell(patient, PATIENT_ID, row)?,
            facility_id: text_cell(facility, FACILITY_ID, row)?,
            year_month: text_cell(month, YEAR_MONTH, row)?,
            total_encounters: count_cell(encounters, TOTAL_ENCOUNTERS, row)?,
            total_cost: decimal_cell(cost, TOTAL_COST, row)?,
            distinct_diagnosis_count: count_cell(diagnoses, DISTINCT_DIAGNOSIS_COUNT, row)?,
        });
    }
    Ok(EncounterTable::new(records))
}

/// Project a typed table back to a frame with the input schema.
pub fn table_to_frame(table: &EncounterTable) -> PolarsResult<DataFrame> {
    DataFrame::new(record_columns(table.iter()))
}

/// Project a flagged table to a frame: input schema plus `flag_reason`.
pub fn flagged_to_frame(table: &FlaggedTable) -> PolarsResult<DataFrame> {
    let mut columns = record_columns(table.iter().map(|flagged| &flagged.record));
    let reasons: Vec<String> = table.iter().map(|flagged| flagged.flag_reason()).collect();
    columns.push(Series::new(FLAG_REASON.into(), reasons).into_column());
    DataFrame::new(columns)
}

fn record_columns<'a>(records: impl Iterator<Item = &'a EncounterRecord>) -> Vec<Column> {
    let records: Vec<&EncounterRecord> = records.collect();
    let patient: Vec<&str> = records.iter().map(|r| r.patient_id.as_str()).collect();
    let facility: Vec<&str> = records.iter().map(|r| r.facility_id.as_str()).collect();
    let month: Vec<&str> = records.iter().map(|r| r.year_month.as_str()).collect();
    let encounters: Vec<i64> = records.iter().map(|r| r.total_encounters).collect();
    let cost: Vec<f64> = records.iter().map(|r| r.total_cost).collect();
    let diagnoses: Vec<i64> = records
        .iter()
        .map(|r| r.distinct_diagnosis_count)
        .collect();
    vec![
        Series::new(PATIENT_ID.into(), patient).into_column(),
        Series::new(FACILITY_ID.into(), facility).into_column(),
        Series::new(YEAR_MONTH.into(), month).into_column(),
        Series::new(TOTAL_ENCOUNTERS.into(), encounters).into_column(),
        Series::new(TOTAL_COST.into(), cost).into_column(),
        Series::new(DISTINCT_DIAGNOSIS_COUNT.into(), diagnoses).into_column(),
    ]
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, QualityError> {
    df.column(name).map_err(|_| QualityError::MissingColumn {
        column: name.to_string(),
    })
}

fn cell<'a>(series: &'a Column, row: usize) -> AnyValue<'a> {
    series.get(row).unwrap_or(AnyValue::Null)
}

fn text_cell(series: &Column, name: &str, row: usize) -> Result<String, QualityError> {
    let value = cell(series, row);
    any_to_string_non_empty(value.clone())
        .ok_or_else(|| invalid(name, row, "a non-empty string", value))
}

fn count_cell(series: &Column, name: &str, row: usize) -> Result<i64, QualityError> {
    let value = cell(series, row);
    any_to_count(value.clone()).ok_or_else(|| invalid(name, row, "an integer", value))
}

fn decimal_cell(series: &Column, name: &str, row: usize) -> Result<f64, QualityError> {
    let value = cell(series, row);
    any_to_f64(value.clone()).ok_or_else(|| invalid(name, row, "a number", value))
}

fn invalid(column: &str, row: usize, expected: &'static str, value: AnyValue<'_>) -> QualityError {
    QualityError::InvalidValue {
        column: column.to_string(),
        row,
        expected,
        value: any_to_string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: &[&str]) -> DataFrame {
        let cols: Vec<Column> = columns
            .iter()
            .map(|name| Series::new((*name).into(), vec!["x"]).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn missing_key_column_is_reported_first() {
        let df = frame(&[FACILITY_ID, YEAR_MONTH, TOTAL_ENCOUNTERS, DISTINCT_DIAGNOSIS_COUNT]);
        let err = ensure_input_columns(&df).unwrap_err();
        assert_eq!(
            err,
            QualityError::MissingColumn {
                column: PATIENT_ID.to_string()
            }
        );
    }

    #[test]
    fn missing_cost_column_is_reported() {
        let df = frame(&[
            PATIENT_ID,
            FACILITY_ID,
            YEAR_MONTH,
            TOTAL_ENCOUNTERS,
            DISTINCT_DIAGNOSIS_COUNT,
        ]);
        let err = table_from_frame(&df).unwrap_err();
        assert_eq!(
            err,
            QualityError::MissingColumn {
                column: TOTAL_COST.to_string()
            }
        );
    }
}

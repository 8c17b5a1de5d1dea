//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared data model.
//! CONTEXT: Re-exports the column, configuration and row types used by the
//! baseline engine, the worksheet client and the application layer.

pub mod cell;
pub mod column;
pub mod configuration;
pub mod row;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use column::{Column, ColumnType, DateAggregation, UnknownDateAggregation};
pub use configuration::{ColumnConfiguration, ConfigurationError};
pub use row::Row;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_a_configuration_from_columns() {
        let sales = Column::measure("Sales");
        let region = Column::attribute("Region");

        let config = ColumnConfiguration::new(
            vec![sales.clone()],
            vec![region.clone()],
            Some(sales.clone()),
            Some(sales),
            Some(region),
            None,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn it_reads_row_values() {
        let row = Row::new().with("Sales", 10.0);
        assert_eq!(row.get("Sales"), Some(&CellValue::Number(10.0)));
    }
}

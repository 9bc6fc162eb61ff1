//! FILENAME: tests/common/mod.rs
//! Fixtures for transpose-engine integration tests.

use transpose_engine::{DataCell, DataRow, FieldDescriptor, PivotColumn, QueryResponse};

/// Weekly sales by region: three measures pivoted over three periods.
pub struct SalesFixture;

impl SalesFixture {
    pub const REGIONS: [&'static str; 4] = ["North", "South", "East", "West"];
    pub const MEASURES: [(&'static str, &'static str); 3] = [
        ("orders.revenue", "Revenue"),
        ("orders.count", "Orders"),
        ("orders.cost", "Cost"),
    ];
    pub const PERIODS: [(&'static str, &'static str); 3] = [
        ("P0", "This Week"),
        ("P1", "Last Week"),
        ("P2", "Two Weeks Ago"),
    ];

    pub fn response() -> QueryResponse {
        let mut response = QueryResponse::default();
        response.fields.dimension_like = vec![FieldDescriptor::new("users.region", "Region")];
        response.fields.measure_like = Self::MEASURES
            .iter()
            .map(|(name, label)| FieldDescriptor::new(*name, *label))
            .collect();
        response.fields.pivots = vec![FieldDescriptor::new("orders.week", "Week")];
        response.pivots = Self::PERIODS
            .iter()
            .map(|(key, label)| PivotColumn::new(*key).with_value("orders.week", *label))
            .collect();
        response.data = Self::REGIONS
            .iter()
            .enumerate()
            .map(|(i, region)| Self::row(i, region))
            .collect();
        response
    }

    /// Values grow with the region index so every cell is distinct.
    fn row(index: usize, region: &str) -> DataRow {
        let base = (index + 1) as f64;
        let mut row = DataRow::new().with_dimension("users.region", DataCell::new(region));
        for (m, (name, _)) in Self::MEASURES.iter().enumerate() {
            let scale = base * 10f64.powi(m as i32);
            row = row.with_measure(
                *name,
                Self::PERIODS.iter().enumerate().map(|(p, (key, _))| {
                    let value = scale * (p + 1) as f64;
                    (*key, DataCell::new(value).with_rendered(format!("{:.1}", value)))
                }),
            );
        }
        row
    }

    /// The sales response with its data rows repeated `copies` times.
    pub fn repeated(copies: usize) -> QueryResponse {
        let mut response = Self::response();
        response.data = std::iter::repeat(response.data.iter().cloned()).take(copies).flatten().collect();
        response
    }
}

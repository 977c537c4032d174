use crate::domain::model::{FeatureRow, HousingRecord};

/// pd.cut 分箱邊界，右閉區間
const INCOME_BINS: [f64; 5] = [0.0, 1.5, 3.0, 4.5, 6.0];

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Missing operands and non-finite results (division by zero) yield `None`.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let value = finite(numerator)? / finite(denominator)?;
    value.is_finite().then_some(value)
}

/// Income category 1..=5 for `median_income` in (0, 1.5], (1.5, 3], (3, 4.5], (4.5, 6], (6, inf).
pub fn income_category(median_income: Option<f64>) -> Option<u8> {
    let income = finite(median_income)?;
    if income <= INCOME_BINS[0] {
        return None;
    }
    let upper_edges = &INCOME_BINS[1..];
    let category = upper_edges
        .iter()
        .position(|edge| income <= *edge)
        .unwrap_or(upper_edges.len());
    Some(category as u8 + 1)
}

pub fn engineer(record: &HousingRecord) -> FeatureRow {
    FeatureRow {
        numeric: [
            finite(record.longitude),
            finite(record.latitude),
            finite(record.housing_median_age),
            finite(record.total_rooms),
            finite(record.total_bedrooms),
            finite(record.population),
            finite(record.households),
            finite(record.median_income),
            ratio(record.total_rooms, record.households),
            ratio(record.total_bedrooms, record.total_rooms),
            ratio(record.population, record.households),
        ],
        category: record.ocean_proximity.trim().to_string(),
        label: record.median_house_value,
        income_cat: income_category(record.median_income),
    }
}

pub fn engineer_all(records: &[HousingRecord]) -> Vec<FeatureRow> {
    records.iter().map(engineer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rooms: f64, bedrooms: Option<f64>, population: f64, households: f64) -> HousingRecord {
        HousingRecord {
            longitude: Some(-122.0),
            latitude: Some(37.0),
            housing_median_age: Some(20.0),
            total_rooms: Some(rooms),
            total_bedrooms: bedrooms,
            population: Some(population),
            households: Some(households),
            median_income: Some(3.2),
            median_house_value: 250000.0,
            ocean_proximity: "INLAND".to_string(),
        }
    }

    #[test]
    fn test_derived_columns() {
        let rows = engineer_all(&[
            record(880.0, Some(129.0), 322.0, 126.0),
            record(7099.0, Some(1106.0), 2401.0, 1138.0),
            record(1467.0, Some(190.0), 496.0, 177.0),
        ]);

        for row in &rows {
            let rooms = row.value("total_rooms").unwrap();
            let bedrooms = row.value("total_bedrooms").unwrap();
            let households = row.value("households").unwrap();
            let population = row.value("population").unwrap();

            assert_eq!(row.value("bedrooms_per_room"), Some(bedrooms / rooms));
            assert_eq!(row.value("rooms_per_household"), Some(rooms / households));
            assert_eq!(
                row.value("population_per_household"),
                Some(population / households)
            );
        }
    }

    #[test]
    fn test_missing_operand_propagates() {
        let row = engineer(&record(880.0, None, 322.0, 126.0));
        assert_eq!(row.value("total_bedrooms"), None);
        assert_eq!(row.value("bedrooms_per_room"), None);
        assert!(row.value("rooms_per_household").is_some());
    }

    #[test]
    fn test_division_by_zero_is_missing() {
        let row = engineer(&record(880.0, Some(129.0), 322.0, 0.0));
        assert_eq!(row.value("rooms_per_household"), None);
        assert_eq!(row.value("population_per_household"), None);
    }

    #[test]
    fn test_income_category_bins() {
        assert_eq!(income_category(Some(0.0)), None);
        assert_eq!(income_category(Some(0.5)), Some(1));
        assert_eq!(income_category(Some(1.5)), Some(1));
        assert_eq!(income_category(Some(1.6)), Some(2));
        assert_eq!(income_category(Some(3.0)), Some(2));
        assert_eq!(income_category(Some(4.5)), Some(3));
        assert_eq!(income_category(Some(6.0)), Some(4));
        assert_eq!(income_category(Some(15.0)), Some(5));
        assert_eq!(income_category(None), None);
    }
}

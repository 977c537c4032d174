use crate::domain::model::{HousingRecord, CSV_COLUMNS};
use crate::utils::error::{HousingError, Result};

/// 讀取 CSV 並檢查必要欄位
pub fn read_records(data: &[u8]) -> Result<Vec<HousingRecord>> {
    // 標頭去空白，欄位檢查與 serde 對應一致
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    for column in CSV_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(HousingError::schema(column, "column is missing from the CSV header"));
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: HousingRecord = row?;
        records.push(record);
    }

    tracing::debug!("Parsed {} housing records", records.len());
    Ok(records)
}

pub fn write_records(records: &[HousingRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    // serde 只在第一筆資料時寫入標頭
    if records.is_empty() {
        writer.write_record(CSV_COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| HousingError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
longitude,latitude,housing_median_age,total_rooms,total_bedrooms,population,households,median_income,median_house_value,ocean_proximity
-122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY
-122.22,37.86,21.0,7099.0,,2401.0,1138.0,8.3014,358500.0,NEAR BAY
";

    #[test]
    fn test_read_records_with_padded_headers() {
        let padded = SAMPLE.replacen(",", ", ", 9);
        let records = read_records(padded.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].latitude, Some(37.88));
        assert_eq!(records[0].ocean_proximity, "NEAR BAY");
    }

    #[test]
    fn test_read_records_with_missing_value() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_bedrooms, Some(129.0));
        assert_eq!(records[1].total_bedrooms, None);
        assert_eq!(records[1].ocean_proximity, "NEAR BAY");
        assert_eq!(records[1].median_house_value, 358500.0);
    }

    #[test]
    fn test_read_records_ignores_extra_index_column() {
        let with_index = "\
,longitude,latitude,housing_median_age,total_rooms,total_bedrooms,population,households,median_income,median_house_value,ocean_proximity
17606,-121.89,37.29,38.0,1568.0,351.0,710.0,339.0,2.7042,286600.0,<1H OCEAN
";
        let records = read_records(with_index.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ocean_proximity, "<1H OCEAN");
    }

    #[test]
    fn test_read_records_missing_column() {
        let data = "longitude,latitude\n1.0,2.0\n";
        let err = read_records(data.as_bytes()).unwrap_err();

        match err {
            HousingError::SchemaError { column, .. } => assert_eq!(column, "housing_median_age"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_then_read_preserves_missing_values() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let bytes = write_records(&records).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.starts_with(&CSV_COLUMNS.join(",")));
        assert_eq!(read_records(&bytes).unwrap(), records);
    }

    #[test]
    fn test_write_empty_keeps_header() {
        let bytes = write_records(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), CSV_COLUMNS.join(","));
    }
}

//! The in-memory warehouse: named tables of typed rows.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::{ColumnType, TableSchema};
use crate::{QueryResult, Row, StoreError, Value};

/// Name, size and width of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
}

#[derive(Debug, Clone)]
struct Table {
    schema: TableSchema,
    rows: Vec<Vec<Value>>,
    /// Primary key values already present, in their display form.
    keys: HashSet<String>,
}

impl Table {
    fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            keys: HashSet::new(),
        }
    }

    fn column_index(&self, column: &str) -> Result<usize, StoreError> {
        self.schema
            .column_index(column)
            .ok_or_else(|| StoreError::ColumnNotFound {
                table: self.schema.name.clone(),
                column: column.to_string(),
            })
    }

    /// Check arity, coerce values to the column types and require a
    /// non-null primary key. Key uniqueness is left to the caller.
    fn prepare_row(&self, values: Vec<Value>) -> Result<Vec<Value>, StoreError> {
        let table = &self.schema.name;
        if values.len() != self.schema.len() {
            return Err(StoreError::ArityMismatch {
                table: table.clone(),
                expected: self.schema.len(),
                got: values.len(),
            });
        }

        let row = values
            .into_iter()
            .zip(&self.schema.columns)
            .map(|(value, column)| {
                coerce(value, column.ty).map_err(|got| StoreError::TypeMismatch {
                    table: table.clone(),
                    column: column.name.clone(),
                    expected: column.ty,
                    got,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(pk) = self.schema.primary_key_index() {
            if row[pk].is_null() {
                return Err(StoreError::ConstraintViolation(format!(
                    "{}.{} must not be null",
                    table, self.schema.columns[pk].name
                )));
            }
        }
        Ok(row)
    }

    fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> Result<impl Iterator<Item = &'a Value> + 'a, StoreError> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| &row[index]))
    }
}

/// In-memory store of typed tables.
///
/// Tables are kept in name order. Every stored row has exactly one value per
/// column, each either null or of the column's type.
#[derive(Debug, Clone, Default)]
pub struct Warehouse {
    tables: BTreeMap<String, Table>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table, replacing any existing table of the same name.
    pub fn create_table(&mut self, schema: TableSchema) {
        tracing::debug!(table = %schema.name, columns = schema.len(), "Creating table");
        self.tables.insert(schema.name.clone(), Table::new(schema));
    }

    /// Remove a table. Returns whether it existed.
    pub fn drop_table(&mut self, name: &str) -> bool {
        self.tables.remove(name).is_some()
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn schema(&self, name: &str) -> Result<&TableSchema, StoreError> {
        Ok(&self.table(name)?.schema)
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Size of every table, in name order.
    pub fn tables(&self) -> Vec<TableInfo> {
        self.tables
            .values()
            .map(|t| TableInfo {
                name: t.schema.name.clone(),
                row_count: t.rows.len(),
                column_count: t.schema.len(),
            })
            .collect()
    }

    /// Insert one row.
    ///
    /// Values are checked against the column types: integers are widened into
    /// real columns and `YYYY-MM-DD` text is parsed into date columns. The
    /// primary key, if the table has one, must be non-null and unique. A
    /// rejected row leaves the table unchanged.
    pub fn insert_row(&mut self, table: &str, values: Vec<Value>) -> Result<(), StoreError> {
        self.insert_rows(table, [values]).map(|_| ())
    }

    /// Insert many rows as one batch.
    ///
    /// Every row is checked as in [`Warehouse::insert_row`], including key
    /// uniqueness within the batch, before any is stored. If one is rejected
    /// the table is left unchanged. Returns the number inserted.
    pub fn insert_rows<I>(&mut self, table: &str, rows: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let t = self.table_mut(table)?;

        let mut prepared = Vec::new();
        let mut batch_keys = HashSet::new();
        for values in rows {
            let row = t.prepare_row(values)?;
            if let Some(pk) = t.schema.primary_key_index() {
                let key = row[pk].to_string();
                if t.keys.contains(&key) || !batch_keys.insert(key) {
                    return Err(StoreError::ConstraintViolation(format!(
                        "duplicate key {} in {}.{}",
                        row[pk], table, t.schema.columns[pk].name
                    )));
                }
            }
            prepared.push(row);
        }

        let inserted = prepared.len();
        t.keys.extend(batch_keys);
        t.rows.extend(prepared);
        Ok(inserted)
    }

    /// Insert serializable records, mapping fields to columns by name.
    ///
    /// Fields without a matching column are ignored; columns without a
    /// matching field are null.
    pub fn insert_records<T: Serialize>(
        &mut self,
        table: &str,
        records: &[T],
    ) -> Result<usize, StoreError> {
        let columns = self.schema(table)?.column_names();

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let json = serde_json::to_value(record)
                .map_err(|e| StoreError::SerializeError(e.to_string()))?;
            let fields = json.as_object().ok_or_else(|| {
                StoreError::SerializeError(format!("record for {} is not an object", table))
            })?;
            rows.push(
                columns
                    .iter()
                    .map(|c| fields.get(c).map(Value::from_json).unwrap_or(Value::Null))
                    .collect(),
            );
        }

        self.insert_rows(table, rows)
    }

    /// All rows of a table.
    pub fn query(&self, table: &str) -> Result<QueryResult, StoreError> {
        let t = self.table(table)?;
        let columns = t.schema.column_names();
        let rows = t
            .rows
            .iter()
            .map(|values| Row::new(columns.clone(), values.clone()))
            .collect();
        Ok(QueryResult::new(columns, rows))
    }

    /// All rows of a table, deserialized.
    pub fn query_as<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        self.query(table)?.deserialize_all()
    }

    pub fn count(&self, table: &str) -> Result<usize, StoreError> {
        Ok(self.table(table)?.rows.len())
    }

    /// Number of null values in a column.
    pub fn count_nulls(&self, table: &str, column: &str) -> Result<usize, StoreError> {
        self.count_where(table, column, Value::is_null)
    }

    /// Number of rows whose value in `column` satisfies `predicate`.
    pub fn count_where<F>(&self, table: &str, column: &str, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Value) -> bool,
    {
        Ok(self
            .table(table)?
            .column_values(column)?
            .filter(|v| predicate(v))
            .count())
    }

    /// Smallest and largest non-null value of a column, or `None` if it has
    /// none.
    pub fn min_max(&self, table: &str, column: &str) -> Result<Option<(Value, Value)>, StoreError> {
        let mut bounds: Option<(&Value, &Value)> = None;

        for value in self.table(table)?.column_values(column)? {
            if value.is_null() {
                continue;
            }
            bounds = Some(match bounds {
                None => (value, value),
                Some((lo, hi)) => (
                    if value.compare(lo).is_some_and(|o| o.is_lt()) { value } else { lo },
                    if value.compare(hi).is_some_and(|o| o.is_gt()) { value } else { hi },
                ),
            });
        }

        Ok(bounds.map(|(lo, hi)| (lo.clone(), hi.clone())))
    }

    /// Sum of the non-null numeric values of a column, or `None` if it has
    /// none.
    pub fn sum_real(&self, table: &str, column: &str) -> Result<Option<f64>, StoreError> {
        let sum = self
            .table(table)?
            .column_values(column)?
            .filter_map(Value::as_real)
            .fold(None, |acc: Option<f64>, v| Some(acc.unwrap_or(0.0) + v));
        Ok(sum)
    }

    fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }
}

/// Check a value against a column type, converting where allowed.
///
/// On failure returns the name of the offending value's type.
fn coerce(value: Value, ty: ColumnType) -> Result<Value, &'static str> {
    match (ty, value) {
        (_, Value::Null) => Ok(Value::Null),
        (ColumnType::Integer, v @ Value::Integer(_)) => Ok(v),
        (ColumnType::Real, Value::Integer(i)) => Ok(Value::Real(i as f64)),
        (ColumnType::Real, v @ Value::Real(_)) => Ok(v),
        (ColumnType::Text, v @ Value::Text(_)) => Ok(v),
        (ColumnType::Date, v @ Value::Date(_)) => Ok(v),
        (ColumnType::Date, Value::Text(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| "non-date text"),
        (_, other) => Err(other.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use serde::Deserialize;

    fn sales_schema() -> TableSchema {
        TableSchema::new(
            "sales",
            vec![
                Column::text("transaction_id").primary_key(),
                Column::date("sale_date"),
                Column::integer("quantity"),
                Column::real("total_amount"),
            ],
        )
    }

    fn warehouse() -> Warehouse {
        let mut wh = Warehouse::new();
        wh.create_table(sales_schema());
        wh.insert_row(
            "sales",
            vec!["T1".into(), "2024-01-05".into(), 2.into(), 19.98.into()],
        )
        .unwrap();
        wh.insert_row(
            "sales",
            vec!["T2".into(), Value::Null, 1.into(), (-5).into()],
        )
        .unwrap();
        wh.insert_row(
            "sales",
            vec!["T3".into(), "2024-03-01".into(), Value::Null, Value::Null],
        )
        .unwrap();
        wh
    }

    #[test]
    fn test_insert_and_count() {
        let wh = warehouse();
        assert_eq!(wh.count("sales").unwrap(), 3);
        assert_eq!(wh.count_nulls("sales", "sale_date").unwrap(), 1);
        assert_eq!(wh.count_nulls("sales", "total_amount").unwrap(), 1);
        assert_eq!(
            wh.count_where("sales", "total_amount", |v| v.as_real().is_some_and(|a| a < 0.0))
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_integer_widened_into_real() {
        let wh = warehouse();
        let result = wh.query("sales").unwrap();
        assert_eq!(result.rows[1].get("total_amount"), Some(&Value::Real(-5.0)));
    }

    #[test]
    fn test_type_mismatch() {
        let mut wh = warehouse();
        let err = wh
            .insert_row("sales", vec!["T9".into(), "soon".into(), 1.into(), 1.0.into()])
            .unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));

        let err = wh
            .insert_row("sales", vec!["T9".into(), Value::Null, 1.5.into(), 1.0.into()])
            .unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { got: "real", .. }));
        assert_eq!(wh.count("sales").unwrap(), 3);
    }

    #[test]
    fn test_arity_mismatch() {
        let mut wh = warehouse();
        let err = wh.insert_row("sales", vec!["T9".into()]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ArityMismatch { expected: 4, got: 1, .. }
        ));
    }

    #[test]
    fn test_primary_key_constraints() {
        let mut wh = warehouse();
        let dup = wh.insert_row("sales", vec!["T1".into(), Value::Null, Value::Null, Value::Null]);
        assert!(matches!(dup, Err(StoreError::ConstraintViolation(_))));

        let null = wh.insert_row("sales", vec![Value::Null, Value::Null, Value::Null, Value::Null]);
        assert!(matches!(null, Err(StoreError::ConstraintViolation(_))));
        assert_eq!(wh.count("sales").unwrap(), 3);
    }

    #[test]
    fn test_rejected_batch_inserts_nothing() {
        let mut wh = warehouse();

        let bad_type = wh.insert_rows(
            "sales",
            vec![
                vec!["T4".into(), Value::Null, 1.into(), 1.0.into()],
                vec!["T5".into(), "not a date".into(), 1.into(), 1.0.into()],
            ],
        );
        assert!(matches!(bad_type, Err(StoreError::TypeMismatch { .. })));

        let dup_in_batch = wh.insert_rows(
            "sales",
            vec![
                vec!["T6".into(), Value::Null, 1.into(), 1.0.into()],
                vec!["T6".into(), Value::Null, 2.into(), 2.0.into()],
            ],
        );
        assert!(matches!(dup_in_batch, Err(StoreError::ConstraintViolation(_))));
        assert_eq!(wh.count("sales").unwrap(), 3);

        // keys of the rejected batches were not reserved
        let ok = wh.insert_rows(
            "sales",
            vec![
                vec!["T4".into(), Value::Null, 1.into(), 1.0.into()],
                vec!["T6".into(), Value::Null, 1.into(), 1.0.into()],
            ],
        );
        assert_eq!(ok.unwrap(), 2);
        assert_eq!(wh.count("sales").unwrap(), 5);
    }

    #[test]
    fn test_create_replaces_table() {
        let mut wh = warehouse();
        wh.create_table(sales_schema());
        assert_eq!(wh.count("sales").unwrap(), 0);
        // keys from the old table are gone too
        wh.insert_row("sales", vec!["T1".into(), Value::Null, Value::Null, Value::Null])
            .unwrap();
    }

    #[test]
    fn test_min_max_and_sum() {
        let wh = warehouse();
        let (lo, hi) = wh.min_max("sales", "sale_date").unwrap().unwrap();
        assert_eq!(lo.to_string(), "2024-01-05");
        assert_eq!(hi.to_string(), "2024-03-01");

        let total = wh.sum_real("sales", "total_amount").unwrap().unwrap();
        assert!((total - 14.98).abs() < 1e-9);

        let mut empty = Warehouse::new();
        empty.create_table(sales_schema());
        assert!(empty.min_max("sales", "sale_date").unwrap().is_none());
        assert!(empty.sum_real("sales", "total_amount").unwrap().is_none());
    }

    #[test]
    fn test_insert_records_and_query_as() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Sale {
            transaction_id: String,
            sale_date: Option<NaiveDate>,
            quantity: Option<i64>,
            extra: String,
        }

        let records = vec![
            Sale {
                transaction_id: "A".into(),
                sale_date: NaiveDate::from_ymd_opt(2024, 2, 29),
                quantity: Some(3),
                extra: "ignored".into(),
            },
            Sale {
                transaction_id: "B".into(),
                sale_date: None,
                quantity: None,
                extra: "ignored".into(),
            },
        ];

        let mut wh = Warehouse::new();
        wh.create_table(sales_schema());
        assert_eq!(wh.insert_records("sales", &records).unwrap(), 2);
        assert_eq!(wh.count_nulls("sales", "total_amount").unwrap(), 2);

        #[derive(Deserialize)]
        struct Back {
            transaction_id: String,
            sale_date: Option<NaiveDate>,
            quantity: Option<i64>,
        }
        let back: Vec<Back> = wh.query_as("sales").unwrap();
        assert_eq!(back[0].transaction_id, "A");
        assert_eq!(back[0].sale_date, records[0].sale_date);
        assert_eq!(back[0].quantity, Some(3));
        assert!(back[1].quantity.is_none());
    }

    #[test]
    fn test_unknown_table_and_column() {
        let wh = warehouse();
        assert!(matches!(wh.count("nope"), Err(StoreError::TableNotFound(_))));
        assert!(matches!(
            wh.count_nulls("sales", "nope"),
            Err(StoreError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_table_listing() {
        let mut wh = warehouse();
        wh.create_table(TableSchema::new("regions", vec![Column::text("region_id")]));
        assert_eq!(wh.table_names(), vec!["regions", "sales"]);
        let info = wh.tables();
        assert_eq!(info[1].row_count, 3);
        assert_eq!(info[1].column_count, 4);
        assert!(wh.drop_table("regions"));
        assert!(!wh.has_table("regions"));
        assert!(!wh.drop_table("regions"));
    }
}

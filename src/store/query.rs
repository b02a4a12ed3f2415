use serde_json::Value;
use std::{cmp::Ordering, fmt::Display};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
    Gte(String, String),
    Lte(String, String),
    In(String, Vec<String>),
    IsNull(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A filtered, ordered and limited read (or the row selection of a patch).
///
/// Operands are kept in their textual form, the way the REST interface
/// receives them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    columns: Option<String>,
    filters: Vec<Filter>,
    order: Vec<(String, Direction)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_owned());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push(Filter::Eq(column.to_owned(), value.to_string()));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push(Filter::Gte(column.to_owned(), value.to_string()));
        self
    }

    pub fn lte(mut self, column: &str, value: impl Display) -> Self {
        self.filters
            .push(Filter::Lte(column.to_owned(), value.to_string()));
        self
    }

    pub fn is_in<I>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.filters.push(Filter::In(column.to_owned(), values));
        self
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.filters.push(Filter::IsNull(column.to_owned()));
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order.push((column.to_owned(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query string pairs in the PostgREST dialect.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![(
            "select".to_owned(),
            self.columns.clone().unwrap_or_else(|| "*".to_owned()),
        )];

        for filter in &self.filters {
            pairs.push(match filter {
                Filter::Eq(column, value) => (column.clone(), format!("eq.{value}")),
                Filter::Gte(column, value) => (column.clone(), format!("gte.{value}")),
                Filter::Lte(column, value) => (column.clone(), format!("lte.{value}")),
                Filter::In(column, values) => {
                    (column.clone(), format!("in.({})", values.join(",")))
                }
                Filter::IsNull(column) => (column.clone(), "is.null".to_owned()),
            });
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, direction)| match direction {
                    Direction::Asc => format!("{column}.asc"),
                    Direction::Desc => format!("{column}.desc"),
                })
                .collect::<Vec<_>>()
                .join(",");

            pairs.push(("order".to_owned(), order));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }

        pairs
    }

    /// Whether a JSON row satisfies every filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|filter| match filter {
            Filter::Eq(column, value) => {
                text(&row[column.as_str()]).as_deref() == Some(value.as_str())
            }
            Filter::Gte(column, value) => {
                compare_text(&row[column.as_str()], value).is_some_and(Ordering::is_ge)
            }
            Filter::Lte(column, value) => {
                compare_text(&row[column.as_str()], value).is_some_and(Ordering::is_le)
            }
            Filter::In(column, values) => text(&row[column.as_str()])
                .is_some_and(|text| values.iter().any(|value| *value == text)),
            Filter::IsNull(column) => row[column.as_str()].is_null(),
        })
    }

    /// Sorts rows by the requested order and truncates them to the limit.
    pub fn arrange(&self, rows: &mut Vec<Value>) {
        if !self.order.is_empty() {
            rows.sort_by(|a, b| {
                self.order
                    .iter()
                    .map(|(column, direction)| {
                        let ordering = compare_values(&a[column.as_str()], &b[column.as_str()]);
                        match direction {
                            Direction::Asc => ordering,
                            Direction::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
    }
}

/// Textual form of a scalar, `None` for null, arrays and objects.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn compare_text(value: &Value, operand: &str) -> Option<Ordering> {
    match value {
        Value::Number(n) => {
            let lhs = n.as_f64()?;
            let rhs = operand.parse::<f64>().ok()?;
            lhs.partial_cmp(&rhs)
        }
        Value::String(s) => Some(s.as_str().cmp(operand)),
        _ => None,
    }
}

/// Nulls sort last, like the store does for ascending orders.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn postgrest_pairs() {
        let query = Query::new()
            .columns("id,week")
            .eq("season_id", "abc")
            .gte("week", 1)
            .lte("week", 8)
            .is_in("status", ["regular", "playoffs"])
            .is_null("played_at")
            .order("week", Direction::Asc)
            .order("id", Direction::Desc)
            .limit(10);

        let pairs = query.to_pairs();
        let pairs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("select", "id,week"),
                ("season_id", "eq.abc"),
                ("week", "gte.1"),
                ("week", "lte.8"),
                ("status", "in.(regular,playoffs)"),
                ("played_at", "is.null"),
                ("order", "week.asc,id.desc"),
                ("limit", "10"),
            ]
        );
    }

    #[test]
    fn default_selects_everything() {
        assert_eq!(
            Query::new().to_pairs(),
            vec![("select".to_owned(), "*".to_owned())]
        );
    }

    #[test]
    fn matches_rows() {
        let row = json!({
            "season_id": "abc",
            "week": 3,
            "status": "regular",
            "played_at": null,
            "last_sim_local_date": "2024-09-12",
        });

        assert!(Query::new().eq("season_id", "abc").matches(&row));
        assert!(!Query::new().eq("season_id", "abd").matches(&row));
        assert!(Query::new().gte("week", 1).lte("week", 8).matches(&row));
        assert!(!Query::new().gte("week", 4).matches(&row));
        assert!(Query::new()
            .is_in("status", ["regular", "playoffs"])
            .matches(&row));
        assert!(Query::new().is_null("played_at").matches(&row));
        assert!(!Query::new().is_null("week").matches(&row));
        assert!(Query::new()
            .lte("last_sim_local_date", "2024-09-12")
            .matches(&row));
    }

    #[test]
    fn arrange_orders_and_limits() {
        let mut rows = vec![
            json!({ "week": 2, "name": "b" }),
            json!({ "week": null, "name": "z" }),
            json!({ "week": 1, "name": "c" }),
            json!({ "week": 1, "name": "a" }),
        ];

        Query::new()
            .order("week", Direction::Asc)
            .order("name", Direction::Asc)
            .limit(3)
            .arrange(&mut rows);

        let names: Vec<&str> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }
}

use crate::data::cell_value::CellValue;
use std::cmp::Ordering;

/// Position of each kind of value when two different kinds meet:
/// Null < Boolean < numeric < String < temporal < Json
fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Null => 0,
        CellValue::Boolean(_) => 1,
        CellValue::Integer(_) | CellValue::Float(_) => 2,
        CellValue::String(_) => 3,
        CellValue::Date(_) | CellValue::DateTime(_) => 4,
        CellValue::Json(_) => 5,
    }
}

/// Compare two cell values for sorting.
///
/// Numbers compare numerically (integers and floats mix freely), dates and
/// timestamps compare by their point in time, and strings compare
/// case-sensitively. Values of different kinds are ordered by kind, so the
/// ordering stays total for columns mixing numbers and text. Null sorts
/// before any value here; callers that need nulls last regardless of
/// direction use [`compare_nulls_last`].
pub fn compare_cell_values(a: &CellValue, b: &CellValue) -> Ordering {
    let (rank_a, rank_b) = (type_rank(a), type_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (CellValue::Integer(x), CellValue::Integer(y)) => x.cmp(y),
        (CellValue::Boolean(x), CellValue::Boolean(y)) => x.cmp(y),
        (CellValue::String(x), CellValue::String(y)) => x.cmp(y),
        (CellValue::Json(x), CellValue::Json(y)) => x.to_string().cmp(&y.to_string()),
        _ if a.is_numeric() => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
        _ if a.is_temporal() => a.as_datetime().cmp(&b.as_datetime()),
        _ => Ordering::Equal,
    }
}

/// Compare with nulls pinned to the end; `ascending` only affects non-null pairs
pub fn compare_nulls_last(a: &CellValue, b: &CellValue, ascending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_cell_values(a, b);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_integer_comparison() {
        assert_eq!(
            compare_cell_values(&CellValue::Integer(1), &CellValue::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            compare_cell_values(&CellValue::Integer(2), &CellValue::Integer(2)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        assert_eq!(
            compare_cell_values(&CellValue::Integer(10), &CellValue::Float(9.5)),
            Ordering::Greater
        );
        assert_eq!(
            compare_cell_values(&CellValue::Float(2.0), &CellValue::Integer(2)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numbers_do_not_compare_as_text() {
        // "1000" < "500" as text, but not as numbers
        assert_eq!(
            compare_cell_values(&CellValue::Integer(1000), &CellValue::Integer(500)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_date_comparison() {
        let jan = CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let feb = CellValue::DateTime(
            NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        assert_eq!(compare_cell_values(&jan, &feb), Ordering::Less);
    }

    #[test]
    fn test_string_comparison_is_case_sensitive() {
        assert_eq!(
            compare_cell_values(&CellValue::from("Zé"), &CellValue::from("ana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_kinds_order_by_kind() {
        let nine = CellValue::Integer(9);
        let ten = CellValue::Integer(10);
        let text = CellValue::from("5a");
        assert_eq!(compare_cell_values(&nine, &ten), Ordering::Less);
        assert_eq!(compare_cell_values(&ten, &text), Ordering::Less);
        assert_eq!(compare_cell_values(&nine, &text), Ordering::Less);
        assert_eq!(
            compare_cell_values(&CellValue::Boolean(true), &CellValue::Integer(0)),
            Ordering::Less
        );
        assert_eq!(
            compare_cell_values(
                &CellValue::from("zz"),
                &CellValue::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            ),
            Ordering::Less
        );
    }

    #[test]
    fn test_nan_is_totally_ordered() {
        let nan = CellValue::Float(f64::NAN);
        let one = CellValue::Float(1.0);
        assert_eq!(compare_cell_values(&one, &nan), Ordering::Less);
        assert_eq!(compare_cell_values(&nan, &one), Ordering::Greater);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let null = CellValue::Null;
        let one = CellValue::Integer(1);
        assert_eq!(compare_nulls_last(&null, &one, true), Ordering::Greater);
        assert_eq!(compare_nulls_last(&null, &one, false), Ordering::Greater);
        assert_eq!(compare_nulls_last(&one, &null, false), Ordering::Less);
        assert_eq!(compare_nulls_last(&null, &null, false), Ordering::Equal);
    }
}

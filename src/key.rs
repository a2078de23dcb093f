use std::cmp::Ordering;

use crate::key_mode::KeyMode;
use crate::record::Record;

/// Order two records by primary key under `mode`.
///
/// Ids compare numerically, text fields compare byte-wise.
pub fn compare_key(a: &Record, b: &Record, mode: KeyMode) -> Ordering {
    let ordering = a.id().cmp(&b.id());
    if ordering != Ordering::Equal {
        return ordering;
    }

    match mode {
        KeyMode::Id => Ordering::Equal,
        KeyMode::IdA => {
            a.field_a().as_bytes().cmp(b.field_a().as_bytes())
        }
        KeyMode::IdAB => {
            a.field_a().as_bytes().cmp(b.field_a().as_bytes())
                .then_with(|| a.field_b().as_bytes().cmp(b.field_b().as_bytes()))
        }
        KeyMode::IdBA => {
            a.field_b().as_bytes().cmp(b.field_b().as_bytes())
                .then_with(|| a.field_a().as_bytes().cmp(b.field_a().as_bytes()))
        }
    }
}

/// Order by primary key, then by `updated_at` ascending.
pub fn compare_sort(a: &Record, b: &Record, mode: KeyMode) -> Ordering {
    compare_key(a, b, mode)
        .then_with(|| a.updated_at().as_bytes().cmp(b.updated_at().as_bytes()))
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::key::{compare_key, compare_sort};
    use crate::key_mode::KeyMode;
    use crate::record::Record;

    #[test]
    fn test_id_compares_numerically() {
        let a = Record::new(9, "z", "z", "t");
        let b = Record::new(10, "a", "a", "t");
        for mode in [KeyMode::Id, KeyMode::IdA, KeyMode::IdAB, KeyMode::IdBA] {
            assert_eq!(compare_key(&a, &b, mode), Ordering::Less);
            assert_eq!(compare_key(&b, &a, mode), Ordering::Greater);
        }
    }

    #[test]
    fn test_extreme_ids_do_not_overflow() {
        let min = Record::new(i64::MIN, "", "", "");
        let max = Record::new(i64::MAX, "", "", "");
        assert_eq!(compare_key(&min, &max, KeyMode::Id), Ordering::Less);
        assert_eq!(compare_key(&max, &min, KeyMode::Id), Ordering::Greater);

        let low = Record::new(-2_000_000_000, "", "", "");
        let high = Record::new(2_000_000_000, "", "", "");
        assert_eq!(compare_key(&low, &high, KeyMode::Id), Ordering::Less);
    }

    #[test]
    fn test_id_mode_ignores_fields() {
        let a = Record::new(1, "x", "y", "t1");
        let b = Record::new(1, "x", "z", "t2");
        assert_eq!(compare_key(&a, &b, KeyMode::Id), Ordering::Equal);
        assert_eq!(compare_key(&a, &b, KeyMode::IdA), Ordering::Equal);
        assert_eq!(compare_key(&a, &b, KeyMode::IdAB), Ordering::Less);
    }

    #[test]
    fn test_field_precedence() {
        let a = Record::new(1, "a", "z", "");
        let b = Record::new(1, "b", "y", "");
        assert_eq!(compare_key(&a, &b, KeyMode::IdA), Ordering::Less);
        assert_eq!(compare_key(&a, &b, KeyMode::IdAB), Ordering::Less);
        assert_eq!(compare_key(&a, &b, KeyMode::IdBA), Ordering::Greater);
    }

    #[test]
    fn test_byte_order_not_locale() {
        let upper = Record::new(1, "B", "", "");
        let lower = Record::new(1, "a", "", "");
        assert_eq!(compare_key(&upper, &lower, KeyMode::IdA), Ordering::Less);
    }

    #[test]
    fn test_sort_breaks_ties_by_updated_at_ascending() {
        let older = Record::new(1, "x", "y", "2020-01-01");
        let newer = Record::new(1, "x", "y", "2020-06-01");
        assert_eq!(compare_sort(&older, &newer, KeyMode::IdAB), Ordering::Less);
        assert_eq!(compare_sort(&newer, &older, KeyMode::IdAB), Ordering::Greater);
        assert_eq!(compare_sort(&older, &older.clone(), KeyMode::IdAB), Ordering::Equal);
    }
}

//! Greedy area fitting.
//!
//! Given a target area and the ranked table, [`fit`] walks the table from the
//! largest country down and keeps every country that still leaves the running
//! total strictly below the target. A country that does not fit is skipped,
//! not treated as the end of the search, since smaller ones further down may
//! still fit.

use crate::models::CountryAreaTable;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitResult {
    pub matched_countries: Vec<String>,
    pub total_area: f64,
    pub count_of_matches: usize,
    /// Target area minus `total_area`
    pub remainder: f64,
}

/// How many times one area fits into another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRatio {
    pub times: f64,
    pub whole_times: u64,
}

/// Fill `target` with countries from `table`, largest first.
///
/// `exclude` is the position of the target country itself and is never
/// considered. The table is only read.
pub fn fit(target: f64, table: &CountryAreaTable, exclude: Option<usize>) -> FitResult {
    let mut matched_countries = Vec::new();
    let mut total_area = 0.0;

    for (index, entry) in table.iter().enumerate() {
        if Some(index) == exclude {
            continue;
        }
        // Exact fit, nothing more can be added
        if total_area == target {
            break;
        }
        if total_area + entry.area < target {
            total_area += entry.area;
            matched_countries.push(entry.name.clone());
        }
    }

    FitResult {
        count_of_matches: matched_countries.len(),
        matched_countries,
        total_area,
        remainder: target - total_area,
    }
}

/// How many times `contained` fits into `container`.
/// Returns `None` when `contained` has no positive area.
pub fn times_fits(container: f64, contained: f64) -> Option<FitRatio> {
    if contained.is_nan() || contained <= 0.0 || !container.is_finite() {
        return None;
    }
    let times = container / contained;
    Some(FitRatio {
        times,
        whole_times: times.max(0.0).floor() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryArea;

    fn table(rows: &[(&str, f64)]) -> CountryAreaTable {
        CountryAreaTable::new(
            rows.iter()
                .map(|(name, area)| CountryArea::new(*name, *area))
                .collect(),
        )
        .expect("valid table")
    }

    fn world() -> CountryAreaTable {
        table(&[
            ("Russia", 17_098_242.0),
            ("Antarctica", 14_200_000.0),
            ("Canada", 9_984_670.0),
            ("United States", 9_833_517.0),
            ("China", 9_596_960.0),
            ("Brazil", 8_515_770.0),
            ("Australia", 7_741_220.0),
            ("India", 3_287_263.0),
            ("Argentina", 2_780_400.0),
            ("Kazakhstan", 2_724_900.0),
            ("Mexico", 1_964_375.0),
            ("France", 643_801.0),
            ("Germany", 357_022.0),
            ("Italy", 301_340.0),
            ("Belgium", 30_528.0),
            ("Monaco", 2.0),
            ("Holy See (Vatican City)", 0.0),
        ])
    }

    #[test]
    fn test_fit_skips_entry_that_overflows() {
        let t = table(&[
            ("Russia", 17_000_000.0),
            ("Canada", 9_985_000.0),
            ("USA", 9_834_000.0),
        ]);
        let result = fit(17_000_000.0, &t, Some(0));

        assert_eq!(result.matched_countries, vec!["Canada"]);
        assert_eq!(result.total_area, 9_985_000.0);
        assert_eq!(result.count_of_matches, 1);
        assert_eq!(result.remainder, 7_015_000.0);
    }

    #[test]
    fn test_fit_continues_past_skipped_entries() {
        let t = table(&[
            ("Big", 100.0),
            ("Large", 60.0),
            ("Medium", 50.0),
            ("Small", 30.0),
            ("Tiny", 5.0),
        ]);
        let result = fit(100.0, &t, Some(0));

        // 60 fits, 50 would overflow, 30 fits, 5 would reach 95 < 100
        assert_eq!(result.matched_countries, vec!["Large", "Small", "Tiny"]);
        assert_eq!(result.total_area, 95.0);
        assert_eq!(result.remainder, 5.0);
    }

    #[test]
    fn test_fit_zero_target() {
        let result = fit(0.0, &world(), None);
        assert!(result.matched_countries.is_empty());
        assert_eq!(result.total_area, 0.0);
        assert_eq!(result.count_of_matches, 0);
        assert_eq!(result.remainder, 0.0);
    }

    #[test]
    fn test_fit_negative_target() {
        let result = fit(-10.0, &world(), None);
        assert!(result.matched_countries.is_empty());
        assert_eq!(result.total_area, 0.0);
        assert_eq!(result.remainder, -10.0);
    }

    #[test]
    fn test_fit_stops_once_total_equals_target() {
        // With a zero target the running total already equals it, so even the
        // zero-area entry is not taken
        let t = table(&[("Monaco", 2.0), ("Holy See (Vatican City)", 0.0)]);
        let result = fit(0.0, &t, None);
        assert!(result.matched_countries.is_empty());
    }

    #[test]
    fn test_fit_empty_table() {
        let result = fit(1_000.0, &CountryAreaTable::default(), None);
        assert_eq!(
            result,
            FitResult {
                matched_countries: vec![],
                total_area: 0.0,
                count_of_matches: 0,
                remainder: 1_000.0,
            }
        );
    }

    #[test]
    fn test_fit_equal_areas_keep_table_order() {
        let t = table(&[("First", 10.0), ("Second", 10.0), ("Third", 10.0)]);
        let result = fit(25.0, &t, None);
        assert_eq!(result.matched_countries, vec!["First", "Second"]);
    }

    #[test]
    fn test_fit_never_includes_excluded_or_exceeds_target() {
        let t = world();
        for (index, entry) in t.iter().enumerate() {
            let result = fit(entry.area, &t, Some(index));
            assert!(!result.matched_countries.contains(&entry.name));
            assert!(result.total_area <= entry.area);
            assert_eq!(result.count_of_matches, result.matched_countries.len());
            assert_eq!(result.remainder, entry.area - result.total_area);
        }
    }

    #[test]
    fn test_fit_is_idempotent_and_does_not_mutate() {
        let t = world();
        let before = t.clone();
        let first = fit(12_345_678.0, &t, Some(2));
        let second = fit(12_345_678.0, &t, Some(2));
        assert_eq!(first, second);
        assert_eq!(t, before);
    }

    #[test]
    fn test_fit_total_is_monotonic_in_target() {
        let t = world();
        let mut previous_total = 0.0;
        let mut target = 0.0;
        while target < 40_000_000.0 {
            let result = fit(target, &t, Some(0));
            assert!(
                result.total_area >= previous_total,
                "total dropped at target {}",
                target
            );
            previous_total = result.total_area;
            target += 97_531.0;
        }
    }

    #[test]
    fn test_times_fits() {
        let ratio = times_fits(17_098_242.0, 357_022.0).expect("positive area");
        assert_eq!(ratio.whole_times, 47);
        assert!((ratio.times - 47.891).abs() < 0.001);

        let ratio = times_fits(2.0, 357_022.0).expect("positive area");
        assert_eq!(ratio.whole_times, 0);

        assert_eq!(times_fits(100.0, 0.0), None);
        assert_eq!(times_fits(100.0, -1.0), None);
    }
}

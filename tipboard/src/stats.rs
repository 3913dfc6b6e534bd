//! Summary statistics over a filtered view.
//!
//! Pure functions; none of them caches anything or errors on an empty view.
//! Empty inputs produce sentinel values (0, 0.0, `None`) so renderers need
//! no error handling of their own.

use crate::data::{Day, Sex};
use crate::view::FilteredView;

pub fn record_count(view: &FilteredView) -> usize {
    view.len()
}

/// Sum of total_bill over the view, 0.0 when empty.
pub fn total_bill_sum(view: &FilteredView) -> f64 {
    view.iter().map(|r| r.total_bill).sum()
}

/// Mean of tip/total_bill over the view, as a percentage.
///
/// Rows with a zero bill are excluded from the mean rather than divided by.
/// `None` when no row contributes, which renderers display as "N/A".
pub fn average_tip_percent(view: &FilteredView) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in view.iter() {
        if row.total_bill != 0.0 {
            sum += row.tip / row.total_bill;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64 * 100.0)
    }
}

/// Mean tip per day, in canonical day order, omitting absent days.
pub fn average_tip_by_day(view: &FilteredView) -> Vec<(Day, f64)> {
    Day::CANONICAL
        .iter()
        .filter_map(|&day| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for row in view.iter().filter(|r| r.day == day) {
                sum += row.tip;
                count += 1;
            }
            (count > 0).then(|| (day, sum / count as f64))
        })
        .collect()
}

/// Tip sequences grouped by sex, in view order, omitting empty groups.
/// Feeds chart producers; no further aggregation happens here.
pub fn tips_by_sex(view: &FilteredView) -> Vec<(Sex, Vec<f64>)> {
    [Sex::Male, Sex::Female]
        .iter()
        .filter_map(|&sex| {
            let tips: Vec<f64> = view
                .iter()
                .filter(|r| r.sex == sex)
                .map(|r| r.tip)
                .collect();
            (!tips.is_empty()).then(|| (sex, tips))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Mealtime, Record, Smoker};
    use crate::filter::FilterState;

    fn record(total_bill: f64, tip: f64, sex: Sex, day: Day) -> Record {
        Record {
            total_bill,
            tip,
            sex,
            smoker: Smoker::No,
            day,
            time: Mealtime::Dinner,
            size: 2,
        }
    }

    fn view_of(rows: Vec<Record>) -> FilteredView {
        let dataset = Dataset::from_records(rows).unwrap();
        let filter = FilterState::for_bounds(dataset.bill_bounds());
        FilteredView::derive(&dataset, &filter, 0)
    }

    fn empty_view() -> FilteredView {
        let dataset = Dataset::from_records(vec![record(10.0, 1.0, Sex::Male, Day::Sun)]).unwrap();
        let mut filter = FilterState::for_bounds(dataset.bill_bounds());
        filter.day = Some(Day::Fri);
        FilteredView::derive(&dataset, &filter, 0)
    }

    #[test]
    fn empty_view_produces_sentinels() {
        let view = empty_view();
        assert_eq!(record_count(&view), 0);
        assert_eq!(total_bill_sum(&view), 0.0);
        assert_eq!(average_tip_percent(&view), None);
        assert!(average_tip_by_day(&view).is_empty());
        assert!(tips_by_sex(&view).is_empty());
    }

    #[test]
    fn zero_bill_rows_do_not_divide_by_zero() {
        let view = view_of(vec![
            record(0.0, 1.0, Sex::Male, Day::Sun),
            record(10.0, 2.0, Sex::Male, Day::Sun),
        ]);
        let percent = average_tip_percent(&view).unwrap();
        assert!((percent - 20.0).abs() < 1e-9);

        let all_zero = view_of(vec![record(0.0, 1.0, Sex::Male, Day::Sun)]);
        assert_eq!(average_tip_percent(&all_zero), None);
    }

    #[test]
    fn tip_average_groups_in_canonical_day_order() {
        // Insertion order deliberately scrambled relative to Thur..Sun.
        let view = view_of(vec![
            record(10.0, 4.0, Sex::Male, Day::Sun),
            record(10.0, 2.0, Sex::Male, Day::Thur),
            record(10.0, 3.0, Sex::Female, Day::Sun),
            record(10.0, 1.0, Sex::Female, Day::Fri),
        ]);
        let grouped = average_tip_by_day(&view);
        let days: Vec<Day> = grouped.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![Day::Thur, Day::Fri, Day::Sun]);

        let sun = grouped.iter().find(|(d, _)| *d == Day::Sun).unwrap().1;
        assert!((sun - 3.5).abs() < 1e-9);
    }

    #[test]
    fn tips_by_sex_preserves_view_order() {
        let view = view_of(vec![
            record(10.0, 1.0, Sex::Female, Day::Sun),
            record(10.0, 2.0, Sex::Male, Day::Sun),
            record(10.0, 3.0, Sex::Female, Day::Sun),
        ]);
        let grouped = tips_by_sex(&view);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, Sex::Male);
        assert_eq!(grouped[0].1, vec![2.0]);
        assert_eq!(grouped[1].0, Sex::Female);
        assert_eq!(grouped[1].1, vec![1.0, 3.0]);
    }

    #[test]
    fn count_matches_view_length() {
        let view = view_of(vec![
            record(10.0, 1.0, Sex::Male, Day::Sat),
            record(12.0, 1.5, Sex::Male, Day::Sat),
        ]);
        assert_eq!(record_count(&view), view.len());
        assert_eq!(total_bill_sum(&view), 22.0);
    }
}

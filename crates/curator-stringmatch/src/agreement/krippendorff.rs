//! Krippendorff's alpha for unitizing (alpha-u).
//!
//! For each category every rater's continuum is cut into segments: units of
//! that category and the gaps between them. Observed disagreement compares
//! segments across rater pairs; expected disagreement comes from all
//! segment lengths. Per-category disagreements are summed before taking
//! `1 - Do / De`.

use super::study::UnitizingStudy;

#[derive(Debug, Clone, Copy)]
struct Segment {
    begin: f64,
    length: f64,
    is_unit: bool,
}

/// Agreement of the study, in `(-inf, 1]`. Returns 0 when no disagreement can
/// be expected (for instance when nothing was annotated).
pub fn alpha_unitizing(study: &UnitizingStudy) -> f64 {
    let mut observed = 0.0;
    let mut expected = 0.0;
    for category in study.categories() {
        let segments = segments_per_rater(study, category);
        observed += observed_disagreement(study, &segments);
        expected += expected_disagreement(study, &segments);
    }
    if expected <= 0.0 {
        return 0.0;
    }
    1.0 - observed / expected
}

fn segments_per_rater(study: &UnitizingStudy, category: &str) -> Vec<Vec<Segment>> {
    let length = study.continuum_length();
    (0..study.rater_count())
        .map(|rater| {
            let mut units: Vec<(usize, usize)> = study
                .units()
                .iter()
                .filter(|u| u.rater == rater && u.category == category)
                .map(|u| (u.offset, u.length))
                .collect();
            units.sort_unstable();

            let mut segments = Vec::with_capacity(units.len() * 2 + 1);
            let mut cursor = 0;
            for (offset, len) in units {
                if offset > cursor {
                    segments.push(Segment {
                        begin: cursor as f64,
                        length: (offset - cursor) as f64,
                        is_unit: false,
                    });
                }
                segments.push(Segment {
                    begin: offset as f64,
                    length: len as f64,
                    is_unit: true,
                });
                cursor = cursor.max(offset + len);
            }
            if cursor < length {
                segments.push(Segment {
                    begin: cursor as f64,
                    length: (length - cursor) as f64,
                    is_unit: false,
                });
            }
            segments
        })
        .collect()
}

/// Squared distance between segment `g` of one rater and `h` of another.
fn distance(g: &Segment, h: &Segment) -> f64 {
    let shift = g.begin - h.begin;
    match (g.is_unit, h.is_unit) {
        (true, true) if -g.length < shift && shift < h.length => {
            let end_shift = (g.begin + g.length) - (h.begin + h.length);
            shift * shift + end_shift * end_shift
        }
        // Unit of one rater lies inside a gap of the other.
        (true, false) if h.length - g.length >= shift && shift >= 0.0 => g.length * g.length,
        (false, true) if g.length - h.length >= -shift && -shift >= 0.0 => h.length * h.length,
        _ => 0.0,
    }
}

fn observed_disagreement(study: &UnitizingStudy, segments: &[Vec<Segment>]) -> f64 {
    let m = study.rater_count() as f64;
    let l = study.continuum_length() as f64;
    if m < 2.0 || l <= 0.0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, own) in segments.iter().enumerate() {
        for (j, other) in segments.iter().enumerate() {
            if i == j {
                continue;
            }
            for g in own {
                for h in other {
                    sum += distance(g, h);
                }
            }
        }
    }
    sum / (m * (m - 1.0) * l * l)
}

fn expected_disagreement(study: &UnitizingStudy, segments: &[Vec<Segment>]) -> f64 {
    let m = study.rater_count() as f64;
    let l = study.continuum_length() as f64;
    let ml = m * l;
    if ml <= 1.0 {
        return 0.0;
    }

    let all: Vec<&Segment> = segments.iter().flatten().collect();
    let units: Vec<&Segment> = all.iter().copied().filter(|s| s.is_unit).collect();
    let gaps: Vec<&Segment> = all.iter().copied().filter(|s| !s.is_unit).collect();
    let unit_count = units.len() as f64;

    let mut numerator = 0.0;
    let mut unit_pairs = 0.0;
    for unit in &units {
        let len = unit.length;
        let within = (unit_count - 1.0) / 3.0 * (2.0 * len.powi(3) - 3.0 * len.powi(2) + len);
        let fitting_gaps: f64 = gaps
            .iter()
            .filter(|gap| gap.length >= len)
            .map(|gap| gap.length - len + 1.0)
            .sum();
        numerator += within + len * len * fitting_gaps;
        unit_pairs += len * (len - 1.0);
    }

    let denominator = ml * (ml - 1.0) - unit_pairs;
    if denominator <= 0.0 {
        return 0.0;
    }
    (2.0 / ml) * numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_annotations_agree_perfectly() {
        let mut study = UnitizingStudy::new(2, 20);
        for rater in 0..2 {
            study.add_unit(0, 5, rater, "LOC");
            study.add_unit(10, 4, rater, "PER");
        }
        assert!((alpha_unitizing(&study) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_annotations_disagree_below_zero() {
        let mut study = UnitizingStudy::new(2, 10);
        study.add_unit(0, 5, 0, "LOC");
        study.add_unit(5, 5, 1, "LOC");
        let alpha = alpha_unitizing(&study);
        assert!(alpha < 0.0, "alpha was {alpha}");
    }

    #[test]
    fn partial_overlap_is_between() {
        let mut study = UnitizingStudy::new(2, 40);
        study.add_unit(0, 5, 0, "LOC");
        study.add_unit(20, 6, 0, "LOC");
        study.add_unit(1, 5, 1, "LOC");
        study.add_unit(20, 6, 1, "LOC");
        let alpha = alpha_unitizing(&study);
        assert!(alpha > 0.0 && alpha < 1.0, "alpha was {alpha}");
    }

    #[test]
    fn empty_study_scores_zero() {
        let study = UnitizingStudy::new(2, 10);
        assert_eq!(alpha_unitizing(&study), 0.0);
    }

    #[test]
    fn unit_in_gap_distance_is_squared_length() {
        let unit = Segment { begin: 2.0, length: 3.0, is_unit: true };
        let gap = Segment { begin: 0.0, length: 10.0, is_unit: false };
        assert_eq!(distance(&unit, &gap), 9.0);
        assert_eq!(distance(&gap, &unit), 9.0);
    }
}

use crate::attendance::{AttendanceReport, GROUP_SIZE};

const HEADER_PAIR: &str = "\"Roll No.\",\"Status\"";
const EMPTY_PAIR: &str = ",";

/// Renders the report as side-by-side `Roll No.`/`Status` column pairs, one
/// pair per group. There are always `GROUP_SIZE` data rows; groups that run
/// out of students get an empty pair.
pub fn to_csv(report: &AttendanceReport) -> String {
    let mut out = String::new();

    let header: Vec<&str> = report.groups.iter().map(|_| HEADER_PAIR).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in 0..GROUP_SIZE as usize {
        let cells: Vec<String> = report
            .groups
            .iter()
            .map(|group| match group.entries.get(row) {
                Some(entry) => format!("\"{}\",\"{}\"", entry.roll, entry.status.label()),
                None => EMPTY_PAIR.to_string(),
            })
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::AttendanceState;
    use pretty_assertions::assert_eq;

    fn report(class_size: i64, present: &[u32]) -> AttendanceReport {
        let mut s = AttendanceState::initialize(class_size).expect("size");
        s.set_present(present.iter().copied());
        s.derive_report()
    }

    #[test]
    fn twenty_five_students_two_column_groups() {
        let csv = to_csv(&report(25, &[1, 25]));
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "\"Roll No.\",\"Status\",\"Roll No.\",\"Status\"");
        assert_eq!(lines[1], "\"1\",\"Present\",\"21\",\"Absent\"");
        assert_eq!(lines[5], "\"5\",\"Absent\",\"25\",\"Present\"");
        for (i, line) in lines.iter().enumerate().skip(6) {
            assert_eq!(*line, format!("\"{}\",\"Absent\",,", i));
        }
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn small_class_still_emits_twenty_rows() {
        let csv = to_csv(&report(3, &[2]));
        let expected = format!(
            "\"Roll No.\",\"Status\"\n\"1\",\"Absent\"\n\"2\",\"Present\"\n\"3\",\"Absent\"\n{}",
            ",\n".repeat(17)
        );
        assert_eq!(csv, expected);
    }
}

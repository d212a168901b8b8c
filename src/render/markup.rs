use crate::attendance::{AttendanceReport, Status};

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Present => "Present ✓",
        Status::Absent => "Absent ✗",
    }
}

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Present => "present",
        Status::Absent => "absent",
    }
}

fn stat_card(out: &mut String, value: &str, class: &str, label: &str) {
    out.push_str("<div class=\"stat-card\">");
    out.push_str(&format!("<div class=\"stat-number {class}\">{value}</div>"));
    out.push_str(&format!("<div class=\"stat-label\">{label}</div>"));
    out.push_str("</div>");
}

/// HTML fragment for the results screen: three stat cards, then one column
/// per group of roll numbers.
pub fn to_markup(report: &AttendanceReport) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"stats\">");
    let present = report.present_count.to_string();
    let absent = report.absent_count.to_string();
    stat_card(&mut out, &present, "present", "Present");
    stat_card(&mut out, &absent, "absent", "Absent");
    stat_card(
        &mut out,
        &format!("{}%", report.percentage_label()),
        "total",
        "Attendance",
    );
    out.push_str("</div>");

    out.push_str("<div class=\"attendance-list\">");
    for group in &report.groups {
        out.push_str("<div class=\"attendance-column\">");
        out.push_str(&format!(
            "<div class=\"column-header\">Roll No. {} - {}</div>",
            group.first, group.last
        ));
        for entry in &group.entries {
            let class = status_class(entry.status);
            let status = status_text(entry.status);
            out.push_str(&format!("<div class=\"student-item {class}\">"));
            let roll = entry.roll;
            out.push_str(&format!("<div class=\"roll-number\">Roll No. {roll}</div>"));
            out.push_str(&format!("<div class=\"status {class}\">{status}</div>"));
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");

    out
}

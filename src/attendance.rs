use serde::Serialize;
use std::collections::BTreeSet;

/// Roll numbers per display/export column.
pub const GROUP_SIZE: u32 = 20;

/// Half-up 1-decimal rounding: `Int(10*x + 0.5) / 10`.
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Present,
    Absent,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
        }
    }

    pub fn is_present(self) -> bool {
        self == Status::Present
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollEntry {
    pub roll: u32,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollGroup {
    pub first: u32,
    pub last: u32,
    pub entries: Vec<RollEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub class_size: u32,
    pub present: Vec<u32>,
    pub absent: Vec<u32>,
    pub present_count: u32,
    pub absent_count: u32,
    pub attendance_percentage: f64,
    pub groups: Vec<RollGroup>,
}

impl AttendanceReport {
    /// Percentage as shown to the operator, always with one decimal (`"40.0"`).
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.attendance_percentage)
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceState {
    class_size: u32,
    present: BTreeSet<u32>,
    recorded: bool,
}

impl AttendanceState {
    pub fn initialize(class_size: i64) -> Result<Self, InvalidSize> {
        let class_size = u32::try_from(class_size).map_err(|_| InvalidSize)?;
        if class_size < 1 {
            return Err(InvalidSize);
        }
        Ok(Self {
            class_size,
            present: BTreeSet::new(),
            recorded: false,
        })
    }

    pub fn class_size(&self) -> u32 {
        self.class_size
    }

    /// True once attendance has been recorded at least once.
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub fn all_roll_numbers(&self) -> impl Iterator<Item = u32> {
        1..=self.class_size
    }

    /// Replaces the present set. Callers pass roll numbers already filtered
    /// to `1..=class_size`.
    pub fn set_present<I>(&mut self, roll_numbers: I)
    where
        I: IntoIterator<Item = u32>,
    {
        let present: BTreeSet<u32> = roll_numbers.into_iter().collect();
        debug_assert!(present.iter().all(|r| (1..=self.class_size).contains(r)));
        self.present = present;
        self.recorded = true;
    }

    pub fn is_present(&self, roll: u32) -> bool {
        self.present.contains(&roll)
    }

    /// Present roll numbers as the edit field shows them: `"1, 4, 9"`.
    pub fn present_csv_text(&self) -> String {
        self.present
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn derive_report(&self) -> AttendanceReport {
        let mut present = Vec::new();
        let mut absent = Vec::new();
        let mut groups: Vec<RollGroup> = Vec::new();

        for roll in self.all_roll_numbers() {
            let status = if self.is_present(roll) {
                present.push(roll);
                Status::Present
            } else {
                absent.push(roll);
                Status::Absent
            };
            if (roll - 1) % GROUP_SIZE == 0 {
                groups.push(RollGroup {
                    first: roll,
                    last: (roll + GROUP_SIZE - 1).min(self.class_size),
                    entries: Vec::with_capacity(GROUP_SIZE as usize),
                });
            }
            if let Some(group) = groups.last_mut() {
                group.entries.push(RollEntry { roll, status });
            }
        }

        let present_count = present.len() as u32;
        let absent_count = self.class_size - present_count;
        let ratio = f64::from(present_count) / f64::from(self.class_size);
        let attendance_percentage = round_off_1_decimal(ratio * 100.0);

        AttendanceReport {
            class_size: self.class_size,
            present,
            absent,
            present_count,
            absent_count,
            attendance_percentage,
            groups,
        }
    }
}

use chrono::NaiveDateTime;
use log::{info, warn};
use std::fmt;
use std::path::Path;

use crate::attendance::{AttendanceReport, AttendanceState};
use crate::error::SessionError;
use crate::export::{self, ExportedFile};
use crate::notice::{Notice, Notifier};
use crate::render::{self, ImageLayout};
use crate::roster::{self, ParseResult};

/// Which input screen is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Recording,
    Report { editing: bool },
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Setup => "setup",
            Stage::Recording => "recording",
            Stage::Report { .. } => "report",
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Stage::Report { editing: true })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Setup => "entering class size",
            Stage::Recording => "entering present roll numbers",
            Stage::Report { editing: false } => "viewing the report",
            Stage::Report { editing: true } => "editing attendance",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ClassSize,
    RollNumbers,
    EditRollNumbers,
}

impl Field {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classSize" => Some(Field::ClassSize),
            "rollNumbers" => Some(Field::RollNumbers),
            "editRollNumbers" => Some(Field::EditRollNumbers),
            _ => None,
        }
    }
}

/// Owns the one attendance session and sequences
/// setup -> recording -> report -> (edit -> report)*.
#[derive(Debug)]
pub struct SessionController {
    max_class_size: u32,
    stage: Stage,
    attendance: Option<AttendanceState>,
    notices: Notifier,
}

impl SessionController {
    pub fn new(max_class_size: u32) -> Self {
        SessionController {
            max_class_size,
            stage: Stage::Setup,
            attendance: None,
            notices: Notifier::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn class_size(&self) -> Option<u32> {
        self.attendance.as_ref().map(AttendanceState::class_size)
    }

    pub fn attendance(&self) -> Option<&AttendanceState> {
        self.attendance.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    fn reject(&mut self, error: SessionError) -> SessionError {
        warn!("rejected: {error}");
        self.notices.error(error.to_string());
        error
    }

    fn require_stage(&mut self, action: &'static str, ok: bool) -> Result<(), SessionError> {
        if ok {
            return Ok(());
        }
        let stage = self.stage;
        Err(self.reject(SessionError::WrongStage { action, stage }))
    }

    /// Runs `f` against the session once attendance has been recorded.
    fn with_recorded<T>(
        &mut self,
        f: impl FnOnce(&AttendanceState) -> T,
    ) -> Result<T, SessionError> {
        match self.attendance.as_ref().filter(|a| a.is_recorded()).map(f) {
            Some(v) => Ok(v),
            None => Err(self.reject(SessionError::ExportWithoutData)),
        }
    }

    fn parse_present(&mut self, text: &str) -> Result<Vec<u32>, SessionError> {
        let class_size = self.class_size().unwrap_or(0);
        if text.trim().is_empty() {
            return Err(self.reject(SessionError::EmptyRollNumberInput));
        }
        match roster::parse(text, class_size) {
            ParseResult::Ok(rolls) => Ok(rolls),
            ParseResult::Invalid(tokens) => {
                Err(self.reject(SessionError::InvalidRollNumberTokens(tokens)))
            }
        }
    }

    /// Fixes the class size and moves to roll-number entry.
    pub fn start(&mut self, raw_class_size: &str) -> Result<u32, SessionError> {
        self.require_stage("start", self.stage == Stage::Setup)?;

        let size = roster::parse_class_size(raw_class_size, self.max_class_size)
            .map_err(|e| self.reject(e.into()))?;
        let state = AttendanceState::initialize(i64::from(size))
            .map_err(|_| self.reject(SessionError::MissingOrInvalidClassSize))?;

        self.attendance = Some(state);
        self.stage = Stage::Recording;
        info!("class size set to {size}");
        self.notices.success(format!(
            "Class strength set to {size} students. Now enter roll numbers of present students."
        ));
        Ok(size)
    }

    pub fn record(&mut self, text: &str) -> Result<AttendanceReport, SessionError> {
        self.require_stage("record attendance", self.stage == Stage::Recording)?;
        let rolls = self.parse_present(text)?;
        let report = self.commit("record attendance", rolls)?;
        self.stage = Stage::Report { editing: false };
        Ok(report)
    }

    /// Opens the edit screen and returns the text to prefill it with.
    pub fn begin_edit(&mut self) -> Result<String, SessionError> {
        self.require_stage("edit", matches!(self.stage, Stage::Report { .. }))?;
        let prefill = self.with_recorded(AttendanceState::present_csv_text)?;
        self.stage = Stage::Report { editing: true };
        Ok(prefill)
    }

    pub fn save_edit(&mut self, text: &str) -> Result<AttendanceReport, SessionError> {
        self.require_stage("save changes", self.stage.is_editing())?;
        let rolls = self.parse_present(text)?;
        let report = self.commit("save changes", rolls)?;
        self.stage = Stage::Report { editing: false };
        self.notices.success("Attendance updated successfully!");
        Ok(report)
    }

    fn commit(
        &mut self,
        action: &'static str,
        rolls: Vec<u32>,
    ) -> Result<AttendanceReport, SessionError> {
        let Some(state) = self.attendance.as_mut() else {
            let stage = self.stage;
            return Err(self.reject(SessionError::WrongStage { action, stage }));
        };
        state.set_present(rolls);
        let report = state.derive_report();
        info!(
            "attendance recorded: {}/{} present ({}%)",
            report.present_count,
            report.class_size,
            report.percentage_label()
        );
        Ok(report)
    }

    pub fn report(&mut self) -> Result<AttendanceReport, SessionError> {
        self.require_stage("view report", matches!(self.stage, Stage::Report { .. }))?;
        self.with_recorded(AttendanceState::derive_report)
    }

    pub fn export_image(
        &mut self,
        out_dir: &Path,
        now: NaiveDateTime,
    ) -> Result<(ExportedFile, ImageLayout), SessionError> {
        let report = self.with_recorded(AttendanceState::derive_report)?;
        let layout = ImageLayout::for_report(&report);
        let file_name = render::image_file_name(now.date());
        let written = render::to_png(&report, now)
            .and_then(|bytes| export::write_export(out_dir, &file_name, &bytes))
            .map_err(|e| self.reject(SessionError::Export(e)))?;
        self.notices.success("Attendance downloaded successfully!");
        Ok((written, layout))
    }

    pub fn export_csv(
        &mut self,
        out_dir: &Path,
        now: NaiveDateTime,
    ) -> Result<(ExportedFile, String), SessionError> {
        let report = self.with_recorded(AttendanceState::derive_report)?;
        let file_name = render::csv_file_name(now.date());
        let content = render::to_csv(&report);
        let written = export::write_export(out_dir, &file_name, content.as_bytes())
            .map_err(|e| self.reject(SessionError::Export(e)))?;
        self.notices.success(format!(
            "Attendance data downloaded as {file_name}! \
             You can set the colors in your spreadsheet app."
        ));
        Ok((written, content))
    }

    /// Any edit to a text input clears the notification.
    pub fn input_changed(&mut self, _field: Field) {
        self.notices.clear();
    }

    /// Enter in the class-size field acts as `start`. Other keys do nothing.
    pub fn key_press(
        &mut self,
        field: Field,
        key: &str,
        value: &str,
    ) -> Result<Option<u32>, SessionError> {
        if field == Field::ClassSize && key == "Enter" {
            return self.start(value).map(Some);
        }
        Ok(None)
    }
}

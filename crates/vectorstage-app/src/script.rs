//! Editing scripts: recorded pointer input and toolbar actions.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vectorstage_core::{AlignBase, EditAction, MouseEventKind, ShapeTool};

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Pointer input in page coordinates.
    Pointer { kind: MouseEventKind, x: f64, y: f64 },
    /// A toolbar action.
    Edit { edit: EditAction },
    /// Advance animated layers by one frame.
    Tick,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> AppResult<Self> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Drag events are synthesized by the stage and cannot be fed in.
    pub fn validate(&self) -> AppResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if let Step::Pointer { kind, .. } = step {
                if matches!(
                    kind,
                    MouseEventKind::DragStart | MouseEventKind::Drag | MouseEventKind::DragEnd
                ) {
                    return Err(AppError::Script(format!("step {i}: {kind:?} is not pointer input")));
                }
            }
        }
        Ok(())
    }

    fn pointer(&mut self, kind: MouseEventKind, x: f64, y: f64) -> &mut Self {
        self.steps.push(Step::Pointer { kind, x, y });
        self
    }

    fn edit(&mut self, edit: EditAction) -> &mut Self {
        self.steps.push(Step::Edit { edit });
        self
    }

    /// Press, move and release.
    fn gesture(&mut self, from: (f64, f64), to: (f64, f64)) -> &mut Self {
        self.pointer(MouseEventKind::Down, from.0, from.1)
            .pointer(MouseEventKind::Move, to.0, to.1)
            .pointer(MouseEventKind::Up, to.0, to.1)
    }

    /// Session over the demo scene: move and resize the rectangle, rotate
    /// and copy it, draw an arrow, center the star, then deselect.
    pub fn demo() -> Self {
        let mut script = Script::default();
        script
            .gesture((180.0, 150.0), (220.0, 170.0))
            .gesture((300.0, 220.0), (340.0, 260.0))
            .edit(EditAction::RotateRight)
            .edit(EditAction::Copy)
            .edit(EditAction::NewShape { tool: ShapeTool::Arrow })
            .gesture((500.0, 40.0), (560.0, 80.0))
            .gesture((600.0, 400.0), (600.0, 400.0))
            .edit(EditAction::Align { base: AlignBase::Center })
            .pointer(MouseEventKind::Down, 790.0, 590.0)
            .pointer(MouseEventKind::Up, 790.0, 590.0);
        script.steps.push(Step::Tick);
        script
    }
}

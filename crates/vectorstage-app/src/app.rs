//! Application shell: configuration, scene setup and script playback.

use crate::demo;
use crate::error::AppResult;
use crate::script::{Script, Step};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vectorstage_core::{LayerId, SceneSnapshot, Stage, StageConfig};
use vectorstage_render::VelloSurface;

/// Application configuration, loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub stage: StageConfig,
    /// Script to replay; the built-in demo script when unset.
    pub script: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "vectorstage".to_string(),
            stage: StageConfig::default(),
            script: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&text)?;
        // Script paths are relative to the config file.
        if let (Some(script), Some(dir)) = (config.script.as_mut(), path.parent()) {
            if script.is_relative() {
                *script = dir.join(&*script);
            }
        }
        Ok(config)
    }
}

/// A stage with a shapes layer (the main layer) and a labels layer on top.
pub struct App {
    config: AppConfig,
    stage: Stage,
    shapes: LayerId,
    labels: LayerId,
}

impl App {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let mut stage = Stage::new(config.stage.clone());
        let size = Size::new(config.stage.width, config.stage.height);
        let shapes = stage.new_layer("shapes", Box::new(VelloSurface::new(size)));
        let labels = stage.new_layer("labels", Box::new(VelloSurface::new(size)));
        stage.set_main_layer(shapes)?;
        demo::populate(&mut stage, shapes, labels)?;
        Ok(Self {
            config,
            stage,
            shapes,
            labels,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn shapes_layer(&self) -> LayerId {
        self.shapes
    }

    pub fn labels_layer(&self) -> LayerId {
        self.labels
    }

    /// The configured script, or the demo one.
    pub fn load_script(&self) -> AppResult<Script> {
        match &self.config.script {
            Some(path) => Script::load(path),
            None => Ok(Script::demo()),
        }
    }

    pub fn play(&mut self, script: &Script) -> AppResult<()> {
        script.validate()?;
        for step in &script.steps {
            log::trace!("Step: {step:?}");
            match *step {
                Step::Pointer { kind, x, y } => self.stage.dispatch(kind, Point::new(x, y)),
                Step::Edit { edit } => self.stage.perform(edit)?,
                Step::Tick => self.stage.tick(),
            }
        }
        log::info!("Played {} steps", script.steps.len());
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.stage.snapshot()
    }

    /// Build the app, play its script and return the scene as JSON.
    pub fn run(config: AppConfig) -> AppResult<String> {
        let mut app = App::new(config)?;
        let script = app.load_script()?;
        app.play(&script)?;
        Ok(app.snapshot().to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorstage_core::{MouseEventKind, TrBoxState};

    const EPS: f64 = 1e-6;

    fn app() -> App {
        App::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_demo_scene_layers() {
        let app = app();
        let snap = app.snapshot();
        assert_eq!(snap.layers.len(), 2);
        assert_eq!(snap.layers[0].name, "shapes");
        assert_eq!(snap.layers[0].objects.len(), 3);
        assert!(snap.object_named("title").is_some());
        assert_eq!(app.stage().main_layer(), Some(app.shapes_layer()));
    }

    #[test]
    fn test_drag_rect_script() {
        let mut app = app();
        let script = Script {
            steps: vec![
                Step::Pointer { kind: MouseEventKind::Down, x: 180.0, y: 150.0 },
                Step::Pointer { kind: MouseEventKind::Move, x: 220.0, y: 170.0 },
                Step::Pointer { kind: MouseEventKind::Up, x: 220.0, y: 170.0 },
            ],
        };
        app.play(&script).unwrap();

        let snap = app.snapshot();
        let rect = snap.object_named("rect").unwrap().bounds.unwrap();
        assert!((rect.from.x - 140.0).abs() < EPS);
        assert!((rect.from.y - 120.0).abs() < EPS);
        assert_eq!(snap.tr_box.state, TrBoxState::Selected);
        assert_eq!(snap.tr_box.selected, Some(snap.object_named("rect").unwrap().id));
    }

    #[test]
    fn test_demo_script() {
        let mut app = app();
        app.play(&Script::demo()).unwrap();
        let snap = app.snapshot();

        assert!(snap.object_named("copy_rect").is_some());
        let arrow = snap.object_named("newArrow").unwrap().bounds.unwrap();
        assert!((arrow.from.x - 500.0).abs() < EPS);
        assert!((arrow.to.y - 80.0).abs() < EPS);
        let star = snap.object_named("star").unwrap().bounds.unwrap();
        assert!((star.center().x - 400.0).abs() < EPS);
        assert_eq!(snap.tr_box.state, TrBoxState::Unselected);
        assert!(snap.object_named("so1").is_none());
    }

    #[test]
    fn test_run_outputs_json() {
        let json = App::run(AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layers"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: AppConfig = serde_json::from_str(r#"{ "title": "demo", "stage": { "width": 320 } }"#).unwrap();
        assert_eq!(config.title, "demo");
        assert!((config.stage.width - 320.0).abs() < EPS);
        assert!(config.script.is_none());
    }
}

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory drawing surface
//!
//! Records every draw call of the current frame (`clear` starts a new one) and
//! can export the frame as a standalone SVG document. Used by tests and by
//! the headless renderer.

use std::fmt::Write as _;

use neuroglow_npu_neural::Position;
use serde::Serialize;

use crate::surface::{DrawingSurface, FillStyle, Glow, PathSegment, StrokeStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillCircle {
        center: Position,
        radius: f32,
        style: FillStyle,
    },
    StrokePath {
        path: PathSegment,
        style: StrokeStyle,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    frames_cleared: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Commands recorded since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_cleared(&self) -> u64 {
        self.frames_cleared
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePath { .. }))
            .count()
    }

    /// Current frame as an SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for command in &self.commands {
            match command {
                DrawCommand::StrokePath { path, style } => {
                    let d = match *path {
                        PathSegment::Line { from, to } => {
                            format!("M {} {} L {} {}", from.x, from.y, to.x, to.y)
                        }
                        PathSegment::Quadratic { from, control, to } => format!(
                            "M {} {} Q {} {} {} {}",
                            from.x, from.y, control.x, control.y, to.x, to.y
                        ),
                    };
                    let _ = writeln!(
                        svg,
                        r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round"{}/>"#,
                        d,
                        style.color.to_css(),
                        style.width,
                        glow_attribute(style.glow)
                    );
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    style,
                } => {
                    let _ = writeln!(
                        svg,
                        r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                        center.x,
                        center.y,
                        radius,
                        style.color.to_css(),
                        glow_attribute(style.glow)
                    );
                }
            }
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn glow_attribute(glow: Option<Glow>) -> String {
    match glow {
        Some(glow) => format!(
            r#" style="filter: drop-shadow(0 0 {}px {})""#,
            glow.blur,
            glow.color.to_css()
        ),
        None => String::new(),
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames_cleared += 1;
    }

    fn fill_circle(&mut self, center: Position, radius: f32, style: &FillStyle) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            style: *style,
        });
    }

    fn stroke_path(&mut self, path: &PathSegment, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath {
            path: *path,
            style: *style,
        });
    }
}
